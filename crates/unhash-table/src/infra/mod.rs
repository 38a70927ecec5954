//! Infrastructure layer - I/O and external dependencies
//!
//! This module handles file operations and other external dependencies.

pub mod index_io;
pub mod shard_reader;
pub mod shard_writer;
