//! Domain layer - Pure computational logic
//!
//! This module contains pure functions and algorithms without I/O dependencies.
//! The shard locator only probes for file existence.

pub mod alphabet;
pub mod digest;
pub mod enumerate;
pub mod index_format;
pub mod record;
pub mod shard;
