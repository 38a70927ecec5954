//! Application layer - Use case implementations
//!
//! This module coordinates domain and infrastructure layers to implement use cases.

pub mod generator;
pub mod indexer;
pub mod lookup;
pub mod verify;
