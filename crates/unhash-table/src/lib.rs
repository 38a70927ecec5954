//! unhash-table - Brute-force digest reverse-lookup tables
//!
//! This crate provides functionality to:
//! - Enumerate every string of a given length over a fixed alphabet
//! - Persist `(digest, string)` records into size-bounded shard files
//! - Look a digest up again by scanning the shards in order
//! - Verify a table and build an optional sorted index for it

pub mod app;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod infra;

// Re-export commonly used types
pub use app::generator::{
    ExistingTable, GenerateOptions, GenerateReport, generate_table, generate_table_with_progress,
};
pub use app::indexer::{IndexSummary, build_index, lookup_indexed};
pub use app::lookup::{LookupReport, lookup, lookup_with_report};
pub use app::verify::{ShardSummary, TableSummary, verify_table};
pub use config::TableConfig;
pub use constants::*;
pub use domain::alphabet::{Alphabet, AlphabetError};
pub use domain::digest::DigestAlgorithm;
pub use domain::enumerate::{Candidates, candidate_count, nth_candidate};
pub use domain::record::{Record, RecordError};
pub use error::{Result, TableError};
