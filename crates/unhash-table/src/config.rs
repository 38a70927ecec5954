//! Table configuration
//!
//! Every entry point takes an explicit [`TableConfig`] instead of reading
//! process-wide constants.

use crate::constants::{DEFAULT_MAX_SHARD_BYTES, DEFAULT_OUTPUT_DIR};
use crate::domain::alphabet::Alphabet;
use crate::domain::digest::DigestAlgorithm;
use crate::error::{Result, TableError};
use std::path::PathBuf;

/// Where tables live and how they are built
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableConfig {
    /// Directory holding shards and indexes
    pub output_dir: PathBuf,
    /// Soft cap on the encoded size of one shard
    pub max_shard_bytes: u64,
    /// Candidate alphabet, in enumeration order
    pub alphabet: Alphabet,
    /// Digest applied to every candidate
    pub algorithm: DigestAlgorithm,
}

impl TableConfig {
    /// Default configuration rooted at `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            max_shard_bytes: DEFAULT_MAX_SHARD_BYTES,
            alphabet: Alphabet::default(),
            algorithm: DigestAlgorithm::default(),
        }
    }

    pub fn with_max_shard_bytes(mut self, max_shard_bytes: u64) -> Self {
        self.max_shard_bytes = max_shard_bytes;
        self
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn with_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Check the configuration before touching the filesystem
    ///
    /// The alphabet is validated when it is built.
    pub fn validate(&self) -> Result<()> {
        if self.max_shard_bytes == 0 {
            return Err(TableError::ZeroShardSize);
        }
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}
