//! Error types for table generation, lookup and verification

use crate::domain::alphabet::AlphabetError;
use crate::domain::index_format::IndexFormatError;
use crate::domain::record::RecordError;
use std::io;
use std::path::{Path, PathBuf};

/// Result alias used throughout the crate
pub type Result<T, E = TableError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Invalid alphabet: {0}")]
    Alphabet(#[from] AlphabetError),

    #[error("Maximum shard size must be greater than zero")]
    ZeroShardSize,

    #[error("Cannot use output directory '{path}': {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("A table for length {length} already exists ('{path}'). Replace it explicitly to regenerate.")]
    TableExists { length: usize, path: PathBuf },

    #[error("No table for length {length} in '{dir}'")]
    TableNotFound { length: usize, dir: PathBuf },

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Corrupt record at {path}:{line}: {source}")]
    CorruptRecord {
        path: PathBuf,
        line: u64,
        #[source]
        source: RecordError,
    },

    #[error("Record out of order at {path}:{line}: expected '{expected}', found '{found}'")]
    OutOfOrder {
        path: PathBuf,
        line: u64,
        expected: String,
        found: String,
    },

    #[error("Record beyond the candidate space at {path}:{line}: '{found}'")]
    UnexpectedRecord {
        path: PathBuf,
        line: u64,
        found: String,
    },

    #[error("Digest mismatch at {path}:{line} for candidate '{candidate}'")]
    DigestMismatch {
        path: PathBuf,
        line: u64,
        candidate: String,
    },

    #[error("Shard '{path}' holds {bytes} bytes, over the limit of {limit} bytes")]
    ShardOversized { path: PathBuf, bytes: u64, limit: u64 },

    #[error("Candidate space {alphabet_len}^{length} does not fit in 64 bits")]
    CandidateSpaceTooLarge { alphabet_len: usize, length: usize },

    #[error(transparent)]
    IndexFormat(#[from] IndexFormatError),
}

impl TableError {
    /// Build a closure that attaches `path` to an I/O error
    pub(crate) fn io(path: &Path) -> impl FnOnce(io::Error) -> TableError {
        let path = path.to_path_buf();
        move |source| TableError::Io { path, source }
    }
}
