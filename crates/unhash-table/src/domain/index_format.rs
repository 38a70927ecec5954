//! Sorted index file format definitions
//!
//! An index file is a 64-byte header followed by fixed-width entries
//! `(digest bytes, ordinal: u64 LE)` sorted by digest bytes. The ordinal is
//! the candidate's position in enumeration order.

use crate::config::TableConfig;
use crate::constants::{
    INDEX_FORMAT_VERSION, INDEX_HEADER_SIZE, INDEX_MAGIC, INDEX_ORDINAL_SIZE,
};
use crate::domain::digest::DigestAlgorithm;
use std::time::{SystemTime, UNIX_EPOCH};

/// Index file header metadata
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexHeader {
    /// File format version
    pub version: u16,
    /// Digest algorithm of the indexed table
    pub algorithm: DigestAlgorithm,
    /// Candidate length
    pub length: u32,
    /// Alphabet size
    pub alphabet_len: u32,
    /// Checksum of the alphabet (order sensitive)
    pub alphabet_checksum: u64,
    /// Number of entries
    pub entry_count: u64,
    /// Creation timestamp (Unix epoch seconds)
    pub created_at: u64,
}

/// Index format errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexFormatError {
    #[error("Invalid file format: not a valid index file")]
    InvalidMagic,

    #[error("Unsupported index format version: {0}")]
    UnsupportedVersion(u16),

    #[error("Unknown digest algorithm id: {0}")]
    UnknownAlgorithm(u16),

    #[error("Digest algorithm mismatch: expected {expected}, found {found}")]
    AlgorithmMismatch {
        expected: DigestAlgorithm,
        found: DigestAlgorithm,
    },

    #[error("Length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: u32, found: u32 },

    #[error("Alphabet mismatch: index was built with a different alphabet")]
    AlphabetMismatch,

    #[error("Invalid file size: expected {expected} bytes, found {found} bytes")]
    InvalidFileSize { expected: u64, found: u64 },

    #[error("Index header claims {0} entries, more than any file can hold")]
    EntryCountOverflow(u64),

    #[error("Index file is shorter than its header")]
    Truncated,
}

impl IndexHeader {
    /// Create a header for an index of `entry_count` entries
    pub fn new(config: &TableConfig, length: u32, entry_count: u64) -> Self {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            version: INDEX_FORMAT_VERSION,
            algorithm: config.algorithm,
            length,
            alphabet_len: config.alphabet.len() as u32,
            alphabet_checksum: config.alphabet.checksum(),
            entry_count,
            created_at,
        }
    }

    /// Size of one entry in bytes
    pub fn entry_size(&self) -> usize {
        entry_size(self.algorithm)
    }

    /// Serialize header to bytes (64 bytes)
    pub fn to_bytes(&self) -> [u8; INDEX_HEADER_SIZE] {
        let mut buf = [0u8; INDEX_HEADER_SIZE];

        buf[0..8].copy_from_slice(&INDEX_MAGIC);
        buf[8..10].copy_from_slice(&self.version.to_le_bytes());
        buf[10..12].copy_from_slice(&self.algorithm.id().to_le_bytes());
        buf[12..16].copy_from_slice(&self.length.to_le_bytes());
        buf[16..20].copy_from_slice(&self.alphabet_len.to_le_bytes());
        // 20..24 reserved
        buf[24..32].copy_from_slice(&self.alphabet_checksum.to_le_bytes());
        buf[32..40].copy_from_slice(&self.entry_count.to_le_bytes());
        buf[40..48].copy_from_slice(&self.created_at.to_le_bytes());
        // 48..64 reserved

        buf
    }

    /// Deserialize header from bytes
    pub fn from_bytes(buf: &[u8; INDEX_HEADER_SIZE]) -> Result<Self, IndexFormatError> {
        if buf[0..8] != INDEX_MAGIC {
            return Err(IndexFormatError::InvalidMagic);
        }

        let version = u16::from_le_bytes([buf[8], buf[9]]);
        if version != INDEX_FORMAT_VERSION {
            return Err(IndexFormatError::UnsupportedVersion(version));
        }

        let algorithm_id = u16::from_le_bytes([buf[10], buf[11]]);
        let algorithm = DigestAlgorithm::from_id(algorithm_id)
            .ok_or(IndexFormatError::UnknownAlgorithm(algorithm_id))?;

        Ok(Self {
            version,
            algorithm,
            length: u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]),
            alphabet_len: u32::from_le_bytes([buf[16], buf[17], buf[18], buf[19]]),
            alphabet_checksum: u64::from_le_bytes([
                buf[24], buf[25], buf[26], buf[27], buf[28], buf[29], buf[30], buf[31],
            ]),
            entry_count: u64::from_le_bytes([
                buf[32], buf[33], buf[34], buf[35], buf[36], buf[37], buf[38], buf[39],
            ]),
            created_at: u64::from_le_bytes([
                buf[40], buf[41], buf[42], buf[43], buf[44], buf[45], buf[46], buf[47],
            ]),
        })
    }

    /// Check that this index belongs to the table described by `config` and `length`
    pub fn validate(&self, config: &TableConfig, length: u32) -> Result<(), IndexFormatError> {
        if self.algorithm != config.algorithm {
            return Err(IndexFormatError::AlgorithmMismatch {
                expected: config.algorithm,
                found: self.algorithm,
            });
        }

        if self.length != length {
            return Err(IndexFormatError::LengthMismatch {
                expected: length,
                found: self.length,
            });
        }

        if self.alphabet_len as usize != config.alphabet.len()
            || self.alphabet_checksum != config.alphabet.checksum()
        {
            return Err(IndexFormatError::AlphabetMismatch);
        }

        Ok(())
    }
}

/// In-memory index entry holding an `N`-byte digest
///
/// `N` is the digest width of the indexed algorithm, so an entry costs
/// exactly what it occupies on disk. Entries compare by digest first and
/// ordinal second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct IndexEntry<const N: usize> {
    pub digest: [u8; N],
    /// Position of the candidate in enumeration order
    pub ordinal: u64,
}

impl<const N: usize> IndexEntry<N> {
    pub fn new(digest: [u8; N], ordinal: u64) -> Self {
        Self { digest, ordinal }
    }
}

/// Size of one index entry for `algorithm`
pub fn entry_size(algorithm: DigestAlgorithm) -> usize {
    algorithm.byte_len() + INDEX_ORDINAL_SIZE
}

/// Calculate expected file size from header
///
/// # Errors
///
/// Returns [`IndexFormatError::EntryCountOverflow`] if the entry count in
/// the header cannot describe a real file.
pub fn expected_file_size(header: &IndexHeader) -> Result<u64, IndexFormatError> {
    header
        .entry_count
        .checked_mul(header.entry_size() as u64)
        .and_then(|body| body.checked_add(INDEX_HEADER_SIZE as u64))
        .ok_or(IndexFormatError::EntryCountOverflow(header.entry_count))
}
