//! Record line format
//!
//! Format: `"<hex-digest>, <candidate>\n"`
//!
//! Lines are split on the first delimiter. The digest is fixed-width hex and
//! can never contain the delimiter, so the first occurrence always ends the
//! digest field even if the candidate itself contains `", "`.

use crate::constants::{RECORD_DELIMITER, RECORD_TERMINATOR};
use crate::domain::digest::DigestAlgorithm;

/// A borrowed `(digest, candidate)` pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record<'a> {
    /// Lowercase hex digest
    pub digest: &'a str,
    /// Original string
    pub candidate: &'a str,
}

/// Reasons a shard line fails to parse
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("missing ', ' delimiter")]
    MissingDelimiter,

    #[error("digest field is {found} characters, expected {expected}")]
    DigestWidth { expected: usize, found: usize },

    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

impl<'a> Record<'a> {
    pub fn new(digest: &'a str, candidate: &'a str) -> Self {
        Self { digest, candidate }
    }

    /// Size of the encoded line in bytes, terminator included
    #[inline]
    pub fn encoded_len(&self) -> usize {
        encoded_len(self.digest, self.candidate)
    }

    /// Append the encoded line to `buf`
    pub fn encode_into(&self, buf: &mut String) {
        buf.push_str(self.digest);
        buf.push_str(RECORD_DELIMITER);
        buf.push_str(self.candidate);
        buf.push(RECORD_TERMINATOR);
    }

    /// Encode as an owned line
    pub fn encode(&self) -> String {
        let mut buf = String::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf
    }

    /// Parse one line, with or without its terminator
    ///
    /// A trailing `\r` is tolerated. The digest field must have the width of
    /// `algorithm`'s hex digest.
    pub fn parse(line: &'a str, algorithm: DigestAlgorithm) -> Result<Self, RecordError> {
        let line = line.strip_suffix(RECORD_TERMINATOR).unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        let (digest, candidate) = line
            .split_once(RECORD_DELIMITER)
            .ok_or(RecordError::MissingDelimiter)?;

        if digest.len() != algorithm.hex_len() {
            return Err(RecordError::DigestWidth {
                expected: algorithm.hex_len(),
                found: digest.len(),
            });
        }

        Ok(Self { digest, candidate })
    }

    /// Parse one line from raw bytes
    pub fn parse_bytes(line: &'a [u8], algorithm: DigestAlgorithm) -> Result<Self, RecordError> {
        let line = std::str::from_utf8(line).map_err(|_| RecordError::InvalidUtf8)?;
        Self::parse(line, algorithm)
    }
}

/// Encoded size of a record: digest + delimiter + candidate + terminator
#[inline]
pub fn encoded_len(digest: &str, candidate: &str) -> usize {
    digest.len() + RECORD_DELIMITER.len() + candidate.len() + RECORD_TERMINATOR.len_utf8()
}

/// Largest encoded record for candidates of `length` over `max_char_bytes`-wide characters
pub fn max_encoded_len(algorithm: DigestAlgorithm, length: usize, max_char_bytes: usize) -> usize {
    algorithm.hex_len()
        + RECORD_DELIMITER.len()
        + length * max_char_bytes
        + RECORD_TERMINATOR.len_utf8()
}
