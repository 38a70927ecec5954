//! Digest computation
//!
//! Candidates are hashed over their UTF-8 bytes and rendered as lowercase
//! hexadecimal of fixed width. SHA-256 is the reference table format.

use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::str::FromStr;

/// Supported digest algorithms
///
/// The algorithm is not recorded in shard files, so lookups must use the
/// algorithm the table was generated with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
    Sha1,
    Sha512,
}

/// Unknown algorithm name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown digest algorithm '{0}' (expected sha256, sha1 or sha512)")]
pub struct UnknownAlgorithm(pub String);

impl DigestAlgorithm {
    /// All supported algorithms
    pub const ALL: [DigestAlgorithm; 3] = [Self::Sha256, Self::Sha1, Self::Sha512];

    /// Stable name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha1 => "sha1",
            Self::Sha512 => "sha512",
        }
    }

    /// Stable identifier stored in index headers
    pub fn id(self) -> u16 {
        match self {
            Self::Sha256 => 1,
            Self::Sha1 => 2,
            Self::Sha512 => 3,
        }
    }

    /// Inverse of [`DigestAlgorithm::id`]
    pub fn from_id(id: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }

    /// Raw digest size in bytes
    pub fn byte_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha1 => 20,
            Self::Sha512 => 64,
        }
    }

    /// Hex digest width in characters
    pub fn hex_len(self) -> usize {
        self.byte_len() * 2
    }

    /// Raw digest of a candidate
    pub fn digest(self, candidate: &str) -> Vec<u8> {
        let bytes = candidate.as_bytes();
        match self {
            Self::Sha256 => Sha256::digest(bytes).to_vec(),
            Self::Sha1 => Sha1::digest(bytes).to_vec(),
            Self::Sha512 => Sha512::digest(bytes).to_vec(),
        }
    }

    /// Lowercase hex digest of a candidate
    pub fn hex_digest(self, candidate: &str) -> String {
        hex::encode(self.digest(candidate))
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha1" | "sha-1" => Ok(Self::Sha1),
            "sha512" | "sha-512" => Ok(Self::Sha512),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}
