//! Candidate alphabet
//!
//! An alphabet is an ordered set of characters. Its order defines the
//! enumeration order, so the same alphabet must be used for generation,
//! lookup and indexing of a table.

use crate::constants::DEFAULT_ALPHABET;
use std::fmt;
use std::str::FromStr;

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Ordered, duplicate-free character set
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

/// Reasons an alphabet is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlphabetError {
    #[error("alphabet is empty")]
    Empty,

    #[error("character {0:?} appears more than once")]
    Duplicate(char),

    #[error("control character {0:?} cannot be stored in a record line")]
    Control(char),
}

impl Alphabet {
    /// Build an alphabet from its characters, in enumeration order
    pub fn new(chars: impl IntoIterator<Item = char>) -> Result<Self, AlphabetError> {
        let chars: Vec<char> = chars.into_iter().collect();
        if chars.is_empty() {
            return Err(AlphabetError::Empty);
        }

        for (i, &c) in chars.iter().enumerate() {
            if c.is_control() {
                return Err(AlphabetError::Control(c));
            }
            if chars[..i].contains(&c) {
                return Err(AlphabetError::Duplicate(c));
            }
        }

        Ok(Self { chars })
    }

    /// Number of characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false for a validated alphabet
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character at `index` in enumeration order
    #[inline]
    pub fn char_at(&self, index: usize) -> char {
        self.chars[index]
    }

    /// Characters in enumeration order
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Widest character in UTF-8 bytes
    pub fn max_char_len(&self) -> usize {
        self.chars.iter().map(|c| c.len_utf8()).max().unwrap_or(0)
    }

    /// FNV-1a checksum over the characters in order
    ///
    /// Stored in index headers to bind an index to the alphabet it was built with.
    pub fn checksum(&self) -> u64 {
        let mut hash = FNV_OFFSET_BASIS;
        let mut buf = [0u8; 4];
        for c in &self.chars {
            for &byte in c.encode_utf8(&mut buf).as_bytes() {
                hash ^= byte as u64;
                hash = hash.wrapping_mul(FNV_PRIME);
            }
        }
        hash
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            chars: DEFAULT_ALPHABET.chars().collect(),
        }
    }
}

impl FromStr for Alphabet {
    type Err = AlphabetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.chars())
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{}", c))
    }
}
