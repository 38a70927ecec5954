//! Table related constants

// =============================================================================
// Generation parameters
// =============================================================================

/// Default alphabet: every printable ASCII character except space, in code point order
///
/// Changing this (contents or order) invalidates every table generated with it.
pub const DEFAULT_ALPHABET: &str = "!\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

/// Default maximum shard size in bytes (100 MiB)
pub const DEFAULT_MAX_SHARD_BYTES: u64 = 100 * 1024 * 1024;

/// Default output directory for tables
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Records between two progress callbacks during generation
pub const PROGRESS_INTERVAL: u64 = 100_000;

// =============================================================================
// Record format
// =============================================================================

/// Separator between digest and candidate in a record line
pub const RECORD_DELIMITER: &str = ", ";

/// Record terminator
pub const RECORD_TERMINATOR: char = '\n';

// =============================================================================
// File format
// =============================================================================

/// Shard file extension
pub const SHARD_EXTENSION: &str = "txt";

/// Sorted index file extension
pub const INDEX_EXTENSION: &str = "idx";

/// Magic number identifying a sorted index file
pub const INDEX_MAGIC: [u8; 8] = *b"UNHSHIDX";

/// Index file format version
pub const INDEX_FORMAT_VERSION: u16 = 1;

/// Index file header size in bytes
pub const INDEX_HEADER_SIZE: usize = 64;

/// Size of the ordinal stored after each digest in an index entry
pub const INDEX_ORDINAL_SIZE: usize = 8;
