//! Shared pieces of the unhash binaries: table arguments and logging setup

use std::path::PathBuf;

use clap::Args;
use tracing_subscriber::EnvFilter;
use unhash_table::{DEFAULT_MAX_SHARD_BYTES, DEFAULT_OUTPUT_DIR, DigestAlgorithm, TableConfig};

/// Arguments locating a table, shared by every binary
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Number of characters in each candidate string
    pub length: usize,

    /// Directory holding the shard files
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Digest algorithm (sha256, sha1, sha512)
    #[arg(short, long, default_value_t = DigestAlgorithm::Sha256)]
    pub algorithm: DigestAlgorithm,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl TableArgs {
    /// Configuration with the default shard cap
    pub fn to_config(&self) -> TableConfig {
        TableConfig::new(&self.output_dir).with_algorithm(self.algorithm)
    }
}

/// Shard size cap, only meaningful to the binaries that write or check shards
#[derive(Args, Debug, Clone)]
pub struct ShardArgs {
    /// Maximum size of one shard file in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_SHARD_BYTES)]
    pub max_shard_bytes: u64,
}

impl ShardArgs {
    pub fn apply(&self, config: TableConfig) -> TableConfig {
        config.with_max_shard_bytes(self.max_shard_bytes)
    }
}

/// Install the tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` with `verbose`.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}
