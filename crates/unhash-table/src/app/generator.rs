//! Table generation workflow
//!
//! Enumerator → digest → shard writer, single threaded.

use crate::config::TableConfig;
use crate::constants::PROGRESS_INTERVAL;
use crate::domain::enumerate::{Candidates, candidate_count};
use crate::domain::record::Record;
use crate::domain::shard::{ShardLocator, index_path};
use crate::error::{Result, TableError};
use crate::infra::shard_writer::ShardWriter;
use std::fs;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// What to do when shards for the requested length already exist
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExistingTable {
    /// Fail with [`TableError::TableExists`]
    #[default]
    Refuse,
    /// Delete the existing shards (and index), then generate a fresh table
    Replace,
}

/// Generation options
#[derive(Clone, Copy, Debug, Default)]
pub struct GenerateOptions {
    pub existing: ExistingTable,
}

impl GenerateOptions {
    pub fn replace_existing(mut self) -> Self {
        self.existing = ExistingTable::Replace;
        self
    }
}

/// Outcome of a generation run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateReport {
    pub length: usize,
    pub records: u64,
    pub shards: u32,
    pub bytes: u64,
    pub elapsed: Duration,
}

/// Generate the table for `length`
pub fn generate_table(
    length: usize,
    config: &TableConfig,
    options: GenerateOptions,
) -> Result<GenerateReport> {
    generate_table_with_progress(length, config, options, |_, _| {})
}

/// Generate the table for `length` with progress callback
///
/// The callback receives `(records written, total records)` every
/// [`PROGRESS_INTERVAL`] records and once at the end. The total is `None`
/// when it does not fit in a `u64`.
pub fn generate_table_with_progress<F>(
    length: usize,
    config: &TableConfig,
    options: GenerateOptions,
    mut on_progress: F,
) -> Result<GenerateReport>
where
    F: FnMut(u64, Option<u64>),
{
    config.validate()?;
    prepare_output_dir(length, config, options)?;

    let total = candidate_count(config.alphabet.len(), length);
    info!(
        length,
        total = ?total,
        dir = %config.output_dir.display(),
        algorithm = %config.algorithm,
        "generating table"
    );

    let start = Instant::now();
    let mut writer = ShardWriter::new(&config.output_dir, length, config.max_shard_bytes);

    for candidate in Candidates::new(&config.alphabet, length) {
        let digest = config.algorithm.hex_digest(&candidate);
        writer.write_record(&Record::new(&digest, &candidate))?;

        let written = writer.stats().records;
        if written % PROGRESS_INTERVAL == 0 {
            on_progress(written, total);
        }
    }

    let stats = writer.finish()?;
    on_progress(stats.records, total);

    let report = GenerateReport {
        length,
        records: stats.records,
        shards: stats.shards,
        bytes: stats.bytes,
        elapsed: start.elapsed(),
    };
    info!(
        length,
        records = report.records,
        shards = report.shards,
        bytes = report.bytes,
        elapsed_secs = report.elapsed.as_secs_f64(),
        "table generated"
    );
    Ok(report)
}

/// Create the output directory and apply the existing-table policy
fn prepare_output_dir(length: usize, config: &TableConfig, options: GenerateOptions) -> Result<()> {
    let dir = &config.output_dir;
    fs::create_dir_all(dir).map_err(|source| TableError::OutputDir {
        path: dir.clone(),
        source,
    })?;

    let existing: Vec<_> = ShardLocator::new(dir, length).collect();
    let Some(first) = existing.first() else {
        return Ok(());
    };

    match options.existing {
        ExistingTable::Refuse => Err(TableError::TableExists {
            length,
            path: first.path.clone(),
        }),
        ExistingTable::Replace => {
            warn!(length, shards = existing.len(), "replacing existing table");
            for shard in &existing {
                fs::remove_file(&shard.path).map_err(TableError::io(&shard.path))?;
            }
            let index = index_path(dir, length);
            if index.is_file() {
                fs::remove_file(&index).map_err(TableError::io(&index))?;
            }
            Ok(())
        }
    }
}
