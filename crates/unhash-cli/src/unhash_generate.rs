//! Table generation CLI
//!
//! Usage: unhash_generate <LENGTH> [options]
//!
//! Options:
//!   -o, --output-dir <DIR>    Directory for shard files (default: output)
//!   --max-shard-bytes <N>     Shard size cap in bytes (default: 100 MiB)
//!   -a, --algorithm <ALG>     sha256 (default), sha1 or sha512
//!   --force                   Replace an existing table of the same length
//!   --no-progress             Disable the progress bar
//!   -v, --verbose             Debug logging
//!
//! Example: unhash_generate 3

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use unhash_cli::{ShardArgs, TableArgs, init_logging};
use unhash_table::{GenerateOptions, candidate_count, generate_table_with_progress};

#[derive(Parser, Debug)]
#[command(name = "unhash_generate")]
#[command(about = "Hash every string of the given length and write the sharded table")]
struct Args {
    #[command(flatten)]
    table: TableArgs,

    #[command(flatten)]
    shard: ShardArgs,

    /// Delete an existing table of the same length before generating
    #[arg(long)]
    force: bool,

    /// Disable progress bar
    #[arg(long)]
    no_progress: bool,
}

fn progress_bar(total: Option<u64>) -> anyhow::Result<ProgressBar> {
    let pb = match total {
        Some(total) => {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                    .context("invalid progress bar template")?
                    .progress_chars("#>-"),
            );
            pb
        }
        None => ProgressBar::new_spinner(),
    };
    Ok(pb)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.table.verbose)?;

    let config = args.shard.apply(args.table.to_config());
    let length = args.table.length;
    let options = if args.force {
        GenerateOptions::default().replace_existing()
    } else {
        GenerateOptions::default()
    };

    println!(
        "Generating {} table for length {} into {}...",
        config.algorithm,
        length,
        config.output_dir.display()
    );

    let pb = if args.no_progress {
        None
    } else {
        Some(progress_bar(candidate_count(config.alphabet.len(), length))?)
    };

    let report = generate_table_with_progress(length, &config, options, |written, _| {
        if let Some(pb) = &pb {
            pb.set_position(written);
        }
    })
    .with_context(|| format!("failed to generate table for length {length}"))?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    println!(
        "Wrote {} records to {} shard(s), {:.2} MB",
        report.records,
        report.shards,
        report.bytes as f64 / (1024.0 * 1024.0)
    );
    println!(
        "Operation completed in {:.5} seconds.",
        report.elapsed.as_secs_f64()
    );
    Ok(())
}
