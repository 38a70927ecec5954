//! Sorted index builder CLI
//!
//! Usage: unhash_index <LENGTH> [options]
//!
//! Reads every shard of the table once and writes `{LENGTH}.idx` next to it,
//! enabling `unhash_lookup --indexed`.
//!
//! Example: unhash_index 3

use anyhow::Context;
use clap::Parser;
use unhash_cli::{TableArgs, init_logging};
use unhash_table::build_index;

#[derive(Parser, Debug)]
#[command(name = "unhash_index")]
#[command(about = "Build the sorted digest index for a generated table")]
struct Args {
    #[command(flatten)]
    table: TableArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.table.verbose)?;

    let config = args.table.to_config();
    let length = args.table.length;
    println!("Building index for length {length}...");

    let summary = build_index(length, &config)
        .with_context(|| format!("failed to build index for length {length}"))?;

    println!(
        "Indexed {} entries into {}",
        summary.entries,
        summary.path.display()
    );
    println!(
        "Operation completed in {:.5} seconds.",
        summary.elapsed.as_secs_f64()
    );
    Ok(())
}
