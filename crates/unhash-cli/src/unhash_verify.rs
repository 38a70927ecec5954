//! Table verification CLI
//!
//! Usage: unhash_verify <LENGTH> [options]
//!
//! Checks record order, digests and shard sizes, then prints a per-shard
//! summary. Exits non-zero on the first inconsistency.
//!
//! Example: unhash_verify 3 --max-shard-bytes 104857600

use anyhow::Context;
use clap::Parser;
use unhash_cli::{ShardArgs, TableArgs, init_logging};
use unhash_table::verify_table;

#[derive(Parser, Debug)]
#[command(name = "unhash_verify")]
#[command(about = "Verify a generated table against the enumeration")]
struct Args {
    #[command(flatten)]
    table: TableArgs,

    #[command(flatten)]
    shard: ShardArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.table.verbose)?;

    let config = args.shard.apply(args.table.to_config());
    let length = args.table.length;
    let summary = verify_table(length, &config)
        .with_context(|| format!("table for length {length} failed verification"))?;

    for shard in &summary.shards {
        println!(
            "  #{:<4} {:>12} records {:>14} bytes  {}",
            shard.part,
            shard.records,
            shard.bytes,
            shard.path.display()
        );
    }

    let expected = summary
        .expected_records
        .map_or_else(|| "overflow".to_string(), |n| n.to_string());
    println!(
        "Length {}: {} shard(s), {}/{} records",
        summary.length,
        summary.shards.len(),
        summary.records,
        expected
    );
    if summary.is_complete() {
        println!("Table is complete.");
    } else {
        println!("Table is incomplete (generation was interrupted?).");
    }
    Ok(())
}
