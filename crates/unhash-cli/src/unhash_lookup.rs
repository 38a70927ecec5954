//! Digest lookup CLI
//!
//! Usage: unhash_lookup <LENGTH> [DIGEST] [options]
//!
//! Without DIGEST, digests are read from stdin one per line until `q` or EOF.
//!
//! Options:
//!   --indexed                 Search the sorted index built by unhash_index
//!   -o, --output-dir <DIR>    Directory holding the table (default: output)
//!   -a, --algorithm <ALG>     sha256 (default), sha1 or sha512
//!   -v, --verbose             Debug logging
//!
//! Example: unhash_lookup 3 ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use unhash_cli::{TableArgs, init_logging};
use unhash_table::{TableConfig, lookup, lookup_indexed};

#[derive(Parser, Debug)]
#[command(name = "unhash_lookup")]
#[command(about = "Find the string behind a digest in a generated table")]
struct Args {
    #[command(flatten)]
    table: TableArgs,

    /// Hex digest to reverse (prompted for when omitted)
    digest: Option<String>,

    /// Use the sorted index instead of scanning the shards
    #[arg(long)]
    indexed: bool,
}

fn run_lookup(args: &Args, config: &TableConfig, digest: &str) -> anyhow::Result<()> {
    let length = args.table.length;
    let start = Instant::now();

    let found = if args.indexed {
        lookup_indexed(length, digest, config)
    } else {
        lookup(length, digest, config)
    }
    .with_context(|| format!("lookup failed for length {length}"))?;

    match found {
        Some(candidate) => println!("Original string: {candidate}"),
        None => println!("Hash not found."),
    }
    println!(
        "Operation completed in {:.5} seconds.",
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.table.verbose)?;
    let config = args.table.to_config();

    if let Some(digest) = &args.digest {
        return run_lookup(&args, &config, digest.trim());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Enter hash to unhash ('q' to quit): ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;
        let digest = line.trim();
        match digest {
            "q" => break,
            "" => continue,
            _ => run_lookup(&args, &config, digest)?,
        }
    }
    Ok(())
}
