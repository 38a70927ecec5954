//! 検索ベンチマーク
//!
//! 線形走査とソート済みインデックスによる検索を同じテーブルで比較する。
//!
//! ## 実行方法
//!
//! ```powershell
//! cargo bench --bench lookup_bench
//! ```

use std::sync::OnceLock;
use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tempfile::TempDir;
use unhash_table::{
    DigestAlgorithm, GenerateOptions, TableConfig, build_index, generate_table, lookup,
    lookup_indexed,
};

const LENGTH: usize = 2;

// =============================================================================
// Table Setup
// =============================================================================

struct BenchTable {
    _temp_dir: TempDir,
    config: TableConfig,
}

/// Length-2 table over the default alphabet, indexed, built once
static BENCH_TABLE: OnceLock<BenchTable> = OnceLock::new();

fn bench_table() -> &'static BenchTable {
    BENCH_TABLE.get_or_init(|| {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = TableConfig::new(temp_dir.path()).with_max_shard_bytes(64 * 1024);
        generate_table(LENGTH, &config, GenerateOptions::default()).expect("generation failed");
        build_index(LENGTH, &config).expect("index build failed");
        BenchTable {
            _temp_dir: temp_dir,
            config,
        }
    })
}

fn ci_criterion() -> Criterion {
    Criterion::default()
        .sample_size(15)
        .measurement_time(Duration::from_secs(8))
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_lookup(c: &mut Criterion) {
    let table = bench_table();
    let mut group = c.benchmark_group("lookup");

    let middle = DigestAlgorithm::Sha256.hex_digest("O!");
    let missing = DigestAlgorithm::Sha256.hex_digest("not in table");

    group.bench_function("linear_middle", |b| {
        b.iter(|| lookup(LENGTH, black_box(&middle), &table.config))
    });
    group.bench_function("linear_missing", |b| {
        b.iter(|| lookup(LENGTH, black_box(&missing), &table.config))
    });
    group.bench_function("indexed_middle", |b| {
        b.iter(|| lookup_indexed(LENGTH, black_box(&middle), &table.config))
    });
    group.bench_function("indexed_missing", |b| {
        b.iter(|| lookup_indexed(LENGTH, black_box(&missing), &table.config))
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = ci_criterion();
    targets = bench_lookup,
}

criterion_main!(benches);
