//! テーブル生成ベンチマーク
//!
//! 列挙・ダイジェスト計算・シャード書き込みの各段を計測する。
//! 1分以内で完走する規模に抑えている。

use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tempfile::TempDir;
use unhash_table::{Alphabet, Candidates, DigestAlgorithm, GenerateOptions, TableConfig, generate_table};

fn ci_criterion() -> Criterion {
    Criterion::default()
        .sample_size(15)
        .measurement_time(Duration::from_secs(8))
}

fn bench_enumerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate");
    let alphabet = Alphabet::default();

    group.bench_function("default_alphabet_len2", |b| {
        b.iter(|| Candidates::new(black_box(&alphabet), 2).count())
    });

    group.finish();
}

fn bench_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("digest");

    for algorithm in DigestAlgorithm::ALL {
        group.bench_function(algorithm.name(), |b| {
            b.iter(|| algorithm.hex_digest(black_box("~a!Z")))
        });
    }

    group.finish();
}

fn bench_generate_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_table");
    let dir = TempDir::new().expect("Failed to create temp dir");

    // 8,836 records; small cap so the shard rollover path is exercised
    let config = TableConfig::new(dir.path()).with_max_shard_bytes(64 * 1024);
    let options = GenerateOptions::default().replace_existing();

    group.bench_function("default_alphabet_len2", |b| {
        b.iter(|| generate_table(2, &config, options).expect("generation failed"))
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = ci_criterion();
    targets =
        bench_enumerate,
        bench_digest,
        bench_generate_table,
}

criterion_main!(benches);
