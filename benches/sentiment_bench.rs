//! Performance benchmarks for response handling and history operations.
//!
//! Run with: cargo bench
//!
//! These benchmarks establish baseline performance metrics for:
//! - Normalizing and ranking classifier responses
//! - Aggregating statistics over histories of various sizes
//! - Appending to a file-backed store of various sizes

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mood_diary::diary::{DiaryEntry, EntryStore};
use mood_diary::history::aggregate;
use mood_diary::sentiment::{normalize_response, select_best, Category, SentimentResult};
use mood_diary::storage::FileBackend;
use serde_json::{json, Value};
use tempfile::TempDir;

fn sample_history(size: usize) -> Vec<DiaryEntry> {
    (0..size)
        .map(|i| DiaryEntry {
            id: (1_700_000_000_000u64 + i as u64).to_string(),
            text: format!("note {}", i),
            created_at: Utc
                .timestamp_millis_opt(1_700_000_000_000 + i as i64)
                .single()
                .expect("valid timestamp"),
            sentiment: SentimentResult::new(Category::ALL[i % Category::ALL.len()], 0.8),
        })
        .collect()
}

/// Benchmark response normalization for both wire shapes.
fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_response");

    let flat = json!([
        {"label": "LABEL_1", "score": 0.91},
        {"label": "LABEL_0", "score": 0.09}
    ]);
    let nested = Value::Array(vec![flat.clone()]);

    for (name, body) in [("flat", &flat), ("nested", &nested)] {
        group.bench_with_input(BenchmarkId::from_parameter(name), body, |b, body| {
            b.iter(|| {
                let candidates = normalize_response(black_box(body)).expect("normalize failed");
                black_box(select_best(&candidates).map(|best| best.score));
            });
        });
    }

    group.finish();
}

/// Benchmark aggregation at various history sizes.
fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in [10, 1_000, 100_000] {
        let entries = sample_history(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| black_box(aggregate(black_box(entries))));
        });
    }

    group.finish();
}

/// Benchmark a single append against file slots of various sizes.
fn bench_file_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_append");
    group.sample_size(20);

    for size in [10, 1_000] {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let store = EntryStore::new(FileBackend::open(temp_dir.path()).expect("open failed"));
        for i in 0..size {
            store
                .append(&format!("seed {}", i), SentimentResult::new(Category::Neutral, 0.5))
                .expect("seed append failed");
        }

        group.bench_with_input(BenchmarkId::from_parameter(size), &store, |b, store| {
            b.iter(|| {
                store
                    .append("benchmark note", SentimentResult::new(Category::Positive, 0.9))
                    .expect("append failed");
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_aggregate, bench_file_append);
criterion_main!(benches);
