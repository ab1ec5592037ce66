//! Criterion benchmarks for longest-ride selection.
//!
//! Measures selection time over dataset sizes comparable to one month of
//! Bergen Bysykkel rides and larger.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package bysykkel-core
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::hint::black_box;

use bysykkel_core::{RideLimit, RideRecord, Station, select_longest_rides};
use chrono::{TimeDelta, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use geo::Coord;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Fixed seed so every run sorts the same data.
const BENCHMARK_SEED: u64 = 0x00b1_5e11;

/// Dataset sizes: roughly a quiet month, a busy month, and a season.
const DATASET_SIZES: &[usize] = &[10_000, 80_000, 250_000];

/// Generate `count` rides with durations between one minute and three hours.
fn generate_rides(count: usize, seed: u64) -> Vec<RideRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let Some(started_at) = Utc.with_ymd_and_hms(2022, 6, 1, 0, 0, 0).single() else {
        return Vec::new();
    };
    let station = Station::new("33", "Høgskulen på Vestlandet", "", Coord { x: 5.349, y: 60.369 });
    (0..count)
        .filter_map(|_| {
            let duration: u64 = rng.gen_range(60..10_800);
            let elapsed = TimeDelta::try_seconds(i64::try_from(duration).ok()?)?;
            RideRecord::new(
                started_at,
                started_at + elapsed,
                duration,
                station.clone(),
                station.clone(),
            )
            .ok()
        })
        .collect()
}

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_longest_rides");

    for &size in DATASET_SIZES {
        let rides = generate_rides(size, BENCHMARK_SEED);
        group.throughput(Throughput::Elements(u64::try_from(size).unwrap_or(u64::MAX)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &rides, |b, rides| {
            b.iter(|| select_longest_rides(black_box(rides), RideLimit::DEFAULT));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_selection);
criterion_main!(benches);
