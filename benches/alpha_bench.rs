//! Benchmarks for the brightness to dim alpha mapping.
//!
//! The mapping runs every time the framework asks for the fingerprint dim
//! amount, so it sits on the unlock path. These benchmarks cover each
//! branch of the lookup: clamping below and above the table, exact
//! calibration points and interpolated levels.
//!
//! # Run Benchmarks
//!
//! ```sh
//! cargo bench --bench alpha_bench
//!
//! # Only the sweep
//! cargo bench --bench alpha_bench -- full_range
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use guacamole_fod::alpha::brightness_to_alpha;
use std::hint::black_box;

fn bench_single_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("brightness_to_alpha");
    group.throughput(Throughput::Elements(1));

    let test_cases = vec![
        ("below_range", -5),
        ("first_point", 0),
        ("low_interior", 5),
        ("mid_interior", 260),
        ("exact_point", 1023),
        ("high_interior", 1500),
        ("above_range", 999_999),
    ];

    for (name, brightness) in test_cases {
        group.bench_with_input(BenchmarkId::new("lookup", name), &brightness, |b, &level| {
            b.iter(|| black_box(brightness_to_alpha(black_box(level))));
        });
    }

    group.finish();
}

fn bench_full_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_range");
    group.throughput(Throughput::Elements(2001));

    group.bench_function("sweep_0_to_2000", |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for level in 0..=2000 {
                sum += i64::from(brightness_to_alpha(black_box(level)));
            }
            black_box(sum)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_single_lookup, bench_full_range);

criterion_main!(benches);
