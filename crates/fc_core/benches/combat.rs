//! Ruleset parsing and combat benchmarks for fc_core.
//!
//! Run with: `cargo bench -p fc_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fc_core::combat::calculate_combat;
use fc_core::ruleset::parse_ruleset;
use fc_test_utils::fixtures::{in_city, sample_ruleset, sample_sources, world};

/// Parses and extracts the six sample ruleset files.
pub fn parse_benchmark(c: &mut Criterion) {
    let sources = sample_sources();
    c.bench_function("parse_sample_ruleset", |b| {
        b.iter(|| parse_ruleset(black_box(&sources)))
    });
}

/// Full outcome distributions for an open-field and a walled-city fight.
pub fn combat_benchmark(c: &mut Criterion) {
    let ruleset = sample_ruleset();
    let field = world(&ruleset, "archers", "phalanx", "hills");
    let city = in_city(world(&ruleset, "catapult", "musketeers", "hills"), 9, &["City Walls"]);

    c.bench_function("combat_open_field", |b| {
        b.iter(|| calculate_combat(black_box(&ruleset), black_box(&field)))
    });
    c.bench_function("combat_walled_city", |b| {
        b.iter(|| calculate_combat(black_box(&ruleset), black_box(&city)))
    });
}

criterion_group!(benches, parse_benchmark, combat_benchmark);
criterion_main!(benches);
