//! Benchmarks for per-feature style resolution.
//!
//! Run with: cargo bench --package symbology --bench style_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use symbology::{StyleCache, Symbology, VectorSymbology};
use test_utils::create_point_features;
use test_utils::colorizers::linear_gradient_json;
use test_utils::symbologies::point_json;
use workbench_common::Colorizer;

fn point_symbology() -> VectorSymbology {
    match Symbology::from_json(point_json()) {
        Ok(Symbology::Vector(v)) => v,
        other => panic!("point fixture must decode to a vector symbology: {:?}", other),
    }
}

// ============================================================================
// Style resolution
// ============================================================================

fn bench_style_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("style_resolution");
    let symbology = point_symbology();

    for distinct in [1, 16, 256] {
        let features = create_point_features(1_000, distinct);
        group.throughput(Throughput::Elements(features.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("uncached", distinct),
            &features,
            |b, features| {
                b.iter(|| {
                    for attrs in features {
                        black_box(symbology.create_styler(attrs).create_style());
                    }
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("cached", distinct),
            &features,
            |b, features| {
                let cache = StyleCache::new(1_024).expect("cache");
                b.iter(|| {
                    for attrs in features {
                        black_box(symbology.style(attrs, &cache));
                    }
                })
            },
        );
    }

    group.finish();
}

fn bench_cache_key(c: &mut Criterion) {
    let symbology = point_symbology();
    let features = create_point_features(1, 1);
    let styler = symbology.create_styler(&features[0]);

    c.bench_function("cache_key", |b| b.iter(|| black_box(styler.cache_key())));
}

// ============================================================================
// Colorizer lookup
// ============================================================================

fn bench_gradient_lookup(c: &mut Criterion) {
    let colorizer = Colorizer::from_json(linear_gradient_json()).expect("gradient fixture");
    let values: Vec<f64> = (0..10_000).map(|i| i as f64 / 100.0).collect();

    let mut group = c.benchmark_group("gradient_lookup");
    group.throughput(Throughput::Elements(values.len() as u64));
    group.bench_function("linear_gradient", |b| {
        b.iter(|| {
            for v in &values {
                black_box(colorizer.get_color(Some(*v)));
            }
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_style_resolution,
    bench_cache_key,
    bench_gradient_lookup
);
criterion_main!(benches);
