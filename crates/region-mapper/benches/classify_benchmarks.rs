//! Benchmarks for whole-image classification.
//!
//! Compares the table scan with the direct band/quadrant lookup at map
//! sizes typical of published MOLA overview images.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mola_common::{EdgePolicy, GridConfig};
use region_mapper::{ClassifyMethod, RegionClassifier, RegionMap};

fn bench_region_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("region_map");
    group.sample_size(20);

    for &(width, height) in &[(360u32, 180u32), (1440, 720)] {
        let classifier = RegionClassifier::new(width, height, &GridConfig::default());
        for method in [ClassifyMethod::Scan, ClassifyMethod::Direct] {
            group.bench_with_input(
                BenchmarkId::new(format!("{method:?}"), format!("{width}x{height}")),
                &classifier,
                |b, classifier| b.iter(|| RegionMap::build_with(black_box(classifier), method)),
            );
        }
    }

    group.finish();
}

fn bench_single_pixel(c: &mut Criterion) {
    let config = GridConfig::default().with_edge_policy(EdgePolicy::Reference);
    let classifier = RegionClassifier::new(2880, 1440, &config);

    c.bench_function("classify_scan_pixel", |b| {
        b.iter(|| classifier.classify_index(black_box(2000), black_box(1300)))
    });
    c.bench_function("classify_direct_pixel", |b| {
        b.iter(|| classifier.direct_index(black_box(2000), black_box(1300)))
    });
}

criterion_group!(benches, bench_region_map, bench_single_pixel);
criterion_main!(benches);
