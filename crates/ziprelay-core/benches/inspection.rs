//! Benchmarks for archive inspection and bundling.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use std::hint::black_box;
use std::io::Cursor;
use ziprelay_core::BundleConfig;
use ziprelay_core::BundleInput;
use ziprelay_core::bundle_files;
use ziprelay_core::inspect_archive;
use ziprelay_core::test_utils::ZipTestBuilder;

/// Creates a ZIP archive with many small files under one root directory.
fn create_many_small_files_zip(file_count: usize) -> Vec<u8> {
    (0..file_count)
        .fold(ZipTestBuilder::new(), |b, i| {
            b.add_file(&format!("root/file{i:04}.txt"), format!("content{i}").as_bytes())
        })
        .build()
}

fn bench_inspect_many_files(c: &mut Criterion) {
    let mut group = c.benchmark_group("inspect_many_files");

    for count in [10, 100, 1000] {
        let data = create_many_small_files_zip(count);
        let size = data.len() as u64;
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &data, |b, data| {
            b.iter(|| {
                let info = inspect_archive("bench.zip", Cursor::new(data.as_slice()), size).unwrap();
                black_box(info.total_files)
            });
        });
    }

    group.finish();
}

fn bench_bundle(c: &mut Criterion) {
    let mut group = c.benchmark_group("bundle");

    for size in [1024usize, 64 * 1024, 1024 * 1024] {
        let payload = vec![0xAB_u8; size];
        group.throughput(Throughput::Bytes((size * 4) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &payload, |b, payload| {
            b.iter(|| {
                let files: Vec<_> = (0..4)
                    .map(|i| {
                        BundleInput::new(format!("img{i}.png"), "image/png", payload.as_slice())
                    })
                    .collect();
                let bundle = bundle_files(files, &BundleConfig::default()).unwrap();
                black_box(bundle.archive_size())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_inspect_many_files, bench_bundle);
criterion_main!(benches);
