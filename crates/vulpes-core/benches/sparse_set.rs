//! Benchmarks for the control arena.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use vulpes_core::{
    Rect,
    alloc::sparse_set::{IndexSlot, SparseSet},
};

#[derive(Clone, Copy, Debug, Default)]
struct NodeData {
    bounds: Rect,
    flags: u32,
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_set_insert");

    for size in [100, 1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut set = SparseSet::new();
                for _ in 0..size {
                    set.push(black_box(NodeData::default()));
                }
                set
            });
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_set_lookup");

    for size in [100, 1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));
        let mut set = SparseSet::new();
        let handles: Vec<IndexSlot> = (0..size).map(|_| set.push(NodeData::default())).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut flags = 0u32;
                for &idx in &handles {
                    flags ^= set.get(black_box(idx)).flags;
                }
                flags
            });
        });
    }

    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    c.bench_function("sparse_set_remove_reinsert_1000", |b| {
        let mut set = SparseSet::new();
        let mut handles: Vec<IndexSlot> = (0..1000).map(|_| set.push(NodeData::default())).collect();
        b.iter(|| {
            for slot in handles.iter_mut() {
                let data = set.remove(*slot);
                *slot = set.push(black_box(data));
            }
        });
    });
}

criterion_group!(benches, bench_insert, bench_lookup, bench_churn);
criterion_main!(benches);
