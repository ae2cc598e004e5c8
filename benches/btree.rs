//! B-tree benchmarks: bulk insert, search and delete across degrees.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use keytree::BTree;

const KEYS: usize = 10_000;

fn keys() -> Vec<String> {
    // Fixed permutation so every run inserts the same order.
    (0..KEYS)
        .map(|i| format!("key-{:08}", (i * 7_919) % KEYS))
        .collect()
}

fn build(t: usize, keys: &[String]) -> BTree<String> {
    let mut tree = BTree::new(t).unwrap();
    for k in keys {
        tree.insert(k.clone()).unwrap();
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    let keys = keys();
    let mut group = c.benchmark_group("insert");
    for t in [2, 4, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(t), &t, |b, &t| {
            b.iter(|| build(t, black_box(&keys)));
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let keys = keys();
    let mut group = c.benchmark_group("search");
    for t in [2, 4, 16, 64] {
        let tree = build(t, &keys);
        group.bench_with_input(BenchmarkId::from_parameter(t), &t, |b, _| {
            b.iter(|| {
                for k in keys.iter().step_by(7) {
                    black_box(tree.contains(k));
                }
            });
        });
    }
    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let keys = keys();
    let mut group = c.benchmark_group("delete_all");
    group.sample_size(20);
    for t in [2, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(t), &t, |b, &t| {
            b.iter_batched(
                || build(t, &keys),
                |mut tree| {
                    for k in &keys {
                        tree.delete(k);
                    }
                    tree
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_search, bench_delete);
criterion_main!(benches);
