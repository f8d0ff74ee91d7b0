use algorithms::segment_tree::{
    algebras::{SumAdd, SumCount},
    LazySegmentTree,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use std::ops::Range;

const VALUE_MAX: i64 = 1_000_000;

const RNG_SEED: [u8; 16] = *b"0123456789abcdef";

fn get_random_values(n: usize) -> Vec<SumCount> {
    let mut rng = XorShiftRng::from_seed(RNG_SEED);
    (0..n)
        .map(|_| SumCount::single(rng.gen_range(-VALUE_MAX..VALUE_MAX)))
        .collect()
}

fn get_random_ranges(n: usize, len: usize) -> Vec<Range<usize>> {
    let mut rng = XorShiftRng::from_seed(RNG_SEED);
    (0..n)
        .map(|_| {
            let a = rng.gen_range(0..len);
            let b = rng.gen_range(0..len);
            a.min(b)..a.max(b) + 1
        })
        .collect()
}

fn build_bench(values: &[SumCount]) -> LazySegmentTree<SumAdd> {
    values.iter().copied().collect()
}

fn mixed_bench(tree: &mut LazySegmentTree<SumAdd>, ranges: &[Range<usize>]) -> i64 {
    let mut checksum = 0;
    for (i, range) in ranges.iter().enumerate() {
        if i % 2 == 0 {
            tree.update(range.clone(), &(i as i64 % 7 - 3));
        } else {
            checksum ^= tree.query(range.clone()).sum;
        }
    }
    checksum
}

fn criterion_benchmark(c: &mut Criterion) {
    let values = get_random_values(1_000_000);
    let ranges = get_random_ranges(100_000, values.len());

    let mut group = c.benchmark_group("lazy_segment_tree_sum_add");
    group.sample_size(10);
    group.bench_function("build_1000000", |b| {
        b.iter(|| build_bench(black_box(&values)).len())
    });
    group.bench_function("mixed_100000_operations_on_1000000", |b| {
        let mut tree = build_bench(&values);
        b.iter(|| mixed_bench(&mut tree, black_box(&ranges)))
    });
    group.finish()
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
