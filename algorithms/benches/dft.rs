use algorithms::dft::{multiply_polynomials, multiply_polynomials_mod};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

const COEFFICIENT_MAX: i64 = 1000;

const RNG_SEED: [u8; 16] = *b"0123456789abcdef";

fn get_random_coefficients(n: usize) -> Vec<i64> {
    let mut rng = XorShiftRng::from_seed(RNG_SEED);
    (0..n)
        .map(|_| rng.gen_range(-COEFFICIENT_MAX..COEFFICIENT_MAX))
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let a = get_random_coefficients(1 << 16);
    let b = get_random_coefficients(1 << 16);

    let mut group = c.benchmark_group("polynomial_multiplication");
    group.sample_size(10);
    group.bench_function("complex_65536", |bencher| {
        bencher.iter(|| multiply_polynomials(black_box(&a), black_box(&b)).len())
    });
    group.bench_function("modular_65536", |bencher| {
        bencher.iter(|| multiply_polynomials_mod(black_box(&a), black_box(&b)).len())
    });
    group.finish()
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
