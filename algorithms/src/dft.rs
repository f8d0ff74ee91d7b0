//! This module contains an in-place discrete Fourier transform over arbitrary rings,
//! and polynomial multiplication built on top of it.
//!
//! The transform does not depend on the element type beyond ring arithmetic, so the same code
//! runs over complex numbers and over the finite field of [ModInt].

use std::{
    f64::consts::PI,
    ops::{Add, Mul, Neg, Sub},
};

use derive_more::Display;
use itertools::Itertools;
use num::{complex::Complex64, One, Zero};

/// Reorders `values` such that the element at index `i` moves to the index with the bits of `i` reversed.
/// # Panics
/// If the length of `values` is not a power of two.
pub fn bit_reverse_permute<T>(values: &mut [T]) {
    let n = values.len();
    if n <= 1 {
        return;
    }
    assert!(n.is_power_of_two(), "Length {} is no power of two", n);
    let bits = n.trailing_zeros();

    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        // Only swap once.
        if i < j {
            values.swap(i, j);
        }
    }
}

/// Transforms `values` in place, evaluating the polynomial with coefficients `values` at all powers of `omega`.
/// `omega` has to be a primitive root of unity of order `values.len()`.
///
/// To calculate the inverse transform, call this with `omega`'s inverse and divide every element by `values.len()`.
/// # Runtime
/// O(n log n)
/// # Panics
/// If the length of `values` is not a power of two.
/// # Example
/// ```
/// # use algorithms::dft::{dft, ModInt};
/// let mut values = vec![ModInt::new(1), ModInt::new(1), ModInt::new(0), ModInt::new(0)];
/// dft(&mut values, ModInt::root_of_unity(2));
/// // 1 + x evaluated at x = 1
/// assert_eq!(values[0], ModInt::new(2));
/// ```
pub fn dft<T>(values: &mut [T], omega: T)
where
    T: Copy + One + Add<Output = T> + Sub<Output = T> + Mul<Output = T>,
{
    let n = values.len();
    if n <= 1 {
        return;
    }
    assert!(n.is_power_of_two(), "Length {} is no power of two", n);
    let levels = n.trailing_zeros() as usize;

    // Permuting beforehand allows the butterflies to work in place on contiguous blocks.
    bit_reverse_permute(values);

    // omegas[level] = omega^(2^(levels - level)), a root of unity of order 2^level.
    let mut omegas = vec![omega; levels + 1];
    for level in (1..levels).rev() {
        omegas[level] = omegas[level + 1] * omegas[level + 1];
    }

    for (level, &level_omega) in omegas.iter().enumerate().skip(1) {
        let block_len = 1 << level;
        for block in values.chunks_exact_mut(block_len) {
            let (lower, upper) = block.split_at_mut(block_len / 2);
            let mut twiddle = T::one();
            for (a, b) in lower.iter_mut().zip(upper.iter_mut()) {
                let x = *a;
                let y = twiddle * *b;
                *a = x + y;
                *b = x - y;
                twiddle = twiddle * level_omega;
            }
        }
    }
}

/// The prime [ModInt] arithmetic is done modulo. `MODULUS - 1 = 3 * 2^30`.
pub const MODULUS: u64 = 3 * (1 << 30) + 1;

// 5 generates the multiplicative group, so 5^3 has order 2^30.
const ROOT_OF_UNITY: u64 = 125;
const ROOT_OF_UNITY_LOG_ORDER: u32 = 30;

/// An element of the finite field with [MODULUS] elements.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModInt(u64);

impl ModInt {
    /// Creates the residue of `value`.
    pub fn new(value: u64) -> Self {
        Self(value % MODULUS)
    }

    /// Creates the residue of `value`, mapping negative numbers to their additive inverse.
    pub fn from_signed(value: i64) -> Self {
        let residue = Self::new(value.unsigned_abs());
        if value < 0 {
            -residue
        } else {
            residue
        }
    }

    /// The canonical representative in `0..MODULUS`.
    pub fn value(self) -> u64 {
        self.0
    }

    /// Raises this to the `exponent`-th power by repeated squaring.
    pub fn pow(self, mut exponent: u64) -> Self {
        let mut base = self;
        let mut result = Self::one();
        while exponent > 0 {
            if exponent % 2 == 1 {
                result = result * base;
            }
            base = base * base;
            exponent /= 2;
        }
        result
    }

    /// The multiplicative inverse, using Fermat's little theorem.
    /// # Panics
    /// If this is zero.
    pub fn inverse(self) -> Self {
        assert!(!self.is_zero(), "Zero has no inverse");
        self.pow(MODULUS - 2)
    }

    /// A primitive root of unity of order `2^log_order`.
    /// # Panics
    /// If `log_order > 30`, as there is no such root in this field.
    pub fn root_of_unity(log_order: u32) -> Self {
        assert!(
            log_order <= ROOT_OF_UNITY_LOG_ORDER,
            "There is no root of unity of order 2^{}",
            log_order
        );
        (log_order..ROOT_OF_UNITY_LOG_ORDER).fold(Self(ROOT_OF_UNITY), |omega, _| omega * omega)
    }
}

impl Add for ModInt {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self((self.0 + rhs.0) % MODULUS)
    }
}

impl Sub for ModInt {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self((self.0 + MODULUS - rhs.0) % MODULUS)
    }
}

impl Mul for ModInt {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        // Both factors are below 2^32, so the product fits.
        Self(self.0 * rhs.0 % MODULUS)
    }
}

impl Neg for ModInt {
    type Output = Self;
    fn neg(self) -> Self {
        Self((MODULUS - self.0) % MODULUS)
    }
}

impl Zero for ModInt {
    fn zero() -> Self {
        Self(0)
    }
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl One for ModInt {
    fn one() -> Self {
        Self(1)
    }
}

// Big enough to hold every coefficient of the product.
fn transform_len(a: usize, b: usize) -> usize {
    2 * a.max(b).next_power_of_two()
}

fn padded<T: Zero + Clone>(coefficients: impl Iterator<Item = T>, len: usize) -> Vec<T> {
    let mut padded: Vec<T> = coefficients.collect();
    padded.resize(len, T::zero());
    padded
}

// Leaves at least one coefficient, so the zero polynomial stays representable.
fn trim_trailing_zeros<T: Zero>(coefficients: &mut Vec<T>) {
    while coefficients.len() > 1 && coefficients.last().map_or(false, Zero::is_zero) {
        coefficients.pop();
    }
}

/// Multiplies the polynomials with coefficients `a` and `b` (lowest degree first) using a complex transform.
/// Coefficients are rounded to the nearest integer, so the result is exact as long as the
/// floating point error stays below 0.5.
/// Trailing zero coefficients are dropped, but at least one coefficient is kept.
/// If either polynomial has no coefficients at all, the result has none either.
/// # Example
/// ```
/// # use algorithms::dft::multiply_polynomials;
/// // (1 + 2x)(3 + x) = 3 + 7x + 2x^2
/// assert_eq!(multiply_polynomials(&[1, 2], &[3, 1]), vec![3, 7, 2]);
/// ```
pub fn multiply_polynomials(a: &[i64], b: &[i64]) -> Vec<i64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let n = transform_len(a.len(), b.len());
    log::debug!("Multiplying polynomials with a complex transform of size {}", n);

    let to_complex = |&c: &i64| Complex64::new(c as f64, 0.0);
    let mut transformed_a = padded(a.iter().map(to_complex), n);
    let mut transformed_b = padded(b.iter().map(to_complex), n);

    let omega = Complex64::from_polar(1.0, 2.0 * PI / n as f64);
    dft(&mut transformed_a, omega);
    dft(&mut transformed_b, omega);

    for (x, y) in transformed_a.iter_mut().zip_eq(&transformed_b) {
        *x = *x * *y;
    }

    dft(&mut transformed_a, omega.inv());

    let mut product: Vec<i64> = transformed_a
        .iter()
        .map(|c| (c.re / n as f64).round() as i64)
        .collect();
    trim_trailing_zeros(&mut product);
    product
}

/// Multiplies the polynomials with coefficients `a` and `b` (lowest degree first) exactly,
/// with all coefficients taken modulo [MODULUS].
/// Trailing zero coefficients are dropped like in [multiply_polynomials].
/// # Panics
/// If the product needs a transform longer than `2^30`.
pub fn multiply_polynomials_mod(a: &[i64], b: &[i64]) -> Vec<ModInt> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let n = transform_len(a.len(), b.len());
    log::debug!("Multiplying polynomials with a modular transform of size {}", n);

    let to_mod = |&c: &i64| ModInt::from_signed(c);
    let mut transformed_a = padded(a.iter().map(to_mod), n);
    let mut transformed_b = padded(b.iter().map(to_mod), n);

    let omega = ModInt::root_of_unity(n.trailing_zeros());
    dft(&mut transformed_a, omega);
    dft(&mut transformed_b, omega);

    for (x, y) in transformed_a.iter_mut().zip_eq(&transformed_b) {
        *x = *x * *y;
    }

    dft(&mut transformed_a, omega.inverse());

    let n_inverse = ModInt::new(n as u64).inverse();
    let mut product: Vec<ModInt> = transformed_a.into_iter().map(|c| c * n_inverse).collect();
    trim_trailing_zeros(&mut product);
    product
}
