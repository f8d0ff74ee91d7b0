//! Ready to use algebras for [LazySegmentTree](super::LazySegmentTree).

use common::LazyAlgebra;
use derive_more::Add;

/// A sum together with the number of positions it covers.
/// The count is needed by modifications whose effect on a sum depends on the size of a range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Add)]
pub struct SumCount {
    /// The sum of all values.
    pub sum: i64,
    /// The number of values summed.
    pub count: i64,
}

impl SumCount {
    /// The aggregate of a single position holding `value`.
    pub fn single(value: i64) -> Self {
        Self {
            sum: value,
            count: 1,
        }
    }
}

/// Range sums with "add `k` to every position" modifications.
#[derive(Debug, Clone, Copy)]
pub struct SumAdd;

impl LazyAlgebra for SumAdd {
    type Value = SumCount;
    type Modification = i64;

    fn neutral() -> SumCount {
        SumCount::default()
    }
    fn identity() -> i64 {
        0
    }
    fn combine(left: &SumCount, right: &SumCount) -> SumCount {
        *left + *right
    }
    fn compose(outer: &i64, inner: &i64) -> i64 {
        outer + inner
    }
    fn apply(modification: &i64, value: &SumCount) -> SumCount {
        SumCount {
            sum: value.sum + modification * value.count,
            count: value.count,
        }
    }
}

/// Range sums with "set every position to `v`" modifications.
/// `None` is the modification which leaves everything as is.
#[derive(Debug, Clone, Copy)]
pub struct SumAssign;

impl LazyAlgebra for SumAssign {
    type Value = SumCount;
    type Modification = Option<i64>;

    fn neutral() -> SumCount {
        SumCount::default()
    }
    fn identity() -> Option<i64> {
        None
    }
    fn combine(left: &SumCount, right: &SumCount) -> SumCount {
        *left + *right
    }
    fn compose(outer: &Option<i64>, inner: &Option<i64>) -> Option<i64> {
        outer.or(*inner)
    }
    fn apply(modification: &Option<i64>, value: &SumCount) -> SumCount {
        match modification {
            Some(assigned) => SumCount {
                sum: assigned * value.count,
                count: value.count,
            },
            None => *value,
        }
    }
}

/// Range minima with "add `k` to every position" modifications.
/// `None` is the minimum of no positions at all. Shifts saturate at the bounds of `i64`.
#[derive(Debug, Clone, Copy)]
pub struct MinAdd;

impl LazyAlgebra for MinAdd {
    type Value = Option<i64>;
    type Modification = i64;

    fn neutral() -> Option<i64> {
        None
    }
    fn identity() -> i64 {
        0
    }
    fn combine(left: &Option<i64>, right: &Option<i64>) -> Option<i64> {
        match (left, right) {
            (Some(l), Some(r)) => Some(*l.min(r)),
            (Some(v), None) | (None, Some(v)) => Some(*v),
            (None, None) => None,
        }
    }
    fn compose(outer: &i64, inner: &i64) -> i64 {
        outer.saturating_add(*inner)
    }
    fn apply(modification: &i64, value: &Option<i64>) -> Option<i64> {
        value.map(|v| v.saturating_add(*modification))
    }
}

/// Range maxima with "add `k` to every position" modifications.
/// `None` is the maximum of no positions at all. Shifts saturate at the bounds of `i64`.
#[derive(Debug, Clone, Copy)]
pub struct MaxAdd;

impl LazyAlgebra for MaxAdd {
    type Value = Option<i64>;
    type Modification = i64;

    fn neutral() -> Option<i64> {
        None
    }
    fn identity() -> i64 {
        0
    }
    fn combine(left: &Option<i64>, right: &Option<i64>) -> Option<i64> {
        // None < Some(_), so max already skips missing values.
        *left.max(right)
    }
    fn compose(outer: &i64, inner: &i64) -> i64 {
        outer.saturating_add(*inner)
    }
    fn apply(modification: &i64, value: &Option<i64>) -> Option<i64> {
        value.map(|v| v.saturating_add(*modification))
    }
}

/// The prime all [AffineSum] arithmetic is done modulo.
pub const AFFINE_MODULUS: u64 = 998_244_353;

/// An affine map `x -> a * x + b` modulo [AFFINE_MODULUS].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affine {
    /// The factor `a`.
    pub factor: u64,
    /// The summand `b`.
    pub summand: u64,
}

impl Affine {
    /// Creates `x -> factor * x + summand`, reducing both modulo [AFFINE_MODULUS].
    pub fn new(factor: u64, summand: u64) -> Self {
        Self {
            factor: factor % AFFINE_MODULUS,
            summand: summand % AFFINE_MODULUS,
        }
    }
}

/// A sum modulo [AFFINE_MODULUS] together with the number of positions it covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModularSum {
    /// The sum of all values modulo [AFFINE_MODULUS].
    pub sum: u64,
    /// The number of values summed, modulo [AFFINE_MODULUS].
    pub count: u64,
}

impl ModularSum {
    /// The aggregate of a single position holding `value`.
    pub fn single(value: u64) -> Self {
        Self {
            sum: value % AFFINE_MODULUS,
            count: 1,
        }
    }
}

fn mul_mod(a: u64, b: u64) -> u64 {
    a * b % AFFINE_MODULUS
}

fn add_mod(a: u64, b: u64) -> u64 {
    (a + b) % AFFINE_MODULUS
}

/// Range sums with "replace every `x` by `a * x + b`" modifications, everything modulo [AFFINE_MODULUS].
/// Unlike the other algebras, modifications here do not commute.
#[derive(Debug, Clone, Copy)]
pub struct AffineSum;

impl LazyAlgebra for AffineSum {
    type Value = ModularSum;
    type Modification = Affine;

    fn neutral() -> ModularSum {
        ModularSum::default()
    }
    fn identity() -> Affine {
        Affine::new(1, 0)
    }
    fn combine(left: &ModularSum, right: &ModularSum) -> ModularSum {
        ModularSum {
            sum: add_mod(left.sum, right.sum),
            count: add_mod(left.count, right.count),
        }
    }
    fn compose(outer: &Affine, inner: &Affine) -> Affine {
        // outer(inner(x)) = oa * (ia * x + ib) + ob
        Affine {
            factor: mul_mod(outer.factor, inner.factor),
            summand: add_mod(mul_mod(outer.factor, inner.summand), outer.summand),
        }
    }
    fn apply(modification: &Affine, value: &ModularSum) -> ModularSum {
        ModularSum {
            sum: add_mod(
                mul_mod(modification.factor, value.sum),
                mul_mod(modification.summand, value.count),
            ),
            count: value.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_composes_to_the_outer_one() {
        assert_eq!(SumAssign::compose(&Some(3), &Some(7)), Some(3));
        assert_eq!(SumAssign::compose(&None, &Some(7)), Some(7));
        let value = SumAssign::apply(&Some(2), &SumCount { sum: 10, count: 4 });
        assert_eq!(value, SumCount { sum: 8, count: 4 });
    }

    #[test]
    fn extremum_neutrals_are_never_shifted() {
        assert_eq!(MinAdd::apply(&-5, &MinAdd::neutral()), MinAdd::neutral());
        assert_eq!(MaxAdd::apply(&5, &MaxAdd::neutral()), MaxAdd::neutral());
        assert_eq!(
            MinAdd::combine(&MinAdd::apply(&-5, &Some(3)), &MinAdd::neutral()),
            Some(-2)
        );
    }

    #[test]
    fn extreme_values_stay_values() {
        assert_eq!(
            MinAdd::combine(&Some(i64::MAX), &MinAdd::neutral()),
            Some(i64::MAX)
        );
        assert_eq!(
            MaxAdd::combine(&MaxAdd::neutral(), &Some(i64::MIN)),
            Some(i64::MIN)
        );
        assert_eq!(MaxAdd::apply(&1, &Some(i64::MAX)), Some(i64::MAX));
        assert_eq!(MinAdd::apply(&-1, &Some(i64::MIN)), Some(i64::MIN));
        assert_eq!(MinAdd::apply(&MinAdd::compose(&i64::MAX, &1), &Some(0)), Some(i64::MAX));
    }

    #[test]
    fn affine_composition_applies_inner_first() {
        let double = Affine::new(2, 0);
        let increment = Affine::new(1, 1);
        let value = ModularSum::single(5);
        // (5 + 1) * 2
        assert_eq!(
            AffineSum::apply(&AffineSum::compose(&double, &increment), &value).sum,
            12
        );
        // 5 * 2 + 1
        assert_eq!(
            AffineSum::apply(&AffineSum::compose(&increment, &double), &value).sum,
            11
        );
    }

    #[test]
    fn affine_stays_reduced() {
        let big = Affine::new(AFFINE_MODULUS - 1, AFFINE_MODULUS - 1);
        let value = AffineSum::apply(&big, &ModularSum::single(1));
        // -1 * 1 - 1 = -2
        assert_eq!(value.sum, AFFINE_MODULUS - 2);
    }
}
