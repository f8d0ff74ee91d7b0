//! This module contains an algebra whose `combine` is not commutative.

use common::LazyAlgebra;

/// Values are sequences which get concatenated, so the order of combining matters.
/// Modifications shift every element of a sequence.
#[derive(Debug, Clone, Copy)]
pub struct Concat;

/// Adds the contained amount to every element of a sequence.
pub type ShiftAll = u64;

impl LazyAlgebra for Concat {
    type Value = Vec<u64>;
    type Modification = ShiftAll;

    fn neutral() -> Vec<u64> {
        Vec::new()
    }
    fn identity() -> ShiftAll {
        0
    }
    fn combine(left: &Vec<u64>, right: &Vec<u64>) -> Vec<u64> {
        left.iter().chain(right.iter()).copied().collect()
    }
    fn compose(outer: &ShiftAll, inner: &ShiftAll) -> ShiftAll {
        outer.wrapping_add(*inner)
    }
    fn apply(modification: &ShiftAll, value: &Vec<u64>) -> Vec<u64> {
        value.iter().map(|v| v.wrapping_add(*modification)).collect()
    }
}
