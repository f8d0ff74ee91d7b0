#![cfg_attr(feature = "strict", deny(warnings))]
#![cfg_attr(feature = "strict", deny(clippy::all))]
#![cfg_attr(feature = "strict", deny(missing_docs))]
//! This crate contains stuff that's really helpful for tests.
use proptest::prelude::*;
use std::{fmt::Debug, ops::Range};

mod naive;
pub use naive::NaiveSequence;

mod concat;
pub use concat::{Concat, ShiftAll};

/// A single operation on a range datastructure.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation<M> {
    /// Combine all values in the range.
    Query(Range<usize>),
    /// Apply the modification to all values in the range.
    Update(Range<usize>, M),
}

/// Gives a strategy generating ranges for a sequence of length `len`.
/// Roughly a third of the generated ranges exceeds the sequence or has `start > end`.
pub fn range_for(len: usize) -> impl Strategy<Value = Range<usize>> {
    let bound = len + len / 2 + 2;
    (0..bound, 0..bound).prop_map(|(start, end)| start..end)
}

/// Gives a strategy generating queries and updates for a sequence of length `len`.
pub fn operation<M, S>(len: usize, modification: S) -> impl Strategy<Value = Operation<M>>
where
    M: Debug + Clone + 'static,
    S: Strategy<Value = M> + 'static,
{
    prop_oneof![
        range_for(len).prop_map(Operation::Query).boxed(),
        (range_for(len), modification)
            .prop_map(|(range, modification)| Operation::Update(range, modification))
            .boxed(),
    ]
}

/// Gives a strategy generating an initial sequence of at most `max_len` values
/// together with up to `max_operations` operations on it.
pub fn sequence_with_operations<V, M, SV, SM>(
    value: SV,
    modification: SM,
    max_len: usize,
    max_operations: usize,
) -> impl Strategy<Value = (Vec<V>, Vec<Operation<M>>)>
where
    V: Debug + Clone + 'static,
    M: Debug + Clone + 'static,
    SV: Strategy<Value = V> + 'static,
    SM: Strategy<Value = M> + Clone + 'static,
{
    prop::collection::vec(value, 0..=max_len).prop_flat_map(move |values| {
        let operations =
            prop::collection::vec(operation(values.len(), modification.clone()), 0..max_operations);
        (Just(values), operations)
    })
}
