//! This module contains a straightforward range datastructure, which is used as reference in tests.

use common::LazyAlgebra;
use std::ops::Range;

/// Stores every value explicitly, so queries and updates take linear time.
/// Behaves like a lazy range datastructure including the clamping of ranges.
#[derive(Debug, Clone)]
pub struct NaiveSequence<A: LazyAlgebra> {
    values: Vec<A::Value>,
}

impl<A: LazyAlgebra> NaiveSequence<A> {
    /// Create a sequence holding exactly `values`.
    pub fn new(values: Vec<A::Value>) -> Self {
        Self { values }
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let end = range.end.min(self.values.len());
        let start = range.start.min(end);
        start..end
    }

    /// Combine all values in `range` from left to right.
    pub fn query(&self, range: Range<usize>) -> A::Value {
        self.values[self.clamp(range)]
            .iter()
            .fold(A::neutral(), |acc, value| A::combine(&acc, value))
    }

    /// Apply `modification` to every value in `range`.
    pub fn update(&mut self, range: Range<usize>, modification: &A::Modification) {
        let range = self.clamp(range);
        for value in &mut self.values[range] {
            *value = A::apply(modification, value);
        }
    }

    /// The current values.
    pub fn values(&self) -> &[A::Value] {
        &self.values
    }
}
