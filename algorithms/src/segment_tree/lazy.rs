use std::{
    fmt::{self, Debug},
    iter::FromIterator,
    mem,
    ops::Range,
};

use common::{AlgoError, AlgoResult, LazyAlgebra};
use derive_more::{From, Into};
use typed_index_collections::TiVec;

use super::RangeExt;

/// An Index into a LazySegmentTree.
/// The root has index 1, the children of `i` are `2i` and `2i + 1`. Index 0 is unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From, Into)]
struct LazyNodeIdx(usize);

impl LazyNodeIdx {
    const ROOT: Self = Self(1);

    fn is_root(self) -> bool {
        self == Self::ROOT
    }

    fn is_left_child(self) -> bool {
        self.0 % 2 == 0
    }

    fn is_right_child(self) -> bool {
        !self.is_root() && self.0 % 2 == 1
    }

    fn parent(self) -> Self {
        Self(self.0 / 2)
    }

    fn sibling(self) -> Self {
        Self(self.0 ^ 1)
    }

    fn left_child(self) -> Self {
        Self(2 * self.0)
    }

    fn right_child(self) -> Self {
        Self(2 * self.0 + 1)
    }

    /// The ancestor `levels` levels above this node, `levels = 0` being the node itself.
    fn ancestor(self, levels: u32) -> Self {
        Self(self.0 >> levels)
    }

    /// Number of nodes on the path from this node to the root, both included.
    fn path_len(self) -> u32 {
        bit_length(self.0)
    }
}

fn bit_length(x: usize) -> u32 {
    usize::BITS - x.leading_zeros()
}

/// Smallest power of two at least as big as `len`, but never less than 4.
fn leaf_count(len: usize) -> usize {
    len.next_power_of_two().max(4)
}

struct LazyNode<A: LazyAlgebra> {
    // Aggregate of the subtree *before* `modification` is applied.
    value: A::Value,
    // Still has to be pushed to both children.
    modification: A::Modification,
}

impl<A: LazyAlgebra> LazyNode<A> {
    fn neutral() -> Self {
        Self {
            value: A::neutral(),
            modification: A::identity(),
        }
    }

    fn modified_value(&self) -> A::Value {
        A::apply(&self.modification, &self.value)
    }
}

impl<A: LazyAlgebra> Clone for LazyNode<A> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            modification: self.modification.clone(),
        }
    }
}

impl<A: LazyAlgebra> Debug for LazyNode<A>
where
    A::Value: Debug,
    A::Modification: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyNode")
            .field("value", &self.value)
            .field("modification", &self.modification)
            .finish()
    }
}

/// A segment tree with lazy propagation over the algebra `A`.
/// It supports combining all values of a range and modifying all values of a range,
/// both in O(log n).
///
/// All nodes are allocated on construction and stored in one contiguous array, so the tree
/// can neither grow nor shrink afterwards.
///
/// Ranges are half open and get clamped to `0..self.len()`, so ranges exceeding the tree or
/// with `start > end` are treated as (partially) empty instead of causing a panic.
///
/// # Example
/// ```
/// # use algorithms::segment_tree::{algebras::{SumAdd, SumCount}, LazySegmentTree};
/// let mut tree: LazySegmentTree<SumAdd> = vec![2, 1, 3, 7].into_iter().map(SumCount::single).collect();
/// assert_eq!(tree.query(0..4).sum, 13);
///
/// tree.update(1..3, &10);
/// assert_eq!(tree.query(1..3).sum, 24);
/// assert_eq!(tree.query(0..usize::MAX).sum, 33);
/// ```
pub struct LazySegmentTree<A: LazyAlgebra> {
    len: usize,
    nleaves: usize,
    data: TiVec<LazyNodeIdx, LazyNode<A>>,
}

impl<A: LazyAlgebra> LazySegmentTree<A> {
    /// Creates a new LazySegmentTree of `len` positions, all holding `A::neutral()`.
    /// # Runtime
    /// O(len)
    pub fn with_len(len: usize) -> Self {
        let nleaves = leaf_count(len);
        log::debug!(
            "Allocating lazy segment tree with {} leaves for {} positions",
            nleaves,
            len
        );
        Self {
            len,
            nleaves,
            data: (0..2 * nleaves).map(|_| LazyNode::neutral()).collect(),
        }
    }

    /// Creates a new LazySegmentTree of `len` positions, all holding `value`.
    /// # Runtime
    /// O(len)
    pub fn with_value(len: usize, value: A::Value) -> Self {
        let mut tree = Self::with_len(len);
        for position in 0..len {
            let leaf = tree.leaf(position);
            tree.data[leaf].value = value.clone();
        }
        tree.rebuild();
        tree
    }

    /// Creates a new LazySegmentTree of `len` positions, where position `i` holds the `i`-th element
    /// of `values`.
    /// # Returns
    /// Returns [AlgoError::LengthMismatch] if `values` yields more or less than `len` elements.
    /// For too long sequences at most `len + 1` elements are consumed and reported as `actual`.
    /// # Runtime
    /// O(len)
    /// # Example
    /// ```
    /// # use algorithms::segment_tree::{algebras::MinAdd, LazySegmentTree};
    /// # use common::AlgoError;
    /// let tree = LazySegmentTree::<MinAdd>::from_iter_with_len(3, vec![Some(4), Some(2), Some(8)]).unwrap();
    /// assert_eq!(tree.query(0..3), Some(2));
    ///
    /// let too_short = LazySegmentTree::<MinAdd>::from_iter_with_len(3, vec![Some(4), Some(2)]);
    /// assert!(matches!(too_short, Err(AlgoError::LengthMismatch { expected: 3, actual: 2 })));
    /// ```
    pub fn from_iter_with_len(
        len: usize,
        values: impl IntoIterator<Item = A::Value>,
    ) -> AlgoResult<Self> {
        let mut tree = Self::with_len(len);
        let mut values = values.into_iter();

        for position in 0..len {
            let leaf = tree.leaf(position);
            match values.next() {
                Some(value) => tree.data[leaf].value = value,
                None => {
                    return Err(AlgoError::LengthMismatch {
                        expected: len,
                        actual: position,
                    })
                }
            }
        }

        // The rest is never drained, so unbounded iterators fail fast.
        if values.next().is_some() {
            return Err(AlgoError::LengthMismatch {
                expected: len,
                actual: len + 1,
            });
        }

        tree.rebuild();
        Ok(tree)
    }

    /// Creates a new LazySegmentTree holding `values`, using the length they report.
    /// # Returns
    /// Returns [AlgoError::LengthMismatch] if the iterator does not yield as many elements as it reports.
    pub fn from_exact_iter<I>(values: I) -> AlgoResult<Self>
    where
        I: IntoIterator<Item = A::Value>,
        I::IntoIter: ExactSizeIterator,
    {
        let values = values.into_iter();
        Self::from_iter_with_len(values.len(), values)
    }

    /// The number of positions in this tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this tree has no positions at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Gives the current value at `position` or `None` if it is out of bounds.
    /// # Runtime
    /// O(log len)
    pub fn get(&self, position: usize) -> Option<A::Value> {
        if position < self.len {
            Some(self.query(position..position + 1))
        } else {
            None
        }
    }

    /// Gives the current values of all positions.
    /// # Runtime
    /// O(len * log len)
    pub fn to_vec(&self) -> Vec<A::Value> {
        (0..self.len).map(|position| self.query(position..position + 1)).collect()
    }

    /// Combines the values of all positions. This is equivalent to `self.query(0..self.len())`.
    /// # Runtime
    /// O(1)
    pub fn query_all(&self) -> A::Value {
        // Padding leaves are neutral, so the root covers exactly the real positions.
        self.data[LazyNodeIdx::ROOT].modified_value()
    }

    /// Combines the current values of all positions in `range` from left to right.
    /// Returns `A::neutral()` if the range is empty after clamping.
    /// # Runtime
    /// O(log len)
    pub fn query(&self, range: Range<usize>) -> A::Value {
        let range = range.clamped_by(&(0..self.len));
        if range.is_empty() {
            return A::neutral();
        }

        let mut p = self.leaf(range.start);
        let mut q = self.leaf(range.end - 1);

        let mut left = self.data[p].modified_value();

        if p != q {
            let mut right = self.data[q].modified_value();
            while p.parent() != q.parent() {
                if p.is_left_child() {
                    left = A::combine(&left, &self.data[p.sibling()].modified_value());
                }
                if q.is_right_child() {
                    right = A::combine(&self.data[q.sibling()].modified_value(), &right);
                }
                p = p.parent();
                q = q.parent();
                left = A::apply(&self.data[p].modification, &left);
                right = A::apply(&self.data[q].modification, &right);
            }
            left = A::combine(&left, &right);
        }

        while !p.is_root() {
            p = p.parent();
            left = A::apply(&self.data[p].modification, &left);
        }

        left
    }

    /// Applies `modification` to the values of all positions in `range`.
    /// Does nothing if the range is empty after clamping.
    /// # Runtime
    /// O(log len)
    pub fn update(&mut self, range: Range<usize>, modification: &A::Modification) {
        let range = range.clamped_by(&(0..self.len));
        if range.is_empty() {
            log::trace!("Skipping update of empty range {:?}", range);
            return;
        }

        let mut p = self.leaf(range.start);
        let mut q = self.leaf(range.end - 1);

        // Every pending modification above the nodes we are about to modify has to be pushed first,
        // otherwise it would later be applied after the newer modification.
        if p == q {
            self.push_down_path_to(p.parent());
        } else {
            // Number of levels from the leaves up to their lowest common ancestor.
            let levels = bit_length(p.0 ^ q.0);
            self.push_down_path_to(p.ancestor(levels));
            for level in (1..levels).rev() {
                self.push_down(p.ancestor(level));
                self.push_down(q.ancestor(level));
            }
        }

        self.compose_onto(p, modification);

        if p != q {
            self.compose_onto(q, modification);
            while p.parent() != q.parent() {
                if p.is_left_child() {
                    self.compose_onto(p.sibling(), modification);
                }
                if q.is_right_child() {
                    self.compose_onto(q.sibling(), modification);
                }
                p = p.parent();
                q = q.parent();
                self.recalculate(p);
                self.recalculate(q);
            }
        }

        // This also repairs the values of the ancestors which got pushed down above.
        while !p.is_root() {
            p = p.parent();
            self.recalculate(p);
        }
    }

    fn leaf(&self, position: usize) -> LazyNodeIdx {
        LazyNodeIdx(self.nleaves + position)
    }

    // Recalculates all inner nodes from the leaves, assuming no modification is pending.
    fn rebuild(&mut self) {
        for node in (1..self.nleaves).rev().map(LazyNodeIdx) {
            self.data[node].value = A::combine(
                &self.data[node.left_child()].value,
                &self.data[node.right_child()].value,
            );
        }
    }

    fn recalculate(&mut self, node: LazyNodeIdx) {
        self.data[node].value = A::combine(
            &self.data[node.left_child()].modified_value(),
            &self.data[node.right_child()].modified_value(),
        );
    }

    fn compose_onto(&mut self, node: LazyNodeIdx, modification: &A::Modification) {
        let target = &mut self.data[node];
        target.modification = A::compose(modification, &target.modification);
    }

    // Moves the pending modification of `node` to its children.
    // The value of `node` is left stale, it has to be recalculated before it is read again.
    fn push_down(&mut self, node: LazyNodeIdx) {
        let pending = mem::replace(&mut self.data[node].modification, A::identity());
        self.compose_onto(node.left_child(), &pending);
        self.compose_onto(node.right_child(), &pending);
    }

    // Pushes down every node from the root to `last`, both included, top to bottom.
    fn push_down_path_to(&mut self, last: LazyNodeIdx) {
        for level in (0..last.path_len()).rev() {
            self.push_down(last.ancestor(level));
        }
    }
}

impl<A: LazyAlgebra> FromIterator<A::Value> for LazySegmentTree<A> {
    fn from_iter<I: IntoIterator<Item = A::Value>>(iter: I) -> Self {
        let values: Vec<A::Value> = iter.into_iter().collect();
        let mut tree = Self::with_len(values.len());
        for (position, value) in values.into_iter().enumerate() {
            let leaf = tree.leaf(position);
            tree.data[leaf].value = value;
        }
        tree.rebuild();
        tree
    }
}

impl<A: LazyAlgebra> Clone for LazySegmentTree<A> {
    fn clone(&self) -> Self {
        Self {
            len: self.len,
            nleaves: self.nleaves,
            data: self.data.clone(),
        }
    }
}

impl<A: LazyAlgebra> Debug for LazySegmentTree<A>
where
    A::Value: Debug,
    A::Modification: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySegmentTree")
            .field("len", &self.len)
            .field("nleaves", &self.nleaves)
            .field("data", &self.data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment_tree::algebras::{SumAdd, SumCount};

    fn sum_tree(values: &[i64]) -> LazySegmentTree<SumAdd> {
        values.iter().copied().map(SumCount::single).collect()
    }

    #[test]
    fn leaf_count_has_floor_of_four() {
        assert_eq!(leaf_count(0), 4);
        assert_eq!(leaf_count(1), 4);
        assert_eq!(leaf_count(4), 4);
        assert_eq!(leaf_count(5), 8);
        assert_eq!(leaf_count(1024), 1024);
        assert_eq!(leaf_count(1025), 2048);
    }

    #[test]
    fn lowest_common_ancestor_from_differing_bits() {
        // leaves 9 and 10 of an 8 leaf tree meet at node 2
        let (p, q) = (LazyNodeIdx(9), LazyNodeIdx(10));
        let levels = bit_length(p.0 ^ q.0);
        assert_eq!(p.ancestor(levels), LazyNodeIdx(2));
        assert_eq!(q.ancestor(levels), LazyNodeIdx(2));
        assert_eq!(LazyNodeIdx(9).path_len(), 4);
        assert_eq!(LazyNodeIdx::ROOT.path_len(), 1);
    }

    #[test]
    fn allocates_twice_the_leaves() {
        let tree = LazySegmentTree::<SumAdd>::with_len(5);
        assert_eq!(tree.data.len(), 16);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn sum_add_scenario() {
        let mut tree = sum_tree(&[2, 1, 3, 7]);
        assert_eq!(tree.query(0..4).sum, 13);

        tree.update(1..3, &10);
        assert_eq!(
            tree.to_vec().iter().map(|v| v.sum).collect::<Vec<_>>(),
            vec![2, 11, 13, 7]
        );
        assert_eq!(tree.query(1..3).sum, 24);
        assert_eq!(tree.query(0..4).sum, 33);
        assert_eq!(tree.query_all().sum, 33);
    }

    #[test]
    fn single_leaf_update_keeps_ancestors_consistent() {
        let mut tree = sum_tree(&[1, 2, 3, 4, 5, 6, 7, 8]);
        tree.update(0..8, &1);
        tree.update(5..6, &100);
        assert_eq!(tree.query(0..8).sum, 36 + 8 + 100);
        assert_eq!(tree.query(4..6).sum, 6 + 7 + 100);
        tree.update(2..7, &-1);
        assert_eq!(tree.query(0..8).sum, 36 + 8 + 100 - 5);
        assert_eq!(tree.get(5).map(|v| v.sum), Some(106));
    }

    #[test]
    fn pending_modifications_are_not_lost_below_new_ones() {
        let mut tree = sum_tree(&[0; 6]);
        tree.update(0..6, &5);
        tree.update(2..4, &1);
        tree.update(0..3, &2);
        assert_eq!(
            tree.to_vec().iter().map(|v| v.sum).collect::<Vec<_>>(),
            vec![7, 7, 8, 6, 5, 5]
        );
    }

    #[test]
    #[allow(clippy::reversed_empty_ranges)]
    fn empty_and_out_of_order_ranges() {
        let mut tree = sum_tree(&[1, 2, 3, 4, 5, 6]);
        let before = tree.to_vec();
        tree.update(5..5, &3);
        tree.update(4..2, &3);
        tree.update(6..100, &3);
        assert_eq!(tree.to_vec(), before);
        assert_eq!(tree.query(5..5), SumCount::default());
        assert_eq!(tree.query(4..2), SumCount::default());
        assert_eq!(tree.query(7..9), SumCount::default());
    }

    #[test]
    fn ranges_get_clamped() {
        let mut tree = sum_tree(&[1, 2, 3]);
        tree.update(1..usize::MAX, &10);
        assert_eq!(tree.query(0..usize::MAX), tree.query(0..3));
        assert_eq!(tree.query(0..3).sum, 26);
        assert_eq!(tree.query(0..3).count, 3);
        assert_eq!(tree.get(3), None);
    }

    #[test]
    fn with_value_fills_only_real_positions() {
        let tree = LazySegmentTree::<SumAdd>::with_value(5, SumCount::single(3));
        assert_eq!(tree.query_all(), SumCount { sum: 15, count: 5 });
    }

    #[test]
    fn empty_tree_answers_neutral() {
        let mut tree = LazySegmentTree::<SumAdd>::with_len(0);
        assert!(tree.is_empty());
        tree.update(0..10, &1);
        assert_eq!(tree.query(0..10), SumCount::default());
        assert_eq!(tree.query_all(), SumCount::default());
    }

    #[test]
    fn sequence_length_must_match() {
        let too_long = LazySegmentTree::<SumAdd>::from_iter_with_len(
            2,
            vec![SumCount::single(1); 5],
        );
        assert!(matches!(
            too_long,
            Err(AlgoError::LengthMismatch {
                expected: 2,
                actual: 3
            })
        ));

        let unbounded = LazySegmentTree::<SumAdd>::from_iter_with_len(
            3,
            std::iter::from_fn(|| Some(SumCount::single(1))),
        );
        assert!(matches!(
            unbounded,
            Err(AlgoError::LengthMismatch {
                expected: 3,
                actual: 4
            })
        ));
        let repeated =
            LazySegmentTree::<SumAdd>::from_iter_with_len(0, std::iter::repeat(SumCount::single(1)));
        assert!(repeated.is_err());

        let exact = LazySegmentTree::<SumAdd>::from_exact_iter(vec![SumCount::single(4); 7]).unwrap();
        assert_eq!(exact.query_all().sum, 28);
    }
}
