//! This module contains everything related to the lazy Segment Tree datastructure.
//!
//! A [LazySegmentTree] is generic over a [LazyAlgebra](common::LazyAlgebra), which describes
//! what gets aggregated and how ranges get modified. Common algebras live in [algebras].
//!
//! # Example
//! Let's keep track of the lowest water level along a river, where whole sections might get
//! flooded or drained.
//! ```
//! # use algorithms::segment_tree::{algebras::MinAdd, LazySegmentTree};
//! let mut levels: LazySegmentTree<MinAdd> = vec![5, 3, 8, 6, 2, 7].into_iter().map(Some).collect();
//! assert_eq!(levels.query(0..3), Some(3));
//!
//! // flood the first four sections
//! levels.update(0..4, &4);
//! assert_eq!(levels.query(0..3), Some(7));
//! assert_eq!(levels.query(2..6), Some(2));
//!
//! // drain everything
//! levels.update(0..levels.len(), &-1);
//! assert_eq!(levels.query_all(), Some(1));
//! assert_eq!(levels.query(4..4), None);
//! ```

mod lazy;
pub use lazy::LazySegmentTree;

pub mod algebras;

mod range;
pub use range::RangeExt;
