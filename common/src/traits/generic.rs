//! This module provides abstraction over the algebras which range datastructures aggregate over.

/// An algebra of values, which can be aggregated over ranges, and modifications, which
/// can be applied to whole ranges of values at once.
///
/// Implementors are usually zero sized marker types, as all operations are static.
/// All datastructures generic over this trait dispatch statically.
///
/// The following laws must hold. They are not checked at runtime, violating them will silently
/// produce wrong aggregates.
/// ```rs
/// fn laws<A: LazyAlgebra>(x: A::Value, y: A::Value, z: A::Value, f: A::Modification, g: A::Modification) {
///     A::combine(&A::neutral(), &x) == x;
///     A::combine(&x, &A::neutral()) == x;
///     A::combine(&x, &A::combine(&y, &z)) == A::combine(&A::combine(&x, &y), &z);
///
///     A::apply(&A::identity(), &x) == x;
///     A::compose(&f, &A::identity()) == f;
///     A::compose(&A::identity(), &f) == f;
///
///     A::apply(&f, &A::combine(&x, &y)) == A::combine(&A::apply(&f, &x), &A::apply(&f, &y));
///     A::apply(&A::compose(&f, &g), &x) == A::apply(&f, &A::apply(&g, &x));
/// }
/// ```
/// `combine` does not need to be commutative.
///
/// # Example
/// Maintaining the maximum of values, which get shifted by constant amounts.
/// ```
/// # use common::LazyAlgebra;
/// struct MaxShift;
///
/// impl LazyAlgebra for MaxShift {
///     type Value = Option<i64>;
///     type Modification = i64;
///
///     fn neutral() -> Self::Value {
///         None
///     }
///     fn identity() -> Self::Modification {
///         0
///     }
///     fn combine(left: &Self::Value, right: &Self::Value) -> Self::Value {
///         left.max(right).clone()
///     }
///     fn compose(outer: &Self::Modification, inner: &Self::Modification) -> Self::Modification {
///         outer + inner
///     }
///     fn apply(modification: &Self::Modification, value: &Self::Value) -> Self::Value {
///         value.map(|v| v + modification)
///     }
/// }
///
/// let shifted = MaxShift::apply(&3, &MaxShift::combine(&Some(1), &Some(5)));
/// assert_eq!(shifted, Some(8));
/// ```
pub trait LazyAlgebra {
    /// The type which gets aggregated over ranges.
    type Value: Clone;
    /// A deferred operation on a range of values.
    type Modification: Clone;

    /// The identity of [combine](LazyAlgebra::combine).
    fn neutral() -> Self::Value;

    /// The identity of [compose](LazyAlgebra::compose) and [apply](LazyAlgebra::apply).
    fn identity() -> Self::Modification;

    /// Aggregates two adjacent values, `left` being the one with the lower positions.
    fn combine(left: &Self::Value, right: &Self::Value) -> Self::Value;

    /// Gives the modification which first applies `inner` and then `outer`.
    fn compose(outer: &Self::Modification, inner: &Self::Modification) -> Self::Modification;

    /// Applies `modification` to an aggregated value.
    fn apply(modification: &Self::Modification, value: &Self::Value) -> Self::Value;
}
