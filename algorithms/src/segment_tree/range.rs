use std::ops::Range;

/// Helpers for the half open position ranges the range datastructures are queried with.
/// Ranges with `start > end` are treated as empty, never as errors.
pub trait RangeExt {
    /// This restricts self, to not extend beyond other.
    /// If `self.start <= self.end` held, it still holds afterwards,
    /// and the result is empty if self and other do not intersect.
    fn clamp_by(&mut self, other: &Self);

    /// Like [clamp_by](RangeExt::clamp_by), but returns the restricted range.
    fn clamped_by(mut self, other: &Self) -> Self
    where
        Self: Sized,
    {
        self.clamp_by(other);
        self
    }
}

impl RangeExt for Range<usize> {
    fn clamp_by(&mut self, other: &Self) {
        self.start = self.start.max(self.end.min(other.start));
        self.end = self.end.min(self.start.max(other.end));
    }
}

#[cfg(test)]
pub mod tests {
    use super::RangeExt;
    use std::ops::Range;

    use proptest::prelude::*;

    fn is_normal(range: &Range<usize>) -> bool {
        range.start <= range.end
    }

    fn intersects(l: &Range<usize>, r: &Range<usize>) -> bool {
        !l.is_empty() && !r.is_empty() && l.start < r.end && r.start < l.end
    }

    fn is_superset(outer: &Range<usize>, inner: &Range<usize>) -> bool {
        inner.is_empty() || (outer.start <= inner.start && inner.end <= outer.end)
    }

    prop_compose! {
        fn normal_range()(a in prop::num::usize::ANY,
                          b in prop::num::usize::ANY)
            -> Range<usize> {
            a.min(b)..a.max(b)
        }
    }

    prop_compose! {
        // this might be degenerate
        fn empty_range()(a in prop::num::usize::ANY,
                         b in prop::num::usize::ANY)
            -> Range<usize> {
            a.max(b)..a.min(b)
        }
    }

    prop_compose! {
        fn range()(a in prop::num::usize::ANY,
                   b in prop::num::usize::ANY)
            -> Range<usize> {
            a..b
        }
    }

    #[test]
    #[allow(clippy::reversed_empty_ranges)]
    fn clamp_by_positions_of_short_sequence() {
        let len: usize = 4;
        assert_eq!((1usize..3).clamped_by(&(0..len)), 1..3);
        assert_eq!((1usize..usize::MAX).clamped_by(&(0..len)), 1..4);
        assert!((5usize..9).clamped_by(&(0..len)).is_empty());
        assert!((3usize..1).clamped_by(&(0..len)).is_empty());
    }

    proptest! {
        #[test]
        fn clamp_by_lets_ranges_stay_normal(mut l in normal_range(), r in range()) {
            l.clamp_by(&r);
            prop_assert!(is_normal(&l));
        }

        #[test]
        fn clamp_by_with_degenerate_range_leaves_normal_empty_range(mut l in normal_range(), r in empty_range()) {
            l.clamp_by(&r);
            prop_assert!(is_normal(&l));
            prop_assert!(l.is_empty());
        }

        #[test]
        fn clamp_by_does_not_unneccesarily_make_range_empty(mut l in range(), r in range()) {
            let orig = l.clone();
            l.clamp_by(&r);
            prop_assume!(l.is_empty());

            prop_assert!(!intersects(&orig, &r));
        }

        #[test]
        fn clamp_by_leaves_subset(mut l in range(), r in range()) {
            let orig = l.clone();
            l.clamp_by(&r);
            prop_assert!(is_superset(&orig, &l));
        }

        #[test]
        fn clamp_by_covers_exactly_the_intersection(l in normal_range(), r in normal_range()) {
            let clamped = l.clone().clamped_by(&r);
            let expected = l.end.min(r.end).saturating_sub(l.start.max(r.start));
            prop_assert_eq!(clamped.end.saturating_sub(clamped.start), expected);
        }
    }
}
