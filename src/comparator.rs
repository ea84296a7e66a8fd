//! The comparator adapter (Section 4.5)
//!
//! A `Comparator` expresses a strict weak order over `T`. Equivalence is
//! derived from it rather than assumed from `PartialEq`/`Eq` on `T`: two
//! values are equivalent when neither is less than the other under the
//! comparator. Every membership check, ordering decision, and duplicate
//! detection in this crate goes through [`equivalent`] rather than `==`.

/// A strict weak ordering over `T`.
///
/// Implementations must be consistent: if `less(a, b)` and `less(b, c)` both
/// hold, `less(a, c)` must hold too, and `less(a, a)` must never hold.
pub trait Comparator<T: ?Sized>: Clone {
    /// Returns `true` if `a` strictly precedes `b` under this order.
    fn less(&self, a: &T, b: &T) -> bool;
}

/// The default comparator, deferring to `T`'s own [`Ord`] implementation.
///
/// This is the comparator `Tree::new()` uses; pass a custom [`Comparator`]
/// via `Tree::new_with` to order elements some other way without requiring
/// `T: Ord` at all.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DefaultComparator;

impl<T: Ord + ?Sized> Comparator<T> for DefaultComparator {
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Derives equivalence from two comparator calls, per Section 4.5:
/// `a ≡ b ⇔ ¬less(a,b) ∧ ¬less(b,a)`.
pub(crate) fn equivalent<T, C: Comparator<T>>(cmp: &C, a: &T, b: &T) -> bool {
    !cmp.less(a, b) && !cmp.less(b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_comparator_orders_integers() {
        let cmp = DefaultComparator;
        assert!(cmp.less(&1, &2));
        assert!(!cmp.less(&2, &1));
        assert!(!cmp.less(&2, &2));
    }

    #[test]
    fn equivalent_uses_both_directions() {
        let cmp = DefaultComparator;
        assert!(equivalent(&cmp, &3, &3));
        assert!(!equivalent(&cmp, &3, &4));
    }

    #[derive(Clone)]
    struct ByAbs;

    impl Comparator<i32> for ByAbs {
        fn less(&self, a: &i32, b: &i32) -> bool {
            a.abs() < b.abs()
        }
    }

    #[test]
    fn custom_comparator_treats_negatives_as_equivalent_to_positives() {
        let cmp = ByAbs;
        assert!(equivalent(&cmp, &-5, &5));
        assert!(cmp.less(&-1, &5));
    }
}
