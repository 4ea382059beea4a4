use std::ops::RangeInclusive;

/// A closed interval `[low, high]` that can be stored in an
/// [`IntervalTree`](crate::IntervalTree).
///
/// Implementations must uphold `low() <= high()` - pushing an interval that
/// violates this into a tree panics.
///
/// Both bounds are inclusive: an interval contains a point `x` when
/// `low() <= x <= high()`.
///
/// Bounds must be totally ordered. Floating point bounds can be stored by
/// wrapping them in a totally ordered type such as
/// [`OrderedFloat`](https://docs.rs/ordered-float):
///
/// ```
/// use itree::{Interval, IntervalTree};
/// use ordered_float::OrderedFloat;
///
/// struct Observation {
///     id: u16,
///     low: OrderedFloat<f32>,
///     high: OrderedFloat<f32>,
/// }
///
/// impl Interval for Observation {
///     type Bound = OrderedFloat<f32>;
///
///     fn low(&self) -> &Self::Bound {
///         &self.low
///     }
///
///     fn high(&self) -> &Self::Bound {
///         &self.high
///     }
/// }
///
/// let mut t = IntervalTree::new();
/// t.push(Observation { id: 1, low: OrderedFloat(0.5), high: OrderedFloat(2.0) })?;
/// t.push(Observation { id: 2, low: OrderedFloat(1.5), high: OrderedFloat(3.0) })?;
/// t.construct()?;
///
/// let ids = t.query(OrderedFloat(1.0))?.map(|v| v.id).collect::<Vec<_>>();
/// assert_eq!(ids, [1]);
/// # Ok::<(), itree::Error>(())
/// ```
pub trait Interval {
    /// The totally ordered type of the interval endpoints.
    type Bound: Ord;

    /// The inclusive lower bound of this interval.
    fn low(&self) -> &Self::Bound;

    /// The inclusive upper bound of this interval.
    fn high(&self) -> &Self::Bound;

    /// Returns true if `x` falls within this interval (inclusive of both
    /// endpoints).
    fn contains_point(&self, x: &Self::Bound) -> bool {
        self.low() <= x && x <= self.high()
    }
}

impl<T> Interval for RangeInclusive<T>
where
    T: Ord,
{
    type Bound = T;

    fn low(&self) -> &T {
        self.start()
    }

    fn high(&self) -> &T {
        self.end()
    }
}

/// A `(low, high)` tuple.
impl<T> Interval for (T, T)
where
    T: Ord,
{
    type Bound = T;

    fn low(&self) -> &T {
        &self.0
    }

    fn high(&self) -> &T {
        &self.1
    }
}

impl<I> Interval for &I
where
    I: Interval + ?Sized,
{
    type Bound = I::Bound;

    fn low(&self) -> &Self::Bound {
        (**self).low()
    }

    fn high(&self) -> &Self::Bound {
        (**self).high()
    }
}

/// Which end of an [`Interval`] an [`Endpoint`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum End {
    Low,
    High,
}

/// A reference to one bound of a stored interval, by index.
///
/// Resolving an [`Endpoint`] against the interval store yields the bound
/// value without ever cloning it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Endpoint {
    interval: usize,
    end: End,
}

impl Endpoint {
    pub(crate) fn new(interval: usize, end: End) -> Self {
        Self { interval, end }
    }

    /// Resolve this endpoint to the bound value it names in `store`.
    ///
    /// # Panics
    ///
    /// Panics if the referenced interval is not in `store`.
    pub(crate) fn resolve<'a, I>(&self, store: &'a [I]) -> &'a I::Bound
    where
        I: Interval,
    {
        let v = &store[self.interval];
        match self.end {
            End::Low => v.low(),
            End::High => v.high(),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::test_utils::arbitrary_interval;

    #[test]
    fn test_closed_bounds() {
        let r = 2..=5;

        assert!(!r.contains_point(&1));
        for x in 2..=5 {
            assert!(r.contains_point(&x));
        }
        assert!(!r.contains_point(&6));
    }

    #[test]
    fn test_tuple_and_ref_impls() {
        let t = (3, 6);
        assert_eq!(*t.low(), 3);
        assert_eq!(*t.high(), 6);

        let r = &t;
        assert_eq!(*Interval::low(&r), 3);
        assert_eq!(*Interval::high(&r), 6);
        assert!(r.contains_point(&3));
        assert!(r.contains_point(&6));
    }

    #[test]
    fn test_endpoint_resolve() {
        let store = vec![(1, 3), (3, 6)];

        assert_eq!(*Endpoint::new(0, End::Low).resolve(&store), 1);
        assert_eq!(*Endpoint::new(0, End::High).resolve(&store), 3);
        assert_eq!(*Endpoint::new(1, End::Low).resolve(&store), 3);
        assert_eq!(*Endpoint::new(1, End::High).resolve(&store), 6);
    }

    proptest! {
        /// The tuple and RangeInclusive representations agree on point
        /// containment.
        #[test]
        fn prop_contains_point_matches_range(
            v in arbitrary_interval(),
            x in 0..30_usize,
        ) {
            let range = v.0..=v.1;
            assert_eq!(v.contains_point(&x), range.contains(&x));
            assert_eq!(range.contains_point(&x), range.contains(&x));
        }
    }
}
