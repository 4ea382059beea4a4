use proptest::prelude::*;

use crate::interval::Interval;

pub(crate) const RANGE_MAX: usize = 20;

/// Generate arbitrary, valid `(low, high)` intervals with bounds from
/// [0..[`RANGE_MAX`]).
///
/// The small value domain encourages intervals to share endpoints.
pub(crate) fn arbitrary_interval() -> impl Strategy<Value = (usize, usize)> {
    (0..RANGE_MAX, 0..RANGE_MAX).prop_map(|(a, b)| (a.min(b), a.max(b)))
}

/// Return the (ascending) store offsets of all intervals in `values`
/// containing `x`, by linear scan.
pub(crate) fn stab_scan<I>(values: &[I], x: &I::Bound) -> Vec<usize>
where
    I: Interval,
{
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.contains_point(x))
        .map(|(i, _)| i)
        .collect()
}
