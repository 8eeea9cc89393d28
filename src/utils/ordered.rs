use crate::math::Real;
use ordered_float::OrderedFloat;

/// Stable sort of `items` by an increasing real-valued key.
///
/// NaN keys are sorted last.
pub(crate) fn sort_by_key_real<T>(items: &mut [T], mut key: impl FnMut(&T) -> Real) {
    items.sort_by_cached_key(|item| OrderedFloat(key(item)));
}
