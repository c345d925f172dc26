use rand::Rng;
use rand::seq::index;

/// Draws `count` distinct indices from `0..len`, or all of them if `len` is
/// smaller than `count`.
///
/// Sampled indices come back in random order; the full range is returned in
/// order.
pub fn sample_distinct_indices(len: usize, count: usize, rng: &mut impl Rng) -> Vec<usize> {
    if len >= count {
        index::sample(rng, len, count).into_vec()
    } else {
        (0..len).collect()
    }
}
