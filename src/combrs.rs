//! Combinatorial helpers for layouts: counting them, and sampling them uniformly
use num::{Integer, PrimInt};
use rand::Rng;

/// Binomial coefficient C(n, k), or `None` if it does not fit in `T`
pub fn binom<T: PrimInt + Integer>(n: T, k: T) -> Option<T> {
    // out-of-bounds cases are considered to be 0
    if k < T::zero() || k > n {
        return Some(T::zero());
    }

    // use the smaller of k and n-k, the product is the same but shorter
    let k = k.min(n - k);

    // multiply and divide in turns, every partial product is itself a binomial coefficient so the division is exact
    let mut res = T::one();
    let mut i = T::zero();
    while i < k {
        res = res.checked_mul(&(n - i))? / (i + T::one());
        i = i + T::one();
    }
    Some(res)
}

/// Number of distinct layouts with `num_marked` crossed-off cells on a card of `num_cells` cells
///
/// Large cards have more layouts than a `u128` can count, which gives `None`.
pub fn layout_count(num_cells: usize, num_marked: usize) -> Option<u128> {
    binom(num_cells as u128, num_marked as u128)
}

/// Uniformly sample `num` distinct indices out of `0..len` (without replacement), sorted increasingly
pub fn sample_sorted<R: Rng>(len: usize, num: usize, rng: &mut R) -> Vec<usize> {
    assert!(num <= len, "cannot sample {} of {} indices", num, len);
    let mut res = rand::seq::index::sample(rng, len, num).into_vec();
    res.sort_unstable();
    res
}
