use crate::basic::add;
use num_traits::PrimInt;

/// Split the iterations across the rayon thread pool
///
/// `sequential` must compute the total of its chunk of iterations starting
/// from zero. The seed is only added once, after partial totals are merged.
pub fn thread_rayon<T: PrimInt + Send>(
    seed: T,
    iterations: u64,
    sequential: impl Fn(u64) -> T + Sync,
) -> T {
    use rayon::prelude::*;
    let total = rayon::iter::split(iterations, |chunk| {
        let lower = chunk / 2;
        (chunk - lower, (lower > 0).then_some(lower))
    })
    .map(&sequential)
    .reduce(T::zero, add);
    add(seed, total)
}
