use crate::basic::add;
use num_traits::PrimInt;
use pessimize::Pessimize;

pub fn ilp<const WIDTH: usize, T: PrimInt + Pessimize>(
    seed: T,
    iterations: u64,
    mut value: impl FnMut() -> T,
) -> T {
    assert_ne!(WIDTH, 0, "No progress possible in this configuration");

    let mut totals = [T::zero(); WIDTH];
    let mut step = |total: &mut T| *total = pessimize::hide(add(value(), *total));

    // Full rounds feed every total once
    for _ in 0..(iterations / WIDTH as u64) {
        totals.iter_mut().for_each(&mut step);
    }

    // Leftover iterations go to the first totals
    let leftover = (iterations % WIDTH as u64) as usize;
    totals[..leftover].iter_mut().for_each(&mut step);

    // Fold the upper half onto the lower half until one total remains
    let mut live = WIDTH;
    while live > 1 {
        let upper = (live + 1) / 2;
        for i in upper..live {
            totals[i - upper] = add(totals[i - upper], totals[i]);
        }
        live = upper;
    }
    add(seed, totals[0])
}
