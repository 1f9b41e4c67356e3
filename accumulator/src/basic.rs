use crate::error::{Error, Result};
use num_traits::PrimInt;
use pessimize::Pessimize;

/// Constant generator feeding every accumulation step
pub fn constant() -> i32 {
    2
}

pub fn add<T: PrimInt>(a: T, b: T) -> T {
    a + b
}

pub fn accumulate<T: PrimInt + Pessimize>(
    seed: T,
    iterations: u64,
    mut value: impl FnMut() -> T,
) -> T {
    let mut total = seed;
    for _ in 0..iterations {
        total = pessimize::hide(add(value(), total));
    }
    total
}

/// Like `accumulate`, but reports the first iteration whose addition would
/// overflow `T` instead of wrapping or panicking
pub fn try_accumulate<T: PrimInt + Pessimize>(
    seed: T,
    iterations: u64,
    mut value: impl FnMut() -> T,
) -> Result<T> {
    let mut total = seed;
    for iteration in 0..iterations {
        total = value()
            .checked_add(&total)
            .ok_or(Error::Overflow { iteration })?;
        total = pessimize::hide(total);
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::test_accumulators!(
        (basic_accumulate, |seed, iterations, value| super::accumulate(
            seed,
            iterations,
            || value
        )),
        (basic_try_accumulate, |seed, iterations, value| super::try_accumulate(
            seed,
            iterations,
            || value
        )
        .unwrap())
    );

    #[test]
    fn constant_is_always_two() {
        for _ in 0..1000 {
            assert_eq!(constant(), 2);
        }
    }

    proptest::proptest! {
        #[test]
        fn add_matches_operator(a in -(1i32 << 30)..(1i32 << 30), b in -(1i32 << 30)..(1i32 << 30)) {
            proptest::prop_assert_eq!(add(a, b), a + b);
            proptest::prop_assert_eq!(add(a, b), add(b, a));
        }

        #[test]
        fn add_is_associative(a in -(1i32 << 29)..(1i32 << 29), b in -(1i32 << 29)..(1i32 << 29), c in -(1i32 << 29)..(1i32 << 29)) {
            proptest::prop_assert_eq!(add(add(a, b), c), add(a, add(b, c)));
        }
    }

    #[test]
    fn zero_iterations_keep_seed() {
        assert_eq!(accumulate(3, 0, constant), 3);
        assert_eq!(try_accumulate(3, 0, constant), Ok(3));
    }

    #[test]
    fn value_is_requested_once_per_iteration() {
        let mut calls = 0;
        let total = accumulate(3, 100, || {
            calls += 1;
            constant()
        });
        assert_eq!(total, 203);
        assert_eq!(calls, 100);
    }

    #[test]
    fn overflow_is_reported_at_first_failing_iteration() {
        // 3 + 2 * 62 = 127 fits in an i8, the 63rd addition does not
        assert_eq!(try_accumulate(3i8, 62, || 2), Ok(127));
        assert_eq!(
            try_accumulate(3i8, 100, || 2),
            Err(Error::Overflow { iteration: 62 })
        );
    }

    #[test]
    fn overflow_error_message() {
        let err = try_accumulate(i32::MAX, 1, constant).unwrap_err();
        assert_eq!(err.to_string(), "running total overflowed at iteration 0");
    }
}
