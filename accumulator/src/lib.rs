pub mod basic;
pub mod bytecode;
pub mod error;
pub mod ilp;
pub mod program;
pub mod thread;

pub use basic::{accumulate, add, constant, try_accumulate};
pub use error::{Error, Result};
pub use ilp::ilp;
pub use program::{
    compute_sum, compute_sum_with, entry_point, entry_sum, entry_sum_with, Accumulation, Strategy,
};
pub use thread::thread_rayon;

/// Tools used to test the various implementations
#[cfg(test)]
pub(crate) mod test_utils {
    use proptest::prelude::*;

    /// Test an accumulator implementation against the closed form
    /// `seed + iterations * value`
    pub fn test_accumulator_impl(
        seed: i64,
        value: i64,
        iterations: u64,
        accumulator: impl FnOnce(i64, u64, i64) -> i64,
    ) -> Result<(), TestCaseError> {
        let expected = seed + iterations as i64 * value;
        prop_assert_eq!(accumulator(seed, iterations, value), expected);
        Ok(())
    }

    /// Shorthand to generate a proptest based on `test_accumulator_impl`
    ///
    /// The first parameter is the test name, the second one is a closure that
    /// takes `(seed, iterations, value)` and runs the implementation with a
    /// value generator that always yields `value`.
    #[doc(hidden)]
    #[macro_export]
    macro_rules! test_accumulator {
        (($name:ident, $imp:expr)) => {
            proptest::proptest! {
                #[test]
                fn $name(
                    seed in -(1i64 << 20)..(1i64 << 20),
                    value in -1000i64..1000,
                    iterations in 0u64..(1 << 12),
                ) {
                    $crate::test_utils::test_accumulator_impl(seed, value, iterations, $imp)?;
                }
            }
        };
    }

    /// Shorthand to generate multiple tests using `test_accumulator!`.
    #[doc(hidden)]
    #[macro_export]
    macro_rules! test_accumulators {
        ($($name:tt),+) => {
            $(
                $crate::test_accumulator!($name);
            )+
        };
    }
}
