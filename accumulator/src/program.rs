use crate::basic::{self, constant};
use crate::error::Result;
use crate::{ilp::ilp, thread::thread_rayon};
use num_traits::PrimInt;
use pessimize::Pessimize;

/// Way of evaluating an accumulation, all yielding the same total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// One running total
    #[default]
    Basic,

    /// [`ILP_WIDTH`] independent running totals, merged at the end
    Ilp,

    /// Iterations split across the rayon thread pool, each chunk using `Ilp`
    Rayon,
}
//
impl Strategy {
    pub const ALL: [Self; 3] = [Self::Basic, Self::Ilp, Self::Rayon];
}

/// Number of running totals used by the ILP-based strategies
pub const ILP_WIDTH: usize = 8;

/// Parameters of an accumulation run
///
/// The running total starts at `seed` and receives one value per iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accumulation<T> {
    pub seed: T,
    pub iterations: u64,
}
//
impl Accumulation<i32> {
    /// Parameters behind `compute_sum`
    pub const COMPUTE_SUM: Self = Self {
        seed: 3,
        iterations: 100,
    };

    /// Parameters behind `entry_point`
    pub const ENTRY_POINT: Self = Self {
        seed: 3,
        iterations: 10,
    };
}
//
impl Default for Accumulation<i32> {
    fn default() -> Self {
        Self::COMPUTE_SUM
    }
}
//
impl<T: PrimInt + Pessimize> Accumulation<T> {
    pub fn run(self, value: impl FnMut() -> T) -> T {
        basic::accumulate(self.seed, self.iterations, value)
    }

    pub fn try_run(self, value: impl FnMut() -> T) -> Result<T> {
        basic::try_accumulate(self.seed, self.iterations, value)
    }
}
//
impl<T: PrimInt + Pessimize + Send> Accumulation<T> {
    pub fn run_with(self, strategy: Strategy, value: impl Fn() -> T + Sync) -> T {
        match strategy {
            Strategy::Basic => self.run(value),
            Strategy::Ilp => ilp::<ILP_WIDTH, T>(self.seed, self.iterations, value),
            Strategy::Rayon => thread_rayon(self.seed, self.iterations, |chunk| {
                ilp::<ILP_WIDTH, T>(T::zero(), chunk, &value)
            }),
        }
    }
}

/// Sum of 100 constants on top of a seed of 3
pub fn compute_sum() -> i32 {
    compute_sum_with(Strategy::Basic)
}

pub fn compute_sum_with(strategy: Strategy) -> i32 {
    let sum = Accumulation::COMPUTE_SUM.run_with(strategy, constant);
    tracing::debug!(sum, ?strategy, "computed sum");
    sum
}

/// Accumulation performed by `entry_point`
pub fn entry_sum() -> i32 {
    entry_sum_with(Strategy::Basic)
}

pub fn entry_sum_with(strategy: Strategy) -> i32 {
    Accumulation::ENTRY_POINT.run_with(strategy, constant)
}

/// Program entry routine, whose result is discarded
pub fn entry_point() {
    let sum = entry_sum();
    tracing::debug!(sum, "entry point accumulation discarded");
}
