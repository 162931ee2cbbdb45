//! Shared criterion settings and seeding for the workspace benchmarks.

use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::SeedableRng;
use rand::rngs::StdRng;

const RNG_SEED: u64 = 0x5EED_2026;

/// Sample count and timings applied to a benchmark group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuntimeProfile {
    pub sample_size: usize,
    pub warm_up: Duration,
    pub measurement: Duration,
}

impl RuntimeProfile {
    pub const SMALL: Self = Self::new(15, 100, 200);
    pub const MEDIUM: Self = Self::new(15, 500, 1_000);
    pub const LARGE: Self = Self::new(10, 800, 1_500);

    const fn new(sample_size: usize, warm_up_ms: u64, measurement_ms: u64) -> Self {
        Self {
            sample_size,
            warm_up: Duration::from_millis(warm_up_ms),
            measurement: Duration::from_millis(measurement_ms),
        }
    }

    /// Profile for a benchmark doing roughly `work` elementary steps.
    pub fn for_work(work: usize) -> Self {
        match work {
            0..=0x10_0000 => Self::SMALL,
            0x10_0001..=0x100_0000 => Self::MEDIUM,
            _ => Self::LARGE,
        }
    }

    pub fn apply<M: Measurement>(self, group: &mut BenchmarkGroup<'_, M>) {
        group.sample_size(self.sample_size);
        group.warm_up_time(self.warm_up);
        group.measurement_time(self.measurement);
    }
}

pub fn apply_runtime_config_for_work<M: Measurement>(work: usize, group: &mut BenchmarkGroup<'_, M>) {
    RuntimeProfile::for_work(work).apply(group);
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

/// Seed derived from the shared base seed, for per-case generators.
pub fn case_seed(case: u64, size: usize) -> u64 {
    RNG_SEED ^ (size as u64).rotate_left(7) ^ case.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
