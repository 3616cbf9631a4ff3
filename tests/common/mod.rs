//! Shared test fixtures for integration tests.

use dr_opt::opt::DispatchProblem;

/// Hourly Houston prices matching the bundled March 2025 data file.
pub const HOUSTON_DAY: [f64; 24] = [
    21.50, 19.75, 18.90, 18.40, 19.20, 22.60, 28.90, 34.80, 31.20, 29.60, 30.10, 32.40, 35.70,
    38.20, 42.60, 48.30, 61.80, 75.40, 88.20, 84.60, 55.10, 32.70, 26.40, 23.10,
];

/// Default dispatch problem (Houston day, 10 MW baseline, 6-12 MW band,
/// $20/MWh deferral, $50/MWh shedding).
pub fn default_problem() -> DispatchProblem {
    DispatchProblem::new(HOUSTON_DAY.to_vec(), 10.0, 6.0, 12.0, 20.0, 50.0)
}
