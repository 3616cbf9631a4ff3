//! File output: schedule CSV export and SVG charting.

/// SVG chart rendering for solved dispatch plans.
pub mod chart;
/// CSV export for dispatch schedules.
pub mod export;
