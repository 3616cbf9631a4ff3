//! Hourly demand-response dispatch planner for price-responsive loads.

pub mod config;
pub mod io;
/// LP formulation and solve for the load-shifting schedule.
pub mod opt;
pub mod prices;
pub mod report;
pub mod telemetry;
#[cfg(feature = "tui")]
pub mod tui;
