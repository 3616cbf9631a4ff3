//! Hourly price series sources.

/// Settlement point price loading from ERCOT market data files.
pub mod ercot;
/// Synthetic price scenario generators.
pub mod scenarios;
