//! LP formulation and solve for the hourly load-shifting schedule.

mod lp;
/// Problem and plan types shared across the crate.
pub mod types;

pub use lp::{SolveError, solve};
pub use types::{DispatchPlan, DispatchProblem};
