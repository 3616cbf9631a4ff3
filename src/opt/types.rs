//! Dispatch problem inputs and solved plan outputs.

/// Inputs to one load-shifting optimization run.
///
/// The price series length defines the planning horizon; every scalar is
/// broadcast across all hours. Construction performs no validation: an
/// inverted load band must reach the solver and surface as infeasibility.
///
/// # Examples
///
/// ```
/// use dr_opt::opt::DispatchProblem;
///
/// let problem = DispatchProblem::new(vec![5.0, 50.0, 5.0], 10.0, 6.0, 12.0, 20.0, 50.0);
/// assert_eq!(problem.horizon(), 3);
/// assert_eq!(problem.baseline_cost(), 600.0);
/// ```
#[derive(Debug, Clone)]
pub struct DispatchProblem {
    /// Hourly settlement prices ($/MWh); length defines the horizon H.
    pub prices: Vec<f64>,
    /// Uncontrolled facility demand (MW), the same every hour.
    pub baseline_mw: f64,
    /// Minimum allowable optimized load (MW).
    pub min_mw: f64,
    /// Maximum allowable optimized load (MW).
    pub max_mw: f64,
    /// Penalty per MWh of load deferred into the next hour ($/MWh).
    pub defer_cost_per_mwh: f64,
    /// Penalty per MWh of load permanently shed ($/MWh).
    pub shed_cost_per_mwh: f64,
}

impl DispatchProblem {
    /// Creates a new dispatch problem.
    pub fn new(
        prices: Vec<f64>,
        baseline_mw: f64,
        min_mw: f64,
        max_mw: f64,
        defer_cost_per_mwh: f64,
        shed_cost_per_mwh: f64,
    ) -> Self {
        Self {
            prices,
            baseline_mw,
            min_mw,
            max_mw,
            defer_cost_per_mwh,
            shed_cost_per_mwh,
        }
    }

    /// Number of hours in the planning horizon.
    pub fn horizon(&self) -> usize {
        self.prices.len()
    }

    /// Cost of serving the full baseline every hour, with no response actions.
    pub fn baseline_cost(&self) -> f64 {
        // An empty float sum is IEEE -0.0; adding 0.0 restores the plus sign.
        self.prices.iter().sum::<f64>() * self.baseline_mw + 0.0
    }
}

/// Optimal per-hour dispatch extracted from a successful solve.
///
/// All three arrays are aligned by hour index and have the same length as
/// the problem's price series. Values are read once from the solver and not
/// recomputed.
#[derive(Debug, Clone)]
pub struct DispatchPlan {
    /// Realized load after response actions (MW).
    pub optimized_mw: Vec<f64>,
    /// Load permanently removed, not served (MW).
    pub shed_mw: Vec<f64>,
    /// Load pushed from this hour into the next (MW).
    pub deferred_mw: Vec<f64>,
    /// Objective value: energy cost plus deferral and shedding penalties ($).
    pub total_cost: f64,
}

impl DispatchPlan {
    /// Number of hours covered by the plan.
    pub fn horizon(&self) -> usize {
        self.optimized_mw.len()
    }
}
