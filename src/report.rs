//! Post-hoc cost reporting for a solved dispatch plan.

use std::fmt;

use crate::opt::{DispatchPlan, DispatchProblem};

/// One hour of the dispatch schedule, joined across inputs and outputs.
///
/// Rows pair the market price and baseline from the problem with the solved
/// quantities from the plan, so downstream consumers never have to zip the
/// two structures themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct HourRow {
    /// Hour index within the horizon, starting at 0.
    pub hour: usize,
    /// Settlement price for this hour ($/MWh).
    pub price_per_mwh: f64,
    /// Uncontrolled baseline demand (MW).
    pub baseline_mw: f64,
    /// Load actually served (MW).
    pub optimized_mw: f64,
    /// Load shed (MW).
    pub shed_mw: f64,
    /// Load deferred into the next hour (MW).
    pub deferred_mw: f64,
}

impl fmt::Display for HourRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "h={:>3} | price={:>8.2} $/MWh | base={:>6.2} MW  opt={:>6.2} MW  \
             shed={:>5.2} MW  defer={:>5.2} MW",
            self.hour,
            self.price_per_mwh,
            self.baseline_mw,
            self.optimized_mw,
            self.shed_mw,
            self.deferred_mw,
        )
    }
}

/// Builds the joined per-hour schedule rows.
pub fn hour_rows(problem: &DispatchProblem, plan: &DispatchPlan) -> Vec<HourRow> {
    (0..plan.horizon())
        .map(|t| HourRow {
            hour: t,
            price_per_mwh: problem.prices[t],
            baseline_mw: problem.baseline_mw,
            optimized_mw: plan.optimized_mw[t],
            shed_mw: plan.shed_mw[t],
            deferred_mw: plan.deferred_mw[t],
        })
        .collect()
}

/// Aggregate cost metrics derived from a complete solved plan.
///
/// Computed post-hoc from the problem and plan pair to keep the reported
/// numbers consistent with the schedule rows.
#[derive(Debug, Clone)]
pub struct CostSummary {
    /// Hours in the planning horizon.
    pub horizon_hours: usize,
    /// Cost of serving the baseline with no response actions ($).
    pub baseline_cost: f64,
    /// Objective value of the optimal plan, penalties included ($).
    pub optimized_cost: f64,
    /// Market cost of the served load alone, `Σ price·optimized` ($).
    pub energy_cost: f64,
    /// Deferral penalties accrued over the horizon ($).
    pub defer_penalty_cost: f64,
    /// Shedding penalties accrued over the horizon ($).
    pub shed_penalty_cost: f64,
    /// Baseline cost minus optimized cost ($).
    pub savings: f64,
    /// Savings as a percentage of the baseline cost.
    pub savings_pct: f64,
    /// Total energy shed over the horizon (MWh).
    pub total_shed_mwh: f64,
    /// Total energy deferred over the horizon (MWh).
    pub total_deferred_mwh: f64,
    /// Highest settlement price seen ($/MWh).
    pub peak_price: f64,
    /// Hour index of the highest settlement price.
    pub peak_hour: usize,
}

impl CostSummary {
    /// Computes all metrics from a solved plan.
    pub fn from_plan(problem: &DispatchProblem, plan: &DispatchPlan) -> Self {
        let baseline_cost = problem.baseline_cost();
        let savings = baseline_cost - plan.total_cost;
        let savings_pct = if baseline_cost > 0.0 {
            100.0 * savings / baseline_cost
        } else {
            0.0
        };

        // Sums over an empty plan are IEEE -0.0; adding 0.0 restores the
        // plus sign before the values reach Display.
        let energy_cost = problem
            .prices
            .iter()
            .zip(&plan.optimized_mw)
            .map(|(price, load)| price * load)
            .sum::<f64>()
            + 0.0;
        let total_shed_mwh = plan.shed_mw.iter().sum::<f64>() + 0.0;
        let total_deferred_mwh = plan.deferred_mw.iter().sum::<f64>() + 0.0;

        let mut peak_hour = 0;
        let mut peak_price = 0.0_f64;
        for (t, &price) in problem.prices.iter().enumerate() {
            if t == 0 || price > peak_price {
                peak_hour = t;
                peak_price = price;
            }
        }

        Self {
            horizon_hours: plan.horizon(),
            baseline_cost,
            optimized_cost: plan.total_cost,
            energy_cost,
            defer_penalty_cost: problem.defer_cost_per_mwh * total_deferred_mwh,
            shed_penalty_cost: problem.shed_cost_per_mwh * total_shed_mwh,
            savings,
            savings_pct,
            total_shed_mwh,
            total_deferred_mwh,
            peak_price,
            peak_hour,
        }
    }
}

impl fmt::Display for CostSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Dispatch Summary ---")?;
        writeln!(f, "Horizon:          {} hours", self.horizon_hours)?;
        writeln!(f, "Baseline cost:    ${:.2}", self.baseline_cost)?;
        writeln!(f, "Optimized cost:   ${:.2}", self.optimized_cost)?;
        writeln!(f, "  energy:         ${:.2}", self.energy_cost)?;
        writeln!(f, "  defer penalty:  ${:.2}", self.defer_penalty_cost)?;
        writeln!(f, "  shed penalty:   ${:.2}", self.shed_penalty_cost)?;
        writeln!(
            f,
            "Savings:          ${:.2} ({:.1}%)",
            self.savings, self.savings_pct
        )?;
        writeln!(f, "Energy shed:      {:.3} MWh", self.total_shed_mwh)?;
        writeln!(f, "Energy deferred:  {:.3} MWh", self.total_deferred_mwh)?;
        write!(
            f,
            "Peak price:       ${:.2}/MWh at hour {}",
            self.peak_price, self.peak_hour
        )
    }
}
