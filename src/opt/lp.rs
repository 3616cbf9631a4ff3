//! Linear program construction and solve.

use good_lp::solvers::clarabel::clarabel;
use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution, SolverModel, constraint, variable,
};
use thiserror::Error;
use tracing::debug;

use crate::opt::types::{DispatchPlan, DispatchProblem};

/// Failure modes of a dispatch solve.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The price series contained no hours, so there is nothing to schedule.
    #[error("empty horizon: the price series contains no hours")]
    EmptyHorizon,
    /// The constraints admit no solution, e.g. an inverted load band.
    #[error("model is infeasible: no dispatch satisfies the load bounds")]
    Infeasible,
    /// The objective can decrease without bound; indicates bad penalty signs.
    #[error("model is unbounded: the objective has no finite minimum")]
    Unbounded,
    /// The backend failed for another reason.
    #[error("solver failure: {0}")]
    Solver(String),
}

/// Solves the hourly load-shifting LP and extracts the optimal plan.
///
/// Each hour carries three non-negative decision variables: the optimized
/// load actually served, the load shed outright, and the load deferred into
/// the following hour. Every hour must account for the full baseline:
///
/// ```text
/// optimized[t] + shed[t] + deferred[t] = baseline + deferred[t-1]
/// ```
///
/// where the incoming term is zero at t = 0. Optimized load is also held
/// inside the `[min_mw, max_mw]` band. A single aggregate constraint requires
/// all deferred energy to be received within the horizon; since the final
/// hour has no successor, that forces `deferred[H-1]` to zero.
///
/// The objective minimizes energy cost at market prices plus the deferral
/// and shedding penalties.
pub fn solve(problem: &DispatchProblem) -> Result<DispatchPlan, SolveError> {
    let h = problem.horizon();
    if h == 0 {
        return Err(SolveError::EmptyHorizon);
    }

    let mut vars = ProblemVariables::new();
    let optimized = vars.add_vector(variable().min(0.0), h);
    let shed = vars.add_vector(variable().min(0.0), h);
    let deferred = vars.add_vector(variable().min(0.0), h);

    let objective = (0..h)
        .map(|t| {
            problem.prices[t] * optimized[t]
                + problem.defer_cost_per_mwh * deferred[t]
                + problem.shed_cost_per_mwh * shed[t]
        })
        .sum::<Expression>();

    let mut model = vars.minimise(objective.clone()).using(clarabel);

    for t in 0..h {
        // Serve the baseline plus whatever the previous hour pushed here.
        let balance = if t > 0 {
            constraint!(
                optimized[t] + shed[t] + deferred[t] - deferred[t - 1] == problem.baseline_mw
            )
        } else {
            constraint!(optimized[t] + shed[t] + deferred[t] == problem.baseline_mw)
        };
        model = model.with(balance);
        model = model.with(constraint!(optimized[t] >= problem.min_mw));
        model = model.with(constraint!(optimized[t] <= problem.max_mw));
    }

    // Every deferred MWh must land inside the horizon. The receiving sum
    // omits exactly one term, deferred[h-1], so the last hour pins to zero.
    let total_deferred = deferred.iter().map(|&v| Expression::from(v)).sum::<Expression>();
    let total_received = (1..h)
        .map(|t| Expression::from(deferred[t - 1]))
        .sum::<Expression>();
    model = model.with(constraint!(total_deferred == total_received));

    debug!(hours = h, baseline_mw = problem.baseline_mw, "solving dispatch LP");

    let solution = match model.solve() {
        Ok(s) => s,
        Err(ResolutionError::Infeasible) => return Err(SolveError::Infeasible),
        Err(ResolutionError::Unbounded) => return Err(SolveError::Unbounded),
        Err(e) => return Err(SolveError::Solver(e.to_string())),
    };

    let plan = DispatchPlan {
        optimized_mw: optimized.iter().map(|&v| solution.value(v)).collect(),
        shed_mw: shed.iter().map(|&v| solution.value(v)).collect(),
        deferred_mw: deferred.iter().map(|&v| solution.value(v)).collect(),
        total_cost: solution.eval(objective),
    };

    debug!(total_cost = plan.total_cost, "dispatch LP solved");

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-4;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < TOL,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_horizon_is_rejected_before_solving() {
        let problem = DispatchProblem::new(vec![], 10.0, 6.0, 12.0, 20.0, 50.0);
        assert!(matches!(solve(&problem), Err(SolveError::EmptyHorizon)));
    }

    #[test]
    fn inverted_band_surfaces_as_infeasible() {
        let problem = DispatchProblem::new(vec![30.0, 30.0], 10.0, 12.0, 6.0, 20.0, 50.0);
        assert!(matches!(solve(&problem), Err(SolveError::Infeasible)));
    }

    #[test]
    fn cheap_second_hour_pulls_load_forward() {
        // Hour 0 at $50 is worth escaping: drop to the floor and defer the
        // rest into hour 1 at $5, where the band has headroom. Shedding at
        // $60 never beats serving. The optimum is unique:
        //   optimized = [8, 12], deferred = [2, 0], shed = [0, 0]
        //   cost = 50*8 + 20*2 + 5*12 = 500
        let problem = DispatchProblem::new(vec![50.0, 5.0], 10.0, 6.0, 12.0, 20.0, 60.0);
        let plan = solve(&problem).unwrap();

        assert_close(plan.optimized_mw[0], 8.0);
        assert_close(plan.optimized_mw[1], 12.0);
        assert_close(plan.deferred_mw[0], 2.0);
        assert_close(plan.deferred_mw[1], 0.0);
        assert_close(plan.shed_mw[0], 0.0);
        assert_close(plan.shed_mw[1], 0.0);
        assert_close(plan.total_cost, 500.0);
    }

    #[test]
    fn final_hour_cannot_defer() {
        // Deferring out of the expensive last hour would save money, but the
        // aggregate balance pins deferred[H-1] at zero, so the plan just
        // serves the baseline.
        let problem = DispatchProblem::new(vec![5.0, 50.0], 10.0, 6.0, 12.0, 20.0, 60.0);
        let plan = solve(&problem).unwrap();

        assert_close(plan.deferred_mw[1], 0.0);
        assert_close(plan.optimized_mw[0], 10.0);
        assert_close(plan.optimized_mw[1], 10.0);
        assert_close(plan.total_cost, 550.0);
    }

    #[test]
    fn prohibitive_penalties_keep_the_baseline() {
        let prices = vec![20.0, 80.0, 35.0, 120.0];
        let problem = DispatchProblem::new(prices.clone(), 10.0, 6.0, 12.0, 1e6, 1e6);
        let plan = solve(&problem).unwrap();

        for t in 0..4 {
            assert_close(plan.optimized_mw[t], 10.0);
            assert_close(plan.shed_mw[t], 0.0);
            assert_close(plan.deferred_mw[t], 0.0);
        }
        assert_close(plan.total_cost, problem.baseline_cost());
    }

    #[test]
    fn single_hour_has_no_room_to_shift() {
        // With one hour the aggregate balance reduces to deferred[0] == 0,
        // and a $50 shed against a $40 price is not worth taking.
        let problem = DispatchProblem::new(vec![40.0], 10.0, 6.0, 12.0, 20.0, 50.0);
        let plan = solve(&problem).unwrap();

        assert_close(plan.optimized_mw[0], 10.0);
        assert_close(plan.deferred_mw[0], 0.0);
        assert_close(plan.shed_mw[0], 0.0);
        assert_close(plan.total_cost, 400.0);
    }

    #[test]
    fn every_hour_balances_to_the_baseline() {
        let prices = vec![22.0, 35.0, 65.0, 30.0, 45.0, 28.0];
        let problem = DispatchProblem::new(prices, 10.0, 6.0, 12.0, 20.0, 50.0);
        let plan = solve(&problem).unwrap();

        for t in 0..problem.horizon() {
            let incoming = if t > 0 { plan.deferred_mw[t - 1] } else { 0.0 };
            let served = plan.optimized_mw[t] + plan.shed_mw[t] + plan.deferred_mw[t];
            assert_close(served, problem.baseline_mw + incoming);
            assert!(plan.optimized_mw[t] >= problem.min_mw - TOL);
            assert!(plan.optimized_mw[t] <= problem.max_mw + TOL);
        }
    }

    #[test]
    fn plan_never_costs_more_than_the_baseline() {
        let prices = vec![15.0, 500.0, 20.0, 18.0];
        let problem = DispatchProblem::new(prices, 10.0, 6.0, 12.0, 20.0, 50.0);
        let plan = solve(&problem).unwrap();

        assert!(plan.total_cost <= problem.baseline_cost() + TOL);
    }
}
