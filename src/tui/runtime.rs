//! Plan replay state for the TUI.

use std::collections::VecDeque;
use std::path::Path;
use std::time::Instant;

use crate::config::ScenarioConfig;
use crate::opt::{self, DispatchProblem};
use crate::prices::{ercot, scenarios::PriceScenario};
use crate::report::{CostSummary, HourRow, hour_rows};

/// Maximum number of history entries kept for the rolling chart.
const MAX_HISTORY: usize = 200;

/// Tick interval options in milliseconds (slowest → fastest).
const SPEED_LEVELS_MS: [u64; 6] = [500, 250, 100, 50, 20, 5];

/// Default speed index (100 ms).
const DEFAULT_SPEED_IDX: usize = 2;

/// Resolves the hourly price series from the configured source.
fn resolve_prices(scenario: &ScenarioConfig) -> Result<Vec<f64>, String> {
    let p = &scenario.prices;
    if p.source == "scenario" {
        let s = PriceScenario::from_name(&p.scenario)
            .ok_or_else(|| format!("unknown price scenario \"{}\"", p.scenario))?;
        Ok(s.generate(p.hours, p.seed))
    } else {
        ercot::load_prices(Path::new(&p.path), &p.settlement_point).map_err(|e| e.to_string())
    }
}

/// TUI application state: a solved schedule replayed hour by hour.
pub struct App {
    /// Scenario that produced the plan (kept for preset switch and penalties).
    scenario: ScenarioConfig,
    /// Full solved schedule being replayed.
    rows: Vec<HourRow>,
    /// Aggregate costs for the complete plan.
    pub summary: CostSummary,
    /// Rolling window of replayed hours for the chart.
    pub history: VecDeque<HourRow>,
    /// Next hour to replay.
    pub hour: usize,
    /// Whether the replay is paused.
    pub paused: bool,
    /// Current index into `SPEED_LEVELS_MS`.
    pub speed_idx: usize,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// When the last replay tick was executed.
    pub last_tick: Instant,
    /// Name of the active preset or scenario.
    pub preset_name: String,
    /// Optimized cost accumulated over the replayed hours ($).
    pub cost_so_far: f64,
    /// Baseline cost accumulated over the replayed hours ($).
    pub baseline_cost_so_far: f64,
}

impl App {
    /// Resolves prices and solves the scenario, returning the replayable app.
    ///
    /// Solving happens here, before the caller touches the terminal, so
    /// failures print as ordinary errors instead of corrupting raw mode.
    pub fn new(scenario: &ScenarioConfig, label: String) -> Result<Self, String> {
        let prices = resolve_prices(scenario)?;
        let problem = DispatchProblem::new(
            prices,
            scenario.load.baseline_mw,
            scenario.load.min_mw,
            scenario.load.max_mw,
            scenario.costs.defer_per_mwh,
            scenario.costs.shed_per_mwh,
        );
        let plan = opt::solve(&problem).map_err(|e| e.to_string())?;
        let rows = hour_rows(&problem, &plan);
        let summary = CostSummary::from_plan(&problem, &plan);

        Ok(Self {
            scenario: scenario.clone(),
            rows,
            summary,
            history: VecDeque::with_capacity(MAX_HISTORY),
            hour: 0,
            paused: false,
            speed_idx: DEFAULT_SPEED_IDX,
            quit: false,
            last_tick: Instant::now(),
            preset_name: label,
            cost_so_far: 0.0,
            baseline_cost_so_far: 0.0,
        })
    }

    /// Total hours in the schedule.
    pub fn total_hours(&self) -> usize {
        self.rows.len()
    }

    /// Replays the next hour if any remain.
    pub fn tick(&mut self) {
        if self.hour >= self.rows.len() {
            return;
        }
        let row = self.rows[self.hour].clone();
        self.cost_so_far += row.price_per_mwh * row.optimized_mw
            + self.scenario.costs.defer_per_mwh * row.deferred_mw
            + self.scenario.costs.shed_per_mwh * row.shed_mw;
        self.baseline_cost_so_far += row.price_per_mwh * row.baseline_mw;
        if self.history.len() >= MAX_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(row);
        self.hour += 1;
    }

    /// Toggles pause/resume.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Increases replay speed (shorter tick interval).
    pub fn speed_up(&mut self) {
        if self.speed_idx + 1 < SPEED_LEVELS_MS.len() {
            self.speed_idx += 1;
        }
    }

    /// Decreases replay speed (longer tick interval).
    pub fn speed_down(&mut self) {
        if self.speed_idx > 0 {
            self.speed_idx -= 1;
        }
    }

    /// Returns the current tick interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        SPEED_LEVELS_MS[self.speed_idx]
    }

    /// Switches to a different preset, re-solving from scratch.
    ///
    /// Keeps the current state when the preset is unknown or its solve fails.
    pub fn switch_preset(&mut self, name: &str) {
        let Ok(scenario) = ScenarioConfig::from_preset(name) else {
            return;
        };
        let Ok(mut next) = App::new(&scenario, name.to_string()) else {
            return;
        };
        next.speed_idx = self.speed_idx;
        *self = next;
    }

    /// Rewinds the replay to the first hour without re-solving.
    pub fn restart(&mut self) {
        self.history.clear();
        self.hour = 0;
        self.paused = false;
        self.cost_so_far = 0.0;
        self.baseline_cost_so_far = 0.0;
    }

    /// Returns `true` when every hour has been replayed.
    pub fn is_finished(&self) -> bool {
        self.hour >= self.rows.len()
    }

    /// Returns the most recently replayed hour, if any.
    pub fn last_row(&self) -> Option<&HourRow> {
        self.history.back()
    }

    /// Price of the most recently replayed hour ($/MWh).
    pub fn current_price(&self) -> f64 {
        self.last_row().map_or(0.0, |r| r.price_per_mwh)
    }

    /// Savings accumulated over the replayed hours ($).
    pub fn savings_so_far(&self) -> f64 {
        self.baseline_cost_so_far - self.cost_so_far
    }

    /// Returns `true` when the latest hour sheds or defers load.
    pub fn is_response_active(&self) -> bool {
        self.last_row()
            .is_some_and(|r| r.shed_mw > 0.01 || r.deferred_mw > 0.01)
    }
}
