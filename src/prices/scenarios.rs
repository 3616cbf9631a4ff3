//! Synthetic hourly price scenarios.
//!
//! Named, seeded generators producing realistic $/MWh shapes so the planner
//! runs without market data:
//!
//! - **Typical Day**: cheap overnight, midday solar dip, evening peak
//! - **Scarcity Event**: ordinary day with a short extreme afternoon spike
//! - **Volatile Day**: large swings, occasional negative midday prices

use rand::{Rng, SeedableRng, rngs::StdRng};

/// A named synthetic price shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceScenario {
    /// Cheap overnight, midday solar dip, evening peak.
    TypicalDay,
    /// Typical shape with an extreme scarcity spike in the late afternoon.
    ScarcityEvent,
    /// Large hour-to-hour swings, may dip negative around midday.
    VolatileDay,
}

/// All available scenarios, in menu order.
pub const SCENARIOS: &[PriceScenario] = &[
    PriceScenario::TypicalDay,
    PriceScenario::ScarcityEvent,
    PriceScenario::VolatileDay,
];

impl PriceScenario {
    /// The identifier used in config files and on the CLI.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TypicalDay => "typical_day",
            Self::ScarcityEvent => "scarcity_event",
            Self::VolatileDay => "volatile_day",
        }
    }

    /// One-line description of the price shape.
    pub fn description(&self) -> &'static str {
        match self {
            Self::TypicalDay => {
                "Cheap overnight (0-6), midday solar dip, evening peak (17-20)"
            }
            Self::ScarcityEvent => {
                "Typical day with an extreme scarcity spike at hours 15-17"
            }
            Self::VolatileDay => {
                "Large swings from negative midday prices to a steep evening peak"
            }
        }
    }

    /// Looks a scenario up by its config/CLI identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        SCENARIOS.iter().copied().find(|s| s.name() == name)
    }

    /// All scenario identifiers, in menu order.
    pub fn names() -> Vec<&'static str> {
        SCENARIOS.iter().map(|s| s.name()).collect()
    }

    /// Generates `hours` prices ($/MWh), deterministic for a given seed.
    ///
    /// Horizons longer than a day repeat the daily shape with fresh noise.
    pub fn generate(&self, hours: usize, seed: u64) -> Vec<f64> {
        match self {
            Self::TypicalDay => generate_typical_day(hours, seed),
            Self::ScarcityEvent => generate_scarcity_event(hours, seed),
            Self::VolatileDay => generate_volatile_day(hours, seed),
        }
    }
}

/// Typical day: modest price levels with a clear evening peak.
fn generate_typical_day(hours: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..hours)
        .map(|h| {
            let base = match h % 24 {
                0..=5 => 22.0,   // off-peak overnight
                6..=8 => 35.0,   // morning ramp
                9..=13 => 27.0,  // midday solar dip
                14..=16 => 38.0, // afternoon
                17..=20 => 65.0, // evening peak
                _ => 30.0,       // late evening decline
            };
            base * (1.0 + rng.random_range(-0.08..0.08))
        })
        .collect()
}

/// Scarcity event: ordinary levels punctured by a short extreme spike.
fn generate_scarcity_event(hours: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..hours)
        .map(|h| {
            let base = match h % 24 {
                0..=5 => 20.0,
                6..=13 => 28.0,
                14 => 60.0,    // ramp into the event
                15..=17 => 450.0, // scarcity pricing
                18 => 80.0,    // recovery
                _ => 35.0,
            };
            base * (1.0 + rng.random_range(-0.05..0.05))
        })
        .collect()
}

/// Volatile day: each hour drawn uniformly from a banded daily pattern.
///
/// Bands as `(start_hour, end_hour, low, high)`; the midday band allows
/// negative prices (renewable surplus).
fn generate_volatile_day(hours: usize, seed: u64) -> Vec<f64> {
    const BANDS: [(usize, usize, f64, f64); 11] = [
        (0, 4, 12.0, 20.0),    // night
        (4, 6, 8.0, 14.0),     // pre-dawn valley
        (6, 8, 40.0, 60.0),    // morning ramp
        (8, 10, 25.0, 38.0),   // mid-morning drop
        (10, 12, 15.0, 24.0),  // late morning
        (12, 14, -8.0, 6.0),   // solar surplus, may go negative
        (14, 16, 30.0, 48.0),  // afternoon ramp
        (16, 18, 70.0, 95.0),  // peak building
        (18, 20, 95.0, 125.0), // evening peak
        (20, 22, 45.0, 65.0),  // decline
        (22, 24, 18.0, 28.0),  // night
    ];

    let mut rng = StdRng::seed_from_u64(seed);
    (0..hours)
        .map(|h| {
            let hod = h % 24;
            let (low, high) = BANDS
                .iter()
                .find(|&&(start, end, _, _)| hod >= start && hod < end)
                .map(|&(_, _, low, high)| (low, high))
                .unwrap_or((20.0, 30.0));
            rng.random_range(low..high)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic_per_seed() {
        for scenario in SCENARIOS {
            let a = scenario.generate(48, 42);
            let b = scenario.generate(48, 42);
            assert_eq!(a, b, "{} should be seed-deterministic", scenario.name());
        }
    }

    #[test]
    fn requested_length_is_honored() {
        assert_eq!(PriceScenario::TypicalDay.generate(36, 1).len(), 36);
        assert_eq!(PriceScenario::VolatileDay.generate(0, 1).len(), 0);
    }

    #[test]
    fn typical_day_evening_peak_dominates_overnight() {
        let prices = PriceScenario::TypicalDay.generate(24, 7);
        let overnight: f64 = prices[0..6].iter().sum::<f64>() / 6.0;
        let evening: f64 = prices[17..21].iter().sum::<f64>() / 4.0;
        assert!(
            evening > overnight * 1.5,
            "evening avg {evening:.2} should clear 1.5x overnight avg {overnight:.2}"
        );
    }

    #[test]
    fn scarcity_event_spike_is_extreme() {
        let prices = PriceScenario::ScarcityEvent.generate(24, 11);
        for h in 15..=17 {
            assert!(
                prices[h] > 300.0,
                "hour {h} should be in scarcity pricing, got {:.2}",
                prices[h]
            );
        }
        // off-peak stays at ordinary levels
        assert!(prices[3] < 60.0);
        assert!(prices[22] < 60.0);
    }

    #[test]
    fn volatile_day_spans_a_wide_range() {
        let prices = PriceScenario::VolatileDay.generate(24, 3);
        let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        // guaranteed by the band table: midday band tops out at 6,
        // the evening band starts at 95
        assert!(min < 10.0, "midday band should pull the floor down, got {min:.2}");
        assert!(max > 90.0, "evening band should push the ceiling up, got {max:.2}");
    }

    #[test]
    fn multi_day_horizon_repeats_the_daily_shape() {
        let prices = PriceScenario::TypicalDay.generate(48, 5);
        // both days carry an evening peak above their own overnight trough
        for day in 0..2 {
            let o = day * 24;
            let overnight: f64 = prices[o..o + 6].iter().sum::<f64>() / 6.0;
            let evening: f64 = prices[o + 17..o + 21].iter().sum::<f64>() / 4.0;
            assert!(evening > overnight, "day {day} should keep the daily shape");
        }
    }

    #[test]
    fn from_name_round_trips() {
        for scenario in SCENARIOS {
            assert_eq!(PriceScenario::from_name(scenario.name()), Some(*scenario));
        }
        assert_eq!(PriceScenario::from_name("bogus"), None);
    }

    #[test]
    fn names_lists_all_scenarios() {
        let names = PriceScenario::names();
        assert_eq!(names.len(), SCENARIOS.len());
        assert!(names.contains(&"typical_day"));
    }
}
