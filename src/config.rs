//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::prices::scenarios::PriceScenario;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults reproducing the Houston reference run. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::houston`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Price source parameters.
    #[serde(default)]
    pub prices: PricesConfig,
    /// Facility load parameters.
    #[serde(default)]
    pub load: LoadConfig,
    /// Demand-response penalty coefficients.
    #[serde(default)]
    pub costs: CostsConfig,
    /// Output artifact paths.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Price source parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricesConfig {
    /// Price source: `"csv"` (market data file) or `"scenario"` (synthetic).
    pub source: String,
    /// CSV file path (used when source is `"csv"`).
    pub path: String,
    /// Settlement point filter, exact string match.
    pub settlement_point: String,
    /// Synthetic scenario name (used when source is `"scenario"`).
    pub scenario: String,
    /// Horizon length in hours for synthetic scenarios.
    pub hours: usize,
    /// Random seed for synthetic scenario noise.
    pub seed: u64,
}

impl Default for PricesConfig {
    fn default() -> Self {
        Self {
            source: "csv".to_string(),
            path: "data/ercot_prices.csv".to_string(),
            settlement_point: "HB_HOUSTON".to_string(),
            scenario: "typical_day".to_string(),
            hours: 24,
            seed: 42,
        }
    }
}

/// Facility load parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// Uncontrolled baseline demand (MW), broadcast across all hours.
    pub baseline_mw: f64,
    /// Minimum allowable optimized load (MW).
    pub min_mw: f64,
    /// Maximum allowable optimized load (MW).
    pub max_mw: f64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            baseline_mw: 10.0,
            min_mw: 6.0,
            max_mw: 12.0,
        }
    }
}

/// Demand-response penalty coefficients.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostsConfig {
    /// Cost per MWh of load deferred into the next hour ($/MWh).
    pub defer_per_mwh: f64,
    /// Cost per MWh of load permanently shed ($/MWh).
    pub shed_per_mwh: f64,
}

impl Default for CostsConfig {
    fn default() -> Self {
        Self {
            defer_per_mwh: 20.0,
            shed_per_mwh: 50.0,
        }
    }
}

/// Output artifact paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// SVG chart path; empty string skips chart rendering.
    pub chart: String,
    /// Schedule CSV export path; empty string skips export.
    pub export: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            chart: "demand_response.svg".to_string(),
            export: String::new(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"load.baseline_mw"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the Houston scenario (same parameters as the original
    /// hardcoded run: ERCOT CSV, HB_HOUSTON, 10/6/12 MW, 20/50 $/MWh).
    pub fn houston() -> Self {
        Self {
            prices: PricesConfig::default(),
            load: LoadConfig::default(),
            costs: CostsConfig::default(),
            output: OutputConfig::default(),
        }
    }

    /// Returns the scarcity preset: synthetic afternoon price spike.
    pub fn scarcity() -> Self {
        Self {
            prices: PricesConfig {
                source: "scenario".to_string(),
                scenario: "scarcity_event".to_string(),
                ..PricesConfig::default()
            },
            load: LoadConfig::default(),
            costs: CostsConfig::default(),
            output: OutputConfig::default(),
        }
    }

    /// Returns the volatile preset: two noisy synthetic days, wider load band.
    pub fn volatile() -> Self {
        Self {
            prices: PricesConfig {
                source: "scenario".to_string(),
                scenario: "volatile_day".to_string(),
                hours: 48,
                seed: 7,
                ..PricesConfig::default()
            },
            load: LoadConfig {
                min_mw: 5.0,
                max_mw: 14.0,
                ..LoadConfig::default()
            },
            costs: CostsConfig {
                defer_per_mwh: 15.0,
                shed_per_mwh: 45.0,
            },
            output: OutputConfig::default(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["houston", "scarcity", "volatile"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "houston" => Ok(Self::houston()),
            "scarcity" => Ok(Self::scarcity()),
            "volatile" => Ok(Self::volatile()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. The relation
    /// between `load.min_mw` and `load.max_mw` is not checked here: an
    /// inverted band must reach the solver and come back as infeasibility,
    /// not as a config error. A zero-hour horizon likewise passes through.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let p = &self.prices;

        if p.source != "csv" && p.source != "scenario" {
            errors.push(ConfigError {
                field: "prices.source".into(),
                message: format!("must be \"csv\" or \"scenario\", got \"{}\"", p.source),
            });
        }
        if p.source == "csv" && p.path.is_empty() {
            errors.push(ConfigError {
                field: "prices.path".into(),
                message: "must not be empty when prices.source is \"csv\"".into(),
            });
        }
        if p.source == "scenario" && PriceScenario::from_name(&p.scenario).is_none() {
            errors.push(ConfigError {
                field: "prices.scenario".into(),
                message: format!(
                    "unknown scenario \"{}\", available: {}",
                    p.scenario,
                    PriceScenario::names().join(", ")
                ),
            });
        }

        if self.load.baseline_mw < 0.0 {
            errors.push(ConfigError {
                field: "load.baseline_mw".into(),
                message: "must be >= 0".into(),
            });
        }

        let c = &self.costs;
        if c.defer_per_mwh < 0.0 {
            errors.push(ConfigError {
                field: "costs.defer_per_mwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if c.shed_per_mwh < 0.0 {
            errors.push(ConfigError {
                field: "costs.shed_per_mwh".into(),
                message: "must be >= 0".into(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn houston_preset_valid() {
        let cfg = ScenarioConfig::houston();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "houston should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_houston() {
        let cfg = ScenarioConfig::from_preset("houston");
        assert!(cfg.is_ok());
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[prices]
source = "scenario"
scenario = "volatile_day"
hours = 48
seed = 99

[load]
baseline_mw = 8.0
min_mw = 4.0
max_mw = 11.0

[costs]
defer_per_mwh = 12.0
shed_per_mwh = 40.0

[output]
chart = "out.svg"
export = "plan.csv"
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.prices.hours), Some(48));
        assert_eq!(cfg.as_ref().map(|c| c.load.baseline_mw), Some(8.0));
        assert_eq!(cfg.as_ref().map(|c| &*c.prices.scenario), Some("volatile_day"));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[load]
baseline_mw = 10.0
bogus_field = true
"#;
        let result = ScenarioConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[load]
baseline_mw = 7.5
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        // baseline overridden
        assert_eq!(cfg.as_ref().map(|c| c.load.baseline_mw), Some(7.5));
        // bounds kept default
        assert_eq!(cfg.as_ref().map(|c| c.load.min_mw), Some(6.0));
        // price source kept default
        assert_eq!(
            cfg.as_ref().map(|c| &*c.prices.settlement_point),
            Some("HB_HOUSTON")
        );
    }

    #[test]
    fn validation_catches_bad_source() {
        let mut cfg = ScenarioConfig::houston();
        cfg.prices.source = "postgres".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "prices.source"));
    }

    #[test]
    fn validation_catches_empty_csv_path() {
        let mut cfg = ScenarioConfig::houston();
        cfg.prices.path = String::new();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "prices.path"));
    }

    #[test]
    fn validation_catches_unknown_scenario() {
        let mut cfg = ScenarioConfig::scarcity();
        cfg.prices.scenario = "bogus".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "prices.scenario"));
    }

    #[test]
    fn validation_catches_negative_baseline() {
        let mut cfg = ScenarioConfig::houston();
        cfg.load.baseline_mw = -1.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "load.baseline_mw"));
    }

    #[test]
    fn validation_catches_negative_costs() {
        let mut cfg = ScenarioConfig::houston();
        cfg.costs.defer_per_mwh = -5.0;
        cfg.costs.shed_per_mwh = -1.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "costs.defer_per_mwh"));
        assert!(errors.iter().any(|e| e.field == "costs.shed_per_mwh"));
    }

    #[test]
    fn min_above_max_is_not_a_config_error() {
        // An inverted load band is the solver's infeasibility to report.
        let mut cfg = ScenarioConfig::houston();
        cfg.load.min_mw = 12.0;
        cfg.load.max_mw = 6.0;
        let errors = cfg.validate();
        assert!(errors.is_empty(), "inverted band must pass validation: {errors:?}");
    }

    #[test]
    fn zero_hours_is_not_a_config_error() {
        let mut cfg = ScenarioConfig::scarcity();
        cfg.prices.hours = 0;
        let errors = cfg.validate();
        assert!(errors.is_empty(), "empty horizon must pass validation: {errors:?}");
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn scarcity_uses_synthetic_source() {
        let cfg = ScenarioConfig::scarcity();
        assert_eq!(cfg.prices.source, "scenario");
        assert_eq!(cfg.prices.scenario, "scarcity_event");
    }

    #[test]
    fn volatile_has_wider_band_and_longer_horizon() {
        let base = ScenarioConfig::houston();
        let vol = ScenarioConfig::volatile();
        assert!(vol.load.max_mw - vol.load.min_mw > base.load.max_mw - base.load.min_mw);
        assert!(vol.prices.hours > base.prices.hours);
    }
}
