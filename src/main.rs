//! Demand-response planner entry point — CLI wiring and scenario-driven solves.

use std::path::Path;
use std::process;

use tracing::info;

use dr_opt::config::ScenarioConfig;
use dr_opt::io::chart;
use dr_opt::io::export::export_csv;
use dr_opt::opt::{self, DispatchProblem};
use dr_opt::prices::{ercot, scenarios::PriceScenario};
use dr_opt::report::{CostSummary, hour_rows};
use dr_opt::telemetry;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    baseline: Option<f64>,
    min_load: Option<f64>,
    max_load: Option<f64>,
    defer_cost: Option<f64>,
    shed_cost: Option<f64>,
    prices_path: Option<String>,
    settlement_point: Option<String>,
    price_scenario: Option<String>,
    hours: Option<usize>,
    seed: Option<u64>,
    chart_path: Option<String>,
    export_path: Option<String>,
    #[cfg(feature = "tui")]
    tui: bool,
}

fn print_help() {
    eprintln!("dr-opt — Hourly demand-response dispatch planner");
    eprintln!();
    eprintln!("Usage: dr-opt [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>          Load scenario from TOML config file");
    eprintln!("  --preset <name>            Use a built-in preset (houston, scarcity, volatile)");
    eprintln!("  --baseline <mw>            Override baseline load");
    eprintln!("  --min-load <mw>            Override minimum optimized load");
    eprintln!("  --max-load <mw>            Override maximum optimized load");
    eprintln!("  --defer-cost <$/mwh>       Override deferral penalty");
    eprintln!("  --shed-cost <$/mwh>        Override shedding penalty");
    eprintln!("  --prices <path>            Read prices from an ERCOT CSV file");
    eprintln!("  --settlement-point <name>  Settlement point to filter on (default: HB_HOUSTON)");
    eprintln!("  --price-scenario <name>    Generate synthetic prices instead of reading a file");
    eprintln!("  --hours <n>                Horizon length for synthetic prices");
    eprintln!("  --seed <u64>               Random seed for synthetic prices");
    eprintln!("  --chart <path>             Write the schedule chart SVG to this path");
    eprintln!("  --export <path>            Write the schedule CSV to this path");
    #[cfg(feature = "tui")]
    eprintln!("  --tui                      Replay the schedule in an interactive terminal UI");
    eprintln!("  --help                     Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the houston preset is used.");
}

/// Consumes the value following a flag, exiting with a message if absent.
fn take_value(args: &[String], i: &mut usize, flag: &str, what: &str) -> String {
    *i += 1;
    if *i >= args.len() {
        eprintln!("error: {flag} requires a {what} argument");
        process::exit(1);
    }
    args[*i].clone()
}

fn parse_f64(value: &str, flag: &str) -> f64 {
    value.parse::<f64>().unwrap_or_else(|_| {
        eprintln!("error: {flag} value \"{value}\" is not a valid number");
        process::exit(1);
    })
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        baseline: None,
        min_load: None,
        max_load: None,
        defer_cost: None,
        shed_cost: None,
        prices_path: None,
        settlement_point: None,
        price_scenario: None,
        hours: None,
        seed: None,
        chart_path: None,
        export_path: None,
        #[cfg(feature = "tui")]
        tui: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                cli.scenario_path = Some(take_value(&args, &mut i, "--scenario", "path"));
            }
            "--preset" => {
                cli.preset = Some(take_value(&args, &mut i, "--preset", "name"));
            }
            "--baseline" => {
                let v = take_value(&args, &mut i, "--baseline", "MW");
                cli.baseline = Some(parse_f64(&v, "--baseline"));
            }
            "--min-load" => {
                let v = take_value(&args, &mut i, "--min-load", "MW");
                cli.min_load = Some(parse_f64(&v, "--min-load"));
            }
            "--max-load" => {
                let v = take_value(&args, &mut i, "--max-load", "MW");
                cli.max_load = Some(parse_f64(&v, "--max-load"));
            }
            "--defer-cost" => {
                let v = take_value(&args, &mut i, "--defer-cost", "$/MWh");
                cli.defer_cost = Some(parse_f64(&v, "--defer-cost"));
            }
            "--shed-cost" => {
                let v = take_value(&args, &mut i, "--shed-cost", "$/MWh");
                cli.shed_cost = Some(parse_f64(&v, "--shed-cost"));
            }
            "--prices" => {
                cli.prices_path = Some(take_value(&args, &mut i, "--prices", "path"));
            }
            "--settlement-point" => {
                cli.settlement_point =
                    Some(take_value(&args, &mut i, "--settlement-point", "name"));
            }
            "--price-scenario" => {
                cli.price_scenario = Some(take_value(&args, &mut i, "--price-scenario", "name"));
            }
            "--hours" => {
                let v = take_value(&args, &mut i, "--hours", "count");
                if let Ok(n) = v.parse::<usize>() {
                    cli.hours = Some(n);
                } else {
                    eprintln!("error: --hours value \"{v}\" is not a valid count");
                    process::exit(1);
                }
            }
            "--seed" => {
                let v = take_value(&args, &mut i, "--seed", "u64");
                if let Ok(s) = v.parse::<u64>() {
                    cli.seed = Some(s);
                } else {
                    eprintln!("error: --seed value \"{v}\" is not a valid u64");
                    process::exit(1);
                }
            }
            "--chart" => {
                cli.chart_path = Some(take_value(&args, &mut i, "--chart", "path"));
            }
            "--export" => {
                cli.export_path = Some(take_value(&args, &mut i, "--export", "path"));
            }
            #[cfg(feature = "tui")]
            "--tui" => {
                cli.tui = true;
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Folds CLI overrides into the scenario. `--prices` switches the source to
/// the CSV file, `--price-scenario` switches it to a synthetic generator.
fn apply_overrides(scenario: &mut ScenarioConfig, cli: &CliArgs) {
    if let Some(ref path) = cli.prices_path {
        scenario.prices.source = "csv".to_string();
        scenario.prices.path = path.clone();
    }
    if let Some(ref name) = cli.price_scenario {
        scenario.prices.source = "scenario".to_string();
        scenario.prices.scenario = name.clone();
    }
    if let Some(ref point) = cli.settlement_point {
        scenario.prices.settlement_point = point.clone();
    }
    if let Some(hours) = cli.hours {
        scenario.prices.hours = hours;
    }
    if let Some(seed) = cli.seed {
        scenario.prices.seed = seed;
    }
    if let Some(mw) = cli.baseline {
        scenario.load.baseline_mw = mw;
    }
    if let Some(mw) = cli.min_load {
        scenario.load.min_mw = mw;
    }
    if let Some(mw) = cli.max_load {
        scenario.load.max_mw = mw;
    }
    if let Some(cost) = cli.defer_cost {
        scenario.costs.defer_per_mwh = cost;
    }
    if let Some(cost) = cli.shed_cost {
        scenario.costs.shed_per_mwh = cost;
    }
    if let Some(ref path) = cli.chart_path {
        scenario.output.chart = path.clone();
    }
    if let Some(ref path) = cli.export_path {
        scenario.output.export = path.clone();
    }
}

/// Resolves the hourly price series from the configured source.
fn resolve_prices(scenario: &ScenarioConfig) -> Vec<f64> {
    let p = &scenario.prices;
    if p.source == "scenario" {
        let Some(s) = PriceScenario::from_name(&p.scenario) else {
            eprintln!("error: unknown price scenario \"{}\"", p.scenario);
            process::exit(1);
        };
        info!(scenario = s.name(), hours = p.hours, "generating synthetic prices");
        s.generate(p.hours, p.seed)
    } else {
        match ercot::load_prices(Path::new(&p.path), &p.settlement_point) {
            Ok(prices) => {
                info!(
                    path = %p.path,
                    settlement_point = %p.settlement_point,
                    hours = prices.len(),
                    "loaded market prices"
                );
                prices
            }
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        }
    }
}

fn main() {
    telemetry::init_tracing();

    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then houston default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::houston()
    };

    apply_overrides(&mut scenario, &cli);

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    #[cfg(feature = "tui")]
    if cli.tui {
        let label = cli.preset.as_deref().unwrap_or("houston").to_string();
        if let Err(e) = dr_opt::tui::run(&scenario, label) {
            eprintln!("error: {e}");
            process::exit(1);
        }
        return;
    }

    // Resolve prices and solve
    let prices = resolve_prices(&scenario);
    let problem = DispatchProblem::new(
        prices,
        scenario.load.baseline_mw,
        scenario.load.min_mw,
        scenario.load.max_mw,
        scenario.costs.defer_per_mwh,
        scenario.costs.shed_per_mwh,
    );

    let plan = match opt::solve(&problem) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    info!(
        hours = plan.horizon(),
        total_cost = plan.total_cost,
        "dispatch plan ready"
    );

    // Print per-hour schedule
    let rows = hour_rows(&problem, &plan);
    for r in &rows {
        println!("{r}");
    }

    // Print cost summary
    let summary = CostSummary::from_plan(&problem, &plan);
    println!("\n{summary}");

    // Write chart if configured
    if !scenario.output.chart.is_empty() {
        if let Err(e) = chart::render_to_file(&rows, Path::new(&scenario.output.chart)) {
            eprintln!("error: failed to write chart: {e}");
            process::exit(1);
        }
        eprintln!("Chart written to {}", scenario.output.chart);
    }

    // Export CSV if configured
    if !scenario.output.export.is_empty() {
        if let Err(e) = export_csv(&rows, Path::new(&scenario.output.export)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Schedule written to {}", scenario.output.export);
    }
}
