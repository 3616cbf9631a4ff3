//! Integration tests for market data loading and its edge cases.

mod common;

use std::fs;
use std::path::Path;

use dr_opt::opt::{self, DispatchProblem, SolveError};
use dr_opt::prices::ercot::{PriceError, load_prices};

/// Two settlement points over three hours, written to disk per test.
const SAMPLE: &str = "\
delivery_date,hour_ending,settlement_point,spp
2025-03-01,01:00,HB_HOUSTON,21.50
2025-03-01,01:00,HB_NORTH,20.85
2025-03-01,02:00,HB_HOUSTON,19.75
2025-03-01,02:00,HB_NORTH,19.10
2025-03-01,03:00,HB_HOUSTON,45.00
2025-03-01,03:00,HB_NORTH,43.20
";

#[test]
fn committed_sample_matches_the_reference_day() {
    let prices = load_prices(Path::new("data/ercot_prices.csv"), "HB_HOUSTON")
        .expect("committed data file should load");

    assert_eq!(prices.len(), 24);
    assert_eq!(prices, common::HOUSTON_DAY.to_vec());
}

#[test]
fn loaded_prices_reproduce_the_default_problem() {
    let prices = load_prices(Path::new("data/ercot_prices.csv"), "HB_HOUSTON")
        .expect("committed data file should load");

    assert_eq!(prices, common::default_problem().prices);
}

#[test]
fn filtering_keeps_one_point_in_row_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("prices.csv");
    fs::write(&path, SAMPLE).expect("sample file should write");

    let houston = load_prices(&path, "HB_HOUSTON").expect("houston rows should load");
    let north = load_prices(&path, "HB_NORTH").expect("north rows should load");

    assert_eq!(houston, vec![21.50, 19.75, 45.00]);
    assert_eq!(north, vec![20.85, 19.10, 43.20]);
}

#[test]
fn unmatched_point_yields_an_empty_series() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("prices.csv");
    fs::write(&path, SAMPLE).expect("sample file should write");

    let prices = load_prices(&path, "LZ_SOUTH").expect("unmatched filter is not an error");
    assert!(prices.is_empty());
}

#[test]
fn missing_file_error_carries_the_attempted_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.csv");

    let err = load_prices(&path, "HB_HOUSTON").expect_err("missing file must fail");
    assert!(matches!(err, PriceError::SourceMissing { .. }));
    assert!(
        err.to_string().contains("absent.csv"),
        "message should name the path: {err}"
    );
}

#[test]
fn empty_series_surfaces_as_an_empty_horizon_solve_error() {
    // A filter that matches nothing flows through the provider as Ok(vec![])
    // and must then fail loudly at the solve step.
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("prices.csv");
    fs::write(&path, SAMPLE).expect("sample file should write");

    let prices = load_prices(&path, "LZ_SOUTH").expect("unmatched filter is not an error");
    let problem = DispatchProblem::new(prices, 10.0, 6.0, 12.0, 20.0, 50.0);

    assert!(matches!(opt::solve(&problem), Err(SolveError::EmptyHorizon)));
}

#[test]
fn negative_prices_load_and_solve() {
    // HB_WEST dips negative overnight in the committed sample; the loader
    // must pass the sign through and the LP stays well-posed.
    let prices = load_prices(Path::new("data/ercot_prices.csv"), "HB_WEST")
        .expect("committed data file should load");

    assert_eq!(prices.len(), 24);
    assert!(
        prices.iter().any(|&p| p < 0.0),
        "fixture drift: HB_WEST should contain negative prices"
    );

    let problem = DispatchProblem::new(prices, 10.0, 6.0, 12.0, 20.0, 50.0);
    let plan = opt::solve(&problem).expect("negative prices should still solve");
    assert!(plan.total_cost <= problem.baseline_cost() + 1e-4);
}
