//! SVG chart rendering for solved dispatch plans.

use std::fs;
use std::path::Path;

use plotters::prelude::*;
use thiserror::Error;

use crate::report::HourRow;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 500;
const TITLE: &str = "Data Center Demand Response Optimization";

/// Orange for the price series; the stock palette has no orange.
const PRICE_COLOR: RGBColor = RGBColor(255, 165, 0);

/// Failure modes of chart rendering.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The schedule contained no hours, so there is nothing to draw.
    #[error("nothing to chart: the schedule contains no hours")]
    EmptyPlan,
    /// The plotting backend rejected the drawing commands.
    #[error("chart rendering failed: {0}")]
    Render(String),
    /// Writing the finished SVG to disk failed.
    #[error("chart i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders the dispatch schedule as an SVG document.
///
/// Baseline and optimized load are drawn as lines against the left axis,
/// shed and deferred load as stacked translucent bars, and the hourly price
/// as a dashed orange line against a secondary axis on the right.
///
/// # Errors
///
/// Returns [`ChartError::EmptyPlan`] when `rows` is empty, or
/// [`ChartError::Render`] when the backend fails.
pub fn render_svg(rows: &[HourRow]) -> Result<String, ChartError> {
    if rows.is_empty() {
        return Err(ChartError::EmptyPlan);
    }

    let mut svg = String::new();
    draw(&mut svg, rows).map_err(|e| ChartError::Render(e.to_string()))?;
    Ok(svg)
}

/// Renders the dispatch schedule and writes the SVG to `path`.
pub fn render_to_file(rows: &[HourRow], path: &Path) -> Result<(), ChartError> {
    let svg = render_svg(rows)?;
    fs::write(path, svg)?;
    Ok(())
}

fn draw(svg: &mut String, rows: &[HourRow]) -> Result<(), Box<dyn std::error::Error>> {
    let h = rows.len();

    // Bars are centered on integer hours, so pad the x range by half a slot.
    let x_range = -0.5..(h as f64 - 0.5);

    let load_top = rows
        .iter()
        .flat_map(|r| [r.baseline_mw, r.optimized_mw, r.shed_mw + r.deferred_mw])
        .fold(1.0_f64, f64::max)
        * 1.15;

    let price_min = rows
        .iter()
        .map(|r| r.price_per_mwh)
        .fold(f64::INFINITY, f64::min);
    let price_max = rows
        .iter()
        .map(|r| r.price_per_mwh)
        .fold(f64::NEG_INFINITY, f64::max);
    let price_floor = (price_min * 1.1).min(0.0);
    let price_top = price_max.max(1.0) * 1.1;

    let root = SVGBackend::with_string(svg, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .right_y_label_area_size(55)
        .build_cartesian_2d(x_range.clone(), 0.0..load_top)?
        .set_secondary_coord(x_range, price_floor..price_top);

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Hour")
        .y_desc("Optimized Load (MW)")
        .label_style(("sans-serif", 13))
        .draw()?;

    chart
        .configure_secondary_axes()
        .y_desc("Price ($/MWh)")
        .label_style(("sans-serif", 13))
        .axis_desc_style(("sans-serif", 15).into_font().color(&PRICE_COLOR))
        .draw()?;

    // Stacked bars first so the load lines stay visible on top.
    chart
        .draw_series(rows.iter().map(|r| {
            let x = r.hour as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, r.shed_mw)], RED.mix(0.3).filled())
        }))?
        .label("Shed Load")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], RED.mix(0.3).filled()));

    chart
        .draw_series(rows.iter().map(|r| {
            let x = r.hour as f64;
            Rectangle::new(
                [(x - 0.4, r.shed_mw), (x + 0.4, r.shed_mw + r.deferred_mw)],
                BLUE.mix(0.3).filled(),
            )
        }))?
        .label("Deferred Load")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], BLUE.mix(0.3).filled()));

    chart
        .draw_series(DashedLineSeries::new(
            rows.iter().map(|r| (r.hour as f64, r.baseline_mw)),
            5,
            3,
            BLUE.stroke_width(2),
        ))?
        .label("Baseline Load")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(
            rows.iter().map(|r| (r.hour as f64, r.optimized_mw)),
            GREEN.stroke_width(2),
        ))?
        .label("Optimized Load")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN.stroke_width(2)));

    chart
        .draw_secondary_series(DashedLineSeries::new(
            rows.iter().map(|r| (r.hour as f64, r.price_per_mwh)),
            5,
            3,
            PRICE_COLOR.stroke_width(2),
        ))?
        .label("Price ($/MWh)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], PRICE_COLOR.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.4))
        .draw()?;

    root.present()?;
    Ok(())
}
