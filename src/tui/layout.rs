//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, Paragraph};

use super::runtime::App;
use super::style;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // chart
            Constraint::Length(3), // price gauge
            Constraint::Length(5), // status panel
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_chart(frame, app, chunks[1]);
    render_price_gauge(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);
    render_footer(frame, chunks[4]);
}

/// Header bar: scenario name, hour progress, speed, run state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let state_label = if app.is_finished() {
        "DONE"
    } else if app.paused {
        "PAUSED"
    } else {
        "RUNNING"
    };

    let state_icon = if app.is_finished() {
        "■"
    } else if app.paused {
        "‖"
    } else {
        "▶"
    };

    let header = Line::from(vec![
        Span::styled(
            " DR-OPT ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            &app.preset_name,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ h={}/{} │ {}ms │ {} {} ",
            app.hour,
            app.total_hours(),
            app.tick_interval_ms(),
            state_icon,
            state_label,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Optimized load vs baseline chart.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let optimized_data: Vec<(f64, f64)> = app
        .history
        .iter()
        .map(|r| (r.hour as f64, r.optimized_mw))
        .collect();

    let baseline_data: Vec<(f64, f64)> = app
        .history
        .iter()
        .map(|r| (r.hour as f64, r.baseline_mw))
        .collect();

    let y_bounds = style::auto_bounds_y(&optimized_data, &baseline_data);

    let x_lo = optimized_data.first().map_or(0.0, |p| p.0);
    let x_hi = optimized_data.last().map_or(1.0, |p| p.0).max(x_lo + 1.0);

    let datasets = vec![
        Dataset::default()
            .name("Optimized")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::OPTIMIZED_COLOR))
            .data(&optimized_data),
        Dataset::default()
            .name("Baseline")
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(style::BASELINE_COLOR))
            .data(&baseline_data),
    ];

    let x_label_lo = format!("{}", x_lo as u32);
    let x_label_hi = format!("{}", x_hi as u32);
    let y_label_lo = format!("{:.1}", y_bounds[0]);
    let y_label_hi = format!("{:.1}", y_bounds[1]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Optimized Load vs Baseline ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("hour")
                .bounds([x_lo, x_hi])
                .labels(vec![x_label_lo, x_label_hi]),
        )
        .y_axis(
            Axis::default()
                .title("MW")
                .bounds(y_bounds)
                .labels(vec![y_label_lo, y_label_hi]),
        );

    frame.render_widget(chart, area);
}

/// Current price gauge with a response-activity indicator.
fn render_price_gauge(frame: &mut Frame, app: &App, area: Rect) {
    let price = app.current_price();
    let peak = app.summary.peak_price;
    let color = style::price_color(price, peak);
    let ratio = if peak > 0.0 {
        (price / peak).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let response_status = if app.is_response_active() {
        "RESPONDING"
    } else {
        ""
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(14)])
        .split(area);

    let gauge = Gauge::default()
        .block(Block::default().title(" Price ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio)
        .label(format!("{price:.2} $/MWh"));
    frame.render_widget(gauge, chunks[0]);

    let response_color = if app.is_response_active() {
        style::RESPONSE_ACTIVE
    } else {
        style::FOOTER_FG
    };
    let response_widget = Paragraph::new(Line::from(Span::styled(
        response_status,
        Style::default()
            .fg(response_color)
            .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(response_widget, chunks[1]);
}

/// Status panel showing the latest hour and cumulative costs.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let lines = if let Some(r) = app.last_row() {
        vec![
            Line::from(format!(
                "  base={:>6.2} MW  opt={:>6.2} MW  shed={:>5.2} MW  defer={:>5.2} MW",
                r.baseline_mw, r.optimized_mw, r.shed_mw, r.deferred_mw,
            )),
            Line::from(format!(
                "  cost so far=${:>9.2}  baseline=${:>9.2}  saved=${:>8.2}",
                app.cost_so_far,
                app.baseline_cost_so_far,
                app.savings_so_far(),
            )),
            Line::from(format!(
                "  plan total=${:.2}  plan savings=${:.2} ({:.1}%)",
                app.summary.optimized_cost, app.summary.savings, app.summary.savings_pct,
            )),
        ]
    } else {
        vec![Line::from("  Waiting for first hour...")]
    };

    let block = Block::default().title(" Status ").borders(Borders::ALL);
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  Space:Pause  +/-:Speed  1/2/3:Preset  r:Restart",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
