//! CSV export for dispatch schedules.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::report::HourRow;

/// Column header for the schedule CSV export.
const HEADER: &str = "hour,price_per_mwh,baseline_mw,optimized_mw,shed_mw,deferred_mw";

/// Exports the dispatch schedule to a CSV file at the given path.
///
/// Writes a header row followed by one data row per hour. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(rows: &[HourRow], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(rows, buf)
}

/// Writes the dispatch schedule as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(rows: &[HourRow], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for r in rows {
        wtr.write_record(&[
            r.hour.to_string(),
            format!("{:.4}", r.price_per_mwh),
            format!("{:.4}", r.baseline_mw),
            format!("{:.4}", r.optimized_mw),
            format!("{:.4}", r.shed_mw),
            format!("{:.4}", r.deferred_mw),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
