//! Settlement point price loading from ERCOT-style CSV market data.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a price series from market data.
#[derive(Debug, Error)]
pub enum PriceError {
    /// The source file does not exist; the message carries the attempted path.
    #[error("price data file not found: {path}")]
    SourceMissing {
        /// Path that failed to resolve.
        path: String,
    },
    /// The file exists but a row could not be read or deserialized.
    #[error("failed to read price data: {0}")]
    Read(#[from] csv::Error),
}

/// One row of the settlement point price file.
///
/// Only the filter column and the price column are bound; any other columns
/// in the source data (delivery date, hour ending, point type) are ignored.
#[derive(Debug, Deserialize)]
struct PriceRow {
    settlement_point: String,
    spp: f64,
}

/// Loads the hourly price series for one settlement point from a CSV file.
///
/// Rows are matched by exact string equality on the `settlement_point`
/// column and returned in source row order. A filter that matches no rows
/// yields an empty vector, not an error. Single attempt, no caching.
///
/// # Errors
///
/// Returns [`PriceError::SourceMissing`] if the file is absent and
/// [`PriceError::Read`] for any other I/O or parse failure.
pub fn load_prices(path: &Path, settlement_point: &str) -> Result<Vec<f64>, PriceError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            PriceError::SourceMissing {
                path: path.display().to_string(),
            }
        } else {
            PriceError::Read(csv::Error::from(e))
        }
    })?;
    read_prices(BufReader::new(file), settlement_point)
}

/// Reads the price series for one settlement point from any CSV reader.
///
/// Backs [`load_prices`]; split out so row handling is testable without
/// touching the filesystem.
///
/// # Errors
///
/// Returns [`PriceError::Read`] if a row fails to parse.
pub fn read_prices(reader: impl Read, settlement_point: &str) -> Result<Vec<f64>, PriceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut prices = Vec::new();
    for row in rdr.deserialize::<PriceRow>() {
        let row = row?;
        if row.settlement_point == settlement_point {
            prices.push(row.spp);
        }
    }
    debug!(
        settlement_point,
        hours = prices.len(),
        "price rows filtered"
    );
    Ok(prices)
}
