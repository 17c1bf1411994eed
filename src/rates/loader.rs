//! Build a [`RateTable`] from raw rows

use super::band::{Band, BandRange};
use super::cell::Row;
use super::columns::{find_header_row, map_columns, ColumnTarget};
use super::source::{CsvRateSource, RateSource};
use super::table::{RateTable, TableLayout};
use crate::error::PricingError;
use crate::pricing::PlanTier;
use log::{debug, info, warn};
use std::path::Path;

/// Default rate table location, relative to the working directory
pub const DEFAULT_RATE_TABLE_PATH: &str = "input_files/rate_table.csv";

/// Read and parse a rate table from any source
pub fn load_rate_table(source: &dyn RateSource) -> Result<RateTable, PricingError> {
    info!("loading rate table from {}", source.identity());
    let rows = source.read_rows()?;
    rate_table_from_rows(&rows)
}

/// Load a rate table from a CSV file
pub fn load_rate_table_from_path<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<RateTable, PricingError> {
    load_rate_table(&CsvRateSource::new(path).with_delimiter(delimiter))
}

/// Parse rows whose header position and column order are unknown
pub fn rate_table_from_rows(rows: &[Row]) -> Result<RateTable, PricingError> {
    let header = find_header_row(rows).ok_or(PricingError::SchemaNotRecognized)?;
    info!("header row {} found by {:?}", header.row, header.rule);

    let columns = map_columns(&rows[header.row]);
    let range_col = columns
        .column(ColumnTarget::Range)
        .ok_or(PricingError::ColumnMappingIncomplete { header_row: header.row })?;

    let price_cols: Vec<(PlanTier, usize)> = PlanTier::ALL
        .iter()
        .filter_map(|&tier| match columns.column(ColumnTarget::for_tier(tier)) {
            Some(col) => Some((tier, col)),
            None => {
                warn!("no column found for {}; its price will be unknown", tier);
                None
            }
        })
        .collect();

    let mut bands = Vec::new();
    for (row_idx, row) in rows.iter().enumerate().skip(header.row + 1) {
        let label = match row.get(range_col) {
            Some(cell) if !cell.is_empty() => cell.to_string(),
            _ => {
                debug!("row {} dropped: no range value", row_idx);
                continue;
            }
        };

        let mut band = Band::new(label.trim(), row_idx);
        match band.range {
            BandRange::Inverted { range } => warn!(
                "row {} range '{}' has min {} above max {}; band will never match",
                row_idx, band.range_label, range.min, range.max
            ),
            BandRange::Malformed => debug!("row {} range '{}' is not 'min - max'", row_idx, band.range_label),
            BandRange::Valid { .. } => {}
        }

        for &(tier, col) in &price_cols {
            match row.get(col).and_then(|cell| cell.to_amount()) {
                Some(price) => band.set_price(tier, price),
                None => {
                    if let Some(cell) = row.get(col).filter(|c| !c.is_empty()) {
                        warn!("row {} {} value '{}' is not a number", row_idx, tier, cell);
                    }
                }
            }
        }

        bands.push(band);
    }

    if bands.is_empty() {
        return Err(PricingError::EmptyTable);
    }

    info!("rate table loaded with {} bands", bands.len());
    Ok(RateTable::with_layout(bands, TableLayout { header, columns }))
}
