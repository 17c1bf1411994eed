//! Rate table sources, parsing and caching

mod band;
mod cache;
mod cell;
mod columns;
mod table;
pub mod loader;
pub mod source;

pub use band::{label_upper_bound, Band, BandRange, ValueRange};
pub use cache::RateTableCache;
pub use cell::{Cell, Row};
pub use columns::{find_header_row, map_columns, ColumnMapping, ColumnStatus, ColumnTarget, HeaderMatch, HeaderRule};
pub use loader::{load_rate_table, load_rate_table_from_path, rate_table_from_rows, DEFAULT_RATE_TABLE_PATH};
pub use source::{CsvRateSource, InMemorySource, RateSource};
pub use table::{RateTable, TableLayout};
