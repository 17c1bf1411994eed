//! Rate sources: where the raw rows of a rate table come from

use super::cell::{Cell, Row};
use crate::error::PricingError;
use csv::{ByteRecord, ReaderBuilder};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Supplier of raw rate table rows
pub trait RateSource {
    /// Human-readable identity used in logs and errors
    fn identity(&self) -> String;

    fn read_rows(&self) -> Result<Vec<Row>, PricingError>;
}

/// Rate table exported from a spreadsheet as CSV
///
/// The header row position is not assumed and rows may have differing
/// lengths. Fields that are not valid UTF-8 are decoded as Latin-1, which
/// covers the usual Windows spreadsheet exports.
#[derive(Debug, Clone)]
pub struct CsvRateSource {
    path: PathBuf,
    delimiter: u8,
}

impl CsvRateSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RateSource for CsvRateSource {
    fn identity(&self) -> String {
        self.path.display().to_string()
    }

    fn read_rows(&self) -> Result<Vec<Row>, PricingError> {
        let file = std::fs::File::open(&self.path)
            .map_err(|e| PricingError::source_unavailable(&self.path, e))?;
        read_rows_from_reader(file, self.delimiter)
            .map_err(|e| PricingError::source_unavailable(&self.path, e))
    }
}

/// Read rows from any CSV reader (e.g., string buffer, uploaded file)
pub fn read_rows_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Row>, csv::Error> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut record = ByteRecord::new();
    while csv_reader.read_byte_record(&mut record)? {
        rows.push(record.iter().map(decode_field).map(|f| Cell::from_field(&f)).collect());
    }
    Ok(rows)
}

fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Rows already held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    name: String,
    rows: Vec<Row>,
}

impl InMemorySource {
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

impl RateSource for InMemorySource {
    fn identity(&self) -> String {
        self.name.clone()
    }

    fn read_rows(&self) -> Result<Vec<Row>, PricingError> {
        Ok(self.rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_ragged_rows() {
        let data = "Tabela 2023\nFAIXA,ADESAO,OURO\n\"R$ 0,01 - R$ 10.000,00\",150,89.9\n";
        let rows = read_rows_from_reader(data.as_bytes(), b',').unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![Cell::text("Tabela 2023")]);
        assert_eq!(rows[2][0], Cell::text("R$ 0,01 - R$ 10.000,00"));
        assert_eq!(rows[2][2], Cell::Number(89.9));
    }

    #[test]
    fn test_semicolon_and_latin1() {
        // "VALOR DO VEÍCULO" with Í encoded as Latin-1 0xCD
        let mut data = b"VALOR DO VE".to_vec();
        data.push(0xCD);
        data.extend_from_slice(b"CULO;PLANO OURO\n");
        let rows = read_rows_from_reader(&data[..], b';').unwrap();

        assert_eq!(rows[0][0], Cell::text("VALOR DO VEÍCULO"));
        assert_eq!(rows[0][1], Cell::text("PLANO OURO"));
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let source = CsvRateSource::new("/nonexistent/rate_table.csv");
        let err = source.read_rows().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    }
}
