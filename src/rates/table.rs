//! Loaded rate table

use super::band::Band;
use super::columns::{ColumnMapping, HeaderMatch};
use serde::Serialize;

/// Where the table's header was found and how its columns were mapped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableLayout {
    pub header: HeaderMatch,
    pub columns: ColumnMapping,
}

/// Ordered price bands, read-only once built
///
/// Bands keep source order. Ascending ranges are expected but not relied on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateTable {
    bands: Vec<Band>,
    layout: Option<TableLayout>,
}

impl RateTable {
    /// Build from bands directly, without source layout information
    pub fn from_bands(bands: Vec<Band>) -> Self {
        Self { bands, layout: None }
    }

    pub(crate) fn with_layout(bands: Vec<Band>, layout: TableLayout) -> Self {
        Self {
            bands,
            layout: Some(layout),
        }
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Highest-value tier by position
    pub fn last(&self) -> Option<&Band> {
        self.bands.last()
    }

    /// Upper bound of the last band's label, the table's covered maximum
    pub fn covered_max(&self) -> Option<f64> {
        self.last().and_then(Band::upper_bound)
    }

    pub fn layout(&self) -> Option<&TableLayout> {
        self.layout.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covered_max_uses_last_band() {
        let table = RateTable::from_bands(vec![
            Band::new("50.000,01 - 100.000,00", 2),
            Band::new("0,01 - 50.000,00", 1),
        ]);
        assert_eq!(table.covered_max(), Some(50_000.0));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_empty_table() {
        let table = RateTable::from_bands(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.covered_max(), None);
        assert!(table.layout().is_none());
    }
}
