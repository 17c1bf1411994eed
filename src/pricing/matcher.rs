//! Band matching by value range containment

use super::policy::{fallback_to_last_band, NoMatchPolicy};
use crate::error::PricingError;
use crate::rates::{Band, RateTable};
use serde::Serialize;

/// Why the last band was used without containing the value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The last band's upper bound could not be read, so the value could
    /// not be shown to be above the table
    UnreadableTableMaximum,
    /// The value is within the table's maximum but falls between bands or
    /// in a band whose label could not be parsed
    NotCoveredByAnyBand,
}

/// Outcome of a successful band lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BandMatch<'a> {
    Exact { index: usize, band: &'a Band },
    LastBandFallback { index: usize, band: &'a Band, reason: FallbackReason },
}

impl<'a> BandMatch<'a> {
    pub fn band(&self) -> &'a Band {
        match self {
            BandMatch::Exact { band, .. } | BandMatch::LastBandFallback { band, .. } => band,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            BandMatch::Exact { index, .. } | BandMatch::LastBandFallback { index, .. } => *index,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, BandMatch::LastBandFallback { .. })
    }
}

/// Find the band containing `value`
///
/// Bands are scanned in table order and the first containing band wins.
/// Bands with malformed or inverted labels are skipped. When nothing
/// matches, a value above the last band's upper bound is out of range and
/// anything else goes to the no-match policy.
pub fn match_band(table: &RateTable, value: f64, policy: NoMatchPolicy) -> Result<BandMatch<'_>, PricingError> {
    for (index, band) in table.bands().iter().enumerate() {
        if let Some(range) = band.range() {
            if range.contains(value) {
                log::debug!("value {:.2} matched band {} '{}'", value, index, band.range_label);
                return Ok(BandMatch::Exact { index, band });
            }
        }
    }

    if !table.is_empty() && value > 0.0 {
        let covered_max = table.covered_max();
        if let Some(max) = covered_max {
            if value > max {
                return Err(PricingError::ValueOutOfRange { value, covered_max: max });
            }
        }
        let reason = match covered_max {
            Some(_) => FallbackReason::NotCoveredByAnyBand,
            None => FallbackReason::UnreadableTableMaximum,
        };
        let (index, band) = fallback_to_last_band(table, value, policy)?;
        Ok(BandMatch::LastBandFallback { index, band, reason })
    } else if !(value > 0.0) {
        Err(PricingError::InvalidInput { value })
    } else {
        Err(PricingError::EmptyTable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::pricing::PlanTier;

    fn standard_table() -> RateTable {
        RateTable::from_bands(vec![
            Band::new("R$ 0,01 - R$ 10.000,00", 3).with_price(PlanTier::Gold, 100.0),
            Band::new("R$ 10.000,01 - R$ 50.000,00", 4).with_price(PlanTier::Gold, 150.0),
            Band::new("R$ 50.000,01 - R$ 100.000,00", 5).with_price(PlanTier::Gold, 200.0),
        ])
    }

    #[test]
    fn test_exact_match() {
        let table = standard_table();
        let m = match_band(&table, 5_000.0, NoMatchPolicy::LastBand).unwrap();
        assert!(matches!(m, BandMatch::Exact { index: 0, .. }));
        assert_eq!(m.band().base_price(PlanTier::Gold), Some(100.0));
    }

    #[test]
    fn test_inclusive_boundaries() {
        let table = standard_table();
        assert_eq!(match_band(&table, 10_000.0, NoMatchPolicy::LastBand).unwrap().index(), 0);
        assert_eq!(match_band(&table, 10_000.01, NoMatchPolicy::LastBand).unwrap().index(), 1);
        assert_eq!(match_band(&table, 100_000.0, NoMatchPolicy::LastBand).unwrap().index(), 2);
    }

    #[test]
    fn test_matched_band_contains_value() {
        let table = standard_table();
        let mut value = 0.01;
        while value <= 100_000.0 {
            let m = match_band(&table, value, NoMatchPolicy::Reject).unwrap();
            let range = m.band().range().unwrap();
            assert!(range.min <= value && value <= range.max, "value {}", value);
            value += 1_234.5;
        }
    }

    #[test]
    fn test_above_table_is_out_of_range() {
        let table = standard_table();
        let err = match_band(&table, 99_999_999.0, NoMatchPolicy::LastBand).unwrap_err();
        match err {
            PricingError::ValueOutOfRange { covered_max, .. } => assert_eq!(covered_max, 100_000.0),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_gap_falls_back_to_last_band() {
        let table = standard_table();
        let m = match_band(&table, 10_000.005, NoMatchPolicy::LastBand).unwrap();
        assert_eq!(
            m,
            BandMatch::LastBandFallback {
                index: 2,
                band: &table.bands()[2],
                reason: FallbackReason::NotCoveredByAnyBand,
            }
        );

        let err = match_band(&table, 10_000.005, NoMatchPolicy::Reject).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatchingBand);
    }

    #[test]
    fn test_unreadable_last_label_falls_back() {
        let table = RateTable::from_bands(vec![
            Band::new("0,01 - 10.000,00", 1),
            Band::new("ACIMA DE 10.000,00", 2),
        ]);
        let m = match_band(&table, 80_000.0, NoMatchPolicy::LastBand).unwrap();
        assert!(m.is_fallback());
        assert_eq!(m.index(), 1);
        assert!(matches!(
            m,
            BandMatch::LastBandFallback { reason: FallbackReason::UnreadableTableMaximum, .. }
        ));
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let table = RateTable::from_bands(vec![
            Band::new("0,01 - 20.000,00", 1),
            Band::new("10.000,00 - 30.000,00", 2),
        ]);
        assert_eq!(match_band(&table, 15_000.0, NoMatchPolicy::LastBand).unwrap().index(), 0);
    }

    #[test]
    fn test_unordered_table() {
        let table = RateTable::from_bands(vec![
            Band::new("50.000,01 - 100.000,00", 1),
            Band::new("0,01 - 50.000,00", 2),
        ]);
        assert_eq!(match_band(&table, 60_000.0, NoMatchPolicy::Reject).unwrap().index(), 0);
        assert_eq!(match_band(&table, 100.0, NoMatchPolicy::Reject).unwrap().index(), 1);
    }

    #[test]
    fn test_non_positive_values() {
        let table = standard_table();
        assert_eq!(
            match_band(&table, 0.0, NoMatchPolicy::LastBand).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            match_band(&table, -10.0, NoMatchPolicy::LastBand).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_empty_table() {
        let table = RateTable::from_bands(Vec::new());
        assert_eq!(
            match_band(&table, 10.0, NoMatchPolicy::LastBand).unwrap_err().kind(),
            ErrorKind::EmptyTable
        );
    }
}
