//! Named fallback policies for imperfect rate tables
//!
//! Both defaults reproduce the long-standing quoting behaviour: a value that
//! matches no band (but is not above the table) is priced on the last band,
//! and a price cell that cannot be read counts as zero. Each can be switched
//! to a hard failure.

use crate::error::PricingError;
use crate::pricing::PlanTier;
use crate::rates::{Band, RateTable};
use serde::Serialize;
use std::str::FromStr;

/// What to do when no band contains the value and the value is not above
/// the table's covered maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoMatchPolicy {
    #[default]
    LastBand,
    Reject,
}

/// What to do with a price cell that is missing or unreadable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownPricePolicy {
    #[default]
    Zero,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PricingPolicy {
    pub no_match: NoMatchPolicy,
    pub unknown_price: UnknownPricePolicy,
}

impl PricingPolicy {
    /// Both policies set to fail instead of approximating
    pub fn strict() -> Self {
        Self {
            no_match: NoMatchPolicy::Reject,
            unknown_price: UnknownPricePolicy::Reject,
        }
    }
}

/// Last-resort band for a value no band contains
pub fn fallback_to_last_band(
    table: &RateTable,
    value: f64,
    policy: NoMatchPolicy,
) -> Result<(usize, &Band), PricingError> {
    match (policy, table.last()) {
        (NoMatchPolicy::LastBand, Some(band)) => {
            log::warn!(
                "no band contains {:.2}; using last band '{}' as fallback",
                value,
                band.range_label
            );
            Ok((table.len() - 1, band))
        }
        (NoMatchPolicy::Reject, Some(_)) => Err(PricingError::NoMatchingBand { value }),
        (_, None) => Err(PricingError::EmptyTable),
    }
}

/// Resolve a tier's base price, applying the unknown-price policy
///
/// Returns the price and whether it was coerced.
pub fn resolve_base_price(
    band: &Band,
    tier: PlanTier,
    policy: UnknownPricePolicy,
) -> Result<(f64, bool), PricingError> {
    match (band.base_price(tier), policy) {
        (Some(price), _) => Ok((price, false)),
        (None, UnknownPricePolicy::Zero) => {
            log::warn!("{} price unknown in band '{}'; using 0.00", tier, band.range_label);
            Ok((0.0, true))
        }
        (None, UnknownPricePolicy::Reject) => Err(PricingError::UnknownPrice {
            tier,
            band_label: band.range_label.clone(),
        }),
    }
}

impl FromStr for NoMatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last-band" | "last_band" | "fallback" => Ok(NoMatchPolicy::LastBand),
            "reject" | "strict" => Ok(NoMatchPolicy::Reject),
            other => Err(format!("unknown no-match policy '{}' (expected last-band or reject)", other)),
        }
    }
}

impl FromStr for UnknownPricePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zero" => Ok(UnknownPricePolicy::Zero),
            "reject" | "strict" => Ok(UnknownPricePolicy::Reject),
            other => Err(format!("unknown price policy '{}' (expected zero or reject)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn two_bands() -> RateTable {
        RateTable::from_bands(vec![
            Band::new("0,01 - 10.000,00", 1).with_price(PlanTier::Gold, 100.0),
            Band::new("10.000,01 - 20.000,00", 2),
        ])
    }

    #[test]
    fn test_fallback_returns_last_band() {
        let table = two_bands();
        let (idx, band) = fallback_to_last_band(&table, 5.0, NoMatchPolicy::LastBand).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(band.source_row, 2);
    }

    #[test]
    fn test_rejecting_fallback() {
        let err = fallback_to_last_band(&two_bands(), 5.0, NoMatchPolicy::Reject).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatchingBand);

        let empty = RateTable::from_bands(Vec::new());
        let err = fallback_to_last_band(&empty, 5.0, NoMatchPolicy::LastBand).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyTable);
    }

    #[test]
    fn test_unknown_price_policies() {
        let table = two_bands();
        let band = &table.bands()[0];

        assert_eq!(
            resolve_base_price(band, PlanTier::Gold, UnknownPricePolicy::Reject).unwrap(),
            (100.0, false)
        );
        assert_eq!(
            resolve_base_price(band, PlanTier::Diamond, UnknownPricePolicy::Zero).unwrap(),
            (0.0, true)
        );
        let err = resolve_base_price(band, PlanTier::Diamond, UnknownPricePolicy::Reject).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownPrice);
    }

    #[test]
    fn test_parse_policies() {
        assert_eq!("last-band".parse::<NoMatchPolicy>(), Ok(NoMatchPolicy::LastBand));
        assert_eq!("REJECT".parse::<NoMatchPolicy>(), Ok(NoMatchPolicy::Reject));
        assert_eq!("zero".parse::<UnknownPricePolicy>(), Ok(UnknownPricePolicy::Zero));
        assert!("sometimes".parse::<UnknownPricePolicy>().is_err());
    }
}
