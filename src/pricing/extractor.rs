//! Plan price extraction from a resolved band

use super::policy::{resolve_base_price, UnknownPricePolicy};
use super::surcharge::Surcharge;
use super::tier::PlanTier;
use crate::error::PricingError;
use crate::rates::Band;
use std::collections::BTreeMap;

/// Final prices for every tier, plus the tiers whose base price was unknown
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPrices {
    pub prices: BTreeMap<PlanTier, f64>,
    pub coerced_tiers: Vec<PlanTier>,
}

/// Read all five tiers from `band` and apply the surcharge
///
/// Adhesion is taken as-is; every other tier is multiplied by the surcharge
/// factor when the quote needs approval.
pub fn extract_prices(
    band: &Band,
    surcharge: &Surcharge,
    policy: UnknownPricePolicy,
) -> Result<ExtractedPrices, PricingError> {
    let factor = surcharge.factor();
    let mut prices = BTreeMap::new();
    let mut coerced_tiers = Vec::new();

    for tier in PlanTier::ALL {
        let (base, coerced) = resolve_base_price(band, tier, policy)?;
        if coerced {
            coerced_tiers.push(tier);
        }
        let price = if tier.is_surchargeable() { base * factor } else { base };
        log::debug!("{}: base {:.2} -> {:.2}", tier, base, price);
        prices.insert(tier, price);
    }

    Ok(ExtractedPrices { prices, coerced_tiers })
}
