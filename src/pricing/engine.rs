//! Pricing engine: rate table + vehicle value -> plan prices

use super::extractor::extract_prices;
use super::matcher::{match_band, BandMatch, FallbackReason};
use super::policy::PricingPolicy;
use super::surcharge::Surcharge;
use super::tier::PlanTier;
use crate::error::PricingError;
use crate::rates::RateTable;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Input for a single quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingRequest {
    pub vehicle_value: f64,
}

impl PricingRequest {
    pub fn new(vehicle_value: f64) -> Self {
        Self { vehicle_value }
    }
}

/// How the pricing band was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PricingPath {
    /// A band's range contains the value
    ExactMatch,
    /// No band contains the value; the last band was used
    LastBandFallback { reason: FallbackReason },
    /// Value above the ceiling; the last band was used with a surcharge
    Surcharge,
}

/// Record of the decisions behind a [`PricingResult`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingTrace {
    pub path: PricingPath,
    /// Position of the pricing band within the table
    pub band_index: usize,
    /// Row of the pricing band in the rate source
    pub source_row: usize,
    pub band_label: String,
    /// Tiers whose base price was unknown and counted as zero
    pub coerced_tiers: Vec<PlanTier>,
}

impl PricingTrace {
    /// True when the result rests on a fallback rather than a clean lookup
    pub fn is_approximate(&self) -> bool {
        matches!(self.path, PricingPath::LastBandFallback { .. }) || !self.coerced_tiers.is_empty()
    }
}

/// Prices for every plan tier of one quote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingResult {
    pub prices: BTreeMap<PlanTier, f64>,
    pub excess_value: f64,
    pub surcharge_percent: u32,
    pub requires_approval: bool,
    pub trace: PricingTrace,
}

impl PricingResult {
    pub fn price(&self, tier: PlanTier) -> f64 {
        self.prices.get(&tier).copied().unwrap_or(0.0)
    }
}

/// Price one vehicle value against a loaded table
pub fn price_vehicle(
    table: &RateTable,
    request: &PricingRequest,
    policy: PricingPolicy,
) -> Result<PricingResult, PricingError> {
    let value = request.vehicle_value;
    if !value.is_finite() || value <= 0.0 {
        return Err(PricingError::InvalidInput { value });
    }

    let surcharge = Surcharge::assess(value);
    let (path, band_index, band) = if surcharge.applies() {
        let band = table.last().ok_or(PricingError::EmptyTable)?;
        (PricingPath::Surcharge, table.len() - 1, band)
    } else {
        match match_band(table, value, policy.no_match)? {
            BandMatch::Exact { index, band } => (PricingPath::ExactMatch, index, band),
            BandMatch::LastBandFallback { index, band, reason } => {
                (PricingPath::LastBandFallback { reason }, index, band)
            }
        }
    };

    let extracted = extract_prices(band, &surcharge, policy.unknown_price)?;
    log::info!(
        "priced {:.2} on band '{}' via {:?} (surcharge {}%)",
        value,
        band.range_label,
        path,
        surcharge.surcharge_percent
    );

    Ok(PricingResult {
        prices: extracted.prices,
        excess_value: surcharge.excess_value,
        surcharge_percent: surcharge.surcharge_percent,
        requires_approval: surcharge.requires_approval,
        trace: PricingTrace {
            path,
            band_index,
            source_row: band.source_row,
            band_label: band.range_label.clone(),
            coerced_tiers: extracted.coerced_tiers,
        },
    })
}

/// Pricing engine over one shared, immutable rate table
#[derive(Debug, Clone)]
pub struct PricingEngine {
    table: Arc<RateTable>,
    policy: PricingPolicy,
}

impl PricingEngine {
    pub fn new(table: impl Into<Arc<RateTable>>) -> Self {
        Self {
            table: table.into(),
            policy: PricingPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: PricingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn price(&self, request: &PricingRequest) -> Result<PricingResult, PricingError> {
        price_vehicle(&self.table, request, self.policy)
    }

    pub fn price_value(&self, vehicle_value: f64) -> Result<PricingResult, PricingError> {
        self.price(&PricingRequest::new(vehicle_value))
    }

    /// Price many values in parallel; results keep input order
    pub fn price_batch(&self, values: &[f64]) -> Vec<Result<PricingResult, PricingError>> {
        values.par_iter().map(|&v| self.price_value(v)).collect()
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }

    pub fn policy(&self) -> PricingPolicy {
        self.policy
    }
}
