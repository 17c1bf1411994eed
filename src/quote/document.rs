//! Quote document handed to the document filler

use super::request::QuoteRequest;
use crate::money::format_brl;
use crate::pricing::{PlanTier, PricingResult};
use chrono::{DateTime, Local};
use serde::Serialize;

/// Warning shown on quotes that exceed the surcharge ceiling
pub const APPROVAL_WARNING: &str =
    "Atenção: Esta cotação está sujeita à aprovação da diretoria devido ao valor do veículo.";

/// One plan line of the quote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceLine {
    pub tier: PlanTier,
    pub label: &'static str,
    pub amount: f64,
    /// Amount formatted as `R$ 1.234,56`
    pub display: String,
}

/// Everything the quote document shows
#[derive(Debug, Clone, Serialize)]
pub struct QuoteDocument {
    pub generated_at: DateTime<Local>,
    pub client_name: String,
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub category: String,
    pub vehicle_value: f64,
    pub vehicle_value_display: String,
    pub prices: Vec<PriceLine>,
    pub excess_value: f64,
    pub surcharge_percent: u32,
    pub requires_approval: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<&'static str>,
    pub pricing: PricingResult,
}

impl QuoteDocument {
    pub fn build(request: &QuoteRequest, pricing: PricingResult, generated_at: DateTime<Local>) -> Self {
        let prices = PlanTier::ALL
            .iter()
            .map(|&tier| {
                let amount = pricing.price(tier);
                PriceLine {
                    tier,
                    label: tier.label(),
                    amount,
                    display: format_brl(amount),
                }
            })
            .collect();

        Self {
            generated_at,
            client_name: request.client_name.clone(),
            plate: request.plate.clone(),
            brand: request.brand.clone(),
            model: request.model.clone(),
            year: request.year,
            category: request.category.clone(),
            vehicle_value: request.vehicle_value,
            vehicle_value_display: format_brl(request.vehicle_value),
            prices,
            excess_value: pricing.excess_value,
            surcharge_percent: pricing.surcharge_percent,
            requires_approval: pricing.requires_approval,
            warning: pricing.requires_approval.then_some(APPROVAL_WARNING),
            pricing,
        }
    }

    /// Output file stem: `cotacao_<plate>_<timestamp>`
    pub fn file_stem(&self) -> String {
        quote_file_stem(&self.plate, &self.generated_at.format("%Y%m%d%H%M%S").to_string())
    }
}

/// Plate made safe for a file name: spaces and slashes become `_`, dashes go
pub fn sanitize_plate(plate: &str) -> String {
    plate
        .trim()
        .chars()
        .filter(|&c| c != '-')
        .map(|c| if c == ' ' || c == '/' || c == '\\' { '_' } else { c })
        .collect()
}

pub fn quote_file_stem(plate: &str, unique: &str) -> String {
    format!("cotacao_{}_{}", sanitize_plate(plate), unique)
}
