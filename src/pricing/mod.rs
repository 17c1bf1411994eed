//! Band matching, surcharge and price extraction

mod engine;
mod extractor;
mod matcher;
mod surcharge;
mod tier;
pub mod policy;

pub use engine::{price_vehicle, PricingEngine, PricingPath, PricingRequest, PricingResult, PricingTrace};
pub use extractor::{extract_prices, ExtractedPrices};
pub use matcher::{match_band, BandMatch, FallbackReason};
pub use policy::{NoMatchPolicy, PricingPolicy, UnknownPricePolicy};
pub use surcharge::{Surcharge, SURCHARGE_CEILING, SURCHARGE_STEP};
pub use tier::PlanTier;
