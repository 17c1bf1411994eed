//! Vehicle Quote - rate table pricing for vehicle protection plans
//!
//! This library provides:
//! - Rate table loading from hand-maintained spreadsheets (header and columns found by keyword)
//! - Band matching by vehicle value, with named fallback policies
//! - The above-ceiling surcharge rule and approval flag
//! - Plan price extraction and quote document assembly

pub mod config;
pub mod error;
pub mod money;
pub mod pricing;
pub mod quote;
pub mod rates;

// Re-export commonly used types
pub use config::QuoteConfig;
pub use error::{ErrorKind, PricingError};
pub use pricing::{PlanTier, PricingEngine, PricingPolicy, PricingRequest, PricingResult, PricingTrace};
pub use quote::{QuoteDocument, QuoteForm, QuoteRequest};
pub use rates::{load_rate_table, Band, RateTable, RateTableCache};
