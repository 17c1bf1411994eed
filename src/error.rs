//! Error taxonomy for rate table loading and pricing

use crate::pricing::PlanTier;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single pricing request
///
/// Every variant is terminal for the request; retrying the same input against
/// the same rate source yields the same error.
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("rate source {path:?} could not be read: {message}")]
    SourceUnavailable { path: PathBuf, message: String },

    #[error("no header row found (looked for \"valor do veículo\", then \"plano ouro\")")]
    SchemaNotRecognized,

    #[error("header row {header_row} has no vehicle value range column")]
    ColumnMappingIncomplete { header_row: usize },

    #[error("rate table has no usable bands")]
    EmptyTable,

    #[error("vehicle value must be positive, got {value}")]
    InvalidInput { value: f64 },

    #[error("vehicle value {value:.2} is above the table maximum of {covered_max:.2}")]
    ValueOutOfRange { value: f64, covered_max: f64 },

    #[error("no band covers vehicle value {value:.2}")]
    NoMatchingBand { value: f64 },

    #[error("band '{band_label}' has no usable price for {tier}")]
    UnknownPrice { tier: PlanTier, band_label: String },
}

/// Payload-free view of [`PricingError`] for callers that only branch on the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SourceUnavailable,
    SchemaNotRecognized,
    ColumnMappingIncomplete,
    EmptyTable,
    InvalidInput,
    ValueOutOfRange,
    NoMatchingBand,
    UnknownPrice,
}

impl PricingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PricingError::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            PricingError::SchemaNotRecognized => ErrorKind::SchemaNotRecognized,
            PricingError::ColumnMappingIncomplete { .. } => ErrorKind::ColumnMappingIncomplete,
            PricingError::EmptyTable => ErrorKind::EmptyTable,
            PricingError::InvalidInput { .. } => ErrorKind::InvalidInput,
            PricingError::ValueOutOfRange { .. } => ErrorKind::ValueOutOfRange,
            PricingError::NoMatchingBand { .. } => ErrorKind::NoMatchingBand,
            PricingError::UnknownPrice { .. } => ErrorKind::UnknownPrice,
        }
    }

    pub(crate) fn source_unavailable(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        PricingError::SourceUnavailable {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
