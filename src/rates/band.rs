//! Price bands: one row of the rate table

use crate::money::parse_brl_amount;
use crate::pricing::PlanTier;
use serde::Serialize;
use std::collections::BTreeMap;

/// Inclusive vehicle value range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Parse state of a band's range label
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum BandRange {
    Valid { range: ValueRange },
    /// Both sides parsed but min > max; never matched
    Inverted { range: ValueRange },
    /// Label is not of the form `"<min> - <max>"`
    Malformed,
}

impl BandRange {
    /// Parse a label like `"R$ 10.000,01 - R$ 20.000,00"`
    pub fn parse(label: &str) -> Self {
        let Some((min_text, max_text)) = split_label(label) else {
            return BandRange::Malformed;
        };
        match (parse_brl_amount(min_text), parse_brl_amount(max_text)) {
            (Some(min), Some(max)) if min <= max => BandRange::Valid {
                range: ValueRange { min, max },
            },
            (Some(min), Some(max)) => BandRange::Inverted {
                range: ValueRange { min, max },
            },
            _ => BandRange::Malformed,
        }
    }
}

/// Split on the single dash separating the two bounds
fn split_label(label: &str) -> Option<(&str, &str)> {
    let mut parts = label.split('-');
    let first = parts.next()?;
    let second = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((first, second))
}

/// Upper bound of a label, read from its right-hand side alone
///
/// Used when checking whether a value lies beyond the table; it succeeds
/// even if the left-hand side of the label is garbled.
pub fn label_upper_bound(label: &str) -> Option<f64> {
    split_label(label).and_then(|(_, max_text)| parse_brl_amount(max_text))
}

/// One price band of the rate table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    /// Label exactly as written in the source
    pub range_label: String,
    pub range: BandRange,
    /// Zero-based row index in the source
    pub source_row: usize,
    /// Known base prices; a tier absent here has an unknown price
    base_prices: BTreeMap<PlanTier, f64>,
}

impl Band {
    pub fn new(range_label: impl Into<String>, source_row: usize) -> Self {
        let range_label = range_label.into();
        Self {
            range: BandRange::parse(&range_label),
            range_label,
            source_row,
            base_prices: BTreeMap::new(),
        }
    }

    pub fn with_price(mut self, tier: PlanTier, price: f64) -> Self {
        self.base_prices.insert(tier, price);
        self
    }

    pub(crate) fn set_price(&mut self, tier: PlanTier, price: f64) {
        self.base_prices.insert(tier, price);
    }

    /// Range usable for matching; `None` for malformed or inverted labels
    pub fn range(&self) -> Option<ValueRange> {
        match self.range {
            BandRange::Valid { range } => Some(range),
            _ => None,
        }
    }

    pub fn range_min(&self) -> Option<f64> {
        self.range().map(|r| r.min)
    }

    pub fn range_max(&self) -> Option<f64> {
        self.range().map(|r| r.max)
    }

    pub fn upper_bound(&self) -> Option<f64> {
        label_upper_bound(&self.range_label)
    }

    pub fn base_price(&self, tier: PlanTier) -> Option<f64> {
        self.base_prices.get(&tier).copied()
    }

    pub fn adhesion_fee(&self) -> Option<f64> {
        self.base_price(PlanTier::Adhesion)
    }

    pub fn plan_prices(&self) -> &BTreeMap<PlanTier, f64> {
        &self.base_prices
    }
}
