//! Above-ceiling surcharge rule
//!
//! Vehicles worth more than the ceiling are priced on the top band with one
//! percentage point added per full 1,000 of value above the ceiling, and the
//! quote is held for management approval.

use serde::Serialize;

/// Highest vehicle value priced directly from the table
pub const SURCHARGE_CEILING: f64 = 100_000.0;

/// Excess value that adds one percentage point
pub const SURCHARGE_STEP: f64 = 1_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Surcharge {
    /// Value above the ceiling, 0 when not above
    pub excess_value: f64,
    /// Whole percentage points added to surchargeable tiers
    pub surcharge_percent: u32,
    pub requires_approval: bool,
}

impl Surcharge {
    pub fn none() -> Self {
        Self {
            excess_value: 0.0,
            surcharge_percent: 0,
            requires_approval: false,
        }
    }

    /// Apply the ceiling rule; the comparison is strict, so a value equal to
    /// the ceiling is not surcharged
    pub fn assess(vehicle_value: f64) -> Self {
        if vehicle_value > SURCHARGE_CEILING {
            let excess_value = vehicle_value - SURCHARGE_CEILING;
            let surcharge_percent = (excess_value / SURCHARGE_STEP).floor() as u32;
            log::info!(
                "vehicle value {:.2} above ceiling: excess {:.2}, surcharge {}%",
                vehicle_value,
                excess_value,
                surcharge_percent
            );
            Self {
                excess_value,
                surcharge_percent,
                requires_approval: true,
            }
        } else {
            Self::none()
        }
    }

    pub fn applies(&self) -> bool {
        self.requires_approval
    }

    /// Multiplier for surchargeable tiers
    pub fn factor(&self) -> f64 {
        if self.requires_approval {
            1.0 + self.surcharge_percent as f64 / 100.0
        } else {
            1.0
        }
    }
}
