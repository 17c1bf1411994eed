//! Protection plan tiers quoted for every vehicle

use serde::{Deserialize, Serialize};
use std::fmt;

/// Plan tier; the set is fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    /// One-off enrollment fee, never surcharged
    Adhesion,
    Gold,
    Diamond,
    Platinum,
    /// Plan for heavy vehicles
    Heavy,
}

impl PlanTier {
    pub const ALL: [PlanTier; 5] = [
        PlanTier::Adhesion,
        PlanTier::Gold,
        PlanTier::Diamond,
        PlanTier::Platinum,
        PlanTier::Heavy,
    ];

    /// Customer-facing plan name
    pub fn label(self) -> &'static str {
        match self {
            PlanTier::Adhesion => "Adesão",
            PlanTier::Gold => "Plano Ouro",
            PlanTier::Diamond => "Diamante",
            PlanTier::Platinum => "Platinum",
            PlanTier::Heavy => "Pesados",
        }
    }

    pub fn is_surchargeable(self) -> bool {
        self != PlanTier::Adhesion
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_adhesion_is_exempt() {
        let exempt: Vec<_> = PlanTier::ALL.iter().filter(|t| !t.is_surchargeable()).collect();
        assert_eq!(exempt, vec![&PlanTier::Adhesion]);
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(serde_json::to_string(&PlanTier::Gold).unwrap(), "\"gold\"");
        assert_eq!(serde_json::to_string(&PlanTier::Heavy).unwrap(), "\"heavy\"");
    }
}
