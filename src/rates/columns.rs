//! Header discovery and keyword-based column mapping
//!
//! Rate tables are maintained by hand, so neither the header row position
//! nor the column order is fixed. The header is found by scanning for known
//! labels and each header cell is assigned to a target by keyword.

use super::cell::{Cell, Row};
use crate::pricing::PlanTier;
use serde::Serialize;
use std::collections::BTreeMap;

const VEHICLE_VALUE_MARKERS: [&str; 2] = ["valor do veículo", "valor do veiculo"];
const GOLD_PLAN_MARKER: &str = "plano ouro";

/// How the header row was recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderRule {
    /// A cell contains "valor do veículo"
    VehicleValueLabel,
    /// No vehicle value label anywhere; a cell reads exactly "plano ouro"
    GoldPlanFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderMatch {
    pub row: usize,
    pub rule: HeaderRule,
}

/// Locate the header row, scanning top to bottom
pub fn find_header_row(rows: &[Row]) -> Option<HeaderMatch> {
    let by_value_label = rows.iter().position(|row| {
        row.iter().filter_map(Cell::as_text).any(|text| {
            let lower = text.to_lowercase();
            VEHICLE_VALUE_MARKERS.iter().any(|m| lower.contains(m))
        })
    });
    if let Some(row) = by_value_label {
        return Some(HeaderMatch {
            row,
            rule: HeaderRule::VehicleValueLabel,
        });
    }

    rows.iter()
        .position(|row| {
            row.iter()
                .filter_map(Cell::as_text)
                .any(|text| text.trim().to_lowercase() == GOLD_PLAN_MARKER)
        })
        .map(|row| HeaderMatch {
            row,
            rule: HeaderRule::GoldPlanFallback,
        })
}

/// Column a header cell can be assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnTarget {
    Range,
    Adhesion,
    Gold,
    Diamond,
    Platinum,
    Heavy,
}

impl ColumnTarget {
    /// Assignment priority: a header is given to the first unmapped target
    /// in this order whose keywords it contains
    pub const ALL: [ColumnTarget; 6] = [
        ColumnTarget::Range,
        ColumnTarget::Adhesion,
        ColumnTarget::Gold,
        ColumnTarget::Diamond,
        ColumnTarget::Platinum,
        ColumnTarget::Heavy,
    ];

    /// Upper-case keywords matched by containment
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            ColumnTarget::Range => &["VALOR", "VEÍCULO", "VEICULO"],
            ColumnTarget::Adhesion => &["ADESAO", "ADESÃO"],
            ColumnTarget::Gold => &["OURO"],
            ColumnTarget::Diamond => &["DIAMANTE"],
            ColumnTarget::Platinum => &["PLATINUM"],
            ColumnTarget::Heavy => &["PESADOS"],
        }
    }

    pub fn matches(self, header_upper: &str) -> bool {
        self.keywords().iter().any(|k| header_upper.contains(k))
    }

    pub fn tier(self) -> Option<PlanTier> {
        match self {
            ColumnTarget::Range => None,
            ColumnTarget::Adhesion => Some(PlanTier::Adhesion),
            ColumnTarget::Gold => Some(PlanTier::Gold),
            ColumnTarget::Diamond => Some(PlanTier::Diamond),
            ColumnTarget::Platinum => Some(PlanTier::Platinum),
            ColumnTarget::Heavy => Some(PlanTier::Heavy),
        }
    }

    pub fn for_tier(tier: PlanTier) -> Self {
        match tier {
            PlanTier::Adhesion => ColumnTarget::Adhesion,
            PlanTier::Gold => ColumnTarget::Gold,
            PlanTier::Diamond => ColumnTarget::Diamond,
            PlanTier::Platinum => ColumnTarget::Platinum,
            PlanTier::Heavy => ColumnTarget::Heavy,
        }
    }
}

/// Mapping outcome for one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ColumnStatus {
    Mapped { column: usize },
    Unmapped,
    /// Mapped to `column`, but later headers in `also_matched` carried the
    /// same keywords and were left unassigned
    Ambiguous { column: usize, also_matched: Vec<usize> },
}

impl ColumnStatus {
    pub fn column(&self) -> Option<usize> {
        match self {
            ColumnStatus::Mapped { column } | ColumnStatus::Ambiguous { column, .. } => Some(*column),
            ColumnStatus::Unmapped => None,
        }
    }
}

/// Result of mapping a header row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnMapping {
    assigned: BTreeMap<ColumnTarget, usize>,
    duplicates: BTreeMap<ColumnTarget, Vec<usize>>,
    unmapped_columns: Vec<usize>,
}

impl ColumnMapping {
    pub fn status(&self, target: ColumnTarget) -> ColumnStatus {
        match (self.assigned.get(&target), self.duplicates.get(&target)) {
            (Some(&column), Some(others)) => ColumnStatus::Ambiguous {
                column,
                also_matched: others.clone(),
            },
            (Some(&column), None) => ColumnStatus::Mapped { column },
            (None, _) => ColumnStatus::Unmapped,
        }
    }

    pub fn column(&self, target: ColumnTarget) -> Option<usize> {
        self.assigned.get(&target).copied()
    }

    /// Header positions that matched no target
    pub fn unmapped_columns(&self) -> &[usize] {
        &self.unmapped_columns
    }

    pub fn is_ambiguous(&self) -> bool {
        !self.duplicates.is_empty()
    }
}

/// Assign header cells to targets by keyword
///
/// Each header goes to the first target (in [`ColumnTarget::ALL`] order)
/// that is still unmapped and whose keywords it contains. Column positions
/// are kept as-is, so unmapped columns never shift mapped ones.
pub fn map_columns(header: &[Cell]) -> ColumnMapping {
    let mut mapping = ColumnMapping::default();

    for (idx, cell) in header.iter().enumerate() {
        let upper = cell.to_string().to_uppercase();
        let mut taken_matches = Vec::new();
        let mut assigned = false;

        for target in ColumnTarget::ALL {
            if !target.matches(&upper) {
                continue;
            }
            if mapping.assigned.contains_key(&target) {
                taken_matches.push(target);
                continue;
            }
            log::debug!("column {} '{}' mapped to {:?}", idx, cell, target);
            mapping.assigned.insert(target, idx);
            assigned = true;
            break;
        }

        if !assigned {
            for target in taken_matches {
                mapping.duplicates.entry(target).or_default().push(idx);
            }
            if !cell.is_empty() {
                log::debug!("column {} '{}' not mapped", idx, cell);
            }
            mapping.unmapped_columns.push(idx);
        }
    }

    mapping
}
