//! CalculationResult - outcome of mitigating one damage event

use crate::party::PartyState;
use crate::status::MitigationStatus;
use serde::{Deserialize, Serialize};

/// Result of running one hit through the active statuses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Raw damage as given
    pub original_damage: f64,
    /// Damage after multipliers and shields, rounded, never negative
    pub final_damage: f64,
    /// Share of the original damage prevented, one decimal
    pub mitigation_percentage: f64,
    /// Multiplier statuses first, then the shields that absorbed damage
    pub applied_statuses: Vec<MitigationStatus>,
    /// Input state with consumed barriers lowered
    pub updated_party_state: PartyState,

    // === Breakdown ===
    /// Product of every applied percentage factor
    pub total_multiplier: f64,
    /// Damage soaked by shields
    pub absorbed_by_shields: f64,
}

impl CalculationResult {
    /// Result for a hit nothing could mitigate
    pub fn unmitigated(original_damage: f64, party_state: PartyState) -> Self {
        CalculationResult {
            original_damage,
            final_damage: original_damage.max(0.0),
            mitigation_percentage: 0.0,
            applied_statuses: Vec::new(),
            updated_party_state: party_state,
            total_multiplier: 1.0,
            absorbed_by_shields: 0.0,
        }
    }

    /// Damage prevented in absolute terms
    pub fn mitigated_amount(&self) -> f64 {
        (self.original_damage.max(0.0) - self.final_damage).max(0.0)
    }

    pub fn is_fully_absorbed(&self) -> bool {
        self.original_damage > 0.0 && self.final_damage <= 0.0
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = vec![format!(
            "{:.0} -> {:.0} ({:.1}% mitigated)",
            self.original_damage, self.final_damage, self.mitigation_percentage
        )];

        if self.total_multiplier < 1.0 {
            parts.push(format!("x{:.3} from statuses", self.total_multiplier));
        }

        if self.absorbed_by_shields > 0.0 {
            parts.push(format!("{:.0} absorbed by shields", self.absorbed_by_shields));
        }

        parts.join(", ")
    }
}
