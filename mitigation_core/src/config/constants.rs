//! Engine constants configuration

use serde::{Deserialize, Serialize};

/// Tunable engine constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConstants {
    /// Max HP given to every roster member when a timeline is loaded
    #[serde(default = "default_max_hp")]
    pub default_max_hp: f64,
    /// Largest roster a timeline may declare
    #[serde(default = "default_max_party_size")]
    pub max_party_size: usize,
}

impl Default for EngineConstants {
    fn default() -> Self {
        EngineConstants {
            default_max_hp: default_max_hp(),
            max_party_size: default_max_party_size(),
        }
    }
}

fn default_max_hp() -> f64 {
    100_000.0
}

fn default_max_party_size() -> usize {
    crate::timeline::MAX_PARTY_SIZE
}
