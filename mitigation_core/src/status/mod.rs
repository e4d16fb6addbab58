//! Status effects - catalog metadata and applied instances

mod catalog;

pub use catalog::StatusCatalog;

use crate::types::{ActionId, DamageType, PlayerId, StatusId, StatusInstanceId};
use serde::{Deserialize, Serialize};

/// How a status reduces incoming damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Percentage reduction, stacked multiplicatively
    Multiplier,
    /// Barrier that absorbs a flat amount of damage
    Absorbed,
}

/// Per damage type multiplicative factors, in [0, 1] for reductions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamagePerformance {
    #[serde(default = "default_factor")]
    pub physics: f64,
    #[serde(default = "default_factor")]
    pub magic: f64,
    #[serde(default = "default_factor")]
    pub darkness: f64,
}

fn default_factor() -> f64 {
    1.0
}

impl Default for DamagePerformance {
    fn default() -> Self {
        DamagePerformance {
            physics: 1.0,
            magic: 1.0,
            darkness: 1.0,
        }
    }
}

impl DamagePerformance {
    /// Same factor for every damage type
    pub fn uniform(factor: f64) -> Self {
        DamagePerformance {
            physics: factor,
            magic: factor,
            darkness: factor,
        }
    }

    /// Factor applied to a hit of the given type
    pub fn for_damage_type(&self, damage_type: DamageType) -> f64 {
        match damage_type {
            DamageType::Physical => self.physics,
            DamageType::Magical => self.magic,
            DamageType::Special => self.darkness,
        }
    }
}

/// Immutable catalog entry describing a status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMetadata {
    pub id: StatusId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: StatusKind,
    #[serde(default)]
    pub performance: DamagePerformance,
    /// Whether the status sits on the party (true) or the boss (false)
    #[serde(default = "default_friendly")]
    pub is_friendly: bool,
}

fn default_friendly() -> bool {
    true
}

impl StatusMetadata {
    pub fn multiplier(id: u32, name: &str, performance: DamagePerformance, is_friendly: bool) -> Self {
        StatusMetadata {
            id: StatusId(id),
            name: name.to_string(),
            kind: StatusKind::Multiplier,
            performance,
            is_friendly,
        }
    }

    pub fn absorbed(id: u32, name: &str) -> Self {
        StatusMetadata {
            id: StatusId(id),
            name: name.to_string(),
            kind: StatusKind::Absorbed,
            performance: DamagePerformance::default(),
            is_friendly: true,
        }
    }

    pub fn is_multiplier(&self) -> bool {
        self.kind == StatusKind::Multiplier
    }

    pub fn is_absorbed(&self) -> bool {
        self.kind == StatusKind::Absorbed
    }
}

/// A single applied status instance on a player or the enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationStatus {
    pub instance_id: StatusInstanceId,
    pub status_id: StatusId,
    /// Seconds
    pub start_time: f64,
    /// Seconds, inclusive
    pub end_time: f64,
    /// Barrier left; only meaningful for absorbed statuses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_barrier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_action_id: Option<ActionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_player_id: Option<PlayerId>,
}

impl MitigationStatus {
    /// Create a status covering `[start_time, start_time + duration]`
    pub fn new(instance_id: StatusInstanceId, status_id: StatusId, start_time: f64, duration: f64) -> Self {
        MitigationStatus {
            instance_id,
            status_id,
            start_time,
            end_time: start_time + duration,
            remaining_barrier: None,
            source_action_id: None,
            source_player_id: None,
        }
    }

    pub fn with_barrier(mut self, barrier: f64) -> Self {
        self.remaining_barrier = Some(barrier.max(0.0));
        self
    }

    pub fn with_source_action(mut self, action_id: ActionId) -> Self {
        self.source_action_id = Some(action_id);
        self
    }

    pub fn with_source_player(mut self, player_id: PlayerId) -> Self {
        self.source_player_id = Some(player_id);
        self
    }

    /// Closed interval on both ends
    pub fn is_active_at(&self, time: f64) -> bool {
        self.start_time <= time && time <= self.end_time
    }

    /// Expired statuses are dropped from views, never from the log
    pub fn is_expired_at(&self, time: f64) -> bool {
        self.end_time < time
    }

    pub fn has_barrier(&self) -> bool {
        self.remaining_barrier.is_some_and(|b| b > 0.0)
    }

    /// Barrier left, zero when unset
    pub fn barrier(&self) -> f64 {
        self.remaining_barrier.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(start: f64, end: f64) -> MitigationStatus {
        MitigationStatus::new(StatusInstanceId(0), StatusId(1191), start, end - start)
    }

    #[test]
    fn test_active_window_is_inclusive() {
        let s = status(10.0, 20.0);
        assert!(s.is_active_at(10.0));
        assert!(s.is_active_at(20.0));
        assert!(!s.is_active_at(9.0));
        assert!(!s.is_active_at(21.0));
    }

    #[test]
    fn test_expiry() {
        let s = status(10.0, 20.0);
        assert!(!s.is_expired_at(20.0));
        assert!(s.is_expired_at(20.5));
    }

    #[test]
    fn test_barrier_clamped() {
        let s = status(0.0, 10.0).with_barrier(-50.0);
        assert_eq!(s.remaining_barrier, Some(0.0));
        assert!(!s.has_barrier());

        let s = status(0.0, 10.0).with_barrier(500.0);
        assert!(s.has_barrier());
        assert!((s.barrier() - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_performance_for_damage_type() {
        let perf = DamagePerformance {
            physics: 0.9,
            magic: 0.95,
            darkness: 0.8,
        };
        assert!((perf.for_damage_type(DamageType::Physical) - 0.9).abs() < f64::EPSILON);
        assert!((perf.for_damage_type(DamageType::Magical) - 0.95).abs() < f64::EPSILON);
        assert!((perf.for_damage_type(DamageType::Special) - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_metadata() {
        let toml = r#"
id = 1195
name = "Feint"
type = "multiplier"
is_friendly = false

[performance]
physics = 0.9
magic = 0.95
"#;
        let meta: StatusMetadata = toml::from_str(toml).unwrap();
        assert_eq!(meta.id, StatusId(1195));
        assert!(meta.is_multiplier());
        assert!(!meta.is_friendly);
        assert!((meta.performance.darkness - 1.0).abs() < f64::EPSILON);
    }
}
