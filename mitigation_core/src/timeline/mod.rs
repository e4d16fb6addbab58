//! Timeline - encounter plan with damage, cast and status events
//!
//! Timelines are stored as camelCase JSON, either bare or wrapped in a
//! [`TimelineExport`] envelope.

mod aggregate;

pub use aggregate::calculate_timeline;

use crate::config::{parse_json, ConfigError, EngineConstants};
use crate::party::{PartyState, PlayerState};
use crate::replay::{party_state_at, party_state_from_status_events, CastEvent, StatusEvent};
use crate::skill::SkillCatalog;
use crate::status::StatusCatalog;
use crate::types::{DamageType, Job, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Largest roster a timeline may hold
pub const MAX_PARTY_SIZE: usize = 8;

/// Format version written into exports
pub const EXPORT_VERSION: &str = "1.0";

/// Attack shape of a damage event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageKind {
    #[default]
    Aoe,
    Tankbuster,
    Raidwide,
}

/// A boss hit on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageEvent {
    pub id: String,
    pub name: String,
    /// Seconds
    pub time: f64,
    /// Unmitigated damage
    pub damage: f64,
    #[serde(rename = "type", default)]
    pub kind: DamageKind,
    #[serde(default)]
    pub damage_type: DamageType,
    /// Set for single-target hits; `None` means everyone is hit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_player_id: Option<PlayerId>,
}

impl DamageEvent {
    pub fn new(id: &str, name: &str, time: f64, damage: f64, damage_type: DamageType) -> Self {
        DamageEvent {
            id: id.to_string(),
            name: name.to_string(),
            time,
            damage,
            kind: DamageKind::Aoe,
            damage_type,
            target_player_id: None,
        }
    }

    pub fn with_kind(mut self, kind: DamageKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_target(mut self, target: u32) -> Self {
        self.target_player_id = Some(PlayerId(target));
        self
    }
}

/// Roster entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionPlayer {
    pub id: PlayerId,
    pub job: Job,
    #[serde(default)]
    pub name: String,
}

/// Party roster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub players: Vec<CompositionPlayer>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_player(mut self, id: u32, job: Job, name: &str) -> Self {
        self.players.push(CompositionPlayer {
            id: PlayerId(id),
            job,
            name: name.to_string(),
        });
        self
    }

    pub fn player(&self, id: PlayerId) -> Option<&CompositionPlayer> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.player(id).is_some()
    }

    /// Status-free party with every player at `max_hp`
    pub fn initial_party_state(&self, max_hp: f64) -> PartyState {
        PartyState::new(
            self.players
                .iter()
                .map(|p| PlayerState::new(p.id, p.job, max_hp))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: String,
    pub name: String,
    /// Seconds
    pub start_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_skill: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Encounter {
    pub id: u32,
    pub name: String,
    pub display_name: String,
    pub zone: String,
}

/// A complete mitigation plan for one encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub encounter: Encounter,
    pub composition: Composition,
    #[serde(default)]
    pub phases: Vec<Phase>,
    #[serde(default)]
    pub damage_events: Vec<DamageEvent>,
    #[serde(default)]
    pub cast_events: Vec<CastEvent>,
    #[serde(default)]
    pub status_events: Vec<StatusEvent>,
    /// Statuses come from `status_events` instead of replaying casts
    #[serde(default)]
    pub is_replay_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Timeline {
    pub fn new(id: &str, name: &str, composition: Composition) -> Self {
        Timeline {
            id: id.to_string(),
            name: name.to_string(),
            encounter: Encounter::default(),
            composition,
            phases: Vec::new(),
            damage_events: Vec::new(),
            cast_events: Vec::new(),
            status_events: Vec::new(),
            is_replay_mode: false,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_damage_event(mut self, event: DamageEvent) -> Self {
        self.damage_events.push(event);
        self
    }

    pub fn with_cast_event(mut self, event: CastEvent) -> Self {
        self.cast_events.push(event);
        self
    }

    pub fn with_status_event(mut self, event: StatusEvent) -> Self {
        self.status_events.push(event);
        self
    }

    /// Check roster and event references with the default limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_with(&EngineConstants::default())
    }

    /// Check roster size, id uniqueness and that every referenced player
    /// is in the roster
    pub fn validate_with(&self, constants: &EngineConstants) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::ValidationError(msg));

        let players = &self.composition.players;
        if players.len() > constants.max_party_size {
            return invalid(format!(
                "party has {} players, at most {} allowed",
                players.len(),
                constants.max_party_size
            ));
        }

        let mut player_ids = HashSet::new();
        for player in players {
            if !player_ids.insert(player.id) {
                return invalid(format!("duplicate player id {}", player.id));
            }
        }

        let mut event_ids = HashSet::new();
        for event in &self.damage_events {
            if !event_ids.insert(event.id.as_str()) {
                return invalid(format!("duplicate damage event id {:?}", event.id));
            }
            if !event.time.is_finite() || !event.damage.is_finite() {
                return invalid(format!("damage event {:?} has a non-finite time or damage", event.id));
            }
            if let Some(target) = event.target_player_id {
                if !player_ids.contains(&target) {
                    return invalid(format!("damage event {:?} targets unknown player {}", event.id, target));
                }
            }
        }

        let mut cast_ids = HashSet::new();
        for cast in &self.cast_events {
            if !cast_ids.insert(cast.id.as_str()) {
                return invalid(format!("duplicate cast event id {:?}", cast.id));
            }
            if !cast.timestamp.is_finite() {
                return invalid(format!("cast event {:?} has a non-finite timestamp", cast.id));
            }
            if !player_ids.contains(&cast.player_id) {
                return invalid(format!("cast event {:?} cast by unknown player {}", cast.id, cast.player_id));
            }
            if let Some(target) = cast.target_player_id {
                if !player_ids.contains(&target) {
                    return invalid(format!("cast event {:?} targets unknown player {}", cast.id, target));
                }
            }
        }

        for (i, event) in self.status_events.iter().enumerate() {
            if event.end_time < event.start_time {
                return invalid(format!("status event #{} ends before it starts", i));
            }
        }

        Ok(())
    }

    /// Status-free party with every player at the configured max HP
    pub fn initial_party_state(&self, constants: &EngineConstants) -> PartyState {
        self.composition.initial_party_state(constants.default_max_hp)
    }

    /// Party state at `time`, from casts or from status events depending
    /// on the timeline mode
    pub fn party_state_at(
        &self,
        time: f64,
        skills: &SkillCatalog,
        statuses: &StatusCatalog,
        constants: &EngineConstants,
    ) -> PartyState {
        let initial = self.initial_party_state(constants);
        if self.is_replay_mode {
            party_state_from_status_events(&initial, &self.status_events, statuses, time)
        } else {
            party_state_at(&initial, &self.cast_events, skills, time)
        }
    }

    /// Damage events by ascending time, ties in input order
    pub fn sorted_damage_events(&self) -> Vec<&DamageEvent> {
        let mut events: Vec<&DamageEvent> = self.damage_events.iter().collect();
        events.sort_by(|a, b| a.time.total_cmp(&b.time));
        events
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Envelope for sharing timelines between tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineExport {
    pub version: String,
    pub timeline: Timeline,
    pub exported_at: String,
}

impl TimelineExport {
    pub fn new(timeline: Timeline, exported_at: &str) -> Self {
        TimelineExport {
            version: EXPORT_VERSION.to_string(),
            timeline,
            exported_at: exported_at.to_string(),
        }
    }
}

/// Parse a timeline from JSON, bare or wrapped in an export envelope
pub fn parse_timeline(content: &str) -> Result<Timeline, ConfigError> {
    let value: serde_json::Value = parse_json(content)?;
    if value.get("timeline").is_some() && value.get("version").is_some() {
        let export: TimelineExport = serde_json::from_value(value)?;
        Ok(export.timeline)
    } else {
        Ok(serde_json::from_value(value)?)
    }
}

/// Load and validate a timeline JSON file
pub fn load_timeline(path: &Path) -> Result<Timeline, ConfigError> {
    let content = fs::read_to_string(path)?;
    let timeline = parse_timeline(&content)?;
    timeline.validate()?;
    Ok(timeline)
}
