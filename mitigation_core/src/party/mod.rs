//! PartyState - snapshot of every entity's statuses at an instant
//!
//! Every transformation (skill use, damage calculation, pruning) returns a
//! new `PartyState`; nothing here mutates a shared "current" state.

use crate::status::MitigationStatus;
use crate::types::{Job, PlayerId, StatusId, StatusInstanceId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One roster member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub job: Job,
    pub current_hp: f64,
    pub max_hp: f64,
    #[serde(default)]
    pub statuses: Vec<MitigationStatus>,
}

impl PlayerState {
    /// Create a player at full HP with no statuses
    pub fn new(id: PlayerId, job: Job, max_hp: f64) -> Self {
        PlayerState {
            id,
            job,
            current_hp: max_hp,
            max_hp,
            statuses: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: MitigationStatus) -> Self {
        self.statuses.push(status);
        self
    }

    /// First instance of a status id that is active at `time`
    pub fn active_status(&self, status_id: StatusId, time: f64) -> Option<&MitigationStatus> {
        self.statuses
            .iter()
            .find(|s| s.status_id == status_id && s.is_active_at(time))
    }

    pub fn has_active_status(&self, status_id: StatusId, time: f64) -> bool {
        self.active_status(status_id, time).is_some()
    }
}

/// The single virtual boss entity holding enemy-side debuffs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnemyState {
    #[serde(default)]
    pub statuses: Vec<MitigationStatus>,
}

/// Party snapshot threaded through executors and the calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyState {
    pub players: Vec<PlayerState>,
    #[serde(default)]
    pub enemy: EnemyState,
    /// Seconds
    #[serde(default)]
    pub timestamp: f64,
    /// Next status instance id to hand out
    #[serde(default)]
    next_instance: u64,
}

impl PartyState {
    /// Create a party from its players, with no statuses anywhere
    pub fn new(players: Vec<PlayerState>) -> Self {
        PartyState {
            players,
            enemy: EnemyState::default(),
            timestamp: 0.0,
            next_instance: 0,
        }
    }

    /// Look up a player by id
    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.id == id)
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    /// Reserve a fresh instance id.
    ///
    /// Ids are unique within one state lineage and deterministic, so two
    /// replays of the same log produce identical snapshots.
    pub fn allocate_instance_id(&mut self) -> StatusInstanceId {
        let id = StatusInstanceId(self.next_instance);
        self.next_instance += 1;
        id
    }

    /// Number of instance ids handed out so far
    pub fn allocated_instances(&self) -> u64 {
        self.next_instance
    }

    /// Make sure ids below `count` are never handed out
    pub(crate) fn reserve_instances(&mut self, count: u64) {
        self.next_instance = self.next_instance.max(count);
    }

    /// Same roster with every status list emptied
    pub fn without_statuses(&self) -> PartyState {
        PartyState {
            players: self
                .players
                .iter()
                .map(|p| PlayerState {
                    statuses: Vec::new(),
                    ..p.clone()
                })
                .collect(),
            enemy: EnemyState::default(),
            timestamp: self.timestamp,
            next_instance: self.next_instance,
        }
    }

    /// View at `time`: statuses whose `end_time < time` are dropped
    pub fn pruned(&self, time: f64) -> PartyState {
        let keep = |statuses: &[MitigationStatus]| -> Vec<MitigationStatus> {
            statuses
                .iter()
                .filter(|s| !s.is_expired_at(time))
                .cloned()
                .collect()
        };

        PartyState {
            players: self
                .players
                .iter()
                .map(|p| PlayerState {
                    id: p.id,
                    job: p.job,
                    current_hp: p.current_hp,
                    max_hp: p.max_hp,
                    statuses: keep(&p.statuses),
                })
                .collect(),
            enemy: EnemyState {
                statuses: keep(&self.enemy.statuses),
            },
            timestamp: time,
            next_instance: self.next_instance,
        }
    }

    /// Statuses active at `time` on the party and on the enemy, for display.
    ///
    /// A status id shared by several players is listed once.
    pub fn active_statuses_at(&self, time: f64) -> Vec<&MitigationStatus> {
        let mut out = Vec::new();

        let mut seen = HashSet::new();
        for status in self.players.iter().flat_map(|p| p.statuses.iter()) {
            if status.is_active_at(time) && seen.insert(status.status_id) {
                out.push(status);
            }
        }

        let mut seen = HashSet::new();
        for status in &self.enemy.statuses {
            if status.is_active_at(time) && seen.insert(status.status_id) {
                out.push(status);
            }
        }

        out
    }

    /// Total number of status instances held by anyone
    pub fn status_count(&self) -> usize {
        self.players.iter().map(|p| p.statuses.len()).sum::<usize>() + self.enemy.statuses.len()
    }

    /// Copy with the given instances' `remaining_barrier` replaced.
    ///
    /// Players without an affected status are carried over as-is.
    pub fn with_barriers(&self, updates: &HashMap<StatusInstanceId, f64>) -> PartyState {
        if updates.is_empty() {
            return self.clone();
        }

        let players = self
            .players
            .iter()
            .map(|p| {
                if !p.statuses.iter().any(|s| updates.contains_key(&s.instance_id)) {
                    return p.clone();
                }
                let statuses = p
                    .statuses
                    .iter()
                    .map(|s| match updates.get(&s.instance_id) {
                        Some(&barrier) => MitigationStatus {
                            remaining_barrier: Some(barrier.max(0.0)),
                            ..s.clone()
                        },
                        None => s.clone(),
                    })
                    .collect();
                PlayerState {
                    statuses,
                    ..p.clone()
                }
            })
            .collect();

        PartyState {
            players,
            ..self.clone()
        }
    }
}
