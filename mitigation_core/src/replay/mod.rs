//! Replay - reconstruct the party state at an instant from the cast log
//!
//! The cast log is folded through each skill's executor in timestamp order
//! (ties keep log order). Expired statuses are dropped from the resulting
//! view only; the log itself is never modified.

mod status_events;

pub use status_events::{party_state_from_status_events, StatusEvent};

use crate::executor::ActionExecutionContext;
use crate::party::PartyState;
use crate::skill::SkillCatalog;
use crate::types::{ActionId, Job, PlayerId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One skill use on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastEvent {
    pub id: String,
    pub action_id: ActionId,
    /// Seconds
    pub timestamp: f64,
    /// Caster
    pub player_id: PlayerId,
    pub job: Job,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_player_id: Option<PlayerId>,
}

impl CastEvent {
    pub fn new(id: &str, action_id: u32, timestamp: f64, player_id: u32, job: Job) -> Self {
        CastEvent {
            id: id.to_string(),
            action_id: ActionId(action_id),
            timestamp,
            player_id: PlayerId(player_id),
            job,
            target_player_id: None,
        }
    }

    pub fn with_target(mut self, target: u32) -> Self {
        self.target_player_id = Some(PlayerId(target));
        self
    }
}

/// Party state as of `time`, replayed from scratch.
///
/// Casts with `timestamp <= time` are applied; statuses with
/// `end_time < time` are dropped from the result.
pub fn party_state_at(
    initial: &PartyState,
    casts: &[CastEvent],
    skills: &SkillCatalog,
    time: f64,
) -> PartyState {
    let mut cursor = ReplayCursor::new(initial, casts);
    cursor.advance_to(time, skills);
    cursor.into_state()
}

/// Incremental fold over a cast log for non-decreasing query times
#[derive(Debug, Clone)]
pub struct ReplayCursor<'a> {
    casts: Vec<&'a CastEvent>,
    next: usize,
    state: PartyState,
}

impl<'a> ReplayCursor<'a> {
    /// Start from `initial` with all statuses cleared
    pub fn new(initial: &PartyState, casts: &'a [CastEvent]) -> Self {
        let mut sorted: Vec<&CastEvent> = casts.iter().collect();
        // Stable: equal timestamps keep log order
        sorted.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

        ReplayCursor {
            casts: sorted,
            next: 0,
            state: initial.without_statuses(),
        }
    }

    /// Apply every pending cast at or before `time`, then drop expired statuses
    pub fn advance_to(&mut self, time: f64, skills: &SkillCatalog) -> &PartyState {
        while let Some(cast) = self.casts.get(self.next) {
            if cast.timestamp > time {
                break;
            }
            self.next += 1;

            let Some(action) = skills.get(cast.action_id) else {
                debug!(action = %cast.action_id, cast = %cast.id, "skipping cast of unknown action");
                continue;
            };

            let ctx = ActionExecutionContext::new(cast.action_id, cast.timestamp, &self.state)
                .with_target(cast.target_player_id)
                .with_source(Some(cast.player_id));
            self.state = action.execute(&ctx);
        }

        self.state = self.state.pruned(time);
        &self.state
    }

    pub fn state(&self) -> &PartyState {
        &self.state
    }

    pub fn into_state(self) -> PartyState {
        self.state
    }

    /// Continue folding from `state`, e.g. after shields were consumed
    pub fn replace_state(&mut self, state: PartyState) {
        self.state = state;
    }

    /// Casts not yet applied
    pub fn pending(&self) -> usize {
        self.casts.len() - self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{enemy_debuff, friendly_buff, shield, Effect};
    use crate::party::PlayerState;
    use crate::skill::MitigationAction;
    use crate::types::StatusId;

    fn party() -> PartyState {
        PartyState::new(vec![
            PlayerState::new(PlayerId(1), Job::Pld, 100000.0),
            PlayerState::new(PlayerId(2), Job::Sch, 80000.0),
        ])
    }

    fn skills() -> SkillCatalog {
        SkillCatalog::new()
            .with_action(MitigationAction::new(7535, "Reprisal", vec![Job::Pld], 15.0, 60.0, enemy_debuff(1193, 15.0)))
            .with_action(MitigationAction::new(7531, "Rampart", vec![Job::Pld], 20.0, 90.0, friendly_buff(1191, 20.0, false)))
            .with_action(MitigationAction::new(185, "Adloquium", vec![Job::Sch], 30.0, 2.5, shield(297, 30.0, false, 0.125)))
            .with_action(MitigationAction::new(
                3585,
                "Deployment Tactics",
                vec![Job::Sch],
                0.0,
                90.0,
                Effect::SpreadShield {
                    status_id: StatusId(297),
                    duration: 30.0,
                },
            ))
    }

    #[test]
    fn test_cast_at_query_time_is_included() {
        let casts = vec![CastEvent::new("c1", 7535, 10.0, 1, Job::Pld)];
        let state = party_state_at(&party(), &casts, &skills(), 10.0);
        assert_eq!(state.enemy.statuses.len(), 1);

        let state = party_state_at(&party(), &casts, &skills(), 9.9);
        assert!(state.enemy.statuses.is_empty());
    }

    #[test]
    fn test_status_ending_at_query_time_is_kept() {
        let casts = vec![CastEvent::new("c1", 7535, 10.0, 1, Job::Pld)];
        let state = party_state_at(&party(), &casts, &skills(), 25.0);
        assert_eq!(state.enemy.statuses.len(), 1);

        let state = party_state_at(&party(), &casts, &skills(), 25.5);
        assert!(state.enemy.statuses.is_empty());
        assert!((state.timestamp - 25.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unsorted_log_and_ties() {
        // Deployment listed before Adloquium at the same timestamp: log order wins
        let casts = vec![
            CastEvent::new("c2", 3585, 5.0, 2, Job::Sch).with_target(1),
            CastEvent::new("c1", 185, 5.0, 2, Job::Sch).with_target(1),
            CastEvent::new("c0", 7535, 1.0, 1, Job::Pld),
        ];
        let state = party_state_at(&party(), &casts, &skills(), 6.0);

        // Spread ran first and found nothing
        assert_eq!(state.players[0].statuses.len(), 1);
        assert!(state.players[1].statuses.is_empty());
        assert_eq!(state.enemy.statuses.len(), 1);

        let casts = vec![
            CastEvent::new("c1", 185, 5.0, 2, Job::Sch).with_target(1),
            CastEvent::new("c2", 3585, 5.0, 2, Job::Sch).with_target(1),
        ];
        let state = party_state_at(&party(), &casts, &skills(), 6.0);
        assert_eq!(state.players[0].statuses.len(), 2);
        assert_eq!(state.players[1].statuses.len(), 1);
    }

    #[test]
    fn test_unknown_action_is_skipped() {
        let casts = vec![
            CastEvent::new("c0", 99999, 1.0, 1, Job::Pld),
            CastEvent::new("c1", 7531, 2.0, 1, Job::Pld).with_target(1),
        ];
        let state = party_state_at(&party(), &casts, &skills(), 3.0);
        assert_eq!(state.players[0].statuses.len(), 1);
        assert_eq!(state.players[0].statuses[0].source_player_id, Some(PlayerId(1)));
    }

    #[test]
    fn test_replay_is_idempotent() {
        let casts = vec![
            CastEvent::new("c0", 7535, 1.0, 1, Job::Pld),
            CastEvent::new("c1", 185, 4.0, 2, Job::Sch).with_target(1),
        ];
        let initial = party();
        let a = party_state_at(&initial, &casts, &skills(), 10.0);
        let b = party_state_at(&initial, &casts, &skills(), 10.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_initial_statuses_are_cleared() {
        let mut initial = party();
        let instance = initial.allocate_instance_id();
        initial.players[0]
            .statuses
            .push(crate::status::MitigationStatus::new(instance, StatusId(1191), 0.0, 100.0));

        let state = party_state_at(&initial, &[], &skills(), 5.0);
        assert_eq!(state.status_count(), 0);
    }

    #[test]
    fn test_cursor_matches_fresh_replay() {
        let casts = vec![
            CastEvent::new("c0", 7535, 1.0, 1, Job::Pld),
            CastEvent::new("c1", 185, 4.0, 2, Job::Sch).with_target(1),
            CastEvent::new("c2", 7531, 30.0, 1, Job::Pld).with_target(1),
        ];
        let initial = party();
        let skills = skills();

        let mut cursor = ReplayCursor::new(&initial, &casts);
        for t in [0.0, 2.0, 4.0, 16.0, 17.0, 30.0, 60.0] {
            let incremental = cursor.advance_to(t, &skills).clone();
            assert_eq!(incremental, party_state_at(&initial, &casts, &skills, t), "mismatch at t={}", t);
        }
        assert_eq!(cursor.pending(), 0);
    }
}
