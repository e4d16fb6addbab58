//! Party state from imported status intervals (log replay mode)

use crate::party::PartyState;
use crate::status::{MitigationStatus, StatusCatalog};
use crate::types::{PlayerId, StatusId, StatusInstanceId};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A status interval taken from a combat log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEvent {
    pub status_id: StatusId,
    /// Seconds
    pub start_time: f64,
    /// Seconds
    pub end_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_player_id: Option<PlayerId>,
    /// `None` puts the status on the enemy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_player_id: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_instance: Option<u32>,
    /// Barrier recorded in the log, for absorbed statuses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absorb: Option<f64>,
}

/// Build the party state at `time` directly from status intervals.
///
/// The instance id of each status is its index in `events`, so the same
/// interval keeps the same id across queries. Unknown status ids and
/// targets outside the roster are skipped.
pub fn party_state_from_status_events(
    initial: &PartyState,
    events: &[StatusEvent],
    catalog: &StatusCatalog,
    time: f64,
) -> PartyState {
    let mut state = initial.without_statuses();
    state.timestamp = time;
    state.reserve_instances(events.len() as u64);

    for (i, event) in events.iter().enumerate() {
        if !(event.start_time <= time && time <= event.end_time) {
            continue;
        }
        let Some(meta) = catalog.get(event.status_id) else {
            trace!(status = %event.status_id, "skipping unknown status event");
            continue;
        };

        let mut status = MitigationStatus::new(
            StatusInstanceId(i as u64),
            event.status_id,
            event.start_time,
            event.end_time - event.start_time,
        );
        status.end_time = event.end_time;
        status.source_player_id = event.source_player_id;
        if meta.is_absorbed() {
            if let Some(absorb) = event.absorb {
                status = status.with_barrier(absorb);
            }
        }

        match event.target_player_id {
            Some(player_id) => match state.player_mut(player_id) {
                Some(player) => player.statuses.push(status),
                None => trace!(player = %player_id, "status event target not in roster"),
            },
            None => state.enemy.statuses.push(status),
        }
    }

    state
}
