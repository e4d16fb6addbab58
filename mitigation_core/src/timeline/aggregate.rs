//! Whole-timeline calculation

use super::Timeline;
use crate::calculation::{CalculationResult, MitigationCalculator};
use crate::config::EngineConstants;
use crate::replay::{party_state_from_status_events, ReplayCursor};
use crate::skill::SkillCatalog;
use crate::status::StatusCatalog;
use crate::types::StatusInstanceId;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Mitigate every damage event of a timeline, keyed by damage event id.
///
/// Events are processed by ascending time (ties in input order) and barrier
/// consumption carries from one hit to the next. In edit mode the party
/// state comes from replaying casts; in replay mode it is rebuilt from the
/// status events with consumed barriers re-applied by instance id.
pub fn calculate_timeline(
    timeline: &Timeline,
    skills: &SkillCatalog,
    statuses: &StatusCatalog,
    constants: &EngineConstants,
) -> BTreeMap<String, CalculationResult> {
    let calculator = MitigationCalculator::new(statuses);
    let initial = timeline.initial_party_state(constants);
    let mut results = BTreeMap::new();

    if timeline.is_replay_mode {
        let mut barriers: HashMap<StatusInstanceId, f64> = HashMap::new();

        for event in timeline.sorted_damage_events() {
            let state = party_state_from_status_events(&initial, &timeline.status_events, statuses, event.time)
                .with_barriers(&barriers);
            let result = calculator.calculate(
                event.damage,
                &state,
                event.time,
                event.damage_type,
                event.target_player_id,
            );

            for status in result.updated_party_state.players.iter().flat_map(|p| p.statuses.iter()) {
                if let Some(barrier) = status.remaining_barrier {
                    barriers.insert(status.instance_id, barrier);
                }
            }

            debug!(event = %event.id, final_damage = result.final_damage, "replay event calculated");
            results.insert(event.id.clone(), result);
        }
    } else {
        let mut cursor = ReplayCursor::new(&initial, &timeline.cast_events);

        for event in timeline.sorted_damage_events() {
            let state = cursor.advance_to(event.time, skills);
            let result = calculator.calculate(
                event.damage,
                state,
                event.time,
                event.damage_type,
                event.target_player_id,
            );
            cursor.replace_state(result.updated_party_state.clone());

            debug!(event = %event.id, final_damage = result.final_damage, "event calculated");
            results.insert(event.id.clone(), result);
        }
    }

    results
}
