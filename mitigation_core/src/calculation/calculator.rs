//! Mitigation calculator - apply active statuses to a single hit

use super::result::CalculationResult;
use crate::party::{PartyState, PlayerState};
use crate::status::{MitigationStatus, StatusCatalog};
use crate::types::{DamageType, PlayerId, StatusInstanceId};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Round to `decimals` places, ties towards positive infinity
pub fn round_half_up(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale + 0.5).floor() / scale
}

/// Damage calculator over a status catalog
#[derive(Debug, Clone, Copy)]
pub struct MitigationCalculator<'a> {
    catalog: &'a StatusCatalog,
}

impl<'a> MitigationCalculator<'a> {
    pub fn new(catalog: &'a StatusCatalog) -> Self {
        MitigationCalculator { catalog }
    }

    pub fn catalog(&self) -> &'a StatusCatalog {
        self.catalog
    }

    /// Mitigate `original_damage` against `party_state` at `time`.
    ///
    /// With a target only that player's statuses apply; without one (an
    /// AOE hit) every player is in scope and a status id held by several
    /// players counts once. Enemy debuffs always apply.
    ///
    /// 1. Gather active multiplier statuses
    /// 2. Multiply their factors for `damage_type` into the damage
    /// 3. Consume active shields in roster order until the damage is gone
    /// 4. Round and compute the mitigated percentage
    pub fn calculate(
        &self,
        original_damage: f64,
        party_state: &PartyState,
        time: f64,
        damage_type: DamageType,
        target_player_id: Option<PlayerId>,
    ) -> CalculationResult {
        let is_aoe = target_player_id.is_none();
        let raw = original_damage.max(0.0);

        // Step 1: active statuses in scope
        let friendly = collect_active(
            in_scope(party_state, target_player_id).flat_map(|p| p.statuses.iter()),
            time,
            is_aoe,
        );
        let enemy = collect_active(party_state.enemy.statuses.iter(), time, true);

        // Step 2: multiplicative stacking
        let mut multiplier = 1.0;
        let mut applied_statuses = Vec::new();

        for status in friendly.into_iter().chain(enemy) {
            let Some(meta) = self.catalog.get(status.status_id) else {
                trace!(status = %status.status_id, "ignoring status missing from catalog");
                continue;
            };
            if meta.is_multiplier() {
                multiplier *= meta.performance.for_damage_type(damage_type);
                applied_statuses.push(status.clone());
            }
        }

        let mut damage = raw * multiplier;
        let after_multipliers = damage;

        // Step 3: shields
        let shields = self.collect_shields(party_state, time, target_player_id);
        let mut updates: HashMap<StatusInstanceId, f64> = HashMap::new();

        for shield in shields {
            if damage <= 0.0 {
                break;
            }
            let barrier = shield.barrier();
            let absorbed = damage.min(barrier);
            damage -= absorbed;

            trace!(
                instance = %shield.instance_id,
                status = %shield.status_id,
                absorbed,
                "shield consumed"
            );
            applied_statuses.push(shield.clone());
            updates.insert(shield.instance_id, barrier - absorbed);
        }

        // Step 4: finalize
        let final_damage = round_half_up(damage, 0).max(0.0);
        let mitigation_percentage = if raw > 0.0 {
            round_half_up((raw - final_damage) / raw * 100.0, 1)
        } else {
            0.0
        };

        debug!(
            original_damage,
            final_damage,
            mitigation_percentage,
            %damage_type,
            time,
            "damage mitigated"
        );

        CalculationResult {
            original_damage,
            final_damage,
            mitigation_percentage,
            applied_statuses,
            updated_party_state: party_state.with_barriers(&updates),
            total_multiplier: multiplier,
            absorbed_by_shields: (after_multipliers - damage.max(0.0)).max(0.0),
        }
    }

    /// Shields eligible for a hit, in consumption order
    fn collect_shields<'p>(
        &self,
        party_state: &'p PartyState,
        time: f64,
        target_player_id: Option<PlayerId>,
    ) -> Vec<&'p MitigationStatus> {
        let mut seen = HashSet::new();
        let mut shields = Vec::new();

        for player in in_scope(party_state, target_player_id) {
            for status in &player.statuses {
                let is_shield = self
                    .catalog
                    .get(status.status_id)
                    .is_some_and(|meta| meta.is_absorbed());
                if !is_shield || !status.has_barrier() || !status.is_active_at(time) {
                    continue;
                }
                // One raid-wide shield, however many players carry a copy
                if target_player_id.is_none() && !seen.insert(status.status_id) {
                    continue;
                }
                shields.push(status);
            }
        }

        shields
    }

    /// Statuses active at `time` on anyone, for display
    pub fn active_statuses_at<'p>(&self, party_state: &'p PartyState, time: f64) -> Vec<&'p MitigationStatus> {
        party_state.active_statuses_at(time)
    }
}

/// Players whose statuses apply to the hit
fn in_scope(party_state: &PartyState, target: Option<PlayerId>) -> impl Iterator<Item = &PlayerState> {
    party_state
        .players
        .iter()
        .filter(move |p| target.map_or(true, |id| p.id == id))
}

/// Active statuses in iteration order, optionally one per status id
fn collect_active<'p>(
    statuses: impl Iterator<Item = &'p MitigationStatus>,
    time: f64,
    dedup: bool,
) -> Vec<&'p MitigationStatus> {
    let mut seen = HashSet::new();
    statuses
        .filter(|s| s.is_active_at(time))
        .filter(|s| !dedup || seen.insert(s.status_id))
        .collect()
}
