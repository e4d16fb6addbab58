//! Generic executor shapes: friendly buffs, enemy debuffs and shields

use super::{ActionExecutionContext, Effect};
use crate::party::PartyState;
use crate::status::MitigationStatus;
use crate::types::{PlayerId, StatusId};
use tracing::trace;

/// Barrier used when a recipient's max HP yields no usable value
pub const SHIELD_FALLBACK: f64 = 10_000.0;

/// Fraction of max HP granted as barrier when a skill does not say
pub const DEFAULT_SHIELD_MULTIPLIER: f64 = 0.1;

/// Friendly buff on everyone (`party_wide`) or on the context's target
pub fn friendly_buff(status_id: u32, duration: f64, party_wide: bool) -> Effect {
    Effect::FriendlyBuff {
        status_id: StatusId(status_id),
        duration,
        party_wide,
    }
}

/// Debuff on the enemy
pub fn enemy_debuff(status_id: u32, duration: f64) -> Effect {
    Effect::EnemyDebuff {
        status_id: StatusId(status_id),
        duration,
    }
}

/// Shield worth `shield_multiplier * max_hp` on each recipient
pub fn shield(status_id: u32, duration: f64, party_wide: bool, shield_multiplier: f64) -> Effect {
    Effect::Shield {
        status_id: StatusId(status_id),
        duration,
        party_wide,
        shield_multiplier,
    }
}

/// Barrier for a recipient with `max_hp`
pub fn shield_barrier(max_hp: f64, shield_multiplier: f64) -> f64 {
    let barrier = max_hp * shield_multiplier;
    if barrier.is_finite() && barrier != 0.0 {
        barrier
    } else {
        SHIELD_FALLBACK
    }
}

/// Players receiving a friendly effect, in roster order
fn recipients(ctx: &ActionExecutionContext<'_>, party_wide: bool) -> Vec<PlayerId> {
    if party_wide {
        ctx.party_state.player_ids()
    } else {
        ctx.party_state
            .players
            .iter()
            .filter(|p| Some(p.id) == ctx.target_player_id)
            .map(|p| p.id)
            .collect()
    }
}

fn new_status(
    state: &mut PartyState,
    ctx: &ActionExecutionContext<'_>,
    status_id: StatusId,
    duration: f64,
) -> MitigationStatus {
    let instance = state.allocate_instance_id();
    let mut status = MitigationStatus::new(instance, status_id, ctx.use_time, duration)
        .with_source_action(ctx.action_id);
    status.source_player_id = ctx.source_player_id;
    status
}

pub fn apply_friendly_buff(
    ctx: &ActionExecutionContext<'_>,
    status_id: StatusId,
    duration: f64,
    party_wide: bool,
) -> PartyState {
    let targets = recipients(ctx, party_wide);
    if targets.is_empty() {
        trace!(action = %ctx.action_id, "friendly buff has no recipient");
        return ctx.party_state.clone();
    }

    let mut next = ctx.party_state.clone();
    for player_id in targets {
        let status = new_status(&mut next, ctx, status_id, duration);
        if let Some(player) = next.player_mut(player_id) {
            player.statuses.push(status);
        }
    }
    next
}

pub fn apply_enemy_debuff(
    ctx: &ActionExecutionContext<'_>,
    status_id: StatusId,
    duration: f64,
) -> PartyState {
    let mut next = ctx.party_state.clone();
    let status = new_status(&mut next, ctx, status_id, duration);
    next.enemy.statuses.push(status);
    next
}

pub fn apply_shield(
    ctx: &ActionExecutionContext<'_>,
    status_id: StatusId,
    duration: f64,
    party_wide: bool,
    shield_multiplier: f64,
) -> PartyState {
    let targets = recipients(ctx, party_wide);
    if targets.is_empty() {
        trace!(action = %ctx.action_id, "shield has no recipient");
        return ctx.party_state.clone();
    }

    let mut next = ctx.party_state.clone();
    for player_id in targets {
        let status = new_status(&mut next, ctx, status_id, duration);
        if let Some(player) = next.player_mut(player_id) {
            let barrier = shield_barrier(player.max_hp, shield_multiplier);
            player.statuses.push(status.with_barrier(barrier));
        }
    }
    next
}
