//! Hand-written executors for skills that read or consume existing statuses

use super::factory::shield_barrier;
use super::ActionExecutionContext;
use crate::party::PartyState;
use crate::status::MitigationStatus;
use crate::types::StatusId;
use tracing::trace;

/// Copy the target's active `status_id` barrier onto every player.
///
/// No target, or a target without that status, leaves the party unchanged.
pub fn apply_spread_shield(
    ctx: &ActionExecutionContext<'_>,
    status_id: StatusId,
    duration: f64,
) -> PartyState {
    let Some(target) = ctx.target_player_id.and_then(|id| ctx.party_state.player(id)) else {
        trace!(action = %ctx.action_id, "spread shield without a valid target");
        return ctx.party_state.clone();
    };

    let Some(source) = target.active_status(status_id, ctx.use_time) else {
        trace!(action = %ctx.action_id, status = %status_id, "nothing to spread");
        return ctx.party_state.clone();
    };
    let barrier = source.remaining_barrier;

    let mut next = ctx.party_state.clone();
    for i in 0..next.players.len() {
        let instance = next.allocate_instance_id();
        let mut status = MitigationStatus::new(instance, status_id, ctx.use_time, duration)
            .with_source_action(ctx.action_id);
        status.remaining_barrier = barrier;
        status.source_player_id = ctx.source_player_id;
        next.players[i].statuses.push(status);
    }
    next
}

/// Party-wide shield with a bonus gated on a caster buff, which is consumed
pub fn apply_conditional_shield(
    ctx: &ActionExecutionContext<'_>,
    status_id: StatusId,
    bonus_status_id: StatusId,
    required_status_id: StatusId,
    duration: f64,
    shield_multiplier: f64,
) -> PartyState {
    let caster = ctx.caster();
    let empowered = caster
        .and_then(|id| ctx.party_state.player(id))
        .is_some_and(|p| p.has_active_status(required_status_id, ctx.use_time));

    let mut next = ctx.party_state.clone();

    if empowered {
        if let Some(player) = caster.and_then(|id| next.player_mut(id)) {
            player.statuses.retain(|s| s.status_id != required_status_id);
        }
    }

    for i in 0..next.players.len() {
        let barrier = shield_barrier(next.players[i].max_hp, shield_multiplier);

        let mut granted = vec![status_id];
        if empowered {
            granted.push(bonus_status_id);
        }

        for id in granted {
            let instance = next.allocate_instance_id();
            let mut status = MitigationStatus::new(instance, id, ctx.use_time, duration)
                .with_source_action(ctx.action_id)
                .with_barrier(barrier);
            status.source_player_id = ctx.source_player_id;
            next.players[i].statuses.push(status);
        }
    }
    next
}
