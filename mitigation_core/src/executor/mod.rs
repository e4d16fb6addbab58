//! Executors - what happens to the party when a skill is used
//!
//! A skill's effect is an [`Effect`]: a tagged description interpreted by a
//! single dispatcher. Skills that do not fit the generic shapes plug in an
//! [`Executor`] through [`Effect::Custom`].
//!
//! Every executor is a pure function of its [`ActionExecutionContext`]: it
//! never mutates the input state, and when a precondition is not met (no
//! target, missing status) it returns the input unchanged.

mod custom;
mod factory;

pub use custom::{apply_conditional_shield, apply_spread_shield};
pub use factory::{
    apply_enemy_debuff, apply_friendly_buff, apply_shield, enemy_debuff, friendly_buff, shield,
    shield_barrier, DEFAULT_SHIELD_MULTIPLIER, SHIELD_FALLBACK,
};

use crate::party::PartyState;
use crate::types::{ActionId, PlayerId, StatusId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Everything an executor may read
#[derive(Debug, Clone, Copy)]
pub struct ActionExecutionContext<'a> {
    pub action_id: ActionId,
    /// Seconds
    pub use_time: f64,
    pub party_state: &'a PartyState,
    /// Recipient of single-target skills
    pub target_player_id: Option<PlayerId>,
    /// Player who used the skill
    pub source_player_id: Option<PlayerId>,
}

impl<'a> ActionExecutionContext<'a> {
    pub fn new(action_id: ActionId, use_time: f64, party_state: &'a PartyState) -> Self {
        ActionExecutionContext {
            action_id,
            use_time,
            party_state,
            target_player_id: None,
            source_player_id: None,
        }
    }

    pub fn with_target(mut self, target: Option<PlayerId>) -> Self {
        self.target_player_id = target;
        self
    }

    pub fn with_source(mut self, source: Option<PlayerId>) -> Self {
        self.source_player_id = source;
        self
    }

    /// Same context over a different state
    pub fn with_state<'b>(&self, party_state: &'b PartyState) -> ActionExecutionContext<'b> {
        ActionExecutionContext {
            action_id: self.action_id,
            use_time: self.use_time,
            party_state,
            target_player_id: self.target_player_id,
            source_player_id: self.source_player_id,
        }
    }

    /// The caster, falling back to the target for self-cast skills
    pub fn caster(&self) -> Option<PlayerId> {
        self.source_player_id.or(self.target_player_id)
    }
}

/// State transition caused by using a skill
pub trait Executor: fmt::Debug + Send + Sync {
    fn execute(&self, ctx: &ActionExecutionContext<'_>) -> PartyState;
}

/// Tagged description of a skill's effect
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Append a status to every player, or only to the target
    FriendlyBuff {
        status_id: StatusId,
        duration: f64,
        #[serde(default = "default_party_wide")]
        party_wide: bool,
    },
    /// Append a status to the enemy
    EnemyDebuff { status_id: StatusId, duration: f64 },
    /// Like `FriendlyBuff`, with a barrier sized from each recipient's max HP
    Shield {
        status_id: StatusId,
        duration: f64,
        #[serde(default = "default_party_wide")]
        party_wide: bool,
        #[serde(default = "default_shield_multiplier")]
        shield_multiplier: f64,
    },
    /// Copy the target's active `status_id` barrier to the whole party
    SpreadShield { status_id: StatusId, duration: f64 },
    /// Party-wide shield; if the caster holds `required_status_id` it is
    /// consumed and `bonus_status_id` is granted alongside
    ConditionalShield {
        status_id: StatusId,
        bonus_status_id: StatusId,
        required_status_id: StatusId,
        duration: f64,
        #[serde(default = "default_shield_multiplier")]
        shield_multiplier: f64,
    },
    /// Several effects applied left to right
    Combined { effects: Vec<Effect> },
    /// Injected strategy for skills that fit none of the shapes above
    #[serde(skip)]
    Custom(Arc<dyn Executor>),
}

fn default_party_wide() -> bool {
    true
}

fn default_shield_multiplier() -> f64 {
    DEFAULT_SHIELD_MULTIPLIER
}

impl Effect {
    pub fn custom(executor: impl Executor + 'static) -> Self {
        Effect::Custom(Arc::new(executor))
    }

    /// Status ids this effect may create, for catalog validation
    pub fn status_ids(&self) -> Vec<StatusId> {
        match self {
            Effect::FriendlyBuff { status_id, .. }
            | Effect::EnemyDebuff { status_id, .. }
            | Effect::Shield { status_id, .. }
            | Effect::SpreadShield { status_id, .. } => vec![*status_id],
            Effect::ConditionalShield {
                status_id,
                bonus_status_id,
                ..
            } => vec![*status_id, *bonus_status_id],
            Effect::Combined { effects } => effects.iter().flat_map(|e| e.status_ids()).collect(),
            Effect::Custom(_) => Vec::new(),
        }
    }
}

impl Executor for Effect {
    fn execute(&self, ctx: &ActionExecutionContext<'_>) -> PartyState {
        match self {
            Effect::FriendlyBuff {
                status_id,
                duration,
                party_wide,
            } => apply_friendly_buff(ctx, *status_id, *duration, *party_wide),
            Effect::EnemyDebuff {
                status_id,
                duration,
            } => apply_enemy_debuff(ctx, *status_id, *duration),
            Effect::Shield {
                status_id,
                duration,
                party_wide,
                shield_multiplier,
            } => apply_shield(ctx, *status_id, *duration, *party_wide, *shield_multiplier),
            Effect::SpreadShield {
                status_id,
                duration,
            } => apply_spread_shield(ctx, *status_id, *duration),
            Effect::ConditionalShield {
                status_id,
                bonus_status_id,
                required_status_id,
                duration,
                shield_multiplier,
            } => apply_conditional_shield(
                ctx,
                *status_id,
                *bonus_status_id,
                *required_status_id,
                *duration,
                *shield_multiplier,
            ),
            Effect::Combined { effects } => {
                let mut state = ctx.party_state.clone();
                for effect in effects {
                    state = effect.execute(&ctx.with_state(&state));
                }
                state
            }
            Effect::Custom(executor) => executor.execute(ctx),
        }
    }
}
