//! Prelude module for convenient imports
//!
//! ```rust
//! use mitigation_core::prelude::*;
//! ```

// Core types
pub use crate::types::{ActionId, DamageType, Job, PlayerId, StatusId, StatusInstanceId};
pub use crate::party::{PartyState, PlayerState};
pub use crate::status::{MitigationStatus, StatusCatalog, StatusMetadata};

// Skills
pub use crate::skill::{MitigationAction, SkillCatalog};
pub use crate::executor::{ActionExecutionContext, Effect, Executor};

// Replay and calculation
pub use crate::replay::{party_state_at, CastEvent, StatusEvent};
pub use crate::calculation::{CalculationResult, MitigationCalculator};

// Timeline
pub use crate::timeline::{calculate_timeline, DamageEvent, Timeline};

// Config
pub use crate::config::{default_skills, default_statuses, EngineConstants};
