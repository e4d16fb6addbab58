//! mitigation_core - Party damage mitigation engine for raid planning
//!
//! This library provides:
//! - StatusCatalog: Metadata for every mitigation status
//! - SkillCatalog: Mitigation skills and the executors that apply them
//! - Replay: Party state at any instant, from casts or imported status intervals
//! - MitigationCalculator: Damage after percentage reductions and shields
//! - Timeline: Encounter plans and whole-timeline calculation

pub mod calculation;
pub mod config;
pub mod executor;
pub mod party;
pub mod prelude;
pub mod replay;
pub mod skill;
pub mod status;
pub mod timeline;
pub mod types;

// Re-export core types for convenience
pub use calculation::{CalculationResult, MitigationCalculator};
pub use config::{default_skills, default_statuses, ConfigError, EngineConstants};
pub use executor::{ActionExecutionContext, Effect, Executor};
pub use party::{EnemyState, PartyState, PlayerState};
pub use replay::{party_state_at, party_state_from_status_events, CastEvent, ReplayCursor, StatusEvent};
pub use skill::{MitigationAction, SkillCatalog};
pub use status::{DamagePerformance, MitigationStatus, StatusCatalog, StatusKind, StatusMetadata};
pub use timeline::{calculate_timeline, DamageEvent, DamageKind, Timeline, TimelineExport};
pub use types::{ActionId, DamageType, Job, JobRole, PlayerId, StatusId, StatusInstanceId};
