//! Shared catalog and timeline loading for commands

use anyhow::{Context, Result};
use clap::Args;
use mitigation_core::config::{load_skill_catalog, load_status_catalog, load_toml};
use mitigation_core::timeline::parse_timeline;
use mitigation_core::{EngineConstants, SkillCatalog, StatusCatalog, Timeline};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Catalog overrides; bundled tables are used when omitted
#[derive(Args)]
pub struct CatalogArgs {
    /// Status metadata TOML
    #[arg(long, value_name = "FILE")]
    statuses: Option<PathBuf>,

    /// Skill table TOML
    #[arg(long, value_name = "FILE")]
    skills: Option<PathBuf>,

    /// Engine constants TOML
    #[arg(long, value_name = "FILE")]
    constants: Option<PathBuf>,
}

pub struct Catalogs {
    pub statuses: StatusCatalog,
    pub skills: SkillCatalog,
    pub constants: EngineConstants,
}

impl CatalogArgs {
    pub fn load(&self) -> Result<Catalogs> {
        let statuses = match &self.statuses {
            Some(path) => load_status_catalog(path)
                .with_context(|| format!("Failed to load statuses: {}", path.display()))?,
            None => StatusCatalog::with_defaults(),
        };

        let skills = match &self.skills {
            Some(path) => load_skill_catalog(path)
                .with_context(|| format!("Failed to load skills: {}", path.display()))?,
            None => SkillCatalog::with_defaults(),
        };

        let constants = match &self.constants {
            Some(path) => load_toml::<EngineConstants>(path)
                .with_context(|| format!("Failed to load constants: {}", path.display()))?,
            None => EngineConstants::default(),
        };

        debug!(statuses = statuses.len(), skills = skills.len(), "catalogs loaded");

        Ok(Catalogs {
            statuses,
            skills,
            constants,
        })
    }
}

/// Read, parse and validate a timeline file
pub fn load_timeline(path: &Path, constants: &EngineConstants) -> Result<Timeline> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read timeline: {}", path.display()))?;

    let timeline = parse_timeline(&content)
        .with_context(|| format!("Failed to parse timeline: {}", path.display()))?;

    timeline
        .validate_with(constants)
        .with_context(|| format!("Invalid timeline: {}", path.display()))?;

    debug!(
        id = %timeline.id,
        damage_events = timeline.damage_events.len(),
        cast_events = timeline.cast_events.len(),
        replay = timeline.is_replay_mode,
        "timeline loaded"
    );
    Ok(timeline)
}
