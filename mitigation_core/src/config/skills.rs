//! Skill catalog loading

use super::ConfigError;
use crate::skill::{MitigationAction, SkillCatalog};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Container for skill definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    #[serde(rename = "skills")]
    pub skills: Vec<MitigationAction>,
}

impl SkillsConfig {
    fn into_catalog(self) -> Result<SkillCatalog, ConfigError> {
        let mut seen = HashSet::new();
        for skill in &self.skills {
            if !seen.insert(skill.id) {
                return Err(ConfigError::ValidationError(format!("duplicate skill id {}", skill.id)));
            }
            if skill.jobs.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "skill {} ({}) is usable by no job",
                    skill.id, skill.name
                )));
            }
        }
        Ok(self.skills.into_iter().collect())
    }
}

/// Load a skill catalog from a TOML file
pub fn load_skill_catalog(path: &Path) -> Result<SkillCatalog, ConfigError> {
    let config: SkillsConfig = super::load_toml(path)?;
    config.into_catalog()
}

/// Load a skill catalog from a TOML string
pub fn parse_skill_catalog(content: &str) -> Result<SkillCatalog, ConfigError> {
    let config: SkillsConfig = super::parse_toml(content)?;
    config.into_catalog()
}

/// Get the bundled skill catalog
pub fn default_skills() -> SkillCatalog {
    let toml = include_str!("../../config/skills.toml");
    parse_skill_catalog(toml).unwrap_or_else(|_| SkillCatalog::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Effect;
    use crate::status::StatusCatalog;
    use crate::types::{ActionId, Job, StatusId};

    #[test]
    fn test_parse_skills() {
        let toml = r#"
[[skills]]
id = 7535
name = "Reprisal"
jobs = ["PLD", "WAR", "DRK", "GNB"]
duration = 15.0
cooldown = 60.0
effect = { type = "enemy_debuff", status_id = 1193, duration = 15.0 }

[[skills]]
id = 24310
name = "Holos"
jobs = ["SGE"]
duration = 20.0
cooldown = 120.0
unique_group = [24310]

[skills.effect]
type = "combined"
effects = [
    { type = "friendly_buff", status_id = 3003, duration = 20.0 },
    { type = "shield", status_id = 3365, duration = 20.0 },
]
"#;

        let catalog = parse_skill_catalog(toml).unwrap();
        assert_eq!(catalog.len(), 2);

        let reprisal = catalog.get(ActionId(7535)).unwrap();
        assert!(reprisal.usable_by(Job::Gnb));
        assert!(!reprisal.usable_by(Job::Whm));
        assert!(matches!(reprisal.effect, Effect::EnemyDebuff { .. }));

        let holos = catalog.get(ActionId(24310)).unwrap();
        assert_eq!(holos.status_ids(), vec![StatusId(3003), StatusId(3365)]);
    }

    #[test]
    fn test_duplicate_and_jobless_rejected() {
        let duplicate = r#"
[[skills]]
id = 1
name = "A"
jobs = ["PLD"]
duration = 10.0
cooldown = 60.0
effect = { type = "enemy_debuff", status_id = 1193, duration = 10.0 }

[[skills]]
id = 1
name = "B"
jobs = ["PLD"]
duration = 10.0
cooldown = 60.0
effect = { type = "enemy_debuff", status_id = 1193, duration = 10.0 }
"#;
        assert!(matches!(
            parse_skill_catalog(duplicate),
            Err(ConfigError::ValidationError(_))
        ));

        let jobless = r#"
[[skills]]
id = 1
name = "A"
jobs = []
duration = 10.0
cooldown = 60.0
effect = { type = "enemy_debuff", status_id = 1193, duration = 10.0 }
"#;
        assert!(parse_skill_catalog(jobless).is_err());
    }

    #[test]
    fn test_unknown_effect_type_is_parse_error() {
        let toml = r#"
[[skills]]
id = 1
name = "A"
jobs = ["PLD"]
duration = 10.0
cooldown = 60.0
effect = { type = "teleport", status_id = 1, duration = 10.0 }
"#;
        assert!(matches!(parse_skill_catalog(toml), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_default_skills() {
        let skills = default_skills();
        assert!(skills.len() >= 25);

        let statuses = StatusCatalog::with_defaults();
        // Every status a bundled skill grants has metadata
        for skill in skills.iter() {
            for status_id in skill.status_ids() {
                assert!(statuses.contains(status_id), "{} grants unknown {}", skill.name, status_id);
            }
        }

        let sch = skills.for_job(Job::Sch);
        assert!(sch.iter().any(|s| s.id == ActionId(37013)));

        let adlo = skills.get(ActionId(185)).unwrap();
        let accession = skills.get(ActionId(37013)).unwrap();
        assert!(adlo.conflicts_with(accession));
    }
}
