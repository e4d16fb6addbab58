//! Status catalog loading

use super::ConfigError;
use crate::status::{StatusCatalog, StatusMetadata};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Container for status metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusesConfig {
    #[serde(default)]
    pub statuses: Vec<StatusMetadata>,
}

impl StatusesConfig {
    fn into_catalog(self) -> Result<StatusCatalog, ConfigError> {
        let mut seen = HashSet::new();
        for meta in &self.statuses {
            if !seen.insert(meta.id) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate status id {}",
                    meta.id
                )));
            }
            let p = meta.performance;
            if [p.physics, p.magic, p.darkness].iter().any(|f| !f.is_finite() || *f < 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "status {} has a negative or non-finite damage factor",
                    meta.id
                )));
            }
        }
        Ok(self.statuses.into_iter().collect())
    }
}

/// Load a status catalog from a TOML file
pub fn load_status_catalog(path: &Path) -> Result<StatusCatalog, ConfigError> {
    let config: StatusesConfig = super::load_toml(path)?;
    config.into_catalog()
}

/// Load a status catalog from a TOML string
pub fn parse_status_catalog(content: &str) -> Result<StatusCatalog, ConfigError> {
    let config: StatusesConfig = super::parse_toml(content)?;
    config.into_catalog()
}

/// Get the bundled status catalog
pub fn default_statuses() -> StatusCatalog {
    let toml = include_str!("../../config/statuses.toml");
    parse_status_catalog(toml).unwrap_or_else(|_| StatusCatalog::new())
}
