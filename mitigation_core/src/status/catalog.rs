//! StatusCatalog - read-only lookup of status metadata

use super::StatusMetadata;
use crate::types::StatusId;
use std::collections::HashMap;

/// Status registry keyed by status id.
///
/// Built once at startup and passed by reference. Lookups of unknown ids
/// return `None`; the catalog may have gaps.
#[derive(Debug, Clone, Default)]
pub struct StatusCatalog {
    statuses: HashMap<StatusId, StatusMetadata>,
}

impl StatusCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        StatusCatalog {
            statuses: HashMap::new(),
        }
    }

    /// Register a status, replacing any entry with the same id
    pub fn register(&mut self, meta: StatusMetadata) {
        self.statuses.insert(meta.id, meta);
    }

    pub fn with_status(mut self, meta: StatusMetadata) -> Self {
        self.register(meta);
        self
    }

    /// Get status metadata by id
    pub fn get(&self, id: StatusId) -> Option<&StatusMetadata> {
        self.statuses.get(&id)
    }

    pub fn contains(&self, id: StatusId) -> bool {
        self.statuses.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Party-side statuses, ordered by id
    pub fn friendly(&self) -> Vec<&StatusMetadata> {
        self.sorted(|m| m.is_friendly)
    }

    /// Boss-side statuses, ordered by id
    pub fn enemy(&self) -> Vec<&StatusMetadata> {
        self.sorted(|m| !m.is_friendly)
    }

    fn sorted(&self, keep: impl Fn(&StatusMetadata) -> bool) -> Vec<&StatusMetadata> {
        let mut out: Vec<&StatusMetadata> = self.statuses.values().filter(|m| keep(m)).collect();
        out.sort_by_key(|m| m.id);
        out
    }

    /// Load the bundled status table
    pub fn with_defaults() -> Self {
        crate::config::default_statuses()
    }
}

impl FromIterator<StatusMetadata> for StatusCatalog {
    fn from_iter<I: IntoIterator<Item = StatusMetadata>>(iter: I) -> Self {
        let mut catalog = StatusCatalog::new();
        for meta in iter {
            catalog.register(meta);
        }
        catalog
    }
}
