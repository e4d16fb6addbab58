//! Skill catalog - mitigation skills and their executors

use crate::executor::{ActionExecutionContext, Effect, Executor};
use crate::party::PartyState;
use crate::types::{ActionId, Job, StatusId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A mitigation skill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MitigationAction {
    pub id: ActionId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Jobs able to use the skill
    pub jobs: Vec<Job>,
    /// Seconds
    pub duration: f64,
    /// Seconds
    pub cooldown: f64,
    /// Mutually exclusive skill ids (advisory)
    #[serde(default)]
    pub unique_group: Vec<ActionId>,
    pub effect: Effect,
}

impl MitigationAction {
    pub fn new(id: u32, name: &str, jobs: Vec<Job>, duration: f64, cooldown: f64, effect: Effect) -> Self {
        MitigationAction {
            id: ActionId(id),
            name: name.to_string(),
            description: None,
            jobs,
            duration,
            cooldown,
            unique_group: vec![ActionId(id)],
            effect,
        }
    }

    pub fn with_unique_group(mut self, group: &[u32]) -> Self {
        self.unique_group = group.iter().copied().map(ActionId).collect();
        self
    }

    pub fn usable_by(&self, job: Job) -> bool {
        self.jobs.contains(&job)
    }

    /// Whether the two skills are declared mutually exclusive.
    ///
    /// Informational only; the engine stacks their statuses regardless.
    pub fn conflicts_with(&self, other: &MitigationAction) -> bool {
        self.id != other.id
            && (self.unique_group.contains(&other.id) || other.unique_group.contains(&self.id))
    }

    /// Run this skill's effect
    pub fn execute(&self, ctx: &ActionExecutionContext<'_>) -> PartyState {
        self.effect.execute(ctx)
    }

    pub fn status_ids(&self) -> Vec<StatusId> {
        self.effect.status_ids()
    }
}

/// Ordered, read-only list of skills with an id index
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    actions: Vec<MitigationAction>,
    index: HashMap<ActionId, usize>,
}

impl SkillCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a skill; a skill with the same id is replaced in place
    pub fn register(&mut self, action: MitigationAction) {
        match self.index.get(&action.id) {
            Some(&i) => self.actions[i] = action,
            None => {
                self.index.insert(action.id, self.actions.len());
                self.actions.push(action);
            }
        }
    }

    pub fn with_action(mut self, action: MitigationAction) -> Self {
        self.register(action);
        self
    }

    pub fn get(&self, id: ActionId) -> Option<&MitigationAction> {
        self.index.get(&id).map(|&i| &self.actions[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &MitigationAction> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Skills usable by a job, in catalog order
    pub fn for_job(&self, job: Job) -> Vec<&MitigationAction> {
        self.actions.iter().filter(|a| a.usable_by(job)).collect()
    }

    /// Load the bundled skill table
    pub fn with_defaults() -> Self {
        crate::config::default_skills()
    }
}

impl FromIterator<MitigationAction> for SkillCatalog {
    fn from_iter<I: IntoIterator<Item = MitigationAction>>(iter: I) -> Self {
        let mut catalog = SkillCatalog::new();
        for action in iter {
            catalog.register(action);
        }
        catalog
    }
}
