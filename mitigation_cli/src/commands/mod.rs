//! Command implementations
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod catalogs;
mod report;
mod skills;
mod state;

pub use report::Report;
pub use skills::Skills;
pub use state::State;

use mitigation_core::{MitigationStatus, StatusCatalog};

/// Status name with its barrier, falling back to the numeric id
fn status_label(catalog: &StatusCatalog, status: &MitigationStatus) -> String {
    let name = catalog
        .get(status.status_id)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| format!("#{}", status.status_id));

    match status.remaining_barrier {
        Some(barrier) => format!("{} [{:.0}]", name, barrier),
        None => name,
    }
}
