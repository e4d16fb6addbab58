//! Per-event mitigation report for a timeline

use super::catalogs::{load_timeline, CatalogArgs};
use super::status_label;
use anyhow::Result;
use clap::Parser;
use mitigation_core::calculate_timeline;
use std::path::PathBuf;
use tracing::info;

/// Mitigate every damage event of a timeline
#[derive(Parser)]
pub struct Report {
    /// Timeline JSON (bare or export envelope)
    #[arg(value_name = "TIMELINE")]
    timeline: PathBuf,

    #[command(flatten)]
    catalogs: CatalogArgs,

    /// Print results as JSON keyed by damage event id
    #[arg(long)]
    json: bool,
}

impl Report {
    pub fn execute(self) -> Result<()> {
        let catalogs = self.catalogs.load()?;
        let timeline = load_timeline(&self.timeline, &catalogs.constants)?;

        let results = calculate_timeline(&timeline, &catalogs.skills, &catalogs.statuses, &catalogs.constants);
        info!(events = results.len(), "timeline calculated");

        if self.json {
            println!("{}", serde_json::to_string_pretty(&results)?);
            return Ok(());
        }

        println!("{} ({})", timeline.name, timeline.id);
        if !timeline.encounter.name.is_empty() {
            println!("Encounter: {}", timeline.encounter.name);
        }
        println!();
        println!(
            "{:>8}  {:<24} {:<10} {:<8} {:>10} {:>10} {:>7}  Applied",
            "Time", "Event", "Kind", "Type", "Damage", "Final", "Mit%"
        );

        let mut total_original = 0.0;
        let mut total_final = 0.0;

        for event in timeline.sorted_damage_events() {
            let Some(result) = results.get(&event.id) else {
                continue;
            };
            total_original += result.original_damage.max(0.0);
            total_final += result.final_damage;

            let target = event
                .target_player_id
                .and_then(|id| timeline.composition.player(id))
                .map(|p| format!(" -> {}", if p.name.is_empty() { p.job.code() } else { p.name.as_str() }))
                .unwrap_or_default();

            let applied: Vec<String> = result
                .applied_statuses
                .iter()
                .map(|s| status_label(&catalogs.statuses, s))
                .collect();

            println!(
                "{:>8.1}  {:<24} {:<10} {:<8} {:>10.0} {:>10.0} {:>6.1}%  {}",
                event.time,
                format!("{}{}", event.name, target),
                format!("{:?}", event.kind).to_lowercase(),
                event.damage_type,
                result.original_damage,
                result.final_damage,
                result.mitigation_percentage,
                applied.join(", ")
            );
        }

        if total_original > 0.0 {
            println!();
            println!(
                "Total: {:.0} -> {:.0} ({:.1}% mitigated)",
                total_original,
                total_final,
                (total_original - total_final) / total_original * 100.0
            );
        }

        Ok(())
    }
}
