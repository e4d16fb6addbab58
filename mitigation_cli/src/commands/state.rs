//! Party state inspection at a point on the timeline

use super::catalogs::{load_timeline, CatalogArgs};
use super::status_label;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Show the reconstructed party state at an instant
#[derive(Parser)]
pub struct State {
    /// Timeline JSON (bare or export envelope)
    #[arg(value_name = "TIMELINE")]
    timeline: PathBuf,

    /// Seconds from the start of the encounter
    #[arg(short, long, value_name = "SECONDS")]
    time: f64,

    #[command(flatten)]
    catalogs: CatalogArgs,

    /// Full JSON output
    #[arg(long)]
    json: bool,
}

impl State {
    pub fn execute(self) -> Result<()> {
        let catalogs = self.catalogs.load()?;
        let timeline = load_timeline(&self.timeline, &catalogs.constants)?;

        let state = timeline.party_state_at(self.time, &catalogs.skills, &catalogs.statuses, &catalogs.constants);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&state)?);
            return Ok(());
        }

        let mode = if timeline.is_replay_mode { "status events" } else { "casts" };
        println!("Party state at {:.1}s (from {})", self.time, mode);
        println!();

        for player in &state.players {
            let name = timeline
                .composition
                .player(player.id)
                .map(|p| p.name.as_str())
                .unwrap_or_default();
            println!("{:>3} {:<4} {:<16} {:.0}/{:.0}", player.id, player.job.code(), name, player.current_hp, player.max_hp);

            for status in &player.statuses {
                println!(
                    "      {:<28} {:>7.1}s - {:>7.1}s",
                    status_label(&catalogs.statuses, status),
                    status.start_time,
                    status.end_time
                );
            }
        }

        println!();
        println!("Enemy");
        if state.enemy.statuses.is_empty() {
            println!("      (none)");
        }
        for status in &state.enemy.statuses {
            println!(
                "      {:<28} {:>7.1}s - {:>7.1}s",
                status_label(&catalogs.statuses, status),
                status.start_time,
                status.end_time
            );
        }

        Ok(())
    }
}
