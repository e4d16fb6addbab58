//! Skill catalog listing

use super::catalogs::CatalogArgs;
use anyhow::Result;
use clap::Parser;
use mitigation_core::Job;

/// List catalog skills
#[derive(Parser)]
pub struct Skills {
    /// Only skills usable by this job (e.g. SCH)
    #[arg(short, long, value_name = "JOB", value_parser = parse_job)]
    job: Option<Job>,

    #[command(flatten)]
    catalogs: CatalogArgs,
}

fn parse_job(code: &str) -> Result<Job, String> {
    Job::from_code(code).ok_or_else(|| format!("unknown job code: {}", code))
}

impl Skills {
    pub fn execute(self) -> Result<()> {
        let catalogs = self.catalogs.load()?;

        let skills: Vec<_> = match self.job {
            Some(job) => catalogs.skills.for_job(job),
            None => catalogs.skills.iter().collect(),
        };

        println!("{:>6}  {:<24} {:>6} {:>6}  {:<20} Statuses", "Id", "Name", "Dur", "CD", "Jobs");
        for skill in skills {
            let jobs: Vec<&str> = skill.jobs.iter().map(|j| j.code()).collect();
            let statuses: Vec<String> = skill
                .status_ids()
                .into_iter()
                .map(|id| match catalogs.statuses.get(id) {
                    Some(meta) => meta.name.clone(),
                    None => format!("#{}", id),
                })
                .collect();

            println!(
                "{:>6}  {:<24} {:>5.1}s {:>5.1}s  {:<20} {}",
                skill.id,
                skill.name,
                skill.duration,
                skill.cooldown,
                jobs.join("/"),
                statuses.join(", ")
            );
        }

        Ok(())
    }
}
