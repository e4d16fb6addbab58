//! Command-line front end for the mitigation engine
//!
//! Run with: `mitigation <command>`

mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser};
use commands::{Report, Skills, State};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Damage mitigation planner for raid timelines
#[derive(Parser)]
#[command(name = "mitigation")]
#[command(about = "Damage mitigation planner for raid timelines", long_about = None)]
#[command(version)]
struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Mitigate every damage event of a timeline
    Report(Report),

    /// Show the reconstructed party state at an instant
    State(State),

    /// List catalog skills
    Skills(Skills),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Report(cmd) => cmd.execute(),
        Command::State(cmd) => cmd.execute(),
        Command::Skills(cmd) => cmd.execute(),
    }
}

/// Logs go to stderr so stdout stays clean for reports and JSON
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
