//! `sketchboard` - replay a gesture script against the selection core and
//! print the resulting scene as JSON.

use std::path::PathBuf;

use clap::Parser;
use sketchboard::config::{ConfigError, EngineConfig};
use sketchboard::replay::{self, ReplayError};
use tracing::info;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error("failed to encode summary: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "sketchboard", about = "Replay pointer gestures against the selection and hit-test core")]
struct Cli {
    /// JSON array of input events.
    script: PathBuf,

    /// Pretty-print the summary.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = EngineConfig::from_env()?;
    info!(?config, script = %cli.script.display(), "replaying script");

    let events = replay::load_script(&cli.script)?;
    let summary = replay::run(&events, config)?;

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{rendered}");
    Ok(())
}
