//! gestured - libinput touchpad gesture daemon
//!
//! Reads `libinput debug-events` lines from stdin and dispatches the
//! user-configured command for each recognized gesture.

use gestured::app::cli::{Cli, Commands};
use gestured::app::config::ConfigFile;
use gestured::config::ConfigStore;
use gestured::executor::{CommandDispatcher, Dispatch, LogDispatcher};
use gestured::parser::LibinputGestureParser;
use gestured::pipeline::Pipeline;
use std::io::BufRead;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Run { dry_run } => {
            let config = load_config(&cli)?;
            run_pipeline(config, dry_run)?;
        }
        Commands::CheckConfig => {
            let path = cli
                .config
                .clone()
                .unwrap_or_else(ConfigFile::default_path);
            let config = ConfigFile::load(&path)?;
            info!(
                path = %path.display(),
                layers = config.layers.len(),
                "config is valid"
            );
        }
        Commands::Parse => {
            run_parse()?;
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<ConfigFile> {
    let config = if let Some(path) = &cli.config {
        ConfigFile::load(path)?
    } else {
        ConfigFile::load_default()?
    };
    Ok(config)
}

fn run_pipeline(config: ConfigFile, dry_run: bool) -> anyhow::Result<()> {
    let store = Arc::new(ConfigStore::new(config.layers));
    let dispatcher: Box<dyn Dispatch> = if dry_run {
        Box::new(LogDispatcher)
    } else {
        Box::new(CommandDispatcher::new())
    };
    let mut pipeline = Pipeline::new(store, dispatcher);

    info!("reading libinput debug-events from stdin");
    let stdin = std::io::stdin();
    let parser = LibinputGestureParser::new();
    for line in stdin.lock().lines() {
        let line = line?;
        if let Some(sample) = parser.parse_line(&line) {
            pipeline.push_sample(sample);
        }
    }

    debug!("input stream closed");
    Ok(())
}

/// Print each recognized event line as a structured JSON sample
fn run_parse() -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let parser = LibinputGestureParser::new();
    for line in stdin.lock().lines() {
        let line = line?;
        if let Some(sample) = parser.parse_line(&line) {
            println!("{}", serde_json::to_string(&sample)?);
        }
    }
    Ok(())
}
