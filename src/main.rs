//! Sarcasm Detector - CLI entry point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;

use sarcasm_detector::{
    cli::{Args, Commands, Config, Verbosity},
    prediction::{PredictionOrchestrator, EXAMPLE_INPUT},
    repl::{commands::analyze, DisplayManager, ReplSession},
    telemetry,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit code when a one-shot prediction fails
const EXIT_CODE_PREDICTION_FAILED: i32 = 1;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.clone()).context("Failed to load configuration")?;
    args.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    let configured =
        Verbosity::parse(&config.telemetry.default_verbosity).unwrap_or(Verbosity::Normal);
    let verbosity = args.verbosity(configured);
    telemetry::init(verbosity, config.telemetry.color_output);
    if !config.telemetry.color_output {
        colored::control::set_override(false);
    }

    if let Err(message) = args.validate() {
        if args.text.is_none() && args.command.is_none() {
            show_usage();
            return Ok(());
        }
        anyhow::bail!(message);
    }

    match &args.command {
        Some(Commands::Start) => run_repl(&config, verbosity).await?,
        Some(Commands::Health) => run_health(&config).await?,
        Some(Commands::Config { init }) => show_config(&config, *init)?,
        None => {
            if let Some(text) = &args.text {
                let succeeded = run_once(&config, verbosity, text).await?;
                if !succeeded {
                    std::process::exit(EXIT_CODE_PREDICTION_FAILED);
                }
            }
        }
    }

    Ok(())
}

fn show_usage() {
    println!("Sarcasm Detector v{}", VERSION);
    println!("\nUsage:");
    println!("  sarcasm-detector <text>          Analyze one text");
    println!("  sarcasm-detector start           Interactive mode");
    println!("  sarcasm-detector health          Check API status");
    println!("  sarcasm-detector config          Show configuration");
    println!("\nExample:");
    println!("  sarcasm-detector \"{}\"", EXAMPLE_INPUT);
    println!();
}

async fn run_once(config: &Config, verbosity: Verbosity, text: &str) -> Result<bool> {
    let orchestrator = PredictionOrchestrator::from_config(config)
        .context("Failed to initialize backend client")?;
    let display = DisplayManager::with_progress(verbosity.show_progress());

    let outcome = analyze(&orchestrator, &display, text).await;
    Ok(outcome.is_success())
}

async fn run_repl(config: &Config, verbosity: Verbosity) -> Result<()> {
    let orchestrator = Arc::new(
        PredictionOrchestrator::from_config(config)
            .context("Failed to initialize backend client")?,
    );
    let display = DisplayManager::with_progress(verbosity.show_progress());

    let history_path = Config::default_path().and_then(|p| p.parent().map(|d| d.join("history")));
    let mut session = match history_path {
        Some(path) => ReplSession::with_history(orchestrator, display, path)?,
        None => ReplSession::new(orchestrator, display)?,
    };

    session.show_welcome(VERSION).await;
    session.run().await
}

async fn run_health(config: &Config) -> Result<()> {
    let orchestrator = PredictionOrchestrator::from_config(config)
        .context("Failed to initialize backend client")?;
    let available = orchestrator.health().is_available().await;

    DisplayManager::new().show_health(orchestrator.health().location(), available);
    if !available {
        std::process::exit(EXIT_CODE_PREDICTION_FAILED);
    }
    Ok(())
}

fn show_config(config: &Config, init: bool) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    println!("{}", "Current configuration:".bold());
    println!("{}", rendered);

    if init {
        let path = Config::default_path().context("Could not determine home directory")?;
        config.save(&path).context("Failed to write configuration")?;
        println!("{} {}", "Wrote".green(), path.display());
    }

    Ok(())
}
