//! Command-line driver for season-elo
//!
//! Reads seasons of games from a JSON file, threads ratings through them with
//! the configured engine, and prints standings plus any requested predictions
//! as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use season_elo::config::AppConfig;
use season_elo::predict::{Prediction, Standing};
use season_elo::rating::EngineKind;
use season_elo::{RatingPipeline, Season, TeamId, Year};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Season Elo - team ratings and matchup predictions from game results
#[derive(Parser)]
#[command(
    name = "season-elo",
    version,
    about = "Rate teams season by season and predict matchups",
    long_about = "Season Elo rates teams from seasons of win/loss results using either a \
                 game-by-game or a season-wide batch Elo engine, regresses ratings toward a \
                 baseline between seasons, and predicts win probabilities for future matchups."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Seasons to rate
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "JSON array of seasons: [{\"year\": 2014, \"games\": [...]}]"
    )]
    games: PathBuf,

    /// Matchups to predict
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "JSON array of [id, label] pairs with ids like \"2015_1107_1110\""
    )]
    predict: Option<PathBuf>,

    /// Engine override
    #[arg(short, long, value_name = "ENGINE", help = "Override engine (sequential, batch)")]
    engine: Option<EngineKind>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Standings size override
    #[arg(long, value_name = "N", help = "Number of teams to include in standings")]
    top: Option<usize>,

    /// Dry run mode (validate config and input, then exit)
    #[arg(long, help = "Validate configuration and input, then exit without rating")]
    dry_run: bool,
}

/// What gets printed to stdout
#[derive(Serialize)]
struct Report {
    engine: &'static str,
    seasons: Vec<Year>,
    standings: Vec<Standing<TeamId>>,
    predictions: Vec<Prediction>,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file, environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(engine) = args.engine {
        config.rating.engine = engine;
    }

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if let Some(top) = args.top {
        config.service.standings_limit = top;
    }

    season_elo::config::validate_config(&config)?;
    Ok(config)
}

fn read_seasons(path: &Path) -> Result<Vec<Season<TeamId>>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read games file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse games file {}", path.display()))
}

fn read_requests(path: &Path) -> Result<Vec<(String, serde_json::Value)>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read predictions file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse predictions file {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "{} v{}: {} engine",
        config.service.name,
        season_elo::VERSION,
        config.rating.engine
    );

    let seasons = read_seasons(&args.games)?;
    let requests = match &args.predict {
        Some(path) => read_requests(path)?,
        None => Vec::new(),
    };
    info!(
        "Loaded {} seasons and {} prediction requests",
        seasons.len(),
        requests.len()
    );

    if args.dry_run {
        info!("Dry run completed - exiting without rating");
        return Ok(());
    }

    let engine = config.rating.build_engine::<TeamId>()?;
    let mut pipeline =
        RatingPipeline::new(engine).with_initial_rating(config.rating.initial_rating);
    pipeline.process_seasons(&seasons)?;

    let standings = match seasons.iter().max_by_key(|season| season.year()) {
        Some(latest) => {
            let mut rows = pipeline.standings(latest)?;
            rows.truncate(config.service.standings_limit);
            rows
        }
        None => {
            warn!("No seasons in {}", args.games.display());
            Vec::new()
        }
    };

    let probabilities = pipeline.predict(requests.iter().map(|(id, label)| (id, label)))?;
    let predictions = requests
        .into_iter()
        .zip(probabilities)
        .map(|((id, _), pred)| Prediction { id, pred })
        .collect();

    let report = Report {
        engine: pipeline.engine_name(),
        seasons: pipeline.seasons_processed().to_vec(),
        standings,
        predictions,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
