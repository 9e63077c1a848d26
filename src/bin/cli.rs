//! Loipencheck CLI
//!
//! Runs aggregation cycles locally: print the feed, write the static
//! snapshot, or show a readable per-area summary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use loipencheck::{
    error::Result,
    models::{AreaResult, Config, Feed},
    pipeline,
    services::{HttpFetcher, registry},
    storage::LocalStorage,
};

/// Loipencheck - cross-country trail status aggregator
#[derive(Parser, Debug)]
#[command(
    name = "loipencheck",
    version,
    about = "Aggregates cross-country ski trail status from regional sites"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "loipencheck.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one cycle and print the feed as JSON
    Fetch {
        /// Restrict to these source ids (repeatable)
        #[arg(long = "source", value_name = "ID")]
        sources: Vec<String>,

        /// Print compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Run one cycle and write the static snapshot
    Build {
        /// Snapshot path (default: output.snapshot_path from config)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run one cycle and print a readable summary per area
    Status {
        /// Restrict to these source ids (repeatable)
        #[arg(long = "source", value_name = "ID")]
        sources: Vec<String>,
    },

    /// List the registered sources
    Sources,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging from the configured level; `-v` forces debug.
fn init_logging(level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = Config::load(&cli.config);
    let level = loaded
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| Config::default().logging.level);
    init_logging(&level, cli.verbose);

    // Logged only once the logger is up.
    let config = match loaded {
        Ok(config) => {
            log::debug!("Configuration loaded from {}", cli.config.display());
            config
        }
        Err(e) => {
            log::warn!(
                "Config load failed from {}: {}. Using defaults.",
                cli.config.display(),
                e
            );
            Config::default()
        }
    };

    match cli.command {
        Command::Fetch { sources, compact } => {
            let sources = registry::select(&sources)?;
            let fetcher = HttpFetcher::from_config(&config.crawler)?;
            let feed = pipeline::collect_feed_for(&fetcher, &sources).await;

            let json = if compact {
                serde_json::to_string(&feed)?
            } else {
                serde_json::to_string_pretty(&feed)?
            };
            println!("{json}");
        }

        Command::Build { output } => {
            let storage = match output {
                Some(path) => LocalStorage::new(path).pretty(config.output.pretty),
                None => LocalStorage::from_config(&config.output),
            };
            let fetcher = HttpFetcher::from_config(&config.crawler)?;
            pipeline::run_build(&fetcher, &storage, registry::sources()).await?;

            log::info!("Static data written to {}", storage.path().display());
        }

        Command::Status { sources } => {
            let sources = registry::select(&sources)?;
            let fetcher = HttpFetcher::from_config(&config.crawler)?;
            let feed = pipeline::collect_feed_for(&fetcher, &sources).await;
            print_status(&feed);
        }

        Command::Sources => {
            for source in registry::sources() {
                println!("{:<14} {}", source.id, source.name);
                println!("{:<14} {}", "", source.url);
                if let Some(webcam) = source.webcam_url {
                    println!("{:<14} Webcam: {}", "", webcam);
                }
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({} sources registered)", registry::sources().len());
        }
    }

    Ok(())
}

fn print_status(feed: &Feed) {
    for area in &feed.areas {
        print_area(area);
        println!();
    }
    println!(
        "{} von {} Gebieten offen, {} mit Fehler",
        feed.open_count(),
        feed.areas.len(),
        feed.failed_count()
    );
}

fn print_area(area: &AreaResult) {
    let headline = if area.open { "Offen" } else { "Geschlossen" };
    println!("{} [{}]", area.name, headline);

    if let Some(error) = &area.error {
        println!("  Fehler beim Abrufen: {error}");
        return;
    }
    if !area.trails.is_empty() {
        println!(
            "  {} von {} Loipen offen",
            area.open_trail_count(),
            area.trails.len()
        );
    }
    if let Some(updated) = &area.updated {
        println!("  Stand: {updated}");
    }
    if let Some(summary) = &area.summary {
        println!("  {summary}");
    }
    for trail in &area.trails {
        let extras: Vec<&str> = [trail.style.as_deref(), trail.distance.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if extras.is_empty() {
            println!("  - {}: {}", trail.name, trail.status.label());
        } else {
            println!(
                "  - {} ({}): {}",
                trail.name,
                extras.join(", "),
                trail.status.label()
            );
        }
        if let Some(detail) = &trail.detail {
            println!("      {detail}");
        }
    }
    if let Some(webcam) = &area.webcam_url {
        println!("  Webcam: {webcam}");
    }
}
