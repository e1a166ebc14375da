//! Study Jams CLI - leaderboard and progress analytics.

mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use studyjam_core::{resource_catalog, LabCatalog, RankingMode, SortMode};
use studyjam_feed::{FeedConfig, FileProfileSource, HttpProfileSource, Poller, ProfileSource};
use studyjam_progress::ProgressEngine;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "studyjam")]
#[command(about = "Study Jams progress leaderboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Leaderboard API URL
    #[arg(long, global = true, env = "STUDYJAM_API_URL")]
    endpoint: Option<String>,

    /// Use the hosted API server
    #[arg(long, global = true)]
    hosted: bool,

    /// Read profiles from a JSON file instead of the API
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Alternative lab catalog (JSON array of {id, name, shortName})
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "10")]
    timeout: u64,

    /// Ranking mode (completion, badges)
    #[arg(long, global = true, default_value = "completion")]
    mode: RankingMode,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the ranked leaderboard
    Leaderboard {
        /// Only show participants whose name contains this text
        #[arg(long, default_value = "")]
        search: String,
        /// Ordering (rank, name, completion, badges)
        #[arg(long, default_value = "rank")]
        sort: SortMode,
        /// Include the per-lab completion grid
        #[arg(long)]
        labs: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show aggregate statistics and breakdowns
    Stats {
        /// Number of top performers to list
        #[arg(long, default_value = "10")]
        top: usize,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Poll the feed and redraw the leaderboard on every update
    Watch {
        /// Poll interval in seconds
        #[arg(long, default_value = "5")]
        interval: u64,
        /// Only show participants whose name contains this text
        #[arg(long, default_value = "")]
        search: String,
        /// Ordering (rank, name, completion, badges)
        #[arg(long, default_value = "rank")]
        sort: SortMode,
    },
    /// List the lab catalog
    Labs {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List lab links and tutorial videos
    Resources {
        /// Only show courses whose title contains this text
        #[arg(long)]
        lab: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let catalog = load_catalog(cli.catalog.as_deref()).await?;
    let engine = ProgressEngine::new(catalog).with_mode(cli.mode);

    match &cli.command {
        Commands::Leaderboard { search, sort, labs, json } => {
            let source = build_source(&cli, &feed_config(&cli, None))?;
            let raw = source
                .fetch()
                .await
                .with_context(|| format!("Failed to fetch profiles from {}", source.describe()))?;

            let board = engine.build(&raw);
            let view = board.view(search, *sort);

            if *json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                render::print_stats_summary(&board.stats);
                render::print_leaderboard(&view, engine.catalog(), *labs);
            }
        }
        Commands::Stats { top, json } => {
            let source = build_source(&cli, &feed_config(&cli, None))?;
            let raw = source
                .fetch()
                .await
                .with_context(|| format!("Failed to fetch profiles from {}", source.describe()))?;

            let board = engine.build(&raw);
            let analytics = engine.analytics(&board, *top);

            if *json {
                let out = serde_json::json!({
                    "stats": board.stats,
                    "analytics": analytics,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                render::print_stats_summary(&board.stats);
                render::print_analytics(&analytics);
            }
        }
        Commands::Watch { interval, search, sort } => {
            let config = feed_config(&cli, Some(Duration::from_secs((*interval).max(1))));
            let source = build_source(&cli, &config)?;
            watch(source, &config, &engine, search, *sort).await?;
        }
        Commands::Labs { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(engine.catalog())?);
            } else {
                render::print_labs(engine.catalog());
            }
        }
        Commands::Resources { lab, json } => {
            let needle = lab.as_deref().unwrap_or_default().to_lowercase();
            let groups: Vec<_> = resource_catalog()
                .into_iter()
                .filter(|group| group.title.to_lowercase().contains(&needle))
                .collect();

            if *json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else {
                render::print_resources(&groups);
            }
        }
    }

    Ok(())
}

async fn load_catalog(path: Option<&Path>) -> Result<LabCatalog> {
    let Some(path) = path else {
        return Ok(LabCatalog::study_jams());
    };

    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read lab catalog {}", path.display()))?;
    let catalog = LabCatalog::from_json(&json)
        .with_context(|| format!("Invalid lab catalog {}", path.display()))?;

    info!("Loaded {} labs from {}", catalog.len(), path.display());
    Ok(catalog)
}

fn feed_config(cli: &Cli, poll_interval: Option<Duration>) -> FeedConfig {
    let mut config = if cli.hosted {
        FeedConfig::hosted()
    } else {
        FeedConfig::default()
    };
    if let Some(endpoint) = &cli.endpoint {
        config = config.with_endpoint(endpoint.clone());
    }
    if let Some(interval) = poll_interval {
        config = config.with_poll_interval(interval);
    }
    config.with_request_timeout(Duration::from_secs(cli.timeout.max(1)))
}

fn build_source(cli: &Cli, config: &FeedConfig) -> Result<Arc<dyn ProfileSource>> {
    if let Some(path) = &cli.file {
        debug!("Reading profiles from {}", path.display());
        return Ok(Arc::new(FileProfileSource::new(path)));
    }

    debug!("Feed config: {:?}", config);
    let source = HttpProfileSource::new(config).context("Failed to build HTTP client")?;
    Ok(Arc::new(source))
}

async fn watch(
    source: Arc<dyn ProfileSource>,
    config: &FeedConfig,
    engine: &ProgressEngine,
    search: &str,
    sort: SortMode,
) -> Result<()> {
    let poller = Poller::from_config(source, config);
    let mut updates = poller.store().subscribe();
    let handle = poller.spawn();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping poller");
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let Some(snapshot) = updates.borrow_and_update().as_ref().cloned() else {
                    continue;
                };

                let board = engine.build(&snapshot.profiles);
                let view = board.view(search, sort);

                render::clear_screen();
                println!(
                    "Snapshot #{} at {} (every {}s, Ctrl+C to quit)\n",
                    snapshot.sequence,
                    snapshot.fetched_at.format("%H:%M:%S"),
                    config.poll_interval.as_secs()
                );
                render::print_stats_summary(&board.stats);
                render::print_leaderboard(&view, engine.catalog(), false);
            }
        }
    }

    handle.stop().await;
    Ok(())
}
