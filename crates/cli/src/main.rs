use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reelsync_core::{load_config, load_config_from_env, validate_config, SyncRunner};

/// Default configuration file, used when neither `--config` nor
/// `REELSYNC_CONFIG` is given.
const DEFAULT_CONFIG: &str = "reelsync.toml";

#[derive(Debug, Parser)]
#[command(
    name = "reelsync",
    version,
    about = "Sync filmography credits and posters into a static page",
    after_help = "Without --config or REELSYNC_CONFIG, reelsync.toml is read if present; otherwise built-in defaults apply. REELSYNC_* variables override either."
)]
struct Args {
    /// IMDb name id to sync, overriding `source.name_id`
    #[arg(value_name = "NAME_ID")]
    name_id: Option<String>,

    /// Plan poster and document changes without touching any file
    #[arg(long)]
    dry_run: bool,

    /// Configuration file
    #[arg(long, value_name = "PATH", env = "REELSYNC_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let default_path = PathBuf::from(DEFAULT_CONFIG);
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None if default_path.exists() => {
            info!("Loading configuration from {:?}", default_path);
            load_config(&default_path)
                .with_context(|| format!("Failed to load config from {:?}", default_path))?
        }
        None => {
            info!("No {} found, using built-in defaults", DEFAULT_CONFIG);
            load_config_from_env().context("Failed to apply environment overrides")?
        }
    };

    if let Some(name_id) = args.name_id {
        config.source.name_id = name_id;
    }
    if args.dry_run {
        config.sync.dry_run = true;
    }

    validate_config(&config).context("Configuration validation failed")?;

    info!("Syncing credits for {}", config.source.name_id);
    info!("Host document: {:?}", config.document.path);
    info!("Poster directory: {:?}", config.posters.dir);

    let runner = SyncRunner::with_http_client(config).context("Failed to set up sync")?;
    let report = runner.run().await.context("Sync failed")?;

    if let Some(reconcile) = &report.reconcile {
        if !reconcile.is_clean() {
            warn!(
                "{} poster downloads and {} removals failed; they will be retried next run",
                reconcile.fetch_failures.len(),
                reconcile.remove_failures.len()
            );
        }
    }

    info!(
        "Done: {} credits, document {}",
        report.credits.len(),
        if report.document_written {
            "updated"
        } else if report.document_changed {
            "would change"
        } else {
            "unchanged"
        }
    );

    Ok(())
}
