//! Shardmap - live shard-grid map viewer

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shardmap_viewer::app;
use shardmap_viewer::config::ViewerConfig;

/// Live map viewer for a shard-grid game world.
#[derive(Debug, Parser)]
#[command(name = "shardmap_viewer", version)]
struct Cli {
    /// Path to the JSON config file.
    #[arg(long, default_value = "shardmap.json")]
    config: std::path::PathBuf,

    /// Override the backend base URL from the config file.
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match ViewerConfig::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "could not load configuration");
            return ExitCode::FAILURE;
        }
    };
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    tracing::info!(
        base_url = %config.base_url,
        shards_x = config.shards_x,
        shards_y = config.shards_y,
        "starting shardmap viewer"
    );

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!(%err, "could not start runtime");
            return ExitCode::FAILURE;
        }
    };

    // Single-threaded by design: the tick and the poll cooperate on one
    // local task set and never preempt each other.
    let local = tokio::task::LocalSet::new();
    match local.block_on(&runtime, app::run(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "viewer exited with error");
            ExitCode::FAILURE
        }
    }
}
