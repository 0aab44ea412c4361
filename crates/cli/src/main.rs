use anyhow::{Context, Result};
use clap::Parser;
use forcecache_cache::{Store, StoreConfigBuilder};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod execute;

use commands::Commands;

#[derive(Parser, Debug)]
#[command(name = "forcecache")]
#[command(about = "Inspect and maintain a forcecache response cache", long_about = None)]
#[command(version)]
struct Cli {
    /// Cache root directory (overrides FORCECACHE_PATH and the config file)
    #[arg(long, global = true)]
    path: Option<PathBuf>,

    /// JSON configuration file with `path` and `cleanup` fields
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let mut builder = StoreConfigBuilder::new();
    if let Some(file) = &cli.config {
        builder = builder.with_file(file)?;
    }
    builder = builder.with_env()?;
    if let Some(path) = cli.path {
        builder = builder.with_path(path);
    }
    tracing::debug!(
        path_source = ?builder.path_source(),
        cleanup_source = ?builder.cleanup_source(),
        "Resolved cache configuration"
    );
    // `cleanup` only matters to a long-running store
    let config = builder.into_config();
    config.validate_path()?;

    // One-shot commands never run the background vacuum
    let store = Store::new(config.path.clone(), Duration::ZERO)
        .await
        .with_context(|| format!("failed to open cache at {}", config.path.display()))?;

    cli.command.execute(&store).await
}
