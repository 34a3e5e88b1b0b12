//! Binary entry point: resolve configuration, start file logging, open the
//! record store, and hand control to the terminal UI.
use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use user_records::{run_app, App, AppConfig, Cli, UserStore};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(&cli).context("failed to resolve configuration")?;

    fs::create_dir_all(&config.connection.data_dir).with_context(|| {
        format!(
            "failed to create data directory {}",
            config.connection.data_dir.display()
        )
    })?;
    init_logging(&config)?;

    info!(
        database = %config.connection.database_path().display(),
        export_dir = %config.export_dir.display(),
        "starting user records manager"
    );

    let store = UserStore::open(config.connection.clone())?;
    let mut app = App::new(store, config.export_dir.clone());
    run_app(&mut app)
}

/// Log to a file in the data directory; the terminal belongs to the UI.
/// `RUST_LOG` wins over the configured filter.
fn init_logging(config: &AppConfig) -> Result<()> {
    let log_path = config.log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}
