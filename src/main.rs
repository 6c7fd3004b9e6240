mod config;
mod errors;
mod models;
mod query;
mod run;
mod store;
mod ui;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let (args, file_override) = run::split_file_flag(std::env::args().collect());
    let config = config::Config::load(file_override.as_deref())
        .context("Failed to load configuration")?;
    let store = store::ExpenseStore::open(&config).with_context(|| {
        format!(
            "Failed to open expense store: {}",
            config.store_path.display()
        )
    })?;

    run::as_cli(&args, &store)
}
