//! Orca Fleet - Main Entry Point
//!
//! Console fuel monitor for the Orca Trucks fleet

use orca_fleet::app::application::run_app;
use orca_fleet::app::logging::init_logging;
use orca_fleet::domain::AppConfig;
use orca_fleet::utils::config_store::load_app_config;

fn main() -> anyhow::Result<()> {
    let (config, load_error) = match load_app_config() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    let _log_guard = init_logging(&config.log)?;
    if let Some(err) = load_error {
        tracing::warn!(error = %err, "Failed to load config, using defaults");
    }

    tracing::info!("Starting Orca fleet monitor...");

    run_app(config)
}
