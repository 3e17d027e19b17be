// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;

/// Validate a configuration and log what it resolves to.
pub fn run_validate(config: &Config) -> Result<()> {
    log::info!("Validating configuration...");

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    log::info!("Config OK");
    log::info!("    source: {}", config.source.location);
    log::info!("    ordering: {:?}", config.ordering.policy);
    log::info!(
        "    render target: {} ({:?})",
        config.render.target,
        config.render.mode
    );
    log::info!("    columns: {} fields", config.columns.width());

    Ok(())
}
