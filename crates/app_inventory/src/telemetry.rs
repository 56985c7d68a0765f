use anyhow::{anyhow, Error};
use tracing_subscriber::EnvFilter;

pub fn init_local_telemetry() -> Result<(), Error> {
    // Honour RUST_LOG when it is set, otherwise show the progress messages.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
