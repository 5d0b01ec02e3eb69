//! Logging init: stderr only, quiet unless `RUST_LOG` asks for more.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Initialize structured logging to stderr.
///
/// Returns Err if a global subscriber is already installed; callers may ignore it.
pub fn init_logging() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging init failed: {}", e))?;

    tracing::debug!("logging initialized");
    Ok(())
}
