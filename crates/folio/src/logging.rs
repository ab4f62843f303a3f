//! File logging. The terminal belongs to the UI, so logs go to
//! `folio.log` in the platform data directory.

use std::fs::{self, File};
use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::Level;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "folio.log";

/// Install the global subscriber. Verbosity follows `RUST_LOG`, INFO by
/// default.
pub fn init() -> Result<()> {
    let dir = folio_config::data_dir().ok_or_else(|| eyre!("no data directory on this platform"))?;
    fs::create_dir_all(&dir).wrap_err_with(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = File::create(&path).wrap_err_with(|| format!("failed to create {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}
