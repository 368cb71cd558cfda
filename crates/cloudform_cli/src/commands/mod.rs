//! CLI command handlers.

/// Draft creation and submission.
pub mod create;
/// Draft flags shared by `create` and `edit`.
pub mod draft;
/// Loading, editing and resubmitting stored records.
pub mod edit;
/// Project initialisation and `.cloudform.toml` creation.
pub mod init;
/// Record listing.
pub mod list;
/// Single record inspection.
pub mod show;

use std::path::Path;

use anyhow::Context;
use cloudform_core::CONFIG_FILENAME;
use cloudform_core::prelude::*;
use cloudform_store::MockDataset;

/// Convenience alias for command return types.
pub type Result<T = ()> = anyhow::Result<T>;

/// Loads the configuration from `path`, or from `.cloudform.toml` in the
/// working directory when no path is given.
///
/// An explicit path must exist; the default file may be absent.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            Config::load(path)?
        }
        None => Config::load(Path::new(CONFIG_FILENAME))?,
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        mandatory_region = %config.mandatory_region,
        regions = config.regions.len(),
        "configuration loaded"
    );

    Ok(config)
}

/// Opens the record dataset with the configured lookup latency.
pub fn open_dataset(config: &Config) -> Result<MockDataset> {
    let dataset = MockDataset::seeded().context("failed to load record dataset")?;
    Ok(dataset.with_max_latency(config.max_latency()))
}

/// Builds the single-threaded runtime that drives loads and submissions.
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow::anyhow!("failed to create async runtime: {e}"))
}
