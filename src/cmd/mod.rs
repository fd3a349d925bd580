pub mod check;
pub mod defaults;
pub mod init;
pub mod plan;
pub mod sync;

use std::path::Path;

use anyhow::{Context, Result};
use treesync::config::{SyncConfig, load_config};
use treesync::sync::CliGit;
use treesync::util::{Settings, get_git_binary, load_settings};

/// Load the sync config and user settings, and locate git.
pub(crate) fn load_run_context(config_path: &Path) -> Result<(SyncConfig, CliGit)> {
    let settings: Settings = load_settings().unwrap_or_default();
    let config = load_config(config_path)?
        .resolved(&settings)
        .with_context(|| format!("invalid config {}", config_path.display()))?;
    let git = CliGit::locate(&get_git_binary(&settings))?;
    Ok((config, git))
}
