use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use treesync::config::{SyncConfig, save_config};

pub fn handle_init(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists: {} (use --force to overwrite)", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    save_config(&SyncConfig::default(), &path)?;

    println!("{} Wrote {}", "✔".green().bold(), path.display());
    println!("Edit sourceTree, destTree, commitFrom and commitTo, then run 'treesync plan'.");
    Ok(())
}
