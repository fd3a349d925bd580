use serde::{Deserialize, Serialize};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "treesync";

/// Per-user defaults, persisted with confy. Values set in a sync config win.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    /// Rename detection threshold passed to `git diff --find-renames`
    #[serde(default)]
    pub similarity_threshold: Option<u8>,
    /// Value for `git diff --diff-filter`
    #[serde(default)]
    pub diff_filter: Option<String>,
    /// git executable name or path
    #[serde(default)]
    pub git_binary: Option<String>,
}

pub fn load_settings() -> Result<Settings> {
    let cfg: Settings = confy::load(APP_NAME, None).context("failed to load settings")?;
    Ok(cfg)
}

pub fn save_settings(cfg: &Settings) -> Result<()> {
    confy::store(APP_NAME, None, cfg).context("failed to save settings")?;
    Ok(())
}

pub fn settings_path() -> Result<PathBuf> {
    confy::get_configuration_file_path(APP_NAME, None).context("failed to locate settings file")
}

/// Resolve the git executable from stored settings or fall back to `git`.
pub fn get_git_binary(settings: &Settings) -> String {
    settings
        .git_binary
        .as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "git".to_string())
}

/// Expand a leading `~` to the current user's home directory.
pub fn resolve_home_path(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) if rest.as_os_str().is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

use supports_color::Stream;
use owo_colors::OwoColorize;

pub fn color_enabled_stdout() -> bool {
    supports_color::on(Stream::Stdout).is_some()
}

pub fn sym_check(enabled: bool) -> String {
    if enabled { format!("{}", "✔".green().bold()) } else { "✔".to_string() }
}

pub fn sym_cross(enabled: bool) -> String {
    if enabled { format!("{}", "✖".red().bold()) } else { "x".to_string() }
}

pub fn sym_question(enabled: bool) -> String {
    if enabled { format!("{}", "?".cyan().bold()) } else { "?".to_string() }
}

pub fn sym_gear(enabled: bool) -> String {
    if enabled { format!("{}", "⚙".blue().bold()) } else { "⚙".to_string() }
}

/// Yellow warning line, plain when color is off.
pub fn warn_line(enabled: bool, msg: &str) -> String {
    if enabled { format!("{} {}", "!".yellow().bold(), msg.yellow()) } else { format!("! {}", msg) }
}
