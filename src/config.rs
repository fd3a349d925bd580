use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};

use crate::sync::PathRemapper;
use crate::util::{resolve_home_path, Settings};

pub const DEFAULT_CONFIG_FILE: &str = "treesync.json";
pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 50;
pub const DEFAULT_DIFF_FILTER: &str = "ADMR";

const KNOWN_DIFF_FILTER_CODES: &str = "ACDMRTUXB";

/// Everything one sync run needs. Loaded once, then only read.
///
/// The legacy `config.json` keys (`repoFromPath`, `repoToPath`,
/// `needValdateGit`, `flagCommit`) are accepted as aliases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    #[serde(alias = "repoFromPath")]
    pub source_tree: PathBuf,
    #[serde(alias = "repoToPath")]
    pub dest_tree: PathBuf,
    pub commit_from: String,
    pub commit_to: String,
    #[serde(default, alias = "needValdateGit")]
    pub require_git_validation: bool,
    /// Substring the destination's `HEAD` must contain before syncing.
    #[serde(default, alias = "flagCommit", skip_serializing_if = "Option::is_none")]
    pub dest_expected_commit: Option<String>,
    #[serde(default)]
    pub source_prefix: String,
    #[serde(default)]
    pub dest_prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_threshold: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_filter: Option<String>,
    #[serde(default)]
    pub remap_renames: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            source_tree: PathBuf::from("~/projects/source"),
            dest_tree: PathBuf::from("~/projects/destination"),
            commit_from: "HEAD~1".to_string(),
            commit_to: "HEAD".to_string(),
            require_git_validation: true,
            dest_expected_commit: None,
            source_prefix: String::new(),
            dest_prefix: String::new(),
            similarity_threshold: Some(DEFAULT_SIMILARITY_THRESHOLD),
            diff_filter: Some(DEFAULT_DIFF_FILTER.to_string()),
            remap_renames: false,
        }
    }
}

impl SyncConfig {
    /// Expand `~` in both tree paths, fill unset diff options from the user
    /// settings and check the result.
    pub fn resolved(mut self, settings: &Settings) -> Result<Self> {
        self.source_tree = resolve_home_path(&self.source_tree);
        self.dest_tree = resolve_home_path(&self.dest_tree);
        if self.similarity_threshold.is_none() {
            self.similarity_threshold = Some(settings.similarity_threshold.unwrap_or(DEFAULT_SIMILARITY_THRESHOLD));
        }
        if self.diff_filter.is_none() {
            self.diff_filter =
                Some(settings.diff_filter.clone().unwrap_or_else(|| DEFAULT_DIFF_FILTER.to_string()));
        }
        self.dest_expected_commit = self
            .dest_expected_commit
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.commit_from.trim().is_empty() || self.commit_to.trim().is_empty() {
            anyhow::bail!("commitFrom and commitTo must both be set");
        }
        for rev in [&self.commit_from, &self.commit_to] {
            if rev.trim_start().starts_with('-') {
                anyhow::bail!("commit '{}' must not start with '-'", rev);
            }
        }
        let threshold = self.similarity_threshold();
        if threshold > 100 {
            anyhow::bail!("similarityThreshold must be between 0 and 100, got {}", threshold);
        }
        let filter = self.diff_filter();
        if filter.is_empty() || !filter.chars().all(|c| KNOWN_DIFF_FILTER_CODES.contains(c.to_ascii_uppercase())) {
            anyhow::bail!("diffFilter '{}' is not a valid git --diff-filter value", filter);
        }
        Ok(())
    }

    pub fn similarity_threshold(&self) -> u8 {
        self.similarity_threshold.unwrap_or(DEFAULT_SIMILARITY_THRESHOLD)
    }

    pub fn diff_filter(&self) -> &str {
        self.diff_filter.as_deref().unwrap_or(DEFAULT_DIFF_FILTER)
    }

    pub fn remapper(&self) -> PathRemapper {
        PathRemapper::new(self.source_prefix.clone(), self.dest_prefix.clone())
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("yaml" | "yml"))
}

pub fn load_config(config_path: &Path) -> Result<SyncConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;

    let config: SyncConfig = if is_yaml(config_path) {
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", config_path.display()))?
    } else {
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", config_path.display()))?
    };

    Ok(config)
}

pub fn save_config(config: &SyncConfig, config_path: &Path) -> Result<()> {
    let content = if is_yaml(config_path) {
        serde_yaml::to_string(config).context("Failed to serialize config")?
    } else {
        let mut json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
        json.push('\n');
        json
    };

    std::fs::write(config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(())
}
