use std::path::Path;

use tracing::{info, warn};

use super::error::{SyncError, SyncResult};
use super::git::GitBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeStatus {
    Repository,
    /// No `.git` entry, tolerated because validation is off.
    MissingGitDir,
}

/// Check that `tree` exists and, when `require_git` is set, that it is a git repository.
pub fn validate_tree(tree: &Path, require_git: bool) -> SyncResult<TreeStatus> {
    if !tree.exists() {
        return Err(SyncError::PathNotFound(tree.to_path_buf()));
    }
    // `.git` is a file in linked worktrees and submodules
    if tree.join(".git").exists() {
        return Ok(TreeStatus::Repository);
    }
    if require_git {
        return Err(SyncError::NotAGitRepository(tree.to_path_buf()));
    }
    warn!(tree = %tree.display(), "no .git directory, continuing without validation");
    Ok(TreeStatus::MissingGitDir)
}

/// Return the checked-out commit of `tree` if it contains `expected`.
pub fn validate_expected_commit<G: GitBackend + ?Sized>(git: &G, tree: &Path, expected: &str) -> SyncResult<String> {
    let actual = git.rev_parse_head(tree)?;
    info!(tree = %tree.display(), %actual, "current destination commit");
    if !actual.contains(expected) {
        return Err(SyncError::CommitMismatch { expected: expected.to_string(), actual });
    }
    Ok(actual)
}
