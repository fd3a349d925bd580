use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use super::error::{SyncError, SyncResult};

/// The handful of git operations a sync needs.
pub trait GitBackend {
    /// Raw `git diff --name-status` text for `from..to` in `repo`.
    fn diff_name_status(&self, repo: &Path, from: &str, to: &str, threshold: u8, filter: &str) -> SyncResult<String>;

    fn rev_parse_head(&self, repo: &Path) -> SyncResult<String>;

    /// Stage everything in `repo` and commit it with `message`.
    fn commit_all(&self, repo: &Path, message: &str) -> SyncResult<()>;
}

/// Shells out to the git executable.
#[derive(Debug, Clone)]
pub struct CliGit {
    binary: PathBuf,
}

impl CliGit {
    /// Resolve `program` (a name on PATH or an explicit path).
    pub fn locate(program: &str) -> SyncResult<Self> {
        let binary = which::which(program).map_err(|_| SyncError::GitNotFound(program.to_string()))?;
        debug!(binary = %binary.display(), "using git");
        Ok(Self { binary })
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn command(&self, repo: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        // Non-ASCII paths come back verbatim instead of C-quoted.
        cmd.arg("-C").arg(repo).args(["-c", "core.quotePath=false"]);
        cmd
    }

    fn capture(&self, repo: &Path, args: &[&str]) -> SyncResult<String> {
        let rendered = format!("git -C {} {}", repo.display(), args.join(" "));
        debug!(command = %rendered, "running");
        let out = self
            .command(repo)
            .args(args)
            .output()
            .map_err(|e| SyncError::GitCommandFailed { command: rendered.clone(), stderr: e.to_string() })?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
            return Err(SyncError::GitCommandFailed { command: rendered, stderr });
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }

    // Output goes straight to the terminal; only the exit status is checked.
    fn passthrough(&self, repo: &Path, args: &[&str]) -> SyncResult<()> {
        let rendered = format!("git -C {} {}", repo.display(), args.join(" "));
        debug!(command = %rendered, "running");
        let status = self
            .command(repo)
            .args(args)
            .stdin(Stdio::null())
            .status()
            .map_err(|e| SyncError::GitCommandFailed { command: rendered.clone(), stderr: e.to_string() })?;
        if !status.success() {
            return Err(SyncError::GitCommandFailed { command: rendered, stderr: format!("exited with {status}") });
        }
        Ok(())
    }
}

impl GitBackend for CliGit {
    fn diff_name_status(&self, repo: &Path, from: &str, to: &str, threshold: u8, filter: &str) -> SyncResult<String> {
        for rev in [from, to] {
            if rev.starts_with('-') {
                return Err(SyncError::InvalidRevision(rev.to_string()));
            }
        }
        let filter_arg = format!("--diff-filter={filter}");
        let renames_arg = format!("--find-renames={threshold}%");
        self.capture(repo, &["diff", "--name-status", &filter_arg, &renames_arg, from, to])
    }

    fn rev_parse_head(&self, repo: &Path) -> SyncResult<String> {
        Ok(self.capture(repo, &["rev-parse", "HEAD"])?.trim().to_string())
    }

    fn commit_all(&self, repo: &Path, message: &str) -> SyncResult<()> {
        self.passthrough(repo, &["add", "."])?;
        self.passthrough(repo, &["commit", "-m", message])
    }
}

/// Commit message used when committing the destination tree.
pub fn sync_commit_message(source_tree: &Path) -> String {
    let name = source_tree
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source_tree.display().to_string());
    format!("Synced changes from {name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_message_uses_base_name() {
        assert_eq!(sync_commit_message(Path::new("/home/me/work/site-src")), "Synced changes from site-src");
    }

    #[test]
    fn option_like_revisions_are_rejected() {
        let Ok(git) = CliGit::locate("git") else { return };
        let err = git.diff_name_status(Path::new("."), "--output=/tmp/x", "HEAD", 50, "ADMR").unwrap_err();
        assert!(matches!(err, SyncError::InvalidRevision(rev) if rev == "--output=/tmp/x"));
    }

    #[test]
    fn missing_binary_is_reported() {
        let err = CliGit::locate("definitely-not-a-real-git-binary-xyz").unwrap_err();
        assert!(matches!(err, SyncError::GitNotFound(name) if name == "definitely-not-a-real-git-binary-xyz"));
    }
}
