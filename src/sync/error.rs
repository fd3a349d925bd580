use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("not a git repository (missing .git directory): {}", .0.display())]
    NotAGitRepository(PathBuf),

    #[error("destination is checked out at {actual}, expected a commit containing '{expected}'")]
    CommitMismatch { expected: String, actual: String },

    #[error("malformed diff line: {line:?}")]
    MalformedDiffLine { line: String },

    #[error("failed to {action} after {applied} applied action(s); changes may be partially applied")]
    FilesystemActionFailed {
        action: String,
        applied: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("git executable not found (looked for '{0}')")]
    GitNotFound(String),

    #[error("revision '{0}' looks like a command-line option")]
    InvalidRevision(String),

    #[error("`{command}` failed: {stderr}")]
    GitCommandFailed { command: String, stderr: String },

    #[error("failed to talk to the terminal")]
    Prompt(#[source] std::io::Error),
}

pub type SyncResult<T> = Result<T, SyncError>;
