use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::error::{SyncError, SyncResult};

// `R` may carry a similarity score, e.g. `R087`.
static STATUS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(?P<single>[AMD])|R(?P<score>\d{1,3})?)$").expect("valid status regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl ChangeStatus {
    pub fn code(self) -> char {
        match self {
            ChangeStatus::Added => 'A',
            ChangeStatus::Modified => 'M',
            ChangeStatus::Deleted => 'D',
            ChangeStatus::Renamed => 'R',
        }
    }
}

/// One line of `git diff --name-status` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub status: ChangeStatus,
    pub source_path: String,
    /// Only set for renames: the path the file was moved to.
    pub dest_path: Option<String>,
}

impl ChangeRecord {
    pub fn added(path: impl Into<String>) -> Self {
        Self { status: ChangeStatus::Added, source_path: path.into(), dest_path: None }
    }

    pub fn modified(path: impl Into<String>) -> Self {
        Self { status: ChangeStatus::Modified, source_path: path.into(), dest_path: None }
    }

    pub fn deleted(path: impl Into<String>) -> Self {
        Self { status: ChangeStatus::Deleted, source_path: path.into(), dest_path: None }
    }

    pub fn renamed(old_path: impl Into<String>, new_path: impl Into<String>) -> Self {
        Self { status: ChangeStatus::Renamed, source_path: old_path.into(), dest_path: Some(new_path.into()) }
    }

    /// Path the change lands on: the new path for renames, the only path otherwise.
    pub fn target_path(&self) -> &str {
        self.dest_path.as_deref().unwrap_or(&self.source_path)
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.dest_path {
            Some(new_path) => write!(f, "{}\t{}\t{}", self.status.code(), self.source_path, new_path),
            None => write!(f, "{}\t{}", self.status.code(), self.source_path),
        }
    }
}

/// Parse name-status diff text into change records, keeping line order.
///
/// Blank lines are skipped and status codes other than `A`, `M`, `D` and `R`
/// are ignored. A recognised line that lacks its path fields is an error.
pub fn parse_name_status(output: &str) -> SyncResult<Vec<ChangeRecord>> {
    let mut records = Vec::new();
    for raw in output.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(record) = parse_line(line)? {
            records.push(record);
        }
    }
    Ok(records)
}

fn parse_line(line: &str) -> SyncResult<Option<ChangeRecord>> {
    let mut fields = line.split('\t');
    let code = fields.next().unwrap_or_default().trim();
    let Some(caps) = STATUS_RE.captures(code) else {
        debug!(code, line, "ignoring unsupported diff status");
        return Ok(None);
    };

    let malformed = || SyncError::MalformedDiffLine { line: line.to_string() };
    let mut next_path = || fields.next().filter(|p| !p.is_empty()).ok_or_else(malformed);

    let record = match caps.name("single").map(|m| m.as_str()) {
        Some("A") => ChangeRecord::added(next_path()?),
        Some("M") => ChangeRecord::modified(next_path()?),
        Some(_) => ChangeRecord::deleted(next_path()?),
        None => {
            let old_path = next_path()?;
            let new_path = next_path()?;
            if old_path == new_path {
                return Err(malformed());
            }
            ChangeRecord::renamed(old_path, new_path)
        }
    };
    Ok(Some(record))
}
