use std::fmt;
use std::path::{Path, PathBuf};

use super::diff::{ChangeRecord, ChangeStatus};
use super::remap::PathRemapper;

/// One filesystem operation against the destination tree, not yet executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    Copy { source: PathBuf, dest: PathBuf },
    Delete { dest: PathBuf },
    /// Copy `source` to `dest`, then drop `old_dest` from the destination tree.
    Rename { source: PathBuf, dest: PathBuf, old_dest: PathBuf },
}

impl PlannedAction {
    pub fn verb(&self) -> &'static str {
        match self {
            PlannedAction::Copy { .. } => "copy",
            PlannedAction::Delete { .. } => "delete",
            PlannedAction::Rename { .. } => "rename",
        }
    }

    pub fn dest(&self) -> &Path {
        match self {
            PlannedAction::Copy { dest, .. } | PlannedAction::Delete { dest } | PlannedAction::Rename { dest, .. } => dest,
        }
    }

    /// Human description without the leading verb.
    pub fn details(&self) -> String {
        match self {
            PlannedAction::Copy { source, dest } => format!("{} -> {}", source.display(), dest.display()),
            PlannedAction::Delete { dest } => dest.display().to_string(),
            PlannedAction::Rename { source, dest, old_dest } => {
                format!("{} -> {} (removing {})", source.display(), dest.display(), old_dest.display())
            }
        }
    }
}

impl fmt::Display for PlannedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb(), self.details())
    }
}

/// The full, ordered list of actions computed before anything touches disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub actions: Vec<PlannedAction>,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlannedAction> {
        self.actions.iter()
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a PlannedAction;
    type IntoIter = std::slice::Iter<'a, PlannedAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

/// Turns change records into planned actions rooted at the two trees.
#[derive(Debug, Clone)]
pub struct PlanBuilder<'a> {
    source_tree: &'a Path,
    dest_tree: &'a Path,
    remapper: PathRemapper,
    remap_renames: bool,
}

impl<'a> PlanBuilder<'a> {
    pub fn new(source_tree: &'a Path, dest_tree: &'a Path, remapper: PathRemapper) -> Self {
        Self { source_tree, dest_tree, remapper, remap_renames: false }
    }

    /// Send rename paths through the remapper too. Off by default: renames land
    /// at their literal source-relative paths.
    pub fn remap_renames(mut self, enabled: bool) -> Self {
        self.remap_renames = enabled;
        self
    }

    pub fn build(&self, records: &[ChangeRecord]) -> Plan {
        Plan { actions: records.iter().map(|r| self.action_for(r)).collect() }
    }

    fn action_for(&self, record: &ChangeRecord) -> PlannedAction {
        let path = record.source_path.as_str();
        match record.status {
            ChangeStatus::Added | ChangeStatus::Modified => PlannedAction::Copy {
                source: self.source_tree.join(path),
                dest: self.dest_tree.join(self.remapper.apply(path)),
            },
            ChangeStatus::Deleted => PlannedAction::Delete { dest: self.dest_tree.join(self.remapper.apply(path)) },
            ChangeStatus::Renamed => {
                let new_path = record.target_path();
                let (dest, old_dest) = if self.remap_renames {
                    (self.remapper.apply(new_path), self.remapper.apply(path))
                } else {
                    (new_path.to_string(), path.to_string())
                };
                PlannedAction::Rename {
                    source: self.source_tree.join(path),
                    dest: self.dest_tree.join(dest),
                    old_dest: self.dest_tree.join(old_dest),
                }
            }
        }
    }
}
