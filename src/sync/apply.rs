use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use super::error::{SyncError, SyncResult};
use super::plan::{Plan, PlannedAction};

/// Run every action in plan order and return how many were applied.
///
/// `on_action` is called with the index of each action before it runs. The
/// first failure stops the run; earlier actions stay applied.
pub fn apply_plan<F>(plan: &Plan, mut on_action: F) -> SyncResult<usize>
where
    F: FnMut(usize, &PlannedAction),
{
    for (idx, action) in plan.iter().enumerate() {
        on_action(idx, action);
        apply_action(action).map_err(|source| SyncError::FilesystemActionFailed {
            action: action.to_string(),
            applied: idx,
            source,
        })?;
    }
    info!(applied = plan.len(), "plan applied");
    Ok(plan.len())
}

pub fn apply_action(action: &PlannedAction) -> io::Result<()> {
    debug!(%action, "applying");
    match action {
        PlannedAction::Copy { source, dest } => copy_file(source, dest),
        PlannedAction::Delete { dest } => remove_if_present(dest),
        PlannedAction::Rename { source, dest, old_dest } => {
            copy_file(source, dest)?;
            if old_dest != dest {
                remove_if_present(old_dest)?;
            }
            Ok(())
        }
    }
}

fn copy_file(source: &Path, dest: &Path) -> io::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest)?;
    Ok(())
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
