//! Diff parsing, planning and applying changes between two working trees.

pub mod apply;
pub mod diff;
pub mod error;
pub mod gate;
pub mod git;
pub mod plan;
pub mod preflight;
pub mod remap;
pub mod session;

pub use apply::apply_plan;
pub use diff::{ChangeRecord, ChangeStatus, parse_name_status};
pub use error::{SyncError, SyncResult};
pub use gate::{ConfirmationGate, GateOutcome, render_preview};
pub use git::{CliGit, GitBackend, sync_commit_message};
pub use plan::{Plan, PlanBuilder, PlannedAction};
pub use remap::{PathRemapper, remap};
pub use session::{PreflightReport, SyncOutcome, SyncSession};
