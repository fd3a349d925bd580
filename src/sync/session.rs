use std::io::{BufRead, Write};

use colored::Colorize;
use tracing::{info, warn};

use super::apply::apply_plan;
use super::diff::parse_name_status;
use super::error::{SyncError, SyncResult};
use super::gate::{ConfirmationGate, GateOutcome};
use super::git::{GitBackend, sync_commit_message};
use super::plan::{Plan, PlanBuilder, PlannedAction};
use super::preflight::{TreeStatus, validate_expected_commit, validate_tree};
use crate::config::SyncConfig;
use crate::util::warn_line;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightReport {
    pub source: TreeStatus,
    pub dest: TreeStatus,
    /// Destination `HEAD`, when the expected-commit check ran.
    pub dest_commit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    NothingToSync,
    Finished(GateOutcome),
}

/// One sync run over a fixed config and git backend.
pub struct SyncSession<'a, G: GitBackend + ?Sized> {
    config: &'a SyncConfig,
    git: &'a G,
    color: bool,
}

fn emit(out: &mut impl Write, text: &str) -> SyncResult<()> {
    out.write_all(text.as_bytes()).map_err(SyncError::Prompt)
}

impl<'a, G: GitBackend + ?Sized> SyncSession<'a, G> {
    pub fn new(config: &'a SyncConfig, git: &'a G) -> Self {
        Self { config, git, color: false }
    }

    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Check both trees and the destination's checked-out commit before any diff work.
    pub fn preflight(&self, out: &mut impl Write) -> SyncResult<PreflightReport> {
        let require = self.config.require_git_validation;
        let source = validate_tree(&self.config.source_tree, require)?;
        let dest = validate_tree(&self.config.dest_tree, require)?;
        for (tree, status) in [(&self.config.source_tree, source), (&self.config.dest_tree, dest)] {
            if status == TreeStatus::MissingGitDir {
                let msg = format!(
                    "The path \"{}\" does not seem to be a valid Git repository (missing .git directory).",
                    tree.display()
                );
                emit(out, &format!("{}\n", warn_line(self.color, &msg)))?;
            }
        }

        let dest_commit = match self.config.dest_expected_commit.as_deref() {
            Some(expected) if require => {
                let actual = validate_expected_commit(self.git, &self.config.dest_tree, expected)?;
                emit(out, &format!("Current commit in {}: {}\n", self.config.dest_tree.display(), actual))?;
                Some(actual)
            }
            Some(expected) => {
                warn!(expected, "expected destination commit set but validation is disabled, skipping check");
                None
            }
            None => None,
        };

        Ok(PreflightReport { source, dest, dest_commit })
    }

    /// Raw name-status diff of the source tree, trimmed.
    pub fn diff(&self) -> SyncResult<String> {
        let raw = self.git.diff_name_status(
            &self.config.source_tree,
            &self.config.commit_from,
            &self.config.commit_to,
            self.config.similarity_threshold(),
            self.config.diff_filter(),
        )?;
        Ok(raw.trim().to_string())
    }

    pub fn build_plan(&self, diff: &str) -> SyncResult<Plan> {
        let records = parse_name_status(diff)?;
        let plan = PlanBuilder::new(&self.config.source_tree, &self.config.dest_tree, self.config.remapper())
            .remap_renames(self.config.remap_renames)
            .build(&records);
        info!(records = records.len(), actions = plan.len(), "plan built");
        Ok(plan)
    }

    /// Echo the diff and build the plan. `None` when there is nothing to sync.
    pub fn prepare(&self, out: &mut impl Write) -> SyncResult<Option<Plan>> {
        let diff = self.diff()?;
        let header = format!("Changes between {} and {}", self.config.commit_from, self.config.commit_to);
        if self.color {
            emit(out, &format!("{}\n{}\n\n", header.blue(), diff.blue()))?;
        } else {
            emit(out, &format!("{header}\n{diff}\n\n"))?;
        }
        if diff.is_empty() {
            emit(out, "No changes to sync.\n")?;
            return Ok(None);
        }
        let plan = self.build_plan(&diff)?;
        if plan.is_empty() {
            emit(out, "No changes to sync.\n")?;
            return Ok(None);
        }
        Ok(Some(plan))
    }

    /// Full run: preflight, diff, plan, then the two confirmation prompts.
    pub fn run<R, W, F>(&self, input: R, mut output: W, mut on_action: F) -> SyncResult<SyncOutcome>
    where
        R: BufRead,
        W: Write,
        F: FnMut(usize, &PlannedAction),
    {
        self.preflight(&mut output)?;
        let Some(plan) = self.prepare(&mut output)? else {
            return Ok(SyncOutcome::NothingToSync);
        };

        let dest_tree = &self.config.dest_tree;
        let message = sync_commit_message(&self.config.source_tree);
        let mut gate = ConfirmationGate::new(input, &mut output).with_color(self.color);
        let outcome = gate.run(
            &plan,
            |plan| apply_plan(plan, &mut on_action),
            || self.git.commit_all(dest_tree, &message),
        )?;
        Ok(SyncOutcome::Finished(outcome))
    }
}
