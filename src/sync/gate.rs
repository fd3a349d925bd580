use std::io::{BufRead, Write};

use colored::Colorize;
use tracing::debug;

use super::error::{SyncError, SyncResult};
use super::plan::Plan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Declined,
    AppliedNotCommitted,
    Committed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Preview,
    Apply,
    Done(GateOutcome),
}

/// Render the plan as shown before the first prompt.
pub fn render_preview(plan: &Plan, color: bool) -> String {
    let mut out = format!("{} change(s) to apply:\n", plan.len());
    for (idx, action) in plan.iter().enumerate() {
        let verb = action.verb();
        let verb = if color {
            match verb {
                "copy" => verb.green().bold().to_string(),
                "delete" => verb.red().bold().to_string(),
                _ => verb.yellow().bold().to_string(),
            }
        } else {
            verb.to_string()
        };
        out.push_str(&format!("  {:>3}. {} {}\n", idx + 1, verb, action.details()));
    }
    out
}

/// Two yes/no prompts around applying a plan: one before touching the
/// destination tree, one before committing it. Anything other than `y`
/// (case-insensitive, surrounding whitespace ignored) means no.
pub struct ConfirmationGate<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> ConfirmationGate<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output, color: false }
    }

    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn run<A, C>(&mut self, plan: &Plan, apply: A, commit: C) -> SyncResult<GateOutcome>
    where
        A: FnOnce(&Plan) -> SyncResult<usize>,
        C: FnOnce() -> SyncResult<()>,
    {
        let mut apply = Some(apply);
        let mut commit = Some(commit);
        let mut state = GateState::Preview;
        loop {
            debug!(?state, "confirmation gate");
            state = match state {
                GateState::Preview => {
                    let preview = render_preview(plan, self.color);
                    self.say(&preview)?;
                    if self.ask("Apply these changes to the destination tree? (y/n)")? {
                        GateState::Apply
                    } else {
                        self.say("Sync cancelled, nothing was changed.\n")?;
                        GateState::Done(GateOutcome::Declined)
                    }
                }
                GateState::Apply => {
                    if let Some(apply) = apply.take() {
                        apply(plan)?;
                    }
                    if !self.ask("All changes have been applied. Do you want to commit these changes? (y/n)")? {
                        self.say("Changes not committed.\n")?;
                        GateState::Done(GateOutcome::AppliedNotCommitted)
                    } else {
                        if let Some(commit) = commit.take() {
                            commit()?;
                        }
                        self.say("Changes committed.\n")?;
                        GateState::Done(GateOutcome::Committed)
                    }
                }
                GateState::Done(outcome) => return Ok(outcome),
            };
        }
    }

    fn say(&mut self, text: &str) -> SyncResult<()> {
        self.output.write_all(text.as_bytes()).map_err(SyncError::Prompt)?;
        self.output.flush().map_err(SyncError::Prompt)
    }

    fn ask(&mut self, question: &str) -> SyncResult<bool> {
        let question = if self.color { question.yellow().to_string() } else { question.to_string() };
        self.say(&format!("{question} "))?;
        let mut answer = String::new();
        // EOF reads as an empty answer
        self.input.read_line(&mut answer).map_err(SyncError::Prompt)?;
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }
}
