use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use treesync::sync::{GateOutcome, SyncOutcome, SyncSession};

use super::load_run_context;

pub fn handle_sync(config_path: PathBuf) -> Result<()> {
    let ce = treesync::util::color_enabled_stdout();
    let (config, git) = load_run_context(&config_path)?;

    println!(
        "{} Syncing {} -> {}",
        treesync::util::sym_gear(ce),
        config.source_tree.display(),
        config.dest_tree.display()
    );

    // Drawn on stderr, only once the first action runs.
    let pb = ProgressBar::no_length();
    pb.set_style(ProgressStyle::with_template("{spinner} [{pos}] {wide_msg}").context("invalid progress template")?);

    let stdin = io::stdin();
    let session = SyncSession::new(&config, &git).with_color(ce);
    let outcome = session.run(stdin.lock(), io::stdout(), |idx, action| {
        pb.set_position(idx as u64 + 1);
        pb.set_message(action.dest().display().to_string());
        pb.suspend(|| println!("{} {}", treesync::util::sym_check(ce), action));
    });
    pb.finish_and_clear();

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(err) => {
            println!("{} {}", treesync::util::sym_cross(ce), err);
            return Err(err).context("sync failed");
        }
    };
    match outcome {
        SyncOutcome::NothingToSync => {}
        SyncOutcome::Finished(GateOutcome::Declined) => {}
        SyncOutcome::Finished(GateOutcome::AppliedNotCommitted) => {
            println!("{} Destination tree updated; review and commit it yourself.", treesync::util::sym_question(ce));
        }
        SyncOutcome::Finished(GateOutcome::Committed) => {
            println!("{} Changes committed to {}", treesync::util::sym_check(ce), config.dest_tree.display());
        }
    }
    Ok(())
}
