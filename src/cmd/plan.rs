use std::io;
use std::path::PathBuf;

use anyhow::Result;
use treesync::sync::{SyncSession, render_preview};

use super::load_run_context;

/// Dry run: preflight, diff and preview, nothing is written.
pub fn handle_plan(config_path: PathBuf) -> Result<()> {
    let ce = treesync::util::color_enabled_stdout();
    let (config, git) = load_run_context(&config_path)?;
    let session = SyncSession::new(&config, &git).with_color(ce);

    let mut out = io::stdout();
    session.preflight(&mut out)?;
    if let Some(plan) = session.prepare(&mut out)? {
        print!("{}", render_preview(&plan, ce));
        println!("{} Dry run, destination left untouched.", treesync::util::sym_question(ce));
    }
    Ok(())
}
