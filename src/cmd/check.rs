use std::io;
use std::path::PathBuf;

use anyhow::Result;
use treesync::sync::SyncSession;
use treesync::sync::preflight::TreeStatus;

use super::load_run_context;

pub fn handle_check(config_path: PathBuf) -> Result<()> {
    let ce = treesync::util::color_enabled_stdout();
    let (config, git) = load_run_context(&config_path)?;
    println!("{} git: {}", treesync::util::sym_check(ce), git.binary().display());

    let session = SyncSession::new(&config, &git).with_color(ce);
    let report = match session.preflight(&mut io::stdout()) {
        Ok(report) => report,
        Err(err) => {
            println!("{} preflight failed", treesync::util::sym_cross(ce));
            return Err(err.into());
        }
    };

    for (label, tree, status) in [
        ("source", &config.source_tree, report.source),
        ("destination", &config.dest_tree, report.dest),
    ] {
        let sym = match status {
            TreeStatus::Repository => treesync::util::sym_check(ce),
            TreeStatus::MissingGitDir => treesync::util::sym_question(ce),
        };
        println!("{} {} tree: {}", sym, label, tree.display());
    }
    let remapper = config.remapper();
    if !remapper.is_identity() {
        println!(
            "{} paths under '{}' land under '{}'",
            treesync::util::sym_gear(ce),
            config.source_prefix,
            config.dest_prefix
        );
    }
    if let Some(commit) = report.dest_commit {
        println!("{} destination at expected commit {}", treesync::util::sym_check(ce), commit);
    }
    println!(
        "{} diff {}..{} (filter {}, renames at {}%)",
        treesync::util::sym_gear(ce),
        config.commit_from,
        config.commit_to,
        config.diff_filter(),
        config.similarity_threshold()
    );
    Ok(())
}
