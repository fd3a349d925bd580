use anyhow::Result;
use clap::Args;
use treesync::config::{DEFAULT_DIFF_FILTER, DEFAULT_SIMILARITY_THRESHOLD};
use treesync::util::{Settings, get_git_binary, load_settings, save_settings, settings_path};

#[derive(Args)]
pub struct DefaultsCmd {
    /// Show the stored defaults
    #[arg(long)]
    pub show: bool,

    /// Rename similarity threshold (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: Option<u8>,

    /// git --diff-filter letters, e.g. ADMR
    #[arg(long)]
    pub filter: Option<String>,

    /// git executable name or path
    #[arg(long)]
    pub git: Option<String>,

    /// Forget all stored defaults
    #[arg(long)]
    pub reset: bool,
}

pub fn handle_defaults(cmd: DefaultsCmd) -> Result<()> {
    let ce = treesync::util::color_enabled_stdout();
    let mut cfg: Settings = load_settings().unwrap_or_default();

    if cmd.reset {
        cfg = Settings::default();
        save_settings(&cfg)?;
        println!("{} Defaults cleared.", treesync::util::sym_check(ce));
        return Ok(());
    }

    let mut changed = false;
    if let Some(t) = cmd.threshold {
        cfg.similarity_threshold = Some(t);
        changed = true;
    }
    if let Some(f) = cmd.filter {
        let f = f.trim().to_string();
        if f.is_empty() {
            anyhow::bail!("diff filter cannot be empty");
        }
        cfg.diff_filter = Some(f);
        changed = true;
    }
    if let Some(g) = cmd.git {
        cfg.git_binary = Some(g);
        changed = true;
    }
    if changed {
        save_settings(&cfg)?;
        println!("{} Defaults saved.", treesync::util::sym_check(ce));
    }

    if cmd.show || !changed {
        if let Ok(path) = settings_path() {
            println!("settings file: {}", path.display());
        }
        println!("similarity threshold: {}%", cfg.similarity_threshold.unwrap_or(DEFAULT_SIMILARITY_THRESHOLD));
        println!("diff filter: {}", cfg.diff_filter.as_deref().unwrap_or(DEFAULT_DIFF_FILTER));
        println!("git binary: {}", get_git_binary(&cfg));
    }
    Ok(())
}
