use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::process::Command;

use pretty_assertions::assert_eq;
use treesync::config::SyncConfig;
use treesync::sync::{CliGit, GateOutcome, GitBackend, SyncOutcome, SyncSession};

fn git(dir: &Path, args: &[&str]) -> String {
    let out = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["-c", "user.name=Sync Test", "-c", "user.email=sync@example.com", "-c", "commit.gpgsign=false"])
        .args(args)
        .output()
        .expect("run git");
    assert!(out.status.success(), "git {:?} failed: {}", args, String::from_utf8_lossy(&out.stderr));
    String::from_utf8(out.stdout).unwrap()
}

fn init_repo(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    git(dir, &["init", "-q"]);
    git(dir, &["config", "user.name", "Sync Test"]);
    git(dir, &["config", "user.email", "sync@example.com"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

fn commit_all(dir: &Path, msg: &str) {
    git(dir, &["add", "-A"]);
    git(dir, &["commit", "-q", "-m", msg]);
}

fn put(dir: &Path, rel: &str, body: &str) {
    let p = dir.join(rel);
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, body).unwrap();
}

#[test]
fn syncs_two_real_repositories() {
    let Ok(_) = which::which("git") else {
        eprintln!("git not available, skipping");
        return;
    };
    let root = tempfile::tempdir().unwrap();
    let source = root.path().join("upstream");
    let dest = root.path().join("mirror");
    init_repo(&source);
    init_repo(&dest);

    let body = "a reasonably long body so rename detection has something to compare\n".repeat(4);
    put(&source, "keep.txt", "v1\n");
    put(&source, "docs/moved.md", &body);
    put(&source, "drop.txt", "drop me\n");
    commit_all(&source, "base");
    for rel in ["keep.txt", "docs/moved.md", "drop.txt"] {
        put(&dest, rel, &fs::read_to_string(source.join(rel)).unwrap());
    }
    commit_all(&dest, "mirror base");
    let dest_head = git(&dest, &["rev-parse", "HEAD"]).trim().to_string();

    put(&source, "keep.txt", "v2\n");
    put(&source, "new/added.txt", "hello\n");
    fs::create_dir_all(source.join("guide")).unwrap();
    fs::rename(source.join("docs/moved.md"), source.join("guide/moved.md")).unwrap();
    fs::remove_file(source.join("drop.txt")).unwrap();
    commit_all(&source, "changes");

    let config = SyncConfig {
        source_tree: source.clone(),
        dest_tree: dest.clone(),
        commit_from: "HEAD~1".into(),
        commit_to: "HEAD".into(),
        require_git_validation: true,
        dest_expected_commit: Some(dest_head[..8].to_string()),
        source_prefix: String::new(),
        dest_prefix: String::new(),
        similarity_threshold: Some(50),
        diff_filter: Some("ADMR".into()),
        remap_renames: false,
    };
    let cli = CliGit::locate("git").unwrap();

    // Rename copies from the old path in the source working tree, which the
    // commit removed; restore it so the copy has something to read.
    put(&source, "docs/moved.md", &body);

    let mut output = Vec::new();
    let outcome = SyncSession::new(&config, &cli)
        .run(Cursor::new(b"y\ny\n".to_vec()), &mut output, |_, _| {})
        .unwrap();
    assert_eq!(outcome, SyncOutcome::Finished(GateOutcome::Committed));

    assert_eq!(fs::read_to_string(dest.join("keep.txt")).unwrap(), "v2\n");
    assert_eq!(fs::read_to_string(dest.join("new/added.txt")).unwrap(), "hello\n");
    assert_eq!(fs::read_to_string(dest.join("guide/moved.md")).unwrap(), body);
    assert!(!dest.join("docs/moved.md").exists());
    assert!(!dest.join("drop.txt").exists());

    let log = git(&dest, &["log", "-1", "--pretty=%s"]);
    assert_eq!(log.trim(), "Synced changes from upstream");
    assert_ne!(cli.rev_parse_head(&dest).unwrap(), dest_head);
}

#[test]
fn diff_output_matches_parser_format() {
    let Ok(_) = which::which("git") else {
        return;
    };
    let root = tempfile::tempdir().unwrap();
    let repo = root.path().join("repo");
    init_repo(&repo);
    put(&repo, "a.txt", "a\n");
    commit_all(&repo, "one");
    put(&repo, "b.txt", "b\n");
    commit_all(&repo, "two");

    let cli = CliGit::locate("git").unwrap();
    let raw = cli.diff_name_status(&repo, "HEAD~1", "HEAD", 50, "ADMR").unwrap();
    let records = treesync::sync::parse_name_status(&raw).unwrap();
    assert_eq!(records, vec![treesync::sync::ChangeRecord::added("b.txt")]);
}

#[test]
fn non_ascii_paths_reach_the_destination() {
    let Ok(_) = which::which("git") else {
        return;
    };
    let root = tempfile::tempdir().unwrap();
    let source = root.path().join("src");
    let dest = root.path().join("dst");
    init_repo(&source);
    init_repo(&dest);

    put(&source, "café.txt", "old\n");
    put(&source, "keep.txt", "k\n");
    commit_all(&source, "base");
    put(&dest, "café.txt", "old\n");
    commit_all(&dest, "mirror base");

    fs::remove_file(source.join("café.txt")).unwrap();
    put(&source, "naïve/ünïcode.md", "hi\n");
    commit_all(&source, "drop and add");

    let cli = CliGit::locate("git").unwrap();
    let raw = cli.diff_name_status(&source, "HEAD~1", "HEAD", 50, "ADMR").unwrap();
    assert!(!raw.contains('"'), "quoted path in {raw:?}");

    let config = SyncConfig {
        source_tree: source.clone(),
        dest_tree: dest.clone(),
        require_git_validation: true,
        ..SyncConfig::default()
    };
    let mut output = Vec::new();
    let outcome = SyncSession::new(&config, &cli)
        .run(Cursor::new(b"y\nn\n".to_vec()), &mut output, |_, _| {})
        .unwrap();
    assert_eq!(outcome, SyncOutcome::Finished(GateOutcome::AppliedNotCommitted));
    assert!(!dest.join("café.txt").exists());
    assert_eq!(fs::read_to_string(dest.join("naïve/ünïcode.md")).unwrap(), "hi\n");
}
