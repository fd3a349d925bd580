#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use treesync::config::SyncConfig;
use treesync::sync::{GitBackend, SyncError, SyncResult};

/// Git stand-in that serves canned output and records commits.
pub struct FakeGit {
    pub diff: String,
    pub head: String,
    pub commits: RefCell<Vec<(PathBuf, String)>>,
    pub diff_calls: RefCell<Vec<(String, String, u8, String)>>,
    pub fail_commit: bool,
}

impl FakeGit {
    pub fn with_diff(diff: &str) -> Self {
        Self {
            diff: diff.to_string(),
            head: "0123456789abcdef0123456789abcdef01234567".to_string(),
            commits: RefCell::new(Vec::new()),
            diff_calls: RefCell::new(Vec::new()),
            fail_commit: false,
        }
    }
}

impl GitBackend for FakeGit {
    fn diff_name_status(&self, _repo: &Path, from: &str, to: &str, threshold: u8, filter: &str) -> SyncResult<String> {
        self.diff_calls
            .borrow_mut()
            .push((from.to_string(), to.to_string(), threshold, filter.to_string()));
        Ok(self.diff.clone())
    }

    fn rev_parse_head(&self, _repo: &Path) -> SyncResult<String> {
        Ok(self.head.clone())
    }

    fn commit_all(&self, repo: &Path, message: &str) -> SyncResult<()> {
        if self.fail_commit {
            return Err(SyncError::GitCommandFailed { command: "git commit".into(), stderr: "nothing to commit".into() });
        }
        self.commits.borrow_mut().push((repo.to_path_buf(), message.to_string()));
        Ok(())
    }
}

/// A source and a destination tree, each with a `.git` directory.
pub struct Trees {
    pub root: TempDir,
    pub source: PathBuf,
    pub dest: PathBuf,
}

impl Trees {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("source-repo");
        let dest = root.path().join("dest-repo");
        fs::create_dir_all(source.join(".git")).unwrap();
        fs::create_dir_all(dest.join(".git")).unwrap();
        Self { root, source, dest }
    }

    pub fn config(&self) -> SyncConfig {
        SyncConfig {
            source_tree: self.source.clone(),
            dest_tree: self.dest.clone(),
            commit_from: "HEAD~1".into(),
            commit_to: "HEAD".into(),
            require_git_validation: true,
            dest_expected_commit: None,
            source_prefix: String::new(),
            dest_prefix: String::new(),
            similarity_threshold: Some(50),
            diff_filter: Some("ADMR".into()),
            remap_renames: false,
        }
    }
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

pub fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}
