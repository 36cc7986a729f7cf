//! Throwaway git repositories for tests that run the real `git`

#![allow(dead_code)]

use gsync::git::SystemGit;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// A git repository in a temp directory, on `main` with one commit
pub struct TempGitRepo {
    dir: TempDir,
}

impl TempGitRepo {
    /// Initialise the repository with `README.md` committed on `main`
    pub fn new() -> Self {
        let repo = Self {
            dir: TempDir::new().expect("create temp dir"),
        };
        repo.git(&["init", "-q"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo.git(&["config", "merge.ff", "true"]);
        repo.commit_file("README.md", "# test\n", "initial");
        repo
    }

    /// Repository root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Executor for the code under test
    pub fn executor(&self) -> SystemGit {
        SystemGit::new(self.path())
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.args(args)
            .current_dir(self.path())
            .env("LC_ALL", "C")
            .env("GIT_CONFIG_NOSYSTEM", "1");
        cmd
    }

    /// Run git, panicking on failure, returning trimmed stdout
    pub fn git(&self, args: &[&str]) -> String {
        let output = self.command(args).output().expect("run git");
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Write a file relative to the root
    pub fn write(&self, file: &str, content: &str) {
        let path = self.path().join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(path, content).expect("write file");
    }

    /// Write, stage and commit one file
    pub fn commit_file(&self, file: &str, content: &str, message: &str) {
        self.write(file, content);
        self.git(&["add", file]);
        self.git(&["commit", "-q", "-m", message]);
    }

    /// Add `count` commits, each touching its own file
    pub fn add_commits(&self, prefix: &str, count: usize) {
        for i in 0..count {
            let file = format!("{prefix}-{i}.txt");
            self.commit_file(&file, &format!("{prefix} {i}\n"), &format!("{prefix} commit {i}"));
        }
    }

    /// Create `branch` at HEAD and switch to it
    pub fn checkout_new(&self, branch: &str) {
        self.git(&["checkout", "-q", "-b", branch]);
    }

    /// Switch to an existing branch
    pub fn checkout(&self, branch: &str) {
        self.git(&["checkout", "-q", branch]);
    }

    /// Checked-out branch name
    pub fn head_branch(&self) -> String {
        self.git(&["branch", "--show-current"])
    }

    /// Commit id of a revision
    pub fn rev(&self, rev: &str) -> String {
        self.git(&["rev-parse", rev])
    }

    /// Whether `MERGE_HEAD` exists
    pub fn merge_in_progress(&self) -> bool {
        self.path().join(".git").join("MERGE_HEAD").exists()
    }

    /// `git status --porcelain`
    pub fn porcelain(&self) -> String {
        self.git(&["status", "--porcelain"])
    }
}
