//! `GitExecutor` backed by the system `git` binary

use super::GitExecutor;
use crate::error::Result;
use crate::types::CommandOutput;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// Runs the `git` found on `PATH` inside a fixed working directory
#[derive(Debug, Clone)]
pub struct SystemGit {
    workdir: PathBuf,
}

impl SystemGit {
    /// Executor rooted at `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

#[async_trait]
impl GitExecutor for SystemGit {
    async fn execute(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            // Stable, untranslated messages for diagnostics
            .env("LC_ALL", "C")
            // Never block on an editor or credential prompt
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GIT_MERGE_AUTOEDIT", "no")
            .kill_on_drop(true)
            .output()
            .await?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
            succeeded: output.status.success(),
        };

        debug!(
            args = %args.join(" "),
            exit_code = ?result.exit_code,
            "git command finished"
        );

        Ok(result)
    }
}
