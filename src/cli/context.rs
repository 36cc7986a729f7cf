//! Shared command context for CLI commands
//!
//! Extracts common setup code shared by status, check, sweep and config.

use gsync::config::{SyncConfig, load_config};
use gsync::error::{Error, Result};
use gsync::git::{SystemGit, absolute_git_dir, ensure_work_tree};
use std::path::{Path, PathBuf};

/// Shared context for CLI commands
///
/// - Validating the path and opening a git executor there
/// - Confirming it is inside a work tree
/// - Locating the git dir and loading configuration
///
/// Note: holds no repository state (branches, counts); every command
/// queries git fresh because the repository can change between calls.
pub struct CommandContext {
    /// Executor rooted at the requested path
    pub git: SystemGit,
    /// Absolute `.git` directory
    pub git_dir: PathBuf,
    /// Effective configuration
    pub config: SyncConfig,
}

impl CommandContext {
    /// Create a new command context for the repository containing `path`
    pub async fn new(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(Error::NotARepository(format!(
                "{} is not a directory",
                path.display()
            )));
        }

        let git = SystemGit::new(path);
        ensure_work_tree(&git).await.map_err(|e| match e {
            Error::NotARepository(_) => Error::NotARepository(path.display().to_string()),
            other => other,
        })?;

        let git_dir = absolute_git_dir(&git).await?;
        let config = load_config(&git_dir)?;

        Ok(Self {
            git,
            git_dir,
            config,
        })
    }
}
