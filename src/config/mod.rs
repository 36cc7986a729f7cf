//! gsync configuration
//!
//! Settings live in `<git-dir>/gsync/config.toml` (per repository) or
//! `<config-dir>/gsync/config.toml` (per user). The repository file wins
//! when both exist. Command-line flags override either.

mod storage;

pub use storage::{load_config, load_config_from, repo_config_path, save_config, user_config_path};

use crate::status::DEFAULT_REFERENCE_BRANCH;
use crate::sweep::SweepOptions;
use serde::{Deserialize, Serialize};

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Branch status is compared against
    pub reference_branch: String,
    /// Remote fetched before a status check
    pub remote: String,
    /// Fetch before a status check
    pub fetch: bool,
    /// Sweep settings
    pub sweep: SweepConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            reference_branch: DEFAULT_REFERENCE_BRANCH.to_string(),
            remote: "origin".to_string(),
            fetch: true,
            sweep: SweepConfig::default(),
        }
    }
}

/// `[sweep]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Merge remote-tracking refs as well as local branches
    pub include_remote_branches: bool,
    /// Branches never merged by a sweep
    pub exclude: Vec<String>,
}

impl SweepConfig {
    /// Sweep options from this table
    pub fn to_options(&self) -> SweepOptions {
        SweepOptions {
            include_remote_branches: self.include_remote_branches,
            exclude: self.exclude.clone(),
        }
    }
}
