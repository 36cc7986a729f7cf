//! Git command execution
//!
//! All git access goes through the [`GitExecutor`] trait, which runs one
//! subcommand as a structured argument list. Nothing in gsync builds shell
//! strings; branch names are validated before they reach an argument list.

mod ops;
mod refs;
mod scope;
mod system;

pub use ops::{
    abort_merge, absolute_git_dir, checkout, count_commits, current_branch, ensure_work_tree,
    fetch, list_refs, merge, merge_base, merge_in_progress, resolve_commit, trial_merge,
    unmerged_paths, working_tree_status,
};
pub use refs::{BranchKind, BranchListing, parse_ref_listing, validate_branch_name};
pub use scope::{CheckoutScope, TrialMerge};
pub use system::SystemGit;

use crate::error::Result;
use crate::types::CommandOutput;
use async_trait::async_trait;

/// Runs git subcommands
///
/// Implementations return `Err` only when git could not be started at all.
/// A git process that runs and fails is reported through
/// [`CommandOutput::succeeded`], and the caller decides what it means.
#[async_trait]
pub trait GitExecutor: Send + Sync {
    /// Run `git <args...>` and capture its output
    async fn execute(&self, args: &[&str]) -> Result<CommandOutput>;
}
