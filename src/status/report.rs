//! Status report assembly

use super::{check_merge_feasibility, compute_divergence, recommend};
use crate::error::{Error, Result};
use crate::git::{GitExecutor, current_branch, ensure_work_tree, working_tree_status};
use crate::types::StatusReport;

/// Reference branch used when none is configured
pub const DEFAULT_REFERENCE_BRANCH: &str = "origin/main";

/// Inputs for a status check
#[derive(Debug, Clone)]
pub struct StatusOptions {
    /// Branch to report on; defaults to the checked-out branch
    pub current_branch: Option<String>,
    /// Branch to compare against
    pub reference_branch: String,
}

impl Default for StatusOptions {
    fn default() -> Self {
        Self {
            current_branch: None,
            reference_branch: DEFAULT_REFERENCE_BRANCH.to_string(),
        }
    }
}

/// Working tree, divergence, feasibility and recommendation for one branch pair.
///
/// Fails with `NotARepository` before producing any output when run outside
/// a work tree, and with `ReferenceUnavailable` when the reference cannot be
/// resolved (counts are never defaulted to zero).
pub async fn get_status_report(
    git: &dyn GitExecutor,
    options: &StatusOptions,
) -> Result<StatusReport> {
    ensure_work_tree(git).await?;

    let branch = match &options.current_branch {
        Some(branch) => branch.clone(),
        None => current_branch(git).await?.ok_or(Error::DetachedHead)?,
    };

    let working_tree = working_tree_status(git).await?;
    let divergence = compute_divergence(git, &branch, &options.reference_branch).await?;
    let merge_outcome = check_merge_feasibility(git, &branch, &options.reference_branch).await?;
    let recommendation = recommend(divergence.commits_ahead, divergence.commits_behind);

    Ok(StatusReport {
        divergence,
        merge_outcome,
        recommendation,
        working_tree,
    })
}
