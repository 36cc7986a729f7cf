//! Ahead/behind counts between two branches

use crate::error::{Error, Result};
use crate::git::{GitExecutor, count_commits, resolve_commit};
use crate::types::DivergenceState;
use tracing::debug;

/// Count commits on each side of `current_branch` vs `reference_branch`.
///
/// Both names are resolved to commit ids once and both counts use those
/// ids, so the pair always describes one snapshot of the refs even if a
/// fetch lands between the two queries.
pub async fn compute_divergence(
    git: &dyn GitExecutor,
    current_branch: &str,
    reference_branch: &str,
) -> Result<DivergenceState> {
    let reference = resolve_commit(git, reference_branch)
        .await?
        .ok_or_else(|| Error::ReferenceUnavailable(reference_branch.to_string()))?;
    let current = resolve_commit(git, current_branch)
        .await?
        .ok_or_else(|| Error::BranchNotFound(current_branch.to_string()))?;

    let commits_ahead = count_commits(git, &reference, &current).await?;
    let commits_behind = count_commits(git, &current, &reference).await?;

    debug!(
        current_branch,
        reference_branch, commits_ahead, commits_behind, "computed divergence"
    );

    Ok(DivergenceState {
        current_branch: current_branch.to_string(),
        reference_branch: reference_branch.to_string(),
        commits_ahead,
        commits_behind,
    })
}
