//! Merge feasibility via a reverted trial merge

use crate::error::{Error, Result};
use crate::git::{
    CheckoutScope, GitExecutor, TrialMerge, ensure_work_tree, merge_base, merge_in_progress,
    resolve_commit, validate_branch_name, working_tree_status,
};
use crate::types::{MergeOutcome, UnknownReason};
use tracing::{debug, info};

/// Would merging `reference_branch` into `current_branch` complete without conflicts?
///
/// Runs `git merge --no-commit --no-ff` and aborts it before returning, so
/// on `Ok` the repository is left exactly as found. If `current_branch` is
/// not checked out it is checked out for the trial and the previous HEAD
/// is restored afterwards.
///
/// Returns `Unknown` without touching the working tree when the reference
/// is missing, the histories are unrelated, or tracked files are modified.
/// `Err(AbortFailed)` means the trial merge could not be reverted and the
/// working tree is mid-merge.
pub async fn check_merge_feasibility(
    git: &dyn GitExecutor,
    current_branch: &str,
    reference_branch: &str,
) -> Result<MergeOutcome> {
    validate_branch_name(current_branch)?;
    validate_branch_name(reference_branch)?;

    if merge_in_progress(git).await? {
        return Err(Error::MergeInProgress);
    }

    let Some(reference) = resolve_commit(git, reference_branch).await? else {
        return Ok(MergeOutcome::Unknown {
            reason: UnknownReason::ReferenceMissing,
        });
    };
    let current = resolve_commit(git, current_branch)
        .await?
        .ok_or_else(|| Error::BranchNotFound(current_branch.to_string()))?;

    if merge_base(git, &current, &reference).await?.is_none() {
        return Ok(MergeOutcome::Unknown {
            reason: UnknownReason::NoMergeBase,
        });
    }

    let dirty = working_tree_status(git).await?.tracked_changes();
    if !dirty.is_empty() {
        debug!(files = dirty.len(), "skipping trial merge on dirty working tree");
        return Ok(MergeOutcome::Unknown {
            reason: UnknownReason::DirtyWorkingTree,
        });
    }

    let scope = CheckoutScope::enter(git, current_branch).await?;
    let outcome = run_trial(git, reference_branch).await;
    if outcome.as_ref().is_err_and(Error::is_integrity_failure) {
        // HEAD stays put while a merge is still in progress
        return outcome;
    }
    scope.exit().await?;

    if let Ok(outcome) = &outcome {
        info!(current_branch, reference_branch, %outcome, "merge feasibility");
    }
    outcome
}

async fn run_trial(git: &dyn GitExecutor, reference_branch: &str) -> Result<MergeOutcome> {
    let trial = TrialMerge::begin(git, reference_branch).await?;
    let outcome = trial.classify().await;
    trial.release().await?;
    outcome
}

/// Feasibility of merging `reference_branch` into `branch` in the current repository
pub async fn get_merge_feasibility(
    git: &dyn GitExecutor,
    branch: &str,
    reference_branch: &str,
) -> Result<MergeOutcome> {
    ensure_work_tree(git).await?;
    check_merge_feasibility(git, branch, reference_branch).await
}
