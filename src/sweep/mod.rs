//! Branch sweep: merge every other branch into the current one
//!
//! Two-phase pattern:
//! 1. Plan - choose candidates from the ref listing (pure, testable)
//! 2. Execute - merge them sequentially (effectful)

mod execute;
mod plan;

pub use execute::{NoProgress, SweepProgress, execute_sweep};
pub use plan::{SkipReason, SkippedRef, SweepOptions, SweepPlan, create_sweep_plan};

use crate::error::{Error, Result};
use crate::git::{
    GitExecutor, current_branch, ensure_work_tree, list_refs, merge_in_progress,
    working_tree_status,
};
use crate::types::SweepResult;

/// Check sweep preconditions and plan the candidates for the checked-out branch.
///
/// Fails on a detached HEAD, an unresolved merge, or tracked uncommitted
/// changes.
pub async fn prepare_sweep(git: &dyn GitExecutor, options: &SweepOptions) -> Result<SweepPlan> {
    ensure_work_tree(git).await?;
    let current = current_branch(git).await?.ok_or(Error::DetachedHead)?;

    if merge_in_progress(git).await? {
        return Err(Error::MergeInProgress);
    }
    let dirty = working_tree_status(git).await?.tracked_changes();
    if !dirty.is_empty() {
        return Err(Error::DirtyWorkingTree(dirty));
    }

    let refs = list_refs(git).await?;
    Ok(create_sweep_plan(&refs, &current, options))
}

/// Merge every candidate branch into the checked-out branch
pub async fn run_branch_sweep(
    git: &dyn GitExecutor,
    options: &SweepOptions,
    progress: &dyn SweepProgress,
) -> Result<SweepResult> {
    let plan = prepare_sweep(git, options).await?;
    execute_sweep(&plan, git, progress).await
}
