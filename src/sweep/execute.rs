//! Sweep execution - effectful operations
//!
//! Takes a `SweepPlan` (created by the pure planning function) and merges
//! each candidate into the current branch, one at a time. A branch that
//! fails to merge is recorded and the sweep moves on; only a merge that
//! cannot be aborted stops it.

use super::plan::SweepPlan;
use crate::error::{Error, Result};
use crate::git::{
    GitExecutor, abort_merge, checkout, current_branch, merge, merge_in_progress, unmerged_paths,
};
use crate::types::{SweepEntry, SweepFailure, SweepResult};
use async_trait::async_trait;
use tracing::{info, warn};

/// Progress callback for sweep execution
#[async_trait]
pub trait SweepProgress: Send + Sync {
    /// Called before merging `branch`
    async fn on_branch_start(&self, _branch: &str) {}

    /// Called after `entry` has been recorded
    async fn on_branch_done(&self, _entry: &SweepEntry) {}
}

/// Progress callback that reports nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl SweepProgress for NoProgress {}

/// Execute the sweep plan (EFFECTFUL)
///
/// Merges candidates strictly in plan order. Returns one entry per
/// candidate regardless of how many fail. Any error while merging a branch
/// is followed by an abort, so the next branch never starts mid-merge. If
/// that abort fails the sweep stops with `SweepHalted`, carrying the
/// entries recorded so far.
pub async fn execute_sweep(
    plan: &SweepPlan,
    git: &dyn GitExecutor,
    progress: &dyn SweepProgress,
) -> Result<SweepResult> {
    let mut result = SweepResult::new(&plan.current_branch);

    for branch in &plan.candidates {
        progress.on_branch_start(branch).await;

        let outcome = match merge_one(git, &plan.current_branch, branch).await {
            Err(e) if !e.is_integrity_failure() => {
                // The merge may have started before the error
                abort_merge(git, branch).await.map(|()| {
                    SweepEntry::failed(branch, SweepFailure::MergeFailed, e.to_string())
                })
            }
            other => other,
        };

        let entry = match outcome {
            Ok(entry) => entry,
            Err(e) => {
                warn!(branch = %branch, error = %e, "failed merge could not be aborted; halting sweep");
                let output = match e {
                    Error::AbortFailed { output, .. } => output,
                    other => other.to_string(),
                };
                return Err(Error::SweepHalted {
                    branch: branch.clone(),
                    output,
                    partial: Box::new(result),
                });
            }
        };

        progress.on_branch_done(&entry).await;
        result.entries.push(entry);
    }

    info!(
        current_branch = %plan.current_branch,
        merged = result.merged_branches().len(),
        failed = result.failures().count(),
        "sweep finished"
    );

    Ok(result)
}

/// Merge one branch into `current`, leaving no merge in progress
async fn merge_one(git: &dyn GitExecutor, current: &str, branch: &str) -> Result<SweepEntry> {
    if current_branch(git).await?.as_deref() != Some(current) {
        let output = checkout(git, current).await?;
        if !output.succeeded {
            warn!(branch, current, "could not return to current branch");
            return Ok(SweepEntry::failed(
                branch,
                SweepFailure::CheckoutFailed,
                format!("could not check out {current}: {}", output.diagnostic()),
            ));
        }
    }

    let output = merge(git, branch).await?;
    if output.succeeded {
        info!(branch, into = current, "merged");
        return Ok(SweepEntry::merged(branch));
    }

    let paths = if merge_in_progress(git).await? {
        match unmerged_paths(git).await {
            Ok(paths) => paths,
            Err(e) => {
                warn!(branch, error = %e, "could not list unmerged paths");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    abort_merge(git, branch).await?;

    let entry = if paths.is_empty() {
        SweepEntry::failed(branch, SweepFailure::MergeFailed, output.diagnostic())
    } else {
        let detail = format!("conflict in {}", paths.join(", "));
        SweepEntry::failed(branch, SweepFailure::Conflict { paths }, detail)
    };
    warn!(branch, detail = %entry.detail, "merge failed");
    Ok(entry)
}
