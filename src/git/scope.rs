//! Scoped working-tree mutations
//!
//! Each handle changes the working tree when created and undoes the change
//! when released. Release is async, so it cannot live in `Drop`; both types
//! are `#[must_use]` and callers release them on every path before
//! returning.

use super::GitExecutor;
use super::ops::{
    abort_merge, checkout, checkout_detached, current_branch, resolve_commit, trial_merge,
    unmerged_paths,
};
use crate::error::{Error, Result};
use crate::types::{CommandOutput, MergeOutcome};
use tracing::debug;

/// What to put back when a checkout scope ends
#[derive(Debug, Clone, PartialEq, Eq)]
enum Restore {
    /// The target was already checked out
    Nothing,
    /// Switch back to this branch
    Branch(String),
    /// HEAD was detached at this commit
    Detached(String),
}

/// Temporarily checks out a branch, restoring the previous HEAD on exit
#[must_use = "a checkout scope must be released with `exit`"]
pub struct CheckoutScope<'a> {
    git: &'a dyn GitExecutor,
    restore: Restore,
}

impl<'a> CheckoutScope<'a> {
    /// Check out `target` unless it is already the current branch
    pub async fn enter(git: &'a dyn GitExecutor, target: &str) -> Result<Self> {
        let restore = match current_branch(git).await? {
            Some(branch) if branch == target => Restore::Nothing,
            Some(branch) => Restore::Branch(branch),
            None => {
                let head = resolve_commit(git, "HEAD")
                    .await?
                    .ok_or_else(|| Error::BranchNotFound("HEAD".to_string()))?;
                Restore::Detached(head)
            }
        };

        if restore != Restore::Nothing {
            let output = checkout(git, target).await?;
            if !output.succeeded {
                return Err(Error::Git {
                    command: format!("checkout {target}"),
                    output: output.diagnostic(),
                });
            }
            debug!(branch = target, "checked out for scoped operation");
        }

        Ok(Self { git, restore })
    }

    /// Put the original HEAD back
    pub async fn exit(self) -> Result<()> {
        let (output, what) = match &self.restore {
            Restore::Nothing => return Ok(()),
            Restore::Branch(branch) => (checkout(self.git, branch).await?, branch.as_str()),
            Restore::Detached(oid) => (checkout_detached(self.git, oid).await?, oid.as_str()),
        };
        if output.succeeded {
            debug!(restored = what, "left scoped checkout");
            Ok(())
        } else {
            Err(Error::Git {
                command: format!("checkout {what}"),
                output: output.diagnostic(),
            })
        }
    }
}

/// A started `merge --no-commit --no-ff` that is always aborted on release
#[must_use = "a trial merge must be released with `release`"]
pub struct TrialMerge<'a> {
    git: &'a dyn GitExecutor,
    reference: String,
    attempt: CommandOutput,
}

impl<'a> TrialMerge<'a> {
    /// Start merging `reference` into HEAD without committing
    pub async fn begin(git: &'a dyn GitExecutor, reference: &str) -> Result<Self> {
        let attempt = trial_merge(git, reference).await?;
        debug!(
            reference,
            succeeded = attempt.succeeded,
            "trial merge started"
        );
        Ok(Self {
            git,
            reference: reference.to_string(),
            attempt,
        })
    }

    /// Clean when git succeeded and left no unmerged paths. A failure with no
    /// unmerged paths keeps git's message as the detail.
    pub async fn classify(&self) -> Result<MergeOutcome> {
        let paths = unmerged_paths(self.git).await?;
        if self.attempt.succeeded && paths.is_empty() {
            Ok(MergeOutcome::Clean)
        } else {
            let detail = paths.is_empty().then(|| self.attempt.diagnostic());
            Ok(MergeOutcome::Conflicted { paths, detail })
        }
    }

    /// Abort the merge and verify no merge remains in progress
    pub async fn release(self) -> Result<()> {
        abort_merge(self.git, &self.reference).await
    }
}
