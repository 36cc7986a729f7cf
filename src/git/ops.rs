//! Typed wrappers over the git queries and mutations gsync needs
//!
//! Queries whose failure means something is broken (`status`, `rev-list`)
//! return `Error::Git`. Operations whose failure is an expected signal
//! (`merge`, `checkout`, `fetch`) return the raw [`CommandOutput`] so the
//! caller can classify it.

use super::GitExecutor;
use super::refs::{BranchListing, parse_ref_listing, validate_branch_name};
use crate::error::{Error, Result};
use crate::types::{CommandOutput, WorkingTreeStatus};
use std::path::PathBuf;
use tracing::{debug, warn};

fn command_string(args: &[&str]) -> String {
    args.join(" ")
}

/// Run a query that must succeed
async fn run_required(git: &dyn GitExecutor, args: &[&str]) -> Result<CommandOutput> {
    let output = git.execute(args).await?;
    if output.succeeded {
        Ok(output)
    } else {
        Err(Error::Git {
            command: command_string(args),
            output: output.diagnostic(),
        })
    }
}

/// Fail with `NotARepository` unless inside a git work tree
pub async fn ensure_work_tree(git: &dyn GitExecutor) -> Result<()> {
    let output = git.execute(&["rev-parse", "--is-inside-work-tree"]).await?;
    if output.succeeded && output.text() == "true" {
        Ok(())
    } else {
        Err(Error::NotARepository(output.diagnostic()))
    }
}

/// Absolute path of the `.git` directory (resolves worktree indirection)
pub async fn absolute_git_dir(git: &dyn GitExecutor) -> Result<PathBuf> {
    let output = run_required(git, &["rev-parse", "--absolute-git-dir"]).await?;
    Ok(PathBuf::from(output.text()))
}

/// Checked-out branch name, or `None` when HEAD is detached
pub async fn current_branch(git: &dyn GitExecutor) -> Result<Option<String>> {
    let output = run_required(git, &["branch", "--show-current"]).await?;
    let name = output.text();
    Ok((!name.is_empty()).then(|| name.to_string()))
}

/// Commit id a revision points at, or `None` if it does not resolve
pub async fn resolve_commit(git: &dyn GitExecutor, rev: &str) -> Result<Option<String>> {
    validate_branch_name(rev)?;
    let spec = format!("{rev}^{{commit}}");
    let output = git
        .execute(&["rev-parse", "--verify", "--quiet", spec.as_str()])
        .await?;
    let oid = output.text();
    Ok((output.succeeded && !oid.is_empty()).then(|| oid.to_string()))
}

/// Number of commits reachable from `include` but not from `exclude`
pub async fn count_commits(git: &dyn GitExecutor, exclude: &str, include: &str) -> Result<usize> {
    let range = format!("{exclude}..{include}");
    let args = ["rev-list", "--count", range.as_str()];
    let output = run_required(git, &args).await?;
    output
        .text()
        .parse::<usize>()
        .map_err(|_| Error::UnexpectedOutput {
            command: command_string(&args),
            output: output.text().to_string(),
        })
}

/// Most recent common ancestor, or `None` when there is none
pub async fn merge_base(git: &dyn GitExecutor, a: &str, b: &str) -> Result<Option<String>> {
    validate_branch_name(a)?;
    validate_branch_name(b)?;
    let output = git.execute(&["merge-base", a, b]).await?;
    let oid = output.text();
    if output.succeeded && !oid.is_empty() {
        Ok(Some(oid.to_string()))
    } else {
        debug!(a, b, detail = %output.diagnostic(), "no merge base");
        Ok(None)
    }
}

/// Whether `MERGE_HEAD` exists (a merge has started but not finished)
pub async fn merge_in_progress(git: &dyn GitExecutor) -> Result<bool> {
    let output = git
        .execute(&["rev-parse", "--verify", "--quiet", "MERGE_HEAD"])
        .await?;
    Ok(output.succeeded)
}

/// Uncommitted changes from `git status --porcelain`
pub async fn working_tree_status(git: &dyn GitExecutor) -> Result<WorkingTreeStatus> {
    let output = run_required(git, &["status", "--porcelain"]).await?;
    Ok(WorkingTreeStatus::from_porcelain(&output.stdout))
}

/// Fetch from `remote`; failure is returned, not raised
pub async fn fetch(git: &dyn GitExecutor, remote: &str) -> Result<CommandOutput> {
    validate_branch_name(remote)?;
    let output = git.execute(&["fetch", "--quiet", remote]).await?;
    if !output.succeeded {
        warn!(remote, detail = %output.diagnostic(), "fetch failed");
    }
    Ok(output)
}

/// Local branches then remote-tracking refs, in git's sort order
pub async fn list_refs(git: &dyn GitExecutor) -> Result<Vec<BranchListing>> {
    let output = run_required(
        git,
        &[
            "for-each-ref",
            "--format=%(refname)%09%(symref)",
            "refs/heads",
            "refs/remotes",
        ],
    )
    .await?;
    Ok(parse_ref_listing(&output.stdout))
}

/// Switch to `branch`
pub async fn checkout(git: &dyn GitExecutor, branch: &str) -> Result<CommandOutput> {
    validate_branch_name(branch)?;
    git.execute(&["checkout", "--quiet", branch, "--"]).await
}

/// Detach HEAD at `oid`
pub(crate) async fn checkout_detached(git: &dyn GitExecutor, oid: &str) -> Result<CommandOutput> {
    validate_branch_name(oid)?;
    git.execute(&["checkout", "--quiet", "--detach", oid]).await
}

/// Start a merge of `reference` that stops before committing and never fast-forwards
pub async fn trial_merge(git: &dyn GitExecutor, reference: &str) -> Result<CommandOutput> {
    validate_branch_name(reference)?;
    git.execute(&["merge", "--no-commit", "--no-ff", reference]).await
}

/// Merge `branch` into HEAD, committing with the default message
pub async fn merge(git: &dyn GitExecutor, branch: &str) -> Result<CommandOutput> {
    validate_branch_name(branch)?;
    git.execute(&["merge", "--no-edit", branch]).await
}

/// Paths git currently reports as unmerged
pub async fn unmerged_paths(git: &dyn GitExecutor) -> Result<Vec<String>> {
    let output = run_required(git, &["diff", "--name-only", "--diff-filter=U"]).await?;
    Ok(output
        .stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}

/// Abort the in-progress merge of `branch`, if any, and verify it is gone.
///
/// A no-op when no merge is in progress. Fails with `AbortFailed` if git
/// refuses or `MERGE_HEAD` survives the abort.
pub async fn abort_merge(git: &dyn GitExecutor, branch: &str) -> Result<()> {
    if !merge_in_progress(git).await? {
        return Ok(());
    }

    let output = git.execute(&["merge", "--abort"]).await?;
    if !output.succeeded {
        return Err(Error::AbortFailed {
            branch: branch.to_string(),
            output: output.diagnostic(),
        });
    }
    if merge_in_progress(git).await? {
        return Err(Error::AbortFailed {
            branch: branch.to_string(),
            output: "MERGE_HEAD still present after 'git merge --abort'".to_string(),
        });
    }

    debug!(branch, "merge aborted");
    Ok(())
}
