//! Sweep planning - pure candidate selection
//!
//! No I/O happens here - the ref listing is passed in, making it easy to
//! unit test.

use crate::git::{BranchKind, BranchListing};
use serde::Serialize;

/// Options controlling which refs a sweep merges
#[derive(Debug, Clone, Default)]
pub struct SweepOptions {
    /// Also merge remote-tracking refs (`origin/feature`), not just local branches
    pub include_remote_branches: bool,
    /// Branch names never merged
    pub exclude: Vec<String>,
}

/// Why a ref was left out of the sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The branch everything is merged into
    CurrentBranch,
    /// A symbolic ref such as `origin/HEAD`
    Symbolic,
    /// Remote-tracking ref while remote branches are disabled
    RemoteTracking,
    /// Listed in the exclude option
    Excluded,
    /// Same name already planned
    Duplicate,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CurrentBranch => write!(f, "current branch"),
            Self::Symbolic => write!(f, "symbolic ref"),
            Self::RemoteTracking => write!(f, "remote-tracking ref"),
            Self::Excluded => write!(f, "excluded"),
            Self::Duplicate => write!(f, "duplicate"),
        }
    }
}

/// A ref that will not be merged
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRef {
    /// Short ref name
    pub name: String,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// Sweep plan - which branches to merge, in order
#[derive(Debug, Clone, Serialize)]
pub struct SweepPlan {
    /// Branch every candidate is merged into
    pub current_branch: String,
    /// Branches to merge, in enumeration order
    pub candidates: Vec<String>,
    /// Refs left out, in enumeration order
    pub skipped: Vec<SkippedRef>,
}

impl SweepPlan {
    /// Nothing to merge
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Create a sweep plan (PURE - no I/O, easily testable)
///
/// Keeps the order of `refs`. Skips the current branch, symbolic refs,
/// excluded names, duplicates, and remote-tracking refs unless
/// `include_remote_branches` is set.
#[must_use]
pub fn create_sweep_plan(
    refs: &[BranchListing],
    current_branch: &str,
    options: &SweepOptions,
) -> SweepPlan {
    let mut candidates: Vec<String> = Vec::new();
    let mut skipped = Vec::new();

    for listing in refs {
        let reason = if listing.name == current_branch {
            Some(SkipReason::CurrentBranch)
        } else if listing.symbolic {
            Some(SkipReason::Symbolic)
        } else if listing.kind == BranchKind::RemoteTracking && !options.include_remote_branches {
            Some(SkipReason::RemoteTracking)
        } else if options.exclude.iter().any(|e| e == &listing.name) {
            Some(SkipReason::Excluded)
        } else if candidates.contains(&listing.name) {
            Some(SkipReason::Duplicate)
        } else {
            None
        };

        match reason {
            Some(reason) => skipped.push(SkippedRef {
                name: listing.name.clone(),
                reason,
            }),
            None => candidates.push(listing.name.clone()),
        }
    }

    SweepPlan {
        current_branch: current_branch.to_string(),
        candidates,
        skipped,
    }
}
