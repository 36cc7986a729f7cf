//! Core types for gsync
//!
//! Every type here is a transient value: built for one invocation, then
//! displayed or handed back to the caller. Nothing is cached between calls.

use serde::Serialize;

/// Captured result of one git invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Process exit code (None if killed by a signal)
    pub exit_code: Option<i32>,
    /// Whether git reported success
    pub succeeded: bool,
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: Some(0),
            succeeded: true,
        }
    }

    /// Failed output with the given exit code and stderr
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code: Some(exit_code),
            succeeded: false,
        }
    }

    /// Trimmed stdout
    pub fn text(&self) -> &str {
        self.stdout.trim()
    }

    /// Stdout and stderr joined for diagnostics
    pub fn diagnostic(&self) -> String {
        let out = self.stdout.trim();
        let err = self.stderr.trim();
        match (out.is_empty(), err.is_empty()) {
            (true, true) => match self.exit_code {
                Some(code) => format!("exit code {code}"),
                None => "terminated by signal".to_string(),
            },
            (false, true) => out.to_string(),
            (true, false) => err.to_string(),
            (false, false) => format!("{out}\n{err}"),
        }
    }
}

/// Directional commit counts between two branches
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DivergenceState {
    /// Branch being compared
    pub current_branch: String,
    /// Branch it is compared against (e.g. `origin/main`)
    pub reference_branch: String,
    /// Commits reachable from `current_branch` but not `reference_branch`
    pub commits_ahead: usize,
    /// Commits reachable from `reference_branch` but not `current_branch`
    pub commits_behind: usize,
}

impl DivergenceState {
    /// Both branches point at the same history
    pub const fn is_in_sync(&self) -> bool {
        self.commits_ahead == 0 && self.commits_behind == 0
    }
}

/// Why merge feasibility could not be determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownReason {
    /// The two histories share no common ancestor
    NoMergeBase,
    /// The reference branch does not exist locally
    ReferenceMissing,
    /// Tracked files have uncommitted changes, so no trial merge was run
    DirtyWorkingTree,
}

impl std::fmt::Display for UnknownReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMergeBase => write!(f, "unable to determine merge base"),
            Self::ReferenceMissing => write!(f, "reference branch not available locally"),
            Self::DirtyWorkingTree => write!(f, "working tree has uncommitted changes"),
        }
    }
}

/// Classification of a trial merge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MergeOutcome {
    /// The merge would complete without conflicts
    Clean,
    /// The merge would stop with conflicts
    Conflicted {
        /// Paths git reported as unmerged
        paths: Vec<String>,
        /// Git's own message when it stopped without listing any paths
        /// (for example an untracked file in the way)
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
    /// Feasibility could not be determined; never treated as clean
    Unknown {
        /// Why no verdict was reached
        reason: UnknownReason,
    },
}

impl std::fmt::Display for MergeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clean => write!(f, "clean"),
            Self::Conflicted {
                paths,
                detail: Some(detail),
            } if paths.is_empty() => write!(f, "conflicted: {detail}"),
            Self::Conflicted { paths, .. } if paths.is_empty() => write!(f, "conflicted"),
            Self::Conflicted { paths, .. } => write!(f, "conflicted ({})", paths.join(", ")),
            Self::Unknown { reason } => write!(f, "unknown ({reason})"),
        }
    }
}

/// Advisory derived from a divergence quadrant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Ahead and behind
    Synchronize,
    /// Ahead only
    Push,
    /// Behind only
    Pull,
    /// Neither
    InSync,
}

impl Recommendation {
    /// Short advisory string
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Synchronize => "synchronize: diverged in both directions",
            Self::Push => "push: local commits not yet shared",
            Self::Pull => "pull: remote has newer commits",
            Self::InSync => "in sync",
        }
    }

    /// Longer advisory sentence for display under the status report
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Synchronize => {
                "You are both ahead of and behind the reference branch. Consider synchronizing your changes with the remote."
            }
            Self::Push => {
                "Your branch has commits that are not yet in the reference branch. Consider pushing your changes."
            }
            Self::Pull => {
                "Your branch is behind the reference branch. Consider pulling the latest changes."
            }
            Self::InSync => "Your branch is in sync with the reference branch.",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of `git status --porcelain`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    /// Two-character XY status code (e.g. ` M`, `??`, `UU`)
    pub code: String,
    /// Path as reported by git (renames keep the `old -> new` form)
    pub path: String,
}

impl StatusEntry {
    /// Untracked files do not block merges or checkouts of unrelated paths
    pub fn is_untracked(&self) -> bool {
        self.code == "??" || self.code == "!!"
    }
}

/// Uncommitted changes in the working tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkingTreeStatus {
    /// Porcelain entries in git's order
    pub entries: Vec<StatusEntry>,
}

impl WorkingTreeStatus {
    /// Parse `git status --porcelain` (v1) output
    pub fn from_porcelain(output: &str) -> Self {
        let entries = output
            .lines()
            .filter(|line| line.len() > 3)
            .map(|line| StatusEntry {
                code: line[..2].to_string(),
                path: line[3..].to_string(),
            })
            .collect();
        Self { entries }
    }

    /// No changes at all, tracked or untracked
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    /// Paths of modified, staged, or conflicted tracked files
    pub fn tracked_changes(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| !e.is_untracked())
            .map(|e| e.path.clone())
            .collect()
    }
}

/// Why a sweep entry did not merge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SweepFailure {
    /// The merge stopped with conflicts and was aborted
    Conflict {
        /// Paths git reported as unmerged
        paths: Vec<String>,
    },
    /// The current branch could not be checked out before merging
    CheckoutFailed,
    /// Git refused or failed the merge without leaving conflicts
    MergeFailed,
}

/// Outcome of merging one branch during a sweep
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepEntry {
    /// Branch that was merged into the current branch
    pub branch: String,
    /// Whether the merge completed
    pub merged: bool,
    /// `merged` on success, otherwise the git diagnostic
    pub detail: String,
    /// Failure kind when `merged` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<SweepFailure>,
}

impl SweepEntry {
    /// A successful merge
    pub fn merged(branch: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            merged: true,
            detail: "merged".to_string(),
            failure: None,
        }
    }

    /// A failed merge with its diagnostic
    pub fn failed(branch: impl Into<String>, failure: SweepFailure, detail: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            merged: false,
            detail: detail.into(),
            failure: Some(failure),
        }
    }
}

/// Ordered per-branch outcomes of a sweep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepResult {
    /// Branch everything was merged into
    pub current_branch: String,
    /// One entry per candidate, in enumeration order
    pub entries: Vec<SweepEntry>,
}

impl SweepResult {
    /// Empty result for a sweep into `current_branch`
    pub fn new(current_branch: impl Into<String>) -> Self {
        Self {
            current_branch: current_branch.into(),
            entries: Vec::new(),
        }
    }

    /// Names of branches that merged
    pub fn merged_branches(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.merged)
            .map(|e| e.branch.as_str())
            .collect()
    }

    /// Entries that did not merge
    pub fn failures(&self) -> impl Iterator<Item = &SweepEntry> {
        self.entries.iter().filter(|e| !e.merged)
    }

    /// Every candidate merged
    pub fn is_success(&self) -> bool {
        self.entries.iter().all(|e| e.merged)
    }
}

/// Top-level result of a status check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Ahead/behind counts
    pub divergence: DivergenceState,
    /// Trial merge classification of the reference into the current branch
    pub merge_outcome: MergeOutcome,
    /// Advisory for the divergence quadrant
    pub recommendation: Recommendation,
    /// Uncommitted changes at the time of the check
    pub working_tree: WorkingTreeStatus,
}
