//! Error types for gsync

use crate::types::SweepResult;
use thiserror::Error;

/// Errors surfaced by the status engine and the branch sweep
#[derive(Debug, Error)]
pub enum Error {
    /// The working directory is not inside a git work tree
    #[error("not a git repository: {0}")]
    NotARepository(String),

    /// The comparison branch cannot be resolved (e.g. never fetched)
    #[error("reference branch '{0}' is not available locally (try fetching it first)")]
    ReferenceUnavailable(String),

    /// A branch named by the caller does not resolve to a commit
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    /// HEAD does not point at a branch
    #[error("HEAD is detached; check out a branch first")]
    DetachedHead,

    /// Branch name would not be safe to pass to git
    #[error("invalid branch name: '{0}'")]
    InvalidBranchName(String),

    /// A previous merge was interrupted and is still unresolved
    #[error("a merge is already in progress; resolve it or run 'git merge --abort'")]
    MergeInProgress,

    /// Tracked files have uncommitted changes
    #[error("working tree has uncommitted changes: {}", .0.join(", "))]
    DirtyWorkingTree(Vec<String>),

    /// A merge could not be reverted; the working tree is in an undefined state
    #[error("failed to abort merge of '{branch}': {output}")]
    AbortFailed {
        /// Branch whose merge was being reverted
        branch: String,
        /// Raw git output from the abort attempt
        output: String,
    },

    /// The sweep stopped because a failed merge could not be reverted
    #[error("sweep halted at '{branch}' after {} branch(es): {output}", .partial.entries.len())]
    SweepHalted {
        /// Branch whose merge could not be reverted
        branch: String,
        /// Raw git output from the abort attempt
        output: String,
        /// Entries recorded before the sweep halted
        partial: Box<SweepResult>,
    },

    /// A required git query failed
    #[error("git {command} failed: {output}")]
    Git {
        /// The git subcommand and arguments
        command: String,
        /// Raw git output
        output: String,
    },

    /// Git produced output that could not be parsed
    #[error("unexpected output from git {command}: '{output}'")]
    UnexpectedOutput {
        /// The git subcommand and arguments
        command: String,
        /// The unparseable output
        output: String,
    },

    /// Configuration could not be read, parsed, or written
    #[error("config error: {0}")]
    Config(String),

    /// Git could not be spawned
    #[error("failed to run git: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else (terminal prompts, etc.)
    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// Whether this error means the repository may have been left mid-merge.
    ///
    /// Callers must stop issuing further git mutations when this is true.
    pub const fn is_integrity_failure(&self) -> bool {
        matches!(self, Self::AbortFailed { .. } | Self::SweepHalted { .. })
    }
}

/// Result type alias using the gsync `Error`
pub type Result<T> = std::result::Result<T, Error>;
