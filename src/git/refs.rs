//! Branch names and ref enumeration parsing

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Characters git forbids in ref names, plus leading `-` so a name can
/// never be parsed as an option.
static BRANCH_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\-\s~^:?*\[\\][^\s~^:?*\[\\]*$").expect("branch name pattern is valid")
});

/// Reject names that git would misread or refuse.
pub fn validate_branch_name(name: &str) -> Result<()> {
    let valid = BRANCH_NAME.is_match(name)
        && !name.contains("..")
        && !name.contains("@{")
        && !name.ends_with('/')
        && !name.ends_with(".lock")
        && !name.ends_with('.');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidBranchName(name.to_string()))
    }
}

/// Where a ref lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// `refs/heads/*`
    Local,
    /// `refs/remotes/*`
    RemoteTracking,
}

/// One ref from `git for-each-ref`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchListing {
    /// Short name (`feature`, `origin/main`)
    pub name: String,
    /// Local branch or remote-tracking ref
    pub kind: BranchKind,
    /// Symbolic refs (like `origin/HEAD`) point at another ref and are not merge targets
    pub symbolic: bool,
}

/// Parse `git for-each-ref --format=%(refname)%09%(symref)` output.
///
/// Lines outside `refs/heads/` and `refs/remotes/` are ignored. Order is
/// preserved.
pub fn parse_ref_listing(output: &str) -> Vec<BranchListing> {
    output
        .lines()
        .filter_map(|line| {
            let (refname, symref) = line.split_once('\t').unwrap_or((line, ""));
            let refname = refname.trim();
            let (name, kind) = if let Some(name) = refname.strip_prefix("refs/heads/") {
                (name, BranchKind::Local)
            } else if let Some(name) = refname.strip_prefix("refs/remotes/") {
                (name, BranchKind::RemoteTracking)
            } else {
                return None;
            };
            if name.is_empty() {
                return None;
            }
            Some(BranchListing {
                name: name.to_string(),
                kind,
                symbolic: !symref.trim().is_empty(),
            })
        })
        .collect()
}
