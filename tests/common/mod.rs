//! Shared test helpers

#![allow(dead_code)]

mod mock_git;
mod temp_repo;

pub use mock_git::MockGit;
pub use temp_repo::TempGitRepo;

/// Listing line for a ref as printed by `git for-each-ref`
pub fn ref_line(refname: &str, symref: &str) -> String {
    format!("{refname}\t{symref}\n")
}
