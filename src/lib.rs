//! gsync: branch divergence, merge feasibility and merge sweeps for git
//!
//! The library holds every decision gsync makes; the `gsync` binary is a
//! thin shell over it. All git access goes through [`git::GitExecutor`], so
//! the whole engine runs against a scripted executor in tests.
//!
//! - [`status`] - ahead/behind counts, trial-merge feasibility, recommendations
//! - [`sweep`] - merge every other branch into the current one
//! - [`config`] - per-repository and per-user settings

pub mod config;
pub mod error;
pub mod git;
pub mod status;
pub mod sweep;
pub mod types;
