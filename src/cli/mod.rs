//! CLI commands

pub mod check;
pub mod config;
pub mod context;
pub mod status;
pub mod style;
pub mod sweep;

pub use check::run_check;
pub use config::run_config;
pub use status::{StatusCommandOptions, run_status};
pub use sweep::{SweepCommandOptions, run_sweep};

use anstream::println;
use async_trait::async_trait;
use gsync::sweep::SweepProgress;
use gsync::types::SweepEntry;
use style::{Stylize, arrow, check, cross};

/// Prints one line per branch as the sweep runs
pub struct CliProgress;

#[async_trait]
impl SweepProgress for CliProgress {
    async fn on_branch_start(&self, branch: &str) {
        println!("  {} {}", arrow(), format!("Merging {}...", branch.accent()).muted());
    }

    async fn on_branch_done(&self, entry: &SweepEntry) {
        if entry.merged {
            println!("    {} {}", check(), entry.branch.success());
        } else {
            println!("    {} {}: {}", cross(), entry.branch.warn(), entry.detail.muted());
        }
    }
}
