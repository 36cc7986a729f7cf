//! Status command - divergence, feasibility and a recommendation

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check, cross, question, spinner_style};
use anstream::println;
use gsync::error::{Error, Result};
use gsync::git::fetch;
use gsync::status::{StatusOptions, get_status_report};
use gsync::types::{MergeOutcome, StatusReport};
use indicatif::ProgressBar;
use std::path::Path;
use std::time::Duration;

/// Options for the status command
#[derive(Debug, Clone, Default)]
pub struct StatusCommandOptions {
    /// Branch to report on (defaults to the checked-out branch)
    pub branch: Option<String>,
    /// Branch to compare against (defaults to config)
    pub reference: Option<String>,
    /// Skip fetching before the check
    pub no_fetch: bool,
    /// Print JSON instead of text
    pub json: bool,
}

/// Run the status command
pub async fn run_status(path: &Path, options: StatusCommandOptions) -> Result<()> {
    let ctx = CommandContext::new(path).await?;

    let reference_branch = options
        .reference
        .unwrap_or_else(|| ctx.config.reference_branch.clone());

    if ctx.config.fetch && !options.no_fetch {
        let spinner = if options.json {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        spinner.set_style(spinner_style());
        spinner.set_message(format!("Fetching from {}...", ctx.config.remote.emphasis()));
        spinner.enable_steady_tick(Duration::from_millis(80));

        let output = fetch(&ctx.git, &ctx.config.remote).await?;

        if output.succeeded {
            spinner.finish_with_message(format!(
                "{} Fetched from {}",
                check(),
                ctx.config.remote.emphasis()
            ));
        } else {
            spinner.finish_with_message(format!(
                "{} Could not fetch from {}: {}",
                question(),
                ctx.config.remote.emphasis(),
                output.diagnostic().muted()
            ));
        }
    }

    let report = get_status_report(
        &ctx.git,
        &StatusOptions {
            current_branch: options.branch,
            reference_branch,
        },
    )
    .await?;

    if options.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| Error::Internal(format!("failed to serialize report: {e}")))?;
        println!("{json}");
    } else {
        print_status_report(&report);
    }

    Ok(())
}

/// Print the report in the order the checks ran
fn print_status_report(report: &StatusReport) {
    let divergence = &report.divergence;

    println!(
        "{} {}",
        "Current branch:".emphasis(),
        divergence.current_branch.accent()
    );

    if report.working_tree.is_clean() {
        println!("{}", "No uncommitted changes.".muted());
    } else {
        println!("{}", "You have uncommitted changes:".warn());
        for entry in &report.working_tree.entries {
            println!("  {} {}", entry.code.warn(), entry.path);
        }
    }

    println!();
    println!(
        "{} {}: {} ahead, {} behind",
        "Compared with".emphasis(),
        divergence.reference_branch.accent(),
        divergence.commits_ahead.accent(),
        divergence.commits_behind.accent()
    );

    print_merge_outcome(&report.merge_outcome, &divergence.reference_branch);

    println!();
    println!(
        "{} {}",
        "Recommendation:".emphasis(),
        report.recommendation.accent()
    );
    println!("  {}", report.recommendation.hint().muted());
}

/// Print one merge outcome line (shared with the check command)
pub fn print_merge_outcome(outcome: &MergeOutcome, reference_branch: &str) {
    match outcome {
        MergeOutcome::Clean => println!(
            "{} {} can be merged without conflicts",
            check(),
            reference_branch.accent()
        ),
        MergeOutcome::Conflicted { paths, detail } => {
            let why = if paths.is_empty() {
                "cannot be merged"
            } else {
                "cannot be merged due to conflicts"
            };
            println!("{} {} {why}", cross(), reference_branch.accent());
            for path in paths {
                println!("    {}", path.warn());
            }
            if let Some(detail) = detail {
                for line in detail.lines() {
                    println!("    {}", line.trim().muted());
                }
            }
        }
        MergeOutcome::Unknown { reason } => println!(
            "{} Merge status unknown: {}",
            question(),
            reason.to_string().muted()
        ),
    }
}
