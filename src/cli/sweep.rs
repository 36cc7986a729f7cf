//! Sweep command - merge every other branch into the current one

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{CHECK, Stylize, arrow};
use anstream::println;
use dialoguer::Confirm;
use gsync::error::{Error, Result};
use gsync::sweep::{NoProgress, SweepPlan, SweepProgress, execute_sweep, prepare_sweep};
use gsync::types::SweepResult;
use serde::Serialize;
use std::path::Path;

/// Options for the sweep command
#[derive(Debug, Clone, Default)]
pub struct SweepCommandOptions {
    /// Merge remote-tracking refs too (overrides config when set)
    pub include_remote: bool,
    /// Extra branches to leave out
    pub exclude: Vec<String>,
    /// Show the plan without merging
    pub dry_run: bool,
    /// Preview the plan and prompt before merging (never with `json`)
    pub confirm: bool,
    /// Print the result as JSON
    pub json: bool,
}

/// Run the sweep command
pub async fn run_sweep(path: &Path, options: SweepCommandOptions) -> Result<()> {
    let ctx = CommandContext::new(path).await?;

    let mut sweep_options = ctx.config.sweep.to_options();
    sweep_options.include_remote_branches |= options.include_remote;
    sweep_options.exclude.extend(options.exclude);

    let plan = prepare_sweep(&ctx.git, &sweep_options).await?;

    if options.dry_run {
        if options.json {
            print_json(&plan)?;
        } else {
            print_sweep_plan(&plan);
            println!("{}", "Dry run complete".muted());
        }
        return Ok(());
    }

    if plan.is_empty() {
        if options.json {
            print_json(&SweepResult::new(&plan.current_branch))?;
        } else {
            println!(
                "{}",
                format!("No branches to merge into {}", plan.current_branch).muted()
            );
        }
        return Ok(());
    }

    if options.confirm {
        print_sweep_plan(&plan);
        if !Confirm::new()
            .with_prompt("Proceed with sweep?")
            .default(true)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted".muted());
            return Ok(());
        }
        println!();
    }

    let progress: &dyn SweepProgress = if options.json {
        &NoProgress
    } else {
        println!(
            "{} {} into {}",
            "Merging".emphasis(),
            format!("{} branch(es)", plan.candidates.len()).accent(),
            plan.current_branch.accent()
        );
        &CliProgress
    };

    match execute_sweep(&plan, &ctx.git, progress).await {
        Ok(result) => {
            if options.json {
                print_json(&result)?;
            } else {
                print_sweep_summary(&result);
            }
            Ok(())
        }
        Err(e) => {
            if let Error::SweepHalted { partial, .. } = &e
                && !options.json
            {
                print_sweep_summary(partial);
            }
            Err(e)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::Internal(format!("failed to serialize sweep output: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Print sweep plan for --dry-run and --confirm
fn print_sweep_plan(plan: &SweepPlan) {
    println!(
        "{} {}:",
        "Sweep plan for".emphasis(),
        plan.current_branch.accent()
    );
    println!();

    if plan.candidates.is_empty() {
        println!("  {}", "No branches to merge".muted());
    } else {
        println!("  {}:", "Merge".emphasis());
        for branch in &plan.candidates {
            println!("    {} {}", arrow(), branch);
        }
    }

    if !plan.skipped.is_empty() {
        println!("  {}:", "Skip".emphasis());
        for skipped in &plan.skipped {
            println!(
                "    {} {} {}",
                arrow(),
                skipped.name.muted(),
                format!("({})", skipped.reason).muted()
            );
        }
    }

    println!();
}

/// Print merged and failed branches
fn print_sweep_summary(result: &SweepResult) {
    println!();
    if result.is_success() {
        println!("{}", format!("{CHECK} Sweep complete!").success());
    } else {
        println!("{}", "Sweep partially complete".warn());
    }

    let merged = result.merged_branches();
    if !merged.is_empty() {
        println!("   Merged: {}", merged.join(", ").accent());
    }

    for entry in result.failures() {
        println!("   {} {}", "Failed:".warn(), entry.branch.warn());
        println!("          {}", entry.detail.muted());
    }
}
