//! gsync - branch divergence, merge feasibility and merge sweeps

mod cli;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use cli::style::Stylize;
use cli::{StatusCommandOptions, SweepCommandOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gsync",
    version,
    about = "Check branch divergence and merge feasibility, and sweep-merge branches"
)]
struct Cli {
    /// Path to the repository
    #[arg(long, global = true, default_value = ".")]
    path: PathBuf,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show divergence from the reference branch and whether it merges cleanly
    Status {
        /// Branch to report on (defaults to the checked-out branch)
        #[arg(long)]
        branch: Option<String>,
        /// Branch to compare against (defaults to config, then origin/main)
        #[arg(long)]
        reference: Option<String>,
        /// Don't fetch before checking
        #[arg(long)]
        no_fetch: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether the reference branch merges cleanly into a branch
    Check {
        /// Branch to merge into
        branch: String,
        /// Branch to merge (defaults to config, then origin/main)
        #[arg(long)]
        reference: Option<String>,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Merge every other branch into the current branch
    Sweep {
        /// Also merge remote-tracking branches
        #[arg(long)]
        include_remote: bool,
        /// Branch to leave out (repeatable)
        #[arg(long, value_name = "BRANCH")]
        exclude: Vec<String>,
        /// Show what would be merged without merging
        #[arg(long)]
        dry_run: bool,
        /// Preview the plan and ask before merging
        #[arg(long, conflicts_with = "json")]
        confirm: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration
    Config {
        /// Save it to .git/gsync/config.toml
        #[arg(long)]
        write: bool,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gsync={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            anstream::eprintln!("{} {e:#}", "error:".error());
            if e
                .downcast_ref::<gsync::error::Error>()
                .is_some_and(gsync::error::Error::is_integrity_failure)
            {
                anstream::eprintln!(
                    "{}",
                    "The repository may still be mid-merge. Inspect it with 'git status' and run 'git merge --abort' before retrying."
                        .warn()
                );
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let path = cli.path;
    let command = cli.command.unwrap_or(Commands::Status {
        branch: None,
        reference: None,
        no_fetch: false,
        json: false,
    });

    match command {
        Commands::Status {
            branch,
            reference,
            no_fetch,
            json,
        } => cli::run_status(
            &path,
            StatusCommandOptions {
                branch,
                reference,
                no_fetch,
                json,
            },
        )
        .await
        .context("status check failed")?,
        Commands::Check {
            branch,
            reference,
            json,
        } => cli::run_check(&path, &branch, reference.as_deref(), json)
            .await
            .with_context(|| format!("merge check for '{branch}' failed"))?,
        Commands::Sweep {
            include_remote,
            exclude,
            dry_run,
            confirm,
            json,
        } => cli::run_sweep(
            &path,
            SweepCommandOptions {
                include_remote,
                exclude,
                dry_run,
                confirm,
                json,
            },
        )
        .await
        .context("sweep failed")?,
        Commands::Config { write } => cli::run_config(&path, write)
            .await
            .context("config failed")?,
    }

    Ok(())
}
