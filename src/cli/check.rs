//! Check command - merge feasibility for one branch

use crate::cli::context::CommandContext;
use crate::cli::status::print_merge_outcome;
use crate::cli::style::Stylize;
use anstream::println;
use gsync::error::{Error, Result};
use gsync::status::get_merge_feasibility;
use serde_json::json;
use std::path::Path;

/// Run the check command
pub async fn run_check(
    path: &Path,
    branch: &str,
    reference: Option<&str>,
    as_json: bool,
) -> Result<()> {
    let ctx = CommandContext::new(path).await?;
    let reference_branch = reference.unwrap_or(&ctx.config.reference_branch);

    let outcome = get_merge_feasibility(&ctx.git, branch, reference_branch).await?;

    if as_json {
        let value = json!({
            "branch": branch,
            "reference_branch": reference_branch,
            "merge_outcome": outcome,
        });
        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| Error::Internal(format!("failed to serialize outcome: {e}")))?;
        println!("{text}");
    } else {
        println!(
            "{} {} {} {}",
            "Merging".emphasis(),
            reference_branch.accent(),
            "into".emphasis(),
            branch.accent()
        );
        print_merge_outcome(&outcome, reference_branch);
    }

    Ok(())
}
