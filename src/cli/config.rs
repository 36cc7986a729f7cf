//! Config command - show or save the effective configuration

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check};
use anstream::println;
use gsync::config::{repo_config_path, save_config};
use gsync::error::{Error, Result};
use std::path::Path;

/// Run the config command
pub async fn run_config(path: &Path, write: bool) -> Result<()> {
    let ctx = CommandContext::new(path).await?;

    let text = toml::to_string_pretty(&ctx.config)
        .map_err(|e| Error::Config(format!("failed to serialize config: {e}")))?;
    println!("{}", format!("# {}", repo_config_path(&ctx.git_dir).display()).muted());
    println!("{}", text.trim_end());

    if write {
        let saved = save_config(&ctx.git_dir, &ctx.config)?;
        println!();
        println!("{} Wrote {}", check(), saved.display().to_string().accent());
    }

    Ok(())
}
