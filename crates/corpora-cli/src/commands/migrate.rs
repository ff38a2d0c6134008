//! Schema migration command.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::AppConfig;

pub fn execute(config: &AppConfig) -> Result<()> {
    let path = &config.database.path;
    corpora_db::init_pool(path)
        .with_context(|| format!("Failed to migrate {}", path.display()))?;

    println!(
        "{} Schema up to date: {}",
        "✓".green().bold(),
        path.display().to_string().cyan()
    );
    Ok(())
}
