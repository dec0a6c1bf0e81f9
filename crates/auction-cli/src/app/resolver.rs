//! Path resolution for config and database files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, AuctionConfig};
use crate::errors::CliError;

/// Resolve the config file path, checking AUCTION_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("AUCTION_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the database path from CLI args or config.
pub fn resolve_db_path(cli: &Cli, config: Option<&AuctionConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.db.as_deref() {
        return Ok(PathBuf::from(path));
    }

    match config {
        Some(config) => Ok(PathBuf::from(&config.database.path)),
        None => {
            let config_path = resolve_config_path()?;
            Err(CliError::not_found(
                missing_config_message(&config_path),
                "Hint: Run `auction init` to create a database.",
            )
            .into())
        }
    }
}

/// Error message when the database file is missing.
pub fn missing_db_message(path: &Path) -> String {
    format!(
        "No auction database found at {}\n\nRun:\n  auction init\n\nOr specify a database path:\n  AUCTION_DB=/path/to/auction.db auction init",
        path.display()
    )
}

/// Error message when the config file is missing.
pub fn missing_config_message(config_path: &Path) -> String {
    format!(
        "No auction config found at {}\n\nRun:\n  auction init\n\nOr specify a database path:\n  AUCTION_DB=/path/to/auction.db auction init",
        config_path.display()
    )
}
