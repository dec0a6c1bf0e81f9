//! Application context for the Auction CLI.
//!
//! Provides a unified context that combines CLI arguments with
//! lazily-loaded configuration.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;
use tracing::debug;

use auction_core::{Auction, Category, SqliteStore};

use crate::cli::Cli;
use crate::config::{read_config, AuctionConfig};
use crate::errors::CliError;
use crate::helpers::parse_category;
use crate::ui::{ListFormat, Terminal, UiContext};

use super::resolver::{missing_db_message, resolve_config_path, resolve_db_path};

/// Application context that bundles CLI args with the config file.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<AuctionConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the config file, loading it lazily. `None` when it does not exist.
    pub fn config(&self) -> anyhow::Result<Option<&AuctionConfig>> {
        let config = self.config.get_or_try_init(|| -> anyhow::Result<_> {
            let path = resolve_config_path()?;
            if !path.exists() {
                return Ok(None);
            }
            read_config(&path).map(Some)
        })?;
        Ok(config.as_ref())
    }

    /// Build a UI context from global flags plus per-command output flags.
    pub fn ui_context(&self, json: bool, format: Option<ListFormat>) -> UiContext {
        UiContext::for_terminal(
            Terminal::detect(),
            json,
            format,
            self.cli.no_color,
            self.cli.ascii,
        )
    }

    /// Resolve the database path from `--db`, `AUCTION_DB` or the config.
    pub fn db_path(&self) -> anyhow::Result<PathBuf> {
        resolve_db_path(self.cli, self.config()?)
    }

    /// Open the auction database.
    pub fn open_auction(&self) -> anyhow::Result<Auction<SqliteStore>> {
        let path = self.db_path()?;
        if !path.exists() {
            return Err(CliError::not_found(
                missing_db_message(&path),
                "Hint: Run `auction init` or pass --db.",
            )
            .into());
        }
        debug!(path = %path.display(), "opening auction database");
        Ok(Auction::new(SqliteStore::open(&path)?))
    }

    /// Resolve a category argument, falling back to the configured default.
    pub fn category(&self, value: Option<&str>) -> anyhow::Result<Category> {
        if let Some(value) = value {
            return parse_category(value);
        }
        let configured = self
            .config()?
            .and_then(|config| config.auction.default_category.as_deref());
        match configured {
            Some(value) => parse_category(value),
            None => Err(CliError::invalid_input(
                "No category given and no default_category configured\nHint: Pass a category (men, women, kids).",
            )
            .into()),
        }
    }

    /// Budget used for teams started without an explicit one.
    pub fn default_budget(&self) -> anyhow::Result<Option<i64>> {
        Ok(self
            .config()?
            .and_then(|config| config.auction.default_budget))
    }
}
