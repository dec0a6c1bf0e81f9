//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying teams and
//! players in various formats (JSON, table, plain text).

mod json;
mod text;

// Re-export public API
pub use json::{player_json, rosters_json, team_json};
pub use text::{player_rows, print_player, team_rows, PLAYER_COLUMNS, TEAM_COLUMNS};
