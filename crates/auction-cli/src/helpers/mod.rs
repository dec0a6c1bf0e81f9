//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Category, team spec and export format parsing (`parsing`)
//! - Confirmation prompts (`prompt`)

mod parsing;
mod prompt;

// Re-export public API
pub use parsing::{parse_category, parse_export_format, parse_team_spec, ExportFormat};
pub use prompt::confirm;
