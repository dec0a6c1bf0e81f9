//! UI primitives for the Auction CLI.
//!
//! This module provides:
//! - **Context**: Terminal detection and per-command settings
//! - **Mode**: Output routing (json, plain, pretty) and `--format` values
//! - **Theme**: Badge tokens and color styles
//! - **Render**: Tables, headers, receipts, hints, formatted text
//! - **Format**: String utilities (truncate, amounts, sizes)
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::{Terminal, UiContext};
//! use crate::ui::render::{header, table, badge, hint};
//!
//! let ctx = UiContext::for_terminal(Terminal::detect(), args.json, args.format, cli.no_color, cli.ascii);
//!
//! if ctx.mode.is_json() {
//!     // Handle JSON output separately
//!     return Ok(());
//! }
//!
//! println!("{}", header(&ctx, "teams", Some("Men")));
//! println!("{}", table(&ctx, &columns, &rows));
//! println!("{}", hint(&ctx, "auction sell men <player> --team <team> --amount <n>"));
//! ```

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

// Re-export core types at module level
pub use context::{Terminal, UiContext};
pub use mode::{ListFormat, OutputMode};
pub use theme::Badge;

// Re-export commonly used render functions
pub use render::{
    badge, blank_line, header, hint, kv, print, print_error, receipt, simple_table, table, Column,
    PLAIN_FIELD_SEPARATOR,
};

// Re-export commonly used format functions
pub use format::{format_amount, format_bytes, format_datetime, truncate};
