//! # Auction Core
//!
//! Core library for Auction - a CLI-first bookkeeper for live sports auctions.
//!
//! This crate provides the budget-transaction engine, the ledger store
//! abstractions, and the data models, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **store**: Ledger store traits (unit of work) and the SQLite / in-memory backends
//! - **engine**: Sell, undo and edit/reassign with budget guarantees
//! - **session**: Per-category team sessions (reset, teardown, listing, queries)
//! - **integrity**: Reconciliation report over the team/player invariants
//! - **export**: Flat export rows for CSV/JSON output

pub mod engine;
pub mod error;
pub mod export;
pub mod fs;
pub mod integrity;
pub mod session;
pub mod store;
mod validation;

pub use engine::{Auction, EditOutcome, EditRequest, Sale, SaleRequest, UndoOutcome};
pub use error::{AuctionError, Result};
pub use export::{export_rows, ExportRow};
pub use integrity::{IntegrityIssue, IntegrityReport};
pub use session::{SessionSummary, TeamRoster};
pub use store::{
    Category, LedgerStore, MemoryStore, NewTeam, Player, PlayerId, PlayerStatus, SqliteStore,
    Team, TeamId, UnitOfWork,
};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
