//! Ledger store: traits, data types, and backends.

mod memory;
mod sqlite;
mod traits;
mod types;

pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, StoreMetadata};
pub use traits::{LedgerStore, UnitOfWork};
pub use types::{Category, NewTeam, Player, PlayerId, PlayerStatus, Team, TeamId};
