//! Ledger store trait definitions.
//!
//! A `LedgerStore` hands out units of work. Every read and write an engine
//! operation performs goes through one `UnitOfWork`, and nothing becomes
//! visible until [`UnitOfWork::commit`]. Dropping a unit of work without
//! committing discards all of its writes.

use super::types::{Category, Player, PlayerId, Team, TeamId};
use crate::error::Result;

/// Durable record keeper for teams and players.
pub trait LedgerStore {
    /// Unit of work type borrowed from the store.
    type Work<'a>: UnitOfWork
    where
        Self: 'a;

    /// Begin a unit of work.
    ///
    /// # Errors
    ///
    /// Returns `AuctionError::Sqlite` / `AuctionError::Storage` if the
    /// backend cannot start a transaction.
    fn begin(&mut self) -> Result<Self::Work<'_>>;
}

/// Atomic set of reads and writes against a ledger store.
///
/// The store keeps records; it does not keep `Player::sold_to` and
/// `Team::players_bought` consistent. That is the engine's job.
pub trait UnitOfWork {
    // --- Team operations ---

    /// Get a team by ID, with its `players_bought` list populated.
    fn team(&self, id: &TeamId) -> Result<Option<Team>>;

    /// List teams, optionally restricted to one category, in creation order.
    fn teams(&self, category: Option<Category>) -> Result<Vec<Team>>;

    /// Insert a new team.
    fn insert_team(&mut self, team: &Team) -> Result<()>;

    /// Persist a team's mutable fields and its `players_bought` list.
    ///
    /// # Errors
    ///
    /// Returns `AuctionError::NotFound` if the team does not exist.
    fn update_team(&mut self, team: &Team) -> Result<()>;

    // --- Player operations ---

    /// Get a player by ID.
    fn player(&self, id: &PlayerId) -> Result<Option<Player>>;

    /// List players, optionally restricted to one category, in creation order.
    fn players(&self, category: Option<Category>) -> Result<Vec<Player>>;

    /// Insert a new player.
    fn insert_player(&mut self, player: &Player) -> Result<()>;

    /// Persist a player's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns `AuctionError::NotFound` if the player does not exist.
    fn update_player(&mut self, player: &Player) -> Result<()>;

    /// Permanently delete a player.
    ///
    /// # Errors
    ///
    /// Returns `AuctionError::NotFound` if the player does not exist.
    fn delete_player(&mut self, id: &PlayerId) -> Result<()>;

    // --- Session operations ---

    /// Delete every team and player of a category.
    ///
    /// # Returns
    ///
    /// Returns `(teams_removed, players_removed)`.
    fn delete_category(&mut self, category: Category) -> Result<(usize, usize)>;

    /// Most recent sale in a category that has not been undone.
    fn last_sale(&self, category: Category) -> Result<Option<PlayerId>>;

    /// Set or clear the last sale pointer of a category.
    fn set_last_sale(&mut self, category: Category, player: Option<PlayerId>) -> Result<()>;

    /// Make every write of this unit of work durable.
    fn commit(self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_definition_compiles() {
        fn _accepts_store<S: LedgerStore>(_store: S) {}
        fn _accepts_work<W: UnitOfWork>(_work: W) {}
    }
}
