//! In-memory ledger store.
//!
//! A unit of work operates on a private copy of the state and swaps it in on
//! commit, so dropped units of work leave the store untouched.

use std::collections::HashMap;

use super::traits::{LedgerStore, UnitOfWork};
use super::types::{Category, Player, PlayerId, Team, TeamId};
use crate::error::{AuctionError, Result};

#[derive(Debug, Clone, Default)]
struct State {
    teams: Vec<Team>,
    players: Vec<Player>,
    last_sales: HashMap<Category, PlayerId>,
}

/// Volatile store with the same transactional contract as [`super::SqliteStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: State,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records, as-is.
    ///
    /// No consistency checks are applied; this is how imported or damaged
    /// data gets loaded for inspection.
    pub fn with_records(teams: Vec<Team>, players: Vec<Player>) -> Self {
        Self {
            state: State {
                teams,
                players,
                last_sales: HashMap::new(),
            },
        }
    }
}

impl LedgerStore for MemoryStore {
    type Work<'a> = MemoryWork<'a>;

    fn begin(&mut self) -> Result<MemoryWork<'_>> {
        let state = self.state.clone();
        Ok(MemoryWork { store: self, state })
    }
}

/// Unit of work over a [`MemoryStore`].
pub struct MemoryWork<'a> {
    store: &'a mut MemoryStore,
    state: State,
}

fn in_category(filter: Option<Category>, category: Category) -> bool {
    filter.map_or(true, |wanted| wanted == category)
}

impl UnitOfWork for MemoryWork<'_> {
    fn team(&self, id: &TeamId) -> Result<Option<Team>> {
        Ok(self.state.teams.iter().find(|t| &t.id == id).cloned())
    }

    fn teams(&self, category: Option<Category>) -> Result<Vec<Team>> {
        Ok(self
            .state
            .teams
            .iter()
            .filter(|t| in_category(category, t.category))
            .cloned()
            .collect())
    }

    fn insert_team(&mut self, team: &Team) -> Result<()> {
        if self.state.teams.iter().any(|t| t.id == team.id) {
            return Err(AuctionError::Storage(format!(
                "Team {} already exists",
                team.id
            )));
        }
        self.state.teams.push(team.clone());
        Ok(())
    }

    fn update_team(&mut self, team: &Team) -> Result<()> {
        let slot = self
            .state
            .teams
            .iter_mut()
            .find(|t| t.id == team.id)
            .ok_or_else(|| AuctionError::NotFound(format!("Team {}", team.id)))?;
        *slot = team.clone();
        Ok(())
    }

    fn player(&self, id: &PlayerId) -> Result<Option<Player>> {
        Ok(self.state.players.iter().find(|p| &p.id == id).cloned())
    }

    fn players(&self, category: Option<Category>) -> Result<Vec<Player>> {
        Ok(self
            .state
            .players
            .iter()
            .filter(|p| in_category(category, p.category))
            .cloned()
            .collect())
    }

    fn insert_player(&mut self, player: &Player) -> Result<()> {
        if self.state.players.iter().any(|p| p.id == player.id) {
            return Err(AuctionError::Storage(format!(
                "Player {} already exists",
                player.id
            )));
        }
        self.state.players.push(player.clone());
        Ok(())
    }

    fn update_player(&mut self, player: &Player) -> Result<()> {
        let slot = self
            .state
            .players
            .iter_mut()
            .find(|p| p.id == player.id)
            .ok_or_else(|| AuctionError::NotFound(format!("Player {}", player.id)))?;
        *slot = player.clone();
        Ok(())
    }

    fn delete_player(&mut self, id: &PlayerId) -> Result<()> {
        let before = self.state.players.len();
        self.state.players.retain(|p| &p.id != id);
        if self.state.players.len() == before {
            return Err(AuctionError::NotFound(format!("Player {}", id)));
        }
        Ok(())
    }

    fn delete_category(&mut self, category: Category) -> Result<(usize, usize)> {
        let teams_before = self.state.teams.len();
        let players_before = self.state.players.len();
        self.state.teams.retain(|t| t.category != category);
        self.state.players.retain(|p| p.category != category);
        self.state.last_sales.remove(&category);
        Ok((
            teams_before - self.state.teams.len(),
            players_before - self.state.players.len(),
        ))
    }

    fn last_sale(&self, category: Category) -> Result<Option<PlayerId>> {
        Ok(self.state.last_sales.get(&category).copied())
    }

    fn set_last_sale(&mut self, category: Category, player: Option<PlayerId>) -> Result<()> {
        match player {
            Some(id) => {
                self.state.last_sales.insert(category, id);
            }
            None => {
                self.state.last_sales.remove(&category);
            }
        }
        Ok(())
    }

    fn commit(self) -> Result<()> {
        self.store.state = self.state;
        Ok(())
    }
}
