//! Core data types for the ledger store.
//!
//! `Player::sold_to` is the source of truth for ownership. `Team::players_bought`
//! is a back-reference list that the engine keeps in sync through
//! [`Team::attach`] and [`Team::release`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuctionError, Result};

/// Team identifier.
pub type TeamId = Uuid;

/// Player identifier.
pub type PlayerId = Uuid;

/// Auction category. Each category runs its own session of teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Men,
    Women,
    Kids,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 3] = [Category::Men, Category::Women, Category::Kids];

    /// Title-case name used for storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Men => "Men",
            Self::Women => "Women",
            Self::Kids => "Kids",
        }
    }

    /// Lowercase name used in metadata keys and file names.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
            Self::Kids => "kids",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AuctionError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                AuctionError::Validation(format!(
                    "Unknown category \"{}\" (expected men, women or kids)",
                    trimmed
                ))
            })
    }
}

/// Sale status of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerStatus {
    Unsold,
    Sold,
}

impl PlayerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unsold => "Unsold",
            Self::Sold => "Sold",
        }
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerStatus {
    type Err = AuctionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Unsold" => Ok(Self::Unsold),
            "Sold" => Ok(Self::Sold),
            other => Err(AuctionError::Storage(format!(
                "Invalid player status: {}",
                other
            ))),
        }
    }
}

/// A team bidding in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub category: Category,
    /// Fixed at session start.
    pub total_budget: i64,
    pub remaining_budget: i64,
    /// Players bought, in purchase order.
    pub players_bought: Vec<PlayerId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// Create a team with its full budget available.
    pub fn new(name: impl Into<String>, category: Category, total_budget: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            category,
            total_budget,
            remaining_budget: total_budget,
            players_bought: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Amount spent so far.
    pub fn spent(&self) -> i64 {
        self.total_budget - self.remaining_budget
    }

    pub fn can_afford(&self, amount: i64) -> bool {
        self.remaining_budget >= amount
    }

    /// Whether `player_id` is on this team's list.
    pub fn owns(&self, player_id: &PlayerId) -> bool {
        self.players_bought.contains(player_id)
    }

    /// Charge `price` and append the player to the list (once).
    pub(crate) fn attach(&mut self, player_id: PlayerId, price: i64) {
        self.remaining_budget -= price;
        if !self.owns(&player_id) {
            self.players_bought.push(player_id);
        }
        self.touch();
    }

    /// Refund `price` and drop the player from the list.
    pub(crate) fn release(&mut self, player_id: &PlayerId, price: i64) {
        self.remaining_budget += price;
        self.players_bought.retain(|id| id != player_id);
        self.touch();
    }

    /// Apply a price change for a player already on the list.
    pub(crate) fn reprice(&mut self, delta: i64) {
        self.remaining_budget -= delta;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A player record. Created on sale, deleted on undo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub category: Category,
    pub status: PlayerStatus,
    /// Set iff `status` is `Sold`.
    pub sold_to: Option<TeamId>,
    /// Zero iff `status` is `Unsold`.
    pub sold_price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    /// Create a player already sold to `team_id`.
    pub fn sold(name: impl Into<String>, category: Category, team_id: TeamId, price: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            category,
            status: PlayerStatus::Sold,
            sold_to: Some(team_id),
            sold_price: price,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_sold(&self) -> bool {
        self.status == PlayerStatus::Sold && self.sold_to.is_some()
    }

    pub(crate) fn reassign(&mut self, name: String, price: i64, team_id: TeamId) {
        self.name = name;
        self.sold_price = price;
        self.sold_to = Some(team_id);
        self.updated_at = Utc::now();
    }
}

/// Team specification for starting a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub total_budget: i64,
}

impl NewTeam {
    pub fn new(name: impl Into<String>, total_budget: i64) -> Self {
        Self {
            name: name.into(),
            total_budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_case_insensitive() {
        assert_eq!("men".parse::<Category>().unwrap(), Category::Men);
        assert_eq!("WOMEN".parse::<Category>().unwrap(), Category::Women);
        assert_eq!(" Kids ".parse::<Category>().unwrap(), Category::Kids);
    }

    #[test]
    fn test_category_parse_rejects_unknown() {
        let err = "seniors".parse::<Category>().unwrap_err();
        assert!(matches!(err, AuctionError::Validation(_)));
    }

    #[test]
    fn test_category_display_is_title_case() {
        assert_eq!(Category::Women.to_string(), "Women");
        assert_eq!(Category::Women.slug(), "women");
    }

    #[test]
    fn test_new_team_starts_with_full_budget() {
        let team = Team::new("Strikers", Category::Men, 1000);
        assert_eq!(team.remaining_budget, 1000);
        assert_eq!(team.spent(), 0);
        assert!(team.players_bought.is_empty());
    }

    #[test]
    fn test_attach_and_release_keep_list_in_sync() {
        let mut team = Team::new("Strikers", Category::Men, 1000);
        let player = Player::sold("A", Category::Men, team.id, 400);

        team.attach(player.id, 400);
        team.attach(player.id, 0);
        assert_eq!(team.remaining_budget, 600);
        assert_eq!(team.players_bought, vec![player.id]);

        team.release(&player.id, 400);
        assert_eq!(team.remaining_budget, 1000);
        assert!(!team.owns(&player.id));
    }

    #[test]
    fn test_reprice_applies_delta() {
        let mut team = Team::new("Strikers", Category::Men, 1000);
        team.attach(Uuid::now_v7(), 400);
        team.reprice(300);
        assert_eq!(team.remaining_budget, 300);
        team.reprice(-100);
        assert_eq!(team.remaining_budget, 400);
    }

    #[test]
    fn test_player_status_round_trip() {
        assert_eq!("Sold".parse::<PlayerStatus>().unwrap(), PlayerStatus::Sold);
        assert!("sold".parse::<PlayerStatus>().is_err());
    }
}
