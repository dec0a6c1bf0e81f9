//! Row types for database queries.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{AuctionError, Result};
use crate::store::types::{Player, PlayerId, Team};

/// Raw row data from the teams table, before parsing into domain types.
#[derive(Debug)]
pub struct TeamRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub total_budget: i64,
    pub remaining_budget: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl TeamRow {
    pub const COLUMNS: &'static str =
        "id, name, category, total_budget, remaining_budget, created_at, updated_at";

    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            total_budget: row.get(3)?,
            remaining_budget: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    /// Combine with the team's roster rows.
    pub fn into_team(self, players_bought: Vec<PlayerId>) -> Result<Team> {
        Ok(Team {
            id: parse_uuid("team", &self.id)?,
            name: self.name,
            category: parse_category(&self.category)?,
            total_budget: self.total_budget,
            remaining_budget: self.remaining_budget,
            players_bought,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

/// Raw row data from the players table.
#[derive(Debug)]
pub struct PlayerRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub status: String,
    pub sold_to: Option<String>,
    pub sold_price: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl PlayerRow {
    pub const COLUMNS: &'static str =
        "id, name, category, status, sold_to, sold_price, created_at, updated_at";

    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            status: row.get(3)?,
            sold_to: row.get(4)?,
            sold_price: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }
}

impl TryFrom<PlayerRow> for Player {
    type Error = AuctionError;

    fn try_from(row: PlayerRow) -> Result<Self> {
        let sold_to = row
            .sold_to
            .as_deref()
            .map(|s| parse_uuid("sold_to", s))
            .transpose()?;

        Ok(Player {
            id: parse_uuid("player", &row.id)?,
            name: row.name,
            category: parse_category(&row.category)?,
            status: row.status.parse()?,
            sold_to,
            sold_price: row.sold_price,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

pub fn parse_uuid(field: &str, value: &str) -> Result<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| AuctionError::Storage(format!("Invalid {} UUID: {}", field, e)))
}

pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(|e| AuctionError::Storage(format!("Invalid timestamp: {}", e)))?
        .with_timezone(&Utc))
}

fn parse_category(value: &str) -> Result<crate::store::types::Category> {
    value
        .parse()
        .map_err(|_| AuctionError::Storage(format!("Invalid category: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::{Category, PlayerStatus};

    fn player_row() -> PlayerRow {
        PlayerRow {
            id: "0190a5b2-7c3e-7d41-8f00-5a1c2b3d4e5f".to_string(),
            name: "A".to_string(),
            category: "Men".to_string(),
            status: "Sold".to_string(),
            sold_to: Some("0190a5b2-7c3e-7d41-8f00-000000000001".to_string()),
            sold_price: 400,
            created_at: "2026-03-01T10:00:00+00:00".to_string(),
            updated_at: "2026-03-01T10:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_player_row_parses() {
        let player: Player = player_row().try_into().unwrap();
        assert_eq!(player.category, Category::Men);
        assert_eq!(player.status, PlayerStatus::Sold);
        assert_eq!(player.sold_price, 400);
        assert!(player.sold_to.is_some());
    }

    #[test]
    fn test_player_row_rejects_bad_uuid() {
        let mut row = player_row();
        row.sold_to = Some("not-a-uuid".to_string());
        let err = Player::try_from(row).unwrap_err();
        assert!(err.to_string().contains("Invalid sold_to UUID"));
    }
}
