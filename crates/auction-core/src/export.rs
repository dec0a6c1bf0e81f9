//! Flat rows for exporting a category's results.

use serde::{Deserialize, Serialize};

use crate::session::TeamRoster;

/// Player name used for teams that bought nobody.
pub const NO_PLAYERS: &str = "No Players";

/// One exported (team, player) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Team Name")]
    pub team_name: String,
    #[serde(rename = "Player Name")]
    pub player_name: String,
    #[serde(rename = "Sold Price")]
    pub sold_price: i64,
    #[serde(rename = "Category")]
    pub category: String,
}

/// Flatten rosters into export rows, keeping roster and purchase order.
///
/// A team with no players still gets one row.
pub fn export_rows(rosters: &[TeamRoster]) -> Vec<ExportRow> {
    let mut rows = Vec::new();
    for roster in rosters {
        let team = &roster.team;
        if roster.players.is_empty() {
            rows.push(ExportRow {
                team_name: team.name.clone(),
                player_name: NO_PLAYERS.to_string(),
                sold_price: 0,
                category: team.category.to_string(),
            });
            continue;
        }
        rows.extend(roster.players.iter().map(|player| ExportRow {
            team_name: team.name.clone(),
            player_name: player.name.clone(),
            sold_price: player.sold_price,
            category: team.category.to_string(),
        }));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Category, Player, Team};

    #[test]
    fn test_empty_team_gets_placeholder_row() {
        let team = Team::new("Strikers", Category::Kids, 100);
        let rows = export_rows(&[TeamRoster {
            team,
            players: vec![],
        }]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].player_name, NO_PLAYERS);
        assert_eq!(rows[0].sold_price, 0);
        assert_eq!(rows[0].category, "Kids");
    }

    #[test]
    fn test_one_row_per_player() {
        let team = Team::new("Strikers", Category::Men, 1000);
        let players = vec![
            Player::sold("A", Category::Men, team.id, 100),
            Player::sold("B", Category::Men, team.id, 250),
        ];
        let rows = export_rows(&[TeamRoster { team, players }]);

        let prices: Vec<i64> = rows.iter().map(|r| r.sold_price).collect();
        assert_eq!(prices, vec![100, 250]);
        assert!(rows.iter().all(|r| r.team_name == "Strikers"));
    }

    #[test]
    fn test_serializes_with_column_headers() {
        let row = ExportRow {
            team_name: "T".to_string(),
            player_name: "P".to_string(),
            sold_price: 5,
            category: "Men".to_string(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["Team Name"], "T");
        assert_eq!(json["Sold Price"], 5);
    }
}
