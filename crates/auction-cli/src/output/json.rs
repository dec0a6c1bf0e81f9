//! JSON output formatting for teams and players.

use auction_core::{Player, Team, TeamRoster};

/// Convert a team to JSON for output.
pub fn team_json(team: &Team) -> serde_json::Value {
    serde_json::json!({
        "id": team.id,
        "name": team.name,
        "category": team.category,
        "total_budget": team.total_budget,
        "remaining_budget": team.remaining_budget,
        "spent": team.spent(),
        "players_bought": team.players_bought,
        "created_at": team.created_at,
        "updated_at": team.updated_at,
    })
}

/// Convert a player to JSON for output.
pub fn player_json(player: &Player) -> serde_json::Value {
    serde_json::json!({
        "id": player.id,
        "name": player.name,
        "category": player.category,
        "status": player.status,
        "sold_to": player.sold_to,
        "sold_price": player.sold_price,
        "created_at": player.created_at,
        "updated_at": player.updated_at,
    })
}

/// Convert a roster to JSON, with populated players.
pub fn roster_json(roster: &TeamRoster) -> serde_json::Value {
    let mut value = team_json(&roster.team);
    value["players"] = roster.players.iter().map(player_json).collect();
    value
}

/// Convert multiple rosters to a JSON array for output.
pub fn rosters_json(rosters: &[TeamRoster]) -> Vec<serde_json::Value> {
    rosters.iter().map(roster_json).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use auction_core::Category;

    #[test]
    fn test_roster_json_populates_players() {
        let team = Team::new("Strikers", Category::Men, 1000);
        let player = Player::sold("Virat", Category::Men, team.id, 400);
        let roster = TeamRoster {
            team,
            players: vec![player],
        };

        let value = roster_json(&roster);

        assert_eq!(value["name"], "Strikers");
        assert_eq!(value["category"], "Men");
        assert_eq!(value["players"][0]["name"], "Virat");
        assert_eq!(value["players"][0]["status"], "Sold");
    }
}
