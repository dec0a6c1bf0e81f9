//! Text and table output formatting for teams and players.

use auction_core::{Player, TeamRoster};

use crate::ui::{format_amount, format_datetime, kv, print, truncate, Column, UiContext};

const NAME_WIDTH: usize = 40;

pub const TEAM_COLUMNS: [Column; 5] = [
    Column::new("Team"),
    Column::numeric("Total"),
    Column::numeric("Spent"),
    Column::numeric("Remaining"),
    Column::numeric("Players"),
];

pub const PLAYER_COLUMNS: [Column; 3] = [
    Column::new("ID"),
    Column::new("Player"),
    Column::numeric("Price"),
];

/// Build one table row per team.
///
/// Plain rows lead with the team ID, then the name, so scripts can key on
/// the first field.
pub fn team_rows(rosters: &[TeamRoster], pretty: bool) -> Vec<Vec<String>> {
    rosters
        .iter()
        .map(|roster| {
            let team = &roster.team;
            let mut row = Vec::with_capacity(6);
            if pretty {
                row.push(truncate(&team.name, NAME_WIDTH));
            } else {
                row.push(team.id.to_string());
                row.push(team.name.clone());
            }
            row.extend([
                format_amount(team.total_budget, pretty),
                format_amount(team.spent(), pretty),
                format_amount(team.remaining_budget, pretty),
                roster.players.len().to_string(),
            ]);
            row
        })
        .collect()
}

/// Build one table row per player of a roster.
pub fn player_rows(roster: &TeamRoster, pretty: bool) -> Vec<Vec<String>> {
    roster
        .players
        .iter()
        .map(|player| {
            vec![
                player.id.to_string(),
                if pretty {
                    truncate(&player.name, NAME_WIDTH)
                } else {
                    player.name.clone()
                },
                format_amount(player.sold_price, pretty),
            ]
        })
        .collect()
}

/// Key-value pairs describing a player.
pub fn player_items(player: &Player, team_name: Option<&str>, pretty: bool) -> Vec<(&'static str, String)> {
    let mut items = vec![
        ("ID", player.id.to_string()),
        ("Player", player.name.clone()),
        ("Category", player.category.to_string()),
        ("Status", player.status.to_string()),
    ];
    if let Some(name) = team_name {
        items.push(("Team", name.to_string()));
    }
    items.push(("Price", format_amount(player.sold_price, pretty)));
    items
}

/// Print a single player in human-readable format.
pub fn print_player(ctx: &UiContext, player: &Player, team_name: Option<&str>) {
    let pretty = ctx.mode.is_pretty();
    for (key, value) in player_items(player, team_name, pretty) {
        print(ctx, &kv(ctx, key, &value));
    }
    print(ctx, &kv(ctx, "Sold At", &format_datetime(&player.created_at, pretty)));
    if player.updated_at != player.created_at {
        print(ctx, &kv(ctx, "Updated At", &format_datetime(&player.updated_at, pretty)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auction_core::{Category, Team};

    #[test]
    fn test_team_rows_plain_carries_id_and_name() {
        let team = Team::new("Royal Strikers", Category::Men, 1500);
        let id = team.id.to_string();
        let rows = team_rows(
            &[TeamRoster {
                team,
                players: vec![],
            }],
            false,
        );
        assert_eq!(
            rows,
            vec![vec![
                id,
                "Royal Strikers".into(),
                "1500".into(),
                "0".into(),
                "1500".into(),
                "0".into()
            ]]
        );
    }

    #[test]
    fn test_team_rows_pretty_has_name_only() {
        let team = Team::new("Strikers", Category::Men, 1500);
        let rows = team_rows(&[TeamRoster { team, players: vec![] }], true);
        assert_eq!(rows[0][0], "Strikers");
        assert_eq!(rows[0].len(), TEAM_COLUMNS.len());
    }

    #[test]
    fn test_player_rows_show_full_ids() {
        let team = Team::new("Strikers", Category::Men, 1500);
        let player = Player::sold("Virat", Category::Men, team.id, 1200);
        let id = player.id.to_string();
        let rows = player_rows(&TeamRoster { team, players: vec![player] }, true);
        assert_eq!(rows[0][0], id);
        assert_eq!(rows[0][2], "1,200");
    }

    #[test]
    fn test_player_items_include_team() {
        let team = Team::new("Strikers", Category::Men, 1500);
        let player = Player::sold("Virat", Category::Men, team.id, 1200);
        let items = player_items(&player, Some("Strikers"), true);
        assert!(items.contains(&("Team", "Strikers".to_string())));
        assert!(items.contains(&("Price", "1,200".to_string())));
    }
}
