pub mod edit;
pub mod sell;
pub mod show;
pub mod undo;

pub use edit::handle_edit;
pub use sell::handle_sell;
pub use show::handle_show;
pub use undo::handle_undo;

use auction_core::{Auction, Player, SqliteStore, TeamId};

use crate::app::AppContext;
use crate::errors::CliError;

/// Resolve the target player: an explicit ID or ID prefix, or the category's last sale.
fn resolve_player(
    ctx: &AppContext,
    auction: &mut Auction<SqliteStore>,
    id: Option<&str>,
    category: Option<&str>,
) -> anyhow::Result<Player> {
    if let Some(id) = id {
        return Ok(auction.find_player(id)?);
    }

    let category = ctx.category(category)?;
    match auction.last_sale(category)? {
        Some(player) => Ok(player),
        None => Err(CliError::not_found(
            format!("No recorded sale in {}", category),
            "Hint: Pass a player ID, or run `auction teams --players` to find one.",
        )
        .into()),
    }
}

/// Name of the team a player is sold to, or `None` if that team is gone.
fn team_name(
    auction: &mut Auction<SqliteStore>,
    team_id: Option<&TeamId>,
) -> anyhow::Result<Option<String>> {
    let Some(id) = team_id else {
        return Ok(None);
    };
    match auction.team(id) {
        Ok(team) => Ok(Some(team.name)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auction_core::{Category, NewTeam, Team};

    #[test]
    fn test_team_name_missing_team_is_none() {
        let mut auction = Auction::new(SqliteStore::open_in_memory().unwrap());
        auction
            .initialize_session(Category::Men, &[NewTeam::new("Strikers", 1000)])
            .unwrap();
        let strikers = auction.find_team(Category::Men, "strikers").unwrap();

        assert_eq!(
            team_name(&mut auction, Some(&strikers.id)).unwrap().as_deref(),
            Some("Strikers")
        );
        let gone = Team::new("Gone", Category::Men, 0);
        assert_eq!(team_name(&mut auction, Some(&gone.id)).unwrap(), None);
        assert_eq!(team_name(&mut auction, None).unwrap(), None);
    }
}
