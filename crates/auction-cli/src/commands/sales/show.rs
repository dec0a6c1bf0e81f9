use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::output::{player_json, print_player};
use crate::ui::{header, print, OutputMode};

use super::team_name;

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let mut auction = ctx.open_auction()?;
    let player = auction.find_player(&args.id)?;
    let team = team_name(&mut auction, player.sold_to.as_ref())?;

    let ui_ctx = ctx.ui_context(args.json, None);
    match ui_ctx.mode {
        OutputMode::Json => {
            let mut value = player_json(&player);
            value["team_name"] = serde_json::json!(team);
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputMode::Pretty => {
            print(&ui_ctx, &header(&ui_ctx, "show", Some(&player.name)));
            print_player(&ui_ctx, &player, team.as_deref());
        }
        OutputMode::Plain => {
            print_player(&ui_ctx, &player, team.as_deref());
        }
    }

    Ok(())
}
