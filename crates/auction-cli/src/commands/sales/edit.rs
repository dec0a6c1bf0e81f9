use auction_core::EditRequest;

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::errors::CliError;
use crate::output::{player_json, team_json};
use crate::ui::{format_amount, print, receipt, OutputMode};

use super::resolve_player;

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    if args.name.is_none() && args.amount.is_none() && args.team.is_none() {
        return Err(CliError::invalid_input(
            "Nothing to edit\nHint: Pass --name, --amount or --team.",
        )
        .into());
    }

    let mut auction = ctx.open_auction()?;
    let player = resolve_player(
        ctx,
        &mut auction,
        args.id.as_deref(),
        args.category.as_deref(),
    )?;

    let team_id = match (&args.team, player.sold_to) {
        (Some(team), _) => auction.find_team(player.category, team)?.id,
        (None, Some(team_id)) => team_id,
        (None, None) => {
            return Err(CliError::invalid_input(format!(
                "Player {} is not sold to any team\nHint: Pass --team to assign one.",
                player.name
            ))
            .into());
        }
    };

    let request = EditRequest::new(
        player.id,
        args.name.clone().unwrap_or_else(|| player.name.clone()),
        args.amount.unwrap_or(player.sold_price),
        team_id,
    );
    let outcome = auction.edit(&request)?;

    let ui_ctx = ctx.ui_context(args.json, None);
    match ui_ctx.mode {
        OutputMode::Json => {
            let value = serde_json::json!({
                "player": player_json(&outcome.player),
                "team": team_json(&outcome.team),
                "released_from": outcome.released_from.as_ref().map(team_json),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputMode::Pretty | OutputMode::Plain => {
            if !ctx.quiet() {
                let pretty = ui_ctx.mode.is_pretty();
                let mut items = vec![
                    ("ID", outcome.player.id.to_string()),
                    ("Player", outcome.player.name.clone()),
                    ("Amount", format_amount(outcome.player.sold_price, pretty)),
                    ("Team", outcome.team.name.clone()),
                    ("Remaining", format_amount(outcome.team.remaining_budget, pretty)),
                ];
                if let Some(previous) = &outcome.released_from {
                    items.push(("Released From", previous.name.clone()));
                    items.push((
                        "Released Remaining",
                        format_amount(previous.remaining_budget, pretty),
                    ));
                }
                print(
                    &ui_ctx,
                    &receipt(&ui_ctx, &format!("Updated {}", outcome.player.name), &items),
                );
            }
        }
    }

    Ok(())
}
