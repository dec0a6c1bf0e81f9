use crate::app::AppContext;
use crate::cli::UndoArgs;
use crate::helpers::confirm;
use crate::output::player_json;
use crate::ui::{badge, format_amount, print, receipt, Badge, OutputMode};

use super::{resolve_player, team_name};

pub fn handle_undo(ctx: &AppContext, args: &UndoArgs) -> anyhow::Result<()> {
    let mut auction = ctx.open_auction()?;
    let player = resolve_player(
        ctx,
        &mut auction,
        args.id.as_deref(),
        args.category.as_deref(),
    )?;
    let team = team_name(&mut auction, player.sold_to.as_ref())?;

    let prompt = format!(
        "Undo the sale of {} to {} for {}?",
        player.name,
        team.as_deref().unwrap_or("an unknown team"),
        player.sold_price
    );
    if !confirm(&prompt, args.yes)? {
        return Err(anyhow::anyhow!("Undo cancelled"));
    }

    let outcome = auction.undo(&player.id)?;

    let ui_ctx = ctx.ui_context(args.json, None);
    match ui_ctx.mode {
        OutputMode::Json => {
            let value = serde_json::json!({
                "player": player_json(&outcome.player),
                "refunded_to": outcome.refunded_to.as_ref().map(|t| t.id),
                "remaining_budget": outcome.refunded_to.as_ref().map(|t| t.remaining_budget),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputMode::Pretty | OutputMode::Plain => {
            if outcome.refund_skipped() {
                print(
                    &ui_ctx,
                    &badge(
                        &ui_ctx,
                        Badge::Warn,
                        "Owning team not found; no budget was refunded. Run `auction check`.",
                    ),
                );
            }
            if !ctx.quiet() {
                let pretty = ui_ctx.mode.is_pretty();
                let mut items = vec![
                    ("ID", outcome.player.id.to_string()),
                    ("Refunded", format_amount(outcome.player.sold_price, pretty)),
                ];
                if let Some(team) = &outcome.refunded_to {
                    items.push(("Team", team.name.clone()));
                    items.push(("Remaining", format_amount(team.remaining_budget, pretty)));
                }
                print(
                    &ui_ctx,
                    &receipt(
                        &ui_ctx,
                        &format!("Undid sale of {}", outcome.player.name),
                        &items,
                    ),
                );
            }
        }
    }

    Ok(())
}
