use auction_core::SaleRequest;

use crate::app::AppContext;
use crate::cli::SellArgs;
use crate::helpers::parse_category;
use crate::output::{player_json, team_json};
use crate::ui::{blank_line, format_amount, hint, print, receipt, OutputMode};

pub fn handle_sell(ctx: &AppContext, args: &SellArgs) -> anyhow::Result<()> {
    let category = parse_category(&args.category)?;
    let mut auction = ctx.open_auction()?;
    let team = auction.find_team(category, &args.team)?;

    let sale = auction.sell(&SaleRequest::new(
        args.player.clone(),
        category,
        team.id,
        args.amount,
    ))?;

    let ui_ctx = ctx.ui_context(args.json, None);
    match ui_ctx.mode {
        OutputMode::Json => {
            let value = serde_json::json!({
                "player": player_json(&sale.player),
                "team": team_json(&sale.team),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputMode::Pretty | OutputMode::Plain => {
            if !ctx.quiet() {
                let pretty = ui_ctx.mode.is_pretty();
                print(
                    &ui_ctx,
                    &receipt(
                        &ui_ctx,
                        &format!("Sold {} to {}", sale.player.name, sale.team.name),
                        &[
                            ("ID", sale.player.id.to_string()),
                            ("Category", category.to_string()),
                            ("Amount", format_amount(sale.player.sold_price, pretty)),
                            ("Remaining", format_amount(sale.team.remaining_budget, pretty)),
                        ],
                    ),
                );
                if pretty {
                    blank_line(&ui_ctx);
                    print(
                        &ui_ctx,
                        &hint(
                            &ui_ctx,
                            &format!(
                                "auction undo --category {}  \u{00B7}  auction teams {}",
                                category.slug(),
                                category.slug()
                            ),
                        ),
                    );
                }
            }
        }
    }

    Ok(())
}
