use crate::app::AppContext;
use crate::cli::TeamsArgs;
use crate::output::{player_rows, rosters_json, team_rows, PLAYER_COLUMNS, TEAM_COLUMNS};
use crate::ui::theme::{styled, styles};
use crate::ui::{
    badge, blank_line, header, hint, print, simple_table, table, Badge, OutputMode,
    PLAIN_FIELD_SEPARATOR,
};

pub fn handle_teams(ctx: &AppContext, args: &TeamsArgs) -> anyhow::Result<()> {
    let category = ctx.category(args.category.as_deref())?;
    let mut auction = ctx.open_auction()?;
    let rosters = auction.query_teams(category)?;
    let ui_ctx = ctx.ui_context(args.json, args.format);

    match ui_ctx.mode {
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(&rosters_json(&rosters))?);
        }
        OutputMode::Pretty => {
            if rosters.is_empty() {
                print(
                    &ui_ctx,
                    &badge(&ui_ctx, Badge::Info, &format!("No {} session", category)),
                );
                print(
                    &ui_ctx,
                    &hint(
                        &ui_ctx,
                        &format!(
                            "auction session start {} --team \"Strikers=1000\"",
                            category.slug()
                        ),
                    ),
                );
                return Ok(());
            }

            print(&ui_ctx, &header(&ui_ctx, "teams", Some(category.as_str())));
            print(&ui_ctx, &table(&ui_ctx, &TEAM_COLUMNS, &team_rows(&rosters, true)));

            if args.players {
                for roster in &rosters {
                    blank_line(&ui_ctx);
                    print(
                        &ui_ctx,
                        &styled(&roster.team.name, styles::bold(), ui_ctx.color),
                    );
                    if roster.players.is_empty() {
                        print(&ui_ctx, &styled("  No players", styles::dim(), ui_ctx.color));
                    } else {
                        print(
                            &ui_ctx,
                            &simple_table(&ui_ctx, &PLAYER_COLUMNS, &player_rows(roster, true)),
                        );
                    }
                }
            }
        }
        OutputMode::Plain => {
            let rows = team_rows(&rosters, false);
            for (roster, row) in rosters.iter().zip(&rows) {
                print(&ui_ctx, &row.join(PLAIN_FIELD_SEPARATOR));
                if args.players {
                    for player in player_rows(roster, false) {
                        print(&ui_ctx, &format!("  {}", player.join(PLAIN_FIELD_SEPARATOR)));
                    }
                }
            }
        }
    }

    Ok(())
}
