use crate::app::AppContext;
use crate::cli::SessionListArgs;
use crate::ui::{badge, hint, print, table, Badge, Column, OutputMode};

const SESSION_COLUMNS: [Column; 2] = [Column::new("Category"), Column::numeric("Teams")];

pub fn handle_list(ctx: &AppContext, args: &SessionListArgs) -> anyhow::Result<()> {
    let mut auction = ctx.open_auction()?;
    let sessions = auction.list_sessions()?;
    let ui_ctx = ctx.ui_context(args.json, None);

    match ui_ctx.mode {
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(&sessions)?);
        }
        OutputMode::Pretty if sessions.is_empty() => {
            print(&ui_ctx, &badge(&ui_ctx, Badge::Info, "No active sessions"));
            print(
                &ui_ctx,
                &hint(&ui_ctx, "auction session start men --team \"Strikers=1000\""),
            );
        }
        OutputMode::Pretty | OutputMode::Plain => {
            let rows: Vec<Vec<String>> = sessions
                .iter()
                .map(|session| {
                    vec![
                        session.category.slug().to_string(),
                        session.team_count.to_string(),
                    ]
                })
                .collect();
            if !rows.is_empty() {
                print(&ui_ctx, &table(&ui_ctx, &SESSION_COLUMNS, &rows));
            }
        }
    }

    Ok(())
}
