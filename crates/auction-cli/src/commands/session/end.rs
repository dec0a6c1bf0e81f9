use crate::app::AppContext;
use crate::cli::SessionEndArgs;
use crate::helpers::{confirm, parse_category};
use crate::ui::{print, receipt};

pub fn handle_end(ctx: &AppContext, args: &SessionEndArgs) -> anyhow::Result<()> {
    let category = parse_category(&args.category)?;
    let mut auction = ctx.open_auction()?;

    let prompt = format!(
        "End the {} session? All of its teams and sold players will be deleted.",
        category
    );
    if !confirm(&prompt, args.yes)? {
        return Err(anyhow::anyhow!("Session end cancelled"));
    }

    let (teams, players) = auction.teardown_session(category)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false, None);
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                &format!("{} session ended", category),
                &[
                    ("Category", category.to_string()),
                    ("Teams Removed", teams.to_string()),
                    ("Players Removed", players.to_string()),
                ],
            ),
        );
    }

    Ok(())
}
