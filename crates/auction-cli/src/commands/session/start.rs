use auction_core::NewTeam;

use crate::app::AppContext;
use crate::cli::SessionStartArgs;
use crate::constants::FALLBACK_TEAM_BUDGET;
use crate::helpers::{confirm, parse_category, parse_team_spec};
use crate::ui::{blank_line, format_amount, hint, print, receipt};

pub fn handle_start(ctx: &AppContext, args: &SessionStartArgs) -> anyhow::Result<()> {
    let category = parse_category(&args.category)?;
    let default_budget = match args.budget {
        Some(budget) => budget,
        None => ctx.default_budget()?.unwrap_or(FALLBACK_TEAM_BUDGET),
    };
    let specs = args
        .teams
        .iter()
        .map(|value| parse_team_spec(value, default_budget))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut auction = ctx.open_auction()?;
    let existing = auction.query_teams(category)?;
    if !existing.is_empty() {
        let sold: usize = existing.iter().map(|roster| roster.players.len()).sum();
        let prompt = format!(
            "Restart the {} session? This deletes {} team(s) and {} sold player(s).",
            category,
            existing.len(),
            sold
        );
        if !confirm(&prompt, args.yes)? {
            return Err(anyhow::anyhow!("Session start cancelled"));
        }
    }

    let created = auction.initialize_session(category, &specs)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false, None);
        let pretty = ui_ctx.mode.is_pretty();
        let total = match total_budget(&specs) {
            Some(total) => format_amount(total, pretty),
            None => "overflow".to_string(),
        };
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                &format!("{} session started", category),
                &[
                    ("Category", category.to_string()),
                    ("Teams", created.to_string()),
                    ("Total Budget", total),
                ],
            ),
        );
        blank_line(&ui_ctx);
        if pretty {
            print(
                &ui_ctx,
                &hint(
                    &ui_ctx,
                    &format!(
                        "auction teams {}  \u{00B7}  auction sell {} <player> --team <team> --amount <n>",
                        category.slug(),
                        category.slug()
                    ),
                ),
            );
        }
    }

    Ok(())
}

/// Sum of the team budgets, or `None` if it does not fit in an `i64`.
fn total_budget(specs: &[NewTeam]) -> Option<i64> {
    specs
        .iter()
        .try_fold(0i64, |total, spec| total.checked_add(spec.total_budget))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_budget() {
        let specs = [NewTeam::new("A", 1000), NewTeam::new("B", 800)];
        assert_eq!(total_budget(&specs), Some(1800));
        assert_eq!(total_budget(&[]), Some(0));
    }

    #[test]
    fn test_total_budget_overflow() {
        let specs = [NewTeam::new("A", i64::MAX), NewTeam::new("B", 1)];
        assert_eq!(total_budget(&specs), None);
    }
}
