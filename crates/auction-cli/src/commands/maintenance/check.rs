use crate::app::AppContext;
use crate::errors::CliError;
use crate::ui::{badge, hint, kv, print, Badge, OutputMode};

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let mut auction = ctx.open_auction()?;
    let ui_ctx = ctx.ui_context(false, None);

    let storage = auction
        .store()
        .check_storage()
        .and_then(|()| auction.store().metadata().map(|_| ()));
    let report = auction.check_integrity()?;

    if storage.is_ok() && report.is_clean() {
        if !ctx.quiet() {
            match ui_ctx.mode {
                OutputMode::Pretty => {
                    if let Some(path) = auction.store().path() {
                        print(&ui_ctx, &kv(&ui_ctx, "Database", &path.display().to_string()));
                    }
                    print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, "Storage"));
                    print(
                        &ui_ctx,
                        &badge(
                            &ui_ctx,
                            Badge::Ok,
                            &format!(
                                "Ledger ({} teams, {} players)",
                                report.teams_checked, report.players_checked
                            ),
                        ),
                    );
                    println!();
                    print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, "All checks passed"));
                }
                OutputMode::Plain | OutputMode::Json => {
                    println!("check=storage ok");
                    println!("check=ledger ok");
                    println!("teams={}", report.teams_checked);
                    println!("players={}", report.players_checked);
                    println!("status=ok");
                }
            }
        }
        return Ok(());
    }

    let mut problems = report.issues.len();
    match ui_ctx.mode {
        OutputMode::Pretty => {
            if let Err(err) = &storage {
                problems += 1;
                print(&ui_ctx, &badge(&ui_ctx, Badge::Err, &format!("Storage: {}", err)));
            }
            for issue in &report.issues {
                print(&ui_ctx, &badge(&ui_ctx, Badge::Err, &issue.to_string()));
            }
            print(
                &ui_ctx,
                &hint(
                    &ui_ctx,
                    "Restore from a backup, or undo and re-enter the affected sales.",
                ),
            );
        }
        OutputMode::Plain | OutputMode::Json => {
            if let Err(err) = &storage {
                problems += 1;
                eprintln!("check=storage failed");
                eprintln!("error={}", err);
            }
            for issue in &report.issues {
                eprintln!("issue={}", issue);
            }
            eprintln!("status=failed");
        }
    }

    Err(CliError::IntegrityFailed(format!(
        "Integrity check failed: {} problem(s) found",
        problems
    ))
    .into())
}
