use std::io::IsTerminal;
use std::path::Path;

use crate::app::AppContext;
use crate::cli::BackupArgs;
use crate::ui::theme::{styled, styles};
use crate::ui::{badge, blank_line, format_bytes, hint, print, Badge, OutputMode};

pub fn handle_backup(ctx: &AppContext, args: &BackupArgs) -> anyhow::Result<()> {
    let auction = ctx.open_auction()?;
    let ui_ctx = ctx.ui_context(false, None);

    if std::io::stdin().is_terminal() && !ctx.quiet() {
        let proceed = dialoguer::Confirm::new()
            .with_prompt(format!("Back up the auction database to {}?", args.destination))
            .default(true)
            .interact()?;
        if !proceed {
            match ui_ctx.mode {
                OutputMode::Pretty => {
                    print(&ui_ctx, &badge(&ui_ctx, Badge::Warn, "Backup cancelled"));
                }
                OutputMode::Plain | OutputMode::Json => {
                    println!("status=cancelled");
                }
            }
            return Err(anyhow::anyhow!("Backup cancelled"));
        }
    }

    let bytes = auction
        .store()
        .backup_to(Path::new(&args.destination))
        .map_err(|e| anyhow::anyhow!("Backup to destination {} failed: {}", args.destination, e))?;

    if !ctx.quiet() {
        match ui_ctx.mode {
            OutputMode::Pretty => {
                print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, "Backup complete"));
                let context = format!(
                    "Path: {}  \u{00B7}  Size: {}",
                    args.destination,
                    format_bytes(bytes)
                );
                println!("{}", styled(&context, styles::dim(), ui_ctx.color));
                blank_line(&ui_ctx);
                print(&ui_ctx, &hint(&ui_ctx, "auction check"));
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("destination={}", args.destination);
                println!("bytes={}", bytes);
            }
        }
    }
    Ok(())
}
