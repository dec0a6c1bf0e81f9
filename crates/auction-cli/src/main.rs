//! Auction CLI - a CLI-first bookkeeper for live sports auctions
//!
//! This is the command-line interface for Auction. It wraps the core
//! budget-transaction engine with sessions, sales and maintenance commands.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use auction_core::VERSION;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands, SessionSubcommand};
use crate::commands::{export, init, maintenance, misc, sales, session, teams};
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false, None);

        let (error_msg, hint) = split_error_hint(&format!("{}", e));
        print_error(&ui_ctx, &error_msg, hint.as_deref());
        std::process::exit(errors::exit_code_for(&e));
    }
}

/// Install the stderr log subscriber.
///
/// `-v`/`-vv` take precedence; otherwise `AUCTION_LOG`, then `RUST_LOG`,
/// then `warn`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => std::env::var("AUCTION_LOG")
            .ok()
            .and_then(|value| EnvFilter::try_new(value).ok())
            .or_else(|| EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Split an error message into its text and hint, adding contextual hints
/// for common errors.
fn split_error_hint(error: &str) -> (String, Option<String>) {
    let (message, hint) = match error.find("\nHint:") {
        Some(idx) => (error[..idx].to_string(), Some(error[idx + 1..].to_string())),
        None => (error.to_string(), contextual_hint(error)),
    };
    let hint = hint.map(|h| h.trim_start_matches("Hint:").trim().to_string());
    (message, hint)
}

fn contextual_hint(error: &str) -> Option<String> {
    let error_lower = error.to_lowercase();

    if error_lower.contains("player") && error_lower.contains("not found") {
        return Some("Hint: Run `auction teams --players` to find player IDs.".to_string());
    }

    if error_lower.contains("team") && error_lower.contains("not found") {
        return Some(
            "Hint: Run `auction teams <category>` to see the teams in a session.".to_string(),
        );
    }

    if error_lower.contains("insufficient funds") {
        return Some(
            "Hint: Lower the amount or pick a team with more budget left (`auction teams`)."
                .to_string(),
        );
    }

    if error_lower.contains("invalid player id") {
        return Some(
            "Hint: Pass a full player ID or its first few characters, as printed by `auction teams --players`."
                .to_string(),
        );
    }

    if error_lower.contains("unknown category") {
        return Some("Hint: Categories are men, women and kids.".to_string());
    }

    if error_lower.contains("backup") && error_lower.contains("destination") {
        return Some(
            "Hint: Ensure the destination path is writable and the parent directory exists."
                .to_string(),
        );
    }

    if error_lower.contains("integrity") && error_lower.contains("failed") {
        return Some(
            "Hint: Restore a copy made with `auction backup`, or undo and re-enter the affected sales."
                .to_string(),
        );
    }

    None
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::Session(args)) => match &args.command {
            SessionSubcommand::Start(start_args) => {
                session::handle_start(ctx, start_args)?;
            }
            SessionSubcommand::End(end_args) => {
                session::handle_end(ctx, end_args)?;
            }
            SessionSubcommand::List(list_args) => {
                session::handle_list(ctx, list_args)?;
            }
        },
        Some(Commands::Teams(args)) => {
            teams::handle_teams(ctx, args)?;
        }
        Some(Commands::Sell(args)) => {
            sales::handle_sell(ctx, args)?;
        }
        Some(Commands::Undo(args)) => {
            sales::handle_undo(ctx, args)?;
        }
        Some(Commands::Edit(args)) => {
            sales::handle_edit(ctx, args)?;
        }
        Some(Commands::Show(args)) => {
            sales::handle_show(ctx, args)?;
        }
        Some(Commands::Export(args)) => {
            export::handle_export(ctx, args)?;
        }
        Some(Commands::Check) => {
            maintenance::handle_check(ctx)?;
        }
        Some(Commands::Backup(args)) => {
            maintenance::handle_backup(ctx, args)?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args)?;
        }
        None => {
            println!("Auction v{}", VERSION);
            println!("\nQuickstart:");
            println!("  auction init");
            println!("  auction session start men --team \"Strikers=1000\" --team \"Falcons=1000\"");
            println!("  auction sell men \"Virat\" --team Strikers --amount 400");
            println!("  auction teams men --players");
            println!("  auction undo --category men");
            println!("\nRun `auction --help` for full usage.");
        }
    }

    Ok(())
}
