use auction_core::SqliteStore;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_db_path, write_config, AuctionConfig};
use crate::errors::CliError;
use crate::helpers::parse_category;
use crate::ui::{badge, blank_line, hint, print, Badge, OutputMode};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false, None);

    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nHint: Re-run with --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    let default_category = args
        .default_category
        .as_deref()
        .map(parse_category)
        .transpose()?;
    if let Some(budget) = args.default_budget {
        if budget < 0 {
            return Err(CliError::invalid_input(format!(
                "Default budget must not be negative (got {})",
                budget
            ))
            .into());
        }
    }

    let db_path = match args.path.clone().or_else(|| ctx.cli().db.clone()) {
        Some(value) => std::path::PathBuf::from(value),
        None => default_db_path()?,
    };

    let reused = db_path.exists();
    if reused {
        // Validates that the file is an auction database.
        SqliteStore::open(&db_path)?;
    } else {
        SqliteStore::create(&db_path)?;
    }

    let config = AuctionConfig::new(
        db_path.clone(),
        default_category.map(|c| c.slug().to_string()),
        args.default_budget,
    );
    write_config(&config_path, &config)?;

    if !ctx.quiet() {
        match ui_ctx.mode {
            OutputMode::Pretty => {
                let db_line = if reused {
                    format!("Using existing database at {}", db_path.display())
                } else {
                    format!("Database created at {}", db_path.display())
                };
                print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, &db_line));
                print(
                    &ui_ctx,
                    &badge(
                        &ui_ctx,
                        Badge::Ok,
                        &format!("Config written to {}", config_path.display()),
                    ),
                );
                blank_line(&ui_ctx);
                print(
                    &ui_ctx,
                    &hint(
                        &ui_ctx,
                        "auction session start men --team \"Strikers=1000\"  \u{00B7}  auction --help",
                    ),
                );
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("db_path={}", db_path.display());
                println!("config_path={}", config_path.display());
                println!("reused={}", reused);
            }
        }
    }

    Ok(())
}
