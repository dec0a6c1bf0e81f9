use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::ui::ListFormat;

use auction_core::VERSION;

/// Auction - CLI-first bookkeeper for live sports auctions
#[derive(Parser)]
#[command(name = "auction")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the auction database
    #[arg(long, global = true, env = "AUCTION_DB")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the database will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Category used when commands omit one
    #[arg(long, value_name = "CATEGORY")]
    pub default_category: Option<String>,

    /// Budget given to teams started without an explicit budget
    #[arg(long, value_name = "AMOUNT")]
    pub default_budget: Option<i64>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `session start`
#[derive(Args)]
pub struct SessionStartArgs {
    /// Category to (re)start
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    /// Team as NAME or NAME=BUDGET (repeatable)
    #[arg(long = "team", value_name = "NAME[=BUDGET]", required = true)]
    pub teams: Vec<String>,

    /// Budget for teams given without one
    #[arg(long, value_name = "AMOUNT")]
    pub budget: Option<i64>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for `session end`
#[derive(Args)]
pub struct SessionEndArgs {
    /// Category to end
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for `session list`
#[derive(Args)]
pub struct SessionListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum SessionSubcommand {
    /// Start a session, replacing the category's teams and players
    Start(SessionStartArgs),

    /// End a session, deleting the category's teams and players
    End(SessionEndArgs),

    /// List categories with an active session
    List(SessionListArgs),
}

/// Arguments for the `session` command group
#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionSubcommand,
}

/// Arguments for the `teams` command
#[derive(Args)]
pub struct TeamsArgs {
    /// Category to show (defaults to the configured category)
    #[arg(value_name = "CATEGORY")]
    pub category: Option<String>,

    /// List each team's players
    #[arg(long)]
    pub players: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<ListFormat>,
}

/// Arguments for the `sell` command
#[derive(Args)]
pub struct SellArgs {
    /// Category of the sale
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    /// Player name
    #[arg(value_name = "PLAYER")]
    pub player: String,

    /// Buying team (name or ID)
    #[arg(long, value_name = "TEAM")]
    pub team: String,

    /// Sale price
    #[arg(long, value_name = "AMOUNT")]
    pub amount: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `undo` command
#[derive(Args)]
pub struct UndoArgs {
    /// Player ID or unique prefix (defaults to the category's last sale)
    #[arg(value_name = "PLAYER_ID")]
    pub id: Option<String>,

    /// Category whose last sale to undo
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Player ID or unique prefix (defaults to the category's last sale)
    #[arg(value_name = "PLAYER_ID")]
    pub id: Option<String>,

    /// Category whose last sale to edit
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// New player name
    #[arg(long)]
    pub name: Option<String>,

    /// New sale price
    #[arg(long, value_name = "AMOUNT")]
    pub amount: Option<i64>,

    /// New team (name or ID)
    #[arg(long, value_name = "TEAM")]
    pub team: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Player ID (full UUID or prefix)
    #[arg(value_name = "PLAYER_ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Category to export
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    /// Output format (csv, json, jsonl)
    #[arg(long, default_value = "csv")]
    pub format: String,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,
}

/// Arguments for the `backup` command
#[derive(Args)]
pub struct BackupArgs {
    /// Destination path
    #[arg(value_name = "DEST")]
    pub destination: String,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new auction database and config
    Init(InitArgs),

    /// Manage per-category sessions
    Session(SessionArgs),

    /// Show teams and budgets, richest first
    Teams(TeamsArgs),

    /// Sell a player to a team
    Sell(SellArgs),

    /// Undo a sale, refunding the team
    Undo(UndoArgs),

    /// Correct a sale (name, price or team)
    Edit(EditArgs),

    /// Show a player by ID
    Show(ShowArgs),

    /// Export a category's results
    Export(ExportArgs),

    /// Check team and player consistency
    Check,

    /// Backup the database
    Backup(BackupArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
