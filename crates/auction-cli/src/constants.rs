//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Generic failure.
    pub const FAILURE: i32 = 1;

    /// Resource not found (config, database, team, player).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// A team's budget cannot cover the sale.
    pub const INSUFFICIENT_FUNDS: i32 = 5;

    /// Integrity check failed.
    pub const INTEGRITY_FAILED: i32 = 6;
}

/// Default budget for `session start` when neither `--budget` nor config sets one.
pub const FALLBACK_TEAM_BUDGET: i64 = 1000;
