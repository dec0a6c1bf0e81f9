//! Error types for Auction core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to exit codes and hints.

use thiserror::Error;

/// Result type alias for Auction operations.
pub type Result<T> = std::result::Result<T, AuctionError>;

/// Core error type for Auction operations.
#[derive(Debug, Error)]
pub enum AuctionError {
    /// Missing or malformed input; never partially applied
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced team or player is absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Budget check failed
    #[error(
        "Insufficient funds: {team} has {available}, needs {required} (short by {shortfall})"
    )]
    InsufficientFunds {
        team: String,
        available: i64,
        required: i64,
        shortfall: i64,
    },

    /// Team/player references disagree (e.g. a sold player's team is gone)
    #[error("Inconsistent state: {0}")]
    InconsistentState(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl AuctionError {
    /// Build an `InsufficientFunds` error, computing the shortfall.
    pub fn insufficient_funds(team: impl Into<String>, available: i64, required: i64) -> Self {
        AuctionError::InsufficientFunds {
            team: team.into(),
            available,
            required,
            shortfall: required.saturating_sub(available),
        }
    }

    /// Amount the team is short by, for `InsufficientFunds` errors.
    pub fn shortfall(&self) -> Option<i64> {
        match self {
            AuctionError::InsufficientFunds { shortfall, .. } => Some(*shortfall),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AuctionError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_funds_carries_shortfall() {
        let err = AuctionError::insufficient_funds("Strikers", 600, 700);
        assert_eq!(err.shortfall(), Some(100));
        assert_eq!(
            err.to_string(),
            "Insufficient funds: Strikers has 600, needs 700 (short by 100)"
        );
    }

    #[test]
    fn test_shortfall_only_for_funds_errors() {
        let err = AuctionError::NotFound("Player x".to_string());
        assert_eq!(err.shortfall(), None);
        assert!(err.is_not_found());
    }

    #[test]
    fn test_source_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: AuctionError = io.into();
        assert!(matches!(err, AuctionError::Io { .. }));
        assert_eq!(err.to_string(), "I/O error: read-only");

        let err: AuctionError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, AuctionError::Sqlite { .. }));
        assert!(!err.is_not_found());
    }
}
