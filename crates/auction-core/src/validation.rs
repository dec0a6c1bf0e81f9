//! Input validation shared by the engine and session manager.

use std::collections::HashSet;

use crate::error::{AuctionError, Result};
use crate::store::NewTeam;

pub const MAX_NAME_CHARS: usize = 120;
pub const MAX_TEAMS_PER_SESSION: usize = 64;

/// Trim and validate a player or team name.
pub fn normalize_name(kind: &str, name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AuctionError::Validation(format!("{} name is required", kind)));
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(AuctionError::Validation(format!(
            "{} name too long (max {} characters)",
            kind, MAX_NAME_CHARS
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_amount(field: &str, amount: i64) -> Result<()> {
    if amount < 0 {
        return Err(AuctionError::Validation(format!(
            "{} must not be negative (got {})",
            field, amount
        )));
    }
    Ok(())
}

/// Validate a session's team list, returning normalized specs.
pub fn validate_team_specs(specs: &[NewTeam]) -> Result<Vec<NewTeam>> {
    if specs.is_empty() {
        return Err(AuctionError::Validation(
            "A session needs at least one team".to_string(),
        ));
    }
    if specs.len() > MAX_TEAMS_PER_SESSION {
        return Err(AuctionError::Validation(format!(
            "Too many teams (max {})",
            MAX_TEAMS_PER_SESSION
        )));
    }

    let mut seen = HashSet::new();
    let mut normalized = Vec::with_capacity(specs.len());
    for spec in specs {
        let name = normalize_name("Team", &spec.name)?;
        validate_amount("Total budget", spec.total_budget)?;
        if !seen.insert(name.to_lowercase()) {
            return Err(AuctionError::Validation(format!(
                "Duplicate team name \"{}\"",
                name
            )));
        }
        normalized.push(NewTeam::new(name, spec.total_budget));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_trims() {
        assert_eq!(normalize_name("Player", "  Virat ").unwrap(), "Virat");
    }

    #[test]
    fn test_normalize_name_rejects_blank() {
        let err = normalize_name("Player", "   ").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Player name is required");
    }

    #[test]
    fn test_normalize_name_rejects_long() {
        let long = "x".repeat(MAX_NAME_CHARS + 1);
        assert!(normalize_name("Player", &long).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("Amount", 0).is_ok());
        assert!(validate_amount("Amount", -1).is_err());
    }

    #[test]
    fn test_team_specs_reject_empty_and_duplicates() {
        assert!(validate_team_specs(&[]).is_err());

        let specs = vec![NewTeam::new("Strikers", 100), NewTeam::new("strikers ", 100)];
        let err = validate_team_specs(&specs).unwrap_err();
        assert!(err.to_string().contains("Duplicate team name"));
    }

    #[test]
    fn test_team_specs_reject_negative_budget() {
        let specs = vec![NewTeam::new("Strikers", -5)];
        assert!(validate_team_specs(&specs).is_err());
    }

    #[test]
    fn test_team_specs_normalize_names() {
        let specs = vec![NewTeam::new(" Strikers ", 100)];
        let normalized = validate_team_specs(&specs).unwrap();
        assert_eq!(normalized[0].name, "Strikers");
    }
}
