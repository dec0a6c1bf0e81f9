//! Parsing helpers for categories, team specs and export formats.

use auction_core::{Category, NewTeam};

use crate::errors::CliError;

/// Parse a category name (case-insensitive).
pub fn parse_category(value: &str) -> anyhow::Result<Category> {
    value
        .parse::<Category>()
        .map_err(|e| CliError::invalid_input(e.to_string()).into())
}

/// Parse a `NAME` or `NAME=BUDGET` team spec.
pub fn parse_team_spec(value: &str, default_budget: i64) -> anyhow::Result<NewTeam> {
    let Some((name, budget)) = value.rsplit_once('=') else {
        return Ok(NewTeam::new(value.trim(), default_budget));
    };

    let budget = budget.trim().parse::<i64>().map_err(|_| {
        CliError::invalid_input(format!(
            "Invalid budget in team spec \"{}\" (expected NAME=AMOUNT)",
            value
        ))
    })?;
    Ok(NewTeam::new(name.trim(), budget))
}

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Jsonl,
}

/// Parse an export format string.
pub fn parse_export_format(value: &str) -> anyhow::Result<ExportFormat> {
    match value.to_lowercase().as_str() {
        "csv" => Ok(ExportFormat::Csv),
        "json" => Ok(ExportFormat::Json),
        "jsonl" => Ok(ExportFormat::Jsonl),
        other => Err(CliError::invalid_input(format!(
            "Unsupported export format: {} (use csv, json or jsonl)",
            other
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_team_spec_with_budget() {
        let spec = parse_team_spec("Royal Strikers=1500", 1000).unwrap();
        assert_eq!(spec.name, "Royal Strikers");
        assert_eq!(spec.total_budget, 1500);
    }

    #[test]
    fn test_parse_team_spec_uses_default_budget() {
        let spec = parse_team_spec("Falcons", 800).unwrap();
        assert_eq!(spec.name, "Falcons");
        assert_eq!(spec.total_budget, 800);
    }

    #[test]
    fn test_parse_team_spec_rejects_bad_budget() {
        assert!(parse_team_spec("Falcons=lots", 800).is_err());
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("KIDS").unwrap(), Category::Kids);
        assert!(parse_category("veterans").is_err());
    }

    #[test]
    fn test_parse_export_format() {
        assert_eq!(parse_export_format("CSV").unwrap(), ExportFormat::Csv);
        assert_eq!(parse_export_format("jsonl").unwrap(), ExportFormat::Jsonl);
        assert!(parse_export_format("xlsx").is_err());
    }
}
