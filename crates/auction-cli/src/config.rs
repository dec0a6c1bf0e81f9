use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct AuctionConfig {
    pub database: DatabaseSection,
    #[serde(default)]
    pub auction: AuctionSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct AuctionSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_budget: Option<i64>,
}

impl AuctionConfig {
    pub fn new(
        db_path: PathBuf,
        default_category: Option<String>,
        default_budget: Option<i64>,
    ) -> Self {
        Self {
            database: DatabaseSection {
                path: db_path.to_string_lossy().to_string(),
            },
            auction: AuctionSection {
                default_category,
                default_budget,
            },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_db_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("auction.db"))
}

pub fn read_config(path: &Path) -> anyhow::Result<AuctionConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &AuctionConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("auction"));
        }
    }
    Ok(home_dir()?.join(".config").join("auction"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("auction"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("auction"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = AuctionConfig::new(
            PathBuf::from("/tmp/auction.db"),
            Some("men".to_string()),
            Some(1500),
        );
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AuctionConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.database.path, "/tmp/auction.db");
        assert_eq!(parsed.auction.default_budget, Some(1500));
    }

    #[test]
    fn test_auction_section_is_optional() {
        let parsed: AuctionConfig = toml::from_str("[database]\npath = \"a.db\"\n").unwrap();
        assert!(parsed.auction.default_category.is_none());
        assert!(parsed.auction.default_budget.is_none());
    }
}
