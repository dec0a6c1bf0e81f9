//! SQLite storage backend.
//!
//! The whole ledger lives in one SQLite file. Each unit of work is a
//! `rusqlite::Transaction`, which rolls back when dropped without a commit.

mod row;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Transaction};
use tracing::debug;

use super::traits::{LedgerStore, UnitOfWork};
use super::types::{Category, Player, PlayerId, Team, TeamId};
use crate::error::{AuctionError, Result};
use crate::fs::{rename_with_fallback, sibling_temp_path};

use row::{parse_timestamp, parse_uuid, PlayerRow, TeamRow};

const FORMAT_VERSION: &str = "1";

const SCHEMA: &str = r#"
    CREATE TABLE meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE teams (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        category TEXT NOT NULL CHECK (category IN ('Men', 'Women', 'Kids')),
        total_budget INTEGER NOT NULL CHECK (total_budget >= 0),
        remaining_budget INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,

        CHECK (remaining_budget >= 0 AND remaining_budget <= total_budget)
    );

    CREATE INDEX teams_category ON teams (category);

    CREATE TABLE players (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        category TEXT NOT NULL CHECK (category IN ('Men', 'Women', 'Kids')),
        status TEXT NOT NULL CHECK (status IN ('Unsold', 'Sold')),
        sold_to TEXT,
        sold_price INTEGER NOT NULL DEFAULT 0 CHECK (sold_price >= 0),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,

        FOREIGN KEY (sold_to) REFERENCES teams(id)
    );

    CREATE INDEX players_category ON players (category);

    -- Ordered players_bought list of each team
    CREATE TABLE team_players (
        team_id TEXT NOT NULL,
        player_id TEXT NOT NULL UNIQUE,
        position INTEGER NOT NULL,

        PRIMARY KEY (team_id, position),
        FOREIGN KEY (team_id) REFERENCES teams(id),
        FOREIGN KEY (player_id) REFERENCES players(id)
    );
"#;

/// Metadata stored alongside the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreMetadata {
    pub format_version: String,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

/// SQLite-backed ledger store.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Connection,
}

impl fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Create a new database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `AuctionError::Storage` if the file already exists or cannot
    /// be written.
    pub fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(AuctionError::Storage(format!(
                "Auction database already exists at {}",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut conn = Connection::open(path)?;
        Self::initialize(&mut conn)?;
        debug!(path = %path.display(), "created auction database");

        Ok(Self {
            path: Some(path.to_path_buf()),
            conn,
        })
    }

    /// Open an existing database file.
    ///
    /// # Errors
    ///
    /// Returns `AuctionError::NotFound` if the file is missing and
    /// `AuctionError::Storage` if it is not an auction database.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AuctionError::NotFound(format!(
                "Auction database {}",
                path.display()
            )));
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let version: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'format_version'",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|_| {
                AuctionError::Storage(format!(
                    "{} is not an auction database",
                    path.display()
                ))
            })?;
        match version.as_deref() {
            Some(FORMAT_VERSION) => {}
            Some(other) => {
                return Err(AuctionError::Storage(format!(
                    "Unsupported database format version {}",
                    other
                )))
            }
            None => {
                return Err(AuctionError::Storage(
                    "Database metadata missing format_version".to_string(),
                ))
            }
        }
        debug!(path = %path.display(), "opened auction database");

        Ok(Self {
            path: Some(path.to_path_buf()),
            conn,
        })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        Self::initialize(&mut conn)?;
        Ok(Self { path: None, conn })
    }

    fn initialize(conn: &mut Connection) -> Result<()> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let tx = conn.transaction()?;
        tx.execute_batch(SCHEMA)?;

        let created_at = Utc::now().to_rfc3339();
        tx.execute(
            "INSERT INTO meta (key, value) VALUES (?, ?)",
            ["format_version", FORMAT_VERSION],
        )?;
        tx.execute(
            "INSERT INTO meta (key, value) VALUES (?, ?)",
            ["created_at", &created_at],
        )?;
        tx.execute(
            "INSERT INTO meta (key, value) VALUES (?, ?)",
            ["last_modified", &created_at],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Path of the database file (`None` for in-memory stores).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get store metadata.
    pub fn metadata(&self) -> Result<StoreMetadata> {
        let read = |key: &str| -> Result<String> {
            self.conn
                .query_row("SELECT value FROM meta WHERE key = ?", [key], |row| {
                    row.get(0)
                })
                .optional()?
                .ok_or_else(|| AuctionError::Storage(format!("Metadata key {} missing", key)))
        };

        Ok(StoreMetadata {
            format_version: read("format_version")?,
            created_at: parse_timestamp(&read("created_at")?)?,
            last_modified: parse_timestamp(&read("last_modified")?)?,
        })
    }

    /// Run SQLite's own consistency checks (foreign keys, page integrity).
    pub fn check_storage(&self) -> Result<()> {
        let mut stmt = self.conn.prepare("PRAGMA foreign_key_check")?;
        let mut rows = stmt.query([])?;
        if rows.next()?.is_some() {
            return Err(AuctionError::Storage(
                "Foreign key integrity check failed".to_string(),
            ));
        }

        let quick: String = self
            .conn
            .query_row("PRAGMA quick_check", [], |row| row.get(0))?;
        if quick != "ok" {
            return Err(AuctionError::Storage(format!(
                "SQLite quick_check failed: {}",
                quick
            )));
        }
        Ok(())
    }

    /// Write a consistent copy of the database to `destination`.
    ///
    /// The copy is written next to the destination and renamed into place.
    ///
    /// # Returns
    ///
    /// Returns the size of the backup in bytes.
    pub fn backup_to(&self, destination: &Path) -> Result<u64> {
        let temp_path = sibling_temp_path(destination)?;
        if let Some(parent) = temp_path.parent() {
            fs::create_dir_all(parent)?;
        }

        self.conn.execute(
            "VACUUM INTO ?",
            [temp_path.to_string_lossy().to_string()],
        )?;
        let bytes = fs::metadata(&temp_path)?.len();
        rename_with_fallback(&temp_path, destination)?;
        debug!(destination = %destination.display(), bytes, "backed up auction database");

        Ok(bytes)
    }
}

impl LedgerStore for SqliteStore {
    type Work<'a> = SqliteWork<'a>;

    fn begin(&mut self) -> Result<SqliteWork<'_>> {
        Ok(SqliteWork {
            tx: self.conn.transaction()?,
        })
    }
}

/// Unit of work over a [`SqliteStore`].
pub struct SqliteWork<'a> {
    tx: Transaction<'a>,
}

fn last_sale_key(category: Category) -> String {
    format!("last_sale.{}", category.slug())
}

impl SqliteWork<'_> {
    fn roster(&self, team_id: &str) -> Result<Vec<PlayerId>> {
        let mut stmt = self
            .tx
            .prepare("SELECT player_id FROM team_players WHERE team_id = ? ORDER BY position")?;
        let rows = stmt.query_map([team_id], |row| row.get::<_, String>(0))?;

        let mut players = Vec::new();
        for row in rows {
            players.push(parse_uuid("roster player", &row?)?);
        }
        Ok(players)
    }

    fn load_team(&self, row: TeamRow) -> Result<Team> {
        let roster = self.roster(&row.id)?;
        row.into_team(roster)
    }
}

impl UnitOfWork for SqliteWork<'_> {
    fn team(&self, id: &TeamId) -> Result<Option<Team>> {
        let row = self
            .tx
            .query_row(
                &format!("SELECT {} FROM teams WHERE id = ?", TeamRow::COLUMNS),
                [id.to_string()],
                TeamRow::from_row,
            )
            .optional()?;

        row.map(|row| self.load_team(row)).transpose()
    }

    fn teams(&self, category: Option<Category>) -> Result<Vec<Team>> {
        let mut query = format!("SELECT {} FROM teams", TeamRow::COLUMNS);
        let mut params: Vec<String> = Vec::new();
        if let Some(category) = category {
            query.push_str(" WHERE category = ?");
            params.push(category.as_str().to_string());
        }
        query.push_str(" ORDER BY rowid");

        let mut stmt = self.tx.prepare(&query)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), TeamRow::from_row)?;

        let mut teams = Vec::new();
        for row in rows {
            teams.push(self.load_team(row?)?);
        }
        Ok(teams)
    }

    fn insert_team(&mut self, team: &Team) -> Result<()> {
        self.tx.execute(
            r#"
            INSERT INTO teams (id, name, category, total_budget, remaining_budget, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            (
                team.id.to_string(),
                &team.name,
                team.category.as_str(),
                team.total_budget,
                team.remaining_budget,
                team.created_at.to_rfc3339(),
                team.updated_at.to_rfc3339(),
            ),
        )?;
        for (position, player_id) in team.players_bought.iter().enumerate() {
            self.tx.execute(
                "INSERT INTO team_players (team_id, player_id, position) VALUES (?, ?, ?)",
                (team.id.to_string(), player_id.to_string(), position as i64),
            )?;
        }
        Ok(())
    }

    fn update_team(&mut self, team: &Team) -> Result<()> {
        let team_id = team.id.to_string();
        let changed = self.tx.execute(
            "UPDATE teams SET name = ?, remaining_budget = ?, updated_at = ? WHERE id = ?",
            (
                &team.name,
                team.remaining_budget,
                team.updated_at.to_rfc3339(),
                &team_id,
            ),
        )?;
        if changed == 0 {
            return Err(AuctionError::NotFound(format!("Team {}", team.id)));
        }

        self.tx
            .execute("DELETE FROM team_players WHERE team_id = ?", [&team_id])?;
        for (position, player_id) in team.players_bought.iter().enumerate() {
            self.tx.execute(
                "INSERT INTO team_players (team_id, player_id, position) VALUES (?, ?, ?)",
                (&team_id, player_id.to_string(), position as i64),
            )?;
        }
        Ok(())
    }

    fn player(&self, id: &PlayerId) -> Result<Option<Player>> {
        let row = self
            .tx
            .query_row(
                &format!("SELECT {} FROM players WHERE id = ?", PlayerRow::COLUMNS),
                [id.to_string()],
                PlayerRow::from_row,
            )
            .optional()?;

        row.map(Player::try_from).transpose()
    }

    fn players(&self, category: Option<Category>) -> Result<Vec<Player>> {
        let mut query = format!("SELECT {} FROM players", PlayerRow::COLUMNS);
        let mut params: Vec<String> = Vec::new();
        if let Some(category) = category {
            query.push_str(" WHERE category = ?");
            params.push(category.as_str().to_string());
        }
        query.push_str(" ORDER BY rowid");

        let mut stmt = self.tx.prepare(&query)?;
        let rows =
            stmt.query_map(rusqlite::params_from_iter(params.iter()), PlayerRow::from_row)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(Player::try_from(row?)?);
        }
        Ok(players)
    }

    fn insert_player(&mut self, player: &Player) -> Result<()> {
        self.tx.execute(
            r#"
            INSERT INTO players (id, name, category, status, sold_to, sold_price, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            (
                player.id.to_string(),
                &player.name,
                player.category.as_str(),
                player.status.as_str(),
                player.sold_to.map(|id| id.to_string()),
                player.sold_price,
                player.created_at.to_rfc3339(),
                player.updated_at.to_rfc3339(),
            ),
        )?;
        Ok(())
    }

    fn update_player(&mut self, player: &Player) -> Result<()> {
        let changed = self.tx.execute(
            r#"
            UPDATE players
            SET name = ?, status = ?, sold_to = ?, sold_price = ?, updated_at = ?
            WHERE id = ?
            "#,
            (
                &player.name,
                player.status.as_str(),
                player.sold_to.map(|id| id.to_string()),
                player.sold_price,
                player.updated_at.to_rfc3339(),
                player.id.to_string(),
            ),
        )?;
        if changed == 0 {
            return Err(AuctionError::NotFound(format!("Player {}", player.id)));
        }
        Ok(())
    }

    fn delete_player(&mut self, id: &PlayerId) -> Result<()> {
        let changed = self
            .tx
            .execute("DELETE FROM players WHERE id = ?", [id.to_string()])?;
        if changed == 0 {
            return Err(AuctionError::NotFound(format!("Player {}", id)));
        }
        Ok(())
    }

    fn delete_category(&mut self, category: Category) -> Result<(usize, usize)> {
        let name = category.as_str();
        self.tx.execute(
            r#"
            DELETE FROM team_players
            WHERE team_id IN (SELECT id FROM teams WHERE category = ?1)
               OR player_id IN (SELECT id FROM players WHERE category = ?1)
            "#,
            [name],
        )?;
        let players = self
            .tx
            .execute("DELETE FROM players WHERE category = ?", [name])?;
        let teams = self
            .tx
            .execute("DELETE FROM teams WHERE category = ?", [name])?;
        self.tx
            .execute("DELETE FROM meta WHERE key = ?", [last_sale_key(category)])?;
        Ok((teams, players))
    }

    fn last_sale(&self, category: Category) -> Result<Option<PlayerId>> {
        let value: Option<String> = self
            .tx
            .query_row(
                "SELECT value FROM meta WHERE key = ?",
                [last_sale_key(category)],
                |row| row.get(0),
            )
            .optional()?;
        value.map(|v| parse_uuid("last sale", &v)).transpose()
    }

    fn set_last_sale(&mut self, category: Category, player: Option<PlayerId>) -> Result<()> {
        let key = last_sale_key(category);
        match player {
            Some(id) => {
                self.tx.execute(
                    "INSERT INTO meta (key, value) VALUES (?, ?) ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    (&key, id.to_string()),
                )?;
            }
            None => {
                self.tx.execute("DELETE FROM meta WHERE key = ?", [&key])?;
            }
        }
        Ok(())
    }

    fn commit(self) -> Result<()> {
        self.tx.execute(
            "UPDATE meta SET value = ? WHERE key = 'last_modified'",
            [Utc::now().to_rfc3339()],
        )?;
        self.tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_shows_path_only() {
        let store = SqliteStore::open_in_memory().unwrap();
        let shown = format!("{store:?}");
        assert!(shown.starts_with("SqliteStore"));
        assert!(shown.contains("path: None"));
        assert!(!shown.contains("conn"));
    }

    #[test]
    fn test_in_memory_round_trip() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let mut team = Team::new("Strikers", Category::Men, 1000);
        let player = Player::sold("A", Category::Men, team.id, 400);

        let mut work = store.begin().unwrap();
        work.insert_team(&team).unwrap();
        work.insert_player(&player).unwrap();
        team.attach(player.id, 400);
        work.update_team(&team).unwrap();
        work.commit().unwrap();

        let work = store.begin().unwrap();
        let loaded = work.team(&team.id).unwrap().unwrap();
        assert_eq!(loaded.remaining_budget, 600);
        assert_eq!(loaded.players_bought, vec![player.id]);
        assert_eq!(work.player(&player.id).unwrap().unwrap().name, "A");
    }

    #[test]
    fn test_uncommitted_work_rolls_back() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let team = Team::new("Strikers", Category::Men, 1000);
        {
            let mut work = store.begin().unwrap();
            work.insert_team(&team).unwrap();
        }
        let work = store.begin().unwrap();
        assert!(work.team(&team.id).unwrap().is_none());
    }

    #[test]
    fn test_budget_check_constraint() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let mut team = Team::new("Strikers", Category::Men, 100);
        let mut work = store.begin().unwrap();
        work.insert_team(&team).unwrap();
        team.remaining_budget = -1;
        assert!(work.update_team(&team).is_err());
    }

    #[test]
    fn test_last_sale_pointer() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let id = uuid::Uuid::now_v7();
        let mut work = store.begin().unwrap();
        work.set_last_sale(Category::Kids, Some(id)).unwrap();
        assert_eq!(work.last_sale(Category::Kids).unwrap(), Some(id));
        assert_eq!(work.last_sale(Category::Men).unwrap(), None);
        work.set_last_sale(Category::Kids, None).unwrap();
        assert_eq!(work.last_sale(Category::Kids).unwrap(), None);
    }

    #[test]
    fn test_metadata_present() {
        let store = SqliteStore::open_in_memory().unwrap();
        let metadata = store.metadata().unwrap();
        assert_eq!(metadata.format_version, FORMAT_VERSION);
        assert!(metadata.last_modified >= metadata.created_at);
        store.check_storage().unwrap();
    }
}
