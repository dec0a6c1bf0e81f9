//! Per-category sessions: reset, teardown, listing and team queries.

use std::collections::HashMap;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::engine::Auction;
use crate::error::{AuctionError, Result};
use crate::store::{Category, LedgerStore, NewTeam, Player, Team, UnitOfWork};
use crate::validation::validate_team_specs;

/// A team with its players, in purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRoster {
    pub team: Team,
    pub players: Vec<Player>,
}

/// A category that currently has teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub category: Category,
    pub team_count: usize,
}

impl<S: LedgerStore> Auction<S> {
    /// Replace every team and player of `category` with fresh teams.
    ///
    /// Destructive: the category's previous teams and players are deleted in
    /// the same unit of work. Returns the number of teams created.
    pub fn initialize_session(&mut self, category: Category, specs: &[NewTeam]) -> Result<usize> {
        let specs = validate_team_specs(specs)?;

        let mut work = self.store_mut().begin()?;
        let (removed_teams, removed_players) = work.delete_category(category)?;
        for spec in &specs {
            work.insert_team(&Team::new(spec.name.clone(), category, spec.total_budget))?;
        }
        work.commit()?;

        info!(
            category = %category,
            teams = specs.len(),
            removed_teams,
            removed_players,
            "session initialized"
        );
        Ok(specs.len())
    }

    /// Delete every team and player of `category`.
    ///
    /// Returns `(teams, players)` removed.
    pub fn teardown_session(&mut self, category: Category) -> Result<(usize, usize)> {
        let mut work = self.store_mut().begin()?;
        let removed = work.delete_category(category)?;
        work.commit()?;

        info!(category = %category, teams = removed.0, players = removed.1, "session ended");
        Ok(removed)
    }

    /// Categories with at least one team, in declaration order.
    pub fn list_sessions(&mut self) -> Result<Vec<SessionSummary>> {
        let work = self.store_mut().begin()?;
        let teams = work.teams(None)?;

        Ok(Category::ALL
            .into_iter()
            .map(|category| SessionSummary {
                category,
                team_count: teams.iter().filter(|t| t.category == category).count(),
            })
            .filter(|summary| summary.team_count > 0)
            .collect())
    }

    /// Teams of `category` with their players, richest first.
    ///
    /// Ties on remaining budget are broken by name.
    pub fn query_teams(&mut self, category: Category) -> Result<Vec<TeamRoster>> {
        let work = self.store_mut().begin()?;
        let teams = work.teams(Some(category))?;
        let mut by_id: HashMap<_, _> = work
            .players(Some(category))?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut rosters: Vec<TeamRoster> = teams
            .into_iter()
            .map(|team| {
                let players = team
                    .players_bought
                    .iter()
                    .filter_map(|id| by_id.remove(id))
                    .collect();
                TeamRoster { team, players }
            })
            .collect();

        rosters.sort_by(|a, b| {
            b.team
                .remaining_budget
                .cmp(&a.team.remaining_budget)
                .then_with(|| a.team.name.cmp(&b.team.name))
        });
        Ok(rosters)
    }

    /// Resolve a team of `category` by UUID or case-insensitive name.
    pub fn find_team(&mut self, category: Category, name_or_id: &str) -> Result<Team> {
        let needle = name_or_id.trim();
        let work = self.store_mut().begin()?;
        let teams = work.teams(Some(category))?;

        let by_id = Uuid::parse_str(needle)
            .ok()
            .and_then(|id| teams.iter().find(|t| t.id == id));
        let found = by_id.or_else(|| {
            let lowered = needle.to_lowercase();
            teams.iter().find(|t| t.name.to_lowercase() == lowered)
        });

        found.cloned().ok_or_else(|| {
            AuctionError::NotFound(format!("Team \"{}\" in {}", needle, category))
        })
    }
}
