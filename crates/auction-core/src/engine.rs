//! Budget-transaction engine.
//!
//! Sell, undo and edit/reassign. Each operation runs inside one unit of work:
//! all reads, budget checks and writes happen there, and the checks run before
//! the first write. A failed operation therefore leaves every team and player
//! exactly as it found them.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AuctionError, Result};
use crate::store::{
    Category, LedgerStore, Player, PlayerId, PlayerStatus, Team, TeamId, UnitOfWork,
};
use crate::validation::{normalize_name, validate_amount};

/// Request to sell a player to a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRequest {
    pub player_name: String,
    pub category: Category,
    pub team_id: TeamId,
    pub amount: i64,
}

impl SaleRequest {
    pub fn new(
        player_name: impl Into<String>,
        category: Category,
        team_id: TeamId,
        amount: i64,
    ) -> Self {
        Self {
            player_name: player_name.into(),
            category,
            team_id,
            amount,
        }
    }
}

/// Request to correct a sale: rename, reprice, or move to another team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub player_id: PlayerId,
    pub new_name: String,
    pub new_amount: i64,
    pub new_team_id: TeamId,
}

impl EditRequest {
    pub fn new(
        player_id: PlayerId,
        new_name: impl Into<String>,
        new_amount: i64,
        new_team_id: TeamId,
    ) -> Self {
        Self {
            player_id,
            new_name: new_name.into(),
            new_amount,
            new_team_id,
        }
    }
}

/// Result of a sale: the new player and the charged team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sale {
    pub player: Player,
    pub team: Team,
}

/// Result of an undo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UndoOutcome {
    /// The deleted player, as it was before deletion.
    pub player: Player,
    /// The refunded team, or `None` when there was no team to refund.
    pub refunded_to: Option<Team>,
}

impl UndoOutcome {
    /// True when the player pointed at a team that no longer exists.
    pub fn refund_skipped(&self) -> bool {
        self.player.sold_to.is_some() && self.refunded_to.is_none()
    }
}

/// Result of an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditOutcome {
    pub player: Player,
    /// The team that now owns the player.
    pub team: Team,
    /// The previous team, when the player moved and that team still exists.
    pub released_from: Option<Team>,
}

/// Shortest player ID prefix accepted by [`Auction::find_player`].
pub const MIN_ID_PREFIX: usize = 4;

/// Auction ledger over a [`LedgerStore`].
pub struct Auction<S> {
    store: S,
}

fn player_not_found(id: &PlayerId) -> AuctionError {
    AuctionError::NotFound(format!("Player {}", id))
}

fn team_not_found(id: &TeamId) -> AuctionError {
    AuctionError::NotFound(format!("Team {}", id))
}

impl<S: LedgerStore> Auction<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Sell a new player to a team.
    ///
    /// # Errors
    ///
    /// - `Validation` for a blank name, a negative amount, or a team from
    ///   another category
    /// - `NotFound` if the team does not exist
    /// - `InsufficientFunds` if the team cannot cover `amount`
    pub fn sell(&mut self, request: &SaleRequest) -> Result<Sale> {
        let player_name = normalize_name("Player", &request.player_name)?;
        validate_amount("Amount", request.amount)?;

        let mut work = self.store.begin()?;
        let mut team = work
            .team(&request.team_id)?
            .ok_or_else(|| team_not_found(&request.team_id))?;
        if team.category != request.category {
            return Err(AuctionError::Validation(format!(
                "Team \"{}\" plays in {}, not {}",
                team.name, team.category, request.category
            )));
        }
        if !team.can_afford(request.amount) {
            return Err(AuctionError::insufficient_funds(
                &team.name,
                team.remaining_budget,
                request.amount,
            ));
        }

        let player = Player::sold(player_name, request.category, team.id, request.amount);
        work.insert_player(&player)?;
        team.attach(player.id, request.amount);
        work.update_team(&team)?;
        work.set_last_sale(request.category, Some(player.id))?;
        work.commit()?;

        info!(
            player_id = %player.id,
            team_id = %team.id,
            amount = request.amount,
            remaining = team.remaining_budget,
            "player sold"
        );
        Ok(Sale { player, team })
    }

    /// Delete a player and refund its team.
    ///
    /// This is a true deletion. If the player's team no longer exists the
    /// refund is skipped with a warning and the player is still removed;
    /// [`UndoOutcome::refund_skipped`] reports that case.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the player does not exist.
    pub fn undo(&mut self, player_id: &PlayerId) -> Result<UndoOutcome> {
        let mut work = self.store.begin()?;
        let player = work
            .player(player_id)?
            .ok_or_else(|| player_not_found(player_id))?;

        let mut refunded_to = None;
        if let Some(team_id) = player.sold_to {
            match work.team(&team_id)? {
                Some(mut team) => {
                    team.release(&player.id, player.sold_price);
                    work.update_team(&team)?;
                    refunded_to = Some(team);
                }
                None => {
                    let issue = AuctionError::InconsistentState(format!(
                        "team {} of player \"{}\" no longer exists; refund of {} skipped",
                        team_id, player.name, player.sold_price
                    ));
                    warn!(player_id = %player.id, team_id = %team_id, "{}", issue);
                }
            }
        }

        work.delete_player(&player.id)?;
        if work.last_sale(player.category)? == Some(player.id) {
            work.set_last_sale(player.category, None)?;
        }
        work.commit()?;

        info!(
            player_id = %player.id,
            refund = player.sold_price,
            refunded = refunded_to.is_some(),
            "sale undone"
        );
        Ok(UndoOutcome {
            player,
            refunded_to,
        })
    }

    /// Correct a sale.
    ///
    /// Same team: the team pays or gets back the price difference. Different
    /// team: the old team is refunded the old price and the new team is charged
    /// the full new price.
    ///
    /// # Errors
    ///
    /// - `Validation` for a blank name, a negative amount, an unsold player, or
    ///   a new team from another category
    /// - `NotFound` if the player or a referenced team does not exist
    /// - `InsufficientFunds` if the charged team cannot cover the change
    pub fn edit(&mut self, request: &EditRequest) -> Result<EditOutcome> {
        let new_name = normalize_name("Player", &request.new_name)?;
        validate_amount("Amount", request.new_amount)?;

        let mut work = self.store.begin()?;
        let mut player = work
            .player(&request.player_id)?
            .ok_or_else(|| player_not_found(&request.player_id))?;
        let current_team_id = match (player.status, player.sold_to) {
            (PlayerStatus::Sold, Some(team_id)) => team_id,
            _ => {
                return Err(AuctionError::Validation(format!(
                    "Player \"{}\" is not sold, cannot edit transaction",
                    player.name
                )))
            }
        };
        let old_amount = player.sold_price;

        if request.new_team_id == current_team_id {
            let mut team = work
                .team(&current_team_id)?
                .ok_or_else(|| team_not_found(&current_team_id))?;
            let delta = request.new_amount - old_amount;
            if delta > 0 && !team.can_afford(delta) {
                return Err(AuctionError::insufficient_funds(
                    &team.name,
                    team.remaining_budget,
                    delta,
                ));
            }

            team.reprice(delta);
            player.reassign(new_name, request.new_amount, team.id);
            work.update_team(&team)?;
            work.update_player(&player)?;
            work.commit()?;

            info!(
                player_id = %player.id,
                team_id = %team.id,
                old_amount,
                new_amount = request.new_amount,
                remaining = team.remaining_budget,
                "sale repriced"
            );
            return Ok(EditOutcome {
                player,
                team,
                released_from: None,
            });
        }

        let mut new_team = work
            .team(&request.new_team_id)?
            .ok_or_else(|| team_not_found(&request.new_team_id))?;
        if new_team.category != player.category {
            return Err(AuctionError::Validation(format!(
                "Team \"{}\" plays in {}, player \"{}\" is in {}",
                new_team.name, new_team.category, player.name, player.category
            )));
        }
        if !new_team.can_afford(request.new_amount) {
            return Err(AuctionError::insufficient_funds(
                &new_team.name,
                new_team.remaining_budget,
                request.new_amount,
            ));
        }

        // Old roster first: a player sits on one roster at a time.
        let released_from = match work.team(&current_team_id)? {
            Some(mut old_team) => {
                old_team.release(&player.id, old_amount);
                work.update_team(&old_team)?;
                Some(old_team)
            }
            None => {
                let issue = AuctionError::InconsistentState(format!(
                    "team {} of player \"{}\" no longer exists; refund of {} skipped",
                    current_team_id, player.name, old_amount
                ));
                warn!(player_id = %player.id, team_id = %current_team_id, "{}", issue);
                None
            }
        };

        new_team.attach(player.id, request.new_amount);
        player.reassign(new_name, request.new_amount, new_team.id);
        work.update_player(&player)?;
        work.update_team(&new_team)?;
        work.commit()?;

        info!(
            player_id = %player.id,
            from_team = %current_team_id,
            to_team = %new_team.id,
            old_amount,
            new_amount = request.new_amount,
            "sale reassigned"
        );
        Ok(EditOutcome {
            player,
            team: new_team,
            released_from,
        })
    }

    /// Get a player by ID.
    pub fn player(&mut self, id: &PlayerId) -> Result<Player> {
        let work = self.store.begin()?;
        work.player(id)?.ok_or_else(|| player_not_found(id))
    }

    /// Resolve a player by full UUID or by a unique ID prefix.
    ///
    /// # Errors
    ///
    /// - `Validation` for a malformed, too short or ambiguous prefix
    /// - `NotFound` if no player matches
    pub fn find_player(&mut self, id_or_prefix: &str) -> Result<Player> {
        let needle = id_or_prefix.trim().to_ascii_lowercase();
        if let Ok(id) = Uuid::parse_str(&needle) {
            return self.player(&id);
        }
        if needle.len() < MIN_ID_PREFIX
            || !needle.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
        {
            return Err(AuctionError::Validation(format!(
                "Invalid player ID \"{}\" (expected a UUID or at least {} leading characters of one)",
                id_or_prefix.trim(),
                MIN_ID_PREFIX
            )));
        }

        let work = self.store.begin()?;
        let mut matches = work
            .players(None)?
            .into_iter()
            .filter(|player| player.id.to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(player), None) => Ok(player),
            (None, _) => Err(AuctionError::NotFound(format!(
                "Player with ID prefix {}",
                needle
            ))),
            (Some(_), Some(_)) => Err(AuctionError::Validation(format!(
                "Player ID prefix {} matches more than one player; use more characters",
                needle
            ))),
        }
    }

    /// Get a team by ID.
    pub fn team(&mut self, id: &TeamId) -> Result<Team> {
        let work = self.store.begin()?;
        work.team(id)?.ok_or_else(|| team_not_found(id))
    }

    /// The category's last-sale pointer: set by every sale, cleared when that
    /// player is undone.
    pub fn last_sale(&mut self, category: Category) -> Result<Option<Player>> {
        let work = self.store.begin()?;
        match work.last_sale(category)? {
            Some(id) => work.player(&id),
            None => Ok(None),
        }
    }
}
