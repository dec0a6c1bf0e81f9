//! Reconciliation of teams against players.
//!
//! [`scan`] is pure and works on any snapshot of records. The engine exposes it
//! over the whole store as [`Auction::check_integrity`].

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::engine::Auction;
use crate::error::Result;
use crate::store::{LedgerStore, Player, PlayerId, PlayerStatus, Team, TeamId, UnitOfWork};

/// One violated invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityIssue {
    BudgetOutOfRange {
        team_id: TeamId,
        team: String,
        remaining: i64,
        total: i64,
    },
    OrphanPlayer {
        player_id: PlayerId,
        player: String,
        team_id: TeamId,
    },
    PlayerNotListed {
        player_id: PlayerId,
        player: String,
        team: String,
    },
    PlayerListedTwice {
        player_id: PlayerId,
        team: String,
        count: usize,
    },
    DanglingListEntry {
        team: String,
        player_id: PlayerId,
    },
    ListedElsewhere {
        team: String,
        player_id: PlayerId,
        player: String,
    },
    UnsoldWithSale {
        player_id: PlayerId,
        player: String,
    },
    SoldWithoutTeam {
        player_id: PlayerId,
        player: String,
    },
    BudgetDrift {
        team_id: TeamId,
        team: String,
        spent: i64,
        listed: i64,
    },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BudgetOutOfRange {
                team,
                remaining,
                total,
                ..
            } => write!(
                f,
                "team \"{}\" has remaining budget {} outside 0..={}",
                team, remaining, total
            ),
            Self::OrphanPlayer {
                player, team_id, ..
            } => write!(f, "player \"{}\" is sold to missing team {}", player, team_id),
            Self::PlayerNotListed { player, team, .. } => {
                write!(f, "player \"{}\" is missing from team \"{}\"", player, team)
            }
            Self::PlayerListedTwice {
                player_id,
                team,
                count,
            } => write!(
                f,
                "team \"{}\" lists player {} {} times",
                team, player_id, count
            ),
            Self::DanglingListEntry { team, player_id } => {
                write!(f, "team \"{}\" lists missing player {}", team, player_id)
            }
            Self::ListedElsewhere { team, player, .. } => write!(
                f,
                "team \"{}\" lists player \"{}\" who belongs to another team",
                team, player
            ),
            Self::UnsoldWithSale { player, .. } => write!(
                f,
                "unsold player \"{}\" still has a team or a price",
                player
            ),
            Self::SoldWithoutTeam { player, .. } => {
                write!(f, "sold player \"{}\" has no team", player)
            }
            Self::BudgetDrift {
                team,
                spent,
                listed,
                ..
            } => write!(
                f,
                "team \"{}\" spent {} but its players cost {}",
                team, spent, listed
            ),
        }
    }
}

/// Result of an integrity scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub teams_checked: usize,
    pub players_checked: usize,
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check every team and player invariant over a snapshot.
pub fn scan(teams: &[Team], players: &[Player]) -> IntegrityReport {
    let mut issues = Vec::new();
    let team_by_id: HashMap<TeamId, &Team> = teams.iter().map(|t| (t.id, t)).collect();
    let player_by_id: HashMap<PlayerId, &Player> = players.iter().map(|p| (p.id, p)).collect();

    for player in players {
        if player.status == PlayerStatus::Unsold {
            if player.sold_to.is_some() || player.sold_price != 0 {
                issues.push(IntegrityIssue::UnsoldWithSale {
                    player_id: player.id,
                    player: player.name.clone(),
                });
            }
            continue;
        }

        let Some(team_id) = player.sold_to else {
            issues.push(IntegrityIssue::SoldWithoutTeam {
                player_id: player.id,
                player: player.name.clone(),
            });
            continue;
        };
        match team_by_id.get(&team_id) {
            None => issues.push(IntegrityIssue::OrphanPlayer {
                player_id: player.id,
                player: player.name.clone(),
                team_id,
            }),
            Some(team) if !team.owns(&player.id) => {
                issues.push(IntegrityIssue::PlayerNotListed {
                    player_id: player.id,
                    player: player.name.clone(),
                    team: team.name.clone(),
                })
            }
            Some(_) => {}
        }
    }

    for team in teams {
        if team.remaining_budget < 0 || team.remaining_budget > team.total_budget {
            issues.push(IntegrityIssue::BudgetOutOfRange {
                team_id: team.id,
                team: team.name.clone(),
                remaining: team.remaining_budget,
                total: team.total_budget,
            });
        }

        let mut counts: HashMap<PlayerId, usize> = HashMap::new();
        let mut listed = 0i64;
        for player_id in &team.players_bought {
            let count = counts.entry(*player_id).or_default();
            *count += 1;
            if *count > 1 {
                continue;
            }
            match player_by_id.get(player_id) {
                None => issues.push(IntegrityIssue::DanglingListEntry {
                    team: team.name.clone(),
                    player_id: *player_id,
                }),
                Some(player) if player.sold_to != Some(team.id) => {
                    issues.push(IntegrityIssue::ListedElsewhere {
                        team: team.name.clone(),
                        player_id: *player_id,
                        player: player.name.clone(),
                    })
                }
                Some(player) => listed += player.sold_price,
            }
        }

        let mut repeated: Vec<_> = counts.into_iter().filter(|(_, n)| *n > 1).collect();
        repeated.sort();
        for (player_id, count) in repeated {
            issues.push(IntegrityIssue::PlayerListedTwice {
                player_id,
                team: team.name.clone(),
                count,
            });
        }

        if team.spent() != listed {
            issues.push(IntegrityIssue::BudgetDrift {
                team_id: team.id,
                team: team.name.clone(),
                spent: team.spent(),
                listed,
            });
        }
    }

    IntegrityReport {
        teams_checked: teams.len(),
        players_checked: players.len(),
        issues,
    }
}

impl<S: LedgerStore> Auction<S> {
    /// Scan the whole store for team/player inconsistencies.
    pub fn check_integrity(&mut self) -> Result<IntegrityReport> {
        let work = self.store_mut().begin()?;
        let teams = work.teams(None)?;
        let players = work.players(None)?;
        Ok(scan(&teams, &players))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Category;

    fn sold_pair(price: i64) -> (Team, Player) {
        let mut team = Team::new("Strikers", Category::Men, 1000);
        let player = Player::sold("A", Category::Men, team.id, price);
        team.attach(player.id, price);
        (team, player)
    }

    #[test]
    fn test_consistent_snapshot_is_clean() {
        let (team, player) = sold_pair(400);
        let report = scan(&[team], &[player]);
        assert!(report.is_clean());
        assert_eq!(report.teams_checked, 1);
        assert_eq!(report.players_checked, 1);
    }

    #[test]
    fn test_detects_orphan_player() {
        let player = Player::sold("A", Category::Men, uuid::Uuid::now_v7(), 50);
        let report = scan(&[], &[player]);
        assert!(matches!(
            report.issues.as_slice(),
            [IntegrityIssue::OrphanPlayer { .. }]
        ));
    }

    #[test]
    fn test_detects_drift_and_unlisted_player() {
        let (mut team, player) = sold_pair(400);
        team.players_bought.clear();

        let report = scan(&[team], &[player]);

        assert!(report
            .issues
            .iter()
            .any(|i| matches!(i, IntegrityIssue::PlayerNotListed { .. })));
        assert!(report
            .issues
            .iter()
            .any(|i| matches!(i, IntegrityIssue::BudgetDrift { spent: 400, listed: 0, .. })));
    }

    #[test]
    fn test_detects_duplicate_and_dangling_entries() {
        let (mut team, player) = sold_pair(0);
        team.players_bought.push(player.id);
        team.players_bought.push(uuid::Uuid::now_v7());

        let report = scan(&[team], &[player]);

        assert!(report
            .issues
            .iter()
            .any(|i| matches!(i, IntegrityIssue::PlayerListedTwice { count: 2, .. })));
        assert!(report
            .issues
            .iter()
            .any(|i| matches!(i, IntegrityIssue::DanglingListEntry { .. })));
    }

    #[test]
    fn test_detects_budget_out_of_range() {
        let mut team = Team::new("Strikers", Category::Men, 100);
        team.remaining_budget = -5;
        let report = scan(&[team], &[]);
        assert!(report
            .issues
            .iter()
            .any(|i| matches!(i, IntegrityIssue::BudgetOutOfRange { remaining: -5, .. })));
    }

    #[test]
    fn test_issue_display() {
        let issue = IntegrityIssue::DanglingListEntry {
            team: "Strikers".to_string(),
            player_id: uuid::Uuid::nil(),
        };
        assert_eq!(
            issue.to_string(),
            "team \"Strikers\" lists missing player 00000000-0000-0000-0000-000000000000"
        );
    }
}
