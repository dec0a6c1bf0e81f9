use std::path::PathBuf;

use auction_core::{
    Auction, AuctionError, Category, EditRequest, NewTeam, SaleRequest, SqliteStore, Team,
};
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    path: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("auction.db");
        SqliteStore::create(&path).expect("create should succeed");
        Self { _dir: dir, path }
    }

    fn open(&self) -> Auction<SqliteStore> {
        Auction::new(SqliteStore::open(&self.path).expect("open should succeed"))
    }
}

fn start_men(auction: &mut Auction<SqliteStore>, teams: &[(&str, i64)]) -> Vec<Team> {
    let specs: Vec<NewTeam> = teams
        .iter()
        .map(|(name, budget)| NewTeam::new(*name, *budget))
        .collect();
    auction
        .initialize_session(Category::Men, &specs)
        .expect("session should start");
    teams
        .iter()
        .map(|(name, _)| auction.find_team(Category::Men, name).expect("team exists"))
        .collect()
}

#[test]
fn test_sale_survives_reopen() {
    let fixture = Fixture::new();
    let (team_id, player_id) = {
        let mut auction = fixture.open();
        let teams = start_men(&mut auction, &[("Strikers", 1000)]);
        let sale = auction
            .sell(&SaleRequest::new("Virat", Category::Men, teams[0].id, 400))
            .expect("sale should succeed");
        (teams[0].id, sale.player.id)
    };

    let mut auction = fixture.open();
    let team = auction.team(&team_id).expect("team persisted");
    assert_eq!(team.remaining_budget, 600);
    assert_eq!(team.players_bought, vec![player_id]);
    let last = auction
        .last_sale(Category::Men)
        .expect("read last sale")
        .expect("last sale recorded");
    assert_eq!(last.id, player_id);
    assert!(auction.check_integrity().expect("scan").is_clean());
}

#[test]
fn test_sell_edit_undo_scenario() {
    let fixture = Fixture::new();
    let mut auction = fixture.open();
    let teams = start_men(&mut auction, &[("A", 1000)]);
    let team_id = teams[0].id;

    let sale = auction
        .sell(&SaleRequest::new("A", Category::Men, team_id, 400))
        .expect("sale");
    assert_eq!(sale.team.remaining_budget, 600);

    let edit = auction
        .edit(&EditRequest::new(sale.player.id, "A", 700, team_id))
        .expect("edit");
    assert_eq!(edit.team.remaining_budget, 300);

    auction.undo(&sale.player.id).expect("undo");
    assert_eq!(auction.team(&team_id).expect("team").remaining_budget, 1000);
    assert!(auction.player(&sale.player.id).unwrap_err().is_not_found());
    assert!(auction.last_sale(Category::Men).expect("read").is_none());
}

#[test]
fn test_failed_sale_leaves_database_untouched() {
    let fixture = Fixture::new();
    let mut auction = fixture.open();
    let teams = start_men(&mut auction, &[("A", 300)]);

    let err = auction
        .sell(&SaleRequest::new("P", Category::Men, teams[0].id, 301))
        .unwrap_err();
    assert!(matches!(err, AuctionError::InsufficientFunds { shortfall: 1, .. }));

    let rosters = auction.query_teams(Category::Men).expect("query");
    assert_eq!(rosters[0].team.remaining_budget, 300);
    assert!(rosters[0].players.is_empty());
}

#[test]
fn test_cross_team_edit_persists_both_rosters() {
    let fixture = Fixture::new();
    let mut auction = fixture.open();
    let teams = start_men(&mut auction, &[("A", 1000), ("B", 800)]);
    let (a, b) = (teams[0].id, teams[1].id);

    let sale = auction
        .sell(&SaleRequest::new("P", Category::Men, a, 400))
        .expect("sale");
    auction
        .edit(&EditRequest::new(sale.player.id, "P2", 500, b))
        .expect("edit");
    drop(auction);

    let mut auction = fixture.open();
    let team_a = auction.team(&a).expect("a");
    let team_b = auction.team(&b).expect("b");
    assert_eq!(team_a.remaining_budget, 1000);
    assert!(team_a.players_bought.is_empty());
    assert_eq!(team_b.remaining_budget, 300);
    assert_eq!(team_b.players_bought, vec![sale.player.id]);

    let player = auction.player(&sale.player.id).expect("player");
    assert_eq!(player.name, "P2");
    assert_eq!(player.sold_to, Some(b));
    assert!(auction.check_integrity().expect("scan").is_clean());
}

#[test]
fn test_initialize_session_is_idempotent_in_effect() {
    let fixture = Fixture::new();
    let mut auction = fixture.open();
    let teams = [("A", 500), ("B", 700)];
    start_men(&mut auction, &teams);
    let first: Vec<(String, i64)> = auction
        .query_teams(Category::Men)
        .expect("query")
        .into_iter()
        .map(|r| (r.team.name, r.team.remaining_budget))
        .collect();

    start_men(&mut auction, &teams);
    let second: Vec<(String, i64)> = auction
        .query_teams(Category::Men)
        .expect("query")
        .into_iter()
        .map(|r| (r.team.name, r.team.remaining_budget))
        .collect();

    assert_eq!(first, second);
    assert_eq!(second, vec![("B".to_string(), 700), ("A".to_string(), 500)]);
}

#[test]
fn test_teardown_removes_only_its_category() {
    let fixture = Fixture::new();
    let mut auction = fixture.open();
    let teams = start_men(&mut auction, &[("A", 100)]);
    auction
        .initialize_session(Category::Women, &[NewTeam::new("W", 100)])
        .expect("women session");
    auction
        .sell(&SaleRequest::new("P", Category::Men, teams[0].id, 10))
        .expect("sale");

    assert_eq!(auction.teardown_session(Category::Men).expect("teardown"), (1, 1));

    let sessions = auction.list_sessions().expect("list");
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].category, Category::Women);
}

#[test]
fn test_open_rejects_missing_and_existing_paths() {
    let fixture = Fixture::new();
    assert!(SqliteStore::create(&fixture.path).is_err());

    let missing = fixture.path.with_file_name("missing.db");
    let err = SqliteStore::open(&missing).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_backup_produces_openable_copy() {
    let fixture = Fixture::new();
    let mut auction = fixture.open();
    let teams = start_men(&mut auction, &[("A", 100)]);
    auction
        .sell(&SaleRequest::new("P", Category::Men, teams[0].id, 40))
        .expect("sale");

    let backup = fixture.path.with_file_name("backup.db");
    let bytes = auction.store().backup_to(&backup).expect("backup");
    assert!(bytes > 0);

    let mut restored = Auction::new(SqliteStore::open(&backup).expect("open backup"));
    let team = restored.find_team(Category::Men, "A").expect("team");
    assert_eq!(team.remaining_budget, 60);
}
