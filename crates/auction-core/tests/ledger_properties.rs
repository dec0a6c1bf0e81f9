use auction_core::{
    Auction, Category, EditRequest, MemoryStore, NewTeam, PlayerId, SaleRequest, Team,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Sell { team: usize, amount: i64 },
    Undo { pick: usize },
    Edit { pick: usize, team: usize, amount: i64 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..3, 0i64..600).prop_map(|(team, amount)| Op::Sell { team, amount }),
        (0usize..16).prop_map(|pick| Op::Undo { pick }),
        (0usize..16, 0usize..3, 0i64..600)
            .prop_map(|(pick, team, amount)| Op::Edit { pick, team, amount }),
    ]
}

fn setup() -> (Auction<MemoryStore>, Vec<Team>) {
    let mut auction = Auction::new(MemoryStore::new());
    let specs = vec![
        NewTeam::new("A", 1000),
        NewTeam::new("B", 500),
        NewTeam::new("C", 0),
    ];
    auction
        .initialize_session(Category::Men, &specs)
        .expect("session should start");
    let teams = ["A", "B", "C"]
        .iter()
        .map(|name| auction.find_team(Category::Men, name).expect("team exists"))
        .collect();
    (auction, teams)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Property: whatever sequence of sells, undos and edits runs, and
    /// whichever of them fail, every team stays within budget and the
    /// team/player references reconcile.
    #[test]
    fn budgets_reconcile_after_any_sequence(ops in prop::collection::vec(op(), 1..40)) {
        let (mut auction, teams) = setup();
        let mut sold: Vec<PlayerId> = Vec::new();

        for op in ops {
            match op {
                Op::Sell { team, amount } => {
                    let request = SaleRequest::new("P", Category::Men, teams[team].id, amount);
                    if let Ok(sale) = auction.sell(&request) {
                        sold.push(sale.player.id);
                    }
                }
                Op::Undo { pick } => {
                    if !sold.is_empty() {
                        let id = sold.remove(pick % sold.len());
                        prop_assert!(auction.undo(&id).is_ok());
                    }
                }
                Op::Edit { pick, team, amount } => {
                    if !sold.is_empty() {
                        let id = sold[pick % sold.len()];
                        let request = EditRequest::new(id, "Q", amount, teams[team].id);
                        let _ = auction.edit(&request);
                    }
                }
            }

            let report = auction.check_integrity().expect("scan should succeed");
            prop_assert!(report.is_clean(), "issues: {:?}", report.issues);
        }

        for team in &teams {
            let current = auction.team(&team.id).expect("team exists");
            prop_assert!(current.remaining_budget >= 0);
            prop_assert!(current.remaining_budget <= current.total_budget);
        }
    }

    /// Property: a sell followed by its undo restores the team exactly.
    #[test]
    fn undo_restores_budget(amount in 0i64..=1000) {
        let (mut auction, teams) = setup();
        let before = auction.team(&teams[0].id).expect("team exists");

        let sale = auction
            .sell(&SaleRequest::new("P", Category::Men, teams[0].id, amount))
            .expect("A can afford up to its full budget");
        auction.undo(&sale.player.id).expect("undo should succeed");

        let after = auction.team(&teams[0].id).expect("team exists");
        prop_assert_eq!(after.remaining_budget, before.remaining_budget);
        prop_assert_eq!(after.players_bought, before.players_bought);
    }
}
