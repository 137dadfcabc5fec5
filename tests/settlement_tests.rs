use rust_decimal_macros::dec;
use wagerbook::application::settlement::SettlementService;
use wagerbook::domain::distribution::{DistributionPolicy, Stake};
use wagerbook::domain::settlement::SettlementOutcome;
use wagerbook::domain::wager::WagerStatus;
use wagerbook::testkit::ledger::{memory_ledger, seed_round};
use wagerbook::testkit::wager::day;

mod support;

use support::messages::names;

#[tokio::test]
async fn equal_split_ignores_the_winners_own_stake() {
    let (_, ledger) = memory_ledger();
    let today = day("2026-03-02");
    seed_round(&ledger, today, "ท", "310-35", &[("p1", 100), ("p2", 200), ("p3", 300)]).await;
    let service = SettlementService::new(ledger.clone(), DistributionPolicy::Equal);

    let outcome = service
        .settle(today, "ท", "310-35", &names(&["p1"]))
        .await
        .unwrap();
    let result = outcome.settled().unwrap();

    assert_eq!(result.total_revenue, 600);
    assert_eq!(result.total_payout, dec!(600));
    assert_eq!(result.profit, dec!(0));

    let records = ledger.records(today).await.unwrap();
    assert_eq!(records[0].status, WagerStatus::Win);
    assert_eq!(records[0].payout, Some(dec!(600)));
    assert!(records[1..].iter().all(|r| r.status == WagerStatus::Loss));
}

#[tokio::test]
async fn proportional_split_returns_stakes_plus_a_share() {
    let (_, ledger) = memory_ledger();
    let today = day("2026-03-02");
    seed_round(&ledger, today, "สนาม", "แดง", &[("a", 100), ("b", 300), ("c", 400)]).await;
    let service = SettlementService::new(ledger.clone(), DistributionPolicy::Equal);

    let outcome = service
        .settle_with(today, "สนาม", "แดง", &names(&["a", "b"]), DistributionPolicy::Proportional)
        .await
        .unwrap();
    let result = outcome.settled().unwrap();

    assert_eq!(result.policy, "proportional");
    // Losers' pool of 400 shared 1:3.
    assert_eq!(result.per_player_payout[0].payout, dec!(200));
    assert_eq!(result.per_player_payout[1].payout, dec!(600));
    assert_eq!(result.profit, dec!(0));
}

#[tokio::test]
async fn odds_policy_pays_stake_times_odds() {
    let (_, ledger) = memory_ledger();
    let today = day("2026-03-02");
    seed_round(&ledger, today, "สนาม", "ดำ", &[("a", 100), ("b", 100)]).await;
    let service = SettlementService::new(ledger.clone(), DistributionPolicy::odds(dec!(1.9)).unwrap());

    let result = service
        .settle(today, "สนาม", "ดำ", &names(&["a"]))
        .await
        .unwrap();
    let result = result.settled().unwrap();

    assert_eq!(result.total_payout, dec!(190));
    assert_eq!(result.profit, dec!(10));
}

#[tokio::test]
async fn no_winners_means_everyone_loses() {
    let (_, ledger) = memory_ledger();
    let today = day("2026-03-02");
    seed_round(&ledger, today, "สนาม", "ดำ", &[("a", 100), ("b", 50)]).await;
    let service = SettlementService::new(ledger.clone(), DistributionPolicy::Equal);

    let outcome = service
        .settle(today, "สนาม", "ดำ", &names(&["nobody"]))
        .await
        .unwrap();

    assert_eq!(outcome.settled().unwrap().profit, dec!(150));
    let records = ledger.records(today).await.unwrap();
    assert!(records.iter().all(|r| r.status == WagerStatus::Loss));
}

#[tokio::test]
async fn settled_rounds_are_not_settled_twice() {
    let (_, ledger) = memory_ledger();
    let today = day("2026-03-02");
    seed_round(&ledger, today, "สนาม", "ดำ", &[("a", 100)]).await;
    let service = SettlementService::new(ledger.clone(), DistributionPolicy::Equal);

    service.settle(today, "สนาม", "ดำ", &names(&["a"])).await.unwrap();
    let again = service.settle(today, "สนาม", "ดำ", &names(&["a"])).await.unwrap();
    assert_eq!(again, SettlementOutcome::NotFound);
}

#[tokio::test]
async fn other_rounds_are_untouched() {
    let (_, ledger) = memory_ledger();
    let today = day("2026-03-02");
    seed_round(&ledger, today, "สนาม", "ดำ", &[("a", 100)]).await;
    seed_round(&ledger, today, "สนาม", "แดง", &[("a", 100)]).await;
    let service = SettlementService::new(ledger.clone(), DistributionPolicy::Equal);

    service.settle(today, "สนาม", "ดำ", &names(&["a"])).await.unwrap();

    let rounds = ledger.rounds(today).await.unwrap();
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].competition_code, "แดง");
}

#[tokio::test]
async fn oversized_stored_stakes_settle_without_overflow() {
    let (store, ledger) = memory_ledger();
    let today = day("2026-03-02");
    for player in ["p1", "p2"] {
        store.insert_raw(
            &today.ledger_table(),
            &["", player, "", "5000000000000000000", "310-35", "ท", "pending"],
        );
    }

    for policy in [
        DistributionPolicy::Equal,
        DistributionPolicy::Proportional,
        DistributionPolicy::odds(dec!(1000)).unwrap(),
    ] {
        let stakes = [
            Stake::new("p1".to_string(), i64::MAX),
            Stake::new("p2".to_string(), i64::MAX),
        ];
        let distribution = policy.distribute(&stakes, &names(&["p1"]));
        assert_eq!(distribution.total_revenue, i64::MAX, "{}", policy.name());
    }

    let service = SettlementService::new(ledger.clone(), DistributionPolicy::Equal);
    let outcome = service
        .settle(today, "ท", "310-35", &names(&["p1"]))
        .await
        .unwrap();
    let result = outcome.settled().unwrap();
    assert_eq!(result.total_revenue, i64::MAX);
    assert_eq!(result.profit, dec!(0));

    let records = ledger.records(today).await.unwrap();
    assert_eq!(records[0].status, WagerStatus::Win);
    assert_eq!(records[1].status, WagerStatus::Loss);
}
