use std::sync::Arc;

use wagerbook::application::cache::MessageHistory;
use wagerbook::application::cancellation::CancellationResolver;
use wagerbook::domain::id::RowPosition;
use wagerbook::domain::settlement::CancellationOutcome;
use wagerbook::domain::wager::WagerStatus;
use wagerbook::testkit::ledger::memory_ledger;
use wagerbook::testkit::wager::{day, wager};

#[tokio::test]
async fn latest_identical_pending_wager_is_cancelled() {
    let (_, ledger) = memory_ledger();
    let today = day("2026-03-02");
    for i in 1..=9 {
        // Rows 5 and 9 share the same text; the rest differ in amount.
        let amount = if i == 5 || i == 9 { 200 } else { 100 + i };
        ledger
            .save(today, wager(&format!("p{i}"), "สนามชล", "แดง", amount))
            .await
            .unwrap();
    }
    let resolver = CancellationResolver::new(ledger.clone(), Arc::new(MessageHistory::new(4)));

    let outcome = resolver
        .resolve_cancellation(today, "  สนามชล200 ")
        .await
        .unwrap();
    let cancelled = outcome.cancelled().unwrap();
    assert_eq!(cancelled.position, RowPosition::new(9));
    assert_eq!(cancelled.player_name, "p9");

    let records = ledger.records(today).await.unwrap();
    assert_eq!(records[4].status, WagerStatus::Pending);
    assert_eq!(records[8].status, WagerStatus::Cancelled);

    // The next deletion of the same text reaches row 5.
    let outcome = resolver
        .resolve_cancellation(today, "สนามชล200")
        .await
        .unwrap();
    assert_eq!(outcome.cancelled().unwrap().position, RowPosition::new(5));
}

#[tokio::test]
async fn no_match_is_not_found() {
    let (_, ledger) = memory_ledger();
    let today = day("2026-03-02");
    ledger
        .save(today, wager("p1", "สนามชล", "แดง", 100))
        .await
        .unwrap();
    let resolver = CancellationResolver::new(ledger, Arc::new(MessageHistory::new(4)));

    let outcome = resolver
        .resolve_cancellation(today, "สนามชล999")
        .await
        .unwrap();
    assert_eq!(outcome, CancellationOutcome::NotFound);
}

#[tokio::test]
async fn settled_wagers_cannot_be_cancelled() {
    let (_, ledger) = memory_ledger();
    let today = day("2026-03-02");
    let record = ledger
        .save(today, wager("p1", "สนามชล", "แดง", 100))
        .await
        .unwrap();
    ledger.update_status(&record, WagerStatus::Win).await.unwrap();
    let resolver = CancellationResolver::new(ledger, Arc::new(MessageHistory::new(4)));

    let outcome = resolver
        .resolve_cancellation(today, "สนามชล100")
        .await
        .unwrap();
    assert_eq!(outcome, CancellationOutcome::NotFound);
}

#[tokio::test]
async fn deletion_text_is_venue_followed_by_amount() {
    let (_, ledger) = memory_ledger();
    let today = day("2026-03-02");
    ledger
        .save(today, wager("p1", "สนามชล", "แดง", 200))
        .await
        .unwrap();
    let resolver = CancellationResolver::new(ledger.clone(), Arc::new(MessageHistory::new(4)));

    let outcome = resolver
        .resolve_cancellation(today, "สนามชล200")
        .await
        .unwrap();
    assert_eq!(outcome.cancelled().unwrap().player_name, "p1");
}

#[tokio::test]
async fn the_key_ignores_the_competition_code() {
    let (_, ledger) = memory_ledger();
    let today = day("2026-03-02");
    ledger
        .save(today, wager("p1", "ท", "310-35", 100))
        .await
        .unwrap();
    ledger
        .save(today, wager("p2", "ท", "แดง", 100))
        .await
        .unwrap();
    let resolver = CancellationResolver::new(ledger.clone(), Arc::new(MessageHistory::new(4)));

    // Both wagers reconstruct to "ท100"; the later one goes first.
    let outcome = resolver.resolve_cancellation(today, "ท100").await.unwrap();
    assert_eq!(outcome.cancelled().unwrap().player_name, "p2");

    let records = ledger.records(today).await.unwrap();
    assert_eq!(records[0].status, WagerStatus::Pending);
}
