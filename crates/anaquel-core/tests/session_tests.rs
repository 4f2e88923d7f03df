//! Search session integration tests
//!
//! Drives [`SearchSession`] together with a [`CatalogSearcher`] the way
//! a frontend would: keystrokes, debounce settling, request, response
//! application - with the network swapped for scripted services.

mod common;

use anaquel_core::{
    CanonicalId, CatalogSearcher, PriceEntry, PriceMap, SearchConfig, SearchKind, SearchSession,
    SourceError,
};
use common::fakes::{FakeBroker, FakeIndex, FakePricing};
use common::record;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn searcher_with_index(index: Arc<FakeIndex>) -> CatalogSearcher {
    CatalogSearcher::with_sources(
        &SearchConfig::default(),
        index,
        FakeBroker::responding(None),
        FakePricing::returning(vec![]),
    )
    .expect("default conventions are valid")
}

// === Debounced Quick Search ===

#[tokio::test(start_paused = true)]
async fn test_rapid_keystrokes_supersede_older_tickets() {
    let mut session = SearchSession::with_debounce(Duration::from_millis(300));
    let debouncer = session.debouncer();

    let first = session.type_text("aur");
    sleep(Duration::from_millis(100)).await;
    let second = session.type_text("aura");

    // The older keystroke wakes up already superseded.
    assert!(!debouncer.settle(first).await);
    assert!(debouncer.settle(second).await);
}

#[tokio::test(start_paused = true)]
async fn test_quick_search_round_trip() {
    let index = FakeIndex::returning(vec![Ok(vec![record("Aura", Some("7"))])]);
    let searcher = searcher_with_index(index.clone());
    let mut session = SearchSession::new();

    let ticket = session.type_text("aura");
    assert!(session.debouncer().settle(ticket).await);

    let hits = searcher
        .search(session.search_text(), session.mode(), SearchKind::Quick)
        .await
        .unwrap();
    assert!(session.apply_quick(ticket, hits));

    assert_eq!(session.quick_results().len(), 1);
    assert_eq!(session.quick_results()[0].title, "Aura");
    assert_eq!(index.body(0)["size"], 5);
}

// === Submitted Search ===

#[tokio::test]
async fn test_submit_round_trip_through_the_searcher() {
    let index = FakeIndex::returning(vec![Ok(vec![
        record("Pedro Páramo", Some("10")),
        record("El llano en llamas", Some("11")),
    ])]);
    let searcher = searcher_with_index(index.clone());
    let mut session = SearchSession::new();
    session.type_text("rulfo");

    let ticket = session.begin_submit();
    let outcome = searcher
        .search(session.search_text(), session.mode(), SearchKind::Submit)
        .await;
    assert!(session.apply_submit(ticket, outcome));

    assert_eq!(session.results().len(), 2);
    assert!(session.error().is_none());
    assert_eq!(index.body(0)["size"], 20);
}

#[tokio::test]
async fn test_author_pill_drives_author_weighted_search() {
    let index = FakeIndex::returning(vec![Ok(vec![record("Pedro Páramo", Some("10"))])]);
    let searcher = searcher_with_index(index.clone());
    let mut session = SearchSession::new();
    session.type_text("pedro");
    session.select_author("Juan Rulfo");

    let ticket = session.begin_submit();
    let outcome = searcher
        .search(session.search_text(), session.mode(), SearchKind::Submit)
        .await;
    session.apply_submit(ticket, outcome);

    // The pill text replaces the typed query and reweights the fields.
    let body = index.body(0);
    assert_eq!(body["query"]["multi_match"]["query"], "Juan Rulfo");
    assert_eq!(body["query"]["multi_match"]["fields"][0], "author^5");
    assert_eq!(session.results().len(), 1);
}

#[tokio::test]
async fn test_suggestion_strip_is_priced_alongside_results() {
    // One submit, two index responses (results, then the strip's
    // fallback query) and two price batches. Both surfaces end up
    // resolvable through the same session map.
    let index = FakeIndex::returning(vec![
        Ok(vec![record("Pedro Páramo", Some("10"))]),
        Ok(vec![record("El llano en llamas", Some("30"))]),
    ]);
    let mut result_batch = PriceMap::new();
    result_batch.insert(
        CanonicalId::from("10"),
        PriceEntry {
            list_price: 250.0,
            selling_price: 250.0,
        },
    );
    let mut strip_batch = PriceMap::new();
    strip_batch.insert(
        CanonicalId::from("30"),
        PriceEntry {
            list_price: 180.0,
            selling_price: 150.0,
        },
    );
    let pricing = FakePricing::returning(vec![result_batch, strip_batch]);
    let searcher = CatalogSearcher::with_sources(
        &SearchConfig::default(),
        index,
        FakeBroker::responding(None),
        pricing.clone(),
    )
    .expect("default conventions are valid");
    let mut session = SearchSession::new();
    session.type_text("rulfo");

    let ticket = session.begin_submit();
    let outcome = searcher
        .search(session.search_text(), session.mode(), SearchKind::Submit)
        .await;
    assert!(session.apply_submit(ticket, outcome));

    let (result_prices, suggestions) = tokio::join!(
        searcher.prices(session.results()),
        searcher.suggestions(session.search_text(), session.results()),
    );
    session.apply_prices(ticket, result_prices);

    let strip_prices = searcher.prices(&suggestions).await;
    session.apply_suggestions(ticket, suggestions);
    session.apply_prices(ticket, strip_prices);

    assert_eq!(pricing.ids_seen(0), vec![CanonicalId::from("10")]);
    assert_eq!(pricing.ids_seen(1), vec![CanonicalId::from("30")]);
    assert!(session.price_for(&CanonicalId::from("10")).is_some());
    let strip_entry = session.price_for(&CanonicalId::from("30")).unwrap();
    assert!(strip_entry.is_discounted());
}

#[tokio::test]
async fn test_index_failure_reaches_the_user_through_the_session() {
    let index = FakeIndex::returning(vec![Err(SourceError::status(503, "upstream unavailable"))]);
    let searcher = searcher_with_index(index);
    let mut session = SearchSession::new();
    session.type_text("rulfo");

    let ticket = session.begin_submit();
    let outcome = searcher
        .search(session.search_text(), session.mode(), SearchKind::Submit)
        .await;
    session.apply_submit(ticket, outcome);

    assert_eq!(session.error(), Some("Error searching books. Please try again."));
    assert!(session.results().is_empty());
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_failed_submit_recovers_on_retry() {
    let index = FakeIndex::returning(vec![
        Err(SourceError::status(500, "boom")),
        Ok(vec![record("Aura", Some("7"))]),
    ]);
    let searcher = searcher_with_index(index);
    let mut session = SearchSession::new();
    session.type_text("aura");

    let first = session.begin_submit();
    session.apply_suggestions(first, vec![record("Sugerida", Some("9"))]);
    let outcome = searcher
        .search(session.search_text(), session.mode(), SearchKind::Submit)
        .await;
    session.apply_submit(first, outcome);

    // The failure clears the strip along with the results.
    assert!(session.error().is_some());
    assert!(session.suggestions().is_empty());

    let retry = session.begin_submit();
    assert!(session.error().is_none());
    let outcome = searcher
        .search(session.search_text(), session.mode(), SearchKind::Submit)
        .await;
    session.apply_submit(retry, outcome);

    assert_eq!(session.results().len(), 1);
    assert!(session.error().is_none());
}
