//! End-to-end behavior of the query cache against a fake gateway.
//!
//! Off the browser the engine resolves fetches inline, so every
//! `observe_*` call below returns the settled entry and the fake's
//! call counters expose exactly how many network requests were made.

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use rating_board::cache::{QueryCache, QueryStatus};
use rating_board::gateway::RatingsGateway;
use rating_board::{FetchError, PerfStats, PlayerRecord, RatingPoint, RatingSeries};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default)]
struct FakeGateway {
    leaderboard_calls: Cell<usize>,
    history_calls: Cell<usize>,
    fail_leaderboard: Cell<bool>,
}

fn player(id: &str, username: &str, variant: &str, rating: i32) -> PlayerRecord {
    let mut perfs = HashMap::new();
    perfs.insert(
        variant.to_string(),
        PerfStats {
            rating,
            progress: 0,
        },
    );
    PlayerRecord {
        id: id.to_string(),
        username: username.to_string(),
        title: None,
        online: false,
        perfs,
    }
}

impl RatingsGateway for FakeGateway {
    fn fetch_leaderboard(
        &self,
        variant: &str,
        count: u32,
    ) -> LocalBoxFuture<'static, Result<Vec<PlayerRecord>, FetchError>> {
        self.leaderboard_calls.set(self.leaderboard_calls.get() + 1);
        let result = if self.fail_leaderboard.get() {
            Err(FetchError::Network("connection reset".to_string()))
        } else {
            Ok((0..count.min(3))
                .map(|i| {
                    player(
                        &format!("p{}", i),
                        &format!("user{}", i),
                        variant,
                        2000 + i as i32,
                    )
                })
                .collect())
        };
        async move { result }.boxed_local()
    }

    fn fetch_rating_history(
        &self,
        _username: &str,
    ) -> LocalBoxFuture<'static, Result<Vec<RatingSeries>, FetchError>> {
        self.history_calls.set(self.history_calls.get() + 1);
        let result = Ok(vec![RatingSeries {
            name: "Blitz".to_string(),
            points: vec![RatingPoint(2024, 0, 1, 1500)],
        }]);
        async move { result }.boxed_local()
    }
}

fn setup() -> (Rc<QueryCache>, Rc<FakeGateway>) {
    let gateway = Rc::new(FakeGateway::default());
    let cache = Rc::new(QueryCache::new(gateway.clone()));
    (cache, gateway)
}

#[test]
fn repeated_observation_of_one_key_fetches_once() {
    let (cache, gateway) = setup();

    let first = cache.observe_leaderboard("blitz", 50);
    let second = cache.observe_leaderboard("blitz", 50);

    assert_eq!(gateway.leaderboard_calls.get(), 1);
    assert_eq!(first.status, QueryStatus::Success);
    assert_eq!(second.status, QueryStatus::Success);
    assert_eq!(second.data.unwrap().len(), 3);
}

#[test]
fn changed_parameters_form_a_new_key_and_refetch() {
    let (cache, gateway) = setup();

    cache.observe_leaderboard("blitz", 50);
    let entry = cache.observe_leaderboard("bullet", 50);
    assert_eq!(gateway.leaderboard_calls.get(), 2);

    // The entry now reflects the bullet key, not leftover blitz data.
    let records = entry.data.unwrap();
    assert!(records[0].perfs.contains_key("bullet"));
    assert!(!records[0].perfs.contains_key("blitz"));

    // Returning to a previously seen key is a key change too: entries
    // are superseded, never kept side by side.
    cache.observe_leaderboard("blitz", 50);
    assert_eq!(gateway.leaderboard_calls.get(), 3);
}

#[test]
fn count_is_part_of_the_leaderboard_key() {
    let (cache, gateway) = setup();

    cache.observe_leaderboard("blitz", 50);
    cache.observe_leaderboard("blitz", 100);
    assert_eq!(gateway.leaderboard_calls.get(), 2);
}

#[test]
fn history_stays_idle_while_no_username_is_selected() {
    let (cache, gateway) = setup();

    for _ in 0..5 {
        let entry = cache.observe_history(None);
        assert_eq!(entry.status, QueryStatus::Idle);
    }
    assert_eq!(gateway.history_calls.get(), 0);
}

#[test]
fn selecting_a_username_enables_the_dependent_query() {
    let (cache, gateway) = setup();

    cache.observe_history(None);
    let entry = cache.observe_history(Some("penguingim1"));
    assert_eq!(gateway.history_calls.get(), 1);
    assert_eq!(entry.status, QueryStatus::Success);
    assert_eq!(entry.data.unwrap()[0].name, "Blitz");

    // Re-observing the same username serves the cached series.
    cache.observe_history(Some("penguingim1"));
    assert_eq!(gateway.history_calls.get(), 1);
}

#[test]
fn clearing_the_username_leaves_both_queries_untouched() {
    let (cache, gateway) = setup();

    cache.observe_leaderboard("blitz", 50);
    cache.observe_history(Some("penguingim1"));
    let entry = cache.observe_history(None);

    // Back to the list: no new calls on either query.
    assert_eq!(cache.observe_leaderboard("blitz", 50).status, QueryStatus::Success);
    assert_eq!(gateway.leaderboard_calls.get(), 1);
    assert_eq!(gateway.history_calls.get(), 1);
    // The cached history entry survives for a possible revisit.
    assert_eq!(entry.status, QueryStatus::Success);
}

#[test]
fn errors_surface_once_and_refetch_on_the_next_observation() {
    let (cache, gateway) = setup();
    gateway.fail_leaderboard.set(true);

    let failed = cache.observe_leaderboard("blitz", 50);
    assert_eq!(failed.status, QueryStatus::Error);
    assert_eq!(
        failed.error,
        Some(FetchError::Network("connection reset".to_string()))
    );
    assert!(failed.data.is_none());
    assert_eq!(gateway.leaderboard_calls.get(), 1);

    // No automatic retry happened; the next observation is the retry.
    gateway.fail_leaderboard.set(false);
    let recovered = cache.observe_leaderboard("blitz", 50);
    assert_eq!(gateway.leaderboard_calls.get(), 2);
    assert_eq!(recovered.status, QueryStatus::Success);
    assert_eq!(recovered.error, None);
}

#[test]
fn leaderboard_failure_does_not_block_the_history_query() {
    let (cache, gateway) = setup();
    gateway.fail_leaderboard.set(true);

    let lb = cache.observe_leaderboard("blitz", 50);
    let hist = cache.observe_history(Some("penguingim1"));

    assert_eq!(lb.status, QueryStatus::Error);
    assert_eq!(hist.status, QueryStatus::Success);
}
