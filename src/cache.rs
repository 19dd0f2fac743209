//! Query cache engine for the two remote lookups.
//!
//! Each query kind owns one [`Slot`]: a small state machine tracking
//! `idle -> loading -> {success | error}` for the key it currently
//! reflects. Observing a slot returns the current snapshot immediately
//! and yields a fetch ticket exactly when a network call must start,
//! so at most one request is ever in flight per key. A ticket carries
//! the slot's epoch; the epoch bumps whenever the key changes, which
//! is how late responses for superseded keys are discarded on arrival.
//!
//! [`QueryCache`] is the facade the UI talks to. It is constructed once
//! per application lifetime with an injected gateway and passed around
//! by `Rc`, never hidden in module-level state.

use crate::gateway::RatingsGateway;
use crate::{FetchError, PlayerRecord, RatingSeries};
use log::{debug, warn};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

/// Cache key for the top-players lookup: (variant, count).
pub type LeaderboardKey = (String, u32);

/// Lifecycle of one cached query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Snapshot of one query's state as seen by observers.
///
/// `data` is populated only on success, `error` only on error. The
/// payload sits behind `Rc` so snapshots are cheap to hand out on
/// every render.
#[derive(Debug)]
pub struct QueryEntry<T> {
    pub status: QueryStatus,
    pub data: Option<Rc<T>>,
    pub error: Option<FetchError>,
}

impl<T> Clone for QueryEntry<T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
        }
    }
}

/// Permission to run one fetch for `key`, tied to the slot's epoch at
/// the time it was issued.
struct FetchTicket<K> {
    key: K,
    epoch: u64,
}

/// Per-query-kind cache state machine.
struct Slot<K, T> {
    key: Option<K>,
    status: QueryStatus,
    data: Option<Rc<T>>,
    error: Option<FetchError>,
    epoch: u64,
}

impl<K: Clone + PartialEq, T> Slot<K, T> {
    fn new() -> Self {
        Self {
            key: None,
            status: QueryStatus::Idle,
            data: None,
            error: None,
            epoch: 0,
        }
    }

    /// Advance the state machine for an observation of `key`.
    ///
    /// Returns a ticket iff a fetch must start now:
    /// - same key, loading: attach to the in-flight request, no ticket;
    /// - same key, success: cached, no ticket;
    /// - same key, idle or error: one fresh attempt (error state means
    ///   manual-refresh semantics, never an automatic retry);
    /// - different key: discard the old entry wholesale, bump the
    ///   epoch, then start from idle.
    ///
    /// `enabled` is honored on every transition out of idle, not just
    /// on first subscription: a disabled slot records the key but does
    /// no network activity.
    fn observe(&mut self, key: K, enabled: bool) -> Option<FetchTicket<K>> {
        if self.key.as_ref() != Some(&key) {
            self.key = Some(key.clone());
            self.status = QueryStatus::Idle;
            self.data = None;
            self.error = None;
            self.epoch += 1;
        } else {
            match self.status {
                QueryStatus::Loading | QueryStatus::Success => return None,
                QueryStatus::Idle | QueryStatus::Error => {}
            }
        }

        if !enabled {
            return None;
        }

        self.status = QueryStatus::Loading;
        self.error = None;
        Some(FetchTicket {
            key,
            epoch: self.epoch,
        })
    }

    /// Apply a fetch outcome. A response whose epoch no longer matches
    /// belongs to a superseded key and is dropped.
    fn settle(&mut self, epoch: u64, result: Result<T, FetchError>) {
        if epoch != self.epoch {
            debug!("discarding stale response (epoch {} != {})", epoch, self.epoch);
            return;
        }
        match result {
            Ok(data) => {
                self.status = QueryStatus::Success;
                self.data = Some(Rc::new(data));
                self.error = None;
            }
            Err(err) => {
                warn!("fetch failed: {}", err);
                self.status = QueryStatus::Error;
                self.data = None;
                self.error = Some(err);
            }
        }
    }

    fn entry(&self) -> QueryEntry<T> {
        QueryEntry {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn spawn(fut: impl Future<Output = ()> + 'static) {
    wasm_bindgen_futures::spawn_local(fut);
}

// Off the browser there is no event loop to hand the future to, so
// resolve it inline. Fetch futures from fake gateways are ready-made.
#[cfg(not(target_arch = "wasm32"))]
fn spawn(fut: impl Future<Output = ()> + 'static) {
    futures::executor::block_on(fut);
}

/// Memoizing front for the remote gateway, one slot per query kind.
///
/// `observe_*` calls return the current entry snapshot immediately;
/// when a fetch is required it is spawned in the background and the
/// registered notify callback fires once it settles, at which point
/// observers re-read their entries.
pub struct QueryCache {
    gateway: Rc<dyn RatingsGateway>,
    leaderboard: RefCell<Slot<LeaderboardKey, Vec<PlayerRecord>>>,
    history: RefCell<Slot<String, Vec<RatingSeries>>>,
    notify: RefCell<Option<Box<dyn Fn()>>>,
}

impl QueryCache {
    pub fn new(gateway: Rc<dyn RatingsGateway>) -> Self {
        Self {
            gateway,
            leaderboard: RefCell::new(Slot::new()),
            history: RefCell::new(Slot::new()),
            notify: RefCell::new(None),
        }
    }

    /// Register the callback invoked whenever a fetch settles. The UI
    /// layer re-registers on every render so the callback always sees
    /// fresh component state.
    pub fn set_notify(&self, f: impl Fn() + 'static) {
        *self.notify.borrow_mut() = Some(Box::new(f));
    }

    fn notify(&self) {
        if let Some(f) = self.notify.borrow().as_ref() {
            f();
        }
    }

    /// Observe the top-players query for `(variant, count)`.
    pub fn observe_leaderboard(
        self: &Rc<Self>,
        variant: &str,
        count: u32,
    ) -> QueryEntry<Vec<PlayerRecord>> {
        let ticket = self
            .leaderboard
            .borrow_mut()
            .observe((variant.to_string(), count), true);
        if let Some(ticket) = ticket {
            debug!(
                "leaderboard fetch: variant={} count={}",
                ticket.key.0, ticket.key.1
            );
            let cache = Rc::clone(self);
            spawn(async move {
                let result = cache
                    .gateway
                    .fetch_leaderboard(&ticket.key.0, ticket.key.1)
                    .await;
                cache.leaderboard.borrow_mut().settle(ticket.epoch, result);
                cache.notify();
            });
        }
        self.leaderboard.borrow().entry()
    }

    /// Observe the rating-history query. The query is dependent: it is
    /// enabled iff a username is selected, and while disabled the slot
    /// stays idle with zero network activity.
    pub fn observe_history(
        self: &Rc<Self>,
        username: Option<&str>,
    ) -> QueryEntry<Vec<RatingSeries>> {
        let ticket = match username {
            Some(name) => self.history.borrow_mut().observe(name.to_string(), true),
            None => None,
        };
        if let Some(ticket) = ticket {
            debug!("rating history fetch: username={}", ticket.key);
            let cache = Rc::clone(self);
            spawn(async move {
                let result = cache.gateway.fetch_rating_history(&ticket.key).await;
                cache.history.borrow_mut().settle(ticket.epoch, result);
                cache.notify();
            });
        }
        self.history.borrow().entry()
    }
}
