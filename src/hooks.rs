//! Custom hooks bridging the query cache into Yew's render cycle.

use crate::config::API_BASE;
use rating_board::cache::QueryCache;
use rating_board::gateway::HttpGateway;
use std::rc::Rc;
use yew::prelude::*;

/// Hand out the application-wide query cache.
///
/// The cache is created once per component lifetime with the HTTP
/// gateway injected. A version counter ties the component's renders to
/// cache updates: every settled fetch bumps it through the notify
/// callback, which is re-registered each render so it always captures
/// the current counter value.
#[hook]
pub fn use_query_cache() -> Rc<QueryCache> {
    let version = use_state(|| 0u64);

    let cache = use_memo((), |_| {
        Rc::new(QueryCache::new(Rc::new(HttpGateway::new(API_BASE))))
    });

    {
        let setter = version.clone();
        let current = *version;
        cache.set_notify(move || setter.set(current.wrapping_add(1)));
    }

    // Reading the counter subscribes this component to cache updates.
    let _ = *version;

    Rc::clone(&*cache)
}
