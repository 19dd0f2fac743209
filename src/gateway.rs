//! Remote data gateway for the public rating API.
//!
//! Pure transport boundary: one HTTP request per call, no caching and
//! no retries. Transport failures and body-shape mismatches map onto
//! [`FetchError`]; callers may invoke the same lookup repeatedly with
//! identical parameters without side effects beyond the network call.

use crate::{FetchError, PlayerRecord, RatingSeries};
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Envelope around the top-players endpoint's payload.
#[derive(Debug, Deserialize)]
pub(crate) struct TopPlayersResponse {
    pub users: Vec<PlayerRecord>,
}

/// Read-only access to the two remote lookups the application needs.
///
/// The cache engine is written against this trait so tests can inject
/// a fake that never touches the network. Futures are `LocalBoxFuture`:
/// the whole client runs on a single thread.
pub trait RatingsGateway {
    /// `GET {base}/player/top/{count}/{variant}`
    fn fetch_leaderboard(
        &self,
        variant: &str,
        count: u32,
    ) -> LocalBoxFuture<'static, Result<Vec<PlayerRecord>, FetchError>>;

    /// `GET {base}/user/{username}/rating-history`
    fn fetch_rating_history(
        &self,
        username: &str,
    ) -> LocalBoxFuture<'static, Result<Vec<RatingSeries>, FetchError>>;
}

/// Gateway backed by the browser's `fetch` via `gloo-net`.
pub struct HttpGateway {
    base: String,
}

impl HttpGateway {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }
}

async fn get_json<T: DeserializeOwned>(url: String) -> Result<T, FetchError> {
    let resp = gloo_net::http::Request::get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;
    if !resp.ok() {
        return Err(FetchError::Network(format!("HTTP {}", resp.status())));
    }
    resp.json::<T>()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))
}

impl RatingsGateway for HttpGateway {
    fn fetch_leaderboard(
        &self,
        variant: &str,
        count: u32,
    ) -> LocalBoxFuture<'static, Result<Vec<PlayerRecord>, FetchError>> {
        let url = format!("{}/player/top/{}/{}", self.base, count, variant);
        async move { Ok(get_json::<TopPlayersResponse>(url).await?.users) }.boxed_local()
    }

    fn fetch_rating_history(
        &self,
        username: &str,
    ) -> LocalBoxFuture<'static, Result<Vec<RatingSeries>, FetchError>> {
        let url = format!("{}/user/{}/rating-history", self.base, username);
        get_json::<Vec<RatingSeries>>(url).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RatingPoint;

    #[test]
    fn decodes_top_players_envelope() {
        let json = r#"{
            "users": [
                {
                    "id": "a",
                    "username": "Alpha",
                    "perfs": {"bullet": {"rating": 2900, "progress": -4}}
                },
                {
                    "id": "b",
                    "username": "Beta",
                    "title": "IM",
                    "online": true,
                    "perfs": {"bullet": {"rating": 2850, "progress": 31}}
                }
            ]
        }"#;
        let resp: TopPlayersResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.users.len(), 2);
        assert_eq!(resp.users[0].username, "Alpha");
        assert_eq!(resp.users[1].title.as_deref(), Some("IM"));
    }

    #[test]
    fn decodes_rating_history_payload() {
        let json = r#"[
            {"name": "Bullet", "points": [[2023, 0, 5, 1800], [2023, 0, 6, 1812]]},
            {"name": "Blitz", "points": []}
        ]"#;
        let series: Vec<RatingSeries> = serde_json::from_str(json).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].points[1], RatingPoint(2023, 0, 6, 1812));
        assert!(series[1].points.is_empty());
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let gw = HttpGateway::new("https://example.org/api/");
        assert_eq!(gw.base, "https://example.org/api");
    }
}
