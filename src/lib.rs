//! Core library for the rating board client.
//!
//! Holds the wire-level data model shared by the remote gateway and the
//! UI, plus the fetch error taxonomy. The actual behavior lives in the
//! submodules: [`gateway`] talks to the remote API, [`cache`] memoizes
//! query results per parameter combination, [`selection`] carries the
//! user's current choices, and [`view`] derives what to render from the
//! other two.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub mod cache;
pub mod gateway;
pub mod selection;
pub mod view;

/// Per-variant rating figures attached to a player record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerfStats {
    pub rating: i32,
    pub progress: i32,
}

/// One raw player record as returned by the top-players endpoint.
///
/// `title` and `online` are omitted by the API for untitled/offline
/// players; `perfs` maps variant keys to that player's figures for the
/// variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub perfs: HashMap<String, PerfStats>,
}

/// One day's rating, `[year, month, day, rating]` on the wire.
///
/// The month is carried through exactly as received; no calendar math
/// is performed anywhere in the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingPoint(pub i32, pub u32, pub u32, pub i32);

impl RatingPoint {
    pub fn year(&self) -> i32 {
        self.0
    }

    pub fn month(&self) -> u32 {
        self.1
    }

    pub fn day(&self) -> u32 {
        self.2
    }

    pub fn rating(&self) -> i32 {
        self.3
    }
}

/// A per-variant rating time series, points ordered oldest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSeries {
    pub name: String,
    pub points: Vec<RatingPoint>,
}

/// Errors produced by a single fetch attempt.
///
/// All variants are terminal for the attempt: nothing is retried
/// automatically. Each surfaces on the query entry of the failing
/// lookup and never blocks the other one.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Transport failure or non-success HTTP status.
    Network(String),
    /// The response body could not be parsed into the expected shape.
    Decode(String),
    /// A player record lacks the selected variant's rating sub-field.
    MissingField { username: String, variant: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {}", msg),
            FetchError::Decode(msg) => write!(f, "unexpected response shape: {}", msg),
            FetchError::MissingField { username, variant } => write!(
                f,
                "player '{}' has no rating data for variant '{}'",
                username, variant
            ),
        }
    }
}

impl std::error::Error for FetchError {}
