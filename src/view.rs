//! View projection: a pure function from (selection, query entries) to
//! the render model. Nothing here performs I/O or mutates state; the
//! Yew components translate the resulting [`Screen`] into markup.

use crate::cache::{QueryEntry, QueryStatus};
use crate::selection::Selection;
use crate::{FetchError, PlayerRecord, RatingPoint, RatingSeries};

/// One row of the list view, derived 1:1 from a gateway record.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    /// 1-based position in the order the gateway returned.
    pub rank: usize,
    pub id: String,
    pub username: String,
    pub title: Option<String>,
    pub online: bool,
    pub rating: i32,
    pub progress: i32,
}

/// A rating series prepared for display: windowed and newest-first.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesView {
    pub name: String,
    pub points: Vec<RatingPoint>,
}

/// What the list screen shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Failed(String),
    Empty,
    Rows(Vec<LeaderboardRow>),
}

/// What the detail body shows, scoped to the history query.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailBody {
    Loading,
    Failed(String),
    Empty,
    Series(Vec<SeriesView>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    pub username: String,
    pub body: DetailBody,
}

/// The active screen, decided solely by `active_username`.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    List(ListState),
    Detail(DetailState),
}

/// Map raw player records onto display rows for the selected variant.
///
/// Rank is the 1-based gateway position; the order is never changed
/// client-side. A record without a perf entry for the variant fails
/// the whole derivation (fail-fast): that is a data-shape defect, not
/// an absent player.
pub fn derive_leaderboard_rows(
    records: &[PlayerRecord],
    variant: &str,
) -> Result<Vec<LeaderboardRow>, FetchError> {
    records
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let perf = p.perfs.get(variant).ok_or_else(|| FetchError::MissingField {
                username: p.username.clone(),
                variant: variant.to_string(),
            })?;
            Ok(LeaderboardRow {
                rank: i + 1,
                id: p.id.clone(),
                username: p.username.clone(),
                title: p.title.clone(),
                online: p.online,
                rating: perf.rating,
                progress: perf.progress,
            })
        })
        .collect()
}

/// The last `window` points of an oldest-first series, newest-first.
/// Shorter series are shown whole.
pub fn windowed_points(points: &[RatingPoint], window: usize) -> Vec<RatingPoint> {
    let start = points.len().saturating_sub(window);
    let mut shown = points[start..].to_vec();
    shown.reverse();
    shown
}

/// Derive the render model for the current frame.
pub fn project(
    selection: &Selection,
    leaderboard: &QueryEntry<Vec<PlayerRecord>>,
    history: &QueryEntry<Vec<RatingSeries>>,
) -> Screen {
    match &selection.active_username {
        None => Screen::List(project_list(selection, leaderboard)),
        Some(username) => Screen::Detail(DetailState {
            username: username.clone(),
            body: project_detail(selection, history),
        }),
    }
}

fn error_text(entry_error: &Option<FetchError>) -> String {
    entry_error
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default()
}

fn project_list(
    selection: &Selection,
    leaderboard: &QueryEntry<Vec<PlayerRecord>>,
) -> ListState {
    match leaderboard.status {
        QueryStatus::Idle | QueryStatus::Loading => ListState::Loading,
        QueryStatus::Error => ListState::Failed(error_text(&leaderboard.error)),
        QueryStatus::Success => match leaderboard.data.as_deref() {
            None => ListState::Empty,
            Some(records) if records.is_empty() => ListState::Empty,
            Some(records) => match derive_leaderboard_rows(records, &selection.variant) {
                Ok(rows) => ListState::Rows(rows),
                Err(err) => ListState::Failed(err.to_string()),
            },
        },
    }
}

fn project_detail(
    selection: &Selection,
    history: &QueryEntry<Vec<RatingSeries>>,
) -> DetailBody {
    match history.status {
        QueryStatus::Idle | QueryStatus::Loading => DetailBody::Loading,
        QueryStatus::Error => DetailBody::Failed(error_text(&history.error)),
        QueryStatus::Success => match history.data.as_deref() {
            None => DetailBody::Empty,
            Some(series) if series.is_empty() => DetailBody::Empty,
            Some(series) => DetailBody::Series(
                series
                    .iter()
                    .map(|s| SeriesView {
                        name: s.name.clone(),
                        points: windowed_points(&s.points, selection.history_window_days),
                    })
                    .collect(),
            ),
        },
    }
}
