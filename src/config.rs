//! Injected configuration constants for the UI.
//!
//! The core treats all of these as opaque closed sets: the first entry
//! of each list is the default selection and no value outside them can
//! be produced by the controls.

pub const API_BASE: &str = "https://lichess.org/api";

/// Selectable game variants, used as partition keys for both lookups.
pub const VARIANTS: &[&str] = &[
    "classical",
    "ultraBullet",
    "bullet",
    "blitz",
    "rapid",
    "chess960",
    "crazyhouse",
    "antichess",
    "atomic",
    "horde",
    "kingOfTheHill",
    "racingKings",
    "threeCheck",
];

/// Selectable leaderboard sizes.
pub const LEADERBOARD_SIZE_OPTIONS: &[u32] = &[50, 100, 200];

/// Selectable history windows, in days shown.
pub const HISTORY_WINDOW_OPTIONS: &[usize] = &[30, 60, 120];
