//! User selection state: variant, board size, active player, history
//! window. Pure value state with no side effects; every setter replaces
//! exactly one field.

/// The user's current choices.
///
/// `active_username` doubles as the view switch: `Some` means the
/// detail view is active, `None` the list view. Clearing it is the only
/// way back to the list and has no effect on the leaderboard query,
/// whose key never involves the username.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub variant: String,
    pub leaderboard_size: u32,
    pub active_username: Option<String>,
    pub history_window_days: usize,
}

impl Selection {
    pub fn new(variant: &str, leaderboard_size: u32, history_window_days: usize) -> Self {
        Self {
            variant: variant.to_string(),
            leaderboard_size,
            active_username: None,
            history_window_days,
        }
    }

    pub fn with_variant(&self, variant: &str) -> Self {
        Self {
            variant: variant.to_string(),
            ..self.clone()
        }
    }

    pub fn with_leaderboard_size(&self, leaderboard_size: u32) -> Self {
        Self {
            leaderboard_size,
            ..self.clone()
        }
    }

    pub fn with_active_username(&self, username: Option<&str>) -> Self {
        Self {
            active_username: username.map(str::to_string),
            ..self.clone()
        }
    }

    pub fn with_history_window_days(&self, history_window_days: usize) -> Self {
        Self {
            history_window_days,
            ..self.clone()
        }
    }
}
