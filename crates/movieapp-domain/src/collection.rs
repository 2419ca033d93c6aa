//! Per-user movie collections.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of a user's movie lists an operation targets.
///
/// Both lists hold the same entry shape and each enforces movie-id uniqueness
/// on its own; a movie may sit in the watchlist and in favorites at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Watchlist,
    Favorites,
}

impl ListKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Watchlist => "watchlist",
            Self::Favorites => "favorites",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
