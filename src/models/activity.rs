use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MediaItem;
use crate::error::StoreError;

/// The three per-user membership tables. They share one shape; only `Watched` carries a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Watchlist,
    Watched,
    Favorites,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 3] = [
        ActivityKind::Watchlist,
        ActivityKind::Watched,
        ActivityKind::Favorites,
    ];

    pub(crate) fn table(&self) -> &'static str {
        match self {
            ActivityKind::Watchlist => "watchlist_items",
            ActivityKind::Watched => "watched_items",
            ActivityKind::Favorites => "favorite_items",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::Watchlist => "watchlist",
            ActivityKind::Watched => "watched",
            ActivityKind::Favorites => "favorites",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A personal score in `0..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 10;

    pub fn new(value: i64) -> Result<Self, StoreError> {
        if (0..=Self::MAX as i64).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(StoreError::Validation(format!(
                "rating must be between 0 and {}, got {}",
                Self::MAX,
                value
            )))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = StoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        rating.0 as i64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub id: i64,
    pub kind: ActivityKind,
    pub user_id: String,
    pub media_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    pub created_at: DateTime<Utc>,
}

/// An activity row joined with its media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    #[serde(flatten)]
    pub item: ActivityItem,
    pub media: MediaItem,
}
