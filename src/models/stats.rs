use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MediaItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub movies_watched: i64,
    pub tv_shows_watched: i64,
    pub average_rating: f64,
    pub total_watchtime_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityEventKind {
    Watched,
    Favorited,
    AddedToList,
}

impl ActivityEventKind {
    /// Tie-break order for events sharing a timestamp.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            ActivityEventKind::Watched => 0,
            ActivityEventKind::Favorited => 1,
            ActivityEventKind::AddedToList => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub kind: ActivityEventKind,
    pub media: MediaItem,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_name: Option<String>,
}
