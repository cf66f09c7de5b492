use std::cmp::Reverse;

use crate::models::{
    ActivityEntry, ActivityEvent, ActivityEventKind, ListAddition, MediaItem, MediaKind, UserStats,
};

/// Fallback runtimes used when the catalog has no runtime data for a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchtimeEstimate {
    pub movie_minutes: i64,
    pub episode_minutes: i64,
}

impl Default for WatchtimeEstimate {
    fn default() -> Self {
        Self {
            movie_minutes: 120,
            episode_minutes: 60,
        }
    }
}

impl WatchtimeEstimate {
    pub fn minutes_for(&self, media: &MediaItem) -> i64 {
        match media.kind {
            MediaKind::Movie => media.runtime.unwrap_or(self.movie_minutes),
            MediaKind::Tv => {
                let per_episode = media.runtime.unwrap_or(self.episode_minutes);
                per_episode.saturating_mul(media.episode_count.unwrap_or(1))
            }
        }
    }
}

/// Derives user stats from the user's watched rows.
pub fn summarize_watched(entries: &[ActivityEntry], estimate: &WatchtimeEstimate) -> UserStats {
    let movies_watched = entries
        .iter()
        .filter(|e| e.media.kind == MediaKind::Movie)
        .count() as i64;
    let tv_shows_watched = entries
        .iter()
        .filter(|e| e.media.kind == MediaKind::Tv)
        .count() as i64;

    let ratings: Vec<f64> = entries
        .iter()
        .filter_map(|e| e.item.rating)
        .map(|r| r.value() as f64)
        .collect();
    let average_rating = if ratings.is_empty() {
        0.0
    } else {
        ratings.iter().sum::<f64>() / ratings.len() as f64
    };

    let minutes = entries
        .iter()
        .map(|e| estimate.minutes_for(&e.media))
        .fold(0i64, i64::saturating_add);

    UserStats {
        movies_watched,
        tv_shows_watched,
        average_rating,
        total_watchtime_hours: minutes as f64 / 60.0,
    }
}

pub fn watched_event(entry: ActivityEntry) -> ActivityEvent {
    ActivityEvent {
        kind: ActivityEventKind::Watched,
        timestamp: entry.item.created_at,
        media: entry.media,
        list_id: None,
        list_name: None,
    }
}

pub fn favorited_event(entry: ActivityEntry) -> ActivityEvent {
    ActivityEvent {
        kind: ActivityEventKind::Favorited,
        timestamp: entry.item.created_at,
        media: entry.media,
        list_id: None,
        list_name: None,
    }
}

pub fn list_event(addition: ListAddition) -> ActivityEvent {
    ActivityEvent {
        kind: ActivityEventKind::AddedToList,
        timestamp: addition.item.created_at,
        media: addition.media,
        list_id: Some(addition.item.list_id),
        list_name: Some(addition.list_name),
    }
}

/// Merges independently fetched event sources newest first and keeps at most `limit`.
pub fn merge_recent<I>(sources: I, limit: usize) -> Vec<ActivityEvent>
where
    I: IntoIterator<Item = Vec<ActivityEvent>>,
{
    let mut events: Vec<ActivityEvent> = sources.into_iter().flatten().collect();
    events.sort_by_key(|e| (Reverse(e.timestamp), e.kind.rank()));
    events.truncate(limit);
    events
}
