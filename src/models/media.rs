use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(MediaKind::Movie),
            "tv" => Ok(MediaKind::Tv),
            other => Err(StoreError::Validation(format!("unknown media kind: {}", other))),
        }
    }
}

/// Cached catalog metadata for a movie or TV show. Unique on (external_id, kind).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: i64,
    pub external_id: i64,
    pub kind: MediaKind,
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub episode_count: Option<i64>,
    pub runtime: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMediaItem {
    pub external_id: i64,
    pub kind: MediaKind,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub episode_count: Option<i64>,
    #[serde(default)]
    pub runtime: Option<i64>,
}

impl NewMediaItem {
    pub fn new(external_id: i64, kind: MediaKind, title: impl Into<String>) -> Self {
        Self {
            external_id,
            kind,
            title: title.into(),
            poster_path: None,
            backdrop_path: None,
            overview: None,
            release_date: None,
            vote_average: None,
            episode_count: None,
            runtime: None,
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.external_id <= 0 {
            return Err(StoreError::Validation(
                "external id must be positive".to_string(),
            ));
        }
        if self.title.trim().is_empty() {
            return Err(StoreError::Validation("title is required".to_string()));
        }
        if self.runtime.is_some_and(|r| r < 0) || self.episode_count.is_some_and(|e| e < 0) {
            return Err(StoreError::Validation(
                "runtime and episode count cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn into_media(self, id: i64, created_at: DateTime<Utc>) -> MediaItem {
        MediaItem {
            id,
            external_id: self.external_id,
            kind: self.kind,
            title: self.title,
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            overview: self.overview,
            release_date: self.release_date,
            vote_average: self.vote_average,
            episode_count: self.episode_count,
            runtime: self.runtime,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        assert_eq!("tv".parse::<MediaKind>().unwrap(), MediaKind::Tv);
        assert_eq!(MediaKind::Movie.to_string(), "movie");
        assert!("anime".parse::<MediaKind>().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let media = NewMediaItem::new(603, MediaKind::Movie, "   ");
        assert!(matches!(media.validate(), Err(StoreError::Validation(_))));
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut media = NewMediaItem::new(603, MediaKind::Movie, "The Matrix");
        media.poster_path = Some("/matrix.jpg".to_string());
        let json = serde_json::to_value(&media).unwrap();
        assert_eq!(json["externalId"], 603);
        assert_eq!(json["posterPath"], "/matrix.jpg");
        assert_eq!(json["kind"], "movie");
    }
}
