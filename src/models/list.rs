use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MediaItem, MediaKind, Rating};
use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewList {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

impl NewList {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            description: None,
            is_public: false,
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.user_id.trim().is_empty() {
            return Err(StoreError::Validation("user id is required".to_string()));
        }
        validate_name(&self.name)
    }
}

fn validate_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation("list name is required".to_string()));
    }
    Ok(())
}

/// Mutable list fields. Absent fields are left untouched; `description: null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::explicit")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub is_public: Option<bool>,
}

impl ListPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.is_public.is_none()
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }

    pub(crate) fn apply(self, list: &mut List) {
        if let Some(name) = self.name {
            list.name = name;
        }
        if let Some(description) = self.description {
            list.description = description;
        }
        if let Some(is_public) = self.is_public {
            list.is_public = is_public;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ListItemStatus {
    #[default]
    #[serde(rename = "watched")]
    Watched,
    #[serde(rename = "watchlist")]
    Watchlist,
    #[serde(rename = "watching")]
    Watching,
    #[serde(rename = "on hold")]
    OnHold,
    #[serde(rename = "dropped")]
    Dropped,
}

impl ListItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListItemStatus::Watched => "watched",
            ListItemStatus::Watchlist => "watchlist",
            ListItemStatus::Watching => "watching",
            ListItemStatus::OnHold => "on hold",
            ListItemStatus::Dropped => "dropped",
        }
    }
}

impl fmt::Display for ListItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListItemStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "watched" => Ok(ListItemStatus::Watched),
            "watchlist" => Ok(ListItemStatus::Watchlist),
            "watching" => Ok(ListItemStatus::Watching),
            "on hold" => Ok(ListItemStatus::OnHold),
            "dropped" => Ok(ListItemStatus::Dropped),
            other => Err(StoreError::Validation(format!(
                "unknown list item status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub id: i64,
    pub list_id: i64,
    pub media_id: i64,
    pub status: ListItemStatus,
    pub seasons_watched: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewListItem {
    pub list_id: i64,
    pub media_id: i64,
    #[serde(default)]
    pub status: ListItemStatus,
    #[serde(default)]
    pub seasons_watched: Option<i64>,
}

impl NewListItem {
    pub fn new(list_id: i64, media_id: i64) -> Self {
        Self {
            list_id,
            media_id,
            status: ListItemStatus::default(),
            seasons_watched: None,
        }
    }

    pub fn with_status(mut self, status: ListItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_seasons_watched(mut self, seasons: i64) -> Self {
        self.seasons_watched = Some(seasons);
        self
    }
}

/// Mutable list item fields. Media and list membership never change after creation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListItemPatch {
    #[serde(default)]
    pub status: Option<ListItemStatus>,
    #[serde(default, deserialize_with = "super::explicit")]
    pub seasons_watched: Option<Option<i64>>,
}

impl ListItemPatch {
    pub fn status(status: ListItemStatus) -> Self {
        Self {
            status: Some(status),
            seasons_watched: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.seasons_watched.is_none()
    }

    pub(crate) fn apply(self, item: &mut ListItem) {
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(seasons) = self.seasons_watched {
            item.seasons_watched = seasons;
        }
    }
}

/// Season progress is only tracked for TV and never negative.
pub(crate) fn check_seasons(kind: MediaKind, seasons: Option<i64>) -> Result<(), StoreError> {
    match seasons {
        None => Ok(()),
        Some(n) if n < 0 => Err(StoreError::Validation(
            "seasons watched cannot be negative".to_string(),
        )),
        Some(_) if kind != MediaKind::Tv => Err(StoreError::Validation(
            "seasons watched only applies to tv shows".to_string(),
        )),
        Some(_) => Ok(()),
    }
}

/// A list item as shown to a viewer: the item, its media and the viewer's own rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemView {
    #[serde(flatten)]
    pub item: ListItem,
    pub media: MediaItem,
    pub viewer_rating: Option<Rating>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWithItems {
    #[serde(flatten)]
    pub list: List,
    pub items: Vec<ListItemView>,
}

/// A list item added by a list's owner, used by the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAddition {
    pub item: ListItem,
    pub list_name: String,
    pub media: MediaItem,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&ListItemStatus::OnHold).unwrap(),
            "\"on hold\""
        );
        assert_eq!("on hold".parse::<ListItemStatus>().unwrap(), ListItemStatus::OnHold);
        assert_eq!(ListItemStatus::default(), ListItemStatus::Watched);
        assert!("paused".parse::<ListItemStatus>().is_err());
    }

    #[test]
    fn test_list_patch_rejects_unknown_fields() {
        let err = serde_json::from_str::<ListPatch>(r#"{"userId":"someone-else"}"#);
        assert!(err.is_err());

        let patch: ListPatch = serde_json::from_str(r#"{"isPublic":true}"#).unwrap();
        assert_eq!(patch.is_public, Some(true));
        assert!(patch.name.is_none());
        assert!(patch.description.is_none());
    }

    #[test]
    fn test_list_item_patch_rejects_media_change() {
        assert!(serde_json::from_str::<ListItemPatch>(r#"{"mediaId":3}"#).is_err());
        let patch: ListItemPatch =
            serde_json::from_str(r#"{"status":"watching","seasonsWatched":null}"#).unwrap();
        assert_eq!(patch.status, Some(ListItemStatus::Watching));
        assert_eq!(patch.seasons_watched, Some(None));
    }

    #[test]
    fn test_new_list_rejects_empty_name() {
        assert!(matches!(
            NewList::new("u1", "  ").validate(),
            Err(StoreError::Validation(_))
        ));
        assert!(NewList::new("u1", "Horror").validate().is_ok());
    }

    #[test]
    fn test_seasons_only_for_tv() {
        assert!(check_seasons(MediaKind::Tv, Some(2)).is_ok());
        assert!(check_seasons(MediaKind::Movie, None).is_ok());
        assert!(check_seasons(MediaKind::Movie, Some(1)).is_err());
        assert!(check_seasons(MediaKind::Tv, Some(-1)).is_err());
    }
}
