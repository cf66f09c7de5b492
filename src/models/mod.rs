mod activity;
mod list;
mod media;
mod stats;
mod user;

pub use activity::{ActivityEntry, ActivityItem, ActivityKind, Rating};
pub use list::{
    List, ListAddition, ListItem, ListItemPatch, ListItemStatus, ListItemView, ListPatch,
    ListWithItems, NewList, NewListItem,
};
pub use media::{MediaItem, MediaKind, NewMediaItem};
pub use stats::{ActivityEvent, ActivityEventKind, UserStats};
pub use user::{NewUser, User, UserProfilePatch};

pub(crate) use list::check_seasons;

use serde::{Deserialize, Deserializer};

use crate::error::{StoreError, StoreResult};

/// Parses a path segment into a positive row id.
pub fn parse_id(raw: &str) -> StoreResult<i64> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(StoreError::Validation(format!(
            "id must be a positive integer, got {:?}",
            raw
        ))),
    }
}

/// Distinguishes an absent patch field from an explicit `null`.
pub(crate) fn explicit<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
        assert!(matches!(parse_id("abc"), Err(StoreError::Validation(_))));
        assert!(matches!(parse_id("0"), Err(StoreError::Validation(_))));
        assert!(matches!(parse_id("-3"), Err(StoreError::Validation(_))));
        assert!(matches!(parse_id(""), Err(StoreError::Validation(_))));
    }
}
