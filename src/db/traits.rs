use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::models::{
    ActivityEntry, ActivityEvent, ActivityItem, ActivityKind, List, ListAddition, ListItem,
    ListItemPatch, ListPatch, ListWithItems, MediaItem, MediaKind, NewList, NewListItem,
    NewMediaItem, NewUser, Rating, User, UserProfilePatch, UserStats,
};
use crate::stats::{self, WatchtimeEstimate};

/// Users synced from the external auth provider.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn get_user(&self, id: &str) -> StoreResult<Option<User>>;

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Creates the user on first sign-in; later calls return the stored row unchanged.
    async fn sync_user(&self, user: NewUser) -> StoreResult<User>;

    async fn update_user_profile(
        &self,
        id: &str,
        patch: UserProfilePatch,
    ) -> StoreResult<Option<User>>;
}

/// Deduplicated catalog of movie and TV metadata.
#[async_trait]
pub trait MediaRepo: Send + Sync {
    async fn get_media(&self, id: i64) -> StoreResult<Option<MediaItem>>;

    async fn get_media_by_external_id(
        &self,
        external_id: i64,
        kind: MediaKind,
    ) -> StoreResult<Option<MediaItem>>;

    /// Fails with `Conflict` when (external_id, kind) is already cataloged.
    async fn create_media(&self, media: NewMediaItem) -> StoreResult<MediaItem>;

    /// Returns the cataloged row for (external_id, kind), creating it on a miss.
    async fn resolve_media(&self, media: NewMediaItem) -> StoreResult<MediaItem> {
        let (external_id, kind) = (media.external_id, media.kind);
        if let Some(existing) = self.get_media_by_external_id(external_id, kind).await? {
            return Ok(existing);
        }

        match self.create_media(media).await {
            Err(StoreError::Conflict(_)) => {
                tracing::warn!(external_id, %kind, "Concurrent media insert, using existing row");
                self.get_media_by_external_id(external_id, kind)
                    .await?
                    .ok_or_else(|| {
                        StoreError::Dependency(format!(
                            "media {} ({}) conflicted but could not be read back",
                            external_id, kind
                        ))
                    })
            }
            other => other,
        }
    }
}

/// Watchlist, watched and favorites memberships.
#[async_trait]
pub trait ActivityRepo: Send + Sync {
    /// Rows for the user joined with media, newest first.
    async fn list_activity(&self, kind: ActivityKind, user_id: &str)
        -> StoreResult<Vec<ActivityEntry>>;

    /// Fails with `Conflict` when the media is already present for the user,
    /// and with `Validation` when a rating is given for anything but `Watched`.
    async fn add_activity(
        &self,
        kind: ActivityKind,
        user_id: &str,
        media_id: i64,
        rating: Option<Rating>,
    ) -> StoreResult<ActivityItem>;

    async fn remove_activity(&self, kind: ActivityKind, user_id: &str, media_id: i64)
        -> StoreResult<()>;

    async fn has_activity(&self, kind: ActivityKind, user_id: &str, media_id: i64)
        -> StoreResult<bool>;

    /// Replaces any previous watched row for the pair in one atomic step.
    async fn rate_watched(
        &self,
        user_id: &str,
        media_id: i64,
        rating: Option<Rating>,
    ) -> StoreResult<ActivityItem>;
}

/// User-owned named lists and their items.
#[async_trait]
pub trait ListRepo: Send + Sync {
    /// Summary view, newest first, items not attached.
    async fn lists_by_user(&self, user_id: &str) -> StoreResult<Vec<List>>;

    async fn get_list(&self, list_id: i64) -> StoreResult<Option<List>>;

    /// Items joined with media and, when a viewer is given, the viewer's watched rating
    /// for that media. Ratings are matched per (viewer, media), never per list item.
    async fn get_list_with_items(
        &self,
        list_id: i64,
        viewer_id: Option<&str>,
    ) -> StoreResult<Option<ListWithItems>>;

    async fn create_list(&self, list: NewList) -> StoreResult<List>;

    async fn update_list(&self, list_id: i64, patch: ListPatch) -> StoreResult<Option<List>>;

    /// Removes the list and its items atomically. Missing lists are ignored.
    async fn delete_list(&self, list_id: i64) -> StoreResult<()>;

    /// Fails with `NotFound` for a missing list or media and `Conflict` when the
    /// media is already in the list.
    async fn add_item_to_list(&self, item: NewListItem) -> StoreResult<ListItem>;

    async fn update_list_item(
        &self,
        list_item_id: i64,
        patch: ListItemPatch,
    ) -> StoreResult<Option<ListItem>>;

    async fn remove_item_from_list(&self, list_id: i64, media_id: i64) -> StoreResult<()>;

    /// Items added to any list the user owns, newest first.
    async fn recent_list_additions(&self, user_id: &str, limit: usize)
        -> StoreResult<Vec<ListAddition>>;
}

/// Aggregates derived from the other repositories.
#[async_trait]
pub trait StatsRepo: ActivityRepo + ListRepo {
    async fn user_stats(&self, user_id: &str) -> StoreResult<UserStats> {
        self.user_stats_with(user_id, &WatchtimeEstimate::default())
            .await
    }

    async fn user_stats_with(
        &self,
        user_id: &str,
        estimate: &WatchtimeEstimate,
    ) -> StoreResult<UserStats> {
        let watched = self.list_activity(ActivityKind::Watched, user_id).await?;
        Ok(stats::summarize_watched(&watched, estimate))
    }

    /// Watched, favorited and list-add events merged newest first, at most `limit`.
    async fn recent_activity(&self, user_id: &str, limit: usize) -> StoreResult<Vec<ActivityEvent>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let (watched, favorites, additions) = futures::try_join!(
            self.list_activity(ActivityKind::Watched, user_id),
            self.list_activity(ActivityKind::Favorites, user_id),
            self.recent_list_additions(user_id, limit),
        )?;

        Ok(stats::merge_recent(
            [
                watched
                    .into_iter()
                    .take(limit)
                    .map(stats::watched_event)
                    .collect::<Vec<_>>(),
                favorites
                    .into_iter()
                    .take(limit)
                    .map(stats::favorited_event)
                    .collect::<Vec<_>>(),
                additions.into_iter().map(stats::list_event).collect::<Vec<_>>(),
            ],
            limit,
        ))
    }
}

/// The full storage interface the HTTP layer talks to.
#[async_trait]
pub trait Store: UserRepo + MediaRepo + ActivityRepo + ListRepo + StatsRepo + Send + Sync {
    fn backend_name(&self) -> &'static str;

    async fn health_check(&self) -> StoreResult<()>;
}
