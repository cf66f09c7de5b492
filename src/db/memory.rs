use std::cmp::Reverse;
use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{now, require_user, ActivityRepo, ListRepo, MediaRepo, StatsRepo, Store, UserRepo};
use crate::error::{StoreError, StoreResult};
use crate::models::{
    check_seasons, ActivityEntry, ActivityItem, ActivityKind, List, ListAddition, ListItem,
    ListItemPatch, ListItemView, ListPatch, ListWithItems, MediaItem, MediaKind, NewList,
    NewListItem, NewMediaItem, NewUser, Rating, User, UserProfilePatch,
};

#[derive(Default)]
struct Tables {
    last_id: i64,
    users: BTreeMap<String, User>,
    media: BTreeMap<i64, MediaItem>,
    watchlist: BTreeMap<i64, ActivityItem>,
    watched: BTreeMap<i64, ActivityItem>,
    favorites: BTreeMap<i64, ActivityItem>,
    lists: BTreeMap<i64, List>,
    list_items: BTreeMap<i64, ListItem>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn activity(&self, kind: ActivityKind) -> &BTreeMap<i64, ActivityItem> {
        match kind {
            ActivityKind::Watchlist => &self.watchlist,
            ActivityKind::Watched => &self.watched,
            ActivityKind::Favorites => &self.favorites,
        }
    }

    fn activity_mut(&mut self, kind: ActivityKind) -> &mut BTreeMap<i64, ActivityItem> {
        match kind {
            ActivityKind::Watchlist => &mut self.watchlist,
            ActivityKind::Watched => &mut self.watched,
            ActivityKind::Favorites => &mut self.favorites,
        }
    }

    fn find_activity(&self, kind: ActivityKind, user_id: &str, media_id: i64) -> Option<&ActivityItem> {
        self.activity(kind)
            .values()
            .find(|a| a.user_id == user_id && a.media_id == media_id)
    }

    fn remove_activity(&mut self, kind: ActivityKind, user_id: &str, media_id: i64) {
        self.activity_mut(kind)
            .retain(|_, a| !(a.user_id == user_id && a.media_id == media_id));
    }

    fn insert_activity(
        &mut self,
        kind: ActivityKind,
        user_id: &str,
        media_id: i64,
        rating: Option<Rating>,
    ) -> ActivityItem {
        let item = ActivityItem {
            id: self.next_id(),
            kind,
            user_id: user_id.to_string(),
            media_id,
            rating,
            created_at: now(),
        };
        self.activity_mut(kind).insert(item.id, item.clone());
        item
    }

    fn media_kind(&self, media_id: i64) -> StoreResult<MediaKind> {
        self.media
            .get(&media_id)
            .map(|m| m.kind)
            .ok_or_else(|| StoreError::NotFound(format!("media {}", media_id)))
    }
}

/// Process-local store with the same invariants as the SQLite backend.
/// State lives and dies with the instance.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn get_user(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .filter(|u| u.email == email)
            .min_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)))
            .cloned())
    }

    async fn sync_user(&self, user: NewUser) -> StoreResult<User> {
        user.validate()?;
        let mut tables = self.tables.write().await;
        let stored = tables.users.entry(user.id.clone()).or_insert_with(|| User {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            photo_url: user.photo_url,
            created_at: now(),
        });
        Ok(stored.clone())
    }

    async fn update_user_profile(
        &self,
        id: &str,
        patch: UserProfilePatch,
    ) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.get_mut(id).map(|user| {
            patch.apply(user);
            user.clone()
        }))
    }
}

#[async_trait]
impl MediaRepo for MemoryStore {
    async fn get_media(&self, id: i64) -> StoreResult<Option<MediaItem>> {
        Ok(self.tables.read().await.media.get(&id).cloned())
    }

    async fn get_media_by_external_id(
        &self,
        external_id: i64,
        kind: MediaKind,
    ) -> StoreResult<Option<MediaItem>> {
        let tables = self.tables.read().await;
        Ok(tables
            .media
            .values()
            .find(|m| m.external_id == external_id && m.kind == kind)
            .cloned())
    }

    async fn create_media(&self, media: NewMediaItem) -> StoreResult<MediaItem> {
        media.validate()?;
        let mut tables = self.tables.write().await;
        if tables
            .media
            .values()
            .any(|m| m.external_id == media.external_id && m.kind == media.kind)
        {
            return Err(StoreError::Conflict(format!(
                "media {} ({}) already exists",
                media.external_id, media.kind
            )));
        }

        let id = tables.next_id();
        let media = media.into_media(id, now());
        tables.media.insert(id, media.clone());
        Ok(media)
    }
}

#[async_trait]
impl ActivityRepo for MemoryStore {
    async fn list_activity(
        &self,
        kind: ActivityKind,
        user_id: &str,
    ) -> StoreResult<Vec<ActivityEntry>> {
        let tables = self.tables.read().await;
        let mut entries: Vec<ActivityEntry> = tables
            .activity(kind)
            .values()
            .filter(|a| a.user_id == user_id)
            .filter_map(|a| {
                tables.media.get(&a.media_id).map(|media| ActivityEntry {
                    item: a.clone(),
                    media: media.clone(),
                })
            })
            .collect();
        entries.sort_by_key(|e| (Reverse(e.item.created_at), Reverse(e.item.id)));
        Ok(entries)
    }

    async fn add_activity(
        &self,
        kind: ActivityKind,
        user_id: &str,
        media_id: i64,
        rating: Option<Rating>,
    ) -> StoreResult<ActivityItem> {
        require_user(user_id)?;
        if rating.is_some() && kind != ActivityKind::Watched {
            return Err(StoreError::Validation(format!(
                "{} entries do not carry a rating",
                kind
            )));
        }

        let mut tables = self.tables.write().await;
        tables.media_kind(media_id)?;
        if tables.find_activity(kind, user_id, media_id).is_some() {
            return Err(StoreError::Conflict(format!(
                "media {} is already in {} for {}",
                media_id, kind, user_id
            )));
        }
        Ok(tables.insert_activity(kind, user_id, media_id, rating))
    }

    async fn remove_activity(
        &self,
        kind: ActivityKind,
        user_id: &str,
        media_id: i64,
    ) -> StoreResult<()> {
        self.tables
            .write()
            .await
            .remove_activity(kind, user_id, media_id);
        Ok(())
    }

    async fn has_activity(
        &self,
        kind: ActivityKind,
        user_id: &str,
        media_id: i64,
    ) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.find_activity(kind, user_id, media_id).is_some())
    }

    async fn rate_watched(
        &self,
        user_id: &str,
        media_id: i64,
        rating: Option<Rating>,
    ) -> StoreResult<ActivityItem> {
        require_user(user_id)?;
        let mut tables = self.tables.write().await;
        tables.media_kind(media_id)?;
        tables.remove_activity(ActivityKind::Watched, user_id, media_id);
        Ok(tables.insert_activity(ActivityKind::Watched, user_id, media_id, rating))
    }
}

#[async_trait]
impl ListRepo for MemoryStore {
    async fn lists_by_user(&self, user_id: &str) -> StoreResult<Vec<List>> {
        let tables = self.tables.read().await;
        let mut lists: Vec<List> = tables
            .lists
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        lists.sort_by_key(|l| (Reverse(l.created_at), Reverse(l.id)));
        Ok(lists)
    }

    async fn get_list(&self, list_id: i64) -> StoreResult<Option<List>> {
        Ok(self.tables.read().await.lists.get(&list_id).cloned())
    }

    async fn get_list_with_items(
        &self,
        list_id: i64,
        viewer_id: Option<&str>,
    ) -> StoreResult<Option<ListWithItems>> {
        let tables = self.tables.read().await;
        let Some(list) = tables.lists.get(&list_id).cloned() else {
            return Ok(None);
        };

        let mut items: Vec<ListItemView> = tables
            .list_items
            .values()
            .filter(|li| li.list_id == list_id)
            .filter_map(|li| {
                let media = tables.media.get(&li.media_id)?.clone();
                let viewer_rating = viewer_id
                    .and_then(|viewer| tables.find_activity(ActivityKind::Watched, viewer, li.media_id))
                    .and_then(|w| w.rating);
                Some(ListItemView {
                    item: li.clone(),
                    media,
                    viewer_rating,
                })
            })
            .collect();
        items.sort_by_key(|v| (v.item.created_at, v.item.id));

        Ok(Some(ListWithItems { list, items }))
    }

    async fn create_list(&self, list: NewList) -> StoreResult<List> {
        list.validate()?;
        let mut tables = self.tables.write().await;
        let list = List {
            id: tables.next_id(),
            user_id: list.user_id,
            name: list.name,
            description: list.description,
            is_public: list.is_public,
            created_at: now(),
        };
        tables.lists.insert(list.id, list.clone());
        Ok(list)
    }

    async fn update_list(&self, list_id: i64, patch: ListPatch) -> StoreResult<Option<List>> {
        patch.validate()?;
        let mut tables = self.tables.write().await;
        Ok(tables.lists.get_mut(&list_id).map(|list| {
            patch.apply(list);
            list.clone()
        }))
    }

    async fn delete_list(&self, list_id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.list_items.retain(|_, li| li.list_id != list_id);
        tables.lists.remove(&list_id);
        Ok(())
    }

    async fn add_item_to_list(&self, item: NewListItem) -> StoreResult<ListItem> {
        let mut tables = self.tables.write().await;
        if !tables.lists.contains_key(&item.list_id) {
            return Err(StoreError::NotFound(format!("list {}", item.list_id)));
        }
        let kind = tables.media_kind(item.media_id)?;
        check_seasons(kind, item.seasons_watched)?;
        if tables
            .list_items
            .values()
            .any(|li| li.list_id == item.list_id && li.media_id == item.media_id)
        {
            return Err(StoreError::Conflict(
                "item already exists in this list".to_string(),
            ));
        }

        let stored = ListItem {
            id: tables.next_id(),
            list_id: item.list_id,
            media_id: item.media_id,
            status: item.status,
            seasons_watched: item.seasons_watched,
            created_at: now(),
        };
        tables.list_items.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_list_item(
        &self,
        list_item_id: i64,
        patch: ListItemPatch,
    ) -> StoreResult<Option<ListItem>> {
        let mut tables = self.tables.write().await;
        let Some(current) = tables.list_items.get(&list_item_id) else {
            return Ok(None);
        };
        let kind = tables.media_kind(current.media_id)?;

        let mut updated = current.clone();
        patch.apply(&mut updated);
        check_seasons(kind, updated.seasons_watched)?;

        tables.list_items.insert(list_item_id, updated.clone());
        Ok(Some(updated))
    }

    async fn remove_item_from_list(&self, list_id: i64, media_id: i64) -> StoreResult<()> {
        self.tables
            .write()
            .await
            .list_items
            .retain(|_, li| !(li.list_id == list_id && li.media_id == media_id));
        Ok(())
    }

    async fn recent_list_additions(
        &self,
        user_id: &str,
        limit: usize,
    ) -> StoreResult<Vec<ListAddition>> {
        let tables = self.tables.read().await;
        let mut additions: Vec<ListAddition> = tables
            .list_items
            .values()
            .filter_map(|li| {
                let list = tables.lists.get(&li.list_id)?;
                if list.user_id != user_id {
                    return None;
                }
                Some(ListAddition {
                    item: li.clone(),
                    list_name: list.name.clone(),
                    media: tables.media.get(&li.media_id)?.clone(),
                })
            })
            .collect();
        additions.sort_by_key(|a| (Reverse(a.item.created_at), Reverse(a.item.id)));
        additions.truncate(limit);
        Ok(additions)
    }
}

impl StatsRepo for MemoryStore {}

#[async_trait]
impl Store for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
