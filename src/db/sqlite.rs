use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Type, ValueRef};
use rusqlite::{params, OptionalExtension, Row, ToSql};
use tokio_rusqlite::Connection;

use super::schema::SCHEMA;
use super::{now, require_user, ActivityRepo, ListRepo, MediaRepo, StatsRepo, Store, UserRepo};
use crate::error::{StoreError, StoreResult};
use crate::models::{
    check_seasons, ActivityEntry, ActivityItem, ActivityKind, List, ListAddition, ListItem,
    ListItemPatch, ListItemStatus, ListItemView, ListPatch, ListWithItems, MediaItem, MediaKind,
    NewList, NewListItem, NewMediaItem, NewUser, Rating, User, UserProfilePatch,
};

const USER_COLUMNS: &str = "id, email, display_name, photo_url, created_at";

const MEDIA_COLUMNS: &str = "m.id, m.external_id, m.kind, m.title, m.poster_path, \
    m.backdrop_path, m.overview, m.release_date, m.vote_average, m.episode_count, \
    m.runtime, m.created_at";

const LIST_COLUMNS: &str = "l.id, l.user_id, l.name, l.description, l.is_public, l.created_at";

const ITEM_COLUMNS: &str =
    "li.id, li.list_id, li.media_id, li.status, li.seasons_watched, li.created_at";

/// SQLite-backed store. All statements run on one background connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path).await?;
        let store = Self::init(conn).await?;
        tracing::info!("Opened SQLite store at {}", path.display());
        Ok(store)
    }

    pub async fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().await?;
        Self::init(conn).await
    }

    async fn init(conn: Connection) -> StoreResult<Self> {
        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl UserRepo for SqliteStore {
    async fn get_user(&self, id: &str) -> StoreResult<Option<User>> {
        let id = id.to_string();
        let user = self
            .conn
            .call(move |conn| {
                let user = conn
                    .query_row(
                        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                        params![id],
                        user_from_row,
                    )
                    .optional()?;
                Ok(user)
            })
            .await?;
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let email = email.to_string();
        let user = self
            .conn
            .call(move |conn| {
                let user = conn
                    .query_row(
                        &format!(
                            "SELECT {USER_COLUMNS} FROM users WHERE email = ?1 ORDER BY created_at, id LIMIT 1"
                        ),
                        params![email],
                        user_from_row,
                    )
                    .optional()?;
                Ok(user)
            })
            .await?;
        Ok(user)
    }

    async fn sync_user(&self, user: NewUser) -> StoreResult<User> {
        user.validate()?;
        let created_at = format_ts(&now());
        let stored = self
            .conn
            .call(move |conn| {
                conn.execute(
                    r#"INSERT INTO users (id, email, display_name, photo_url, created_at)
                       VALUES (?1, ?2, ?3, ?4, ?5)
                       ON CONFLICT(id) DO NOTHING"#,
                    params![user.id, user.email, user.display_name, user.photo_url, created_at],
                )?;
                let stored = conn.query_row(
                    &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                    params![user.id],
                    user_from_row,
                )?;
                Ok(stored)
            })
            .await?;
        Ok(stored)
    }

    async fn update_user_profile(
        &self,
        id: &str,
        patch: UserProfilePatch,
    ) -> StoreResult<Option<User>> {
        let id = id.to_string();
        let user = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let Some(mut user) = tx
                    .query_row(
                        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                        params![id],
                        user_from_row,
                    )
                    .optional()?
                else {
                    return Ok(None);
                };

                patch.apply(&mut user);
                tx.execute(
                    "UPDATE users SET display_name = ?1, photo_url = ?2 WHERE id = ?3",
                    params![user.display_name, user.photo_url, user.id],
                )?;
                tx.commit()?;
                Ok(Some(user))
            })
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl MediaRepo for SqliteStore {
    async fn get_media(&self, id: i64) -> StoreResult<Option<MediaItem>> {
        let media = self
            .conn
            .call(move |conn| {
                let media = conn
                    .query_row(
                        &format!("SELECT {MEDIA_COLUMNS} FROM media_items m WHERE m.id = ?1"),
                        params![id],
                        |row| media_from_row(row, 0),
                    )
                    .optional()?;
                Ok(media)
            })
            .await?;
        Ok(media)
    }

    async fn get_media_by_external_id(
        &self,
        external_id: i64,
        kind: MediaKind,
    ) -> StoreResult<Option<MediaItem>> {
        let media = self
            .conn
            .call(move |conn| {
                let media = conn
                    .query_row(
                        &format!(
                            "SELECT {MEDIA_COLUMNS} FROM media_items m WHERE m.external_id = ?1 AND m.kind = ?2"
                        ),
                        params![external_id, kind],
                        |row| media_from_row(row, 0),
                    )
                    .optional()?;
                Ok(media)
            })
            .await?;
        Ok(media)
    }

    async fn create_media(&self, media: NewMediaItem) -> StoreResult<MediaItem> {
        media.validate()?;
        let (external_id, kind) = (media.external_id, media.kind);
        let created_at = now();
        let media = self
            .conn
            .call(move |conn| {
                conn.execute(
                    r#"INSERT INTO media_items (external_id, kind, title, poster_path, backdrop_path,
                                               overview, release_date, vote_average, episode_count,
                                               runtime, created_at)
                       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"#,
                    params![
                        media.external_id,
                        media.kind,
                        media.title,
                        media.poster_path,
                        media.backdrop_path,
                        media.overview,
                        media.release_date,
                        media.vote_average,
                        media.episode_count,
                        media.runtime,
                        format_ts(&created_at),
                    ],
                )?;
                Ok(media.into_media(conn.last_insert_rowid(), created_at))
            })
            .await
            .map_err(|e| {
                StoreError::from_insert(
                    e,
                    format!("media {} ({}) already exists", external_id, kind),
                )
            })?;

        tracing::debug!("Cataloged media {} ({}) as {}", external_id, kind, media.id);
        Ok(media)
    }
}

#[async_trait]
impl ActivityRepo for SqliteStore {
    async fn list_activity(
        &self,
        kind: ActivityKind,
        user_id: &str,
    ) -> StoreResult<Vec<ActivityEntry>> {
        let user_id = user_id.to_string();
        let rating = match kind {
            ActivityKind::Watched => "a.rating",
            _ => "NULL",
        };
        let sql = format!(
            r#"SELECT a.id, a.user_id, a.media_id, {rating}, a.created_at, {MEDIA_COLUMNS}
               FROM {table} a
               JOIN media_items m ON m.id = a.media_id
               WHERE a.user_id = ?1
               ORDER BY a.created_at DESC, a.id DESC"#,
            table = kind.table(),
        );

        let entries = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                let entries = stmt
                    .query_map(params![user_id], |row| activity_from_row(row, kind))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(entries)
            })
            .await?;
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

        let owner = user_id.to_string();
        let created_at = now();
        let item = self
            .conn
            .call(move |conn| {
                if media_kind(conn, media_id)?.is_none() {
                    return Ok(None);
                }
                let id = insert_activity(conn, kind, &owner, media_id, rating, &created_at)?;
                Ok(Some(ActivityItem {
                    id,
                    kind,
                    user_id: owner,
                    media_id,
                    rating,
                    created_at,
                }))
            })
            .await
            .map_err(|e| {
                StoreError::from_insert(
                    e,
                    format!("media {} is already in {} for {}", media_id, kind, user_id),
                )
            })?;

        item.ok_or_else(|| StoreError::NotFound(format!("media {}", media_id)))
    }

    async fn remove_activity(
        &self,
        kind: ActivityKind,
        user_id: &str,
        media_id: i64,
    ) -> StoreResult<()> {
        let user_id = user_id.to_string();
        let sql = format!(
            "DELETE FROM {} WHERE user_id = ?1 AND media_id = ?2",
            kind.table()
        );
        self.conn
            .call(move |conn| {
                conn.execute(&sql, params![user_id, media_id])?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    async fn has_activity(
        &self,
        kind: ActivityKind,
        user_id: &str,
        media_id: i64,
    ) -> StoreResult<bool> {
        let user_id = user_id.to_string();
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE user_id = ?1 AND media_id = ?2)",
            kind.table()
        );
        let exists = self
            .conn
            .call(move |conn| {
                let exists: bool = conn.query_row(&sql, params![user_id, media_id], |row| row.get(0))?;
                Ok(exists)
            })
            .await?;
        Ok(exists)
    }

    async fn rate_watched(
        &self,
        user_id: &str,
        media_id: i64,
        rating: Option<Rating>,
    ) -> StoreResult<ActivityItem> {
        require_user(user_id)?;
        let owner = user_id.to_string();
        let created_at = now();
        let item = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                if media_kind(&tx, media_id)?.is_none() {
                    return Ok(None);
                }
                // Ratings are immutable per row: replace rather than update.
                tx.execute(
                    "DELETE FROM watched_items WHERE user_id = ?1 AND media_id = ?2",
                    params![owner, media_id],
                )?;
                let id = insert_activity(
                    &tx,
                    ActivityKind::Watched,
                    &owner,
                    media_id,
                    rating,
                    &created_at,
                )?;
                tx.commit()?;
                Ok(Some(ActivityItem {
                    id,
                    kind: ActivityKind::Watched,
                    user_id: owner,
                    media_id,
                    rating,
                    created_at,
                }))
            })
            .await?;

        item.ok_or_else(|| StoreError::NotFound(format!("media {}", media_id)))
    }
}

#[async_trait]
impl ListRepo for SqliteStore {
    async fn lists_by_user(&self, user_id: &str) -> StoreResult<Vec<List>> {
        let user_id = user_id.to_string();
        let lists = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {LIST_COLUMNS} FROM lists l WHERE l.user_id = ?1 ORDER BY l.created_at DESC, l.id DESC"
                ))?;
                let lists = stmt
                    .query_map(params![user_id], |row| list_from_row(row, 0))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(lists)
            })
            .await?;
        Ok(lists)
    }

    async fn get_list(&self, list_id: i64) -> StoreResult<Option<List>> {
        let list = self
            .conn
            .call(move |conn| {
                let list = conn
                    .query_row(
                        &format!("SELECT {LIST_COLUMNS} FROM lists l WHERE l.id = ?1"),
                        params![list_id],
                        |row| list_from_row(row, 0),
                    )
                    .optional()?;
                Ok(list)
            })
            .await?;
        Ok(list)
    }

    async fn get_list_with_items(
        &self,
        list_id: i64,
        viewer_id: Option<&str>,
    ) -> StoreResult<Option<ListWithItems>> {
        let viewer = viewer_id.map(str::to_string);
        let list = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let Some(list) = tx
                    .query_row(
                        &format!("SELECT {LIST_COLUMNS} FROM lists l WHERE l.id = ?1"),
                        params![list_id],
                        |row| list_from_row(row, 0),
                    )
                    .optional()?
                else {
                    return Ok(None);
                };

                // A NULL viewer never matches, leaving every viewer_rating empty.
                let items = {
                    let mut stmt = tx.prepare(&format!(
                        r#"SELECT {ITEM_COLUMNS}, {MEDIA_COLUMNS}, w.rating
                           FROM list_items li
                           JOIN media_items m ON m.id = li.media_id
                           LEFT JOIN watched_items w ON w.media_id = li.media_id AND w.user_id = ?2
                           WHERE li.list_id = ?1
                           ORDER BY li.created_at ASC, li.id ASC"#
                    ))?;
                    let items = stmt
                        .query_map(params![list_id, viewer], |row| {
                            Ok(ListItemView {
                                item: list_item_from_row(row, 0)?,
                                media: media_from_row(row, 6)?,
                                viewer_rating: row.get(18)?,
                            })
                        })?
                        .collect::<std::result::Result<Vec<_>, _>>()?;
                    items
                };
                tx.commit()?;

                Ok(Some(ListWithItems { list, items }))
            })
            .await?;
        Ok(list)
    }

    async fn create_list(&self, list: NewList) -> StoreResult<List> {
        list.validate()?;
        let created_at = now();
        let list = self
            .conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO lists (user_id, name, description, is_public, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        list.user_id,
                        list.name,
                        list.description,
                        list.is_public,
                        format_ts(&created_at),
                    ],
                )?;
                Ok(List {
                    id: conn.last_insert_rowid(),
                    user_id: list.user_id,
                    name: list.name,
                    description: list.description,
                    is_public: list.is_public,
                    created_at,
                })
            })
            .await?;

        tracing::debug!("Created list {} for {}", list.id, list.user_id);
        Ok(list)
    }

    async fn update_list(&self, list_id: i64, patch: ListPatch) -> StoreResult<Option<List>> {
        patch.validate()?;
        let list = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let Some(mut list) = tx
                    .query_row(
                        &format!("SELECT {LIST_COLUMNS} FROM lists l WHERE l.id = ?1"),
                        params![list_id],
                        |row| list_from_row(row, 0),
                    )
                    .optional()?
                else {
                    return Ok(None);
                };
                if patch.is_empty() {
                    return Ok(Some(list));
                }

                patch.apply(&mut list);
                tx.execute(
                    "UPDATE lists SET name = ?1, description = ?2, is_public = ?3 WHERE id = ?4",
                    params![list.name, list.description, list.is_public, list.id],
                )?;
                tx.commit()?;
                Ok(Some(list))
            })
            .await?;
        Ok(list)
    }

    async fn delete_list(&self, list_id: i64) -> StoreResult<()> {
        let (items, lists) = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let items = tx.execute("DELETE FROM list_items WHERE list_id = ?1", params![list_id])?;
                let lists = tx.execute("DELETE FROM lists WHERE id = ?1", params![list_id])?;
                tx.commit()?;
                Ok((items, lists))
            })
            .await?;

        tracing::debug!("Deleted {} list(s) with id {} and {} item(s)", lists, list_id, items);
        Ok(())
    }

    async fn add_item_to_list(&self, item: NewListItem) -> StoreResult<ListItem> {
        let NewListItem {
            list_id,
            media_id,
            status,
            seasons_watched,
        } = item;
        let created_at = now();

        let outcome = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let list_exists: bool = tx.query_row(
                    "SELECT EXISTS(SELECT 1 FROM lists WHERE id = ?1)",
                    params![list_id],
                    |row| row.get(0),
                )?;
                if !list_exists {
                    return Ok(Err(StoreError::NotFound(format!("list {}", list_id))));
                }
                let Some(kind) = media_kind(&tx, media_id)? else {
                    return Ok(Err(StoreError::NotFound(format!("media {}", media_id))));
                };
                if let Err(e) = check_seasons(kind, seasons_watched) {
                    return Ok(Err(e));
                }

                tx.execute(
                    r#"INSERT INTO list_items (list_id, media_id, status, seasons_watched, created_at)
                       VALUES (?1, ?2, ?3, ?4, ?5)"#,
                    params![list_id, media_id, status, seasons_watched, format_ts(&created_at)],
                )?;
                let id = tx.last_insert_rowid();
                tx.commit()?;

                Ok(Ok(ListItem {
                    id,
                    list_id,
                    media_id,
                    status,
                    seasons_watched,
                    created_at,
                }))
            })
            .await
            .map_err(|e| StoreError::from_insert(e, "item already exists in this list"))?;

        outcome
    }

    async fn update_list_item(
        &self,
        list_item_id: i64,
        patch: ListItemPatch,
    ) -> StoreResult<Option<ListItem>> {
        let outcome = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let Some((mut item, kind)) = tx
                    .query_row(
                        &format!(
                            r#"SELECT {ITEM_COLUMNS}, m.kind
                               FROM list_items li
                               JOIN media_items m ON m.id = li.media_id
                               WHERE li.id = ?1"#
                        ),
                        params![list_item_id],
                        |row| Ok((list_item_from_row(row, 0)?, row.get::<_, MediaKind>(6)?)),
                    )
                    .optional()?
                else {
                    return Ok(Ok(None));
                };
                if patch.is_empty() {
                    return Ok(Ok(Some(item)));
                }

                patch.apply(&mut item);
                if let Err(e) = check_seasons(kind, item.seasons_watched) {
                    return Ok(Err(e));
                }
                tx.execute(
                    "UPDATE list_items SET status = ?1, seasons_watched = ?2 WHERE id = ?3",
                    params![item.status, item.seasons_watched, item.id],
                )?;
                tx.commit()?;
                Ok(Ok(Some(item)))
            })
            .await?;

        outcome
    }

    async fn remove_item_from_list(&self, list_id: i64, media_id: i64) -> StoreResult<()> {
        self.conn
            .call(move |conn| {
                conn.execute(
                    "DELETE FROM list_items WHERE list_id = ?1 AND media_id = ?2",
                    params![list_id, media_id],
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    async fn recent_list_additions(
        &self,
        user_id: &str,
        limit: usize,
    ) -> StoreResult<Vec<ListAddition>> {
        let user_id = user_id.to_string();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let additions = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    r#"SELECT {ITEM_COLUMNS}, l.name, {MEDIA_COLUMNS}
                       FROM list_items li
                       JOIN lists l ON l.id = li.list_id
                       JOIN media_items m ON m.id = li.media_id
                       WHERE l.user_id = ?1
                       ORDER BY li.created_at DESC, li.id DESC
                       LIMIT ?2"#
                ))?;
                let additions = stmt
                    .query_map(params![user_id, limit], |row| {
                        Ok(ListAddition {
                            item: list_item_from_row(row, 0)?,
                            list_name: row.get(6)?,
                            media: media_from_row(row, 7)?,
                        })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(additions)
            })
            .await?;
        Ok(additions)
    }
}

impl StatsRepo for SqliteStore {}

#[async_trait]
impl Store for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.conn
            .call(|conn| {
                conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
                Ok(())
            })
            .await?;
        Ok(())
    }
}

fn media_kind(conn: &rusqlite::Connection, media_id: i64) -> rusqlite::Result<Option<MediaKind>> {
    conn.query_row(
        "SELECT kind FROM media_items WHERE id = ?1",
        params![media_id],
        |row| row.get(0),
    )
    .optional()
}

fn insert_activity(
    conn: &rusqlite::Connection,
    kind: ActivityKind,
    user_id: &str,
    media_id: i64,
    rating: Option<Rating>,
    created_at: &DateTime<Utc>,
) -> rusqlite::Result<i64> {
    let created_at = format_ts(created_at);
    match kind {
        ActivityKind::Watched => conn.execute(
            "INSERT INTO watched_items (user_id, media_id, rating, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![user_id, media_id, rating, created_at],
        )?,
        _ => conn.execute(
            &format!(
                "INSERT INTO {} (user_id, media_id, created_at) VALUES (?1, ?2, ?3)",
                kind.table()
            ),
            params![user_id, media_id, created_at],
        )?,
    };
    Ok(conn.last_insert_rowid())
}

/// Fixed-width UTC text, so column order matches time order.
fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn ts_at(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        display_name: row.get(2)?,
        photo_url: row.get(3)?,
        created_at: ts_at(row, 4)?,
    })
}

fn media_from_row(row: &Row, at: usize) -> rusqlite::Result<MediaItem> {
    Ok(MediaItem {
        id: row.get(at)?,
        external_id: row.get(at + 1)?,
        kind: row.get(at + 2)?,
        title: row.get(at + 3)?,
        poster_path: row.get(at + 4)?,
        backdrop_path: row.get(at + 5)?,
        overview: row.get(at + 6)?,
        release_date: row.get(at + 7)?,
        vote_average: row.get(at + 8)?,
        episode_count: row.get(at + 9)?,
        runtime: row.get(at + 10)?,
        created_at: ts_at(row, at + 11)?,
    })
}

fn activity_from_row(row: &Row, kind: ActivityKind) -> rusqlite::Result<ActivityEntry> {
    Ok(ActivityEntry {
        item: ActivityItem {
            id: row.get(0)?,
            kind,
            user_id: row.get(1)?,
            media_id: row.get(2)?,
            rating: row.get(3)?,
            created_at: ts_at(row, 4)?,
        },
        media: media_from_row(row, 5)?,
    })
}

fn list_from_row(row: &Row, at: usize) -> rusqlite::Result<List> {
    Ok(List {
        id: row.get(at)?,
        user_id: row.get(at + 1)?,
        name: row.get(at + 2)?,
        description: row.get(at + 3)?,
        is_public: row.get(at + 4)?,
        created_at: ts_at(row, at + 5)?,
    })
}

fn list_item_from_row(row: &Row, at: usize) -> rusqlite::Result<ListItem> {
    Ok(ListItem {
        id: row.get(at)?,
        list_id: row.get(at + 1)?,
        media_id: row.get(at + 2)?,
        status: row.get(at + 3)?,
        seasons_watched: row.get(at + 4)?,
        created_at: ts_at(row, at + 5)?,
    })
}

fn conversion_error(err: StoreError) -> FromSqlError {
    FromSqlError::Other(Box::new(err))
}

impl ToSql for MediaKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for MediaKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(conversion_error)
    }
}

impl ToSql for ListItemStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ListItemStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(conversion_error)
    }
}

impl ToSql for Rating {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(i64::from(*self)))
    }
}

impl FromSql for Rating {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Rating::new(value.as_i64()?).map_err(conversion_error)
    }
}
