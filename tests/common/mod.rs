//! Shared helpers for store integration tests.
#![allow(dead_code)]

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use cinelog::models::{MediaItem, MediaKind, NewMediaItem};
use cinelog::{MemoryStore, SqliteStore, Store};

/// Runs the same scenario against a fresh on-disk SQLite store and a fresh memory store.
pub async fn run_store_test_both<F, Fut>(test_fn: F)
where
    F: Fn(Arc<dyn Store>) -> Fut + Clone,
    Fut: Future<Output = ()>,
{
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let sqlite = SqliteStore::open(temp_dir.path().join("test.db"))
        .await
        .expect("Failed to open SQLite store");
    test_fn.clone()(Arc::new(sqlite)).await;

    test_fn(Arc::new(MemoryStore::new())).await;
}

pub async fn movie(store: &dyn Store, external_id: i64, title: &str) -> MediaItem {
    store
        .resolve_media(NewMediaItem::new(external_id, MediaKind::Movie, title))
        .await
        .expect("Failed to catalog movie")
}

pub async fn movie_with_runtime(
    store: &dyn Store,
    external_id: i64,
    title: &str,
    runtime: i64,
) -> MediaItem {
    let mut media = NewMediaItem::new(external_id, MediaKind::Movie, title);
    media.runtime = Some(runtime);
    store
        .resolve_media(media)
        .await
        .expect("Failed to catalog movie")
}

pub async fn tv(
    store: &dyn Store,
    external_id: i64,
    title: &str,
    runtime: Option<i64>,
    episodes: Option<i64>,
) -> MediaItem {
    let mut media = NewMediaItem::new(external_id, MediaKind::Tv, title);
    media.runtime = runtime;
    media.episode_count = episodes;
    store
        .resolve_media(media)
        .await
        .expect("Failed to catalog show")
}

/// Sleeps long enough that the next write gets a strictly later timestamp.
pub async fn tick() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}
