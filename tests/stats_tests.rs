//! Integration tests for stats, recent activity and the user store.

mod common;

use cinelog::models::{
    ActivityEventKind, ActivityKind, NewList, NewListItem, NewUser, Rating, UserProfilePatch,
};
use cinelog::stats::WatchtimeEstimate;
use cinelog::StoreError;
use common::{movie, movie_with_runtime, run_store_test_both, tick, tv};
use tokio_test::{assert_err, assert_ok};

fn new_user(id: &str, email: &str) -> NewUser {
    NewUser {
        id: id.to_string(),
        email: email.to_string(),
        display_name: None,
        photo_url: None,
    }
}

#[tokio::test]
async fn test_stats_without_watched_rows() {
    run_store_test_both(|store| async move {
        let matrix = movie(store.as_ref(), 603, "The Matrix").await;
        assert_ok!(
            store
                .add_activity(ActivityKind::Watchlist, "u1", matrix.id, None)
                .await
        );

        let stats = assert_ok!(store.user_stats("u1").await);
        assert_eq!(stats.movies_watched, 0);
        assert_eq!(stats.tv_shows_watched, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.total_watchtime_hours, 0.0);
    })
    .await;
}

#[tokio::test]
async fn test_stats_counts_ratings_and_watchtime() {
    run_store_test_both(|store| async move {
        let matrix = movie_with_runtime(store.as_ref(), 603, "The Matrix", 136).await;
        let unknown = movie(store.as_ref(), 1, "No Runtime").await;
        let show = tv(store.as_ref(), 1396, "Short Show", Some(45), Some(10)).await;

        assert_ok!(
            store
                .add_activity(
                    ActivityKind::Watched,
                    "u1",
                    matrix.id,
                    Some(Rating::new(8).unwrap())
                )
                .await
        );
        assert_ok!(
            store
                .add_activity(
                    ActivityKind::Watched,
                    "u1",
                    show.id,
                    Some(Rating::new(5).unwrap())
                )
                .await
        );
        assert_ok!(
            store
                .add_activity(ActivityKind::Watched, "u1", unknown.id, None)
                .await
        );
        // Another user's rows never leak in.
        assert_ok!(
            store
                .add_activity(
                    ActivityKind::Watched,
                    "u2",
                    matrix.id,
                    Some(Rating::new(1).unwrap())
                )
                .await
        );

        let stats = assert_ok!(store.user_stats("u1").await);
        assert_eq!(stats.movies_watched, 2);
        assert_eq!(stats.tv_shows_watched, 1);
        assert_eq!(stats.average_rating, 6.5);
        let expected_hours = (136.0 + 450.0 + 120.0) / 60.0;
        assert!((stats.total_watchtime_hours - expected_hours).abs() < 1e-9);

        let custom = WatchtimeEstimate {
            movie_minutes: 90,
            episode_minutes: 30,
        };
        let stats = assert_ok!(store.user_stats_with("u1", &custom).await);
        let expected_hours = (136.0 + 450.0 + 90.0) / 60.0;
        assert!((stats.total_watchtime_hours - expected_hours).abs() < 1e-9);
    })
    .await;
}

#[tokio::test]
async fn test_stats_survive_oversized_runtimes() {
    run_store_test_both(|store| async move {
        let show = tv(store.as_ref(), 42, "Endless", Some(i64::MAX / 2), Some(3)).await;
        assert_ok!(
            store
                .add_activity(ActivityKind::Watched, "u1", show.id, None)
                .await
        );

        let stats = assert_ok!(store.user_stats("u1").await);
        assert_eq!(stats.tv_shows_watched, 1);
        assert!(stats.total_watchtime_hours.is_finite());
        assert!(stats.total_watchtime_hours > 0.0);
    })
    .await;
}

#[tokio::test]
async fn test_recent_activity_merges_sources_newest_first() {
    run_store_test_both(|store| async move {
        let matrix = movie(store.as_ref(), 603, "The Matrix").await;
        let alien = movie(store.as_ref(), 348, "Alien").await;
        let dune = movie(store.as_ref(), 693134, "Dune: Part Two").await;
        let ignored = movie(store.as_ref(), 1, "Only On Watchlist").await;

        assert_ok!(
            store
                .add_activity(ActivityKind::Watched, "u1", matrix.id, None)
                .await
        );
        tick().await;
        assert_ok!(
            store
                .add_activity(ActivityKind::Favorites, "u1", alien.id, None)
                .await
        );
        tick().await;
        let list = assert_ok!(store.create_list(NewList::new("u1", "Sci-fi")).await);
        assert_ok!(store.add_item_to_list(NewListItem::new(list.id, dune.id)).await);
        tick().await;
        assert_ok!(
            store
                .add_activity(ActivityKind::Watchlist, "u1", ignored.id, None)
                .await
        );

        let events = assert_ok!(store.recent_activity("u1", 10).await);
        let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ActivityEventKind::AddedToList,
                ActivityEventKind::Favorited,
                ActivityEventKind::Watched,
            ]
        );
        assert_eq!(events[0].media, dune);
        assert_eq!(events[0].list_id, Some(list.id));
        assert_eq!(events[0].list_name.as_deref(), Some("Sci-fi"));
        assert_eq!(events[1].media, alien);
        assert_eq!(events[2].media, matrix);
        assert!(events.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
        assert!(events.iter().all(|e| e.media.id != ignored.id));

        let truncated = assert_ok!(store.recent_activity("u1", 2).await);
        assert_eq!(truncated, events[..2].to_vec());

        assert!(assert_ok!(store.recent_activity("u1", 0).await).is_empty());
        assert!(assert_ok!(store.recent_activity("nobody", 10).await).is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_recent_list_additions_only_from_own_lists() {
    run_store_test_both(|store| async move {
        let matrix = movie(store.as_ref(), 603, "The Matrix").await;
        let mine = assert_ok!(store.create_list(NewList::new("u1", "Mine")).await);
        let theirs = assert_ok!(store.create_list(NewList::new("u2", "Theirs")).await);
        assert_ok!(store.add_item_to_list(NewListItem::new(mine.id, matrix.id)).await);
        assert_ok!(store.add_item_to_list(NewListItem::new(theirs.id, matrix.id)).await);

        let additions = assert_ok!(store.recent_list_additions("u1", 10).await);
        assert_eq!(additions.len(), 1);
        assert_eq!(additions[0].list_name, "Mine");
        assert_eq!(additions[0].media, matrix);
    })
    .await;
}

#[tokio::test]
async fn test_sync_user_is_idempotent() {
    run_store_test_both(|store| async move {
        let mut first = new_user("uid-1", "ana@example.com");
        first.display_name = Some("Ana".to_string());
        let created = assert_ok!(store.sync_user(first).await);

        let again = assert_ok!(store.sync_user(new_user("uid-1", "other@example.com")).await);
        assert_eq!(again, created);
        assert_eq!(again.display_name.as_deref(), Some("Ana"));

        let by_email = assert_ok!(store.get_user_by_email("ana@example.com").await);
        assert_eq!(by_email, Some(created.clone()));
        assert_eq!(assert_ok!(store.get_user("uid-1").await), Some(created));
        assert_eq!(assert_ok!(store.get_user("uid-2").await), None);
        assert_eq!(
            assert_ok!(store.get_user_by_email("nobody@example.com").await),
            None
        );
    })
    .await;
}

#[tokio::test]
async fn test_sync_user_validates_input() {
    run_store_test_both(|store| async move {
        let err = assert_err!(store.sync_user(new_user("uid-1", "not-an-email")).await);
        assert!(matches!(err, StoreError::Validation(_)));

        let err = assert_err!(store.sync_user(new_user(" ", "ana@example.com")).await);
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(assert_ok!(store.get_user(" ").await), None);
    })
    .await;
}

#[tokio::test]
async fn test_update_user_profile() {
    run_store_test_both(|store| async move {
        let mut user = new_user("uid-1", "ana@example.com");
        user.photo_url = Some("https://example.com/a.png".to_string());
        assert_ok!(store.sync_user(user).await);

        let updated = assert_ok!(
            store
                .update_user_profile(
                    "uid-1",
                    UserProfilePatch {
                        display_name: Some(Some("Ana B.".to_string())),
                        photo_url: Some(None),
                    }
                )
                .await
        )
        .expect("user should exist");
        assert_eq!(updated.display_name.as_deref(), Some("Ana B."));
        assert_eq!(updated.photo_url, None);
        assert_eq!(updated.email, "ana@example.com");
        assert_eq!(assert_ok!(store.get_user("uid-1").await), Some(updated));

        let missing = assert_ok!(
            store
                .update_user_profile("uid-2", UserProfilePatch::default())
                .await
        );
        assert_eq!(missing, None);
    })
    .await;
}
