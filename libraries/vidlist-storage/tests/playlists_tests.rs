//! Integration tests for the playlist store
//!
//! Tests playlist operations including:
//! - CRUD against a file-backed blob
//! - No-op semantics for unknown ids
//! - Timestamp handling on mutation
//! - Inversion helpers used for undo
//! - Serialized access under concurrent callers


use std::sync::Arc;
use test_helpers::*;
use vidlist_core::{PlaylistId, VideoId, VidlistError};
use vidlist_storage::{EntityCodec, PlaylistStore, DEFAULT_KEY};

#[tokio::test]
async fn test_create_and_list_playlist() {
    let test_store = TestStore::new();
    let store = test_store.store();

    let playlist = store
        .create_playlist("My Favorites")
        .await
        .expect("Failed to create playlist");

    assert_eq!(playlist.name, "My Favorites");
    assert!(playlist.videos.is_empty());
    assert_eq!(playlist.created_at, playlist.updated_at);

    let playlists = store.list_playlists().await.unwrap();
    assert_eq!(playlists, vec![playlist.clone()]);

    let retrieved = store.get_playlist(&playlist.id).await.unwrap().unwrap();
    assert_eq!(retrieved, playlist);
}

#[tokio::test]
async fn test_create_trims_name() {
    let store = memory_store();

    let playlist = store.create_playlist("  Chill  ").await.unwrap();
    assert_eq!(playlist.name, "Chill");
}

#[tokio::test]
async fn test_create_rejects_blank_name() {
    let test_store = TestStore::new();
    let store = test_store.store();

    let result = store.create_playlist("   ").await;
    assert!(matches!(result, Err(VidlistError::InvalidArgument(_))));

    // Nothing was written
    assert!(test_store.backend.path_for(DEFAULT_KEY).map(|p| !p.exists()).unwrap());
    assert!(store.list_playlists().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_playlists_keep_creation_order() {
    let store = memory_store();

    let a = store.create_playlist("A").await.unwrap();
    let b = store.create_playlist("B").await.unwrap();
    let c = store.create_playlist("C").await.unwrap();

    let ids: Vec<PlaylistId> = store
        .list_playlists()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);
}

#[tokio::test]
async fn test_favorites_scenario() {
    let test_store = TestStore::new();
    let store = test_store.store();

    let favorites = store.create_playlist("Favorites").await.unwrap();
    let summary = vidlist_core::VideoSummary::new("abc", "T1", "u1", "C1");
    store
        .add_video_to_playlist(&favorites.id, &summary)
        .await
        .expect("Failed to add video");

    let playlists = store.list_playlists().await.unwrap();
    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0].name, "Favorites");
    assert_eq!(playlists[0].videos.len(), 1);

    let entry = &playlists[0].videos[0];
    assert_eq!(entry.id, VideoId::new("abc"));
    assert_eq!(entry.title, "T1");
    assert_eq!(entry.thumbnail, "u1");
    assert_eq!(entry.channel_title, "C1");
    assert_eq!(entry.duration, None);
}

#[tokio::test]
async fn test_add_video_to_missing_playlist_is_not_found() {
    let store = memory_store();
    store.create_playlist("Existing").await.unwrap();
    let before = store.list_playlists().await.unwrap();

    let result = store
        .add_video_to_playlist(&PlaylistId::new("missing"), &video("abc"))
        .await;

    assert!(matches!(result, Err(VidlistError::NotFound { .. })));
    assert_eq!(store.list_playlists().await.unwrap(), before);
}

#[tokio::test]
async fn test_add_duplicate_video_is_kept() {
    let store = memory_store();
    let playlist = store.create_playlist("Repeat").await.unwrap();

    store.add_video_to_playlist(&playlist.id, &video("abc")).await.unwrap();
    store.add_video_to_playlist(&playlist.id, &video("abc")).await.unwrap();

    let stored = store.get_playlist(&playlist.id).await.unwrap().unwrap();
    assert_eq!(stored.videos.len(), 2);
}

#[tokio::test]
async fn test_add_updates_timestamp_monotonically() {
    let store = memory_store();
    let playlist = store.create_playlist("Timeline").await.unwrap();

    let mut last = playlist.updated_at;
    for id in ["a", "b", "c"] {
        store.add_video_to_playlist(&playlist.id, &video(id)).await.unwrap();
        let stored = store.get_playlist(&playlist.id).await.unwrap().unwrap();
        assert!(stored.updated_at >= last);
        assert_eq!(stored.created_at, playlist.created_at);
        last = stored.updated_at;
    }
}

#[tokio::test]
async fn test_add_then_remove_restores_videos() {
    let store = memory_store();
    let playlist = store.create_playlist("Inverse").await.unwrap();
    store.add_video_to_playlist(&playlist.id, &video("keep")).await.unwrap();
    let before = store.get_playlist(&playlist.id).await.unwrap().unwrap();

    let added = store.add_video_to_playlist(&playlist.id, &video("temp")).await.unwrap();
    assert_eq!(added.videos.last().map(|v| v.id.as_str()), Some("temp"));

    let removal = store
        .remove_video_from_playlist(&playlist.id, &VideoId::new("temp"))
        .await
        .unwrap();

    assert_eq!(removal.removed.len(), 1);
    assert_eq!(removal.removed[0].index, 1);
    assert_eq!(removal.playlist.as_ref().map(|p| &p.videos), Some(&before.videos));

    let after = store.get_playlist(&playlist.id).await.unwrap().unwrap();
    assert_eq!(after.videos, before.videos);
    assert!(after.updated_at >= before.updated_at);
}

#[tokio::test]
async fn test_remove_absent_video_leaves_playlist_untouched() {
    let store = memory_store();
    let playlist = store.create_playlist("Stable").await.unwrap();
    store.add_video_to_playlist(&playlist.id, &video("abc")).await.unwrap();
    let before = store.get_playlist(&playlist.id).await.unwrap().unwrap();

    let removal = store
        .remove_video_from_playlist(&playlist.id, &VideoId::new("not-there"))
        .await
        .unwrap();

    assert!(removal.is_noop());
    assert_eq!(removal.playlist.as_ref(), Some(&before));
    let after = store.get_playlist(&playlist.id).await.unwrap().unwrap();
    assert_eq!(after, before);
    assert_eq!(after.updated_at, before.updated_at);
}

#[tokio::test]
async fn test_remove_from_missing_playlist_is_noop() {
    let store = memory_store();

    let removal = store
        .remove_video_from_playlist(&PlaylistId::new("missing"), &VideoId::new("abc"))
        .await
        .unwrap();

    assert!(removal.is_noop());
    assert!(removal.playlist.is_none());
    assert!(store.list_playlists().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_drops_every_duplicate() {
    let store = memory_store();
    let playlist = store.create_playlist("Dupes").await.unwrap();
    for id in ["x", "y", "x", "z", "x"] {
        store.add_video_to_playlist(&playlist.id, &video(id)).await.unwrap();
    }

    let removal = store
        .remove_video_from_playlist(&playlist.id, &VideoId::new("x"))
        .await
        .unwrap();

    let indices: Vec<usize> = removal.removed.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![0, 2, 4]);

    let stored = store.get_playlist(&playlist.id).await.unwrap().unwrap();
    let ids: Vec<&str> = stored.videos.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["y", "z"]);
}

#[tokio::test]
async fn test_removal_from_one_playlist_keeps_other_copies() {
    let store = memory_store();
    let first = store.create_playlist("First").await.unwrap();
    let second = store.create_playlist("Second").await.unwrap();

    store.add_video_to_playlist(&first.id, &video("shared")).await.unwrap();
    store.add_video_to_playlist(&second.id, &video("shared")).await.unwrap();

    store
        .remove_video_from_playlist(&first.id, &VideoId::new("shared"))
        .await
        .unwrap();

    let second = store.get_playlist(&second.id).await.unwrap().unwrap();
    assert!(second.contains_video(&VideoId::new("shared")));
}

#[tokio::test]
async fn test_delete_playlist() {
    let test_store = TestStore::new();
    let store = test_store.store();

    let a = store.create_playlist("A").await.unwrap();
    let b = store.create_playlist("B").await.unwrap();

    let deleted = store
        .delete_playlist(&a.id)
        .await
        .unwrap()
        .expect("Playlist should have been deleted");

    assert_eq!(deleted.index, 0);
    assert_eq!(deleted.playlist, a);

    let remaining = store.list_playlists().await.unwrap();
    assert_eq!(remaining, vec![b]);
}

#[tokio::test]
async fn test_delete_unknown_playlist_is_idempotent() {
    let store = memory_store();
    store.create_playlist("Keep").await.unwrap();
    let before = store.list_playlists().await.unwrap();

    let deleted = store.delete_playlist(&PlaylistId::new("ghost")).await.unwrap();
    assert!(deleted.is_none());

    let deleted_again = store.delete_playlist(&PlaylistId::new("ghost")).await.unwrap();
    assert!(deleted_again.is_none());

    assert_eq!(store.list_playlists().await.unwrap(), before);
}

#[tokio::test]
async fn test_rename_playlist() {
    let store = memory_store();
    let playlist = store.create_playlist("Old").await.unwrap();

    let result = store.rename_playlist(&playlist.id, " New ").await.unwrap();
    assert_eq!(result.previous_name, "Old");
    let renamed = result.playlist;
    assert_eq!(renamed.name, "New");
    assert_eq!(renamed.id, playlist.id);
    assert_eq!(renamed.created_at, playlist.created_at);
    assert!(renamed.updated_at >= playlist.updated_at);

    assert!(matches!(
        store.rename_playlist(&playlist.id, "").await,
        Err(VidlistError::InvalidArgument(_))
    ));
    assert!(matches!(
        store.rename_playlist(&PlaylistId::new("missing"), "Name").await,
        Err(VidlistError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_rename_reports_name_replaced_by_each_rename() {
    let store = memory_store();
    let playlist = store.create_playlist("First").await.unwrap();

    let second = store.rename_playlist(&playlist.id, "Second").await.unwrap();
    let third = store.rename_playlist(&playlist.id, "Third").await.unwrap();

    assert_eq!(second.previous_name, "First");
    assert_eq!(third.previous_name, "Second");
    assert_eq!(third.playlist.name, "Third");
}

#[tokio::test]
async fn test_conditional_rename_requires_expected_name() {
    let store = memory_store();
    let playlist = store.create_playlist("Current").await.unwrap();

    let skipped = store
        .rename_playlist_if(&playlist.id, "Something else", "New")
        .await
        .unwrap();
    assert!(skipped.is_none());
    assert_eq!(
        store.get_playlist(&playlist.id).await.unwrap().unwrap(),
        playlist
    );

    let renamed = store
        .rename_playlist_if(&playlist.id, "Current", "New")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "New");

    assert!(store
        .rename_playlist_if(&PlaylistId::new("missing"), "New", "Other")
        .await
        .unwrap()
        .is_none());
    assert!(matches!(
        store.rename_playlist_if(&playlist.id, "New", "  ").await,
        Err(VidlistError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn test_conditional_delete_keeps_changed_playlist() {
    let store = memory_store();
    let created = store.create_playlist("Mix").await.unwrap();
    let added = store.add_video_to_playlist(&created.id, &video("abc")).await.unwrap();
    assert_ne!(added.updated_at, created.updated_at);

    let deleted = store
        .delete_playlist_if_unchanged(&created.id, created.updated_at)
        .await
        .unwrap();
    assert!(deleted.is_none());
    assert_eq!(store.get_playlist(&created.id).await.unwrap().unwrap(), added);

    let deleted = store
        .delete_playlist_if_unchanged(&created.id, added.updated_at)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(deleted.index, 0);
    assert_eq!(deleted.playlist, added);
    assert!(store.list_playlists().await.unwrap().is_empty());

    assert!(store
        .delete_playlist_if_unchanged(&created.id, added.updated_at)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_restore_deleted_playlist_keeps_identity() {
    let store = memory_store();
    let a = store.create_playlist("A").await.unwrap();
    store.add_video_to_playlist(&a.id, &video("v1")).await.unwrap();
    let b = store.create_playlist("B").await.unwrap();
    let a = store.get_playlist(&a.id).await.unwrap().unwrap();

    let deleted = store.delete_playlist(&a.id).await.unwrap().unwrap();
    let restored = store
        .restore_playlist(deleted.playlist, deleted.index)
        .await
        .unwrap();
    assert!(restored);

    let playlists = store.list_playlists().await.unwrap();
    assert_eq!(playlists, vec![a.clone(), b]);

    // Second restore of the same id is refused
    assert!(!store.restore_playlist(a, 0).await.unwrap());
    assert_eq!(store.list_playlists().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_restore_playlist_clamps_index() {
    let store = memory_store();
    store.create_playlist("Only").await.unwrap();

    let orphan = vidlist_core::Playlist::new("Orphan");
    assert!(store.restore_playlist(orphan.clone(), 99).await.unwrap());

    let playlists = store.list_playlists().await.unwrap();
    assert_eq!(playlists.last(), Some(&orphan));
}

#[tokio::test]
async fn test_restore_videos_puts_entries_back_in_place() {
    let store = memory_store();
    let playlist = store.create_playlist("Order").await.unwrap();
    for id in ["a", "x", "b", "x", "c"] {
        store.add_video_to_playlist(&playlist.id, &video(id)).await.unwrap();
    }
    let before = store.get_playlist(&playlist.id).await.unwrap().unwrap();

    let removal = store
        .remove_video_from_playlist(&playlist.id, &VideoId::new("x"))
        .await
        .unwrap();
    let restored = store
        .restore_videos(&playlist.id, &removal.removed)
        .await
        .unwrap()
        .expect("Playlist should still exist");

    let after = store.get_playlist(&playlist.id).await.unwrap().unwrap();
    assert_eq!(after.videos, before.videos);
    assert_eq!(restored, after);
}

#[tokio::test]
async fn test_restore_videos_into_deleted_playlist_is_refused() {
    let store = memory_store();
    let playlist = store.create_playlist("Gone").await.unwrap();
    store.add_video_to_playlist(&playlist.id, &video("a")).await.unwrap();
    let removal = store
        .remove_video_from_playlist(&playlist.id, &VideoId::new("a"))
        .await
        .unwrap();
    store.delete_playlist(&playlist.id).await.unwrap();

    assert!(store
        .restore_videos(&playlist.id, &removal.removed)
        .await
        .unwrap()
        .is_none());
    assert!(store.list_playlists().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_retract_removes_only_last_occurrence() {
    let store = memory_store();
    let playlist = store.create_playlist("Retract").await.unwrap();
    store.add_video_to_playlist(&playlist.id, &video("a")).await.unwrap();
    store.add_video_to_playlist(&playlist.id, &video("b")).await.unwrap();
    store.add_video_to_playlist(&playlist.id, &video("a")).await.unwrap();

    assert!(store
        .retract_video(&playlist.id, &VideoId::new("a"))
        .await
        .unwrap()
        .is_some());

    let stored = store.get_playlist(&playlist.id).await.unwrap().unwrap();
    let ids: Vec<&str> = stored.videos.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);

    assert!(store
        .retract_video(&playlist.id, &VideoId::new("zzz"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_returned_snapshots_are_detached() {
    let store = memory_store();
    let playlist = store.create_playlist("Detached").await.unwrap();

    let mut snapshot = store.list_playlists().await.unwrap();
    snapshot[0].name = "Tampered".to_string();
    snapshot[0].videos.push(vidlist_core::PlaylistVideo::from_summary(&video("x")));

    let stored = store.get_playlist(&playlist.id).await.unwrap().unwrap();
    assert_eq!(stored, playlist);
}

#[tokio::test]
async fn test_persists_across_store_instances() {
    let temp_dir = tempfile::tempdir().unwrap();
    let data_dir = temp_dir.path().join("data");

    let playlist = {
        let store = PlaylistStore::new(Arc::new(vidlist_storage::FileBlobStore::new(&data_dir)));
        let playlist = store.create_playlist("Durable").await.unwrap();
        store.add_video_to_playlist(&playlist.id, &video("abc")).await.unwrap();
        playlist
    };

    let reopened = PlaylistStore::new(Arc::new(vidlist_storage::FileBlobStore::new(&data_dir)));
    let stored = reopened.get_playlist(&playlist.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Durable");
    assert_eq!(stored.videos.len(), 1);
}

#[tokio::test]
async fn test_corrupt_blob_is_recovered_on_write() {
    let backend = Arc::new(vidlist_storage::MemoryBlobStore::seeded(DEFAULT_KEY, "not json"));
    let store = PlaylistStore::new(backend.clone());

    assert!(matches!(
        store.list_playlists_strict().await,
        Err(VidlistError::Codec(_))
    ));
    assert!(store.list_playlists().await.unwrap().is_empty());

    let playlist = store.create_playlist("Fresh start").await.unwrap();

    use vidlist_core::BlobStore;
    let text = backend.read(DEFAULT_KEY).await.unwrap().unwrap();
    assert_eq!(EntityCodec::decode(&text).unwrap(), vec![playlist]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_are_all_retained() {
    let store = Arc::new(PlaylistStore::new(Arc::new(YieldingBlobStore::new())));
    let playlist = store.create_playlist("Busy").await.unwrap();

    let mut handles = Vec::new();
    for i in 0..32 {
        let store = store.clone();
        let playlist_id = playlist.id.clone();
        handles.push(tokio::spawn(async move {
            store
                .add_video_to_playlist(&playlist_id, &video(&format!("v{i}")))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = store.get_playlist(&playlist.id).await.unwrap().unwrap();
    assert_eq!(stored.videos.len(), 32);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_and_deletes_stay_consistent() {
    let store = Arc::new(PlaylistStore::new(Arc::new(YieldingBlobStore::new())));

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let playlist = store.create_playlist(&format!("P{i}")).await.unwrap();
            if i % 2 == 0 {
                store.delete_playlist(&playlist.id).await.unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let playlists = store.list_playlists().await.unwrap();
    assert_eq!(playlists.len(), 8);
    assert!(playlists.iter().all(|p| {
        let n: usize = p.name[1..].parse().unwrap();
        n % 2 == 1
    }));
}
