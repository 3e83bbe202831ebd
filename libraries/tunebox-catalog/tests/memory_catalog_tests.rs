//! Integration tests for the in-memory catalog
//!
//! Exercise the provider contract the playback session relies on.

use std::io::Write;
use std::sync::Arc;
use tunebox_catalog::{LibraryFile, MemoryCatalog};
use tunebox_core::{CatalogProvider, CreatePlaylist, PlaylistId, Song, SongId, TuneError};

fn song(id: &str) -> Song {
    Song::new(SongId::new(id), format!("Song {}", id), "Test Artist")
        .with_image_ref(format!("img-{}", id))
}

fn catalog_of(ids: &[&str]) -> MemoryCatalog {
    MemoryCatalog::with_songs(ids.iter().map(|id| song(id)).collect())
}

// =============================================================================
// Likes
// =============================================================================

#[tokio::test]
async fn toggle_like_flips_and_lists_liked_songs() {
    let catalog = catalog_of(&["1", "2", "3"]);
    let before = catalog.revision().await;

    catalog.toggle_like(&SongId::new("2")).await.unwrap();

    let liked = catalog.liked_songs().await.unwrap();
    assert_eq!(liked.len(), 1);
    assert_eq!(liked[0].id, SongId::new("2"));
    assert!(catalog.revision().await > before);

    catalog.toggle_like(&SongId::new("2")).await.unwrap();
    assert!(catalog.liked_songs().await.unwrap().is_empty());
}

#[tokio::test]
async fn toggle_like_unknown_song_fails() {
    let catalog = catalog_of(&["1"]);
    let err = catalog.toggle_like(&SongId::new("nope")).await.unwrap_err();
    assert!(matches!(err, TuneError::SongNotFound(_)));
}

#[tokio::test]
async fn toggle_like_updates_playlist_copies() {
    let catalog = catalog_of(&["1", "2"]);
    let playlist = catalog
        .create_playlist(CreatePlaylist::new("Mix"))
        .await
        .unwrap();
    catalog
        .add_song_to_playlist(&playlist.id, &SongId::new("1"))
        .await
        .unwrap();

    catalog.toggle_like(&SongId::new("1")).await.unwrap();

    let playlists = catalog.playlists().await.unwrap();
    assert!(playlists[0].songs[0].is_liked);
}

// =============================================================================
// Listening history
// =============================================================================

#[tokio::test]
async fn history_tracks_last_played_and_play_counts() {
    let catalog = catalog_of(&["1", "2"]);

    catalog.record_listening_history(&SongId::new("1")).await.unwrap();
    catalog.record_listening_history(&SongId::new("2")).await.unwrap();

    let last = catalog.last_played_song().await.unwrap().unwrap();
    assert_eq!(last.id, SongId::new("2"));
    assert_eq!(catalog.tracked_song().await, Some(SongId::new("2")));

    let history = catalog.history().await;
    assert_eq!(history.len(), 2);
    // Starting a new play closes the previous one
    assert!(history[0].stopped_at.is_some());
    assert!(history[1].stopped_at.is_none());

    let songs = catalog.songs().await.unwrap();
    assert_eq!(songs[0].play_count, 1);
    assert_eq!(songs[1].play_count, 1);
}

#[tokio::test]
async fn stop_tracking_closes_open_entry_and_keeps_last_played() {
    let catalog = catalog_of(&["1"]);
    catalog.record_listening_history(&SongId::new("1")).await.unwrap();

    catalog.stop_current_song_tracking().await.unwrap();

    assert!(catalog.tracked_song().await.is_none());
    assert!(catalog.history().await[0].stopped_at.is_some());
    assert!(catalog.last_played_song().await.unwrap().is_some());

    // Stopping with nothing tracked is fine
    catalog.stop_current_song_tracking().await.unwrap();
}

#[tokio::test]
async fn removed_song_disappears_from_playlists() {
    let catalog = catalog_of(&["1", "2"]);
    let playlist = catalog
        .create_playlist(CreatePlaylist::new("Mix"))
        .await
        .unwrap();
    catalog
        .add_song_to_playlist(&playlist.id, &SongId::new("2"))
        .await
        .unwrap();

    catalog.remove_song(&SongId::new("2")).await.unwrap();

    assert_eq!(catalog.songs().await.unwrap().len(), 1);
    assert!(catalog.playlists().await.unwrap()[0].songs.is_empty());
}

// =============================================================================
// Playlists
// =============================================================================

#[tokio::test]
async fn playlist_crud() {
    let catalog = catalog_of(&["1", "2"]);

    let playlist = catalog
        .create_playlist(CreatePlaylist::new("Focus"))
        .await
        .unwrap();
    catalog
        .rename_playlist(&playlist.id, "Deep Focus")
        .await
        .unwrap();
    catalog
        .add_song_to_playlist(&playlist.id, &SongId::new("1"))
        .await
        .unwrap();
    catalog
        .add_song_to_playlist(&playlist.id, &SongId::new("2"))
        .await
        .unwrap();
    catalog
        .remove_song_from_playlist(&playlist.id, &SongId::new("1"))
        .await
        .unwrap();

    let playlists = catalog.playlists().await.unwrap();
    assert_eq!(playlists[0].name, "Deep Focus");
    assert_eq!(playlists[0].songs.len(), 1);
    assert_eq!(playlists[0].songs[0].id, SongId::new("2"));

    catalog.delete_playlist(&playlist.id).await.unwrap();
    assert!(catalog.playlists().await.unwrap().is_empty());
}

#[tokio::test]
async fn playlist_mutations_bump_revision() {
    let catalog = catalog_of(&["1"]);
    let start = catalog.revision().await;

    let playlist = catalog
        .create_playlist(CreatePlaylist::new("Mix"))
        .await
        .unwrap();
    catalog
        .add_song_to_playlist(&playlist.id, &SongId::new("1"))
        .await
        .unwrap();
    catalog.rename_playlist(&playlist.id, "Remix").await.unwrap();
    catalog.delete_playlist(&playlist.id).await.unwrap();

    assert_eq!(catalog.revision().await, start + 4);

    // Failed mutations leave it alone
    assert!(catalog.delete_playlist(&playlist.id).await.is_err());
    assert_eq!(catalog.revision().await, start + 4);
}

#[tokio::test]
async fn playlist_errors() {
    let catalog = catalog_of(&["1"]);
    let missing = PlaylistId::new("missing");

    assert!(matches!(
        catalog.delete_playlist(&missing).await,
        Err(TuneError::PlaylistNotFound(_))
    ));
    assert!(matches!(
        catalog.create_playlist(CreatePlaylist::new("  ")).await,
        Err(TuneError::InvalidInput(_))
    ));

    let playlist = catalog
        .create_playlist(CreatePlaylist::new("Mix"))
        .await
        .unwrap();
    catalog
        .add_song_to_playlist(&playlist.id, &SongId::new("1"))
        .await
        .unwrap();
    assert!(matches!(
        catalog
            .add_song_to_playlist(&playlist.id, &SongId::new("1"))
            .await,
        Err(TuneError::DuplicatePlaylistEntry { .. })
    ));
}

// =============================================================================
// Library files
// =============================================================================

#[tokio::test]
async fn open_reads_library_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "songs": [
                {{"id": "a", "title": "A", "artist": "X", "image_ref": "ia"}},
                {{"id": "b", "title": "B", "artist": "Y", "image_ref": "ib", "is_liked": true}}
            ],
            "last_played": "b"
        }}"#
    )
    .unwrap();

    let catalog = MemoryCatalog::open(file.path()).await.unwrap();
    let snapshot = catalog.snapshot().await.unwrap();

    assert_eq!(snapshot.songs.len(), 2);
    assert_eq!(snapshot.liked_songs.len(), 1);
    assert_eq!(snapshot.last_played_song.unwrap().id, SongId::new("b"));
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn open_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = MemoryCatalog::open(&dir.path().join("missing.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, TuneError::Io(_)));
}

#[tokio::test]
async fn loading_flag_is_reported() {
    let catalog = MemoryCatalog::from_library(LibraryFile::default());
    catalog.set_loading(true).await;
    assert!(catalog.snapshot().await.unwrap().loading);
}

// =============================================================================
// Snapshots
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn snapshot_never_mixes_revisions() {
    let ids: Vec<String> = (0..8).map(|i| i.to_string()).collect();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let catalog = Arc::new(catalog_of(&refs));

    // Each removal drops one song and bumps the revision once
    let writer = {
        let catalog = Arc::clone(&catalog);
        tokio::spawn(async move {
            for id in ids {
                catalog.remove_song(&SongId::new(id)).await.unwrap();
                tokio::task::yield_now().await;
            }
        })
    };

    for _ in 0..200 {
        let snapshot = catalog.snapshot().await.unwrap();
        assert_eq!(snapshot.songs.len() as u64 + snapshot.revision, 9);
        tokio::task::yield_now().await;
    }
    writer.await.unwrap();

    let last = catalog.snapshot().await.unwrap();
    assert!(last.songs.is_empty());
    assert_eq!(last.revision, 9);
}

#[tokio::test]
async fn snapshot_matches_individual_reads() {
    let catalog = catalog_of(&["1", "2", "3"]);
    catalog.toggle_like(&SongId::new("3")).await.unwrap();
    catalog.record_listening_history(&SongId::new("2")).await.unwrap();

    let snapshot = catalog.snapshot().await.unwrap();
    assert_eq!(snapshot.songs, catalog.songs().await.unwrap());
    assert_eq!(snapshot.liked_songs, catalog.liked_songs().await.unwrap());
    assert_eq!(
        snapshot.last_played_song,
        catalog.last_played_song().await.unwrap()
    );
    assert_eq!(snapshot.revision, catalog.revision().await);
}
