//! Catalog provider contract
//!
//! The catalog is the authoritative owner of songs, playlists and likes. The
//! playback session only ever holds copies and asks the provider to mutate.

use crate::error::Result;
use crate::types::{CreatePlaylist, Playlist, PlaylistId, Song, SongId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Data-access collaborator behind the playback session
///
/// Implementations may talk to a remote service, a database or plain memory.
/// Mutations are allowed to fail; callers log the failure and move on.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    // ========================================================================
    // Reads
    // ========================================================================

    /// All songs, in the stable order used for next/previous navigation
    async fn songs(&self) -> Result<Vec<Song>>;

    /// The user's playlists
    async fn playlists(&self) -> Result<Vec<Playlist>>;

    /// Songs the user liked
    async fn liked_songs(&self) -> Result<Vec<Song>>;

    /// Most recently played song, the resume candidate on startup
    async fn last_played_song(&self) -> Result<Option<Song>>;

    /// Whether the provider is still performing its initial load
    async fn is_loading(&self) -> bool;

    /// Monotonic counter that changes whenever the song list changes
    async fn revision(&self) -> u64;

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Flip the like flag of a song
    async fn toggle_like(&self, song_id: &SongId) -> Result<()>;

    /// Create a new playlist
    async fn create_playlist(&self, data: CreatePlaylist) -> Result<Playlist>;

    /// Delete a playlist
    async fn delete_playlist(&self, id: &PlaylistId) -> Result<()>;

    /// Rename a playlist
    async fn rename_playlist(&self, id: &PlaylistId, name: &str) -> Result<()>;

    /// Append a song to a playlist
    async fn add_song_to_playlist(&self, playlist_id: &PlaylistId, song_id: &SongId)
        -> Result<()>;

    /// Remove a song from a playlist
    async fn remove_song_from_playlist(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<()>;

    /// Record that a song started playing and make it the tracked song
    async fn record_listening_history(&self, song_id: &SongId) -> Result<()>;

    /// Stop tracking the song recorded by the last history call
    async fn stop_current_song_tracking(&self) -> Result<()>;

    // ========================================================================
    // Provided
    // ========================================================================

    /// Read everything the session needs in one go
    async fn snapshot(&self) -> Result<CatalogSnapshot> {
        Ok(CatalogSnapshot {
            songs: self.songs().await?,
            playlists: self.playlists().await?,
            liked_songs: self.liked_songs().await?,
            last_played_song: self.last_played_song().await?,
            loading: self.is_loading().await,
            revision: self.revision().await,
        })
    }
}

/// Point-in-time copy of the catalog as seen by the session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub songs: Vec<Song>,
    pub playlists: Vec<Playlist>,
    pub liked_songs: Vec<Song>,
    pub last_played_song: Option<Song>,
    pub loading: bool,
    pub revision: u64,
}

impl CatalogSnapshot {
    /// Snapshot reported while the provider is still loading
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Position of a song in catalog order
    pub fn position_of(&self, song_id: &SongId) -> Option<usize> {
        self.songs.iter().position(|s| &s.id == song_id)
    }

    /// Look up a song by id
    pub fn song(&self, song_id: &SongId) -> Option<&Song> {
        self.songs.iter().find(|s| &s.id == song_id)
    }
}
