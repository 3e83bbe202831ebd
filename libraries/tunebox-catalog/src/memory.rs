//! In-memory catalog provider

use crate::library::LibraryFile;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::Path;
use tokio::sync::RwLock;
use tracing::debug;
use tunebox_core::{
    CatalogProvider, CatalogSnapshot, CreatePlaylist, Playlist, PlaylistId, Result, Song, SongId,
    TuneError,
};

/// One entry of the listening history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListeningEntry {
    pub song_id: SongId,
    pub started_at: DateTime<Utc>,
    /// Set once tracking of this play stopped
    pub stopped_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct CatalogData {
    songs: Vec<Song>,
    playlists: Vec<Playlist>,
    history: Vec<ListeningEntry>,
    last_played: Option<SongId>,
    tracked: Option<SongId>,
    loading: bool,
    revision: u64,
}

impl CatalogData {
    fn song_mut(&mut self, id: &SongId) -> Result<&mut Song> {
        self.songs
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| TuneError::SongNotFound(id.clone()))
    }

    fn playlist_mut(&mut self, id: &PlaylistId) -> Result<&mut Playlist> {
        self.playlists
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| TuneError::PlaylistNotFound(id.clone()))
    }

    fn stop_open_entry(&mut self) -> Option<SongId> {
        let stopped = self.tracked.take()?;
        let now = Utc::now();
        if let Some(entry) = self
            .history
            .iter_mut()
            .rev()
            .find(|e| e.song_id == stopped && e.stopped_at.is_none())
        {
            entry.stopped_at = Some(now);
        }
        Some(stopped)
    }
}

/// Catalog held entirely in memory
///
/// All state sits behind a single `RwLock`, so every call observes a
/// consistent catalog and [`CatalogProvider::snapshot`] is taken under one
/// read guard. Every successful change to what a snapshot carries bumps
/// `revision`.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    data: RwLock<CatalogData>,
}

impl MemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the given songs
    pub fn with_songs(songs: Vec<Song>) -> Self {
        Self::from_library(LibraryFile {
            songs,
            ..LibraryFile::default()
        })
    }

    /// Create a catalog from a parsed library file
    pub fn from_library(library: LibraryFile) -> Self {
        Self {
            data: RwLock::new(CatalogData {
                songs: library.songs,
                playlists: library.playlists,
                last_played: library.last_played,
                revision: 1,
                ..CatalogData::default()
            }),
        }
    }

    /// Load a catalog from a JSON library file
    pub async fn open(path: &Path) -> Result<Self> {
        let library = LibraryFile::load(path).await?;
        debug!(
            path = %path.display(),
            songs = library.songs.len(),
            "Loaded library file"
        );
        Ok(Self::from_library(library))
    }

    /// Mark the catalog as loading (or done loading)
    pub async fn set_loading(&self, loading: bool) {
        let mut data = self.data.write().await;
        data.loading = loading;
        data.revision += 1;
    }

    /// Remove a song from the catalog and from every playlist
    pub async fn remove_song(&self, song_id: &SongId) -> Result<Song> {
        let mut data = self.data.write().await;
        let index = data
            .songs
            .iter()
            .position(|s| &s.id == song_id)
            .ok_or_else(|| TuneError::SongNotFound(song_id.clone()))?;
        let song = data.songs.remove(index);
        for playlist in &mut data.playlists {
            playlist.songs.retain(|s| &s.id != song_id);
        }
        data.revision += 1;
        Ok(song)
    }

    /// Full listening history, oldest first
    pub async fn history(&self) -> Vec<ListeningEntry> {
        self.data.read().await.history.clone()
    }

    /// Song currently being tracked, if any
    pub async fn tracked_song(&self) -> Option<SongId> {
        self.data.read().await.tracked.clone()
    }
}

#[async_trait]
impl CatalogProvider for MemoryCatalog {
    async fn songs(&self) -> Result<Vec<Song>> {
        Ok(self.data.read().await.songs.clone())
    }

    async fn playlists(&self) -> Result<Vec<Playlist>> {
        Ok(self.data.read().await.playlists.clone())
    }

    async fn liked_songs(&self) -> Result<Vec<Song>> {
        let data = self.data.read().await;
        Ok(data.songs.iter().filter(|s| s.is_liked).cloned().collect())
    }

    async fn last_played_song(&self) -> Result<Option<Song>> {
        let data = self.data.read().await;
        Ok(data
            .last_played
            .as_ref()
            .and_then(|id| data.songs.iter().find(|s| &s.id == id))
            .cloned())
    }

    async fn is_loading(&self) -> bool {
        self.data.read().await.loading
    }

    async fn revision(&self) -> u64 {
        self.data.read().await.revision
    }

    async fn snapshot(&self) -> Result<CatalogSnapshot> {
        let data = self.data.read().await;
        Ok(CatalogSnapshot {
            songs: data.songs.clone(),
            playlists: data.playlists.clone(),
            liked_songs: data.songs.iter().filter(|s| s.is_liked).cloned().collect(),
            last_played_song: data
                .last_played
                .as_ref()
                .and_then(|id| data.songs.iter().find(|s| &s.id == id))
                .cloned(),
            loading: data.loading,
            revision: data.revision,
        })
    }

    async fn toggle_like(&self, song_id: &SongId) -> Result<()> {
        let mut data = self.data.write().await;
        let song = data.song_mut(song_id)?;
        song.is_liked = !song.is_liked;
        let liked = song.is_liked;

        for playlist in &mut data.playlists {
            for entry in playlist.songs.iter_mut().filter(|s| &s.id == song_id) {
                entry.is_liked = liked;
            }
        }
        data.revision += 1;

        debug!(song_id = %song_id, liked, "Toggled like");
        Ok(())
    }

    async fn create_playlist(&self, create: CreatePlaylist) -> Result<Playlist> {
        if create.name.trim().is_empty() {
            return Err(TuneError::invalid_input("playlist name cannot be empty"));
        }

        let playlist = Playlist::from_create(create);
        let mut data = self.data.write().await;
        data.playlists.push(playlist.clone());
        data.revision += 1;

        debug!(playlist_id = %playlist.id, name = %playlist.name, "Created playlist");
        Ok(playlist)
    }

    async fn delete_playlist(&self, id: &PlaylistId) -> Result<()> {
        let mut data = self.data.write().await;
        let before = data.playlists.len();
        data.playlists.retain(|p| &p.id != id);
        if data.playlists.len() == before {
            return Err(TuneError::PlaylistNotFound(id.clone()));
        }
        data.revision += 1;

        debug!(playlist_id = %id, "Deleted playlist");
        Ok(())
    }

    async fn rename_playlist(&self, id: &PlaylistId, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(TuneError::invalid_input("playlist name cannot be empty"));
        }

        let mut data = self.data.write().await;
        data.playlist_mut(id)?.name = name.to_string();
        data.revision += 1;
        Ok(())
    }

    async fn add_song_to_playlist(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<()> {
        let mut data = self.data.write().await;
        let song = data
            .songs
            .iter()
            .find(|s| &s.id == song_id)
            .cloned()
            .ok_or_else(|| TuneError::SongNotFound(song_id.clone()))?;

        let playlist = data.playlist_mut(playlist_id)?;
        if playlist.contains(song_id) {
            return Err(TuneError::DuplicatePlaylistEntry {
                playlist: playlist_id.clone(),
                song: song_id.clone(),
            });
        }
        playlist.songs.push(song);
        data.revision += 1;
        Ok(())
    }

    async fn remove_song_from_playlist(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<()> {
        let mut data = self.data.write().await;
        let playlist = data.playlist_mut(playlist_id)?;
        let before = playlist.songs.len();
        playlist.songs.retain(|s| &s.id != song_id);
        if playlist.songs.len() == before {
            return Err(TuneError::SongNotFound(song_id.clone()));
        }
        data.revision += 1;
        Ok(())
    }

    async fn record_listening_history(&self, song_id: &SongId) -> Result<()> {
        let mut data = self.data.write().await;
        data.song_mut(song_id)?.play_count += 1;
        data.stop_open_entry();

        data.history.push(ListeningEntry {
            song_id: song_id.clone(),
            started_at: Utc::now(),
            stopped_at: None,
        });
        data.tracked = Some(song_id.clone());
        data.last_played = Some(song_id.clone());
        data.revision += 1;

        debug!(song_id = %song_id, "Recorded listening history");
        Ok(())
    }

    async fn stop_current_song_tracking(&self) -> Result<()> {
        let mut data = self.data.write().await;
        if let Some(stopped) = data.stop_open_entry() {
            debug!(song_id = %stopped, "Stopped tracking");
        }
        Ok(())
    }
}
