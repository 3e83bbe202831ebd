//! Playlist types

use super::ids::{PlaylistId, SongId};
use super::song::Song;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User playlist with its songs in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub songs: Vec<Song>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    /// Build a new, empty playlist from creation data
    pub fn from_create(data: CreatePlaylist) -> Self {
        Self {
            id: PlaylistId::generate(),
            name: data.name,
            description: data.description,
            songs: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Check whether the playlist holds a song
    pub fn contains(&self, song_id: &SongId) -> bool {
        self.songs.iter().any(|s| &s.id == song_id)
    }
}

/// Data for creating a new playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePlaylist {
    pub name: String,
    pub description: Option<String>,
}

impl CreatePlaylist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_playlist_is_empty() {
        let playlist = Playlist::from_create(CreatePlaylist::new("Road trip"));
        assert_eq!(playlist.name, "Road trip");
        assert!(playlist.songs.is_empty());
        assert!(!playlist.contains(&SongId::new("x")));
    }
}
