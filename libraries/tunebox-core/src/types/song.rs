/// Song domain type
use super::ids::SongId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A song in the catalog
///
/// Title, artist and album are display metadata; nothing in the session logic
/// inspects them. `image_ref` is an opaque locator handed to the image
/// endpoint when the song scrolls into view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Unique song identifier
    pub id: SongId,

    /// Song title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    #[serde(default)]
    pub album: Option<String>,

    /// Opaque image locator resolved through the image endpoint
    #[serde(default)]
    pub image_ref: String,

    /// Song duration in milliseconds
    #[serde(default)]
    pub duration_ms: Option<u64>,

    /// Number of recorded plays
    #[serde(default)]
    pub play_count: u64,

    /// Whether the current user liked the song
    #[serde(default)]
    pub is_liked: bool,
}

impl Song {
    /// Create a new song with minimal metadata
    pub fn new(id: SongId, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            album: None,
            image_ref: String::new(),
            duration_ms: None,
            play_count: 0,
            is_liked: false,
        }
    }

    /// Set the image locator
    #[must_use]
    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }

    /// Set the album name
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Set the play counter
    #[must_use]
    pub fn with_play_count(mut self, play_count: u64) -> Self {
        self.play_count = play_count;
        self
    }

    /// Mark the song as liked
    #[must_use]
    pub fn liked(mut self) -> Self {
        self.is_liked = true;
        self
    }

    /// Get the song duration as a Duration
    pub fn duration(&self) -> Option<Duration> {
        self.duration_ms.map(Duration::from_millis)
    }
}
