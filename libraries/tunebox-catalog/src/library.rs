//! JSON library file format

use serde::{Deserialize, Serialize};
use std::path::Path;
use tunebox_core::{Playlist, Result, Song, SongId, TuneError};

/// On-disk library used to seed a [`crate::MemoryCatalog`]
///
/// ```json
/// {
///   "songs": [{ "id": "1", "title": "So What", "artist": "Miles Davis", "image_ref": "img1" }],
///   "playlists": [],
///   "last_played": "1"
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryFile {
    pub songs: Vec<Song>,

    #[serde(default)]
    pub playlists: Vec<Playlist>,

    /// Song resumed on the next start
    #[serde(default)]
    pub last_played: Option<SongId>,
}

impl LibraryFile {
    /// Parse a library from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let library: Self = serde_json::from_str(text)?;
        library.validate()?;
        Ok(library)
    }

    /// Read and parse a library file
    pub async fn load(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path).await?;
        Self::from_json(&text)
    }

    /// Reject duplicate song ids and dangling references
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for song in &self.songs {
            if !seen.insert(&song.id) {
                return Err(TuneError::invalid_input(format!(
                    "duplicate song id {}",
                    song.id
                )));
            }
        }

        if let Some(last) = &self.last_played {
            if !seen.contains(last) {
                return Err(TuneError::SongNotFound(last.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_library() {
        let library = LibraryFile::from_json(
            r#"{"songs":[{"id":"1","title":"A","artist":"B","image_ref":"i1"}]}"#,
        )
        .unwrap();

        assert_eq!(library.songs.len(), 1);
        assert!(library.playlists.is_empty());
        assert!(library.last_played.is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = LibraryFile::from_json(
            r#"{"songs":[{"id":"1","title":"A","artist":"B"},{"id":"1","title":"C","artist":"D"}]}"#,
        )
        .unwrap_err();

        assert!(matches!(err, TuneError::InvalidInput(_)));
    }

    #[test]
    fn rejects_unknown_last_played() {
        let err = LibraryFile::from_json(
            r#"{"songs":[{"id":"1","title":"A","artist":"B"}],"last_played":"9"}"#,
        )
        .unwrap_err();

        assert!(matches!(err, TuneError::SongNotFound(_)));
    }
}
