/// Core error types for Tunebox
use crate::types::{PlaylistId, SongId};
use thiserror::Error;

/// Result type alias using `TuneError`
pub type Result<T> = std::result::Result<T, TuneError>;

/// Core error type for Tunebox
#[derive(Error, Debug)]
pub enum TuneError {
    /// Song not found
    #[error("Song not found: {0}")]
    SongNotFound(SongId),

    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Song already present in a playlist
    #[error("Song {song} is already in playlist {playlist}")]
    DuplicatePlaylistEntry {
        /// Playlist that already holds the song
        playlist: PlaylistId,
        /// Song that was added twice
        song: SongId,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The catalog backend could not be reached or refused the call
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl TuneError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_entity() {
        let err = TuneError::SongNotFound(SongId::new("abc"));
        assert_eq!(err.to_string(), "Song not found: abc");

        let err = TuneError::DuplicatePlaylistEntry {
            playlist: PlaylistId::new("p1"),
            song: SongId::new("s1"),
        };
        assert_eq!(err.to_string(), "Song s1 is already in playlist p1");
    }

    #[test]
    fn json_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TuneError = parse.into();
        assert!(matches!(err, TuneError::Serialization(_)));
    }
}
