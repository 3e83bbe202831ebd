//! Error types for the playback session

use thiserror::Error;
use tunebox_core::{SongId, TuneError};

/// Session errors
///
/// Collaborator failures during ordinary transitions are logged, not
/// returned. Only startup loading and an explicit close report them.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The catalog could not be read
    #[error("Catalog error: {0}")]
    Catalog(#[from] TuneError),

    /// Stop-tracking failed while closing the player
    #[error("Failed to stop tracking {song_id}: {source}")]
    StopTracking {
        /// Song that was current when close was requested
        song_id: SongId,
        /// Provider failure
        #[source]
        source: TuneError,
    },

    /// Invalid session configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
