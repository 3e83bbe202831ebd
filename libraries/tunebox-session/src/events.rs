//! Session messages, commands and events
//!
//! The coordinator is driven by [`SessionMessage`]s (user input and
//! completions of earlier commands), answers with [`SessionCommand`]s for the
//! catalog provider and queues [`SessionEvent`]s for observers.

use crate::session::CloseTicket;
use crate::types::{SessionState, SubPage, Tab};
use std::fmt;
use tunebox_core::{CatalogSnapshot, CreatePlaylist, PlaylistId, Result, Song, SongId, TuneError};

/// Playlist mutation kinds, used to label completions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistOperation {
    Create,
    Delete,
    Rename,
    AddSong,
    RemoveSong,
}

impl fmt::Display for PlaylistOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaylistOperation::Create => "create playlist",
            PlaylistOperation::Delete => "delete playlist",
            PlaylistOperation::Rename => "rename playlist",
            PlaylistOperation::AddSong => "add song to playlist",
            PlaylistOperation::RemoveSong => "remove song from playlist",
        };
        f.write_str(name)
    }
}

/// Input to the coordinator
#[derive(Debug)]
pub enum SessionMessage {
    // ===== Catalog =====
    /// A fresh catalog snapshot arrived (initial load or refresh)
    CatalogLoaded(CatalogSnapshot),
    /// Reading the catalog failed
    CatalogRefreshFailed(TuneError),

    // ===== Player =====
    Play(Song),
    TogglePlay,
    ToggleMaximize,
    Close,
    Next,
    Previous,
    ToggleLike(SongId),

    // ===== Display window and navigation =====
    LoadMore,
    SelectTab(Tab),
    OpenSubPage(SubPage),
    Back,
    SelectForPlaylist(Song),
    ClearPlaylistSelection,

    // ===== Playlists =====
    CreatePlaylist(CreatePlaylist),
    DeletePlaylist(PlaylistId),
    RenamePlaylist {
        playlist_id: PlaylistId,
        name: String,
    },
    AddSongToPlaylist {
        playlist_id: PlaylistId,
        song_id: SongId,
    },
    RemoveSongFromPlaylist {
        playlist_id: PlaylistId,
        song_id: SongId,
    },

    // ===== Completions =====
    HistoryRecorded {
        song_id: SongId,
        result: Result<()>,
    },
    LikeToggled {
        song_id: SongId,
        result: Result<()>,
    },
    TrackingStopped {
        ticket: CloseTicket,
        result: Result<()>,
    },
    PlaylistUpdated {
        operation: PlaylistOperation,
        result: Result<()>,
    },
}

/// Side effect the coordinator asks the runtime to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    RecordHistory(SongId),
    StopTracking(CloseTicket),
    ToggleLike(SongId),
    CreatePlaylist(CreatePlaylist),
    DeletePlaylist(PlaylistId),
    RenamePlaylist {
        playlist_id: PlaylistId,
        name: String,
    },
    AddSongToPlaylist {
        playlist_id: PlaylistId,
        song_id: SongId,
    },
    RemoveSongFromPlaylist {
        playlist_id: PlaylistId,
        song_id: SongId,
    },
    RefreshCatalog,
}

/// Notification for observers of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Idle / Paused / Playing changed
    StateChanged {
        /// The new session state
        state: SessionState,
    },

    /// The current song changed
    SongChanged {
        /// ID of the new current song (if any)
        song_id: Option<SongId>,
        /// ID of the previous current song (if any)
        previous_song_id: Option<SongId>,
    },

    /// The resume candidate was applied on load
    Resumed {
        /// ID of the resumed song
        song_id: SongId,
    },

    /// Images were resolved for newly visible songs
    ImagesResolved {
        /// Number of new entries
        count: usize,
    },

    /// The current song is not part of the catalog order
    Inconsistency {
        /// ID of the current song
        song_id: SongId,
    },

    /// A catalog provider call failed
    CollaboratorFailed {
        /// What was attempted
        operation: String,
        /// Error message
        message: String,
    },

    /// Close finished and the player is gone
    Closed {
        /// Stop-tracking failure, if any
        stop_tracking_error: Option<String>,
    },
}
