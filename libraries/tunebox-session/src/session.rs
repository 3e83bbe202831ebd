//! Playback session state
//!
//! Pure state machine for "what is current, is it playing". No I/O happens
//! here; the coordinator turns transitions into provider commands.

use crate::types::SessionState;
use tunebox_core::{CatalogSnapshot, Song, SongId};

/// Identity of a close request
///
/// The stop-tracking call completes asynchronously. Its completion is only
/// applied while the session is still on the generation the close was
/// issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseTicket {
    /// Session generation at the time of the close request
    pub generation: u64,

    /// Song that was current when close was requested
    pub song_id: SongId,
}

/// Playback session
///
/// Invariants:
/// - `is_playing` is false whenever there is no current song
/// - `is_maximized` reads as false whenever there is no current song
/// - auto-resume fires at most once, and never after an explicit close
#[derive(Debug, Clone, Default)]
pub struct PlaybackSession {
    current_song: Option<Song>,
    is_playing: bool,
    is_maximized: bool,

    /// Set once the resume candidate has been applied
    resume_consumed: bool,

    /// Set once the user closed the player
    resume_dismissed: bool,

    /// Bumped whenever the current song changes or is cleared
    generation: u64,

    pending_close: Option<CloseTicket>,
}

impl PlaybackSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Queries =====

    pub fn state(&self) -> SessionState {
        match (&self.current_song, self.is_playing) {
            (None, _) => SessionState::Idle,
            (Some(_), false) => SessionState::Paused,
            (Some(_), true) => SessionState::Playing,
        }
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.current_song.as_ref()
    }

    pub fn current_song_id(&self) -> Option<&SongId> {
        self.current_song.as_ref().map(|s| &s.id)
    }

    pub fn is_playing(&self) -> bool {
        self.current_song.is_some() && self.is_playing
    }

    pub fn is_maximized(&self) -> bool {
        self.current_song.is_some() && self.is_maximized
    }

    pub fn resume_consumed(&self) -> bool {
        self.resume_consumed
    }

    pub fn resume_dismissed(&self) -> bool {
        self.resume_dismissed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Close request waiting for its stop-tracking completion
    pub fn pending_close(&self) -> Option<&CloseTicket> {
        self.pending_close
            .as_ref()
            .filter(|t| t.generation == self.generation)
    }

    // ===== Transitions =====

    /// Apply the resume candidate if the session is eligible
    ///
    /// Returns true if the candidate became the (paused) current song.
    pub fn try_resume(&mut self, candidate: Option<&Song>) -> bool {
        let Some(candidate) = candidate else {
            return false;
        };

        if self.current_song.is_some() || self.resume_consumed || self.resume_dismissed {
            return false;
        }

        self.current_song = Some(candidate.clone());
        self.is_playing = false;
        self.resume_consumed = true;
        self.generation += 1;
        true
    }

    /// Make a song current and start playing it
    pub fn play(&mut self, song: Song) {
        self.current_song = Some(song);
        self.is_playing = true;
        self.resume_dismissed = false;
        self.pending_close = None;
        self.generation += 1;
    }

    /// Replace the current song, keeping the play/pause flag
    pub fn select(&mut self, song: Song) {
        self.current_song = Some(song);
        self.pending_close = None;
        self.generation += 1;
    }

    /// Flip play/pause; returns false when there is nothing to play
    pub fn toggle_play(&mut self) -> bool {
        if self.current_song.is_none() {
            return false;
        }
        self.is_playing = !self.is_playing;
        true
    }

    /// Flip the maximized flag
    pub fn toggle_maximize(&mut self) {
        self.is_maximized = !self.is_maximized;
    }

    /// Start closing the player
    ///
    /// Returns the ticket the stop-tracking completion must present, or
    /// `None` when there is nothing to close or a close is already pending.
    pub fn begin_close(&mut self) -> Option<CloseTicket> {
        let song_id = self.current_song.as_ref()?.id.clone();
        if self.pending_close().is_some() {
            return None;
        }

        let ticket = CloseTicket {
            generation: self.generation,
            song_id,
        };
        self.pending_close = Some(ticket.clone());
        Some(ticket)
    }

    /// Finish a close once stop-tracking completed (successfully or not)
    ///
    /// Returns false if the ticket is stale and the session was left alone.
    pub fn finish_close(&mut self, ticket: &CloseTicket) -> bool {
        if ticket.generation != self.generation || self.current_song.is_none() {
            return false;
        }

        self.current_song = None;
        self.is_playing = false;
        self.is_maximized = false;
        self.resume_dismissed = true;
        self.pending_close = None;
        self.generation += 1;
        true
    }

    /// Flip the local like mirror if `song_id` is current
    pub fn flip_like(&mut self, song_id: &SongId) -> bool {
        match self.current_song.as_mut() {
            Some(song) if &song.id == song_id => {
                song.is_liked = !song.is_liked;
                true
            }
            _ => false,
        }
    }

    /// Overwrite the like mirror with the provider's value
    ///
    /// Returns true if the mirror changed.
    pub fn reconcile_likes(&mut self, catalog: &CatalogSnapshot) -> bool {
        let Some(current) = self.current_song.as_mut() else {
            return false;
        };

        let authoritative = catalog
            .song(&current.id)
            .or_else(|| catalog.liked_songs.iter().find(|s| s.id == current.id));

        match authoritative {
            Some(song) if song.is_liked != current.is_liked => {
                current.is_liked = song.is_liked;
                true
            }
            _ => false,
        }
    }
}
