//! Playback session coordinator
//!
//! Synchronous, message-driven state machine. Every [`SessionMessage`] is
//! applied atomically by [`SessionCoordinator::update`], which returns the
//! [`SessionCommand`]s to run against the catalog provider. Completions of
//! those commands come back later as messages.

use crate::events::{PlaylistOperation, SessionCommand, SessionEvent, SessionMessage};
use crate::router::{route, View};
use crate::session::{CloseTicket, PlaybackSession};
use crate::types::{SessionConfig, SessionState, SubPage, Tab};
use crate::window::{DisplayWindow, ImageEndpoint};
use tracing::{debug, warn};
use tunebox_core::{CatalogSnapshot, Result, Song, SongId, TuneError};

/// Direction for next/previous navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Owns the playback session, the display window and navigation state
#[derive(Debug)]
pub struct SessionCoordinator {
    config: SessionConfig,
    session: PlaybackSession,
    window: DisplayWindow,
    catalog: CatalogSnapshot,

    /// Catalog revision the image map was last resolved against
    resolved_revision: Option<u64>,

    sub_page: SubPage,
    tab: Tab,
    selected_for_playlist: Option<Song>,

    pending_events: Vec<SessionEvent>,
}

impl SessionCoordinator {
    /// Create a coordinator with an empty session and a loading catalog
    pub fn new(config: SessionConfig) -> Self {
        let window = DisplayWindow::new(
            config.initial_visible,
            config.page_size,
            ImageEndpoint::new(config.image_endpoint.clone()),
        );

        Self {
            config,
            session: PlaybackSession::new(),
            window,
            catalog: CatalogSnapshot::loading(),
            resolved_revision: None,
            sub_page: SubPage::Main,
            tab: Tab::Home,
            selected_for_playlist: None,
            pending_events: Vec::new(),
        }
    }

    // ===== Accessors =====

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn window(&self) -> &DisplayWindow {
        &self.window
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    pub fn sub_page(&self) -> SubPage {
        self.sub_page
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Song the add-to-playlist dialog acts on
    pub fn selected_for_playlist(&self) -> Option<&Song> {
        self.selected_for_playlist.as_ref()
    }

    /// The player chrome is shown whenever a song is current
    pub fn player_visible(&self) -> bool {
        self.session.current_song().is_some()
    }

    /// Bottom navigation is hidden while a sub-page is open
    pub fn nav_visible(&self) -> bool {
        self.sub_page == SubPage::Main
    }

    /// The view for the main content area
    pub fn view(&self) -> View<'_> {
        route(&self.catalog, &self.window, self.sub_page, self.tab)
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Update =====

    /// Apply one message and return the commands it produced
    pub fn update(&mut self, message: SessionMessage) -> Vec<SessionCommand> {
        match message {
            SessionMessage::CatalogLoaded(snapshot) => {
                self.on_catalog_loaded(snapshot);
                Vec::new()
            }
            SessionMessage::CatalogRefreshFailed(error) => {
                self.collaborator_failed("refresh catalog", &error);
                Vec::new()
            }

            SessionMessage::Play(song) => self.play(song),
            SessionMessage::TogglePlay => {
                let before = self.session.state();
                if self.session.toggle_play() {
                    self.emit_state_change(before);
                }
                Vec::new()
            }
            SessionMessage::ToggleMaximize => {
                self.session.toggle_maximize();
                Vec::new()
            }
            SessionMessage::Close => self.close(),
            SessionMessage::Next => self.step(Direction::Forward),
            SessionMessage::Previous => self.step(Direction::Backward),
            SessionMessage::ToggleLike(song_id) => {
                if self.session.flip_like(&song_id) {
                    debug!("Flipped like mirror for current song {}", song_id);
                }
                vec![SessionCommand::ToggleLike(song_id)]
            }

            SessionMessage::LoadMore => {
                let visible = self.window.load_more();
                debug!("Display window grew to {} songs", visible);
                self.resolve_images();
                Vec::new()
            }
            SessionMessage::SelectTab(tab) => {
                self.tab = tab;
                Vec::new()
            }
            SessionMessage::OpenSubPage(sub_page) => {
                self.sub_page = sub_page;
                Vec::new()
            }
            SessionMessage::Back => {
                self.sub_page = SubPage::Main;
                Vec::new()
            }
            SessionMessage::SelectForPlaylist(song) => {
                self.selected_for_playlist = Some(song);
                Vec::new()
            }
            SessionMessage::ClearPlaylistSelection => {
                self.selected_for_playlist = None;
                Vec::new()
            }

            SessionMessage::CreatePlaylist(data) => vec![SessionCommand::CreatePlaylist(data)],
            SessionMessage::DeletePlaylist(id) => vec![SessionCommand::DeletePlaylist(id)],
            SessionMessage::RenamePlaylist { playlist_id, name } => {
                vec![SessionCommand::RenamePlaylist { playlist_id, name }]
            }
            SessionMessage::AddSongToPlaylist {
                playlist_id,
                song_id,
            } => {
                // The dialog closes once a song was added
                self.selected_for_playlist = None;
                vec![SessionCommand::AddSongToPlaylist {
                    playlist_id,
                    song_id,
                }]
            }
            SessionMessage::RemoveSongFromPlaylist {
                playlist_id,
                song_id,
            } => vec![SessionCommand::RemoveSongFromPlaylist {
                playlist_id,
                song_id,
            }],

            SessionMessage::HistoryRecorded { song_id, result } => {
                self.on_history_recorded(&song_id, result)
            }
            SessionMessage::LikeToggled { song_id, result } => {
                if let Err(error) = result {
                    self.collaborator_failed(&format!("toggle like for {}", song_id), &error);
                }
                // The refresh overwrites the local mirror with the provider's value
                vec![SessionCommand::RefreshCatalog]
            }
            SessionMessage::TrackingStopped { ticket, result } => {
                self.on_tracking_stopped(&ticket, result);
                Vec::new()
            }
            SessionMessage::PlaylistUpdated { operation, result } => {
                self.on_playlist_updated(operation, result)
            }
        }
    }

    // ===== Transitions =====

    fn play(&mut self, song: Song) -> Vec<SessionCommand> {
        let before_state = self.session.state();
        let before_song = self.session.current_song_id().cloned();
        let song_id = song.id.clone();

        debug!("Playing song {} ({})", song_id, song.title);
        self.session.play(song);

        self.emit_song_change(before_song);
        self.emit_state_change(before_state);
        vec![SessionCommand::RecordHistory(song_id)]
    }

    fn close(&mut self) -> Vec<SessionCommand> {
        match self.session.begin_close() {
            Some(ticket) => {
                debug!("Closing player for song {}", ticket.song_id);
                vec![SessionCommand::StopTracking(ticket)]
            }
            None => Vec::new(),
        }
    }

    fn step(&mut self, direction: Direction) -> Vec<SessionCommand> {
        let Some(current_id) = self.session.current_song_id().cloned() else {
            return Vec::new();
        };
        if self.session.pending_close().is_some() {
            debug!("Close pending for {}; ignoring {:?}", current_id, direction);
            return Vec::new();
        }

        let len = self.catalog.songs.len();
        let Some(position) = self.catalog.position_of(&current_id) else {
            warn!(
                "Current song {} is not in the catalog ({} songs); ignoring {:?}",
                current_id, len, direction
            );
            self.pending_events.push(SessionEvent::Inconsistency {
                song_id: current_id,
            });
            return Vec::new();
        };

        let index = match direction {
            Direction::Forward => (position + 1) % len,
            Direction::Backward => (position + len - 1) % len,
        };

        let song = self.catalog.songs[index].clone();
        let song_id = song.id.clone();
        debug!("Moving {:?} from {} to {}", direction, current_id, song_id);

        self.session.select(song);
        self.emit_song_change(Some(current_id));
        vec![SessionCommand::RecordHistory(song_id)]
    }

    // ===== Completions =====

    fn on_catalog_loaded(&mut self, snapshot: CatalogSnapshot) {
        // Refreshes run concurrently; an older snapshot may land last
        if snapshot.revision < self.catalog.revision {
            debug!(
                "Ignoring stale catalog revision {} (holding {})",
                snapshot.revision, self.catalog.revision
            );
            return;
        }

        let identity_changed = self.resolved_revision != Some(snapshot.revision);
        debug!(
            "Catalog loaded: {} songs, revision {}, loading: {}",
            snapshot.songs.len(),
            snapshot.revision,
            snapshot.loading
        );
        self.catalog = snapshot;

        if self.session.reconcile_likes(&self.catalog) {
            debug!("Like mirror reconciled with catalog");
        }

        let before_state = self.session.state();
        let before_song = self.session.current_song_id().cloned();
        if self
            .session
            .try_resume(self.catalog.last_played_song.as_ref())
        {
            if let Some(song_id) = self.session.current_song_id().cloned() {
                debug!("Resumed last played song {}", song_id);
                self.emit_song_change(before_song);
                self.emit_state_change(before_state);
                self.pending_events.push(SessionEvent::Resumed { song_id });
            }
        }

        if identity_changed && !self.catalog.loading {
            self.resolved_revision = Some(self.catalog.revision);
            self.resolve_images();
        }
    }

    fn on_history_recorded(&mut self, song_id: &SongId, result: Result<()>) -> Vec<SessionCommand> {
        match result {
            Ok(()) => {
                debug!("Recorded listening history for {}", song_id);
                vec![SessionCommand::RefreshCatalog]
            }
            Err(error) => {
                self.collaborator_failed(&format!("record history for {}", song_id), &error);
                Vec::new()
            }
        }
    }

    fn on_tracking_stopped(&mut self, ticket: &CloseTicket, result: Result<()>) {
        let stop_tracking_error = result.err().map(|error| {
            warn!(
                "Failed to stop tracking song {}: {}",
                ticket.song_id, error
            );
            error.to_string()
        });

        let before_state = self.session.state();
        let before_song = self.session.current_song_id().cloned();
        if !self.session.finish_close(ticket) {
            debug!(
                "Discarding stale close for song {} (generation {})",
                ticket.song_id, ticket.generation
            );
            return;
        }

        self.emit_song_change(before_song);
        self.emit_state_change(before_state);
        self.pending_events
            .push(SessionEvent::Closed { stop_tracking_error });
    }

    fn on_playlist_updated(
        &mut self,
        operation: PlaylistOperation,
        result: Result<()>,
    ) -> Vec<SessionCommand> {
        match result {
            Ok(()) => debug!("Completed {}", operation),
            Err(error) => self.collaborator_failed(&operation.to_string(), &error),
        }
        vec![SessionCommand::RefreshCatalog]
    }

    // ===== Helpers =====

    fn resolve_images(&mut self) {
        let count = self.window.resolve_images(&self.catalog.songs);
        if count > 0 {
            debug!("Resolved {} new display images", count);
            self.pending_events
                .push(SessionEvent::ImagesResolved { count });
        }
    }

    fn collaborator_failed(&mut self, operation: &str, error: &TuneError) {
        warn!("Catalog provider failed to {}: {}", operation, error);
        self.pending_events.push(SessionEvent::CollaboratorFailed {
            operation: operation.to_string(),
            message: error.to_string(),
        });
    }

    fn emit_song_change(&mut self, previous_song_id: Option<SongId>) {
        let song_id = self.session.current_song_id().cloned();
        if song_id != previous_song_id {
            self.pending_events.push(SessionEvent::SongChanged {
                song_id,
                previous_song_id,
            });
        }
    }

    fn emit_state_change(&mut self, before: SessionState) {
        let state = self.session.state();
        if state != before {
            self.pending_events.push(SessionEvent::StateChanged { state });
        }
    }
}

impl Default for SessionCoordinator {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
