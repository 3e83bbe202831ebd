//! Async runtime around the coordinator
//!
//! Runs [`SessionCommand`]s against a [`CatalogProvider`] as spawned tokio
//! tasks and feeds their completions back through an mpsc channel. All
//! methods that dispatch must be called from within a Tokio runtime.

use crate::coordinator::SessionCoordinator;
use crate::error::{Result, SessionError};
use crate::events::{PlaylistOperation, SessionCommand, SessionEvent, SessionMessage};
use crate::types::{SessionConfig, SubPage, Tab};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use tunebox_core::{CatalogProvider, Song, SongId, TuneError};

/// Drives a [`SessionCoordinator`] against a catalog provider
pub struct SessionRuntime<C: CatalogProvider + 'static> {
    catalog: Arc<C>,
    coordinator: SessionCoordinator,
    tx: mpsc::UnboundedSender<SessionMessage>,
    rx: mpsc::UnboundedReceiver<SessionMessage>,

    /// Spawned commands whose completion has not been applied yet
    in_flight: usize,
}

impl<C: CatalogProvider + 'static> SessionRuntime<C> {
    /// Create a runtime; the config is validated first
    pub fn new(catalog: Arc<C>, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            catalog,
            coordinator: SessionCoordinator::new(config),
            tx,
            rx,
            in_flight: 0,
        })
    }

    pub fn coordinator(&self) -> &SessionCoordinator {
        &self.coordinator
    }

    pub fn catalog(&self) -> &Arc<C> {
        &self.catalog
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.coordinator.drain_events()
    }

    /// Read the catalog and hand it to the coordinator
    ///
    /// Triggers auto-resume when eligible. A failed read is applied as a
    /// refresh failure and also returned.
    pub async fn load(&mut self) -> Result<()> {
        match self.catalog.snapshot().await {
            Ok(snapshot) => {
                self.dispatch(SessionMessage::CatalogLoaded(snapshot));
                Ok(())
            }
            Err(error) => {
                let copy = TuneError::Other(error.to_string());
                self.dispatch(SessionMessage::CatalogRefreshFailed(copy));
                Err(SessionError::Catalog(error))
            }
        }
    }

    /// Apply a message and spawn the commands it produced
    pub fn dispatch(&mut self, message: SessionMessage) {
        for command in self.coordinator.update(message) {
            self.spawn(command);
        }
    }

    /// Apply completions until no command is in flight
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            let Some(message) = self.rx.recv().await else {
                break;
            };
            self.in_flight -= 1;
            self.dispatch(message);
        }
    }

    /// Close the player
    ///
    /// Commands already in flight are settled first, so a history write
    /// for the closing song cannot reopen tracking after it stopped. Then
    /// awaits stop-tracking inline. The session is cleared either way; a
    /// provider failure is returned so the caller can report it.
    pub async fn close(&mut self) -> Result<()> {
        self.settle().await;
        let mut outcome = Ok(());

        for command in self.coordinator.update(SessionMessage::Close) {
            let SessionCommand::StopTracking(ticket) = command else {
                self.spawn(command);
                continue;
            };

            let result = match self.catalog.stop_current_song_tracking().await {
                Ok(()) => Ok(()),
                Err(source) => {
                    let completion = Err(TuneError::Other(source.to_string()));
                    outcome = Err(SessionError::StopTracking {
                        song_id: ticket.song_id.clone(),
                        source,
                    });
                    completion
                }
            };
            self.dispatch(SessionMessage::TrackingStopped { ticket, result });
        }

        outcome
    }

    // ===== Callbacks =====

    pub fn play(&mut self, song: Song) {
        self.dispatch(SessionMessage::Play(song));
    }

    pub fn toggle_play(&mut self) {
        self.dispatch(SessionMessage::TogglePlay);
    }

    pub fn toggle_maximize(&mut self) {
        self.dispatch(SessionMessage::ToggleMaximize);
    }

    pub fn next(&mut self) {
        self.dispatch(SessionMessage::Next);
    }

    pub fn previous(&mut self) {
        self.dispatch(SessionMessage::Previous);
    }

    pub fn toggle_like(&mut self, song_id: SongId) {
        self.dispatch(SessionMessage::ToggleLike(song_id));
    }

    pub fn load_more(&mut self) {
        self.dispatch(SessionMessage::LoadMore);
    }

    // ===== Navigation =====

    pub fn select_tab(&mut self, tab: Tab) {
        self.dispatch(SessionMessage::SelectTab(tab));
    }

    pub fn open_playlists(&mut self) {
        self.dispatch(SessionMessage::OpenSubPage(SubPage::Playlists));
    }

    pub fn open_liked(&mut self) {
        self.dispatch(SessionMessage::OpenSubPage(SubPage::Liked));
    }

    pub fn back(&mut self) {
        self.dispatch(SessionMessage::Back);
    }

    /// Hold `song` for the add-to-playlist dialog
    pub fn select_song_for_playlist(&mut self, song: Song) {
        self.dispatch(SessionMessage::SelectForPlaylist(song));
    }

    pub fn clear_playlist_selection(&mut self) {
        self.dispatch(SessionMessage::ClearPlaylistSelection);
    }

    // ===== Command execution =====

    fn spawn(&mut self, command: SessionCommand) {
        debug!("Spawning {:?}", command);
        let catalog = Arc::clone(&self.catalog);
        let tx = self.tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let completion = execute(catalog.as_ref(), command).await;
            if tx.send(completion).is_err() {
                warn!("Session runtime dropped before a command completed");
            }
        });
    }
}

/// Run one command and turn its outcome into a completion message
async fn execute<C: CatalogProvider>(catalog: &C, command: SessionCommand) -> SessionMessage {
    match command {
        SessionCommand::RecordHistory(song_id) => {
            let result = catalog.record_listening_history(&song_id).await;
            SessionMessage::HistoryRecorded { song_id, result }
        }
        SessionCommand::StopTracking(ticket) => {
            let result = catalog.stop_current_song_tracking().await;
            SessionMessage::TrackingStopped { ticket, result }
        }
        SessionCommand::ToggleLike(song_id) => {
            let result = catalog.toggle_like(&song_id).await;
            SessionMessage::LikeToggled { song_id, result }
        }
        SessionCommand::CreatePlaylist(data) => SessionMessage::PlaylistUpdated {
            operation: PlaylistOperation::Create,
            result: catalog.create_playlist(data).await.map(|_| ()),
        },
        SessionCommand::DeletePlaylist(id) => SessionMessage::PlaylistUpdated {
            operation: PlaylistOperation::Delete,
            result: catalog.delete_playlist(&id).await,
        },
        SessionCommand::RenamePlaylist { playlist_id, name } => SessionMessage::PlaylistUpdated {
            operation: PlaylistOperation::Rename,
            result: catalog.rename_playlist(&playlist_id, &name).await,
        },
        SessionCommand::AddSongToPlaylist {
            playlist_id,
            song_id,
        } => SessionMessage::PlaylistUpdated {
            operation: PlaylistOperation::AddSong,
            result: catalog.add_song_to_playlist(&playlist_id, &song_id).await,
        },
        SessionCommand::RemoveSongFromPlaylist {
            playlist_id,
            song_id,
        } => SessionMessage::PlaylistUpdated {
            operation: PlaylistOperation::RemoveSong,
            result: catalog
                .remove_song_from_playlist(&playlist_id, &song_id)
                .await,
        },
        SessionCommand::RefreshCatalog => match catalog.snapshot().await {
            Ok(snapshot) => SessionMessage::CatalogLoaded(snapshot),
            Err(error) => SessionMessage::CatalogRefreshFailed(error),
        },
    }
}
