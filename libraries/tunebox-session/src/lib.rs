//! Tunebox Session
//!
//! Playback session coordination for Tunebox.
//!
//! This crate provides:
//! - The playback session state machine (Idle / Paused / Playing)
//! - Resume-on-load of the most recently played song, at most once
//! - Next/previous navigation with wrap-around over the catalog order
//! - Close sequencing with stop-tracking, guarded against stale completions
//! - An incremental display window with lazy image resolution
//! - View routing over tabs and sub-pages
//!
//! # Architecture
//!
//! [`SessionCoordinator`] is synchronous: it applies one [`SessionMessage`]
//! at a time and returns the [`SessionCommand`]s to run against the catalog
//! provider. [`SessionRuntime`] executes those commands on Tokio and feeds the
//! completions back, so the coordinator never awaits anything itself.
//!
//! # Example
//!
//! ```rust
//! use tunebox_core::{Song, SongId};
//! use tunebox_session::{SessionCommand, SessionCoordinator, SessionMessage, SessionState};
//!
//! let mut coordinator = SessionCoordinator::default();
//! let song = Song::new(SongId::new("1"), "So What", "Miles Davis");
//!
//! let commands = coordinator.update(SessionMessage::Play(song));
//! assert_eq!(coordinator.state(), SessionState::Playing);
//! assert_eq!(commands, vec![SessionCommand::RecordHistory(SongId::new("1"))]);
//! ```

#![forbid(unsafe_code)]

pub mod coordinator;
pub mod error;
pub mod events;
pub mod router;
pub mod runtime;
pub mod session;
pub mod types;
pub mod window;

pub use coordinator::SessionCoordinator;
pub use error::{Result, SessionError};
pub use events::{PlaylistOperation, SessionCommand, SessionEvent, SessionMessage};
pub use router::{route, View, ViewKind};
pub use runtime::SessionRuntime;
pub use session::{CloseTicket, PlaybackSession};
pub use types::{SessionConfig, SessionState, SubPage, Tab, DEFAULT_IMAGE_ENDPOINT, DEFAULT_PAGE_SIZE};
pub use window::{resolve_visible_images, DisplayWindow, ImageEndpoint};
