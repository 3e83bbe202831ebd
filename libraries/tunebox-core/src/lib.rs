//! Tunebox Core
//!
//! Domain types, the catalog provider contract and error handling shared by
//! every Tunebox crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `Playlist`, `CreatePlaylist`
//! - **Identifiers**: `SongId`, `PlaylistId`
//! - **Catalog Contract**: the async `CatalogProvider` trait and the
//!   `CatalogSnapshot` it can be read into
//! - **Error Handling**: unified `TuneError` and `Result` types
//! - **Formatting**: `format_count` for compact play/like counters
//!
//! # Example
//!
//! ```rust
//! use tunebox_core::{format_count, Song, SongId};
//!
//! let song = Song::new(SongId::new("s1"), "Blue in Green", "Miles Davis")
//!     .with_image_ref("img-42")
//!     .with_play_count(1_500);
//!
//! assert_eq!(song.id.as_str(), "s1");
//! assert_eq!(format_count(song.play_count), "1.5K");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod format;
pub mod types;

// Re-export commonly used types
pub use catalog::{CatalogProvider, CatalogSnapshot};
pub use error::{Result, TuneError};
pub use format::format_count;
pub use types::{CreatePlaylist, Playlist, PlaylistId, Song, SongId};
