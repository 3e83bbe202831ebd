//! Tunebox Catalog
//!
//! In-memory implementation of [`tunebox_core::CatalogProvider`].
//!
//! The catalog can be seeded from a JSON library file, keeps the listening
//! history, the most recently played song and the song currently being
//! tracked. It backs the CLI and the integration tests of the session crate.
//!
//! # Example
//!
//! ```rust
//! use tunebox_catalog::MemoryCatalog;
//! use tunebox_core::{CatalogProvider, Song, SongId};
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let catalog = MemoryCatalog::with_songs(vec![
//!     Song::new(SongId::new("1"), "So What", "Miles Davis"),
//! ]);
//!
//! catalog.record_listening_history(&SongId::new("1")).await.unwrap();
//! let last = catalog.last_played_song().await.unwrap();
//! assert_eq!(last.unwrap().id, SongId::new("1"));
//! # });
//! ```

mod library;
mod memory;

pub use library::LibraryFile;
pub use memory::{ListeningEntry, MemoryCatalog};
