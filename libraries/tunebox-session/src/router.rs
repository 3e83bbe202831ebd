//! View routing
//!
//! Maps the navigation state onto exactly one read-only view.

use crate::types::{SubPage, Tab};
use crate::window::DisplayWindow;
use std::collections::HashMap;
use tunebox_core::{CatalogSnapshot, Playlist, Song, SongId};

/// View selected for the main content area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<'a> {
    /// Catalog still loading
    Loading,

    /// Playlist management
    Playlists { playlists: &'a [Playlist] },

    /// Liked songs
    LikedSongs { songs: &'a [Song] },

    /// Paged catalog with resolved images
    Home {
        songs: &'a [Song],
        images: &'a HashMap<SongId, String>,
        has_more: bool,
    },

    /// Full, unpaged catalog
    Search { songs: &'a [Song] },

    /// Settings, linking to the sub-pages
    Settings,
}

/// Data-free discriminant of [`View`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Loading,
    Playlists,
    LikedSongs,
    Home,
    Search,
    Settings,
}

impl View<'_> {
    pub fn kind(&self) -> ViewKind {
        match self {
            View::Loading => ViewKind::Loading,
            View::Playlists { .. } => ViewKind::Playlists,
            View::LikedSongs { .. } => ViewKind::LikedSongs,
            View::Home { .. } => ViewKind::Home,
            View::Search { .. } => ViewKind::Search,
            View::Settings => ViewKind::Settings,
        }
    }
}

/// Pick the view for the current navigation state
///
/// Loading wins over everything; a non-main sub-page wins over the tab.
pub fn route<'a>(
    catalog: &'a CatalogSnapshot,
    window: &'a DisplayWindow,
    sub_page: SubPage,
    tab: Tab,
) -> View<'a> {
    if catalog.loading {
        return View::Loading;
    }

    match sub_page {
        SubPage::Playlists => {
            return View::Playlists {
                playlists: &catalog.playlists,
            }
        }
        SubPage::Liked => {
            return View::LikedSongs {
                songs: &catalog.liked_songs,
            }
        }
        SubPage::Main => {}
    }

    match tab {
        Tab::Home => View::Home {
            songs: window.visible(&catalog.songs),
            images: window.resolved_images(),
            has_more: window.has_more(catalog.songs.len()),
        },
        Tab::Search => View::Search {
            songs: &catalog.songs,
        },
        Tab::Settings => View::Settings,
    }
}
