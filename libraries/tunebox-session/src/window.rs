//! Incremental display window
//!
//! Tracks how much of the catalog the home view shows and resolves display
//! images for exactly that prefix. Both the visible count and the resolved
//! image map only ever grow.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tunebox_core::{Song, SongId};

/// Composes display image URLs from opaque image references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEndpoint {
    base: String,
}

impl ImageEndpoint {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Build the URL for an image reference
    ///
    /// References are opaque and appended as given; producing a
    /// URL-safe reference is the provider's job.
    pub fn resolve(&self, image_ref: &str) -> String {
        format!("{}{}", self.base, image_ref)
    }
}

/// Resolve images for the first `visible_count` songs
///
/// Songs that already have an entry are skipped, so calling this again with
/// the same window is a no-op. Returns the number of new entries.
pub fn resolve_visible_images(
    endpoint: &ImageEndpoint,
    songs: &[Song],
    visible_count: usize,
    resolved: &mut HashMap<SongId, String>,
) -> usize {
    let mut added = 0;
    for song in songs.iter().take(visible_count) {
        if let Entry::Vacant(entry) = resolved.entry(song.id.clone()) {
            entry.insert(endpoint.resolve(&song.image_ref));
            added += 1;
        }
    }
    added
}

/// Growing prefix of the catalog exposed to the home view
#[derive(Debug, Clone)]
pub struct DisplayWindow {
    visible_count: usize,
    page_size: usize,
    endpoint: ImageEndpoint,
    resolved_images: HashMap<SongId, String>,
}

impl DisplayWindow {
    pub fn new(initial_visible: usize, page_size: usize, endpoint: ImageEndpoint) -> Self {
        Self {
            visible_count: initial_visible,
            page_size,
            endpoint,
            resolved_images: HashMap::new(),
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Grow the window by one page
    ///
    /// No upper bound is applied; gate the affordance with [`Self::has_more`].
    pub fn load_more(&mut self) -> usize {
        self.visible_count += self.page_size;
        self.visible_count
    }

    /// Whether the catalog extends past the window
    pub fn has_more(&self, total: usize) -> bool {
        self.visible_count < total
    }

    /// The visible prefix of `songs`
    pub fn visible<'a>(&self, songs: &'a [Song]) -> &'a [Song] {
        &songs[..self.visible_count.min(songs.len())]
    }

    /// Resolve images for the current window
    pub fn resolve_images(&mut self, songs: &[Song]) -> usize {
        resolve_visible_images(
            &self.endpoint,
            songs,
            self.visible_count,
            &mut self.resolved_images,
        )
    }

    pub fn resolved_images(&self) -> &HashMap<SongId, String> {
        &self.resolved_images
    }

    pub fn image_url(&self, song_id: &SongId) -> Option<&str> {
        self.resolved_images.get(song_id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn songs(n: usize) -> Vec<Song> {
        (0..n)
            .map(|i| {
                Song::new(SongId::new(i.to_string()), format!("Song {}", i), "Artist")
                    .with_image_ref(format!("img{}", i))
            })
            .collect()
    }

    fn window() -> DisplayWindow {
        DisplayWindow::new(15, 15, ImageEndpoint::new("/api/image-proxy?fileid="))
    }

    #[test]
    fn endpoint_appends_reference() {
        let endpoint = ImageEndpoint::new("/api/image-proxy?fileid=");
        assert_eq!(endpoint.resolve("abc123"), "/api/image-proxy?fileid=abc123");
        // Passed through untouched, already-encoded ones included
        assert_eq!(endpoint.resolve("a%20b"), "/api/image-proxy?fileid=a%20b");
        assert_eq!(endpoint.resolve(""), "/api/image-proxy?fileid=");
    }

    #[test]
    fn load_more_adds_one_page() {
        let mut window = window();
        assert_eq!(window.load_more(), 30);
        assert_eq!(window.load_more(), 45);
    }

    #[test]
    fn visible_slice_is_clamped() {
        let catalog = songs(20);
        let mut window = window();

        assert_eq!(window.visible(&catalog).len(), 15);
        assert!(window.has_more(catalog.len()));

        window.load_more();
        assert_eq!(window.visible(&catalog).len(), 20);
        assert!(!window.has_more(catalog.len()));
    }

    #[test]
    fn resolves_only_the_window() {
        let catalog = songs(40);
        let mut window = window();

        assert_eq!(window.resolve_images(&catalog), 15);
        assert!(window.image_url(&SongId::new("14")).is_some());
        assert!(window.image_url(&SongId::new("15")).is_none());

        window.load_more();
        assert_eq!(window.resolve_images(&catalog), 15);
        assert_eq!(window.resolved_images().len(), 30);
    }

    #[test]
    fn resolution_is_idempotent() {
        let catalog = songs(10);
        let mut window = window();

        window.resolve_images(&catalog);
        let first = window.resolved_images().clone();

        assert_eq!(window.resolve_images(&catalog), 0);
        assert_eq!(window.resolved_images(), &first);
    }

    #[test]
    fn existing_entries_are_never_recomputed() {
        let mut resolved = HashMap::new();
        resolved.insert(SongId::new("0"), "cached".to_string());

        let added = resolve_visible_images(
            &ImageEndpoint::new("/img?id="),
            &songs(2),
            2,
            &mut resolved,
        );

        assert_eq!(added, 1);
        assert_eq!(resolved[&SongId::new("0")], "cached");
        assert_eq!(resolved[&SongId::new("1")], "/img?id=img1");
    }
}
