//! Plain-text rendering of views, the player bar and session events

use std::fmt::Write;
use tunebox_core::{format_count, Song};
use tunebox_session::{SessionCoordinator, SessionEvent, SessionState, View};

/// One catalog line: `id  title - artist  (plays)`
pub fn song_line(song: &Song) -> String {
    let heart = if song.is_liked { " ♥" } else { "" };
    format!(
        "{:>6}  {} - {}  ({} plays){}",
        song.id,
        song.title,
        song.artist,
        format_count(song.play_count),
        heart
    )
}

/// Render the main content area
pub fn render_view(view: &View<'_>) -> String {
    let mut out = String::new();

    match view {
        View::Loading => out.push_str("Loading library...\n"),
        View::Playlists { playlists } => {
            out.push_str("== Playlists ==\n");
            if playlists.is_empty() {
                out.push_str("  (no playlists)\n");
            }
            for playlist in *playlists {
                let _ = writeln!(
                    out,
                    "  [{}] {} ({} songs)",
                    playlist.id,
                    playlist.name,
                    playlist.songs.len()
                );
            }
        }
        View::LikedSongs { songs } => {
            out.push_str("== Liked Songs ==\n");
            if songs.is_empty() {
                out.push_str("  (nothing liked yet)\n");
            }
            for song in *songs {
                let _ = writeln!(out, "{}", song_line(song));
            }
        }
        View::Home {
            songs,
            images,
            has_more,
        } => {
            out.push_str("== Home ==\n");
            for song in *songs {
                let _ = writeln!(out, "{}", song_line(song));
                if let Some(url) = images.get(&song.id) {
                    let _ = writeln!(out, "        {}", url);
                }
            }
            if *has_more {
                out.push_str("  ... type `more` for the next page\n");
            }
        }
        View::Search { songs } => {
            let _ = writeln!(out, "== Search ({} songs) ==", songs.len());
            for song in *songs {
                let _ = writeln!(out, "{}", song_line(song));
            }
        }
        View::Settings => {
            out.push_str("== Settings ==\n");
            out.push_str("  page playlists    manage playlists\n");
            out.push_str("  page liked        liked songs\n");
        }
    }

    out
}

/// Render the player bar, or nothing while idle
pub fn render_player(coordinator: &SessionCoordinator) -> Option<String> {
    let session = coordinator.session();
    let song = session.current_song()?;

    let state = match session.state() {
        SessionState::Playing => "▶",
        SessionState::Paused => "⏸",
        SessionState::Idle => return None,
    };
    let size = if session.is_maximized() { " [max]" } else { "" };

    Some(format!("{} {}{}", state, song_line(song).trim_start(), size))
}

/// Render the whole screen: player bar, content and navigation
pub fn render_screen(coordinator: &SessionCoordinator) -> String {
    let mut out = render_view(&coordinator.view());

    if let Some(player) = render_player(coordinator) {
        let _ = writeln!(out, "---\n{}", player);
    }
    if coordinator.nav_visible() {
        let _ = writeln!(out, "[tab: {:?}]  home | search | settings", coordinator.tab());
    }

    out
}

/// One line per event worth telling the user about
pub fn render_event(event: &SessionEvent) -> Option<String> {
    match event {
        SessionEvent::Resumed { song_id } => Some(format!("Resumed {}", song_id)),
        SessionEvent::Inconsistency { song_id } => Some(format!(
            "Current song {} is no longer in the library",
            song_id
        )),
        SessionEvent::CollaboratorFailed { operation, message } => {
            Some(format!("Could not {}: {}", operation, message))
        }
        SessionEvent::Closed {
            stop_tracking_error: Some(error),
        } => Some(format!("Player closed (tracking error: {})", error)),
        SessionEvent::Closed { .. } => Some("Player closed".to_string()),
        SessionEvent::StateChanged { .. }
        | SessionEvent::SongChanged { .. }
        | SessionEvent::ImagesResolved { .. } => None,
    }
}
