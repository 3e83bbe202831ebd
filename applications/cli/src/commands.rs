//! Interactive commands
//!
//! One line of input parses into a [`ReplCommand`], which [`execute`] turns
//! into session messages.

use crate::error::{CliError, Result};
use tracing::warn;
use tunebox_core::{CatalogProvider, CreatePlaylist, PlaylistId, SongId};
use tunebox_session::{SessionMessage, SessionRuntime, SubPage, Tab};

pub const HELP: &str = "\
commands:
  play <song-id>                     play a song
  toggle                             play / pause
  next | prev                        move through the catalog
  close                              close the player
  like [song-id]                     like or unlike (default: current song)
  max                                maximize / minimize the player
  more                               show another page of songs
  tab <home|search|settings>         switch tab
  page <main|playlists|liked>        open a page
  back                               return to the main page
  select <song-id>                   pick a song for `playlist add`
  playlist new <name>
  playlist rm <playlist-id>
  playlist rename <playlist-id> <name>
  playlist add <playlist-id> [song-id]
  playlist del <playlist-id> <song-id>
  show                               print the current view
  help | quit";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Play(SongId),
    Toggle,
    Next,
    Previous,
    Close,
    Like(Option<SongId>),
    Maximize,
    More,
    Tab(Tab),
    Page(SubPage),
    Back,
    Select(SongId),
    PlaylistNew(String),
    PlaylistRemove(PlaylistId),
    PlaylistRename(PlaylistId, String),
    /// Add a song, or the selected one when no song is given
    PlaylistAdd(PlaylistId, Option<SongId>),
    PlaylistDelete(PlaylistId, SongId),
    Show,
    Help,
    Quit,
}

/// Whether the loop keeps reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parse one input line; blank lines yield `None`
pub fn parse_command(line: &str) -> Result<Option<ReplCommand>> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match (verb, rest.as_slice()) {
        ("play", [id]) => ReplCommand::Play(SongId::new(*id)),
        ("toggle", []) => ReplCommand::Toggle,
        ("next", []) => ReplCommand::Next,
        ("prev" | "previous", []) => ReplCommand::Previous,
        ("close", []) => ReplCommand::Close,
        ("like", []) => ReplCommand::Like(None),
        ("like", [id]) => ReplCommand::Like(Some(SongId::new(*id))),
        ("max", []) => ReplCommand::Maximize,
        ("more", []) => ReplCommand::More,
        ("tab", [name]) => ReplCommand::Tab(Tab::parse(name)),
        ("page", [name]) => ReplCommand::Page(
            SubPage::parse(name)
                .ok_or_else(|| CliError::Command(format!("unknown page '{}'", name)))?,
        ),
        ("back", []) => ReplCommand::Back,
        ("select", [id]) => ReplCommand::Select(SongId::new(*id)),
        ("playlist", args) => parse_playlist(args)?,
        ("show", []) => ReplCommand::Show,
        ("help" | "?", []) => ReplCommand::Help,
        ("quit" | "exit", []) => ReplCommand::Quit,
        _ => return Err(CliError::Command(format!("cannot parse '{}'", line.trim()))),
    };

    Ok(Some(command))
}

fn parse_playlist(args: &[&str]) -> Result<ReplCommand> {
    let command = match args {
        ["new", name @ ..] if !name.is_empty() => ReplCommand::PlaylistNew(name.join(" ")),
        ["rm", id] => ReplCommand::PlaylistRemove(PlaylistId::new(*id)),
        ["rename", id, name @ ..] if !name.is_empty() => {
            ReplCommand::PlaylistRename(PlaylistId::new(*id), name.join(" "))
        }
        ["add", id] => ReplCommand::PlaylistAdd(PlaylistId::new(*id), None),
        ["add", id, song] => ReplCommand::PlaylistAdd(PlaylistId::new(*id), Some(SongId::new(*song))),
        ["del", id, song] => ReplCommand::PlaylistDelete(PlaylistId::new(*id), SongId::new(*song)),
        _ => {
            return Err(CliError::Command(
                "usage: playlist new|rm|rename|add|del ...".to_string(),
            ))
        }
    };
    Ok(command)
}

/// Apply a command to the session
///
/// Commands that name an unknown song, or need a current or selected song
/// that is missing, are rejected without touching the session.
pub async fn execute<C: CatalogProvider + 'static>(
    runtime: &mut SessionRuntime<C>,
    command: ReplCommand,
) -> Result<Flow> {
    let message = match command {
        ReplCommand::Play(id) => SessionMessage::Play(lookup(runtime, &id)?),
        ReplCommand::Toggle => SessionMessage::TogglePlay,
        ReplCommand::Next => SessionMessage::Next,
        ReplCommand::Previous => SessionMessage::Previous,
        ReplCommand::Close => {
            if let Err(e) = runtime.close().await {
                warn!("Player closed, but stop-tracking failed: {}", e);
            }
            return Ok(Flow::Continue);
        }
        ReplCommand::Like(id) => {
            let id = match id {
                Some(id) => id,
                None => runtime
                    .coordinator()
                    .session()
                    .current_song_id()
                    .cloned()
                    .ok_or_else(|| CliError::Command("nothing is playing".to_string()))?,
            };
            SessionMessage::ToggleLike(id)
        }
        ReplCommand::Maximize => SessionMessage::ToggleMaximize,
        ReplCommand::More => SessionMessage::LoadMore,
        ReplCommand::Tab(tab) => SessionMessage::SelectTab(tab),
        ReplCommand::Page(SubPage::Main) => SessionMessage::Back,
        ReplCommand::Page(page) => SessionMessage::OpenSubPage(page),
        ReplCommand::Back => SessionMessage::Back,
        ReplCommand::Select(id) => SessionMessage::SelectForPlaylist(lookup(runtime, &id)?),
        ReplCommand::PlaylistNew(name) => SessionMessage::CreatePlaylist(CreatePlaylist::new(name)),
        ReplCommand::PlaylistRemove(id) => SessionMessage::DeletePlaylist(id),
        ReplCommand::PlaylistRename(playlist_id, name) => {
            SessionMessage::RenamePlaylist { playlist_id, name }
        }
        ReplCommand::PlaylistAdd(playlist_id, song_id) => {
            let song_id = match song_id {
                Some(id) => id,
                None => runtime
                    .coordinator()
                    .selected_for_playlist()
                    .map(|s| s.id.clone())
                    .ok_or_else(|| CliError::Command("no song selected".to_string()))?,
            };
            SessionMessage::AddSongToPlaylist {
                playlist_id,
                song_id,
            }
        }
        ReplCommand::PlaylistDelete(playlist_id, song_id) => SessionMessage::RemoveSongFromPlaylist {
            playlist_id,
            song_id,
        },
        ReplCommand::Show | ReplCommand::Help => return Ok(Flow::Continue),
        ReplCommand::Quit => return Ok(Flow::Quit),
    };

    runtime.dispatch(message);
    Ok(Flow::Continue)
}

fn lookup<C: CatalogProvider + 'static>(
    runtime: &SessionRuntime<C>,
    id: &SongId,
) -> Result<tunebox_core::Song> {
    runtime
        .coordinator()
        .catalog()
        .song(id)
        .cloned()
        .ok_or_else(|| CliError::Command(format!("unknown song '{}'", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ReplCommand {
        parse_command(line).unwrap().unwrap()
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn player_commands() {
        assert_eq!(parse("play 42"), ReplCommand::Play(SongId::new("42")));
        assert_eq!(parse("toggle"), ReplCommand::Toggle);
        assert_eq!(parse("prev"), ReplCommand::Previous);
        assert_eq!(parse("like"), ReplCommand::Like(None));
        assert_eq!(parse("like 7"), ReplCommand::Like(Some(SongId::new("7"))));
    }

    #[test]
    fn navigation_commands() {
        assert_eq!(parse("tab search"), ReplCommand::Tab(Tab::Search));
        assert_eq!(parse("tab nowhere"), ReplCommand::Tab(Tab::Home));
        assert_eq!(parse("page liked"), ReplCommand::Page(SubPage::Liked));
        assert!(parse_command("page albums").is_err());
    }

    #[test]
    fn playlist_commands_keep_spaces_in_names() {
        assert_eq!(
            parse("playlist new Late Night Jazz"),
            ReplCommand::PlaylistNew("Late Night Jazz".to_string())
        );
        assert_eq!(
            parse("playlist rename p1 Road Trip"),
            ReplCommand::PlaylistRename(PlaylistId::new("p1"), "Road Trip".to_string())
        );
        assert_eq!(
            parse("playlist add p1"),
            ReplCommand::PlaylistAdd(PlaylistId::new("p1"), None)
        );
        assert!(parse_command("playlist new").is_err());
    }

    #[test]
    fn unknown_commands_are_errors() {
        assert!(matches!(
            parse_command("dance"),
            Err(CliError::Command(_))
        ));
        assert!(parse_command("play").is_err());
    }
}
