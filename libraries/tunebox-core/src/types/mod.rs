mod ids;
mod playlist;
mod song;

pub use ids::{PlaylistId, SongId};
pub use playlist::{CreatePlaylist, Playlist};
pub use song::Song;
