//! Shared fixtures for the integration tests.

use std::path::Path;

use jukebot::commands::music::audio_sources::Song;

/// A song whose video ID is derived from its title, placed in `data_dir`.
pub fn song(title: &str, data_dir: &Path) -> Song {
    Song::new(title, format!("id-{title}"), data_dir)
}

/// Same as [`song`], but already flagged as downloaded.
#[allow(dead_code)]
pub fn downloaded_song(title: &str, data_dir: &Path) -> Song {
    let mut song = song(title, data_dir);
    song.downloaded = true;
    song
}
