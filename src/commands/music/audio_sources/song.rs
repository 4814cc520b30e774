//! Defines the `Song` value object: a selected search result plus the local
//! file it will be (or has been) downloaded to.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// A queued or playing track.
///
/// Clones of a `Song` circulate between the queue, the current slot and the
/// history buffer; the playlist holding it is the source of truth for the
/// `downloaded` flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    /// The video title as returned by the search API.
    pub title: String,
    /// The platform video ID.
    pub video_id: String,
    /// Slugified title plus the audio extension, e.g. `never-gonna.mp3`.
    pub file_name: String,
    /// Full path of the audio file inside the data directory.
    pub path: PathBuf,
    /// True once the audio file has been fetched and transcoded.
    pub downloaded: bool,
    /// When the requester enqueued this song.
    pub requested_at: DateTime<Utc>,
}

impl Song {
    pub fn new(title: impl Into<String>, video_id: impl Into<String>, data_dir: &Path) -> Self {
        let title = title.into();
        let file_name = format!("{}.mp3", slugify(&title));
        let path = data_dir.join(&file_name);
        Self {
            title,
            video_id: video_id.into(),
            file_name,
            path,
            downloaded: false,
            requested_at: Utc::now(),
        }
    }

    /// The watch-page URL for this song's video.
    pub fn url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

/// Reduce a title to a filesystem-safe slug: lowercase alphanumerics with
/// single dashes in place of runs of anything else.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_dash = true; // suppress a leading dash
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn slugify_collapses_non_alphanumerics() {
        assert_eq!(slugify("Never Gonna Give You Up"), "never-gonna-give-you-up");
        assert_eq!(slugify("A!!B  C"), "a-b-c");
        assert_eq!(slugify("  trimmed?  "), "trimmed");
    }

    #[test]
    fn slugify_handles_unicode_titles() {
        // Non-ASCII characters are dropped rather than kept in filenames
        assert_eq!(slugify("café del mar"), "caf-del-mar");
    }

    #[test]
    fn song_derives_path_from_title() {
        let song = Song::new("My Song!", "abc123", Path::new("data"));
        assert_eq!(song.file_name, "my-song.mp3");
        assert_eq!(song.path, Path::new("data").join("my-song.mp3"));
        assert!(!song.downloaded);
        assert_eq!(song.url(), "https://www.youtube.com/watch?v=abc123");
    }
}
