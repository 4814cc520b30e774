//! Implements the `Downloader` trait with the `yt-dlp` command-line tool:
//! fetches a video's audio and transcodes it to mp3 under the data directory.

use std::sync::Arc;

use serenity::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::{Downloader, Song};
use crate::commands::music::utils::MusicError;
use crate::config::Config;

pub struct YtDlpDownloader {
    config: Arc<Config>,
}

impl YtDlpDownloader {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Output template handing the container choice to yt-dlp; the
    /// postprocessor renames to `.mp3` once transcoding finishes.
    fn output_template(&self, song: &Song) -> String {
        let stem = song.file_name.trim_end_matches(".mp3");
        format!("{}/{}.%(ext)s", self.config.data_dir.display(), stem)
    }
}

#[async_trait]
impl Downloader for YtDlpDownloader {
    async fn fetch(&self, song: &Song) -> Result<(), MusicError> {
        debug!("Downloading audio for '{}' ({})", song.title, song.video_id);

        let output = Command::new("yt-dlp")
            .args([
                "--no-playlist",
                "--max-filesize",
                &self.config.max_download_bytes.to_string(),
                "-x",
                "--audio-format",
                "mp3",
                "-o",
                &self.output_template(song),
                &song.url(),
            ])
            .output()
            .await
            .map_err(|e| MusicError::DownloadFailed(format!("failed to run yt-dlp: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MusicError::DownloadFailed(stderr.trim().to_string()));
        }

        // yt-dlp exits 0 when --max-filesize makes it skip the download; the
        // missing output file is the only signal.
        if !song.path.exists() {
            return Err(MusicError::DownloadTooLarge(song.title.clone()));
        }

        info!("Downloaded '{}' to {}", song.title, song.path.display());
        Ok(())
    }
}
