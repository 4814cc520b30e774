//! Environment-driven configuration, collected once at startup.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::Error;

/// Runtime configuration for the bot.
///
/// Everything comes from environment variables (a `.env` file is loaded before
/// this runs). Only the Discord token and YouTube API key are mandatory.
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub youtube_api_key: String,

    /// Directory that downloaded audio files are written to.
    pub data_dir: PathBuf,
    /// Directory holding the canned images served by `/meme`.
    pub images_dir: PathBuf,

    /// Downloads larger than this many bytes are refused.
    pub max_download_bytes: u64,
    /// How long the bot may sit in a voice channel without playing anything
    /// before it disconnects itself.
    pub idle_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        let config = Self {
            discord_token: env::var("DISCORD_TOKEN")
                .map_err(|_| "Missing DISCORD_TOKEN")?,
            youtube_api_key: env::var("YOUTUBE_API_KEY")
                .map_err(|_| "Missing YOUTUBE_API_KEY")?,
            data_dir: env::var("DATA_DIR")
                .unwrap_or_else(|_| "data".to_string())
                .into(),
            images_dir: env::var("IMAGES_DIR")
                .unwrap_or_else(|_| "images".to_string())
                .into(),
            max_download_bytes: env::var("MAX_DOWNLOAD_BYTES")
                .unwrap_or_else(|_| "10000000".to_string())
                .parse()?,
            idle_timeout: Duration::from_secs(
                env::var("IDLE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "600".to_string())
                    .parse()?,
            ),
        };

        std::fs::create_dir_all(&config.data_dir)?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.max_download_bytes == 0 {
            return Err("MAX_DOWNLOAD_BYTES must be greater than 0".into());
        }
        if self.idle_timeout.is_zero() {
            return Err("IDLE_TIMEOUT_SECS must be greater than 0".into());
        }
        Ok(())
    }

    /// Token-free summary for the startup log.
    pub fn summary(&self) -> String {
        format!(
            "data dir: {}, images dir: {}, download cap: {} bytes, idle timeout: {}s",
            self.data_dir.display(),
            self.images_dir.display(),
            self.max_download_bytes,
            self.idle_timeout.as_secs(),
        )
    }
}
