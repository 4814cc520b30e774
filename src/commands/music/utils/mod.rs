use thiserror::Error;

pub mod embedded_messages;
pub mod event_handlers;
pub mod player;
pub mod playlist;
pub mod registry;
pub mod storage;

/// Errors that can occur during music operations
#[derive(Error, Debug)]
pub enum MusicError {
    #[error("Not in a guild")]
    NotInGuild,

    #[error("User is not in a voice channel")]
    UserNotInVoiceChannel,

    #[error("Failed to get voice manager")]
    NoVoiceManager,

    #[error("Not connected to a voice channel")]
    NotConnected,

    #[error("Failed to join voice channel: {0}")]
    JoinError(String),

    #[error("Daily quota for the search API has been exhausted")]
    SearchQuotaExceeded,

    #[error("Search returned no results")]
    SearchEmpty,

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("File for '{0}' exceeds the download size cap")]
    DownloadTooLarge(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Failed to leave voice channel: {0}")]
    DisconnectFailed(String),
}

/// Result type for music operations
pub type MusicResult<T> = Result<T, MusicError>;
