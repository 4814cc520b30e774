//! Abstractions over the two external services the music subsystem consumes:
//! the video-search API and the audio download/transcode tool. Both sit behind
//! traits so commands and the player never talk to the network directly.

pub mod song;
pub mod youtube;
pub mod ytdlp;

use serenity::async_trait;

use super::utils::MusicError;
pub use song::Song;

/// A single ranked search hit: the video's title and its platform ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub video_id: String,
}

/// Maps a text query to a small ranked list of search hits.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, MusicError>;

    /// Resolves a known video ID to its title, bypassing the search quota-cost
    /// of a full query. Used when the user pastes a URL.
    async fn lookup(&self, video_id: &str) -> Result<SearchResult, MusicError>;
}

/// Fetches and transcodes a song's audio to the local file at `song.path`.
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn fetch(&self, song: &Song) -> Result<(), MusicError>;
}

/// Resolve user input to a single hit. Recognized watch URLs go through
/// `lookup`, which costs no search quota; anything else is a single-result
/// search. A provider returning no hits is an empty search either way.
pub async fn resolve_query(
    search: &dyn SearchProvider,
    query: &str,
) -> Result<SearchResult, MusicError> {
    if youtube::YoutubeSearchClient::is_youtube_url(query) {
        let video_id = youtube::YoutubeSearchClient::extract_video_id(query)?;
        return search.lookup(&video_id).await;
    }

    let hits = search.search(query, 1).await?;
    hits.into_iter().next().ok_or(MusicError::SearchEmpty)
}
