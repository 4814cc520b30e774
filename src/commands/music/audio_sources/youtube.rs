//! YouTube Data API v3 client implementing the `SearchProvider` trait, plus
//! helpers for recognizing watch URLs and extracting video IDs.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::StatusCode;
use serde::Deserialize;
use serenity::async_trait;
use tracing::{debug, info};
use url::Url;

use super::{SearchProvider, SearchResult};
use crate::commands::music::utils::MusicError;

const API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Regex to match and capture YouTube video URLs (various formats).
static YOUTUBE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:https?:)?//)?((?:www|m)\.)?((?:youtube\.com|youtu.be))(/(?:[\w\-]+\?v=|embed/|v/)?)([\w\-]+)(\S+)?$").unwrap()
});

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    snippet: Snippet,
}

/// Keyed search client over the YouTube Data API v3.
///
/// The daily quota on the `search.list` endpoint is the scarce resource here;
/// an HTTP 403 is reported as `SearchQuotaExceeded` so callers can tell the
/// requester to come back tomorrow.
pub struct YoutubeSearchClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YoutubeSearchClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, API_BASE_URL.to_string())
    }

    /// Point the client at an alternative endpoint. Tests use this to target a
    /// local stub server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            http,
            api_key,
            base_url,
        }
    }

    /// Checks if the input string is a valid YouTube URL (watch page or youtu.be).
    pub fn is_youtube_url(query: &str) -> bool {
        match Url::parse(query) {
            Ok(url) => {
                url.host_str().is_some_and(|host| {
                    host == "www.youtube.com" || host == "youtube.com" || host == "youtu.be"
                }) && url.path().starts_with("/watch")
                    || url.host_str() == Some("youtu.be")
            }
            Err(_) => false,
        }
    }

    /// Extracts the video ID from various YouTube URL formats using regex.
    pub fn extract_video_id(url: &str) -> Result<String, MusicError> {
        YOUTUBE_REGEX
            .captures(url)
            .and_then(|captures| captures.get(5))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| MusicError::SearchFailed("Could not extract video ID".to_string()))
    }
}

#[async_trait]
impl SearchProvider for YoutubeSearchClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, MusicError> {
        debug!("Searching YouTube for: {}", query);

        let url = format!("{}/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", &max_results.to_string()),
                ("q", query),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| MusicError::SearchFailed(e.to_string()))?;

        if response.status() == StatusCode::FORBIDDEN {
            return Err(MusicError::SearchQuotaExceeded);
        }
        if !response.status().is_success() {
            return Err(MusicError::SearchFailed(format!(
                "search API returned {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| MusicError::SearchFailed(e.to_string()))?;

        if body.items.is_empty() {
            return Err(MusicError::SearchEmpty);
        }

        let results: Vec<SearchResult> = body
            .items
            .into_iter()
            .map(|item| SearchResult {
                title: unescape_html(&item.snippet.title),
                video_id: item.id.video_id,
            })
            .collect();

        info!("YouTube search for '{}': {} hits", query, results.len());
        Ok(results)
    }

    async fn lookup(&self, video_id: &str) -> Result<SearchResult, MusicError> {
        let url = format!("{}/videos", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("id", video_id),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| MusicError::SearchFailed(e.to_string()))?;

        if response.status() == StatusCode::FORBIDDEN {
            return Err(MusicError::SearchQuotaExceeded);
        }
        if !response.status().is_success() {
            return Err(MusicError::SearchFailed(format!(
                "videos API returned {}",
                response.status()
            )));
        }

        let body: VideosResponse = response
            .json()
            .await
            .map_err(|e| MusicError::SearchFailed(e.to_string()))?;

        let item = body.items.into_iter().next().ok_or(MusicError::SearchEmpty)?;
        Ok(SearchResult {
            title: unescape_html(&item.snippet.title),
            video_id: item.id,
        })
    }
}

/// The API escapes titles as HTML; undo the entities that actually show up in
/// video titles.
fn unescape_html(input: &str) -> String {
    input
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_watch_and_short_urls() {
        assert!(YoutubeSearchClient::is_youtube_url(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        ));
        assert!(YoutubeSearchClient::is_youtube_url(
            "https://youtu.be/dQw4w9WgXcQ"
        ));
        assert!(!YoutubeSearchClient::is_youtube_url("rick astley hits"));
        assert!(!YoutubeSearchClient::is_youtube_url(
            "https://example.com/watch?v=nope"
        ));
    }

    #[test]
    fn extracts_video_ids() {
        assert_eq!(
            YoutubeSearchClient::extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
                .unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            YoutubeSearchClient::extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert!(YoutubeSearchClient::extract_video_id("not a url").is_err());
    }

    #[test]
    fn unescapes_api_titles() {
        assert_eq!(unescape_html("Tom &amp; Jerry&#39;s"), "Tom & Jerry's");
        assert_eq!(unescape_html("plain title"), "plain title");
    }
}
