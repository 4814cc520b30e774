//! Search client behavior against a stubbed HTTP endpoint.

use assert_matches::assert_matches;
use async_trait::async_trait;
use mockall::mock;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jukebot::commands::music::audio_sources::youtube::YoutubeSearchClient;
use jukebot::commands::music::audio_sources::{SearchProvider, SearchResult, resolve_query};
use jukebot::commands::music::utils::MusicError;

mock! {
    Search {}

    #[async_trait]
    impl SearchProvider for Search {
        async fn search(
            &self,
            query: &str,
            max_results: usize,
        ) -> Result<Vec<SearchResult>, MusicError>;

        async fn lookup(&self, video_id: &str) -> Result<SearchResult, MusicError>;
    }
}

fn client(server: &MockServer) -> YoutubeSearchClient {
    YoutubeSearchClient::with_base_url("test-key".to_string(), server.uri())
}

#[tokio::test]
async fn search_returns_ranked_hits_with_unescaped_titles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rick astley"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "id": { "videoId": "dQw4w9WgXcQ" },
                    "snippet": { "title": "Rick Astley &amp; Friends" }
                },
                {
                    "id": { "videoId": "second" },
                    "snippet": { "title": "Another Hit" }
                }
            ]
        })))
        .mount(&server)
        .await;

    let hits = client(&server).search("rick astley", 2).await.unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].video_id, "dQw4w9WgXcQ");
    assert_eq!(hits[0].title, "Rick Astley & Friends");
}

#[tokio::test]
async fn forbidden_means_the_daily_quota_is_spent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = client(&server).search("anything", 1).await;

    assert_matches!(result, Err(MusicError::SearchQuotaExceeded));
}

#[tokio::test]
async fn no_items_is_reported_as_an_empty_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let result = client(&server).search("gibberish kjxzv", 1).await;

    assert_matches!(result, Err(MusicError::SearchEmpty));
}

#[tokio::test]
async fn server_errors_surface_as_search_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client(&server).search("anything", 1).await;

    assert_matches!(result, Err(MusicError::SearchFailed(_)));
}

#[tokio::test]
async fn lookup_resolves_a_video_id_without_searching() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "dQw4w9WgXcQ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "id": "dQw4w9WgXcQ",
                    "snippet": { "title": "Never Gonna Give You Up" }
                }
            ]
        })))
        .mount(&server)
        .await;

    let hit = client(&server).lookup("dQw4w9WgXcQ").await.unwrap();

    assert_eq!(hit.title, "Never Gonna Give You Up");
    assert_eq!(hit.video_id, "dQw4w9WgXcQ");
}

#[tokio::test]
async fn provider_returning_no_hits_resolves_to_an_empty_search() {
    let mut search = MockSearch::new();
    // A well-behaved provider reports this itself, but the contract does
    // not promise a non-empty Ok.
    search.expect_search().returning(|_, _| Ok(Vec::new()));

    let result = resolve_query(&search, "anything").await;

    assert_matches!(result, Err(MusicError::SearchEmpty));
}

#[tokio::test]
async fn watch_urls_resolve_through_lookup_without_searching() {
    let mut search = MockSearch::new();
    search
        .expect_lookup()
        .withf(|id| id == "dQw4w9WgXcQ")
        .times(1)
        .returning(|id| {
            Ok(SearchResult {
                title: "Never Gonna Give You Up".to_string(),
                video_id: id.to_string(),
            })
        });

    let hit = resolve_query(&search, "https://www.youtube.com/watch?v=dQw4w9WgXcQ")
        .await
        .unwrap();

    assert_eq!(hit.video_id, "dQw4w9WgXcQ");
}

#[tokio::test]
async fn lookup_of_an_unknown_id_is_an_empty_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let result = client(&server).lookup("nope").await;

    assert_matches!(result, Err(MusicError::SearchEmpty));
}
