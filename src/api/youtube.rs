//! YouTube Data API v3 client
//!
//! Provides the one-shot video search and the playlist pagination the mix
//! resolver runs on.
//! API docs: https://developers.google.com/youtube/v3/docs

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{RadioMixError, Result};
use crate::mix::MixProvider;
use crate::models::{MixRoot, Page, PageCursor, Track};

/// "Music" video category
pub const MUSIC_CATEGORY_ID: &str = "10";

/// YouTube Data API client
pub struct YoutubeClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl YoutubeClient {
    /// Create a new client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, "https://www.googleapis.com/youtube/v3")
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Make a keyed GET request. No retries: a failure surfaces as-is.
    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RadioMixError::from_provider_body(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| RadioMixError::Provider(format!("JSON parse error: {}", e)))
    }

    /// Search for the single best-matching music video
    pub async fn search(&self, query: &str) -> Result<Option<MixRoot>> {
        let response: SearchResponse = self
            .get(
                "/search",
                &[
                    ("part", "snippet"),
                    ("maxResults", "1"),
                    ("q", query),
                    ("type", "video"),
                    ("videoCategoryId", MUSIC_CATEGORY_ID),
                ],
            )
            .await?;

        Ok(response.into_root())
    }

    /// List one page of playlist items
    pub async fn playlist_items(
        &self,
        playlist_id: &str,
        max_results: usize,
        page_token: Option<&PageCursor>,
    ) -> Result<Page> {
        let max_results = max_results.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token.as_str()));
        }

        let response: PlaylistItemsResponse = self.get("/playlistItems", &params).await?;
        Ok(response.into_page())
    }
}

#[async_trait]
impl MixProvider for YoutubeClient {
    async fn search_top(&self, query: &str) -> Result<Option<MixRoot>> {
        self.search(query).await
    }

    async fn playlist_page(
        &self,
        collection_id: &str,
        page_size: usize,
        cursor: Option<&PageCursor>,
    ) -> Result<Page> {
        self.playlist_items(collection_id, page_size, cursor).await
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItemRaw>,
}

impl SearchResponse {
    fn into_root(self) -> Option<MixRoot> {
        let item = self.items.into_iter().next()?;
        Some(MixRoot {
            id: item.id.video_id?,
            title: item.snippet.title,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchItemRaw {
    id: SearchIdRaw,
    snippet: SnippetTitle,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchIdRaw {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SnippetTitle {
    title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItemRaw>,
    next_page_token: Option<String>,
}

impl PlaylistItemsResponse {
    fn into_page(self) -> Page {
        Page {
            fetched: self.items.len(),
            items: self
                .items
                .into_iter()
                .filter_map(|i| i.into_track())
                .collect(),
            next: self
                .next_page_token
                .filter(|t| !t.is_empty())
                .map(PageCursor::new),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlaylistItemRaw {
    snippet: PlaylistSnippetRaw,
}

impl PlaylistItemRaw {
    fn into_track(self) -> Option<Track> {
        let snippet = self.snippet;
        // Deleted or private entries come back without a video id
        let video_id = snippet.resource_id.video_id?;
        let thumbnail = snippet.thumbnails.and_then(|t| t.medium).map(|m| m.url);
        Some(Track::new(snippet.title, &video_id, thumbnail))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistSnippetRaw {
    title: String,
    resource_id: ResourceIdRaw,
    thumbnails: Option<ThumbnailsRaw>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceIdRaw {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ThumbnailsRaw {
    medium: Option<ThumbnailRaw>,
}

#[derive(Debug, Deserialize)]
struct ThumbnailRaw {
    url: String,
}
