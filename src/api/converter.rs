//! YouTube-to-MP3 conversion client (RapidAPI `youtube-mp36`)
//!
//! Exchanges a video id for a short-lived direct media link.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{RadioMixError, Result};
use crate::models::RelayedLink;
use crate::stream::LinkProvider;

/// RapidAPI host of the conversion service
pub const CONVERTER_HOST: &str = "youtube-mp36.p.rapidapi.com";

/// Conversion provider client
pub struct ConverterClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

/// Conversion response; only the link matters to us
#[derive(Debug, Deserialize)]
struct ConvertResponse {
    link: Option<String>,
    status: Option<String>,
    msg: Option<String>,
}

impl ConverterClient {
    /// Create a new client with the given RapidAPI key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, format!("https://{}", CONVERTER_HOST))
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

    /// Request a direct media link for `video_id`.
    ///
    /// `Ok(None)` means the provider answered but gave no usable link.
    pub async fn convert(&self, video_id: &str) -> Result<Option<RelayedLink>> {
        let url = format!("{}/dl", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("id", video_id)])
            .header("x-rapidapi-host", CONVERTER_HOST)
            .header("x-rapidapi-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RadioMixError::from_provider_body(status, &body));
        }

        let data: ConvertResponse = serde_json::from_str(&body)
            .map_err(|e| RadioMixError::Provider(format!("JSON parse error: {}", e)))?;

        match data.link.filter(|l| !l.is_empty()) {
            Some(link) => Ok(Some(RelayedLink::new(link))),
            None => {
                tracing::warn!(
                    video_id,
                    status = data.status.as_deref().unwrap_or("-"),
                    msg = data.msg.as_deref().unwrap_or("-"),
                    "no link in conversion response"
                );
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl LinkProvider for ConverterClient {
    async fn media_link(&self, video_id: &str) -> Result<Option<RelayedLink>> {
        self.convert(video_id).await
    }
}
