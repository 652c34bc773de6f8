//! Data structures and types for RadioMix
//!
//! Contains the shared models organized by domain:
//! - **Mix**: the root track, resolved tracks and pagination cursors
//! - **Relay**: stream requests, delivery modes and media links

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical watch URL prefix for a video id
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Build the canonical watch URL for a video id
pub fn watch_url(video_id: &str) -> String {
    format!("{}{}", WATCH_URL_PREFIX, video_id)
}

// =============================================================================
// Mix Models
// =============================================================================

/// A single track of a mix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    /// Canonical watch URL
    pub url: String,
    /// Medium-size thumbnail URL, empty when the provider has none
    #[serde(default)]
    pub thumbnail: String,
}

impl Track {
    /// Create a track for a video id, building its canonical watch URL
    pub fn new(title: impl Into<String>, video_id: &str, thumbnail: Option<String>) -> Self {
        Self {
            title: title.into(),
            url: watch_url(video_id),
            thumbnail: thumbnail.unwrap_or_default(),
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.title, self.url)
    }
}

/// The seed video a mix is derived from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixRoot {
    pub title: String,
    pub id: String,
}

/// A resolved mix: the root plus its tracks in provider order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixResult {
    pub root: MixRoot,
    pub tracks: Vec<Track>,
}

/// Opaque "continue after here" token issued by the playlist provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor(String);

impl PageCursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of a playlist listing
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub items: Vec<Track>,
    /// Entries the provider returned, including unplayable ones dropped from `items`
    pub fetched: usize,
    /// Absent when the collection is exhausted
    pub next: Option<PageCursor>,
}

impl Page {
    /// Page where every fetched entry became a track
    pub fn new(items: Vec<Track>, next: Option<PageCursor>) -> Self {
        Self {
            fetched: items.len(),
            items,
            next,
        }
    }
}

// =============================================================================
// Relay Models
// =============================================================================

/// How the relayed audio should be delivered to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Force a save-as dialog
    Download,
    /// Let the client render/play in place
    #[default]
    Play,
}

impl DeliveryMode {
    /// Parse a mode leniently: exactly `download` selects Download, anything
    /// else plays inline
    pub fn from_str_loose(s: &str) -> Self {
        if s == "download" {
            DeliveryMode::Download
        } else {
            DeliveryMode::Play
        }
    }

    /// Content-Disposition type for this mode
    pub fn disposition(&self) -> &'static str {
        match self {
            DeliveryMode::Download => "attachment",
            DeliveryMode::Play => "inline",
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryMode::Download => write!(f, "download"),
            DeliveryMode::Play => write!(f, "play"),
        }
    }
}

/// A request to relay the audio of a video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRequest {
    /// Source URL (youtu.be, watch, embed or /v/ form)
    pub source: String,
    pub display_name: Option<String>,
    pub mode: DeliveryMode,
}

impl StreamRequest {
    pub fn new(
        source: impl Into<String>,
        display_name: Option<String>,
        mode: DeliveryMode,
    ) -> Self {
        Self {
            source: source.into(),
            display_name,
            mode,
        }
    }
}

/// Short-lived direct media link returned by the conversion provider.
///
/// Not `Clone`: a link is fetched fresh for every relay and consumed once.
#[derive(Debug, PartialEq, Eq)]
pub struct RelayedLink {
    pub media_url: String,
}

impl RelayedLink {
    pub fn new(media_url: impl Into<String>) -> Self {
        Self {
            media_url: media_url.into(),
        }
    }

    /// Links are always assumed to expire quickly
    pub fn expected_short_lived(&self) -> bool {
        true
    }
}
