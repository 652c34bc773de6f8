//! Configuration management for RadioMix
//!
//! Handles config file loading and API key lookup.
//! Config is stored at ~/.config/radiomix/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::RadioMixError;

/// Environment variable holding the YouTube Data API key
pub const YOUTUBE_API_KEY_VAR: &str = "YOUTUBE_API_KEY";

/// Environment variable holding the RapidAPI key of the converter
pub const RAPIDAPI_KEY_VAR: &str = "RAPIDAPI_KEY";

/// Mix length when none is requested
pub const DEFAULT_LIMIT: usize = 50;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// YouTube Data API v3 key
    pub youtube_api_key: Option<String>,
    /// RapidAPI key for the conversion service
    pub rapidapi_key: Option<String>,
    /// Default number of mix tracks
    pub default_limit: Option<usize>,
}

impl Config {
    /// Get config file path (~/.config/radiomix/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("radiomix").join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Load config from a specific file, or return default if unreadable
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(s) => toml::from_str(&s).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// YouTube API key: environment first, then the config file
    pub fn youtube_api_key(&self) -> Result<String, RadioMixError> {
        resolve_key(YOUTUBE_API_KEY_VAR, self.youtube_api_key.as_deref())
            .ok_or_else(|| RadioMixError::Configuration("YouTube API Key missing".into()))
    }

    /// RapidAPI key: environment first, then the config file
    pub fn rapidapi_key(&self) -> Result<String, RadioMixError> {
        resolve_key(RAPIDAPI_KEY_VAR, self.rapidapi_key.as_deref())
            .ok_or_else(|| RadioMixError::Configuration("RapidAPI Key missing".into()))
    }

    /// Effective default mix length
    pub fn limit(&self) -> usize {
        self.default_limit.filter(|&l| l > 0).unwrap_or(DEFAULT_LIMIT)
    }
}

fn resolve_key(var: &str, configured: Option<&str>) -> Option<String> {
    std::env::var(var)
        .ok()
        .filter(|k| !k.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .filter(|k| !k.trim().is_empty())
}
