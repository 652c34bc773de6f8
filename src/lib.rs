//! RadioMix - radio mixes and audio streams for any song
//!
//! Resolves a "radio mix" of related tracks from a song title and relays the
//! audio of any track without buffering the file.
//!
//! # Modules
//!
//! - `models` - Tracks, mixes, stream requests and media links
//! - `error` - Error taxonomy shared by every operation
//! - `mix` - Search-then-paginate mix resolution
//! - `api` - Provider clients (YouTube Data API, conversion service)
//! - `stream` - Source parsing, filenames and the backpressured relay
//! - `config`, `cli`, `commands` - Scriptable command line boundary

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod mix;
pub mod models;
pub mod stream;

// Re-export commonly used types
pub use error::{RadioMixError, Result};
pub use models::{
    DeliveryMode, MixResult, MixRoot, Page, PageCursor, RelayedLink, StreamRequest, Track,
};

pub use api::{ConverterClient, YoutubeClient};
pub use mix::{MixProvider, MixResolver};
pub use stream::{ByteStream, LinkProvider, Relay, RelayResponse};
