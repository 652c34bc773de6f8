//! Streaming infrastructure
//!
//! - Source: video id extraction from YouTube URLs
//! - Filename: sanitized filenames and Content-Disposition values
//! - Relay: backpressured pipe from the media origin to the caller

pub mod filename;
pub mod relay;
pub mod source;

pub use filename::{content_disposition, filename_for, sanitize_title, AUDIO_MIME};
pub use relay::{ByteStream, LinkProvider, Relay, RelayResponse};
pub use source::extract_video_id;
