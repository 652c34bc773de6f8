//! Download filenames and Content-Disposition values

use crate::models::DeliveryMode;

/// Mimetype of every relayed stream
pub const AUDIO_MIME: &str = "audio/mpeg";

/// Extension appended to sanitized titles
pub const AUDIO_EXTENSION: &str = "mp3";

/// Filename used when no display name is given
pub const DEFAULT_FILENAME: &str = "audio.mp3";

const FORBIDDEN_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Strip characters that are unsafe in filenames. Idempotent.
pub fn sanitize_title(title: &str) -> String {
    title.chars().filter(|c| !FORBIDDEN_CHARS.contains(c)).collect()
}

/// Filename for a relay: sanitized display name plus the audio extension
pub fn filename_for(display_name: Option<&str>) -> String {
    match display_name {
        Some(name) if !name.is_empty() => {
            format!("{}.{}", sanitize_title(name), AUDIO_EXTENSION)
        }
        _ => DEFAULT_FILENAME.to_string(),
    }
}

/// Content-Disposition header value carrying both the RFC 5987 encoded
/// `filename*` and the raw `filename` for legacy clients
pub fn content_disposition(mode: DeliveryMode, filename: &str) -> String {
    format!(
        "{}; filename*=UTF-8''{}; filename=\"{}\"",
        mode.disposition(),
        urlencoding::encode(filename),
        filename
    )
}
