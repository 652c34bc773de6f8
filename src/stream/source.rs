//! Video id extraction from source URLs

use reqwest::Url;

use crate::error::{RadioMixError, Result};

/// Extract the video id from a YouTube URL.
///
/// Supported shapes:
/// - `https://youtu.be/<id>`
/// - `https://www.youtube.com/watch?v=<id>` (also bare `youtube.com`)
/// - `https://www.youtube.com/embed/<id>`
/// - `https://www.youtube.com/v/<id>`
pub fn extract_video_id(source: &str) -> Result<String> {
    let invalid = || {
        RadioMixError::InvalidArgument(format!("Could not extract video id from {:?}", source))
    };

    let url = Url::parse(source.trim()).map_err(|_| invalid())?;
    let path = url.path();

    let id = match url.host_str() {
        Some("youtu.be") => path.strip_prefix('/').map(str::to_string),
        Some("www.youtube.com") | Some("youtube.com") => {
            if path == "/watch" {
                url.query_pairs()
                    .find(|(k, _)| k == "v")
                    .map(|(_, v)| v.into_owned())
            } else if path.starts_with("/embed/") || path.starts_with("/v/") {
                path.split('/').nth(2).map(str::to_string)
            } else {
                None
            }
        }
        _ => None,
    };

    id.filter(|id| !id.is_empty()).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link() {
        assert_eq!(extract_video_id("https://youtu.be/abc123").unwrap(), "abc123");
    }

    #[test]
    fn test_watch_link() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=fJ9rUzIMcZQ&list=RDfJ9rUzIMcZQ")
                .unwrap(),
            "fJ9rUzIMcZQ"
        );
        assert_eq!(
            extract_video_id("https://youtube.com/watch?feature=share&v=xyz").unwrap(),
            "xyz"
        );
    }

    #[test]
    fn test_embed_and_v_links() {
        assert_eq!(extract_video_id("https://www.youtube.com/embed/e1").unwrap(), "e1");
        assert_eq!(extract_video_id("https://youtube.com/v/v1?version=3").unwrap(), "v1");
    }

    #[test]
    fn test_rejected_shapes() {
        for source in [
            "https://example.com/not-youtube",
            "https://www.youtube.com/results?search_query=queen",
            "https://www.youtube.com/watch",
            "https://www.youtube.com/watch?v=",
            "https://youtu.be/",
            "https://www.youtube.com/embed/",
            "https://m.youtube.com/watch?v=abc",
            "fJ9rUzIMcZQ",
            "",
        ] {
            let err = extract_video_id(source).unwrap_err();
            assert!(err.is_invalid_argument(), "{} should be rejected", source);
        }
    }
}
