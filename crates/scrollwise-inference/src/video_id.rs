//! YouTube video identifier extraction.

use once_cell::sync::Lazy;
use regex::Regex;

/// Permissive pattern: the first 11 id-characters following a `v=` query
/// marker or a path separator. Matches watch URLs, short youtu.be links,
/// embed paths, and bare ids after a slash.
static VIDEO_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("valid pattern"));

/// Extract an 11-character video identifier from a URL.
///
/// Returns `None` when no identifier is present; malformed input is not an
/// error.
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_RE
        .captures(url)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_not_a_url() {
        assert_eq!(extract_video_id("not a url"), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_id_too_short() {
        assert_eq!(extract_video_id("https://youtu.be/short"), None);
    }

    #[test]
    fn test_takes_first_eleven_id_characters() {
        // Permissive by design: longer tokens contribute their first 11 chars.
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQextra").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }
}
