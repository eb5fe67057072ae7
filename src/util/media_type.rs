use std::path::Path;

use mime_guess::{mime, Mime, MimeGuess};

/// Guess the media type of a file from its name, falling back to `text/plain`.
pub fn guess_media_type(path: &Path) -> Mime {
    MimeGuess::from_path(path).first().unwrap_or(mime::TEXT_PLAIN)
}

/// Compute the `content-type` header value for a file of the given media type and length.
///
/// Non-empty `text/*` files get a `charset` parameter: the one carried by `media_type`, if any,
/// else `default_encoding`. `mime_guess` never attaches parameters, so the carried charset only
/// matters for media types that come from an extended guesser or are built by hand.
pub fn content_type(media_type: &Mime, len: u64, default_encoding: &str) -> String {
    if media_type.type_() != mime::TEXT || len == 0 {
        return media_type.to_string();
    }

    let charset = media_type
        .get_param(mime::CHARSET)
        .map_or(default_encoding, |name| name.as_str());
    format!("{}; charset={}", media_type.essence_str(), charset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_type_of(name: &str, len: u64, default_encoding: &str) -> String {
        content_type(&guess_media_type(Path::new(name)), len, default_encoding)
    }

    #[test]
    fn text_gets_default_charset() {
        assert_eq!(content_type_of("style.css", 23, "utf-8"), "text/css; charset=utf-8");
        assert_eq!(content_type_of("index.html", 1, "latin-1"), "text/html; charset=latin-1");
    }

    #[test]
    fn carried_charset_wins_over_default() {
        let media_type: Mime = "text/html; charset=iso-8859-1".parse().unwrap();
        assert_eq!(content_type(&media_type, 10, "utf-8"), "text/html; charset=iso-8859-1");
    }

    #[test]
    fn empty_text_gets_no_charset() {
        assert_eq!(content_type_of("empty.css", 0, "utf-8"), "text/css");
    }

    #[test]
    fn unknown_extension_is_plain_text() {
        assert_eq!(guess_media_type(Path::new("LICENSE")), mime::TEXT_PLAIN);
        assert_eq!(content_type_of("notes.unknownext", 5, "utf-8"), "text/plain; charset=utf-8");
    }

    #[test]
    fn binary_gets_no_charset() {
        assert_eq!(content_type_of("logo.png", 512, "utf-8"), "image/png");
    }
}
