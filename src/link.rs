//! Emergency link: `<base>/emergency/<urlencoded-token>`
//!
//! Query dan fragment di URL hasil scan diurus oleh grammar URL, token
//! selalu diambil dari path segment tepat setelah `emergency`.

use url::Url;

use crate::error::{CodecError, Result};

const EMERGENCY_SEGMENT: &str = "emergency";

/// Bangun URL yang di-render ke QR
pub fn emergency_url(base: &str, token: &str) -> String {
    format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        EMERGENCY_SEGMENT,
        urlencoding::encode(token)
    )
}

/// Ambil token dari URL hasil scan
pub fn token_from_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url.trim()).map_err(|_| CodecError::UnsupportedProtocol)?;

    let segment = parsed
        .path_segments()
        .and_then(|mut segments| {
            segments
                .by_ref()
                .find(|s| *s == EMERGENCY_SEGMENT)
                .and_then(|_| segments.next())
        })
        .filter(|s| !s.is_empty())
        .ok_or(CodecError::UnsupportedProtocol)?;

    urlencoding::decode(segment)
        .map(|token| token.into_owned())
        .map_err(|_| CodecError::UnsupportedProtocol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_roundtrip() {
        let url = emergency_url("https://records.example.org/", "SS1:abc-_DEF");
        assert_eq!(url, "https://records.example.org/emergency/SS1%3Aabc-_DEF");
        assert_eq!(token_from_url(&url).unwrap(), "SS1:abc-_DEF");
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        let token = token_from_url("https://x.org/emergency/SS1%3aQQ?src=qr#top").unwrap();
        assert_eq!(token, "SS1:QQ");
    }

    #[test]
    fn test_emergency_path_in_query_not_matched() {
        let token =
            token_from_url("https://x.org/emergency/SS1%3AyFOf?next=/emergency/home#/emergency/x")
                .unwrap();
        assert_eq!(token, "SS1:yFOf");
    }

    #[test]
    fn test_base_with_path_prefix() {
        let url = emergency_url("https://x.org/app/v2", "SS1:QQ");
        assert_eq!(url, "https://x.org/app/v2/emergency/SS1%3AQQ");
        assert_eq!(token_from_url(&url).unwrap(), "SS1:QQ");
    }

    #[test]
    fn test_missing_segment() {
        for bad in [
            "https://x.org/profile/SS1%3AQQ",
            "https://x.org/emergency/",
            "https://x.org/emergency",
            "https://x.org/home?next=/emergency/SS1%3AQQ",
            "not a url",
        ] {
            assert_eq!(
                token_from_url(bad).unwrap_err(),
                CodecError::UnsupportedProtocol,
                "{}",
                bad
            );
        }
    }
}
