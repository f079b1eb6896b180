//! # Fetch Errors
//!
//! A closed set of failures a single fetch can produce. Callers are expected
//! to match on the variant and decide whether the failure should abort the
//! protocol flow in progress.

use reqwest::Url;
use thiserror::Error;

/// Boxed lower-level decode failure.
pub type DecodeCause = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by the fetch engine.
#[derive(Error, Debug)]
pub enum FetchError {
    /// A URL could not be formed from the caller's input.
    #[error("invalid url")]
    InvalidUrl,

    /// Transport-level failure: DNS, connection refused, timeout, TLS
    /// handshake, or the session could not be constructed.
    #[error("network error: {0}")]
    NetworkError(#[source] reqwest::Error),

    /// A response was received but could not be used, independently of its
    /// status or body format.
    #[error("invalid response")]
    InvalidResponse,

    /// The server answered with a status outside 200..=299.
    #[error("invalid status code {status} from {url}")]
    InvalidStatusCode {
        /// The requested URL.
        url: Url,

        /// Numeric HTTP status.
        status: u16,
    },

    /// The body could not be decoded into the requested shape.
    #[error("decoding error: {0}")]
    DecodingError(#[source] DecodeCause),
}

impl FetchError {
    /// HTTP status carried by the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidStatusCode { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Parse a URL string, classifying failure as [`FetchError::InvalidUrl`].
///
/// # Errors
///
/// Returns [`FetchError::InvalidUrl`] when `url` is not an absolute URL.
pub fn parse_url(url: &str) -> Result<Url, FetchError> {
    Url::parse(url).map_err(|_| FetchError::InvalidUrl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        let url = parse_url("https://verifier.example/request/123").expect("should parse");
        assert_eq!(url.path(), "/request/123");
    }

    #[test]
    fn parse_invalid() {
        assert!(matches!(parse_url("not a url"), Err(FetchError::InvalidUrl)));
        assert!(matches!(parse_url("/relative/path"), Err(FetchError::InvalidUrl)));
    }

    #[test]
    fn status_display() {
        let url = parse_url("https://verifier.example/pd").expect("should parse");
        let err = FetchError::InvalidStatusCode { url, status: 404 };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "invalid status code 404 from https://verifier.example/pd");
        assert_eq!(FetchError::InvalidResponse.status(), None);
    }
}
