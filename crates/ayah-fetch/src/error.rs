use thiserror::Error;

/// Any failure to obtain a verse from the upstream API.
///
/// Variants keep the cause apart for the message, but callers treat them
/// all as one kind of failure.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Request timed out. Please check your internet connection.")]
    Timeout,

    #[error("Connection error. Please check your internet connection.")]
    Connection,

    #[error("Verse not found. Please check chapter and verse numbers.")]
    NotFound,

    #[error("Too many requests. Please wait a moment and try again.")]
    RateLimited,

    #[error("HTTP error {status} for {url}")]
    Http { status: u16, url: String },

    #[error("API error {code}: {status}")]
    Api { code: u16, status: String },

    #[error("Invalid JSON response from API: {0}")]
    Malformed(String),

    #[error("Network error: {0}")]
    Transport(String),
}

impl UpstreamError {
    /// Classify a transport-level error from reqwest.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }

    /// Classify a non-success HTTP status.
    pub(crate) fn from_status(status: reqwest::StatusCode, url: &str) -> Self {
        match status.as_u16() {
            404 => Self::NotFound,
            429 => Self::RateLimited,
            other => Self::Http {
                status: other,
                url: url.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            UpstreamError::from_status(reqwest::StatusCode::NOT_FOUND, "u"),
            UpstreamError::NotFound
        ));
        assert!(matches!(
            UpstreamError::from_status(reqwest::StatusCode::TOO_MANY_REQUESTS, "u"),
            UpstreamError::RateLimited
        ));
        let err = UpstreamError::from_status(reqwest::StatusCode::BAD_GATEWAY, "http://x/ayah/1:1");
        assert_eq!(err.to_string(), "HTTP error 502 for http://x/ayah/1:1");
    }
}
