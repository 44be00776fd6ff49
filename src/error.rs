//! Error taxonomy for a feed generation run.
//!
//! Only fatal conditions are modelled here. Anchors that cannot be parsed
//! are skipped by the scanner and never surface as errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    /// The target argument is not usable as a page URL.
    #[error("invalid target url `{url}`: {source}")]
    Usage {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The page could not be retrieved; no feed is produced.
    #[error("fetch of {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    /// The HTTP client could not be constructed; nothing was fetched.
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("http status {status} from {url}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to write feed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to encode json: {0}")]
    Json(#[from] serde_json::Error),
}

impl FeedError {
    pub fn fetch(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Fetch {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }

    /// Whether the error happened before any output was attempted.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::HttpStatus { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_message() {
        let err = FeedError::fetch("http://example.com", "connection refused");
        assert_eq!(
            err.to_string(),
            "fetch of http://example.com failed: connection refused"
        );
        assert!(err.is_fetch());
    }

    #[test]
    fn test_usage_error_carries_source() {
        let source = url::Url::parse("not a url").unwrap_err();
        let err = FeedError::Usage {
            url: "not a url".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("invalid target url `not a url`"));
        assert!(!err.is_fetch());
    }
}
