//! Page retrieval behind a small trait seam.
//!
//! The pipeline only needs "give me the body of this URL as text". The
//! [`PageFetcher`] trait captures that so the run can be driven by the real
//! HTTP client or by an in-memory stub in tests.
//!
//! The fetch happens exactly once per run. There is no retry: any failure
//! aborts the run before a feed is written.

use crate::error::FeedError;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};

pub const DEFAULT_USER_AGENT: &str = "feedgen/1.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_REDIRECTS: usize = 10;

/// Something that can return the full body of a page as text.
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FeedError>;
}

/// [`PageFetcher`] backed by a `reqwest` client.
///
/// Redirects are followed (up to 10). A non-success status is treated as a
/// failed fetch rather than a page with no links.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(FeedError::Client)?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, FeedError> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await.map_err(|e| {
            error!(error = %e, "Request failed");
            FeedError::fetch(url, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(%status, "Non-success status");
            return Err(FeedError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::fetch(url, e))?;
        info!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}
