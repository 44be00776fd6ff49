//! Feed document rendering and delivery.
//!
//! # Submodules
//!
//! - [`rss`]: RSS 2.0 via `quick-xml`
//! - [`json`]: The same structure as JSON
//!
//! A run renders the whole document in memory first and writes it in one go,
//! so a failure never leaves a partial feed on stdout.

pub mod json;
pub mod rss;

use crate::error::FeedError;
use crate::models::Feed;
use clap::ValueEnum;
use std::io::Write;
use tokio::fs;
use tracing::{info, instrument};

/// Output document format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Rss,
    Json,
}

pub fn render(feed: &Feed, format: Format) -> Result<Vec<u8>, FeedError> {
    match format {
        Format::Rss => rss::render(feed),
        Format::Json => json::render(feed),
    }
}

/// Write a rendered document to `path`, or to stdout when `path` is `None`.
#[instrument(level = "info", skip_all, fields(path = ?path, bytes = document.len()))]
pub async fn write_document(document: &[u8], path: Option<&str>) -> Result<(), FeedError> {
    match path {
        Some(path) => {
            fs::write(path, document).await?;
            info!("Wrote feed file");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
