//! Data models for the link-to-feed pipeline.
//!
//! This module defines the records that flow through a run:
//! - [`AnchorCandidate`]: Raw `href` and inner markup of one anchor element
//! - [`CleanedItem`]: Sanitized title plus resolved absolute URL
//! - [`FeedItem`]: An accepted entry as written to the output document
//! - [`Channel`] and [`Feed`]: The document being assembled

use serde::Serialize;

/// One anchor element as found by the scanner.
///
/// Both fields borrow from the fetched document; a candidate is consumed
/// immediately by the link pipeline and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorCandidate<'a> {
    /// The `href` value exactly as written, without entity decoding.
    pub raw_href: &'a str,
    /// Everything between the opening tag's `>` and the closing `</a>`.
    pub raw_inner_markup: &'a str,
}

/// A candidate after title sanitization and URL resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedItem {
    /// Single-line title with markup removed.
    pub title: String,
    /// Absolute URL used for linking and deduplication.
    pub absolute_url: String,
}

/// An accepted feed entry.
///
/// The `guid` always equals the link and is marked as not a permalink in
/// the RSS rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub guid: String,
}

impl From<CleanedItem> for FeedItem {
    fn from(item: CleanedItem) -> Self {
        Self {
            title: item.title,
            guid: item.absolute_url.clone(),
            link: item.absolute_url,
        }
    }
}

/// Channel-level metadata written before the items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Channel {
    pub title: String,
    /// The target URL with any trailing slash removed.
    pub link: String,
    pub description: String,
    /// Build time in `%a, %d %b %Y %H:%M:%S GMT` form.
    pub last_build_date: String,
    pub generator: String,
}

/// A complete feed document: one channel and its items in scan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feed {
    pub channel: Channel,
    pub items: Vec<FeedItem>,
}
