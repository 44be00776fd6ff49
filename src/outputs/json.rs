//! JSON rendering of a feed.
//!
//! The document mirrors the RSS structure:
//!
//! ```text
//! {
//!   "channel": { "title", "link", "description", "last_build_date", "generator" },
//!   "items": [ { "title", "link", "guid" }, ... ]
//! }
//! ```

use crate::error::FeedError;
use crate::models::Feed;

/// Serialize the feed as pretty-printed JSON followed by a newline.
pub fn render(feed: &Feed) -> Result<Vec<u8>, FeedError> {
    let mut out = serde_json::to_vec_pretty(feed)?;
    out.push(b'\n');
    Ok(out)
}
