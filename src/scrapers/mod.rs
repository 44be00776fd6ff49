//! Link discovery on a fetched page.
//!
//! - [`anchors`]: Literal, forward-only scan for `<a href="...">...</a>`
//! - [`links`]: Sanitizing, resolving, filtering and deduplicating the
//!   scanned anchors into feed items

pub mod anchors;
pub mod links;
