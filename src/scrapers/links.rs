//! Turn scanned anchors into accepted feed items.
//!
//! Every candidate is sanitized and resolved, then run through the acceptance
//! heuristics in a fixed order, stopping at the first failure:
//!
//! 1. Title longer than the configured minimum (15 characters by default)
//! 2. `href` is not a pure in-page anchor (`#...`)
//! 3. Title contains none of the reject phrases (`Skip to` always included)
//! 4. Absolute URL not already emitted in this run
//!
//! Accepted items keep document order and their URL is recorded in the
//! [`DedupTracker`].

use crate::dedup::DedupTracker;
use crate::models::{AnchorCandidate, CleanedItem, FeedItem};
use crate::scrapers::anchors::AnchorScanner;
use crate::utils::{resolve_url, sanitize_title, truncate_for_log};
use std::fmt;
use tracing::{debug, info, instrument, trace, warn};

pub const DEFAULT_MIN_TITLE_LEN: usize = 15;
pub const SKIP_LINK_PHRASE: &str = "Skip to";

/// Acceptance heuristics for link titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRules {
    /// Titles must be strictly longer than this many characters.
    pub min_title_len: usize,
    /// Substrings that disqualify a title.
    pub reject_phrases: Vec<String>,
}

impl LinkRules {
    /// Default rules plus caller-supplied reject phrases.
    pub fn with_extra_rejects<I, S>(min_title_len: usize, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut reject_phrases = vec![SKIP_LINK_PHRASE.to_string()];
        reject_phrases.extend(extra.into_iter().map(Into::into));
        Self {
            min_title_len,
            reject_phrases,
        }
    }
}

impl Default for LinkRules {
    fn default() -> Self {
        Self::with_extra_rejects(DEFAULT_MIN_TITLE_LEN, Vec::<String>::new())
    }
}

/// Why a cleaned candidate did not become a feed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TitleTooShort,
    InPageAnchor,
    RejectedPhrase,
    Duplicate,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::TitleTooShort => "title too short",
            Self::InPageAnchor => "in-page anchor",
            Self::RejectedPhrase => "rejected phrase",
            Self::Duplicate => "duplicate url",
        };
        f.write_str(reason)
    }
}

/// Counters for one pass over a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub anchors: usize,
    pub malformed: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Accepted items whose URL did not fit in a full dedup tracker.
    pub untracked: usize,
}

/// Sanitize the title and resolve the link of one candidate.
pub fn clean(candidate: &AnchorCandidate<'_>, base_url: &str) -> CleanedItem {
    CleanedItem {
        title: sanitize_title(candidate.raw_inner_markup),
        absolute_url: resolve_url(base_url, candidate.raw_href),
    }
}

/// Apply the acceptance heuristics in order and report the first failure.
pub fn check(
    raw_href: &str,
    item: &CleanedItem,
    rules: &LinkRules,
    tracker: &DedupTracker,
) -> Result<(), Rejection> {
    if item.title.chars().count() <= rules.min_title_len {
        return Err(Rejection::TitleTooShort);
    }
    if raw_href.starts_with('#') {
        return Err(Rejection::InPageAnchor);
    }
    if rules
        .reject_phrases
        .iter()
        .any(|phrase| item.title.contains(phrase.as_str()))
    {
        return Err(Rejection::RejectedPhrase);
    }
    if tracker.contains(&item.absolute_url) {
        return Err(Rejection::Duplicate);
    }
    Ok(())
}

/// Scan `document` and collect every accepted link as a [`FeedItem`].
///
/// # Arguments
///
/// * `document` - The fetched page markup
/// * `base_url` - The target URL with its trailing slash removed
/// * `rules` - Title heuristics
/// * `tracker` - Dedup state for this run; accepted URLs are added to it
#[instrument(level = "info", skip_all, fields(%base_url, bytes = document.len()))]
pub fn extract_items(
    document: &str,
    base_url: &str,
    rules: &LinkRules,
    tracker: &mut DedupTracker,
) -> (Vec<FeedItem>, ScanStats) {
    let mut items = Vec::new();
    let mut stats = ScanStats::default();
    let mut scanner = AnchorScanner::new(document);
    let mut warned_full = false;

    for candidate in scanner.by_ref() {
        stats.anchors += 1;
        let item = clean(&candidate, base_url);

        match check(candidate.raw_href, &item, rules, tracker) {
            Ok(()) => {
                trace!(url = %item.absolute_url, title = %item.title, "Accepted link");
                if !tracker.add(&item.absolute_url) {
                    if warned_full {
                        trace!(url = %item.absolute_url, "Dedup tracker full; url not remembered");
                    } else {
                        warn!(url = %item.absolute_url, "Dedup tracker full; later repeats will not be caught");
                        warned_full = true;
                    }
                    stats.untracked += 1;
                }
                items.push(FeedItem::from(item));
                stats.accepted += 1;
            }
            Err(reason) => {
                trace!(
                    href = %candidate.raw_href,
                    title = %truncate_for_log(&item.title, 80),
                    %reason,
                    "Rejected link"
                );
                stats.rejected += 1;
            }
        }
    }

    stats.malformed = scanner.skipped();
    debug!(?stats, tracked = tracker.len(), "Scan statistics");
    info!(count = items.len(), "Collected feed items");
    (items, stats)
}
