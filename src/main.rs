//! # feedgen
//!
//! Fetches a web page and emits an RSS feed synthesized from the anchor
//! links it finds.
//!
//! ## Usage
//!
//! ```sh
//! feedgen https://lite.cnn.com > cnn.xml
//! ```
//!
//! ## Architecture
//!
//! A run is a single forward pass:
//! 1. **Fetching**: Download the target page once (no retry)
//! 2. **Scanning**: Walk the markup for `<a href="...">...</a>` anchors
//! 3. **Cleaning**: Sanitize titles and resolve links against the target URL
//! 4. **Filtering**: Drop short, in-page, skip-link and duplicate links
//! 5. **Output**: Render one RSS (or JSON) document to stdout or a file
//!
//! Logs go to stderr so stdout only ever carries the feed.

use chrono::{DateTime, Utc};
use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod dedup;
mod error;
mod fetch;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use dedup::DedupTracker;
use error::FeedError;
use fetch::{HttpFetcher, PageFetcher};
use models::{Channel, Feed};
use scrapers::links::{LinkRules, extract_items};
use utils::{build_date, strip_trailing_slash};

/// Everything a run needs besides the fetcher and the clock.
#[derive(Debug, Clone)]
pub struct FeedOptions {
    pub rules: LinkRules,
    /// `None` means the dedup tracker is unbounded.
    pub dedup_capacity: Option<usize>,
    pub title: Option<String>,
    pub description: String,
}

impl From<&Cli> for FeedOptions {
    fn from(args: &Cli) -> Self {
        Self {
            rules: LinkRules::with_extra_rejects(args.min_title_len, args.reject_phrases.clone()),
            dedup_capacity: (!args.unbounded_dedup).then_some(args.dedup_capacity),
            title: args.title.clone(),
            description: args.description.clone(),
        }
    }
}

/// Fetch `target` and assemble its feed.
///
/// The target's trailing slash is removed before it is used as the channel
/// link and as the base for relative hrefs.
#[instrument(level = "info", skip(fetcher, options, now))]
pub async fn build_feed<F: PageFetcher>(
    fetcher: &F,
    target: &str,
    options: &FeedOptions,
    now: DateTime<Utc>,
) -> Result<Feed, FeedError> {
    url::Url::parse(target).map_err(|source| FeedError::Usage {
        url: target.to_string(),
        source,
    })?;
    let base_url = strip_trailing_slash(target);

    let document = fetcher.fetch(base_url).await?;

    let mut tracker = match options.dedup_capacity {
        Some(capacity) => DedupTracker::bounded(capacity),
        None => DedupTracker::unbounded(),
    };
    let (items, stats) = extract_items(&document, base_url, &options.rules, &mut tracker);
    info!(
        anchors = stats.anchors,
        accepted = stats.accepted,
        rejected = stats.rejected,
        malformed = stats.malformed,
        "Scanned page"
    );

    let channel = Channel {
        title: options
            .title
            .clone()
            .unwrap_or_else(|| format!("{base_url} Feed")),
        link: base_url.to_string(),
        description: options.description.clone(),
        last_build_date: build_date(now),
        generator: env!("CARGO_PKG_NAME").to_string(),
    };
    Ok(Feed { channel, items })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    // --- Tracing init (stderr only) ---
    let default_level = if args.quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    debug!(?args, "Parsed CLI arguments");

    let fetcher = HttpFetcher::new(&args.user_agent, Duration::from_secs(args.timeout_secs))?;
    let options = FeedOptions::from(&args);

    let feed = match build_feed(&fetcher, &args.url, &options, Utc::now()).await {
        Ok(feed) => feed,
        Err(e) => {
            if e.is_fetch() {
                error!(url = %args.url, error = %e, "Fetch failed; no feed emitted");
            } else {
                error!(error = %e, "Cannot build feed");
            }
            return Err(e.into());
        }
    };

    let document = outputs::render(&feed, args.format)?;
    outputs::write_document(&document, args.output.as_deref()).await?;

    let elapsed = start_time.elapsed();
    info!(
        items = feed.items.len(),
        format = ?args.format,
        millis = elapsed.as_millis() as u64,
        "Execution complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::RefCell;

    /// Serves a fixed page and records the URL it was asked for.
    struct StubFetcher {
        body: Result<String, String>,
        requested: RefCell<Vec<String>>,
    }

    impl StubFetcher {
        fn serving(body: &str) -> Self {
            Self {
                body: Ok(body.to_string()),
                requested: RefCell::new(Vec::new()),
            }
        }

        fn failing(reason: &str) -> Self {
            Self {
                body: Err(reason.to_string()),
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FeedError> {
            self.requested.borrow_mut().push(url.to_string());
            self.body.clone().map_err(|reason| FeedError::fetch(url, reason))
        }
    }

    fn options() -> FeedOptions {
        FeedOptions {
            rules: LinkRules::default(),
            dedup_capacity: Some(dedup::DEFAULT_CAPACITY),
            title: None,
            description: "Generated by feedgen".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 5, 9).unwrap()
    }

    const PAGE: &str = r##"
        <html><body>
        <a href="#content">Skip to main content</a>
        <a href="/world/story-one">  World leaders meet <em>again</em>
            for climate talks</a>
        <a href="world/story-one">World leaders meet for the second time</a>
        <a href="#comments">Jump down to the comment section</a>
        <a href="https://partner.test/feature">Partner feature: Tom & Jerry <live></a>
        <a href="/about">About us</a>
        </body></html>
    "##;

    #[tokio::test]
    async fn test_build_feed_end_to_end() {
        let fetcher = StubFetcher::serving(PAGE);
        let feed = build_feed(&fetcher, "http://news.test/", &options(), now())
            .await
            .unwrap();

        assert_eq!(*fetcher.requested.borrow(), vec!["http://news.test".to_string()]);
        assert_eq!(feed.channel.title, "http://news.test Feed");
        assert_eq!(feed.channel.link, "http://news.test");
        assert_eq!(feed.channel.last_build_date, "Mon, 19 Oct 2026 08:05:09 GMT");
        assert_eq!(feed.channel.generator, "feedgen");

        let links: Vec<_> = feed.items.iter().map(|i| i.link.as_str()).collect();
        assert_eq!(
            links,
            vec!["http://news.test/world/story-one", "https://partner.test/feature"]
        );
        assert_eq!(feed.items[0].title, "World leaders meet again");
        assert_eq!(feed.items[1].title, "Partner feature: Tom & Jerry");
    }

    #[tokio::test]
    async fn test_rendered_rss_escapes_titles() {
        let page = r#"<a href="/x">Fish &amp; chips for five pounds</a>"#;
        let fetcher = StubFetcher::serving(page);
        let feed = build_feed(&fetcher, "http://news.test", &options(), now())
            .await
            .unwrap();
        let xml = String::from_utf8(outputs::render(&feed, outputs::Format::Rss).unwrap()).unwrap();
        // Inner text is not entity-decoded, so `&amp;` is escaped again.
        assert!(xml.contains("<title>Fish &amp;amp; chips for five pounds</title>"));
        assert!(xml.contains("<guid isPermaLink=\"false\">http://news.test/x</guid>"));
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts() {
        let fetcher = StubFetcher::failing("connection refused");
        let err = build_feed(&fetcher, "http://news.test", &options(), now())
            .await
            .unwrap_err();
        assert!(err.is_fetch());
    }

    #[tokio::test]
    async fn test_invalid_target_is_usage_error_without_fetching() {
        let fetcher = StubFetcher::serving(PAGE);
        let err = build_feed(&fetcher, "news.test/page", &options(), now())
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::Usage { .. }));
        assert!(fetcher.requested.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_custom_title_and_unbounded_dedup() {
        let fetcher = StubFetcher::serving(PAGE);
        let opts = FeedOptions {
            title: Some("My News".to_string()),
            dedup_capacity: None,
            ..options()
        };
        let feed = build_feed(&fetcher, "http://news.test", &opts, now())
            .await
            .unwrap();
        assert_eq!(feed.channel.title, "My News");
        assert_eq!(feed.items.len(), 2);
    }

    #[test]
    fn test_options_from_cli() {
        let args = Cli::parse_from([
            "feedgen",
            "http://news.test",
            "--min-title-len",
            "20",
            "--reject",
            "Subscribe",
            "--unbounded-dedup",
        ]);
        let opts = FeedOptions::from(&args);
        assert_eq!(opts.rules.min_title_len, 20);
        assert_eq!(opts.rules.reject_phrases, vec!["Skip to", "Subscribe"]);
        assert_eq!(opts.dedup_capacity, None);

        let bounded = FeedOptions::from(&Cli::parse_from(["feedgen", "http://news.test"]));
        assert_eq!(bounded.dedup_capacity, Some(200));
    }
}
