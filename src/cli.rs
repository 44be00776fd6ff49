//! Command-line interface definitions for feedgen.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Only the target URL is required; everything else tunes the heuristics or
//! the output.

use crate::dedup::DEFAULT_CAPACITY;
use crate::fetch::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::outputs::Format;
use crate::scrapers::links::DEFAULT_MIN_TITLE_LEN;
use clap::Parser;

/// Command-line arguments for feedgen.
///
/// # Examples
///
/// ```sh
/// # RSS for a page, written to stdout
/// feedgen https://lite.cnn.com
///
/// # JSON to a file, ignoring "Subscribe" links
/// feedgen https://example.com/news --format json -o news.json --reject Subscribe
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Page to turn into a feed
    pub url: String,

    /// User-Agent header sent with the page request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Total request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Link titles must be longer than this many characters
    #[arg(long, default_value_t = DEFAULT_MIN_TITLE_LEN)]
    pub min_title_len: usize,

    /// Reject links whose title contains this text (repeatable)
    #[arg(long = "reject", value_name = "PHRASE")]
    pub reject_phrases: Vec<String>,

    /// How many distinct URLs to remember for deduplication
    #[arg(long, default_value_t = DEFAULT_CAPACITY, conflicts_with = "unbounded_dedup")]
    pub dedup_capacity: usize,

    /// Remember every emitted URL regardless of count
    #[arg(long)]
    pub unbounded_dedup: bool,

    /// Output document format
    #[arg(long, value_enum, default_value_t = Format::Rss)]
    pub format: Format,

    /// Channel title (defaults to "<url> Feed")
    #[arg(long)]
    pub title: Option<String>,

    /// Channel description
    #[arg(long, default_value = "Generated by feedgen")]
    pub description: String,

    /// Write the feed to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["feedgen", "http://example.com/"]);

        assert_eq!(cli.url, "http://example.com/");
        assert_eq!(cli.user_agent, "feedgen/1.0");
        assert_eq!(cli.timeout_secs, 30);
        assert_eq!(cli.min_title_len, 15);
        assert_eq!(cli.dedup_capacity, 200);
        assert!(!cli.unbounded_dedup);
        assert_eq!(cli.format, Format::Rss);
        assert_eq!(cli.description, "Generated by feedgen");
        assert!(cli.reject_phrases.is_empty());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_cli_options() {
        let cli = Cli::parse_from([
            "feedgen",
            "https://example.com/news",
            "--format",
            "json",
            "-o",
            "/tmp/feed.json",
            "--reject",
            "Subscribe",
            "--reject",
            "Sign in",
            "--unbounded-dedup",
            "-q",
        ]);

        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.output.as_deref(), Some("/tmp/feed.json"));
        assert_eq!(cli.reject_phrases, vec!["Subscribe", "Sign in"]);
        assert!(cli.unbounded_dedup);
        assert!(cli.quiet);
    }

    #[test]
    fn test_cli_requires_url() {
        let err = Cli::try_parse_from(["feedgen"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
