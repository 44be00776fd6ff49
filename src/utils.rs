//! Text and URL helpers used by the link pipeline.
//!
//! This module provides the small string transforms the pipeline is built on:
//! - Markup stripping and single-line title sanitization
//! - Minimal URL joining against the page's base link
//! - Feed timestamp formatting
//! - String truncation for logging

use chrono::{DateTime, Utc};

/// Format used for the channel's `lastBuildDate`.
pub const BUILD_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Whitespace as classified by the C locale: space, tab, newline, vertical
/// tab, form feed and carriage return.
fn is_markup_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Remove everything between `<` and the next `>`.
///
/// There is no nesting or quoting awareness: a `>` inside an attribute value
/// ends the tag early. A stray `>` outside any tag is dropped as well, and an
/// unterminated `<` discards the rest of the input.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(strip_tags("Hello <b>World</b>"), "Hello World");
/// assert_eq!(strip_tags("a > b"), "a  b");
/// ```
pub fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Turn an anchor's inner markup into a single-line display title.
///
/// Steps, in order:
/// 1. Strip nested markup (see [`strip_tags`])
/// 2. Skip leading whitespace
/// 3. Cut at the first `\n` or `\r`
/// 4. Collapse whitespace runs into one space
/// 5. Drop a trailing space
///
/// The result never spans more than one line and is stable under repeated
/// application.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(sanitize_title("  Hello <b>World</b>\nExtra"), "Hello World");
/// ```
pub fn sanitize_title(raw_inner_markup: &str) -> String {
    let stripped = strip_tags(raw_inner_markup);
    let mut title = String::with_capacity(stripped.len());
    let mut was_space = false;

    for c in stripped.trim_start_matches(is_markup_space).chars() {
        if c == '\n' || c == '\r' {
            break;
        }
        if is_markup_space(c) {
            if !was_space {
                title.push(' ');
                was_space = true;
            }
        } else {
            title.push(c);
            was_space = false;
        }
    }

    if title.ends_with(' ') {
        title.pop();
    }
    title
}

/// Resolve a raw `href` against the page's base link.
///
/// Anything starting with `http` passes through untouched. Everything else
/// is appended to `base` with exactly one `/` between them. No dot-segment
/// resolution, percent handling or query/fragment logic is applied.
///
/// `base` must already have its trailing slash removed, see
/// [`strip_trailing_slash`].
pub fn resolve_url(base: &str, raw_href: &str) -> String {
    if raw_href.starts_with("http") {
        raw_href.to_string()
    } else if raw_href.starts_with('/') {
        format!("{base}{raw_href}")
    } else {
        format!("{base}/{raw_href}")
    }
}

/// Drop a single trailing `/` from the target URL.
pub fn strip_trailing_slash(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

/// Render a timestamp as an RFC 1123 style date in GMT.
pub fn build_date(now: DateTime<Utc>) -> String {
    now.format(BUILD_DATE_FORMAT).to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes on a character boundary with
/// an ellipsis and the remaining byte count appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sanitize_title_strips_and_cuts_at_newline() {
        assert_eq!(sanitize_title("  Hello <b>World</b>\nExtra"), "Hello World");
    }

    #[test]
    fn test_sanitize_title_collapses_whitespace() {
        assert_eq!(
            sanitize_title("\n\t Breaking:\t\t news   from  <span class=\"x\">here</span>  "),
            "Breaking: news from here"
        );
    }

    #[test]
    fn test_sanitize_title_carriage_return_ends_title() {
        assert_eq!(sanitize_title("First line\r\nSecond line"), "First line");
    }

    #[test]
    fn test_sanitize_title_is_idempotent() {
        let inputs = [
            "  Hello <b>World</b>\nExtra",
            "a > b <i>c",
            "\t\tspaced    out\ttitle  ",
            "<img src=\"x.png\">",
            "Über   café <em>naïve</em>",
            "",
        ];
        for input in inputs {
            let once = sanitize_title(input);
            assert_eq!(sanitize_title(&once), once, "input: {input:?}");
            assert!(!once.contains('\n') && !once.contains('\r'));
        }
    }

    #[test]
    fn test_strip_tags_known_limitations() {
        // `>` inside an attribute value ends the tag early.
        assert_eq!(strip_tags("<a title=\"x>y\">text"), "y\"text");
        // A stray `>` is dropped and an unclosed `<` swallows the rest.
        assert_eq!(strip_tags("a > b"), "a  b");
        assert_eq!(strip_tags("keep <lost"), "keep ");
    }

    #[test]
    fn test_resolve_url() {
        let base = "http://example.com";
        assert_eq!(resolve_url(base, "http://other.com/x"), "http://other.com/x");
        assert_eq!(resolve_url(base, "/foo"), "http://example.com/foo");
        assert_eq!(resolve_url(base, "foo"), "http://example.com/foo");
        assert_eq!(resolve_url(base, "https://secure.test/"), "https://secure.test/");
        assert_eq!(resolve_url(base, "?page=2"), "http://example.com/?page=2");
    }

    #[test]
    fn test_strip_trailing_slash() {
        assert_eq!(strip_trailing_slash("http://example.com/"), "http://example.com");
        assert_eq!(strip_trailing_slash("http://example.com"), "http://example.com");
        assert_eq!(strip_trailing_slash("http://example.com//"), "http://example.com/");
    }

    #[test]
    fn test_build_date_format() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 8, 5, 9).unwrap();
        assert_eq!(build_date(now), "Mon, 19 Oct 2026 08:05:09 GMT");
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short", 100), "short");
        let long = "a".repeat(500);
        let result = truncate_for_log(&long, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
        // Never splits a multi-byte character.
        assert_eq!(truncate_for_log("ééé", 3), "é…(+4 bytes)");
    }
}
