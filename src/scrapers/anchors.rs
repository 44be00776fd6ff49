//! Heuristic anchor scanner.
//!
//! Walks raw markup left to right looking for `<a ` opening tokens and pulls
//! out the double-quoted `href` value and the inner markup up to `</a>`.
//! This is a best-effort text scan, not an HTML parser:
//!
//! - Tokens are matched literally and case-sensitively (`<a `, `href="`,
//!   `</a>`). `<A HREF=...>`, single-quoted and unquoted attributes are
//!   not recognized.
//! - No entity decoding is performed on either field.
//! - An anchor is skipped when its `href="` is not inside the opening tag,
//!   its value is unterminated, or no `</a>` appears before the next `<a `.

use crate::models::AnchorCandidate;

const OPEN_TOKEN: &str = "<a ";
const HREF_TOKEN: &str = "href=\"";
const CLOSE_TOKEN: &str = "</a>";

/// Lazy iterator over the anchors of a document.
///
/// The cursor only moves forward, so the scan is finite and cannot be
/// restarted. Skipped anchors are counted in [`AnchorScanner::skipped`].
#[derive(Debug)]
pub struct AnchorScanner<'a> {
    document: &'a str,
    cursor: usize,
    skipped: usize,
}

impl<'a> AnchorScanner<'a> {
    pub fn new(document: &'a str) -> Self {
        Self::starting_at(document, 0)
    }

    /// Begin scanning at byte offset `cursor`. Offsets past the end or off a
    /// character boundary yield an empty scan.
    pub fn starting_at(document: &'a str, cursor: usize) -> Self {
        let cursor = if document.is_char_boundary(cursor) {
            cursor
        } else {
            document.len()
        };
        Self {
            document,
            cursor,
            skipped: 0,
        }
    }

    /// Number of anchor openings passed over without producing a candidate.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Try to read one anchor whose opening token starts at `start`.
    fn parse_at(&self, start: usize) -> Option<AnchorCandidate<'a>> {
        let doc = self.document;
        let after_open = start + OPEN_TOKEN.len();

        let tag_end = start + doc[start..].find('>')?;
        let href_start = start + doc[start..tag_end].find(HREF_TOKEN)? + HREF_TOKEN.len();
        let href_end = href_start + doc[href_start..].find('"')?;

        // The closing token has to come before the next opening token.
        let limit = doc[after_open..]
            .find(OPEN_TOKEN)
            .map_or(doc.len(), |next| after_open + next);
        let text_start = tag_end + 1;
        if text_start > limit {
            return None;
        }
        let text_end = text_start + doc[text_start..limit].find(CLOSE_TOKEN)?;

        Some(AnchorCandidate {
            raw_href: &doc[href_start..href_end],
            raw_inner_markup: &doc[text_start..text_end],
        })
    }
}

impl<'a> Iterator for AnchorScanner<'a> {
    type Item = AnchorCandidate<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.cursor + self.document[self.cursor..].find(OPEN_TOKEN)?;
            // Resume just past this opening token whatever the outcome.
            self.cursor = start + OPEN_TOKEN.len();
            match self.parse_at(start) {
                Some(candidate) => return Some(candidate),
                None => self.skipped += 1,
            }
        }
    }
}
