//! Case-insensitive substring matching and highlight segmentation.
//!
//! Matching is plain substring search over a per-character lowercase fold of
//! both the text and the query. There is no regex support and no notion of
//! word boundaries: `"клав"` matches inside `"клавиш"`.
//!
//! Folding can change byte lengths (`'İ'` lowercases to two chars), so every
//! folded byte remembers which original character produced it. Match offsets
//! are mapped back through that table, which keeps the segments produced by
//! [`highlight`] an exact partition of the input text.

use memchr::memmem::Finder;
use serde::Serialize;
use std::ops::Range;

/// A contiguous span of the input text, tagged as matched or plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub emphasized: bool,
}

impl<'a> Segment<'a> {
    pub fn plain(text: &'a str) -> Self {
        Self {
            text,
            emphasized: false,
        }
    }

    pub fn emphasized(text: &'a str) -> Self {
        Self {
            text,
            emphasized: true,
        }
    }
}

/// Lowercased copy of a text plus a map from each folded byte back to the
/// byte offset of the original character it came from.
struct Folded {
    text: String,
    origin: Vec<usize>,
}

impl Folded {
    fn new(text: &str) -> Self {
        let mut folded = String::with_capacity(text.len());
        let mut origin = Vec::with_capacity(text.len());

        for (start, c) in text.char_indices() {
            let before = folded.len();
            folded.extend(c.to_lowercase());
            origin.extend(std::iter::repeat_n(start, folded.len() - before));
        }

        Self {
            text: folded,
            origin,
        }
    }
}

/// Lowercase a string one character at a time.
///
/// Unlike [`str::to_lowercase`] this never applies context-sensitive rules
/// (final sigma), so a query folds exactly the way the text it is searched
/// in does.
fn fold_chars(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// A compiled case-insensitive substring query.
///
/// Fold the query once and reuse it across many texts, e.g. when filtering
/// every topic in a glossary.
pub struct Pattern {
    needle: String,
    finder: Finder<'static>,
}

impl Pattern {
    pub fn new(query: &str) -> Self {
        let needle = fold_chars(query);
        let finder = Finder::new(needle.as_bytes()).into_owned();
        Self { needle, finder }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Whether `text` contains the query anywhere, ignoring case.
    /// An empty query is contained in every text.
    pub fn is_match(&self, text: &str) -> bool {
        if self.is_empty() {
            return true;
        }
        self.finder.find(fold_chars(text).as_bytes()).is_some()
    }

    /// Byte ranges of every non-overlapping occurrence in `text`, left to
    /// right, leftmost match first. Ranges always fall on char boundaries of
    /// `text`. An empty query has no occurrences.
    pub fn find_matches(&self, text: &str) -> Vec<Range<usize>> {
        if self.is_empty() {
            return Vec::new();
        }

        let folded = Folded::new(text);
        let haystack = folded.text.as_bytes();
        let mut matches = Vec::new();
        let mut pos = 0;

        while pos < haystack.len() {
            let Some(offset) = self.finder.find(&haystack[pos..]) else {
                break;
            };
            let folded_start = pos + offset;
            let mut folded_end = folded_start + self.needle.len();

            // Widen to whole original characters when the match begins or
            // ends inside the lowercase expansion of a single char.
            let start = folded.origin[folded_start];
            let last = folded.origin[folded_end - 1];
            let end = last + text[last..].chars().next().map_or(0, char::len_utf8);

            while folded_end < haystack.len() && folded.origin[folded_end] < end {
                folded_end += 1;
            }

            matches.push(start..end);
            pos = folded_end;
        }

        matches
    }

    /// Split `text` into plain and emphasized segments around each match.
    pub fn highlight<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let matches = self.find_matches(text);
        if matches.is_empty() {
            return vec![Segment::plain(text)];
        }

        let mut segments = Vec::with_capacity(matches.len() * 2 + 1);
        let mut cursor = 0;

        for range in matches {
            if range.start > cursor {
                segments.push(Segment::plain(&text[cursor..range.start]));
            }
            segments.push(Segment::emphasized(&text[range.clone()]));
            cursor = range.end;
        }

        if cursor < text.len() {
            segments.push(Segment::plain(&text[cursor..]));
        }

        segments
    }
}

/// Highlight every case-insensitive occurrence of `query` in `text`.
///
/// An empty query, or a query that never occurs, yields a single plain
/// segment holding the whole text. Concatenating the returned segments
/// always reproduces `text`.
pub fn highlight<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    Pattern::new(query).highlight(text)
}

/// Byte ranges of the non-overlapping case-insensitive occurrences of
/// `query` in `text`.
pub fn find_matches(text: &str, query: &str) -> Vec<Range<usize>> {
    Pattern::new(query).find_matches(text)
}

/// Case-insensitive `str::contains`.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    Pattern::new(needle).is_match(haystack)
}
