//! Render instructions produced by the search handlers.

use crate::matcher::Pattern;
use serde::Serialize;

/// Display style of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanStyle {
    Plain,
    /// Topic headings
    Heading,
    /// Highlighted query match
    Match,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledSpan {
    pub text: String,
    pub style: SpanStyle,
}

/// An ordered list of styled spans. Newlines inside span text are line
/// breaks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct View {
    spans: Vec<StyledSpan>,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    /// A view holding a single plain message.
    pub fn message(text: impl Into<String>) -> Self {
        let mut view = Self::new();
        view.push(text, SpanStyle::Plain);
        view
    }

    pub fn push(&mut self, text: impl Into<String>, style: SpanStyle) {
        let text = text.into();
        if !text.is_empty() {
            self.spans.push(StyledSpan { text, style });
        }
    }

    /// Append `text`, styling each match of `pattern` as [`SpanStyle::Match`]
    /// and everything else as `base`.
    pub fn push_highlighted(&mut self, text: &str, pattern: &Pattern, base: SpanStyle) {
        for segment in pattern.highlight(text) {
            let style = if segment.emphasized {
                SpanStyle::Match
            } else {
                base
            };
            self.push(segment.text, style);
        }
    }

    pub fn spans(&self) -> &[StyledSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn has_matches(&self) -> bool {
        self.spans.iter().any(|s| s.style == SpanStyle::Match)
    }

    /// The view's text with styling dropped.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}
