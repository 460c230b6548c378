//! Search modes and the event handlers that turn user input into views.
//!
//! Handlers are plain functions: the glossary, the current mode and the
//! input come in as arguments and a render instruction comes out. No
//! handler touches UI state directly.

use crate::glossary::Glossary;
use crate::matcher::Pattern;
use crate::view::{SpanStyle, View};
use anyhow::{Error, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const WELCOME: &str = "Выберите тему слева или используйте поиск.";
pub const PROMPT: &str = "🔍 Введите запрос для поиска.";
pub const NO_MATCHES: &str = "❌ Нет совпадений.";
pub const NOT_FOUND: &str = "❌ Ничего не найдено.";

/// Active search mode. Toggled by the user, never terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchMode {
    /// Live search over titles and bodies on every keystroke
    #[default]
    #[serde(rename = "character")]
    CharacterSearch,
    /// Body search on submit, first hit only
    #[serde(rename = "phrase")]
    ExactPhraseSearch,
}

impl SearchMode {
    pub fn toggle(self) -> Self {
        match self {
            SearchMode::CharacterSearch => SearchMode::ExactPhraseSearch,
            SearchMode::ExactPhraseSearch => SearchMode::CharacterSearch,
        }
    }

    /// Text of the mode indicator.
    pub fn label(self) -> &'static str {
        match self {
            SearchMode::CharacterSearch => "Режим: Посимвольный поиск",
            SearchMode::ExactPhraseSearch => "Режим: Поиск по шаблону",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SearchMode::CharacterSearch => "character",
            SearchMode::ExactPhraseSearch => "phrase",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "character" | "char" | "live" => Ok(SearchMode::CharacterSearch),
            "phrase" | "exact" => Ok(SearchMode::ExactPhraseSearch),
            other => bail!("Unknown search mode '{}' (expected 'character' or 'phrase')", other),
        }
    }
}

/// A discrete user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    TopicSelected(&'a str),
    QueryChanged(&'a str),
    QuerySubmitted(&'a str),
    ToggleMode,
}

/// What the UI should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render(View),
    ModeChanged(SearchMode),
    /// The event does not apply in the current mode
    Unchanged,
}

/// Dispatch an event against the glossary in the given mode.
pub fn handle(glossary: &Glossary, mode: SearchMode, event: Event<'_>) -> Outcome {
    debug!(?mode, ?event, "handling event");

    match event {
        Event::TopicSelected(title) => match select_topic(glossary, title) {
            Some(view) => Outcome::Render(view),
            None => Outcome::Unchanged,
        },
        Event::QueryChanged(input) => match mode {
            SearchMode::CharacterSearch => Outcome::Render(incremental_search(glossary, input)),
            SearchMode::ExactPhraseSearch => Outcome::Unchanged,
        },
        Event::QuerySubmitted(input) => match mode {
            SearchMode::ExactPhraseSearch => Outcome::Render(phrase_search(glossary, input)),
            SearchMode::CharacterSearch => Outcome::Unchanged,
        },
        Event::ToggleMode => Outcome::ModeChanged(mode.toggle()),
    }
}

/// Initial contents of the display region.
pub fn welcome() -> View {
    View::message(WELCOME)
}

/// Full text of a topic, or `None` for an unknown title.
pub fn select_topic(glossary: &Glossary, title: &str) -> Option<View> {
    let body = glossary.lookup(title)?;

    let mut view = View::new();
    view.push(format!("📘 {}", title), SpanStyle::Heading);
    view.push(format!("\n\n{}", body), SpanStyle::Plain);
    Some(view)
}

/// Every topic whose title or body contains the input, with matches
/// highlighted in both.
pub fn incremental_search(glossary: &Glossary, input: &str) -> View {
    let query = input.trim();
    if query.is_empty() {
        return View::message(PROMPT);
    }

    let hits = glossary.filter(query);
    if hits.is_empty() {
        return View::message(NO_MATCHES);
    }

    let pattern = Pattern::new(query);
    let mut view = View::new();

    for topic in hits {
        view.push("🔹 ", SpanStyle::Heading);
        view.push_highlighted(&topic.title, &pattern, SpanStyle::Heading);
        view.push("\n", SpanStyle::Plain);
        view.push_highlighted(&topic.body, &pattern, SpanStyle::Plain);
        view.push("\n\n", SpanStyle::Plain);
    }

    view
}

/// The first topic whose body contains the input, with the phrase
/// highlighted.
pub fn phrase_search(glossary: &Glossary, input: &str) -> View {
    let phrase = input.trim();
    if phrase.is_empty() {
        return View::message(PROMPT);
    }

    let Some(topic) = glossary.find_phrase(phrase) else {
        return View::message(NOT_FOUND);
    };

    let pattern = Pattern::new(phrase);
    let mut view = View::new();
    view.push(format!("🔍 Найдено в \"{}\"", topic.title), SpanStyle::Heading);
    view.push("\n", SpanStyle::Plain);
    view.push_highlighted(&topic.body, &pattern, SpanStyle::Plain);
    view
}
