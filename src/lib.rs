//! # spravka - usability glossary browser
//!
//! spravka is a small terminal reference: a fixed glossary of usability/UX
//! terms that can be browsed topic by topic or searched in two modes.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`matcher`] - Case-insensitive substring matching and highlight segments
//! - [`glossary`] - The immutable topic store and topic lookups
//! - [`search`] - Search modes and the event handlers that produce views
//! - [`view`] - Styled render instructions
//! - [`tui`] - Interactive terminal UI
//! - [`output`] - Plain/colored/JSON output for one-shot commands
//! - [`config`] - Application data directory and config file
//! - [`logging`] - Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```
//! use spravka::glossary::Glossary;
//! use spravka::matcher::{Segment, highlight};
//! use spravka::search::{Event, Outcome, SearchMode, handle};
//!
//! let segments = highlight("Сочетания клавиш", "клав");
//! assert_eq!(segments[1], Segment::emphasized("клав"));
//!
//! let glossary = Glossary::builtin();
//! let outcome = handle(&glossary, SearchMode::CharacterSearch, Event::QueryChanged("GUI"));
//! assert!(matches!(outcome, Outcome::Render(view) if view.has_matches()));
//! ```
//!
//! ## Search modes
//!
//! 1. **Character search** - live, on every keystroke, over titles and bodies
//! 2. **Exact-phrase search** - on submit, over bodies, first topic wins

pub mod config;
pub mod glossary;
pub mod logging;
pub mod matcher;
pub mod output;
pub mod search;
#[cfg(feature = "interactive")]
pub mod tui;
pub mod view;
