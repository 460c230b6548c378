use crate::glossary::Glossary;
use crate::search::{self, Event, Outcome, SearchMode};
use crate::tui::ui::Areas;
use crate::view::View;
use ratatui::layout::Position;
use tracing::info;

/// Which pane receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Topics,
    Query,
}

/// Lines scrolled per PageUp/PageDown
const SCROLL_PAGE: u16 = 10;

/// Application state
pub struct App {
    glossary: Glossary,
    pub search_mode: SearchMode,
    pub query: String,
    pub focus: Focus,
    /// Highlighted row in the topic list
    pub selected: usize,
    /// Contents of the display region
    pub view: View,
    pub scroll: u16,
    /// Largest useful scroll offset, measured by the last frame
    scroll_limit: u16,
    pub status_message: String,
}

impl App {
    pub fn new(glossary: Glossary, search_mode: SearchMode) -> Self {
        let status_message = format!("Тем: {}", glossary.len());

        Self {
            glossary,
            search_mode,
            query: String::new(),
            focus: Focus::Query,
            selected: 0,
            view: search::welcome(),
            scroll: 0,
            scroll_limit: u16::MAX,
            status_message,
        }
    }

    pub fn glossary(&self) -> &Glossary {
        &self.glossary
    }

    fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Render(view) => {
                self.view = view;
                self.scroll = 0;
            }
            Outcome::ModeChanged(mode) => {
                info!(from = %self.search_mode, to = %mode, "search mode toggled");
                self.search_mode = mode;
                self.status_message = mode.label().to_string();
            }
            Outcome::Unchanged => {}
        }
    }

    fn query_changed(&mut self) {
        let outcome = search::handle(
            &self.glossary,
            self.search_mode,
            Event::QueryChanged(&self.query),
        );
        self.apply(outcome);
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.query_changed();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.query_changed();
    }

    pub fn backspace(&mut self) {
        if self.query.pop().is_some() {
            self.query_changed();
        }
    }

    pub fn clear_query(&mut self) {
        if !self.query.is_empty() {
            self.query.clear();
            self.query_changed();
        }
    }

    /// Delete word backward from query (Ctrl+w)
    pub fn delete_word(&mut self) {
        // Remove trailing whitespace first
        while self.query.ends_with(' ') {
            self.query.pop();
        }
        // Remove word characters
        while !self.query.is_empty() && !self.query.ends_with(' ') {
            self.query.pop();
        }
        self.query_changed();
    }

    /// Enter in the entry field
    pub fn submit_query(&mut self) {
        let outcome = search::handle(
            &self.glossary,
            self.search_mode,
            Event::QuerySubmitted(&self.query),
        );
        if outcome == Outcome::Unchanged {
            self.status_message = format!(
                "Enter ищет только в режиме поиска по шаблону ({})",
                self.search_mode.label()
            );
        }
        self.apply(outcome);
    }

    pub fn toggle_mode(&mut self) {
        let outcome = search::handle(&self.glossary, self.search_mode, Event::ToggleMode);
        self.apply(outcome);
    }

    /// Show the topic under the selection
    pub fn activate_selected(&mut self) {
        let Some(topic) = self.glossary.get(self.selected) else {
            return;
        };
        let outcome = search::handle(
            &self.glossary,
            self.search_mode,
            Event::TopicSelected(&topic.title),
        );
        self.apply(outcome);
    }

    pub fn select_next(&mut self) {
        if !self.glossary.is_empty() {
            self.selected = (self.selected + 1).min(self.glossary.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.glossary.len().saturating_sub(1);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Topics => Focus::Query,
            Focus::Query => Focus::Topics,
        };
    }

    /// Record the wrapped height of the view and the visible rows, keeping
    /// the last line of the view reachable but never scrolled past
    pub fn fit_scroll(&mut self, content_lines: usize, viewport: u16) {
        let lines = u16::try_from(content_lines).unwrap_or(u16::MAX);
        self.scroll_limit = lines.saturating_sub(viewport);
        self.scroll = self.scroll.min(self.scroll_limit);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1).min(self.scroll_limit);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_page_down(&mut self) {
        self.scroll = self.scroll.saturating_add(SCROLL_PAGE).min(self.scroll_limit);
    }

    pub fn scroll_page_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(SCROLL_PAGE);
    }

    pub fn show_help(&mut self) {
        self.view = help_view();
        self.scroll = 0;
    }

    /// Left click at a screen position, using the layout of the last frame
    pub fn click(&mut self, position: Position, areas: &Areas) {
        if let Some(index) = areas.topic_at(position, self.selected, self.glossary.len()) {
            self.focus = Focus::Topics;
            self.selected = index;
            self.activate_selected();
        } else if areas.toggle.contains(position) {
            self.toggle_mode();
        } else if areas.input.contains(position) {
            self.focus = Focus::Query;
        }
    }
}

fn help_view() -> View {
    View::message(
        "Клавиши\n\n\
         Tab        переключить фокус: темы / поле запроса\n\
         ↑ ↓        выбрать тему, Enter открыть\n\
         F2, Ctrl+T переключить режим поиска\n\
         Enter      искать фразу (режим поиска по шаблону)\n\
         Ctrl+W     удалить слово, Ctrl+U очистить запрос\n\
         PgUp PgDn  прокрутка текста\n\
         Esc        очистить запрос или выйти\n\
         Ctrl+C     выйти",
    )
}
