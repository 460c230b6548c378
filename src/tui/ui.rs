use crate::tui::app::{App, Focus};
use crate::view::{SpanStyle, View};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Margin, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

const INPUT_PLACEHOLDER: &str = "Введите запрос...";
const TOGGLE_LABEL: &str = "[ ⟳ Переключить режим ]";

/// Screen regions of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub topics: Rect,
    pub mode: Rect,
    pub input: Rect,
    pub toggle: Rect,
    pub content: Rect,
    pub status: Rect,
}

impl Areas {
    /// Topic index under a screen position, if any
    pub fn topic_at(&self, position: Position, selected: usize, count: usize) -> Option<usize> {
        let inner = self.topics.inner(Margin::new(1, 1));
        if !inner.contains(position) {
            return None;
        }
        let offset = topic_offset(selected, inner.height as usize);
        let index = offset + (position.y - inner.y) as usize;
        (index < count).then_some(index)
    }
}

/// First visible topic row, keeping the selection on screen
fn topic_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        return 0;
    }
    selected.saturating_sub(visible - 1)
}

pub fn layout(area: Rect) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Panes
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Mode indicator
            Constraint::Length(3), // Query input
            Constraint::Length(1), // Mode toggle
            Constraint::Min(3),    // Display region
        ])
        .split(panes[1]);

    let toggle_width = (TOGGLE_LABEL.chars().count() as u16).min(right[2].width);

    Areas {
        topics: panes[0],
        mode: right[0],
        input: right[1],
        toggle: Rect::new(right[2].x, right[2].y, toggle_width, right[2].height),
        content: right[3],
        status: rows[1],
    }
}

pub fn draw(f: &mut Frame, app: &mut App) {
    let areas = layout(f.area());

    draw_topics(f, app, areas.topics);
    draw_mode(f, app, areas.mode);
    draw_query_input(f, app, areas.input);
    draw_toggle(f, areas.toggle);
    draw_content(f, app, areas.content);
    draw_status_bar(f, app, areas.status);
}

fn focused_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn draw_topics(f: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let offset = topic_offset(app.selected, visible);

    let items: Vec<ListItem> = app
        .glossary()
        .titles()
        .enumerate()
        .skip(offset)
        .map(|(i, title)| {
            let style = if i == app.selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(title)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focused_border(app.focus == Focus::Topics))
            .title(Span::styled(" Темы ", Style::default().add_modifier(Modifier::BOLD))),
    );

    f.render_widget(list, area);
}

fn draw_mode(f: &mut Frame, app: &App, area: Rect) {
    let mode = Paragraph::new(app.search_mode.label())
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));

    f.render_widget(mode, area);
}

fn draw_query_input(f: &mut Frame, app: &App, area: Rect) {
    let input = if app.query.is_empty() {
        Paragraph::new(INPUT_PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(app.query.as_str())
            .style(Style::default().fg(Color::Yellow))
            .scroll((0, input_offset(&app.query, area)))
    };

    let input = input.block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focused_border(app.focus == Focus::Query))
            .title(" Поиск "),
    );

    f.render_widget(input, area);

    // Show cursor, keeping it inside the borders
    if app.focus == Focus::Query {
        let width = query_width(&app.query).saturating_sub(input_offset(&app.query, area));
        f.set_cursor_position((
            area.x.saturating_add(1).saturating_add(width),
            area.y.saturating_add(1),
        ));
    }
}

fn query_width(query: &str) -> u16 {
    u16::try_from(query.chars().count()).unwrap_or(u16::MAX)
}

/// Columns hidden on the left so the end of a long query stays visible
fn input_offset(query: &str, area: Rect) -> u16 {
    let inner_width = area.width.saturating_sub(2);
    query_width(query).saturating_sub(inner_width.saturating_sub(1))
}

fn draw_toggle(f: &mut Frame, area: Rect) {
    let toggle =
        Paragraph::new(TOGGLE_LABEL).style(Style::default().fg(Color::Black).bg(Color::Gray));

    f.render_widget(toggle, area);
}

fn draw_content(f: &mut Frame, app: &mut App, area: Rect) {
    let inner = area.inner(Margin::new(1, 1));
    let lines = Paragraph::new(view_to_text(&app.view))
        .wrap(Wrap { trim: false })
        .line_count(inner.width);
    app.fit_scroll(lines, inner.height);

    let content = Paragraph::new(view_to_text(&app.view))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));

    f.render_widget(content, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status = Paragraph::new(format!(
        "{}  |  Tab: фокус  F2: режим  F1: справка  Esc: выход",
        app.status_message
    ))
    .style(Style::default().fg(Color::Cyan));

    f.render_widget(status, area);
}

fn span_style(style: SpanStyle) -> Style {
    match style {
        SpanStyle::Plain => Style::default(),
        SpanStyle::Heading => Style::default().add_modifier(Modifier::BOLD),
        SpanStyle::Match => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    }
}

/// Split a view into terminal lines at embedded newlines
pub fn view_to_text(view: &View) -> Text<'_> {
    let mut lines = vec![Line::default()];

    for span in view.spans() {
        let style = span_style(span.style);
        for (i, part) in span.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            if !part.is_empty()
                && let Some(line) = lines.last_mut()
            {
                line.push_span(Span::styled(part, style));
            }
        }
    }

    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glossary::{Glossary, Topic};
    use crate::search::SearchMode;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_view_to_text_splits_lines() {
        let glossary = Glossary::builtin();
        let view = crate::search::select_topic(&glossary, "Закон Хика").unwrap();
        let text = view_to_text(&view);

        assert_eq!(text.lines.len(), 3);
        assert_eq!(text.lines[0].spans[0].content, "📘 Закон Хика");
        assert!(text.lines[1].spans.is_empty());
        assert!(text.lines[2].spans[0].content.starts_with("Закон Хика описывает"));
    }

    #[test]
    fn test_view_to_text_styles_matches() {
        let glossary = Glossary::builtin();
        let view = crate::search::incremental_search(&glossary, "GUI");
        let text = view_to_text(&view);

        let matched: Vec<&str> = text
            .lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .filter(|s| s.style == span_style(SpanStyle::Match))
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(matched, vec!["GUI"]);
    }

    #[test]
    fn test_layout_regions_do_not_overlap() {
        let areas = layout(Rect::new(0, 0, 100, 30));
        assert!(!areas.topics.intersects(areas.input));
        assert!(!areas.toggle.intersects(areas.content));
        assert!(!areas.input.intersects(areas.toggle));
        assert_eq!(areas.status.height, 1);
    }

    #[test]
    fn test_topic_at() {
        let areas = layout(Rect::new(0, 0, 100, 30));
        let inner_y = areas.topics.y + 1;

        assert_eq!(areas.topic_at(Position::new(2, inner_y), 0, 9), Some(0));
        assert_eq!(areas.topic_at(Position::new(2, inner_y + 8), 0, 9), Some(8));
        assert_eq!(areas.topic_at(Position::new(2, inner_y + 9), 0, 9), None);
        // Border row
        assert_eq!(areas.topic_at(Position::new(2, areas.topics.y), 0, 9), None);
    }

    #[test]
    fn test_topic_offset_keeps_selection_visible() {
        assert_eq!(topic_offset(0, 5), 0);
        assert_eq!(topic_offset(4, 5), 0);
        assert_eq!(topic_offset(7, 5), 3);
        assert_eq!(topic_offset(3, 0), 0);
    }

    #[test]
    fn test_draw_initial_screen() {
        let mut app = App::new(Glossary::builtin(), SearchMode::CharacterSearch);
        let screen = render(&mut app);

        assert!(screen.contains("Темы"));
        assert!(screen.contains("Закон Хика"));
        assert!(screen.contains("Режим: Посимвольный поиск"));
        assert!(screen.contains("Введите запрос..."));
        assert!(screen.contains("Выберите тему слева или используйте поиск."));
    }

    #[test]
    fn test_draw_after_toggle() {
        let mut app = App::new(Glossary::builtin(), SearchMode::CharacterSearch);
        app.toggle_mode();
        let screen = render(&mut app);
        assert!(screen.contains("Режим: Поиск по шаблону"));
    }

    #[test]
    fn test_scrolling_past_short_content_keeps_it_visible() {
        let mut app = App::new(Glossary::builtin(), SearchMode::CharacterSearch);
        app.set_query("интерфейс");
        for _ in 0..5 {
            app.scroll_page_down();
        }
        let screen = render(&mut app);

        assert_eq!(app.scroll, 0);
        assert!(screen.contains("Меню представляют собой"));
        assert!(screen.contains("Показатели, такие как"));
    }

    #[test]
    fn test_scrolling_long_content_stops_at_last_line() {
        let topics = (0..40)
            .map(|i| Topic::new(format!("Тема {}", i), format!("Описание {}", i)))
            .collect();
        let mut app = App::new(Glossary::new(topics).unwrap(), SearchMode::CharacterSearch);
        app.set_query("тема");
        render(&mut app);

        for _ in 0..50 {
            app.scroll_page_down();
        }
        let screen = render(&mut app);
        assert!(app.scroll > 0);
        assert!(screen.contains("Тема 39"));
        assert!(screen.contains("Описание 39"));

        let limit = app.scroll;
        app.scroll_down();
        assert_eq!(app.scroll, limit);
    }

    #[test]
    fn test_long_query_keeps_cursor_in_input() {
        let mut app = App::new(Glossary::builtin(), SearchMode::CharacterSearch);
        app.set_query(&"я".repeat(300));

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let input = layout(Rect::new(0, 0, 100, 30)).input.inner(Margin::new(1, 1));
        let cursor = terminal.get_cursor_position().unwrap();
        assert!(input.contains(cursor));
        assert_eq!(cursor.x, input.right() - 1);
    }
}
