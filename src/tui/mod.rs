mod app;
mod ui;

use crate::glossary::Glossary;
use crate::search::SearchMode;
use anyhow::Result;
use app::{App, Focus};
use crossterm::{
    cursor::Show,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Position, Rect},
};
use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;
use tracing::info;

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run(glossary: Glossary, mode: SearchMode, initial_query: Option<String>) -> Result<()> {
    install_panic_hook();

    // Setup terminal; the guard restores it on every exit path from here on
    let _guard = TerminalGuard::enter(restore_terminal)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    // Clear the terminal to prevent any artifacts from previous content
    terminal.clear()?;

    info!(topics = glossary.len(), %mode, "starting interactive browser");
    let mut app = App::new(glossary, mode);

    if let Some(query) = initial_query {
        app.set_query(&query);
    }

    run_app(&mut terminal, &mut app)
}

/// Raw mode, alternate screen and mouse capture, undone on drop
struct TerminalGuard {
    restore: fn(),
}

impl TerminalGuard {
    fn enter(restore: fn()) -> Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard { restore };
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        (self.restore)();
    }
}

/// Restore the terminal before the panic message is printed. Release
/// builds abort on panic, so no destructor would run.
fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| chain_panic_hook(restore_terminal));
}

fn chain_panic_hook(restore: fn()) {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore();
        previous(info);
    }));
}

fn restore_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
}

/// What the event loop should do after a key press
enum Flow {
    Continue,
    Quit,
}

fn run_app(terminal: &mut Term, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        match event::read()? {
            // Only handle key press events, not release or repeat
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Flow::Quit = handle_key(app, key) {
                    info!("quit requested");
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => handle_mouse(terminal, app, mouse)?,
            _ => {}
        }
    }
}

fn handle_mouse(terminal: &Term, app: &mut App, mouse: MouseEvent) -> Result<()> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let size = terminal.size()?;
            let areas = ui::layout(Rect::new(0, 0, size.width, size.height));
            app.click(Position::new(mouse.column, mouse.row), &areas);
        }
        MouseEventKind::ScrollDown => app.scroll_down(),
        MouseEventKind::ScrollUp => app.scroll_up(),
        _ => {}
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) -> Flow {
    // Global keybindings
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Flow::Quit,
        (KeyModifiers::CONTROL, KeyCode::Char('q')) => return Flow::Quit,
        (KeyModifiers::CONTROL, KeyCode::Char('t')) | (_, KeyCode::F(2)) => {
            app.toggle_mode();
            return Flow::Continue;
        }
        (_, KeyCode::F(1)) => {
            app.show_help();
            return Flow::Continue;
        }
        (_, KeyCode::Tab) | (_, KeyCode::BackTab) => {
            app.toggle_focus();
            return Flow::Continue;
        }
        (_, KeyCode::PageDown) => {
            app.scroll_page_down();
            return Flow::Continue;
        }
        (_, KeyCode::PageUp) => {
            app.scroll_page_up();
            return Flow::Continue;
        }
        (_, KeyCode::Esc) => {
            if app.query.is_empty() {
                return Flow::Quit;
            }
            app.clear_query();
            return Flow::Continue;
        }
        _ => {}
    }

    match app.focus {
        Focus::Topics => match key.code {
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Home | KeyCode::Char('g') => app.select_first(),
            KeyCode::End | KeyCode::Char('G') => app.select_last(),
            KeyCode::Enter | KeyCode::Char(' ') => app.activate_selected(),
            _ => {}
        },
        Focus::Query => match (key.modifiers, key.code) {
            // Ctrl+w - delete word backward
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => app.delete_word(),
            // Ctrl+u - clear the entry field
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.clear_query(),
            // Ctrl+h - backspace (terminal standard)
            (KeyModifiers::CONTROL, KeyCode::Char('h')) => app.backspace(),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
                KeyCode::Enter => app.submit_query(),
                KeyCode::Backspace => app.backspace(),
                KeyCode::Down => app.select_next(),
                KeyCode::Up => app.select_prev(),
                KeyCode::Char(c) => app.push_char(c),
                _ => {}
            },
            _ => {}
        },
    }

    Flow::Continue
}
