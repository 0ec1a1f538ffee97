//! Terminal user interfaces.
//!
//! The calendar picker and notebook viewer are plain state machines that
//! consume key events and draw into a frame; this module owns the terminal
//! itself (raw mode + alternate screen) and runs their event loops. Keeping
//! the machines free of terminal I/O is what makes them testable.

pub mod calendar;
pub mod notebook;

use crate::errors::AppResult;
use crate::store;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};

/// Raw-mode + alternate-screen session, restored on drop.
///
/// Restoration runs on every exit path, including error propagation, so a
/// failing loop never leaves the user's terminal in raw mode.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> AppResult<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(TerminalGuard { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Runs the calendar picker over the given known dates.
///
/// Returns the chosen date key, or the empty string when the user cancelled
/// or quit without choosing; callers must treat the empty string as
/// "operation abandoned", not as a date.
pub fn run_calendar(dates: Vec<String>) -> AppResult<String> {
    let mut guard = TerminalGuard::new()?;
    let mut cal = calendar::Calendar::new(dates, store::today_key());

    while !cal.is_done() {
        guard.terminal.draw(|frame| cal.render(frame))?;
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                cal.handle_key(key);
            }
        }
    }

    Ok(cal.selected_date().to_string())
}

/// Runs the read-only notebook viewer over `(date, content)` pages.
pub fn run_notebook(pages: Vec<(String, String)>) -> AppResult<()> {
    let mut guard = TerminalGuard::new()?;
    let mut notebook = notebook::Notebook::new(pages);

    let size = guard.terminal.size()?;
    notebook.resize(size.width, size.height);

    while !notebook.is_quitting() {
        guard.terminal.draw(|frame| notebook.render(frame))?;
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => notebook.handle_key(key),
            Event::Resize(width, height) => notebook.resize(width, height),
            _ => {}
        }
    }

    Ok(())
}
