//! Multi-page notebook viewer.
//!
//! A read-only browser over all entries, one page per date, most recent
//! first. Each page's raw markdown is rendered at the current viewport width
//! and scrolled vertically; paging between dates is clamped at both ends.
//! The footer shows a window of neighboring page labels centered on the
//! current one, recomputed from scratch every render.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::collections::HashMap;

use crate::markdown;

/// Rows reserved for header and footer around the scrollable viewport.
pub const CHROME_ROWS: u16 = 4;

/// Columns kept free of text at the wrap boundary.
const WRAP_MARGIN: u16 = 4;

// Footer layout constants, used to decide how many page labels fit.
const FOOTER_CONTROLS_WIDTH: usize = 60;
const FOOTER_LABEL_WIDTH: usize = 11; // "YYYY-MM-DD"
const FOOTER_SEPARATOR_WIDTH: usize = 3; // " | "
const FOOTER_MIN_VISIBLE: usize = 3;

/// The notebook viewer state machine.
pub struct Notebook {
    pages: Vec<String>,
    contents: HashMap<String, String>,
    current: usize,
    width: u16,
    height: u16,
    scroll: usize,
    rendered: Text<'static>,
    quitting: bool,
}

impl Notebook {
    /// Builds a viewer over `(date, content)` pages, most recent first.
    pub fn new(pages: Vec<(String, String)>) -> Self {
        let mut dates: Vec<String> = pages.iter().map(|(date, _)| date.clone()).collect();
        dates.sort();
        dates.reverse();

        let contents: HashMap<String, String> = pages.into_iter().collect();

        let mut notebook = Notebook {
            pages: dates,
            contents,
            current: 0,
            width: 80,
            height: 24,
            scroll: 0,
            rendered: Text::default(),
            quitting: false,
        };
        notebook.render_current_page();
        notebook
    }

    /// The date key of the page being shown; empty string when there are no
    /// pages at all.
    pub fn current_page(&self) -> &str {
        self.pages.get(self.current).map_or("", |d| d.as_str())
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    /// Rows available to page content after the chrome allowance.
    pub fn viewport_height(&self) -> u16 {
        self.height.saturating_sub(CHROME_ROWS)
    }

    /// Updates viewport geometry and re-renders the current page at the new
    /// wrap width. The scroll offset is re-clamped so the viewport never
    /// points past the content.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.render_current_page();
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Moves to the next (older) page; clamped, no wraparound.
    pub fn next_page(&mut self) {
        if !self.pages.is_empty() && self.current + 1 < self.pages.len() {
            self.current += 1;
            self.scroll = 0;
            self.render_current_page();
        }
    }

    /// Moves to the previous (newer) page; clamped, no wraparound.
    pub fn prev_page(&mut self) {
        if self.current > 0 {
            self.current -= 1;
            self.scroll = 0;
            self.render_current_page();
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = (self.scroll + lines).min(self.max_scroll());
    }

    pub fn goto_top(&mut self) {
        self.scroll = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// Feeds one key press into the state machine.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let quit = matches!(key.code, KeyCode::Char('q'))
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL));
        if quit {
            self.quitting = true;
            return;
        }

        if self.pages.is_empty() {
            return;
        }

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.prev_page(),
            KeyCode::Right | KeyCode::Char('l') => self.next_page(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(1),
            KeyCode::PageUp | KeyCode::Char('b') => self.scroll_up(self.viewport_height() as usize),
            KeyCode::PageDown | KeyCode::Char('f') => {
                self.scroll_down(self.viewport_height() as usize)
            }
            KeyCode::Char('g') => self.goto_top(),
            KeyCode::Char('G') => self.goto_bottom(),
            _ => {}
        }
    }

    fn max_scroll(&self) -> usize {
        self.rendered
            .lines
            .len()
            .saturating_sub(self.viewport_height() as usize)
    }

    /// Re-renders the current page's markdown into the viewport width.
    ///
    /// A transform that yields nothing usable falls back to the raw content
    /// lines; browsing never hard-fails on rendering.
    fn render_current_page(&mut self) {
        let Some(date) = self.pages.get(self.current) else {
            self.rendered = Text::default();
            return;
        };
        let content = self.contents.get(date).map_or("", |c| c.as_str());
        let wrap_width = self.width.saturating_sub(WRAP_MARGIN) as usize;

        self.rendered = match markdown::render(content, wrap_width) {
            Some(text) => text,
            None => Text::from(
                content
                    .lines()
                    .map(|l| Line::from(l.to_string()))
                    .collect::<Vec<_>>(),
            ),
        };
    }

    /// Which slice of the page list the footer shows: `(start, count)`.
    ///
    /// Derived from (current index, page count, width) alone — recomputed
    /// every render, never stored.
    fn footer_page_window(&self) -> (usize, usize) {
        let available =
            (self.width as usize).saturating_sub(FOOTER_CONTROLS_WIDTH + WRAP_MARGIN as usize);
        let max_visible = (available / (FOOTER_LABEL_WIDTH + FOOTER_SEPARATOR_WIDTH))
            .max(FOOTER_MIN_VISIBLE)
            .min(self.pages.len());

        // Center the current page, then pull the window back inside bounds.
        let mut start = self.current.saturating_sub(max_visible / 2);
        if start + max_visible > self.pages.len() {
            start = self.pages.len() - max_visible;
        }

        (start, max_visible)
    }

    fn footer_line(&self) -> Line<'static> {
        let (start, count) = self.footer_page_window();

        let mut spans: Vec<Span> = Vec::new();
        if start > 0 {
            spans.push(Span::styled("◀ ", Style::default().fg(Color::DarkGray)));
        }
        for (i, date) in self.pages.iter().enumerate().skip(start).take(count) {
            if i > start {
                spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            }
            if i == self.current {
                spans.push(Span::styled(
                    date.clone(),
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .fg(Color::Green),
                ));
            } else {
                spans.push(Span::styled(
                    date.clone(),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }
        if start + count < self.pages.len() {
            spans.push(Span::styled(" ▶", Style::default().fg(Color::DarkGray)));
        }

        Line::from(spans)
    }

    /// Draws the viewer into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        if self.pages.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No entries to show.",
                Style::default().fg(Color::DarkGray),
            )));
            frame.render_widget(empty, frame.area());
            return;
        }

        let [header_area, content_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .areas(frame.area());

        let header = Paragraph::new(Line::from(Span::styled(
            format!(" Notebook — {}", self.current_page()),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(header, header_area);

        let content = Paragraph::new(self.rendered.clone())
            .scroll((self.scroll.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(content, content_area);

        let [nav_area, help_area, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(footer_area);

        let nav = Paragraph::new(self.footer_line()).alignment(Alignment::Center);
        frame.render_widget(nav, nav_area);

        let help = Paragraph::new(Line::from(Span::styled(
            " ←/h: prev • →/l: next • ↑/k ↓/j: scroll • g/G: top/bottom • q: quit",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(help, help_area);
    }
}
