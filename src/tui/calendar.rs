//! Calendar date picker.
//!
//! A selectable list of known entry dates, most recent first, with today
//! always reachable. The picker is a three-state machine: it browses until
//! the user confirms a date or cancels, and then holds that terminal state.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::store::DATE_KEY_FORMAT;

/// One selectable row: a date key plus whether a durable entry exists.
///
/// Rendering switches on `has_content`; behavior does not depend on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarItem {
    pub date: String,
    pub has_content: bool,
}

impl CalendarItem {
    fn label(&self) -> String {
        // Presentation only; an unparseable key falls back to the raw string.
        let formatted = NaiveDate::parse_from_str(&self.date, DATE_KEY_FORMAT)
            .map(|d| d.format("%a, %b %-d, %Y").to_string())
            .unwrap_or_else(|_| self.date.clone());

        if self.has_content {
            format!("● {}", formatted)
        } else {
            format!("○ {}  (no content yet)", formatted)
        }
    }
}

/// Picker lifecycle. `Selected` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarState {
    Browsing,
    Selected,
    Cancelled,
}

/// The calendar picker state machine.
pub struct Calendar {
    items: Vec<CalendarItem>,
    cursor: usize,
    state: CalendarState,
    selected: String,
}

impl Calendar {
    /// Builds a picker over `dates`, sorted most recent first.
    ///
    /// When `today` is not among the known dates, it is injected at the
    /// front as a "no content yet" item so the current day is always
    /// reachable.
    pub fn new(mut dates: Vec<String>, today: String) -> Self {
        dates.sort();
        dates.dedup();
        dates.reverse();

        let today_exists = dates.iter().any(|d| *d == today);

        let mut items: Vec<CalendarItem> = Vec::with_capacity(dates.len() + 1);
        if !today_exists {
            items.push(CalendarItem {
                date: today,
                has_content: false,
            });
        }
        items.extend(dates.into_iter().map(|date| CalendarItem {
            date,
            has_content: true,
        }));

        Calendar {
            items,
            cursor: 0,
            state: CalendarState::Browsing,
            selected: String::new(),
        }
    }

    /// The rows in display order.
    pub fn items(&self) -> &[CalendarItem] {
        &self.items
    }

    /// Current cursor position within [`items`](Self::items).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> CalendarState {
        self.state
    }

    /// Whether the picker has reached a terminal state.
    pub fn is_done(&self) -> bool {
        self.state != CalendarState::Browsing
    }

    /// The confirmed date key; empty string means no selection was made.
    pub fn selected_date(&self) -> &str {
        &self.selected
    }

    /// Feeds one key press into the state machine.
    ///
    /// Input after a terminal state is ignored.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.is_done() {
            return;
        }

        let cancel = matches!(key.code, KeyCode::Esc | KeyCode::Char('q'))
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL));

        if cancel {
            self.state = CalendarState::Cancelled;
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.items.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(item) = self.items.get(self.cursor) {
                    self.selected = item.date.clone();
                    self.state = CalendarState::Selected;
                }
            }
            _ => {}
        }
    }

    /// Draws the picker into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let [list_area, help_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| {
                let style = if item.has_content {
                    Style::default()
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                ListItem::new(Line::from(Span::styled(item.label(), style)))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" Calendar "))
            .highlight_style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::Cyan),
            )
            .highlight_symbol("> ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.cursor));
        frame.render_stateful_widget(list, list_area, &mut list_state);

        let help = Paragraph::new(Line::from(Span::styled(
            " enter: select • ↑/k ↓/j: move • esc/q: quit",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(help, help_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_new_sorts_descending_and_injects_today_at_front() {
        let cal = Calendar::new(
            vec!["2024-01-01".to_string(), "2024-01-02".to_string()],
            "2024-06-15".to_string(),
        );

        let dates: Vec<&str> = cal.items().iter().map(|i| i.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-06-15", "2024-01-02", "2024-01-01"]);
        assert!(!cal.items()[0].has_content);
        assert!(cal.items()[1].has_content);
    }

    #[test]
    fn test_new_does_not_duplicate_existing_today() {
        let cal = Calendar::new(
            vec!["2024-06-15".to_string(), "2024-06-14".to_string()],
            "2024-06-15".to_string(),
        );

        let dates: Vec<&str> = cal.items().iter().map(|i| i.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-06-15", "2024-06-14"]);
        // Today already had content, so it keeps its marker.
        assert!(cal.items()[0].has_content);
    }

    #[test]
    fn test_cursor_moves_clamp_at_bounds() {
        let mut cal = Calendar::new(
            vec!["2024-01-01".to_string(), "2024-01-02".to_string()],
            "2024-06-15".to_string(),
        );

        // No wraparound upward from the first row.
        cal.handle_key(key(KeyCode::Up));
        assert_eq!(cal.cursor(), 0);

        cal.handle_key(key(KeyCode::Down));
        cal.handle_key(key(KeyCode::Char('j')));
        assert_eq!(cal.cursor(), 2);

        // No wraparound past the last row.
        cal.handle_key(key(KeyCode::Down));
        assert_eq!(cal.cursor(), 2);

        cal.handle_key(key(KeyCode::Char('k')));
        assert_eq!(cal.cursor(), 1);
    }

    #[test]
    fn test_confirm_captures_date_under_cursor() {
        let mut cal = Calendar::new(
            vec!["2024-01-01".to_string(), "2024-01-02".to_string()],
            "2024-06-15".to_string(),
        );

        cal.handle_key(key(KeyCode::Down));
        cal.handle_key(key(KeyCode::Enter));

        assert_eq!(cal.state(), CalendarState::Selected);
        assert!(cal.is_done());
        assert_eq!(cal.selected_date(), "2024-01-02");
    }

    #[test]
    fn test_cancel_leaves_selection_empty() {
        let mut cal = Calendar::new(vec!["2024-01-01".to_string()], "2024-06-15".to_string());

        cal.handle_key(key(KeyCode::Esc));

        assert_eq!(cal.state(), CalendarState::Cancelled);
        assert!(cal.is_done());
        assert_eq!(cal.selected_date(), "");
    }

    #[test]
    fn test_input_after_terminal_state_is_ignored() {
        let mut cal = Calendar::new(vec!["2024-01-01".to_string()], "2024-06-15".to_string());

        cal.handle_key(key(KeyCode::Char('q')));
        assert_eq!(cal.state(), CalendarState::Cancelled);

        cal.handle_key(key(KeyCode::Enter));
        assert_eq!(cal.state(), CalendarState::Cancelled);
        assert_eq!(cal.selected_date(), "");
    }

    #[test]
    fn test_today_only_calendar_is_selectable() {
        let mut cal = Calendar::new(Vec::new(), "2024-06-15".to_string());

        assert_eq!(cal.items().len(), 1);
        cal.handle_key(key(KeyCode::Enter));
        assert_eq!(cal.selected_date(), "2024-06-15");
    }
}
