//! # SearchBar Component
//!
//! One-line query editor opened with `/`. Filtering is live: every edit
//! emits `Changed` so the feed follows the text as it is typed.
//!
//! - Enter keeps the query and closes the bar
//! - Esc clears the query and closes the bar
//!
//! The buffer is internal state; the parent decides when the bar is shown.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PROMPT: &str = " / ";

/// High-level events emitted by the SearchBar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Changed(String),
    Submit,
    Cancel,
}

#[derive(Default)]
pub struct SearchBar {
    pub buffer: String,
    /// Whether the bar has keyboard focus (draws the cursor).
    pub focused: bool,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open for editing, starting from the active query.
    pub fn open(&mut self, query: &str) {
        self.buffer = query.to_string();
        self.focused = true;
    }
}

impl EventHandler for SearchBar {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SearchEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                Some(SearchEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Backspace => {
                self.buffer.pop()?;
                Some(SearchEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Submit => {
                self.focused = false;
                Some(SearchEvent::Submit)
            }
            TuiEvent::Escape => {
                self.buffer.clear();
                self.focused = false;
                Some(SearchEvent::Cancel)
            }
            _ => None,
        }
    }
}

impl Component for SearchBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let placeholder = self.buffer.is_empty();
        let text = if placeholder {
            Span::styled(
                "Search headlines, summaries, sources",
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Span::raw(self.buffer.as_str())
        };
        let line = Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(Color::Yellow)),
            text,
        ]);
        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(Color::Black)),
            area,
        );

        if self.focused {
            let typed = if placeholder { 0 } else { self.buffer.width() };
            let x = (area.x as usize + PROMPT.len() + typed)
                .min((area.x + area.width.saturating_sub(1)) as usize) as u16;
            frame.set_cursor_position(Position::new(x, area.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_typing_emits_changes() {
        let mut bar = SearchBar::new();
        bar.open("");
        assert_eq!(
            bar.handle_event(&TuiEvent::InputChar('f')),
            Some(SearchEvent::Changed("f".into()))
        );
        assert_eq!(
            bar.handle_event(&TuiEvent::InputChar('e')),
            Some(SearchEvent::Changed("fe".into()))
        );
        assert_eq!(
            bar.handle_event(&TuiEvent::Backspace),
            Some(SearchEvent::Changed("f".into()))
        );
    }

    #[test]
    fn test_backspace_on_empty_is_silent() {
        let mut bar = SearchBar::new();
        assert_eq!(bar.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_escape_clears_and_unfocuses() {
        let mut bar = SearchBar::new();
        bar.open("fed");
        assert_eq!(bar.handle_event(&TuiEvent::Escape), Some(SearchEvent::Cancel));
        assert!(bar.buffer.is_empty());
        assert!(!bar.focused);
    }

    #[test]
    fn test_submit_keeps_query() {
        let mut bar = SearchBar::new();
        bar.open("fed");
        assert_eq!(bar.handle_event(&TuiEvent::Submit), Some(SearchEvent::Submit));
        assert_eq!(bar.buffer, "fed");
    }

    #[test]
    fn test_render_shows_placeholder_then_text() {
        let mut bar = SearchBar::new();
        bar.open("");
        let mut terminal = Terminal::new(TestBackend::new(50, 1)).unwrap();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        assert!(buffer_text(terminal.backend().buffer()).contains("Search headlines"));

        bar.handle_event(&TuiEvent::InputChar('x'));
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains(" / x"));
    }
}
