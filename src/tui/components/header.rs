//! # Header Component
//!
//! Top line: app name, active filter and the refresh spinner.
//!
//! ```text
//!  oddsfeed · Technology · "chip"                     ⠋ Refreshing
//! ```
//!
//! Stateless: everything arrives as props.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::feed::Category;
use crate::tui::component::Component;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct Header<'a> {
    pub category: Category,
    pub query: &'a str,
    pub is_refreshing: bool,
    pub bookmark_count: usize,
    pub spinner_frame: usize,
}

impl Component for Header<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(16)]).areas(area);

        let mut spans = vec![
            Span::styled(
                " oddsfeed",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" · ", Style::default().fg(Color::DarkGray)),
            Span::raw(self.category.label()),
        ];
        if !self.query.is_empty() {
            spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                format!("\"{}\"", self.query),
                Style::default().fg(Color::Yellow),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), left);

        let status = if self.is_refreshing {
            Span::styled(
                format!("{} Refreshing ", SPINNER[self.spinner_frame % SPINNER.len()]),
                Style::default().fg(Color::Cyan),
            )
        } else {
            Span::styled(
                format!("★ {} ", self.bookmark_count),
                Style::default().fg(Color::DarkGray),
            )
        };
        frame.render_widget(
            Paragraph::new(Line::from(status)).alignment(Alignment::Right),
            right,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(header: &mut Header) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 1)).unwrap();
        terminal.draw(|f| header.render(f, f.area())).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_header_shows_category_and_query() {
        let text = draw(&mut Header {
            category: Category::Technology,
            query: "chip",
            is_refreshing: false,
            bookmark_count: 2,
            spinner_frame: 0,
        });
        assert!(text.contains("oddsfeed"));
        assert!(text.contains("Technology"));
        assert!(text.contains("\"chip\""));
        assert!(text.contains("★ 2"));
    }

    #[test]
    fn test_header_shows_refresh_spinner() {
        let text = draw(&mut Header {
            category: Category::All,
            query: "",
            is_refreshing: true,
            bookmark_count: 0,
            spinner_frame: 3,
        });
        assert!(text.contains("Refreshing"));
        assert!(!text.contains('"'));
    }
}
