//! Transient overlays drawn above the feed: the swipe hint shown while a
//! swipe settles, and the toast used for bookmark/share feedback.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::gesture::Direction;
use crate::tui::component::Component;

/// Centred pill naming the swipe that just happened.
pub struct SwipeHint {
    pub direction: Direction,
}

impl Component for SwipeHint {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = format!("{} {}", self.direction.arrow(), self.direction.hint());
        let rect = centered_line(area, text.width() as u16 + 4, 3, area.height / 2);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                text,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Cyan)),
            ),
            rect,
        );
    }
}

/// Short message near the bottom of the screen.
pub struct Toast<'a> {
    pub message: &'a str,
}

impl Component for Toast<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rect = centered_line(
            area,
            self.message.width() as u16 + 4,
            3,
            area.height.saturating_sub(5),
        );
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(self.message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::White))
                .block(
                    Block::bordered()
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(Color::Green)),
                ),
            rect,
        );
    }
}

/// A `width`×`height` box horizontally centred in `area`, `top` rows down.
fn centered_line(area: Rect, width: u16, height: u16, top: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let y = area.y + top.min(area.height.saturating_sub(height));
    Rect::new(area.x + (area.width - width) / 2, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_swipe_hint_names_direction() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let mut hint = SwipeHint {
            direction: Direction::Left,
        };
        terminal.draw(|f| hint.render(f, f.area())).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Swipe left for next category"));
    }

    #[test]
    fn test_toast_fits_narrow_screen() {
        let mut terminal = Terminal::new(TestBackend::new(12, 4)).unwrap();
        let mut toast = Toast {
            message: "Copied to clipboard",
        };
        terminal.draw(|f| toast.render(f, f.area())).unwrap();
    }

    #[test]
    fn test_centered_line_stays_inside_area() {
        let area = Rect::new(2, 3, 20, 6);
        let rect = centered_line(area, 50, 3, 10);
        assert!(area.contains(rect.as_position()));
        assert!(rect.right() <= area.right());
        assert!(rect.bottom() <= area.bottom());
    }
}
