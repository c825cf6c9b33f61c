//! Position in the filtered feed: `3 of 12` plus a row of dots.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

/// Beyond this many stories the dots show a window around the current one.
pub const MAX_DOTS: usize = 15;

pub struct Progress {
    pub index: usize,
    pub len: usize,
}

impl Progress {
    pub fn label(&self) -> String {
        format!("{} of {}", self.index + 1, self.len)
    }
}

/// `●` for the current story, `○` for the rest, windowed to `max` dots.
pub fn dots(index: usize, len: usize, max: usize) -> String {
    if len == 0 || max == 0 {
        return String::new();
    }
    let shown = len.min(max);
    let start = index
        .saturating_sub(shown / 2)
        .min(len - shown);
    (start..start + shown)
        .map(|i| if i == index { '●' } else { '○' })
        .collect()
}

impl Component for Progress {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.len == 0 {
            return;
        }
        let line = Line::from(vec![
            Span::styled(
                dots(self.index, self.len, MAX_DOTS),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw("  "),
            Span::styled(self.label(), Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}
