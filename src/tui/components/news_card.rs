//! # News Card
//!
//! The story on screen, drawn as a bordered card:
//!
//! ```text
//! ╭ Reuters · 2 hours ago ─────────────── ★ ╮
//! │  Bullish   High Impact                  │
//! │                                         │
//! │ Headline, bold and wrapped              │
//! │                                         │
//! │ Summary, wrapped, truncated to fit      │
//! │                                         │
//! │ ▸ Show Markets (4)              Enter   │
//! ╰─────────────────────────────────────────╯
//! ```
//!
//! Also here: the dimmed preview of the next story and the empty state.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::core::feed::NewsItem;
use crate::core::gesture::Direction;
use crate::tui::component::Component;
use crate::tui::components::badges::{impact_badge, sentiment_badge};

pub struct NewsCard<'a> {
    pub item: &'a NewsItem,
    pub bookmarked: bool,
    /// Set while a swipe is settling; tints the border.
    pub swipe: Option<Direction>,
    /// Where the markets button was drawn. Output of `render`.
    pub button_area: Rect,
}

impl<'a> NewsCard<'a> {
    pub fn new(item: &'a NewsItem, bookmarked: bool, swipe: Option<Direction>) -> Self {
        Self {
            item,
            bookmarked,
            swipe,
            button_area: Rect::default(),
        }
    }
}

impl Component for NewsCard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = match self.swipe {
            Some(_) => Style::default().fg(Color::Cyan),
            None => Style::default().fg(Color::DarkGray),
        };
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Line::from(vec![
                Span::styled(
                    format!(" {} ", self.item.source),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("· {} ", self.item.time),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
            .padding(Padding::horizontal(1));
        if self.bookmarked {
            block = block.title(
                Line::from(Span::styled(" ★ ", Style::default().fg(Color::Yellow))).right_aligned(),
            );
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [badges_area, _, body_area, button_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                sentiment_badge(self.item.sentiment),
                Span::raw(" "),
                impact_badge(self.item.impact),
            ])),
            badges_area,
        );

        let body = vec![
            Line::from(Span::styled(
                self.item.headline.as_str(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::styled(self.item.summary.as_str(), Style::default().fg(Color::Gray)),
        ];
        frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: true }), body_area);

        let [label_area, hint_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(7)]).areas(button_area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("▸ {}", self.item.market_count_text()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            label_area,
        );
        frame.render_widget(
            Paragraph::new(Span::styled("Enter", Style::default().fg(Color::DarkGray)))
                .alignment(Alignment::Right),
            hint_area,
        );
        self.button_area = button_area;
    }
}

/// Headline of the story behind the current one.
pub struct NextPreview<'a> {
    pub item: Option<&'a NewsItem>,
}

impl Component for NextPreview<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(item) = self.item else {
            return;
        };
        let line = Line::from(vec![
            Span::styled("  next ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                item.headline.as_str(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Shown when the category and query leave nothing.
pub struct EmptyState<'a> {
    pub query: &'a str,
}

impl Component for EmptyState<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hint = if self.query.is_empty() {
            "Try another category".to_string()
        } else {
            format!("Nothing matches \"{}\". Esc clears the search", self.query)
        };
        let text = vec![
            Line::from(Span::styled(
                "No stories",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        ];
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .areas(area);
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            middle,
        );
    }
}
