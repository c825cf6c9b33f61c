//! # Markets Panel Component
//!
//! Bottom sheet listing the prediction events linked to the current story.
//! Opened with Enter / `m` / a click on "Show Markets", dismissed with Esc.
//!
//! The events sit side by side in a horizontal scroller:
//!
//! ```text
//! ╭ Markets · Google Announces Solution to… ─────────────────────╮
//! │ 2 events · 4 markets                                        │
//! │ ╭ Next US Presidential… ╮ ╭ What will Trump say… ╮ ╭ …      │
//! │ │ Biden wins            │ │ Mentions Bitcoin     │ │        │
//! │ │  Yes 28¢   No 72¢     │ │  Yes 42¢   No 58¢    │ │        │
//! │ │ Total Volume $12,23…  │ │ Total Volume $8,45…  │ │        │
//! ╰──────────────── ←/→ scroll  Esc close ───────────────────────╯
//! ```
//!
//! Horizontal drags that start inside the scroller belong to it, so they
//! never change category. The scroller's rect is recorded during render
//! for that hit test.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `MarketsPanelState` lives in `TuiState`
//! - `MarketsPanel` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Widget, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::feed::{NewsItem, PredictionEvent, PredictionMarket};
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Width of one event card, in cells.
pub const EVENT_CARD_WIDTH: u16 = 34;
const CARD_GAP: u16 = 1;
/// Share of the screen height the sheet covers.
const SHEET_PERCENT: u16 = 65;

/// Persistent state for the markets panel.
#[derive(Default)]
pub struct MarketsPanelState {
    pub scroll_state: ScrollViewState,
    pub offset_x: u16,
    max_offset: u16,
    /// Where the sheet and its card scroller were drawn last frame.
    pub sheet_area: Option<Rect>,
    pub scroller_area: Option<Rect>,
    /// Story the scroll offset belongs to.
    item_id: Option<String>,
}

impl MarketsPanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll by whole cards; negative is left.
    pub fn scroll_cards(&mut self, cards: i32) {
        let step = i32::from(EVENT_CARD_WIDTH + CARD_GAP);
        let target = i32::from(self.offset_x) + cards * step;
        self.offset_x = target.clamp(0, i32::from(self.max_offset)) as u16;
        self.scroll_state.set_offset(Position::new(self.offset_x, 0));
    }

    /// Forget rects once the sheet is closed so hit tests stop matching.
    pub fn hide(&mut self) {
        self.sheet_area = None;
        self.scroller_area = None;
    }

    pub fn in_scroller(&self, col: u16, row: u16) -> bool {
        self.scroller_area
            .is_some_and(|r| r.contains(Position::new(col, row)))
    }

    pub fn in_sheet(&self, col: u16, row: u16) -> bool {
        self.sheet_area
            .is_some_and(|r| r.contains(Position::new(col, row)))
    }
}

/// Events emitted by the markets panel.
#[derive(Debug, PartialEq, Eq)]
pub enum PanelEvent {
    Dismiss,
}

impl EventHandler for MarketsPanelState {
    type Event = PanelEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<PanelEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::InputChar('m') => Some(PanelEvent::Dismiss),
            TuiEvent::CursorLeft | TuiEvent::ScrollLeft(..) | TuiEvent::InputChar('h') => {
                self.scroll_cards(-1);
                None
            }
            TuiEvent::CursorRight | TuiEvent::ScrollRight(..) | TuiEvent::InputChar('l') => {
                self.scroll_cards(1);
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the markets sheet.
pub struct MarketsPanel<'a> {
    state: &'a mut MarketsPanelState,
    item: &'a NewsItem,
}

impl<'a> MarketsPanel<'a> {
    pub fn new(state: &'a mut MarketsPanelState, item: &'a NewsItem) -> Self {
        Self { state, item }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.state.item_id.as_deref() != Some(self.item.id.as_str()) {
            self.state.item_id = Some(self.item.id.clone());
            self.state.offset_x = 0;
            self.state.scroll_state = ScrollViewState::default();
        }

        let sheet = bottom_sheet(area, SHEET_PERCENT);
        frame.render_widget(Clear, sheet);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Line::from(vec![
                Span::styled(" Markets ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("· {} ", self.item.headline),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
            .title_bottom(Line::from(" ←/→ scroll  Esc close ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(sheet);
        frame.render_widget(block, sheet);
        self.state.sheet_area = Some(sheet);

        let [summary_area, scroller_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);

        let events = &self.item.events;
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(
                    "{} {} · {} markets",
                    events.len(),
                    if events.len() == 1 { "event" } else { "events" },
                    self.item.total_markets()
                ),
                Style::default().fg(Color::Gray),
            )),
            summary_area,
        );

        if events.is_empty() {
            frame.render_widget(
                Paragraph::new("No markets linked to this story.")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center),
                scroller_area,
            );
            self.state.scroller_area = None;
            return;
        }

        let count = events.len() as u16;
        let content_width = count * EVENT_CARD_WIDTH + count.saturating_sub(1) * CARD_GAP;
        let content_height = scroller_area.height.saturating_sub(1).max(1);
        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .vertical_scrollbar_visibility(ScrollbarVisibility::Never);
        for (i, event) in events.iter().enumerate() {
            let x = i as u16 * (EVENT_CARD_WIDTH + CARD_GAP);
            scroll_view.render_widget(
                EventCard { event },
                Rect::new(x, 0, EVENT_CARD_WIDTH, content_height),
            );
        }

        self.state.max_offset = content_width.saturating_sub(scroller_area.width);
        self.state.offset_x = self.state.offset_x.min(self.state.max_offset);
        self.state
            .scroll_state
            .set_offset(Position::new(self.state.offset_x, 0));
        frame.render_stateful_widget(scroll_view, scroller_area, &mut self.state.scroll_state);
        self.state.scroller_area = Some(scroller_area);
    }
}

/// One prediction event and its markets.
struct EventCard<'a> {
    event: &'a PredictionEvent,
}

impl Widget for EventCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                format!(" {} ", self.event.title),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));

        let mut lines: Vec<Line> = Vec::new();
        for market in &self.event.markets {
            lines.extend(market_lines(market));
        }
        lines.push(Line::from(vec![
            Span::styled("Total Volume ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.event.total_volume.as_str(),
                Style::default().fg(Color::White),
            ),
        ]));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

fn market_lines(market: &PredictionMarket) -> Vec<Line<'_>> {
    let mut title = vec![Span::raw(market.title.as_str())];
    if let Some(expiry) = &market.expiry {
        title.push(Span::styled(
            format!(" · {expiry}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    vec![
        Line::from(title),
        Line::from(vec![
            Span::styled(
                format!(" Yes {}¢ ", market.yes_cents()),
                Style::default().fg(Color::Black).bg(Color::Green),
            ),
            Span::raw(" "),
            Span::styled(
                format!(" No {}¢ ", market.no_cents()),
                Style::default().fg(Color::Black).bg(Color::Red),
            ),
        ]),
        Line::raw(""),
    ]
}

/// The bottom `percent_y` of `outer`, at least 8 rows when it fits.
fn bottom_sheet(outer: Rect, percent_y: u16) -> Rect {
    let height = ((u32::from(outer.height) * u32::from(percent_y) / 100) as u16)
        .max(8)
        .min(outer.height);
    Rect::new(
        outer.x,
        outer.y + outer.height - height,
        outer.width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{buffer_text, sample_items};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(state: &mut MarketsPanelState, item: &NewsItem, width: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, 30)).unwrap();
        terminal
            .draw(|f| MarketsPanel::new(state, item).render(f, f.area()))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_panel_lists_events_and_prices() {
        let items = sample_items();
        let item = &items[0];
        let mut state = MarketsPanelState::new();
        let text = render(&mut state, item, 100);

        assert!(text.contains("Markets"));
        assert!(text.contains("2 events · 4 markets"));
        assert!(text.contains("Biden wins"));
        assert!(text.contains("Yes 28¢"));
        assert!(text.contains("No 72¢"));
        assert!(text.contains("Total Volume"));
        assert!(state.scroller_area.is_some());
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let items = sample_items();
        let item = &items[0];
        let mut state = MarketsPanelState::new();
        // 2 cards = 69 cells inside a 46-cell scroller.
        render(&mut state, item, 50);
        state.scroll_cards(5);
        assert_eq!(state.offset_x, state.max_offset);
        assert!(state.max_offset > 0);
        state.scroll_cards(-5);
        assert_eq!(state.offset_x, 0);
    }

    #[test]
    fn test_escape_dismisses() {
        let mut state = MarketsPanelState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(PanelEvent::Dismiss)
        );
        assert_eq!(state.handle_event(&TuiEvent::CursorRight), None);
    }

    #[test]
    fn test_hit_tests_follow_render() {
        let items = sample_items();
        let mut state = MarketsPanelState::new();
        render(&mut state, &items[0], 100);
        let scroller = state.scroller_area.unwrap();
        assert!(state.in_scroller(scroller.x + 1, scroller.y + 1));
        assert!(state.in_sheet(scroller.x, scroller.y));
        assert!(!state.in_sheet(0, 0));

        state.hide();
        assert!(!state.in_scroller(scroller.x + 1, scroller.y + 1));
    }

    #[test]
    fn test_new_story_resets_scroll() {
        let items = sample_items();
        let mut state = MarketsPanelState::new();
        render(&mut state, &items[0], 50);
        state.scroll_cards(1);
        assert!(state.offset_x > 0);
        render(&mut state, &items[1], 50);
        assert_eq!(state.offset_x, 0);
    }

    #[test]
    fn test_bottom_sheet_anchors_to_bottom() {
        let sheet = bottom_sheet(Rect::new(0, 0, 80, 20), 65);
        assert_eq!(sheet.y + sheet.height, 20);
        assert_eq!(sheet.height, 13);
    }
}
