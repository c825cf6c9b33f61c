//! Frame layout and hit testing.
//!
//! ```text
//! ┌ header ──────────────────────────────┐  1
//! │ category tabs                        │  1
//! │ search bar (while open or filtering) │  0/1
//! │ news card / empty state              │  fill
//! │ next story preview                   │  1
//! │ progress dots · i of n               │  1
//! │ key help                             │  1
//! └──────────────────────────────────────┘
//! ```
//!
//! Overlays (markets sheet, swipe hint, toast) are drawn last. Rects that
//! mouse input needs are recorded into `ScreenLayout` while drawing.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::feed::Category;
use crate::core::gesture::GestureOrigin;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::category_tabs::tab_at;
use crate::tui::components::{
    CategoryTabs, EmptyState, Header, MarketsPanel, NewsCard, NextPreview, Progress, SwipeHint,
    Toast,
};
use crate::tui::{InputMode, TuiState};

/// Cards wider than this read badly; extra width becomes margin.
const MAX_CARD_WIDTH: u16 = 96;

const HELP: &str =
    " ↑↓ stories  ←→ categories  Enter markets  b bookmark  s share  r refresh  / search  q quit";

/// Rects from the last frame, for mouse hit tests.
#[derive(Debug, Default, Clone)]
pub struct ScreenLayout {
    pub tabs: Vec<(Category, Rect)>,
    pub card: Option<Rect>,
    pub markets_button: Option<Rect>,
}

impl ScreenLayout {
    pub fn tab_at(&self, col: u16, row: u16) -> Option<Category> {
        tab_at(&self.tabs, col, row)
    }

    pub fn on_card(&self, col: u16, row: u16) -> bool {
        self.card.is_some_and(|r| r.contains(Position::new(col, row)))
    }

    pub fn on_markets_button(&self, col: u16, row: u16) -> bool {
        self.markets_button
            .is_some_and(|r| r.contains(Position::new(col, row)))
    }
}

/// Where a drag starting at this cell belongs.
pub fn gesture_origin(tui: &TuiState, col: u16, row: u16) -> GestureOrigin {
    if tui.markets.in_scroller(col, row) {
        GestureOrigin::MarketScroller
    } else {
        GestureOrigin::Feed
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let show_search = tui.input_mode == InputMode::Search || !app.nav.query.is_empty();
    let [header_area, tabs_area, search_area, card_area, preview_area, progress_area, help_area] =
        Layout::vertical([
            Length(1),
            Length(1),
            Length(u16::from(show_search)),
            Min(0),
            Length(1),
            Length(1),
            Length(1),
        ])
        .areas(frame.area());

    Header {
        category: app.nav.category,
        query: &app.nav.query,
        is_refreshing: app.is_refreshing,
        bookmark_count: app.bookmarked.len(),
        spinner_frame: tui.spinner_frame,
    }
    .render(frame, header_area);

    let mut tabs = CategoryTabs::new(app.nav.category);
    tabs.render(frame, tabs_area);
    tui.layout.tabs = tabs.hit_areas;

    if show_search {
        if tui.input_mode != InputMode::Search {
            tui.search.buffer = app.nav.query.clone();
        }
        tui.search.render(frame, search_area);
    }

    let card_area = centered_column(card_area, MAX_CARD_WIDTH);
    let filtered = app.filtered();
    match app.current() {
        Some(item) => {
            let mut card = NewsCard::new(item, app.is_bookmarked(&item.id), app.swipe_direction);
            card.render(frame, card_area);
            tui.layout.card = Some(card_area);
            tui.layout.markets_button = Some(card.button_area);

            NextPreview {
                item: app.upcoming(),
            }
            .render(frame, centered_column(preview_area, MAX_CARD_WIDTH));
            Progress {
                index: app.nav.index,
                len: filtered.len(),
            }
            .render(frame, progress_area);
        }
        None => {
            EmptyState {
                query: &app.nav.query,
            }
            .render(frame, card_area);
            tui.layout.card = None;
            tui.layout.markets_button = None;
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            HELP,
            Style::default().fg(Color::DarkGray),
        ))),
        help_area,
    );

    match app.current() {
        Some(item) if app.markets_open => {
            MarketsPanel::new(&mut tui.markets, item).render(frame, frame.area());
        }
        _ => tui.markets.hide(),
    }

    if let Some(direction) = app.swipe_direction {
        SwipeHint { direction }.render(frame, card_area);
    }

    if let Some(message) = &app.toast {
        Toast { message }.render(frame, frame.area());
    }
}

/// `area` narrowed to at most `max_width`, centred.
fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
}
