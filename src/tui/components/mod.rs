//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields and are rebuilt
//! every frame:
//! - `Header`: category, active query, refresh spinner, bookmark count
//! - `NewsCard`: the current story with badges and the markets button
//! - `NextPreview`, `EmptyState`, `Progress`, `SwipeHint`, `Toast`
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep state across frames and emit events:
//! - `SearchBar`: query editor, emits `SearchEvent`
//! - `MarketsPanelState`: horizontal scroll of event cards, emits `PanelEvent`
//!
//! `CategoryTabs` sits between the two: rebuilt per frame, but it hands its
//! hit areas back so clicks can be mapped to categories.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── badges.rs         (sentiment / impact colours)
//! ├── category_tabs.rs  (tab row + hit testing)
//! ├── header.rs         (top status line)
//! ├── markets_panel.rs  (bottom sheet with event cards)
//! ├── news_card.rs      (story card, next preview, empty state)
//! ├── overlay.rs        (swipe hint, toast)
//! ├── progress.rs       (dots + "i of n")
//! └── search_bar.rs     (query editor)
//! ```

pub mod badges;
pub mod category_tabs;
mod header;
pub mod markets_panel;
mod news_card;
mod overlay;
mod progress;
pub mod search_bar;

pub use category_tabs::CategoryTabs;
pub use header::Header;
pub use markets_panel::{MarketsPanel, MarketsPanelState, PanelEvent};
pub use news_card::{EmptyState, NewsCard, NextPreview};
pub use overlay::{SwipeHint, Toast};
pub use progress::Progress;
pub use search_bar::{SearchBar, SearchEvent};
