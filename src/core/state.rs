//! # Application State
//!
//! Core business state for oddsfeed. This module contains domain logic only,
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── items: Vec<NewsItem>          // catalog, immutable after start-up
//! ├── nav: Navigation               // category, index, query
//! ├── boundary: BoundaryPolicy      // clamp or wrap, fixed per session
//! ├── thresholds: SwipeThresholds   // gesture commit thresholds
//! ├── debounce: Debounce            // last accepted swipe time
//! ├── swipe_direction: Option       // transient, drives the swipe hint
//! ├── swipe_generation: u64         // newest gesture wins the reset timer
//! ├── markets_open: bool            // bottom sheet visible
//! ├── bookmarked: HashSet<String>   // mirror of the bookmark store
//! ├── is_refreshing: bool           // loading indicator
//! ├── share_in_flight: bool         // one share at a time
//! └── toast: Option<String>         // short feedback line
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::HashSet;

use crate::core::config::ResolvedConfig;
use crate::core::feed::NewsItem;
use crate::core::gesture::{Debounce, Direction, SwipeThresholds};
use crate::core::navigation::{BoundaryPolicy, Navigation};
use crate::core::share::ShareData;

pub struct App {
    pub items: Vec<NewsItem>,
    pub nav: Navigation,
    pub boundary: BoundaryPolicy,
    pub thresholds: SwipeThresholds,
    pub debounce: Debounce,
    /// Direction of the last accepted swipe, cleared by `SwipeSettled`.
    pub swipe_direction: Option<Direction>,
    pub swipe_generation: u64,
    pub markets_open: bool,
    pub bookmarked: HashSet<String>,
    pub is_refreshing: bool,
    pub share_in_flight: bool,
    pub toast: Option<String>,
    /// Shared links are `<base>/<id>` when set.
    pub share_url_base: Option<String>,
}

impl App {
    pub fn new(items: Vec<NewsItem>) -> Self {
        Self {
            items,
            nav: Navigation::default(),
            boundary: BoundaryPolicy::default(),
            thresholds: SwipeThresholds::default(),
            debounce: Debounce::default(),
            swipe_direction: None,
            swipe_generation: 0,
            markets_open: false,
            bookmarked: HashSet::new(),
            is_refreshing: false,
            share_in_flight: false,
            toast: None,
            share_url_base: None,
        }
    }

    pub fn from_config(
        items: Vec<NewsItem>,
        config: &ResolvedConfig,
        bookmarked: HashSet<String>,
    ) -> Self {
        Self {
            nav: Navigation::new(config.start_category, config.start_query.clone()),
            boundary: config.boundary,
            thresholds: config.thresholds,
            debounce: Debounce::new(config.debounce),
            bookmarked,
            share_url_base: config.share_url_base.clone(),
            ..Self::new(items)
        }
    }

    pub fn filtered(&self) -> Vec<&NewsItem> {
        self.nav.filtered(&self.items)
    }

    pub fn current(&self) -> Option<&NewsItem> {
        self.nav.current(&self.items)
    }

    /// The story a forward swipe would show next.
    pub fn upcoming(&self) -> Option<&NewsItem> {
        self.nav.upcoming(&self.items, self.boundary)
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarked.contains(id)
    }

    /// What sharing the current story would send.
    pub fn share_data(&self) -> Option<ShareData> {
        let item = self.current()?;
        Some(ShareData {
            title: item.headline.clone(),
            text: item.summary.clone(),
            url: self
                .share_url_base
                .as_ref()
                .map(|base| format!("{}/{}", base.trim_end_matches('/'), item.id)),
        })
    }
}
