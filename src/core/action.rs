//! # Actions
//!
//! Everything that can happen in oddsfeed becomes an `Action`.
//! User presses ↓? That's `Action::Navigate(NavEvent::Advance)`.
//! A drag is released? That's `Action::Gesture { sample, origin, at }`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state and returns an `Effect` describing any I/O the caller
//! has to perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Timers (swipe reset, refresh delay) are effects too. The event loop sleeps
//! and sends the follow-up action back; generation numbers let a newer
//! gesture override a pending reset.

use std::time::Instant;

use log::debug;

use crate::core::gesture::{DragSample, GestureOrigin, classify};
use crate::core::navigation::NavEvent;
use crate::core::share::{ShareData, ShareOutcome};
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Keyboard, tab click or search. Never debounced.
    Navigate(NavEvent),
    /// A released drag.
    Gesture {
        sample: DragSample,
        origin: GestureOrigin,
        at: Instant,
    },
    /// The swipe reset timer for this generation fired.
    SwipeSettled(u64),
    OpenMarkets,
    CloseMarkets,
    ToggleBookmark,
    Share,
    ShareFinished(ShareOutcome),
    Refresh,
    RefreshDone,
    DismissToast,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Send `SwipeSettled(generation)` after the reset delay.
    ScheduleSwipeReset(u64),
    SaveBookmark { id: String, headline: String },
    RemoveBookmark(String),
    Share(ShareData),
    /// Send `RefreshDone` after the refresh delay.
    ScheduleRefresh,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Navigate(event) => {
            navigate(app, &event);
            Effect::None
        }
        Action::Gesture { sample, origin, at } => {
            let Some(direction) = classify(&sample, origin, &app.thresholds) else {
                return Effect::None;
            };
            if !app.debounce.accept(at) {
                debug!("Swipe {:?} dropped inside debounce window", direction);
                return Effect::None;
            }
            navigate(app, &direction.nav_event());
            app.swipe_direction = Some(direction);
            app.swipe_generation = app.swipe_generation.wrapping_add(1);
            Effect::ScheduleSwipeReset(app.swipe_generation)
        }
        Action::SwipeSettled(generation) => {
            if generation == app.swipe_generation {
                app.swipe_direction = None;
            }
            Effect::None
        }
        Action::OpenMarkets => {
            app.markets_open = app.current().is_some();
            Effect::None
        }
        Action::CloseMarkets => {
            app.markets_open = false;
            Effect::None
        }
        Action::ToggleBookmark => {
            let Some(item) = app.current() else {
                return Effect::None;
            };
            let id = item.id.clone();
            let headline = item.headline.clone();
            if app.bookmarked.remove(&id) {
                app.toast = Some("Bookmark removed".to_string());
                Effect::RemoveBookmark(id)
            } else {
                app.bookmarked.insert(id.clone());
                app.toast = Some("Story bookmarked".to_string());
                Effect::SaveBookmark { id, headline }
            }
        }
        Action::Share => {
            if app.share_in_flight {
                return Effect::None;
            }
            match app.share_data() {
                Some(data) => {
                    app.share_in_flight = true;
                    Effect::Share(data)
                }
                None => Effect::None,
            }
        }
        Action::ShareFinished(outcome) => {
            app.share_in_flight = false;
            if let Some(text) = outcome.toast() {
                app.toast = Some(text.to_string());
            }
            Effect::None
        }
        Action::Refresh => {
            if app.is_refreshing {
                return Effect::None;
            }
            app.is_refreshing = true;
            Effect::ScheduleRefresh
        }
        Action::RefreshDone => {
            app.is_refreshing = false;
            navigate(app, &NavEvent::Rewind);
            Effect::None
        }
        Action::DismissToast => {
            app.toast = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn navigate(app: &mut App, event: &NavEvent) {
    app.nav = app.nav.reduce(event, &app.items, app.boundary);
    if app.current().is_none() {
        app.markets_open = false;
    }
}
