//! # Core Application Logic
//!
//! This module contains oddsfeed's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No UI. Timers and I/O  │
//!                    │  are returned as Effect │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │ Bookmark   │      │   Share    │
//!     │  Adapter   │      │   store    │      │   chain    │
//!     │ (ratatui)  │      │ (file kv)  │      │ (cmd/clip) │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`feed`]: story, event and market records plus feed validation
//! - [`catalog`]: built-in stories and feed file loading
//! - [`navigation`]: category/index/query and the pure navigation reducer
//! - [`gesture`]: drag classification, debounce, double-tap
//! - [`state`]: the `App` struct, all application state in one place
//! - [`action`]: the `Action` enum and `update()`
//! - [`store`], [`bookmarks`]: persisted key-value record and the bookmark set on top
//! - [`share`]: native share, clipboard and OSC 52 fallbacks
//! - [`config`]: `~/.oddsfeed/config.toml` and override resolution

pub mod action;
pub mod bookmarks;
pub mod catalog;
pub mod config;
pub mod feed;
pub mod gesture;
pub mod navigation;
pub mod share;
pub mod state;
pub mod store;
