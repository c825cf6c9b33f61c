//! # Bookmarks
//!
//! The set of saved stories, persisted as one JSON record in a
//! `KeyValueStore`:
//!
//! ```text
//! bookmarked_articles = [{"id":"1","headline":"...","timestamp":1718000000000}, ...]
//! ```
//!
//! Every read fails open: a missing, expired or malformed record is an
//! empty list. Write failures are logged and swallowed.

use std::collections::HashSet;

use chrono::{TimeDelta, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::store::KeyValueStore;

pub const BOOKMARK_KEY: &str = "bookmarked_articles";
pub const BOOKMARK_TTL_DAYS: i64 = 365;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub headline: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

pub struct BookmarkStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> BookmarkStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Saved stories, oldest first.
    pub fn list(&self) -> Vec<Bookmark> {
        let raw = match self.store.get(BOOKMARK_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read bookmarks: {}", e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(bookmarks) => bookmarks,
            Err(e) => {
                warn!("Ignoring malformed bookmark record: {}", e);
                Vec::new()
            }
        }
    }

    pub fn ids(&self) -> HashSet<String> {
        self.list().into_iter().map(|b| b.id).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.list().iter().any(|b| b.id == id)
    }

    /// Save a story. Returns false if it was already saved.
    pub fn add(&mut self, id: &str, headline: &str) -> bool {
        let mut bookmarks = self.list();
        if bookmarks.iter().any(|b| b.id == id) {
            return false;
        }
        bookmarks.push(Bookmark {
            id: id.to_string(),
            headline: headline.to_string(),
            timestamp: Utc::now().timestamp_millis(),
        });
        self.write(&bookmarks);
        debug!("Bookmarked {}", id);
        true
    }

    /// Forget a story. Returns false if it wasn't saved.
    pub fn remove(&mut self, id: &str) -> bool {
        let mut bookmarks = self.list();
        let before = bookmarks.len();
        bookmarks.retain(|b| b.id != id);
        if bookmarks.len() == before {
            return false;
        }
        self.write(&bookmarks);
        debug!("Removed bookmark {}", id);
        true
    }

    fn write(&mut self, bookmarks: &[Bookmark]) {
        let json = match serde_json::to_string(bookmarks) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize bookmarks: {}", e);
                return;
            }
        };
        if let Err(e) = self
            .store
            .set(BOOKMARK_KEY, &json, TimeDelta::days(BOOKMARK_TTL_DAYS))
        {
            warn!("Failed to save bookmarks: {}", e);
        }
    }
}
