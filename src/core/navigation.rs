//! # Navigation
//!
//! Which story is on screen. The state is three values (category, index,
//! query) and every change goes through `Navigation::reduce`, a pure
//! `(state, event) -> state` function:
//!
//! ```text
//! Navigation + NavEvent  →  reduce()  →  Navigation
//! ```
//!
//! The visible list is never stored. It is derived on demand from the
//! story catalog with `filtered()`, so the index is always interpreted
//! against the current filter. Changing the category or the query resets
//! the index to 0.
//!
//! ## Boundaries
//!
//! What happens at either end of the story list and the category tabs is a
//! single `BoundaryPolicy` chosen at start-up. The same policy applies to
//! items and to categories for the whole session.

use serde::{Deserialize, Serialize};

use crate::core::feed::{Category, NewsItem};

/// Behaviour when stepping past either end of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Stay on the first/last entry.
    #[default]
    Clamp,
    /// Continue from the other end.
    Wrap,
}

impl BoundaryPolicy {
    /// Index one step forward (or back) from `current` in a list of `len`.
    /// An empty list always yields 0.
    pub fn step(&self, current: usize, len: usize, forward: bool) -> usize {
        if len == 0 {
            return 0;
        }
        let current = current.min(len - 1);
        match (self, forward) {
            (BoundaryPolicy::Clamp, true) => (current + 1).min(len - 1),
            (BoundaryPolicy::Clamp, false) => current.saturating_sub(1),
            (BoundaryPolicy::Wrap, true) => (current + 1) % len,
            (BoundaryPolicy::Wrap, false) => current.checked_sub(1).unwrap_or(len - 1),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BoundaryPolicy::Clamp => "clamp",
            BoundaryPolicy::Wrap => "wrap",
        }
    }
}

/// Step from `current` to its neighbour within `tabs`. A category missing
/// from `tabs` is treated as sitting at position 0.
pub fn step_category(
    current: Category,
    tabs: &[Category],
    policy: BoundaryPolicy,
    forward: bool,
) -> Category {
    if tabs.is_empty() {
        return current;
    }
    let position = tabs.iter().position(|c| *c == current).unwrap_or(0);
    tabs[policy.step(position, tabs.len(), forward)]
}

/// Everything that can move the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    ChangeCategory(Category),
    ChangeSearch(String),
    Advance,
    Retreat,
    NextCategory,
    PrevCategory,
    /// Back to the first story without touching the filter.
    Rewind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Navigation {
    pub category: Category,
    /// Position within `filtered()`. Only meaningful while that list is non-empty.
    pub index: usize,
    pub query: String,
}

impl Navigation {
    pub fn new(category: Category, query: impl Into<String>) -> Self {
        Self {
            category,
            index: 0,
            query: query.into(),
        }
    }

    /// Stories passing both the category and the search filter, in catalog order.
    pub fn filtered<'a>(&self, items: &'a [NewsItem]) -> Vec<&'a NewsItem> {
        items
            .iter()
            .filter(|item| item.matches_category(self.category) && item.matches_query(&self.query))
            .collect()
    }

    /// The story on screen, or None when the filter leaves nothing.
    pub fn current<'a>(&self, items: &'a [NewsItem]) -> Option<&'a NewsItem> {
        self.filtered(items).get(self.index).copied()
    }

    /// The story a forward step would land on, for the stacked preview.
    /// None when the step would not move.
    pub fn upcoming<'a>(&self, items: &'a [NewsItem], policy: BoundaryPolicy) -> Option<&'a NewsItem> {
        let filtered = self.filtered(items);
        let next = policy.step(self.index, filtered.len(), true);
        (next != self.index).then(|| filtered.get(next).copied()).flatten()
    }

    /// Apply one event. Pure: the receiver is left untouched.
    pub fn reduce(&self, event: &NavEvent, items: &[NewsItem], policy: BoundaryPolicy) -> Navigation {
        match event {
            NavEvent::ChangeCategory(category) => Navigation {
                category: *category,
                index: 0,
                query: self.query.clone(),
            },
            NavEvent::ChangeSearch(query) => Navigation {
                category: self.category,
                index: 0,
                query: query.clone(),
            },
            NavEvent::Advance | NavEvent::Retreat => {
                let len = self.filtered(items).len();
                Navigation {
                    index: policy.step(self.index, len, *event == NavEvent::Advance),
                    ..self.clone()
                }
            }
            NavEvent::NextCategory | NavEvent::PrevCategory => Navigation {
                category: step_category(
                    self.category,
                    &Category::ORDERED,
                    policy,
                    *event == NavEvent::NextCategory,
                ),
                index: 0,
                query: self.query.clone(),
            },
            NavEvent::Rewind => Navigation {
                index: 0,
                ..self.clone()
            },
        }
    }
}
