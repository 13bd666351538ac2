//! Selection state: active category, difficulty filter and search query.
//!
//! The three axes are independent. Switching category keeps the difficulty
//! filter and the query so the user's filter intent survives navigation.
//! Invalid inputs are absorbed as no-ops; they never surface as errors.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use syllabus_model::{CatalogIndex, DifficultyFilter};
use tracing::{debug, warn};

use crate::filter::normalize_query;
use crate::subscription::{SubscriptionId, Subscribers};

/// Current navigation and filter coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Always a key declared in the catalog.
    pub category: String,
    pub difficulty: DifficultyFilter,
    /// Raw query as typed; compare via [`Selection::normalized_query`].
    pub query: String,
}

impl Selection {
    pub fn normalized_query(&self) -> String {
        normalize_query(&self.query)
    }

    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }
}

/// Persisted selection.
///
/// Values are kept as plain strings so that stale or hand-edited state can
/// be loaded and repaired instead of rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSnapshot {
    pub category: String,
    pub difficulty: String,
    pub query: String,
}

impl From<&Selection> for SelectionSnapshot {
    fn from(selection: &Selection) -> Self {
        Self {
            category: selection.category.clone(),
            difficulty: selection.difficulty.as_str().to_string(),
            query: selection.query.clone(),
        }
    }
}

/// Events emitted by the [`SelectionController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    CategoryChanged { previous: String, current: String },
    DifficultyChanged {
        previous: DifficultyFilter,
        current: DifficultyFilter,
    },
    QueryChanged { query: String },
    /// A category was picked; a narrow viewport should close its navigation
    /// panel. Whether to act is up to the view.
    ClosePanelRequested,
}

#[derive(Debug)]
pub struct SelectionController {
    catalog: Arc<CatalogIndex>,
    selection: Selection,
    subscribers: Subscribers<SelectionEvent>,
}

impl SelectionController {
    /// Start on the catalog's default category with no filters.
    pub fn new(catalog: Arc<CatalogIndex>) -> Self {
        let selection = Selection {
            category: catalog.default_category_key().to_string(),
            difficulty: DifficultyFilter::All,
            query: String::new(),
        };
        Self {
            catalog,
            selection,
            subscribers: Subscribers::new(),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn category(&self) -> &str {
        &self.selection.category
    }

    pub fn difficulty(&self) -> DifficultyFilter {
        self.selection.difficulty
    }

    pub fn query(&self) -> &str {
        &self.selection.query
    }

    /// Select a category.
    ///
    /// Unknown keys are ignored and return `false`. A known key always
    /// requests the navigation panel to close; `CategoryChanged` is emitted
    /// only when the key differs from the current one.
    pub fn set_category(&mut self, key: &str) -> bool {
        let key = key.trim();
        if !self.catalog.contains_category(key) {
            debug!(category = key, "ignoring unknown category");
            return false;
        }
        if self.selection.category != key {
            let previous = std::mem::replace(&mut self.selection.category, key.to_string());
            debug!(%previous, current = key, "category changed");
            self.subscribers.notify(&SelectionEvent::CategoryChanged {
                previous,
                current: key.to_string(),
            });
        }
        self.subscribers
            .notify(&SelectionEvent::ClosePanelRequested);
        true
    }

    /// Set the difficulty filter from its string form.
    ///
    /// Only `all`, `beginner`, `intermediate` and `advanced` are accepted
    /// (case-insensitive). Anything else is a caller bug: it is logged and
    /// ignored, never defaulted.
    ///
    /// Returns whether the value was accepted, like [`Self::set_category`].
    /// Re-applying the current filter returns `true` without an event; use
    /// [`Self::set_difficulty`] to learn whether the filter changed.
    pub fn set_difficulty_filter(&mut self, level: &str) -> bool {
        match level.parse::<DifficultyFilter>() {
            Ok(filter) => {
                self.set_difficulty(filter);
                true
            }
            Err(_) => {
                warn!(value = level, "rejected unknown difficulty filter");
                false
            }
        }
    }

    /// Set the difficulty filter. Returns true if it changed.
    pub fn set_difficulty(&mut self, filter: DifficultyFilter) -> bool {
        if self.selection.difficulty == filter {
            return false;
        }
        let previous = std::mem::replace(&mut self.selection.difficulty, filter);
        debug!(%previous, current = %filter, "difficulty filter changed");
        self.subscribers.notify(&SelectionEvent::DifficultyChanged {
            previous,
            current: filter,
        });
        true
    }

    /// Set the search query. Returns true if the normalized query changed.
    ///
    /// The raw text is always stored so an input field can echo it back.
    pub fn set_search_query(&mut self, text: &str) -> bool {
        let changed = normalize_query(text) != self.selection.normalized_query();
        self.selection.query = text.to_string();
        if changed {
            debug!(query = text, "search query changed");
            self.subscribers.notify(&SelectionEvent::QueryChanged {
                query: text.to_string(),
            });
        }
        changed
    }

    pub fn clear_search_query(&mut self) -> bool {
        self.set_search_query("")
    }

    /// Restore persisted selection without emitting events.
    ///
    /// An unknown category falls back to the default category and an
    /// unknown difficulty falls back to `all`.
    pub fn restore(&mut self, snapshot: &SelectionSnapshot) {
        let category = if self.catalog.contains_category(snapshot.category.trim()) {
            snapshot.category.trim().to_string()
        } else {
            if !snapshot.category.is_empty() {
                warn!(
                    category = %snapshot.category,
                    "stored category no longer exists, using default"
                );
            }
            self.catalog.default_category_key().to_string()
        };
        let difficulty = if snapshot.difficulty.trim().is_empty() {
            DifficultyFilter::All
        } else {
            snapshot.difficulty.parse().unwrap_or_else(|_| {
                warn!(difficulty = %snapshot.difficulty, "stored difficulty invalid, using all");
                DifficultyFilter::All
            })
        };
        self.selection = Selection {
            category,
            difficulty,
            query: snapshot.query.clone(),
        };
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot::from(&self.selection)
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&SelectionEvent) + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}
