//! The session: explicit owner of all mutable engine state.
//!
//! Commands go through [`Session`], which mutates the selection or the
//! interaction store, recomputes the affected derivations, and notifies
//! view subscribers when a derived value actually changed.

use std::sync::Arc;

use serde::Serialize;
use syllabus_model::{CatalogIndex, DifficultyFilter, Topic};
use tracing::debug;

use crate::error::Result;
use crate::filter::FilterCache;
use crate::interaction::{InteractionEvent, InteractionStore};
use crate::persistence::{SNAPSHOT_VERSION, SessionSnapshot, StateStore};
use crate::progress::Progress;
use crate::selection::{Selection, SelectionController, SelectionEvent};
use crate::shortcuts::{Dispatch, KeyCombo, ShortcutDispatcher};
use crate::subscription::{SubscriptionId, Subscribers};

/// Filtered topic list for the current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilteredView {
    pub category: String,
    pub difficulty: DifficultyFilter,
    /// Normalized query the keys were computed for.
    pub query: String,
    /// Topic keys in catalog order.
    pub keys: Vec<String>,
}

/// Aggregate interaction totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub completed: usize,
    pub bookmarked: usize,
}

#[derive(Debug)]
pub struct Session {
    catalog: Arc<CatalogIndex>,
    store: InteractionStore,
    selection: SelectionController,
    cache: FilterCache,
    shortcuts: ShortcutDispatcher,

    view: FilteredView,
    progress: Progress,
    counts: Counts,

    filtered_subscribers: Subscribers<FilteredView>,
    progress_subscribers: Subscribers<Progress>,
    count_subscribers: Subscribers<Counts>,
}

impl Session {
    /// Fresh session on the catalog's default category with no interactions.
    pub fn new(catalog: Arc<CatalogIndex>) -> Self {
        let selection = SelectionController::new(Arc::clone(&catalog));
        let mut session = Self {
            catalog,
            store: InteractionStore::new(),
            selection,
            cache: FilterCache::new(),
            shortcuts: ShortcutDispatcher::new(),
            view: FilteredView::default(),
            progress: Progress::default(),
            counts: Counts::default(),
            filtered_subscribers: Subscribers::new(),
            progress_subscribers: Subscribers::new(),
            count_subscribers: Subscribers::new(),
        };
        session.refresh_all();
        session
    }

    pub fn from_snapshot(catalog: Arc<CatalogIndex>, snapshot: &SessionSnapshot) -> Self {
        let mut session = Self::new(catalog);
        session.restore(snapshot);
        session
    }

    /// Build a session from whatever the store holds, or a fresh one.
    pub fn load(catalog: Arc<CatalogIndex>, state: &dyn StateStore) -> Result<Self> {
        Ok(match state.load()? {
            Some(snapshot) => Self::from_snapshot(catalog, &snapshot),
            None => Self::new(catalog),
        })
    }

    pub fn save(&self, state: &mut dyn StateStore) -> Result<()> {
        state.save(&self.snapshot())
    }

    /// Replace interactions and selection with the snapshot.
    ///
    /// Topic and interaction subscribers get a `Restored` event for every
    /// record that changed; derived views that change are notified once each.
    pub fn restore(&mut self, snapshot: &SessionSnapshot) {
        self.store.replace_records(snapshot.interactions.clone());
        match &snapshot.selection {
            Some(selection) => self.selection.restore(selection),
            None => self.selection.restore(&Default::default()),
        }
        debug!(
            topics = snapshot.interactions.len(),
            category = self.selection.category(),
            "session restored"
        );
        self.refresh_all();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            selection: Some(self.selection.snapshot()),
            interactions: self.store.snapshot(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    pub fn store(&self) -> &InteractionStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        self.selection.selection()
    }

    pub fn shortcuts_mut(&mut self) -> &mut ShortcutDispatcher {
        &mut self.shortcuts
    }

    pub fn filtered_view(&self) -> &FilteredView {
        &self.view
    }

    pub fn filtered_keys(&self) -> &[String] {
        &self.view.keys
    }

    /// Topics visible under the current selection, in catalog order.
    pub fn filtered_topics(&self) -> Vec<&Topic> {
        self.view
            .keys
            .iter()
            .filter_map(|key| self.catalog.topic(key))
            .collect()
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn counts(&self) -> Counts {
        self.counts
    }

    // ------------------------------------------------------------------
    // Selection commands
    // ------------------------------------------------------------------

    pub fn set_category(&mut self, key: &str) -> bool {
        let accepted = self.selection.set_category(key);
        if accepted {
            self.refresh_filtered();
        }
        accepted
    }

    /// Returns whether `level` was accepted, not whether the filter changed.
    pub fn set_difficulty_filter(&mut self, level: &str) -> bool {
        let accepted = self.selection.set_difficulty_filter(level);
        if accepted {
            self.refresh_filtered();
        }
        accepted
    }

    /// Returns whether the filter changed.
    pub fn set_difficulty(&mut self, filter: DifficultyFilter) -> bool {
        let changed = self.selection.set_difficulty(filter);
        if changed {
            self.refresh_filtered();
        }
        changed
    }

    pub fn set_search_query(&mut self, text: &str) -> bool {
        let changed = self.selection.set_search_query(text);
        if changed {
            self.refresh_filtered();
        }
        changed
    }

    pub fn clear_search_query(&mut self) -> bool {
        self.set_search_query("")
    }

    // ------------------------------------------------------------------
    // Interaction commands
    // ------------------------------------------------------------------

    pub fn toggle_completed(&mut self, key: &str) -> bool {
        let value = self.store.toggle_completed(key);
        self.refresh_totals();
        value
    }

    pub fn toggle_bookmark(&mut self, key: &str) -> bool {
        let value = self.store.toggle_bookmark(key);
        self.refresh_totals();
        value
    }

    pub fn toggle_expanded(&mut self, key: &str) -> bool {
        self.store.toggle_expanded(key)
    }

    pub fn set_completed(&mut self, key: &str, value: bool) -> bool {
        let changed = self.store.set_completed(key, value);
        if changed {
            self.refresh_totals();
        }
        changed
    }

    pub fn set_bookmarked(&mut self, key: &str, value: bool) -> bool {
        let changed = self.store.set_bookmarked(key, value);
        if changed {
            self.refresh_totals();
        }
        changed
    }

    pub fn set_expanded(&mut self, key: &str, value: bool) -> bool {
        self.store.set_expanded(key, value)
    }

    pub fn save_note(&mut self, key: &str, text: impl Into<String>) {
        self.store.save_note(key, text);
    }

    pub fn delete_note(&mut self, key: &str) -> bool {
        self.store.delete_note(key)
    }

    /// Route a key press through the shortcut dispatcher.
    pub fn handle_key(&mut self, combo: &KeyCombo) -> Dispatch {
        self.shortcuts.dispatch(combo)
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    /// Notified when the filtered topic list changes.
    pub fn subscribe_filtered<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&FilteredView) + 'static,
    {
        self.filtered_subscribers.subscribe(callback)
    }

    /// Notified when the global progress changes.
    pub fn subscribe_progress<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Progress) + 'static,
    {
        self.progress_subscribers.subscribe(callback)
    }

    /// Notified when the completion or bookmark totals change.
    pub fn subscribe_counts<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Counts) + 'static,
    {
        self.count_subscribers.subscribe(callback)
    }

    pub fn subscribe_topic<F>(&mut self, key: &str, callback: F) -> SubscriptionId
    where
        F: FnMut(&InteractionEvent) + 'static,
    {
        self.store.subscribe_topic(key, callback)
    }

    pub fn subscribe_interactions<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&InteractionEvent) + 'static,
    {
        self.store.subscribe(callback)
    }

    pub fn subscribe_selection<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&SelectionEvent) + 'static,
    {
        self.selection.subscribe(callback)
    }

    /// Remove a subscription from whichever registry owns it.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.filtered_subscribers.unsubscribe(id)
            || self.progress_subscribers.unsubscribe(id)
            || self.count_subscribers.unsubscribe(id)
            || self.store.unsubscribe(id)
            || self.selection.unsubscribe(id)
    }

    // ------------------------------------------------------------------
    // Derivations
    // ------------------------------------------------------------------

    fn refresh_all(&mut self) {
        self.refresh_filtered();
        self.refresh_totals();
    }

    fn refresh_filtered(&mut self) {
        let selection = self.selection.selection();
        let keys = self.cache.get_or_compute(
            &self.catalog,
            &selection.category,
            selection.difficulty,
            &selection.query,
        );
        let changed = self.view.keys != keys;
        if changed {
            self.view.keys = keys.to_vec();
        }
        self.view.category = selection.category.clone();
        self.view.difficulty = selection.difficulty;
        self.view.query = selection.normalized_query();
        if changed {
            debug!(
                category = %self.view.category,
                topics = self.view.keys.len(),
                "filtered view changed"
            );
            self.filtered_subscribers.notify(&self.view);
        }
    }

    fn refresh_totals(&mut self) {
        let counts = Counts {
            completed: self.store.completed_count(),
            bookmarked: self.store.bookmarked_count(),
        };
        if counts != self.counts {
            self.counts = counts;
            self.count_subscribers.notify(&self.counts);
        }
        let progress = Progress::compute(&self.catalog, &self.store);
        if progress != self.progress {
            self.progress = progress;
            self.progress_subscribers.notify(&self.progress);
        }
    }
}
