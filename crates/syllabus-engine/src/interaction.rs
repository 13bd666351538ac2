//! Per-topic interaction state.
//!
//! The [`InteractionStore`] owns one [`InteractionRecord`] per topic key,
//! created lazily on the first write. Reads never create records.
//!
//! Completion and bookmark totals are maintained as counters alongside the
//! records, so summary widgets can read them without scanning.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::subscription::{SubscriptionId, Subscribers};

/// User state for a single topic.
///
/// The default value is identical to an absent record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionRecord {
    pub completed: bool,
    pub bookmarked: bool,
    pub expanded: bool,
    /// `None` means never annotated; `Some("")` is a saved empty note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Persisted form of the store: topic key to record, sorted by key.
pub type InteractionSnapshot = BTreeMap<String, InteractionRecord>;

/// What a mutation changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionChange {
    Completed(bool),
    Bookmarked(bool),
    Expanded(bool),
    NoteSaved,
    NoteDeleted,
    /// The record was replaced wholesale by a restore.
    Restored,
}

impl InteractionChange {
    /// True when the change moves the completion or bookmark totals.
    pub fn affects_counts(&self) -> bool {
        matches!(
            self,
            InteractionChange::Completed(_)
                | InteractionChange::Bookmarked(_)
                | InteractionChange::Restored
        )
    }
}

/// Event delivered to store subscribers after a mutation has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionEvent {
    pub key: String,
    pub change: InteractionChange,
    /// Record state after the change.
    pub record: InteractionRecord,
    pub completed_count: usize,
    pub bookmarked_count: usize,
}

#[derive(Debug, Default)]
pub struct InteractionStore {
    records: HashMap<String, InteractionRecord>,
    completed: usize,
    bookmarked: usize,
    subscribers: Subscribers<InteractionEvent>,
    topic_subscribers: HashMap<String, Subscribers<InteractionEvent>>,
}

impl InteractionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate a store from a snapshot. Counters are rebuilt from the records.
    pub fn from_snapshot(snapshot: InteractionSnapshot) -> Self {
        let mut store = Self::new();
        store.replace_records(snapshot);
        store
    }

    /// Serializable copy of every record.
    pub fn snapshot(&self) -> InteractionSnapshot {
        self.records
            .iter()
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect()
    }

    /// Replace all records with the snapshot, keeping subscribers.
    ///
    /// Once records and counters are in place, one `Restored` event is
    /// emitted per key whose record differs from before, in key order.
    /// Returns the number of changed keys.
    pub fn replace_records(&mut self, snapshot: InteractionSnapshot) -> usize {
        let previous = std::mem::take(&mut self.records);
        self.records = snapshot.into_iter().collect();
        self.completed = self.records.values().filter(|r| r.completed).count();
        self.bookmarked = self.records.values().filter(|r| r.bookmarked).count();

        let mut changed: Vec<String> = self
            .records
            .keys()
            .chain(previous.keys())
            .filter(|key| {
                previous.get(*key).cloned().unwrap_or_default() != self.record(key)
            })
            .cloned()
            .collect();
        changed.sort_unstable();
        changed.dedup();
        for key in &changed {
            self.emit(key, InteractionChange::Restored);
        }
        changed.len()
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Current record for a topic; absent topics yield the default record.
    pub fn record(&self, key: &str) -> InteractionRecord {
        self.records.get(key).cloned().unwrap_or_default()
    }

    pub fn has_record(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn is_completed(&self, key: &str) -> bool {
        self.records.get(key).is_some_and(|r| r.completed)
    }

    pub fn is_bookmarked(&self, key: &str) -> bool {
        self.records.get(key).is_some_and(|r| r.bookmarked)
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.records.get(key).is_some_and(|r| r.expanded)
    }

    pub fn note(&self, key: &str) -> Option<&str> {
        self.records.get(key).and_then(|r| r.note.as_deref())
    }

    pub fn completed_count(&self) -> usize {
        self.completed
    }

    pub fn bookmarked_count(&self) -> usize {
        self.bookmarked
    }

    /// Keys of completed topics (unordered).
    pub fn completed_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.records
            .iter()
            .filter(|(_, record)| record.completed)
            .map(|(key, _)| key.as_str())
    }

    /// Keys of bookmarked topics, sorted.
    pub fn bookmarked_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .records
            .iter()
            .filter(|(_, record)| record.bookmarked)
            .map(|(key, _)| key.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Number of topics that have a record.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Flip the completion flag. Returns the new value.
    pub fn toggle_completed(&mut self, key: &str) -> bool {
        let record = self.records.entry(key.to_string()).or_default();
        record.completed = !record.completed;
        let value = record.completed;
        if value {
            self.completed += 1;
        } else {
            self.completed -= 1;
        }
        self.emit(key, InteractionChange::Completed(value));
        value
    }

    /// Flip the bookmark flag. Returns the new value.
    pub fn toggle_bookmark(&mut self, key: &str) -> bool {
        let record = self.records.entry(key.to_string()).or_default();
        record.bookmarked = !record.bookmarked;
        let value = record.bookmarked;
        if value {
            self.bookmarked += 1;
        } else {
            self.bookmarked -= 1;
        }
        self.emit(key, InteractionChange::Bookmarked(value));
        value
    }

    /// Flip the expansion flag. Returns the new value.
    pub fn toggle_expanded(&mut self, key: &str) -> bool {
        let record = self.records.entry(key.to_string()).or_default();
        record.expanded = !record.expanded;
        let value = record.expanded;
        self.emit(key, InteractionChange::Expanded(value));
        value
    }

    /// Set the completion flag. Returns false (and does nothing) if unchanged.
    pub fn set_completed(&mut self, key: &str, value: bool) -> bool {
        if self.is_completed(key) == value {
            return false;
        }
        self.toggle_completed(key);
        true
    }

    /// Set the bookmark flag. Returns false (and does nothing) if unchanged.
    pub fn set_bookmarked(&mut self, key: &str, value: bool) -> bool {
        if self.is_bookmarked(key) == value {
            return false;
        }
        self.toggle_bookmark(key);
        true
    }

    /// Set the expansion flag. Returns false (and does nothing) if unchanged.
    pub fn set_expanded(&mut self, key: &str, value: bool) -> bool {
        if self.is_expanded(key) == value {
            return false;
        }
        self.toggle_expanded(key);
        true
    }

    /// Save (overwrite) the note for a topic. An empty string is a valid note.
    pub fn save_note(&mut self, key: &str, text: impl Into<String>) {
        let record = self.records.entry(key.to_string()).or_default();
        record.note = Some(text.into());
        self.emit(key, InteractionChange::NoteSaved);
    }

    /// Remove the note for a topic, leaving the flags untouched.
    ///
    /// Returns false when there was no note; nothing is emitted in that case.
    pub fn delete_note(&mut self, key: &str) -> bool {
        let removed = self
            .records
            .get_mut(key)
            .and_then(|record| record.note.take())
            .is_some();
        if removed {
            self.emit(key, InteractionChange::NoteDeleted);
        }
        removed
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    /// Subscribe to every change in the store.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&InteractionEvent) + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    /// Subscribe to changes of a single topic.
    pub fn subscribe_topic<F>(&mut self, key: &str, callback: F) -> SubscriptionId
    where
        F: FnMut(&InteractionEvent) + 'static,
    {
        self.topic_subscribers
            .entry(key.to_string())
            .or_default()
            .subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if self.subscribers.unsubscribe(id) {
            return true;
        }
        let mut removed = false;
        self.topic_subscribers.retain(|_, subscribers| {
            removed |= subscribers.unsubscribe(id);
            !subscribers.is_empty()
        });
        removed
    }

    fn emit(&mut self, key: &str, change: InteractionChange) {
        trace!(topic = key, ?change, "interaction changed");
        let event = InteractionEvent {
            key: key.to_string(),
            change,
            record: self.record(key),
            completed_count: self.completed,
            bookmarked_count: self.bookmarked,
        };
        self.subscribers.notify(&event);
        if let Some(subscribers) = self.topic_subscribers.get_mut(key) {
            subscribers.notify(&event);
        }
    }
}
