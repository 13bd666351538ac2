//! Global completion progress.
//!
//! Progress always spans the entire catalog, independent of the active
//! category, difficulty filter, or search query.

use serde::Serialize;
use syllabus_model::CatalogIndex;

use crate::interaction::InteractionStore;

/// Completion summary over the whole catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Completed topics that exist in the catalog.
    pub completed: usize,
    pub total: usize,
    /// `completed / total` as a percentage, rounded half up, in `0..=100`.
    pub percent: u8,
}

impl Progress {
    pub fn compute(catalog: &CatalogIndex, store: &InteractionStore) -> Self {
        let total = catalog.topic_count();
        // Completion of keys the catalog does not know is ignored.
        let completed = if store.completed_count() == 0 {
            0
        } else {
            store
                .completed_keys()
                .filter(|key| catalog.contains_topic(key))
                .count()
        };
        Self {
            completed,
            total,
            percent: percent(completed, total),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Completion percentage of the catalog.
pub fn progress_percent(catalog: &CatalogIndex, store: &InteractionStore) -> u8 {
    Progress::compute(catalog, store).percent
}

/// `round(100 * completed / total)` with half-up rounding; 0 for an empty total.
///
/// Computed in integers as `(200c + n) / 2n` so no intermediate count is rounded.
pub fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u128;
    let total = total as u128;
    let value = (200 * completed + total) / (2 * total);
    u8::try_from(value).unwrap_or(100)
}
