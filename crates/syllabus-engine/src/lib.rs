//! Reactive filtering, progress and interaction-state engine.
//!
//! - [`Session`]: owns the selection, the interaction store and derived views
//! - [`filtered_topics`] / [`FilterCache`]: category, difficulty and search stages
//! - [`progress_percent`]: global completion percentage
//! - [`ShortcutDispatcher`]: keyboard shortcut intents
//! - [`StateStore`]: persistence boundary for [`SessionSnapshot`]s

pub mod error;
pub mod filter;
pub mod interaction;
pub mod persistence;
pub mod progress;
pub mod selection;
pub mod session;
pub mod shortcuts;
pub mod subscription;

pub use error::{PersistenceError, Result};
pub use filter::{FilterCache, filtered_topics, normalize_query, topic_matches};
pub use interaction::{
    InteractionChange, InteractionEvent, InteractionRecord, InteractionSnapshot, InteractionStore,
};
pub use persistence::{
    JsonFileStateStore, MemoryStateStore, SNAPSHOT_VERSION, SessionSnapshot, StateStore,
};
pub use progress::{Progress, percent, progress_percent};
pub use selection::{Selection, SelectionController, SelectionEvent, SelectionSnapshot};
pub use session::{Counts, FilteredView, Session};
pub use shortcuts::{Dispatch, KeyCombo, ShortcutDispatcher, ShortcutHandler, ShortcutIntent};
pub use subscription::{Callback, SubscriptionId, Subscribers};
