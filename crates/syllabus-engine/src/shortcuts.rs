//! Global keyboard shortcut dispatch.
//!
//! Handles:
//! - Cmd/Ctrl+K (focus or open search; consumes the default action)
//! - Escape (close the navigation panel)
//!
//! The dispatcher assumes one event per physical key press. Repeat
//! suppression belongs to the event-delivery layer.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

/// Raw key-combination descriptor delivered by the input layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    /// Key name, e.g. `"k"`, `"K"`, `"Escape"`.
    pub key: String,
    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub ctrl_or_meta: bool,
    pub alt: bool,
}

impl KeyCombo {
    /// Plain key press without modifiers.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl_or_meta: false,
            alt: false,
        }
    }

    /// Key press with the platform command modifier held.
    pub fn command(key: impl Into<String>) -> Self {
        Self {
            ctrl_or_meta: true,
            ..Self::new(key)
        }
    }

    #[must_use]
    pub fn with_alt(mut self, alt: bool) -> Self {
        self.alt = alt;
        self
    }
}

/// High-level intent a shortcut maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutIntent {
    FocusSearch,
    ClosePanel,
}

impl ShortcutIntent {
    /// Map a key combination to its intent, if any.
    pub fn from_combo(combo: &KeyCombo) -> Option<Self> {
        if combo.ctrl_or_meta && !combo.alt && combo.key.eq_ignore_ascii_case("k") {
            return Some(Self::FocusSearch);
        }
        if combo.key == "Escape" {
            return Some(Self::ClosePanel);
        }
        None
    }

    /// Whether the host should suppress its own default action for this intent.
    pub fn prevents_default(&self) -> bool {
        matches!(self, Self::FocusSearch)
    }
}

/// Result of dispatching one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled {
        intent: ShortcutIntent,
        prevent_default: bool,
    },
    /// No binding matched, or no handler is registered for the matched intent.
    Ignored,
}

impl Dispatch {
    pub fn is_handled(&self) -> bool {
        matches!(self, Dispatch::Handled { .. })
    }

    pub fn prevents_default(&self) -> bool {
        matches!(
            self,
            Dispatch::Handled {
                prevent_default: true,
                ..
            }
        )
    }
}

pub type ShortcutHandler = Box<dyn FnMut()>;

/// Registry of one handler per intent.
#[derive(Default)]
pub struct ShortcutDispatcher {
    handlers: HashMap<ShortcutIntent, ShortcutHandler>,
}

impl ShortcutDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for an intent, replacing any previous one.
    /// Returns true if a handler was replaced.
    pub fn register<F>(&mut self, intent: ShortcutIntent, handler: F) -> bool
    where
        F: FnMut() + 'static,
    {
        self.handlers.insert(intent, Box::new(handler)).is_some()
    }

    pub fn unregister(&mut self, intent: ShortcutIntent) -> bool {
        self.handlers.remove(&intent).is_some()
    }

    pub fn is_registered(&self, intent: ShortcutIntent) -> bool {
        self.handlers.contains_key(&intent)
    }

    /// Dispatch one key event, calling at most one handler once.
    pub fn dispatch(&mut self, combo: &KeyCombo) -> Dispatch {
        let Some(intent) = ShortcutIntent::from_combo(combo) else {
            return Dispatch::Ignored;
        };
        let Some(handler) = self.handlers.get_mut(&intent) else {
            trace!(?intent, "no handler registered for shortcut");
            return Dispatch::Ignored;
        };
        handler();
        Dispatch::Handled {
            intent,
            prevent_default: intent.prevents_default(),
        }
    }
}

impl fmt::Debug for ShortcutDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutDispatcher")
            .field("registered", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
