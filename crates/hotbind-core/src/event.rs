// Hotbind Keyboard Events
// The event value passed to listeners and shortcut handlers

use std::cell::Cell;

use crate::combo::compose;
use crate::modifier::{Modifier, ModifierState};
use crate::origin::Origin;

/// Keyboard event class a listener subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyDown,
    KeyUp,
}

/// A keyboard event as delivered by the host.
///
/// Only `default_prevented` is mutable, through `&self`, because listeners
/// receive a shared reference.
#[derive(Debug, Clone)]
pub struct KeyboardEvent {
    kind: EventKind,
    key: String,
    modifiers: ModifierState,
    origin: Option<Origin>,
    default_prevented: Cell<bool>,
}

impl KeyboardEvent {
    /// Create an event of the given kind with no modifiers and no origin
    pub fn new(kind: EventKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
            modifiers: ModifierState::NONE,
            origin: None,
            default_prevented: Cell::new(false),
        }
    }

    /// Shorthand for a key-release event
    pub fn key_up(key: impl Into<String>) -> Self {
        Self::new(EventKind::KeyUp, key)
    }

    /// Shorthand for a key-press event
    pub fn key_down(key: impl Into<String>) -> Self {
        Self::new(EventKind::KeyDown, key)
    }

    pub fn with_modifiers(mut self, modifiers: ModifierState) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.set(modifier, true);
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The key identifier, e.g. "a", "Enter", "ArrowUp"
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn modifiers(&self) -> ModifierState {
        self.modifiers
    }

    pub fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }

    /// The key-combination string for this event
    pub fn combo_string(&self) -> String {
        compose(&self.modifiers, &self.key)
    }

    /// Suppress the host's default action for this event
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}
