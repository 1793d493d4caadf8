// Hotbind In-Memory Element
// A host target that keeps its own listener lists and can fire events

use std::cell::{Cell, RefCell};
use std::fmt;

use crate::event::{EventKind, KeyboardEvent};
use crate::target::{same_listener, EventTarget, Listener};

/// An event target for hosts without a native UI tree.
///
/// Tracks how many listeners were ever attached and detached so callers can
/// verify subscription churn.
pub struct Element {
    tag_name: String,
    key_down: RefCell<Vec<Listener>>,
    key_up: RefCell<Vec<Listener>>,
    attached: Cell<usize>,
    detached: Cell<usize>,
}

impl Element {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            key_down: RefCell::new(Vec::new()),
            key_up: RefCell::new(Vec::new()),
            attached: Cell::new(0),
            detached: Cell::new(0),
        }
    }

    /// An element standing in for the top-level window
    pub fn window() -> Self {
        Self::new("#window")
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    fn listeners(&self, kind: EventKind) -> &RefCell<Vec<Listener>> {
        match kind {
            EventKind::KeyDown => &self.key_down,
            EventKind::KeyUp => &self.key_up,
        }
    }

    /// Deliver `event` to every listener registered for its kind.
    ///
    /// Listeners run against a snapshot, so one may add or remove listeners
    /// (including itself) without affecting this delivery.
    pub fn dispatch(&self, event: &KeyboardEvent) -> usize {
        let snapshot: Vec<Listener> = self.listeners(event.kind()).borrow().clone();
        for listener in &snapshot {
            listener(event);
        }
        snapshot.len()
    }

    /// Number of listeners currently registered for `kind`
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners(kind).borrow().len()
    }

    /// Total successful `add_listener` calls
    pub fn attach_count(&self) -> usize {
        self.attached.get()
    }

    /// Total `remove_listener` calls that removed something
    pub fn detach_count(&self) -> usize {
        self.detached.get()
    }
}

impl EventTarget for Element {
    fn add_listener(&self, kind: EventKind, listener: Listener) {
        let mut listeners = self.listeners(kind).borrow_mut();
        // Adding the same listener twice is a no-op, as on the web
        if listeners.iter().any(|l| same_listener(l, &listener)) {
            return;
        }
        listeners.push(listener);
        self.attached.set(self.attached.get() + 1);
    }

    fn remove_listener(&self, kind: EventKind, listener: &Listener) {
        let mut listeners = self.listeners(kind).borrow_mut();
        let before = listeners.len();
        listeners.retain(|l| !same_listener(l, listener));
        if listeners.len() != before {
            self.detached.set(self.detached.get() + 1);
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag_name", &self.tag_name)
            .field("key_down", &self.key_down.borrow().len())
            .field("key_up", &self.key_up.borrow().len())
            .finish()
    }
}
