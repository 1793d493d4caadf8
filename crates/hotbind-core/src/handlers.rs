// Hotbind Handler Maps
// Key-combination strings mapped to callbacks, plus the shared latest-map cell

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::config::combo_parser::parse_combo;
use crate::event::KeyboardEvent;

/// A shortcut callback
pub type Handler = Rc<dyn Fn(&KeyboardEvent)>;

/// Key-combination strings mapped to handlers.
///
/// Keys are matched exactly (case and modifier order matter). Inserting an
/// existing key replaces its handler.
#[derive(Clone, Default)]
pub struct HandlerMap {
    entries: IndexMap<String, Handler>,
}

impl HandlerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `combo`, returning the handler it replaced
    pub fn insert<F>(&mut self, combo: impl Into<String>, handler: F) -> Option<Handler>
    where
        F: Fn(&KeyboardEvent) + 'static,
    {
        self.entries.insert(combo.into(), Rc::new(handler))
    }

    /// Register an already shared handler
    pub fn insert_handler(&mut self, combo: impl Into<String>, handler: Handler) -> Option<Handler> {
        self.entries.insert(combo.into(), handler)
    }

    /// Builder form of [`HandlerMap::insert`]
    pub fn on<F>(mut self, combo: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&KeyboardEvent) + 'static,
    {
        self.insert(combo, handler);
        self
    }

    pub fn remove(&mut self, combo: &str) -> Option<Handler> {
        self.entries.shift_remove(combo)
    }

    pub fn get(&self, combo: &str) -> Option<&Handler> {
        self.entries.get(combo)
    }

    pub fn contains(&self, combo: &str) -> bool {
        self.entries.contains_key(combo)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered combo strings
    pub fn combos(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Keys that no keyboard event can ever compose to
    pub fn unreachable_combos(&self) -> Vec<&str> {
        self.combos()
            .filter(|combo| parse_combo(combo).is_err())
            .collect()
    }
}

impl fmt::Debug for HandlerMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

/// The most recently supplied handler map, shared with a live listener.
///
/// Replacing the map never touches the listener that reads it.
#[derive(Clone, Default)]
pub struct LatestHandlers(Rc<RefCell<HandlerMap>>);

impl LatestHandlers {
    pub fn new(handlers: HandlerMap) -> Self {
        Self(Rc::new(RefCell::new(handlers)))
    }

    /// Swap in a new map
    pub fn replace(&self, handlers: HandlerMap) {
        *self.0.borrow_mut() = handlers;
    }

    /// Look up the handler for `combo`, cloned out so the map is not
    /// borrowed while it runs
    pub fn lookup(&self, combo: &str) -> Option<Handler> {
        self.0.borrow().get(combo).cloned()
    }

    /// Run `f` against the current map
    pub fn with<R>(&self, f: impl FnOnce(&HandlerMap) -> R) -> R {
        f(&self.0.borrow())
    }
}

impl fmt::Debug for LatestHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LatestHandlers").field(&*self.0.borrow()).finish()
    }
}
