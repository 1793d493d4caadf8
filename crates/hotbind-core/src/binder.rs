// Hotbind Binder
// Owns one key-release listener on a resolved target and routes events to handlers

use std::cell::Cell;
use std::rc::Rc;

use crate::config::combo_parser::parse_combo;
use crate::event::{EventKind, KeyboardEvent};
use crate::handlers::{HandlerMap, LatestHandlers};
use crate::host;
use crate::origin::is_excluded_origin;
use crate::target::{Listener, Target, TargetHandle};

/// Event class every binder listens to
pub const LISTEN_KIND: EventKind = EventKind::KeyUp;

/// Where and how a binder attaches
#[derive(Debug, Clone)]
pub struct BindingOptions {
    /// Target to attach to; `None` means the thread's window
    pub target: Option<Target>,
    /// When false nothing is attached
    pub enabled: bool,
    /// Suppress the default action of events that matched a handler
    pub prevent_default: bool,
}

impl Default for BindingOptions {
    fn default() -> Self {
        Self {
            target: None,
            enabled: true,
            prevent_default: true,
        }
    }
}

impl BindingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: impl Into<Target>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn prevent_default(mut self, prevent_default: bool) -> Self {
        self.prevent_default = prevent_default;
        self
    }

    /// Whether switching from `self` to `other` leaves the subscription valid
    pub fn same_subscription(&self, other: &BindingOptions) -> bool {
        let same_target = match (&self.target, &other.target) {
            (None, None) => true,
            (Some(a), Some(b)) => a.same_as(b),
            _ => false,
        };
        same_target
            && self.enabled == other.enabled
            && self.prevent_default == other.prevent_default
    }
}

/// A live listener on one target
struct Subscription {
    target: TargetHandle,
    listener: Listener,
    prevent_default: bool,
    live: Rc<Cell<bool>>,
}

impl Subscription {
    fn detach(self) {
        // Stops a listener already captured in a host's dispatch snapshot
        self.live.set(false);
        self.target.remove_listener(LISTEN_KIND, &self.listener);
    }
}

/// Binds shortcut handlers to a target for as long as it is started.
///
/// The binder has two states: detached, and attached to one target with one
/// listener. Handler updates go through [`HotkeyBinder::set_handlers`] and
/// never touch the listener; only a change of target identity, `enabled` or
/// `prevent_default` rebuilds it. Dropping the binder detaches it.
///
/// # Examples
/// ```
/// use std::rc::Rc;
/// use hotbind_core::{BindingOptions, Element, HandlerMap, HotkeyBinder, KeyboardEvent, Modifier};
///
/// let el = Rc::new(Element::new("DIV"));
/// let mut binder = HotkeyBinder::new(HandlerMap::new().on("ctrl+s", |_| println!("save")));
/// binder.start(BindingOptions::new().with_target(el.clone() as hotbind_core::TargetHandle));
///
/// let event = KeyboardEvent::key_up("s").with_modifier(Modifier::Ctrl);
/// el.dispatch(&event);
/// assert!(event.default_prevented());
/// ```
pub struct HotkeyBinder {
    handlers: LatestHandlers,
    options: Option<BindingOptions>,
    subscription: Option<Subscription>,
}

impl HotkeyBinder {
    /// Create a detached binder
    pub fn new(handlers: HandlerMap) -> Self {
        warn_unreachable(&handlers);
        Self {
            handlers: LatestHandlers::new(handlers),
            options: None,
            subscription: None,
        }
    }

    /// Replace the handler map seen by the listener
    pub fn set_handlers(&self, handlers: HandlerMap) {
        warn_unreachable(&handlers);
        self.handlers.replace(handlers);
    }

    pub fn handlers(&self) -> &LatestHandlers {
        &self.handlers
    }

    /// Options recorded by the last `start` or `update`, cleared by `stop`
    pub fn options(&self) -> Option<&BindingOptions> {
        self.options.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// The target the listener is attached to
    pub fn attached_target(&self) -> Option<&TargetHandle> {
        self.subscription.as_ref().map(|s| &s.target)
    }

    /// Tear down any subscription and activate with `options`.
    ///
    /// A cell target is read now; later writes to the cell are not seen until
    /// the next `start`.
    pub fn start(&mut self, options: BindingOptions) {
        self.detach();
        self.activate(&options);
        self.options = Some(options);
    }

    /// Re-evaluate with possibly changed options.
    ///
    /// Rebuilds only when the target identity, `enabled` or `prevent_default`
    /// differ from the recorded options. Returns whether it rebuilt.
    pub fn update(&mut self, options: BindingOptions) -> bool {
        if let Some(current) = &self.options {
            if current.same_subscription(&options) {
                return false;
            }
        }
        self.start(options);
        true
    }

    /// Detach the listener. Safe to call at any time, any number of times.
    pub fn stop(&mut self) {
        self.detach();
        self.options = None;
    }

    fn activate(&mut self, options: &BindingOptions) {
        if !options.enabled {
            log::debug!("hotkeys disabled, not attaching");
            return;
        }

        let resolved = options
            .target
            .as_ref()
            .and_then(Target::resolve)
            .or_else(host::window);
        let Some(target) = resolved else {
            log::debug!("no target or window available, not attaching");
            return;
        };

        let live = Rc::new(Cell::new(true));
        let listener = make_listener(self.handlers.clone(), options.prevent_default, Rc::clone(&live));
        target.add_listener(LISTEN_KIND, Rc::clone(&listener));
        log::debug!(
            "attached hotkey listener (prevent_default={})",
            options.prevent_default
        );

        self.subscription = Some(Subscription {
            target,
            listener,
            prevent_default: options.prevent_default,
            live,
        });
    }

    fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            log::debug!(
                "detaching hotkey listener (prevent_default={})",
                subscription.prevent_default
            );
            subscription.detach();
        }
    }
}

impl Drop for HotkeyBinder {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Create a binder and start it in one step
pub fn bind(handlers: HandlerMap, options: BindingOptions) -> HotkeyBinder {
    let mut binder = HotkeyBinder::new(handlers);
    binder.start(options);
    binder
}

fn make_listener(handlers: LatestHandlers, prevent_default: bool, live: Rc<Cell<bool>>) -> Listener {
    Rc::new(move |event: &KeyboardEvent| {
        if live.get() {
            dispatch(&handlers, prevent_default, event);
        }
    })
}

/// Route one key-release event to at most one handler.
///
/// Events from text-entry origins are dropped first. The composed combo
/// string is looked up before the bare key. Returns whether a handler ran.
pub fn dispatch(handlers: &LatestHandlers, prevent_default: bool, event: &KeyboardEvent) -> bool {
    if is_excluded_origin(event.origin()) {
        log::trace!("ignoring '{}' from text entry origin", event.key());
        return false;
    }

    let combo = event.combo_string();
    let Some(handler) = handlers
        .lookup(&combo)
        .or_else(|| handlers.lookup(event.key()))
    else {
        log::trace!("no handler for '{}'", combo);
        return false;
    };

    if prevent_default {
        event.prevent_default();
    }
    log::trace!("dispatching '{}'", combo);
    handler(event);
    true
}

fn warn_unreachable(handlers: &HandlerMap) {
    for combo in handlers.combos() {
        if let Err(e) = parse_combo(combo) {
            log::warn!("handler for '{}' can never fire: {}", combo, e);
        }
    }
}
