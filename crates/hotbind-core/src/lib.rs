// Hotbind Core Library
// Keyboard shortcut binding: one key-release listener per binder, modifier-aware dispatch

pub mod binder;
pub mod combo;
pub mod config;
pub mod element;
pub mod event;
pub mod handlers;
pub mod host;
pub mod modifier;
pub mod origin;
pub mod target;

pub use binder::{bind, dispatch, BindingOptions, HotkeyBinder, LISTEN_KIND};
pub use combo::{compose, Combo};
pub use config::{parse_combo, BindingsConfig, ComboParseError, ConfigError, ParsedCombo};
pub use element::Element;
pub use event::{EventKind, KeyboardEvent};
pub use handlers::{Handler, HandlerMap, LatestHandlers};
pub use modifier::{Modifier, ModifierState};
pub use origin::{is_excluded_origin, Origin};
pub use target::{EventTarget, Listener, NodeRef, Target, TargetHandle};
