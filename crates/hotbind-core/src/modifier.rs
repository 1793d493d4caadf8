// Hotbind Modifier System
// Represents keyboard combo modifiers (Ctrl, Alt, Shift, Meta)

use std::fmt;

use smallvec::SmallVec;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// A keyboard combo modifier.
///
/// Variants are declared in composition order; `Modifier::iter()` always
/// yields ctrl, alt, shift, meta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
    Meta,
}

impl Modifier {
    /// Prefix this modifier contributes to a key-combination string.
    ///
    /// Alt is spelled `ALT+` while the others are lowercase. Existing handler
    /// maps are keyed on that exact spelling, so it must not be normalized
    /// without migrating every registered key at the same time.
    pub const fn prefix(self) -> &'static str {
        match self {
            Modifier::Ctrl => "ctrl+",
            Modifier::Alt => "ALT+",
            Modifier::Shift => "shift+",
            Modifier::Meta => "meta+",
        }
    }

    /// Find the modifier whose prefix starts `s`, if any
    pub fn strip_prefix(s: &str) -> Option<(Modifier, &str)> {
        Modifier::iter().find_map(|m| s.strip_prefix(m.prefix()).map(|rest| (m, rest)))
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Modifier::Ctrl => "Ctrl",
            Modifier::Alt => "Alt",
            Modifier::Shift => "Shift",
            Modifier::Meta => "Meta",
        };
        write!(f, "{}", name)
    }
}

/// Modifier flags reported by a keyboard event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierState {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl ModifierState {
    /// No modifiers held
    pub const NONE: ModifierState = ModifierState {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Build a state from any collection of held modifiers.
    ///
    /// The order of `modifiers` is irrelevant and duplicates are harmless.
    pub fn from_held(modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        let mut state = Self::NONE;
        for modifier in modifiers {
            state.set(modifier, true);
        }
        state
    }

    /// Whether `modifier` is held
    pub fn is_held(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Ctrl => self.ctrl,
            Modifier::Alt => self.alt,
            Modifier::Shift => self.shift,
            Modifier::Meta => self.meta,
        }
    }

    /// Set or clear a single modifier flag
    pub fn set(&mut self, modifier: Modifier, held: bool) {
        match modifier {
            Modifier::Ctrl => self.ctrl = held,
            Modifier::Alt => self.alt = held,
            Modifier::Shift => self.shift = held,
            Modifier::Meta => self.meta = held,
        }
    }

    /// Add a modifier to this state
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.set(modifier, true);
        self
    }

    /// Held modifiers in composition order
    pub fn held(&self) -> SmallVec<[Modifier; 4]> {
        Modifier::iter().filter(|m| self.is_held(*m)).collect()
    }

    /// True when no modifier is held
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_keep_alt_casing() {
        assert_eq!(Modifier::Ctrl.prefix(), "ctrl+");
        assert_eq!(Modifier::Alt.prefix(), "ALT+");
        assert_eq!(Modifier::Shift.prefix(), "shift+");
        assert_eq!(Modifier::Meta.prefix(), "meta+");
    }

    #[test]
    fn test_iteration_order_is_fixed() {
        let order: Vec<Modifier> = Modifier::iter().collect();
        assert_eq!(
            order,
            vec![Modifier::Ctrl, Modifier::Alt, Modifier::Shift, Modifier::Meta]
        );
    }

    #[test]
    fn test_held_ignores_input_order() {
        let state = ModifierState::from_held([Modifier::Meta, Modifier::Shift, Modifier::Ctrl]);
        assert_eq!(
            state.held().as_slice(),
            &[Modifier::Ctrl, Modifier::Shift, Modifier::Meta]
        );
    }

    #[test]
    fn test_strip_prefix() {
        assert_eq!(
            Modifier::strip_prefix("ALT+x"),
            Some((Modifier::Alt, "x"))
        );
        assert_eq!(Modifier::strip_prefix("alt+x"), None);
        assert_eq!(Modifier::strip_prefix("x"), None);
    }

    #[test]
    fn test_empty_state() {
        assert!(ModifierState::NONE.is_empty());
        assert!(!ModifierState::NONE.with(Modifier::Alt).is_empty());
        assert!(ModifierState::default().held().is_empty());
    }
}
