// Hotbind Combo Type
// A key identifier plus the modifiers held when it was released

use std::fmt;

use crate::modifier::{Modifier, ModifierState};

/// Compose the key-combination string used as a handler lookup key.
///
/// Prefixes are emitted in the fixed order ctrl, alt, shift, meta no matter
/// how the modifiers were reported, followed by the key identifier verbatim.
///
/// # Examples
/// ```
/// use hotbind_core::{compose, Modifier, ModifierState};
/// let held = ModifierState::from_held([Modifier::Shift, Modifier::Alt]);
/// assert_eq!(compose(&held, "ArrowUp"), "ALT+shift+ArrowUp");
/// ```
pub fn compose(modifiers: &ModifierState, key: &str) -> String {
    let held = modifiers.held();
    let prefix_len: usize = held.iter().map(|m| m.prefix().len()).sum();
    let mut out = String::with_capacity(prefix_len + key.len());
    for modifier in held {
        out.push_str(modifier.prefix());
    }
    out.push_str(key);
    out
}

/// A key identifier together with its held modifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Combo {
    modifiers: ModifierState,
    key: String,
}

impl Combo {
    /// Create a new Combo from modifiers and a key
    pub fn new(modifiers: ModifierState, key: impl Into<String>) -> Self {
        Self {
            modifiers,
            key: key.into(),
        }
    }

    /// Create a Combo with no modifiers
    pub fn bare(key: impl Into<String>) -> Self {
        Self::new(ModifierState::NONE, key)
    }

    /// Get the modifiers for this combo
    pub fn modifiers(&self) -> ModifierState {
        self.modifiers
    }

    /// Get the key for this combo
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Add a modifier to this combo
    pub fn with_modifier(&self, modifier: Modifier) -> Self {
        Self {
            modifiers: self.modifiers.with(modifier),
            key: self.key.clone(),
        }
    }

    /// The lookup string for this combo
    pub fn to_combo_string(&self) -> String {
        compose(&self.modifiers, &self.key)
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_combo_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_bare_key() {
        assert_eq!(compose(&ModifierState::NONE, "Enter"), "Enter");
    }

    #[test]
    fn test_compose_all_modifiers() {
        let held = ModifierState::from_held([
            Modifier::Meta,
            Modifier::Shift,
            Modifier::Alt,
            Modifier::Ctrl,
        ]);
        assert_eq!(compose(&held, "a"), "ctrl+ALT+shift+meta+a");
    }

    #[test]
    fn test_compose_order_independent_of_report_order() {
        let a = ModifierState::from_held([Modifier::Shift, Modifier::Ctrl]);
        let b = ModifierState::from_held([Modifier::Ctrl, Modifier::Shift]);
        assert_eq!(compose(&a, "s"), "ctrl+shift+s");
        assert_eq!(compose(&a, "s"), compose(&b, "s"));
    }

    #[test]
    fn test_compose_keeps_key_verbatim() {
        let held = ModifierState::NONE.with(Modifier::Shift);
        assert_eq!(compose(&held, "A"), "shift+A");
        assert_eq!(compose(&held, "+"), "shift++");
    }

    #[test]
    fn test_combo_display() {
        let combo = Combo::bare("s").with_modifier(Modifier::Ctrl);
        assert_eq!(combo.to_string(), "ctrl+s");
        assert_eq!(combo.key(), "s");
        assert!(combo.modifiers().ctrl);
    }

    #[test]
    fn test_combo_hashable() {
        use std::collections::HashMap;
        let mut map: HashMap<Combo, &str> = HashMap::new();
        map.insert(Combo::bare("x").with_modifier(Modifier::Alt), "value");
        let lookup = Combo::new(ModifierState::NONE.with(Modifier::Alt), "x");
        assert_eq!(map.get(&lookup), Some(&"value"));
    }
}
