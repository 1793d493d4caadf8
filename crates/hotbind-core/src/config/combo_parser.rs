// Hotbind Config API - Combo String Parser
// Parses key-combination strings like "ctrl+shift+s" back into components

use crate::combo::{compose, Combo};
use crate::modifier::{Modifier, ModifierState};
use strum::IntoEnumIterator;

/// Result of parsing a combo string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCombo {
    /// The modifiers parsed from the string
    pub modifiers: ModifierState,
    /// The key identifier (everything after the last modifier prefix)
    pub key: String,
}

impl ParsedCombo {
    /// Re-compose the string; equal to the parsed input for every accepted string
    pub fn canonical(&self) -> String {
        compose(&self.modifiers, &self.key)
    }

    /// Convert into a [`Combo`]
    pub fn into_combo(self) -> Combo {
        Combo::new(self.modifiers, self.key)
    }
}

/// Reasons a string can never be produced by the combo composition rule
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComboParseError {
    #[error("combo string cannot be empty")]
    EmptyInput,

    #[error("combo string has modifiers but no key")]
    EmptyKey,

    #[error("modifier {0} appears more than once")]
    Duplicate(Modifier),

    #[error("modifier {found} must come before {after}")]
    OutOfOrder { found: Modifier, after: Modifier },

    #[error("modifier prefix '{found}' is spelled '{expected}' in combo strings")]
    Misspelled {
        found: String,
        expected: &'static str,
    },
}

/// Parse a key-combination string into modifiers and key.
///
/// Only strings the composition rule can emit are accepted: prefixes in the
/// order ctrl, alt, shift, meta with their exact casing, each at most once,
/// followed by a non-empty key identifier.
///
/// # Examples
/// ```
/// use hotbind_core::config::parse_combo;
/// let parsed = parse_combo("ctrl+ALT+Delete").unwrap();
/// assert!(parsed.modifiers.ctrl && parsed.modifiers.alt);
/// assert_eq!(parsed.key, "Delete");
/// assert!(parse_combo("alt+Delete").is_err());
/// ```
pub fn parse_combo(exp: &str) -> Result<ParsedCombo, ComboParseError> {
    if exp.is_empty() {
        return Err(ComboParseError::EmptyInput);
    }

    let mut modifiers = ModifierState::NONE;
    let mut last: Option<Modifier> = None;
    let mut rest = exp;

    while let Some((modifier, tail)) = Modifier::strip_prefix(rest) {
        if modifiers.is_held(modifier) {
            return Err(ComboParseError::Duplicate(modifier));
        }
        if let Some(prev) = last {
            if modifier < prev {
                return Err(ComboParseError::OutOfOrder {
                    found: modifier,
                    after: prev,
                });
            }
        }
        modifiers.set(modifier, true);
        last = Some(modifier);
        rest = tail;
    }

    if rest.is_empty() {
        return Err(ComboParseError::EmptyKey);
    }

    check_misspelled_prefix(rest)?;

    Ok(ParsedCombo {
        modifiers,
        key: rest.to_string(),
    })
}

/// Reject keys that start with a modifier name in the wrong case, e.g. "alt+x"
fn check_misspelled_prefix(key: &str) -> Result<(), ComboParseError> {
    let Some((head, tail)) = key.split_once('+') else {
        return Ok(());
    };
    if head.is_empty() || tail.is_empty() {
        return Ok(());
    }
    for modifier in Modifier::iter() {
        let expected = modifier.prefix();
        if head.eq_ignore_ascii_case(&expected[..expected.len() - 1]) {
            return Err(ComboParseError::Misspelled {
                found: format!("{}+", head),
                expected,
            });
        }
    }
    Ok(())
}
