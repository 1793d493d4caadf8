// Hotbind Bindings File
// Loads binder options and a combo-to-action table from TOML

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::binder::BindingOptions;
use crate::config::combo_parser::{parse_combo, ComboParseError};
use crate::handlers::{Handler, HandlerMap};
use crate::target::Target;

/// Result type for bindings file operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur when loading a bindings file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("binding '{combo}' can never fire: {source}")]
    InvalidCombo {
        combo: String,
        #[source]
        source: ComboParseError,
    },
}

/// Bindings loaded from a file such as `~/.config/hotbind/bindings.toml`
///
/// ```toml
/// [options]
/// enabled = true
/// prevent_default = true
///
/// [bindings]
/// "ctrl+s" = "save"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct BindingsConfig {
    pub options: OptionsSection,
    /// Combo string to action name, in file order
    pub bindings: IndexMap<String, String>,
    #[serde(skip)]
    source_path: Option<PathBuf>,
}

/// `[options]` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct OptionsSection {
    pub enabled: bool,
    pub prevent_default: bool,
}

impl Default for OptionsSection {
    fn default() -> Self {
        Self {
            enabled: true,
            prevent_default: true,
        }
    }
}

impl Default for BindingsConfig {
    fn default() -> Self {
        Self {
            options: OptionsSection::default(),
            bindings: IndexMap::new(),
            source_path: None,
        }
    }
}

impl BindingsConfig {
    /// Parse bindings from a TOML string
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load bindings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path)?;
        let mut config = Self::from_toml(&content)?;
        config.source_path = Some(path.as_ref().to_path_buf());
        log::debug!(
            "loaded {} binding(s) from {}",
            config.bindings.len(),
            path.as_ref().display()
        );
        Ok(config)
    }

    /// Get the default bindings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hotbind").join("bindings.toml"))
    }

    /// Load from the default location, or defaults if there is no file
    pub fn load_default() -> ConfigResult<Self> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        Ok(Self::default())
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Reload from the file this config came from
    pub fn reload(&mut self) -> ConfigResult<()> {
        if let Some(path) = self.source_path.clone() {
            *self = Self::from_file(path)?;
        }
        Ok(())
    }

    /// Every binding whose combo no event can compose to
    pub fn validate(&self) -> Vec<ConfigError> {
        self.bindings
            .keys()
            .filter_map(|combo| {
                parse_combo(combo).err().map(|source| ConfigError::InvalidCombo {
                    combo: combo.clone(),
                    source,
                })
            })
            .collect()
    }

    /// Binder options for this file, attached to `target` (or the window)
    pub fn binding_options(&self, target: Option<Target>) -> BindingOptions {
        BindingOptions {
            target,
            enabled: self.options.enabled,
            prevent_default: self.options.prevent_default,
        }
    }

    /// Build a handler map, asking `make` for the handler of each action name
    pub fn handler_map(&self, mut make: impl FnMut(&str) -> Handler) -> HandlerMap {
        let mut map = HandlerMap::new();
        for (combo, action) in &self.bindings {
            map.insert_handler(combo.clone(), make(action));
        }
        map
    }
}

/// Starter bindings file
pub fn default_config_content() -> &'static str {
    r#"# Hotbind bindings
# Place this file at: ~/.config/hotbind/bindings.toml

[options]
# Attach the listener at all
enabled = true
# Suppress the default action of keys that matched a binding
prevent_default = true

# Combo strings are matched exactly. Modifiers come first in this order
# and spelling: ctrl+ ALT+ shift+ meta+ (Alt really is uppercase).
# A bare key also matches when it is released with modifiers held,
# unless a binding for the full combo exists.
[bindings]
"ctrl+s" = "save"
"ctrl+shift+z" = "redo"
"ALT+ArrowLeft" = "back"
"Escape" = "close"
"?" = "help"
"#
}
