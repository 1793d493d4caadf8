// Hotbind Config API
// Combo string parsing and bindings files

pub mod bindings;
pub mod combo_parser;

pub use bindings::{default_config_content, BindingsConfig, ConfigError, ConfigResult, OptionsSection};
pub use combo_parser::{parse_combo, ComboParseError, ParsedCombo};
