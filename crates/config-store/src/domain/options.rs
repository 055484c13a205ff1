//! Per-store settings.
//!
//! [`StoreOptions`] controls the file name, how writes reach the disk, and the
//! indentation of the written JSON.  It is a plain serde struct so it can be
//! embedded in an application's own TOML configuration:
//!
//! ```toml
//! file_name = "Settings.json"
//! write_strategy = "overwrite"
//! indent = 4
//! ```
//!
//! Fields absent from the TOML fall back to the `default_*` helpers below, so
//! an empty document yields [`StoreOptions::default()`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::value::DEFAULT_INDENT;

/// File name used when the caller does not supply one.
pub const DEFAULT_FILE_NAME: &str = "AppConfig.json";

/// Error type for parsing [`StoreOptions`].
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The TOML content could not be parsed.
    #[error("failed to parse store options TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How the serialized mapping is written to the backing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteStrategy {
    /// Write a sibling temp file, sync it, then rename it over the target.
    /// A crash mid-write leaves the previous file intact.
    #[default]
    AtomicRename,
    /// Truncate the target and write in place.
    Overwrite,
}

/// Settings for one configuration store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOptions {
    /// File name inside the base directory.
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default)]
    pub write_strategy: WriteStrategy,
    /// Spaces per indentation level in the written JSON.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}
fn default_indent() -> usize {
    DEFAULT_INDENT
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            write_strategy: WriteStrategy::default(),
            indent: default_indent(),
        }
    }
}

impl StoreOptions {
    /// Options with a custom file name and defaults for everything else.
    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Parses options from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Parse`] if the TOML is malformed or a field has
    /// the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(text)?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_name_is_app_config_json() {
        assert_eq!(StoreOptions::default().file_name, "AppConfig.json");
    }

    #[test]
    fn test_default_strategy_is_atomic_rename() {
        assert_eq!(StoreOptions::default().write_strategy, WriteStrategy::AtomicRename);
    }

    #[test]
    fn test_default_indent_is_two() {
        assert_eq!(StoreOptions::default().indent, 2);
    }

    #[test]
    fn test_with_file_name_keeps_other_defaults() {
        let options = StoreOptions::with_file_name("Prefs.json");
        assert_eq!(options.file_name, "Prefs.json");
        assert_eq!(options.indent, 2);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let options = StoreOptions::from_toml_str("").expect("parse empty");
        assert_eq!(options, StoreOptions::default());
    }

    #[test]
    fn test_partial_toml_overrides_only_given_fields() {
        // Arrange
        let toml_str = r#"
write_strategy = "overwrite"
"#;

        // Act
        let options = StoreOptions::from_toml_str(toml_str).expect("parse partial");

        // Assert
        assert_eq!(options.write_strategy, WriteStrategy::Overwrite);
        assert_eq!(options.file_name, "AppConfig.json");
    }

    #[test]
    fn test_full_toml() {
        let toml_str = r#"
file_name = "Settings.json"
write_strategy = "atomic_rename"
indent = 4
"#;
        let options = StoreOptions::from_toml_str(toml_str).expect("parse full");
        assert_eq!(options.file_name, "Settings.json");
        assert_eq!(options.write_strategy, WriteStrategy::AtomicRename);
        assert_eq!(options.indent, 4);
    }

    #[test]
    fn test_unknown_strategy_is_parse_error() {
        let result = StoreOptions::from_toml_str(r#"write_strategy = "fsync_twice""#);
        assert!(matches!(result, Err(OptionsError::Parse(_))));
    }

    #[test]
    fn test_options_round_trip_through_toml() {
        let options = StoreOptions {
            file_name: "x.json".to_string(),
            write_strategy: WriteStrategy::Overwrite,
            indent: 0,
        };
        let text = toml::to_string(&options).expect("serialize");
        assert_eq!(StoreOptions::from_toml_str(&text).unwrap(), options);
    }
}
