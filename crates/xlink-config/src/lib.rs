//! Option layering and host configuration for xlink.
//!
//! Options for one resolution call are built from three layers, later layers
//! winning:
//!
//! 1. Process-wide defaults ([`defaults()`], changeable via
//!    [`replace_default`]).
//! 2. Host configuration ([`HostConfig`]), usually loaded from `xlink.toml`.
//! 3. The settings suffix of the requested resource
//!    (`name!key=value;key=value`).
//!
//! # Example
//!
//! ```
//! use xlink_config::{HostConfig, Options};
//!
//! let host = HostConfig::from_toml_str(r#"inclusionLoader = "tpl""#).unwrap();
//! let options = Options::layered(&host, Some("cssLoader=less")).unwrap();
//! assert_eq!(options.inclusion_loader, "tpl");
//! assert_eq!(options.css_loader, "less");
//! ```

mod defaults;
mod options;
pub mod suffix;
mod value;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use defaults::{defaults, replace_default, reset_defaults};
pub use options::{
    CSS_LOADER, DEFAULT_EXT, DEFAULT_INCLUSION_EXT, DIRECTIVE_TAG, INCLUSION_LOADER, Options,
    STRICT,
};
pub use value::SettingValue;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "xlink.toml";

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Option value has the wrong type.
    #[error("Invalid value for {key}: expected {expected}, got {found}")]
    InvalidValue {
        /// Option key.
        key: String,
        /// Expected type name.
        expected: &'static str,
        /// Offending value rendered for the message.
        found: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, expected: &'static str, found: &SettingValue) -> Self {
        Self::InvalidValue {
            key: key.to_owned(),
            expected,
            found: format!("{} `{found}`", found.type_name()),
        }
    }
}

/// Host-supplied option layer.
///
/// A flat table of option keys (camelCase, as in suffix strings) to values.
/// Recognized keys are type-checked when layered; unknown keys pass through.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct HostConfig {
    values: BTreeMap<String, SettingValue>,
}

impl HostConfig {
    /// Create an empty host configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Parse host configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load host configuration.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `xlink.toml` in the current directory and its parents, falling
    /// back to an empty configuration.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        match Self::discover_config() {
            Some(discovered) => Self::load_from_file(&discovered),
            None => Ok(Self::default()),
        }
    }

    /// Look up a raw value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    /// Check whether the configuration sets no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), keys = config.values.len(), "Loaded host config");
        Ok(config)
    }
}

impl Options {
    /// Build the options for one call: current defaults, then `host`, then
    /// the settings `suffix`.
    pub fn layered(host: &HostConfig, suffix: Option<&str>) -> Result<Self, ConfigError> {
        let mut options = defaults();
        options.apply(&host.values)?;
        if let Some(suffix) = suffix {
            options.apply_suffix(suffix)?;
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_empty_host_config() {
        let host = HostConfig::from_toml_str("").unwrap();
        assert!(host.is_empty());
    }

    #[test]
    fn test_parse_host_config() {
        let host = HostConfig::from_toml_str(
            r#"
cssLoader = "less"
directiveTag = ["link", "tpl-link"]
theme = "dark"
"#,
        )
        .unwrap();
        assert_eq!(host.get("cssLoader"), Some(&SettingValue::from("less")));
        assert_eq!(host.get("theme"), Some(&SettingValue::from("dark")));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = HostConfig::from_toml_str("cssLoader = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_layered_order() {
        let host = HostConfig::new()
            .with(CSS_LOADER, "less")
            .with(DEFAULT_EXT, "htm");
        let options = Options::layered(&host, Some("cssLoader=sass")).unwrap();

        assert_eq!(options.css_loader, "sass");
        assert_eq!(options.default_ext, "htm");
    }

    #[test]
    fn test_layered_rejects_bad_host_type() {
        let host = HostConfig::new().with(STRICT, "maybe");
        let err = Options::layered(&host, None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "inclusionLoader = \"tpl\"\n").unwrap();

        let host = HostConfig::load(Some(&path)).unwrap();
        assert_eq!(host.get(INCLUSION_LOADER), Some(&SettingValue::from("tpl")));
    }

    #[test]
    fn test_load_missing_path() {
        let err = HostConfig::load(Some(Path::new("/nonexistent/xlink.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
