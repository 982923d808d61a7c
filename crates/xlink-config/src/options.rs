//! Resolved engine options.

use std::collections::BTreeMap;

use crate::{ConfigError, SettingValue};

/// Option key: loader prepended to style directives.
pub const CSS_LOADER: &str = "cssLoader";
/// Option key: extension appended to the base document name.
pub const DEFAULT_EXT: &str = "defaultExt";
/// Option key: extension appended to inclusion identifiers.
pub const DEFAULT_INCLUSION_EXT: &str = "defaultInclusionExt";
/// Option key: tag name (or list of names) recognized as directive tags.
pub const DIRECTIVE_TAG: &str = "directiveTag";
/// Option key: loader prepended to inclusion directives without `type`.
pub const INCLUSION_LOADER: &str = "inclusionLoader";
/// Option key: fail on unterminated directive tags instead of stopping.
pub const STRICT: &str = "strict";

/// Fully layered options for one resolution call.
///
/// Recognized keys have typed fields; anything else is kept verbatim in
/// [`extra`](Self::extra) so hooks and conditions can read it.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Loader for style directives (default `css`).
    pub css_loader: String,
    /// Extension for the base document (default `html`).
    pub default_ext: String,
    /// Extension for inclusion identifiers (default `html`).
    pub default_inclusion_ext: String,
    /// Directive tag names (default `["link", "x-link"]`).
    pub directive_tag: Vec<String>,
    /// Loader for inclusions without `type` (default `view`).
    pub inclusion_loader: String,
    /// Treat unterminated tags as errors (default `false`).
    pub strict: bool,
    /// Unrecognized keys, passed through unchanged.
    pub extra: BTreeMap<String, SettingValue>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            css_loader: "css".to_owned(),
            default_ext: "html".to_owned(),
            default_inclusion_ext: "html".to_owned(),
            directive_tag: vec!["link".to_owned(), "x-link".to_owned()],
            inclusion_loader: "view".to_owned(),
            strict: false,
            extra: BTreeMap::new(),
        }
    }
}

impl Options {
    /// Set a typed value.
    ///
    /// Recognized keys must match the default's type; `directiveTag` also
    /// accepts a single string. Unknown keys are stored as given.
    pub fn set(&mut self, key: &str, value: SettingValue) -> Result<(), ConfigError> {
        match (key, value) {
            (CSS_LOADER, SettingValue::String(s)) => self.css_loader = s,
            (DEFAULT_EXT, SettingValue::String(s)) => self.default_ext = s,
            (DEFAULT_INCLUSION_EXT, SettingValue::String(s)) => self.default_inclusion_ext = s,
            (INCLUSION_LOADER, SettingValue::String(s)) => self.inclusion_loader = s,
            (DIRECTIVE_TAG, SettingValue::String(s)) => self.directive_tag = vec![s],
            (DIRECTIVE_TAG, SettingValue::List(names)) => self.directive_tag = names,
            (STRICT, SettingValue::Bool(b)) => self.strict = b,
            (CSS_LOADER | DEFAULT_EXT | DEFAULT_INCLUSION_EXT | INCLUSION_LOADER, other) => {
                return Err(ConfigError::invalid(key, "string", &other));
            }
            (DIRECTIVE_TAG, other) => {
                return Err(ConfigError::invalid(key, "string or list", &other));
            }
            (STRICT, other) => return Err(ConfigError::invalid(key, "boolean", &other)),
            (_, value) => {
                self.extra.insert(key.to_owned(), value);
            }
        }
        Ok(())
    }

    /// Set a value from raw suffix text, coercing against the default's type.
    pub fn set_raw(&mut self, key: &str, raw: &str) -> Result<(), ConfigError> {
        let value = match key {
            CSS_LOADER | DEFAULT_EXT | DEFAULT_INCLUSION_EXT | INCLUSION_LOADER => {
                SettingValue::String(raw.to_owned())
            }
            DIRECTIVE_TAG => SettingValue::List(
                raw.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_owned)
                    .collect(),
            ),
            STRICT => match raw {
                "true" | "1" => SettingValue::Bool(true),
                "false" | "0" | "" => SettingValue::Bool(false),
                _ => {
                    return Err(ConfigError::invalid(
                        key,
                        "boolean",
                        &SettingValue::String(raw.to_owned()),
                    ));
                }
            },
            _ => SettingValue::infer(raw),
        };
        self.set(key, value)
    }

    /// Look up any option by key, recognized or not.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<SettingValue> {
        match key {
            CSS_LOADER => Some(self.css_loader.clone().into()),
            DEFAULT_EXT => Some(self.default_ext.clone().into()),
            DEFAULT_INCLUSION_EXT => Some(self.default_inclusion_ext.clone().into()),
            DIRECTIVE_TAG => Some(SettingValue::List(self.directive_tag.clone())),
            INCLUSION_LOADER => Some(self.inclusion_loader.clone().into()),
            STRICT => Some(SettingValue::Bool(self.strict)),
            _ => self.extra.get(key).cloned(),
        }
    }

    /// Apply every entry of `values` in order; later entries win.
    pub fn apply<'a, I>(&mut self, values: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (&'a String, &'a SettingValue)>,
    {
        for (key, value) in values {
            self.set(key, value.clone())?;
        }
        Ok(())
    }

    /// Apply a `name=value;name=value` suffix with type coercion.
    pub fn apply_suffix(&mut self, suffix: &str) -> Result<(), ConfigError> {
        for (key, raw) in crate::suffix::parse_suffix(suffix) {
            self.set_raw(key, raw)?;
        }
        Ok(())
    }
}
