//! Tag attribute extraction.
//!
//! Parses the raw attribute text of a tag (`rel="x-include" href=a data-x='1'`)
//! into a lower-cased name → value map. No entity decoding is done.

use std::collections::HashMap;

use xlink_loader::DataMap;

/// Prefix of attributes collected into an inclusion's data payload.
pub const DATA_PREFIX: &str = "data-";

/// Attributes of one tag occurrence.
///
/// # Example
///
/// ```
/// use xlink_core::AttributeMap;
///
/// let attrs = AttributeMap::parse(r#"REL="x-include" href='parts/head' data-title=Hi async"#);
/// assert_eq!(attrs.get("rel"), Some("x-include"));
/// assert_eq!(attrs.get("href"), Some("parts/head"));
/// assert_eq!(attrs.get("data-title"), Some("Hi"));
/// assert_eq!(attrs.get("async"), Some(""));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeMap {
    attrs: HashMap<String, String>,
}

impl AttributeMap {
    /// Parse raw attribute text.
    ///
    /// Supports `name="value"`, `name='value'`, `name=value` and bare
    /// `name` (empty value). Names are lower-cased; the first occurrence of a
    /// repeated name wins. A trailing `/` (self-closing tag) is ignored.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut attrs = HashMap::new();
        let mut remaining = text;

        loop {
            remaining = remaining.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
            if remaining.is_empty() {
                break;
            }

            let name_end = remaining
                .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
                .unwrap_or(remaining.len());
            if name_end == 0 {
                // Stray `=` without a name.
                remaining = &remaining[1..];
                continue;
            }
            let name = remaining[..name_end].to_ascii_lowercase();
            remaining = &remaining[name_end..];

            let after_name = remaining.trim_start();
            let value = if let Some(after_eq) = after_name.strip_prefix('=') {
                let (value, rest) = parse_value(after_eq.trim_start());
                remaining = rest;
                value
            } else {
                ""
            };

            attrs.entry(name).or_insert_with(|| value.to_owned());
        }

        Self { attrs }
    }

    /// Get an attribute value by lower-cased name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Get an attribute value, treating an empty value as absent.
    #[must_use]
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    /// Set an attribute (for hosts building maps by hand).
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into().to_ascii_lowercase(), value.into());
    }

    /// Iterate over all attributes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Check if the tag has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Collect `data-*` attributes under their suffix names.
    ///
    /// Returns `None` when the tag has no such attributes.
    #[must_use]
    pub fn data(&self) -> Option<DataMap> {
        let data: DataMap = self
            .attrs
            .iter()
            .filter_map(|(name, value)| {
                name.strip_prefix(DATA_PREFIX)
                    .filter(|suffix| !suffix.is_empty())
                    .map(|suffix| (suffix.to_owned(), value.clone()))
            })
            .collect();
        (!data.is_empty()).then_some(data)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

/// Parse an attribute value: `"value"`, `'value'` or unquoted up to
/// whitespace. An unclosed quote takes the rest of the text.
///
/// Returns (value, rest).
fn parse_value(s: &str) -> (&str, &str) {
    if let Some(quote) = s.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let inner = &s[1..];
        match inner.find(quote) {
            Some(end) => (&inner[..end], &inner[end + 1..]),
            None => (inner, ""),
        }
    } else {
        let end = s.find(char::is_whitespace).unwrap_or(s.len());
        (&s[..end], &s[end..])
    }
}
