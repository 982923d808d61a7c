//! Primitive option values.

use std::fmt;

use serde::Deserialize;

/// A primitive option value.
///
/// Options read from TOML, suffix strings or set programmatically all end up
/// as one of these shapes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Boolean flag.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Plain string.
    String(String),
    /// List of strings (e.g. `directiveTag`).
    List(Vec<String>),
}

impl SettingValue {
    /// Infer a value from raw suffix text when no default type applies.
    ///
    /// `true`/`false` become booleans, finite numbers become numbers,
    /// everything else (including `nan` and `inf`) stays a string.
    #[must_use]
    pub fn infer(raw: &str) -> Self {
        match raw {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => raw
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map_or_else(|| Self::String(raw.to_owned()), Self::Number),
        }
    }

    /// Short type name for error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_infer_bool() {
        assert_eq!(SettingValue::infer("true"), SettingValue::Bool(true));
        assert_eq!(SettingValue::infer("false"), SettingValue::Bool(false));
    }

    #[test]
    fn test_infer_number() {
        assert_eq!(SettingValue::infer("42"), SettingValue::Number(42.0));
        assert_eq!(SettingValue::infer("-1.5"), SettingValue::Number(-1.5));
    }

    #[test]
    fn test_infer_string() {
        assert_eq!(SettingValue::infer("less"), SettingValue::from("less"));
        assert_eq!(SettingValue::infer("True"), SettingValue::from("True"));
    }

    #[test]
    fn test_infer_non_finite_stays_string() {
        assert_eq!(SettingValue::infer("nan"), SettingValue::from("nan"));
        assert_eq!(SettingValue::infer("inf"), SettingValue::from("inf"));
        assert_eq!(SettingValue::infer("-infinity"), SettingValue::from("-infinity"));
        assert_eq!(SettingValue::infer("1e3"), SettingValue::Number(1000.0));
    }

    #[test]
    fn test_display_list() {
        let value = SettingValue::List(vec!["link".to_owned(), "x-link".to_owned()]);
        assert_eq!(value.to_string(), "link,x-link");
    }

    #[test]
    fn test_deserialize_untagged() {
        #[derive(Deserialize)]
        struct Wrapper {
            a: SettingValue,
            b: SettingValue,
            c: SettingValue,
            d: SettingValue,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
a = true
b = 3
c = "view"
d = ["link", "tpl"]
"#,
        )
        .unwrap();
        assert_eq!(parsed.a, SettingValue::Bool(true));
        assert_eq!(parsed.b, SettingValue::Number(3.0));
        assert_eq!(parsed.c, SettingValue::from("view"));
        assert_eq!(
            parsed.d,
            SettingValue::List(vec!["link".to_owned(), "tpl".to_owned()])
        );
    }
}
