//! Loaded value shapes.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::BoxError;

/// `data-*` payload collected from an inclusion tag.
pub type DataMap = BTreeMap<String, String>;

/// Callable inclusion value: invoked with the inclusion's data payload.
pub type CallableFn = dyn Fn(Option<&DataMap>) -> Result<Value, BoxError> + Send + Sync;

/// Object exposing an "execute" capability.
///
/// Typical for compiled templates that render themselves against the data
/// collected from the inclusion tag.
pub trait Execute: Send + Sync {
    /// Render with the inclusion's data payload (`None` when the tag had no
    /// `data-*` attributes).
    fn execute(&self, data: Option<&DataMap>) -> Result<Value, BoxError>;
}

/// A value delivered by a [`Loader`](crate::Loader).
#[derive(Clone)]
pub enum Loaded {
    /// Plain value, stringified directly.
    Value(Value),
    /// Callable, invoked with the data payload.
    Callable(Arc<CallableFn>),
    /// Executable object, executed with the data payload.
    Executable(Arc<dyn Execute>),
}

impl Loaded {
    /// Plain value.
    #[must_use]
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Plain text value.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Value(Value::String(text.into()))
    }

    /// Callable value.
    #[must_use]
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(Option<&DataMap>) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Self::Callable(Arc::new(f))
    }

    /// Executable value.
    #[must_use]
    pub fn executable(exec: impl Execute + 'static) -> Self {
        Self::Executable(Arc::new(exec))
    }

    /// Borrow the text of a plain string value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Value(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Produce the string that replaces an inclusion placeholder.
    ///
    /// Plain values are stringified as-is; callables and executables are
    /// invoked with `data` first.
    pub fn render(&self, data: Option<&DataMap>) -> Result<String, BoxError> {
        let value = match self {
            Self::Value(value) => return Ok(stringify(value)),
            Self::Callable(f) => f(data)?,
            Self::Executable(exec) => exec.execute(data)?,
        };
        Ok(stringify(&value))
    }
}

impl fmt::Debug for Loaded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Callable(_) => f.write_str("Callable(..)"),
            Self::Executable(_) => f.write_str("Executable(..)"),
        }
    }
}

/// Stringify a JSON value: strings raw, `null` empty, everything else as JSON.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    struct Greeting;

    impl Execute for Greeting {
        fn execute(&self, data: Option<&DataMap>) -> Result<Value, BoxError> {
            let name = data
                .and_then(|d| d.get("name"))
                .map_or("world", String::as_str);
            Ok(Value::String(format!("<p>Hello {name}</p>")))
        }
    }

    #[test]
    fn test_render_text() {
        assert_eq!(Loaded::text("<b>hi</b>").render(None).unwrap(), "<b>hi</b>");
    }

    #[test]
    fn test_render_non_string_values() {
        assert_eq!(Loaded::value(42).render(None).unwrap(), "42");
        assert_eq!(Loaded::value(true).render(None).unwrap(), "true");
        assert_eq!(Loaded::value(Value::Null).render(None).unwrap(), "");
        assert_eq!(
            Loaded::value(json!({"a": 1})).render(None).unwrap(),
            r#"{"a":1}"#
        );
    }

    #[test]
    fn test_render_callable_with_data() {
        let loaded = Loaded::callable(|data| {
            let title = data.and_then(|d| d.get("title")).cloned();
            Ok(Value::String(title.unwrap_or_else(|| "none".to_owned())))
        });

        let mut data = DataMap::new();
        data.insert("title".to_owned(), "Hi".to_owned());
        assert_eq!(loaded.render(Some(&data)).unwrap(), "Hi");
        assert_eq!(loaded.render(None).unwrap(), "none");
    }

    #[test]
    fn test_render_callable_error() {
        let loaded = Loaded::callable(|_| Err("template blew up".into()));
        let err = loaded.render(None).unwrap_err();
        assert_eq!(err.to_string(), "template blew up");
    }

    #[test]
    fn test_render_executable() {
        let loaded = Loaded::executable(Greeting);
        let mut data = DataMap::new();
        data.insert("name".to_owned(), "Ada".to_owned());
        assert_eq!(loaded.render(Some(&data)).unwrap(), "<p>Hello Ada</p>");
        assert_eq!(loaded.render(None).unwrap(), "<p>Hello world</p>");
    }

    #[test]
    fn test_as_text() {
        assert_eq!(Loaded::text("x").as_text(), Some("x"));
        assert_eq!(Loaded::value(1).as_text(), None);
        assert_eq!(Loaded::callable(|_| Ok(Value::Null)).as_text(), None);
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", Loaded::callable(|_| Ok(Value::Null))), "Callable(..)");
    }
}
