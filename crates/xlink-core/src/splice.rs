//! Placeholder splicing.

use crate::identifier::placeholder;

/// Rendered inclusions waiting to replace their placeholder markers.
///
/// Markers are replaced in insertion order, every occurrence at once.
/// Content that itself contains a marker inserted *later* is expanded as
/// well; nested inclusion is not supported and callers must not rely on it.
///
/// # Example
///
/// ```
/// use xlink_core::Splice;
///
/// let mut document = r#"<body><link rel="x-include" href="view!nav.html"></body>"#.to_owned();
/// let splice: Splice = [("view!nav.html", "<nav></nav>")].into_iter().collect();
/// splice.apply(&mut document);
///
/// assert_eq!(document, "<body><nav></nav></body>");
/// ```
#[derive(Debug, Default)]
pub struct Splice {
    markers: Vec<(String, String)>,
}

impl Splice {
    /// Queue `content` for the placeholder of `identifier`.
    pub fn insert(&mut self, identifier: &str, content: impl Into<String>) {
        self.markers.push((placeholder(identifier), content.into()));
    }

    /// Replace every queued placeholder in `document`.
    pub fn apply(self, document: &mut String) {
        for (marker, content) in self.markers {
            if document.contains(&marker) {
                *document = document.replace(&marker, &content);
            }
        }
    }
}

impl<I: AsRef<str>, C: Into<String>> FromIterator<(I, C)> for Splice {
    fn from_iter<T: IntoIterator<Item = (I, C)>>(iter: T) -> Self {
        let mut splice = Self::default();
        for (identifier, content) in iter {
            splice.insert(identifier.as_ref(), content);
        }
        splice
    }
}
