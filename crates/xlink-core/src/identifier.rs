//! Identifier helpers: loader prefixes, extensions and placeholder markers.

use std::sync::LazyLock;

use regex::Regex;

static LOADER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+!").expect("valid loader prefix regex"));

/// Check whether an identifier already carries a `loader!` prefix.
#[must_use]
pub fn has_loader_prefix(identifier: &str) -> bool {
    LOADER_PREFIX.is_match(identifier)
}

/// Check whether the last path segment of an identifier has an extension.
///
/// ```
/// use xlink_core::identifier::has_extension;
///
/// assert!(has_extension("view!parts/head.html"));
/// assert!(!has_extension("view!parts.v2/head"));
/// assert!(!has_extension("view!parts/.head"));
/// ```
#[must_use]
pub fn has_extension(identifier: &str) -> bool {
    let segment = identifier
        .rsplit(['/', '!'])
        .next()
        .unwrap_or(identifier);
    segment.rfind('.').is_some_and(|dot| dot > 0)
}

/// Append `.ext` unless the identifier already has an extension or `ext` is
/// empty.
#[must_use]
pub fn with_extension(identifier: &str, ext: &str) -> String {
    if ext.is_empty() || has_extension(identifier) {
        identifier.to_owned()
    } else {
        format!("{identifier}.{ext}")
    }
}

/// Prefix `loader!` unless the identifier already has a loader prefix.
#[must_use]
pub fn with_loader(identifier: &str, loader: &str) -> String {
    if has_loader_prefix(identifier) || loader.is_empty() {
        identifier.to_owned()
    } else {
        format!("{loader}!{identifier}")
    }
}

/// The placeholder marker written in place of a surviving inclusion.
///
/// This exact string is the anchor substitution looks for, whatever tag name
/// or loader syntax produced the inclusion.
#[must_use]
pub fn placeholder(identifier: &str) -> String {
    format!(r#"<link rel="x-include" href="{identifier}">"#)
}
