//! Parse engine: one left-to-right pass over the document.
//!
//! Finds directive tags, classifies them, splices their replacement text in
//! place and accumulates the dependency list and inclusion registry. The
//! replacement text is never re-scanned, so inclusion placeholders are not
//! expanded recursively within a pass.

use std::collections::HashSet;

use crate::attrs::AttributeMap;
use crate::classify::Inclusion;
use crate::{ResolveError, Settings};

/// Ordered, deduplicated list of identifiers to load.
///
/// Order is first occurrence in the document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencyList {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl DependencyList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `identifier` unless already present. Returns whether it was
    /// added.
    pub fn push(&mut self, identifier: impl Into<String>) -> bool {
        let identifier = identifier.into();
        if identifier.is_empty() || self.seen.contains(&identifier) {
            return false;
        }
        self.seen.insert(identifier.clone());
        self.order.push(identifier);
        true
    }

    /// Check membership.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.seen.contains(identifier)
    }

    /// Identifiers in first-occurrence order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    /// Number of identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for DependencyList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for identifier in iter {
            list.push(identifier);
        }
        list
    }
}

/// Inclusions found in the document, keyed by identifier.
///
/// The first registration of an identifier wins; later ones with different
/// data are ignored. Iteration follows first-occurrence order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InclusionRegistry {
    entries: Vec<Inclusion>,
    names: HashSet<String>,
}

impl InclusionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an inclusion unless its identifier is already known.
    /// Returns whether it was added.
    pub fn insert(&mut self, inclusion: Inclusion) -> bool {
        if self.names.contains(&inclusion.name) {
            return false;
        }
        self.names.insert(inclusion.name.clone());
        self.entries.push(inclusion);
        true
    }

    /// Look up an inclusion by identifier.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Inclusion> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Iterate in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &Inclusion> {
        self.entries.iter()
    }

    /// Number of inclusions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of the parse phase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOutput {
    /// Rewritten document.
    pub resource: String,
    /// Identifiers to load, first-occurrence order.
    pub dependencies: DependencyList,
    /// Inclusions to substitute; `None` when the document has none.
    pub inclusions: Option<InclusionRegistry>,
}

/// Replaceable parse phase.
///
/// Hosts may swap in a different directive grammar. The only contract is the
/// shape of [`ParseOutput`]: every inclusion's identifier must also be in
/// the dependency list, and the document must contain its placeholder.
pub trait Parse: Send + Sync {
    /// Scan `text` and produce the rewritten document with its dependencies.
    fn parse(&self, text: &str, settings: &Settings) -> Result<ParseOutput, ResolveError>;
}

impl<F> Parse for F
where
    F: Fn(&str, &Settings) -> Result<ParseOutput, ResolveError> + Send + Sync,
{
    fn parse(&self, text: &str, settings: &Settings) -> Result<ParseOutput, ResolveError> {
        self(text, settings)
    }
}

/// Built-in parse engine, driving the configured scanner and classifier.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultParse;

impl Parse for DefaultParse {
    fn parse(&self, text: &str, settings: &Settings) -> Result<ParseOutput, ResolveError> {
        parse(text, settings)
    }
}

/// Run the built-in parse engine over `text`.
///
/// An unterminated tag (no closing `>` before the end of the document)
/// stops the scan and returns what was accumulated so far, unless the
/// `strict` option is set.
///
/// # Example
///
/// ```
/// use xlink_core::{Settings, parse};
///
/// let html = r#"<head><link rel="stylesheet" href="site.css"></head>"#;
/// let output = parse(html, &Settings::default()).unwrap();
///
/// assert_eq!(output.resource, "<head></head>");
/// assert_eq!(output.dependencies.as_slice(), ["css!site.css"]);
/// assert!(output.inclusions.is_none());
/// ```
pub fn parse(text: &str, settings: &Settings) -> Result<ParseOutput, ResolveError> {
    let hooks = &settings.hooks;
    let mut document = text.to_owned();
    let mut cursor = 0;
    let mut dependencies = DependencyList::new();
    let mut inclusions = InclusionRegistry::new();

    while let Some(found) = hooks.find_tag.find_tag(&document, cursor, settings) {
        let Some(close) = document
            .get(found.tag_start..)
            .and_then(|rest| rest.find('>'))
            .map(|offset| found.tag_start + offset)
        else {
            if settings.options.strict {
                return Err(ResolveError::UnterminatedTag {
                    position: found.position,
                });
            }
            tracing::debug!(
                position = found.position,
                "Unterminated directive tag, stopping scan"
            );
            break;
        };

        if close <= found.position {
            cursor = close + 1;
            continue;
        }

        let tag_text = &document[found.position..=close];
        let attrs = AttributeMap::parse(&document[found.tag_start..close]);
        let result = hooks.process_tag.process_tag(tag_text, &attrs, settings)?;

        if let Some(inclusion) = result.inclusion {
            inclusions.insert(inclusion);
        }
        for identifier in result.dependencies {
            dependencies.push(identifier);
        }

        if result.text == tag_text {
            cursor = close + 1;
        } else {
            tracing::trace!(
                tag = %tag_text,
                replacement = %result.text,
                "Rewrote directive tag"
            );
            document.replace_range(found.position..=close, &result.text);
            cursor = found.position + result.text.len();
        }
    }

    tracing::debug!(
        dependencies = dependencies.len(),
        inclusions = inclusions.len(),
        "Parsed directives"
    );

    Ok(ParseOutput {
        resource: document,
        dependencies,
        inclusions: (!inclusions.is_empty()).then_some(inclusions),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Hooks;
    use crate::classify::DirectiveResult;
    use crate::identifier::placeholder;
    use crate::scanner::TagMatch;

    fn run(text: &str) -> ParseOutput {
        parse(text, &Settings::default()).unwrap()
    }

    #[test]
    fn test_no_directives() {
        let html = "<html><body><p>Hello</p></body></html>";
        let output = run(html);
        assert_eq!(output.resource, html);
        assert!(output.dependencies.is_empty());
        assert!(output.inclusions.is_none());
    }

    #[test]
    fn test_style_and_require_removed() {
        let output = run(concat!(
            r#"<head><link rel="stylesheet" href="a.css">"#,
            r#"<x-link rel="require" href="app/main"></head>"#,
        ));
        assert_eq!(output.resource, "<head></head>");
        assert_eq!(output.dependencies.as_slice(), ["css!a.css", "app/main"]);
    }

    #[test]
    fn test_dependency_order_and_dedup() {
        let output = run(concat!(
            r#"<link rel="css" href="b.css">"#,
            r#"<link rel="css" href="a.css">"#,
            r#"<link rel="css" href="css!b.css">"#,
        ));
        assert_eq!(output.dependencies.as_slice(), ["css!b.css", "css!a.css"]);
        assert_eq!(output.resource, "");
    }

    #[test]
    fn test_inclusion_placeholder() {
        let output = run(r#"<div><link rel="x-include" href="parts/head" data-title="Hi"></div>"#);
        assert_eq!(
            output.resource,
            format!("<div>{}</div>", placeholder("view!parts/head.html"))
        );
        let registry = output.inclusions.unwrap();
        let inclusion = registry.get("view!parts/head.html").unwrap();
        assert_eq!(
            inclusion.data.as_ref().and_then(|d| d.get("title")).map(String::as_str),
            Some("Hi")
        );
    }

    #[test]
    fn test_repeated_inclusion_first_data_wins() {
        let output = run(concat!(
            r#"<link rel="include" href="card" data-n="1">"#,
            r#"<link rel="include" href="card" data-n="2">"#,
        ));
        let marker = placeholder("view!card.html");
        assert_eq!(output.resource, format!("{marker}{marker}"));
        assert_eq!(output.dependencies.as_slice(), ["view!card.html"]);

        let registry = output.inclusions.unwrap();
        assert_eq!(registry.len(), 1);
        let data = registry.get("view!card.html").unwrap().data.as_ref().unwrap();
        assert_eq!(data.get("n").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_unrecognized_tags_untouched() {
        let html = r#"<link rel="icon" href="favicon.ico"><link rel="css" href="a.css">"#;
        let output = run(html);
        assert_eq!(output.resource, r#"<link rel="icon" href="favicon.ico">"#);
        assert_eq!(output.dependencies.as_slice(), ["css!a.css"]);
    }

    #[test]
    fn test_condition_false_drops_inclusion() {
        let output = run(r#"<p><link rel="x-include" href="debug" data-if="false"></p>"#);
        assert_eq!(output.resource, "<p></p>");
        assert!(output.dependencies.is_empty());
        assert!(output.inclusions.is_none());
    }

    #[test]
    fn test_condition_error_propagates() {
        let err = parse(
            r#"<link rel="x-include" href="debug" data-if="window.debug">"#,
            &Settings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ResolveError::Condition { .. }));
    }

    #[test]
    fn test_deeply_nested_condition_is_error() {
        let condition = format!("{}true{}", "!(".repeat(5_000), ")".repeat(5_000));
        let html = format!(r#"<link rel="x-include" href="a" data-if="{condition}">"#);
        let err = parse(&html, &Settings::default()).unwrap_err();
        assert!(matches!(err, ResolveError::Condition { .. }));
    }

    #[test]
    fn test_unterminated_tag_stops_scan() {
        let html = r#"<link rel="css" href="a.css"><p>x</p><link rel="stylesheet" href="b.css""#;
        let output = run(html);
        assert_eq!(
            output.resource,
            r#"<p>x</p><link rel="stylesheet" href="b.css""#
        );
        assert_eq!(output.dependencies.as_slice(), ["css!a.css"]);
    }

    #[test]
    fn test_unterminated_tag_strict() {
        let mut settings = Settings::default();
        settings.options.strict = true;
        let err = parse(r#"ab<link rel="stylesheet""#, &settings).unwrap_err();
        assert!(matches!(err, ResolveError::UnterminatedTag { position: 2 }));
    }

    #[test]
    fn test_replacement_not_rescanned() {
        let settings = Settings::new(
            xlink_config::Options::default(),
            Hooks::default().with_process_tag(
                |_tag: &str, _attrs: &AttributeMap, _settings: &Settings| {
                    Ok::<_, ResolveError>(DirectiveResult {
                        dependencies: vec!["x".to_owned()],
                        inclusion: None,
                        text: r#"<link rel="css" href="nested.css">"#.to_owned(),
                    })
                },
            ),
        );
        let output = parse(r#"<link a><link b>"#, &settings).unwrap();
        assert_eq!(
            output.resource,
            r#"<link rel="css" href="nested.css"><link rel="css" href="nested.css">"#
        );
        assert_eq!(output.dependencies.as_slice(), ["x"]);
    }

    #[test]
    fn test_degenerate_match_skipped() {
        // A scanner reporting the `>` itself as the tag start.
        let settings = Settings::new(
            xlink_config::Options::default(),
            Hooks::default().with_find_tag(|text: &str, from: usize, _: &Settings| {
                text.get(from..)?.find('>').map(|i| TagMatch {
                    name: "gt".to_owned(),
                    position: from + i,
                    tag_start: from + i,
                })
            }),
        );
        let output = parse("a>b>c", &settings).unwrap();
        assert_eq!(output.resource, "a>b>c");
        assert!(output.dependencies.is_empty());
    }

    #[test]
    fn test_parse_hook_closure() {
        let hook = |text: &str, _: &Settings| {
            Ok::<_, ResolveError>(ParseOutput {
                resource: text.to_uppercase(),
                dependencies: ["a", "a", "b"].into_iter().collect(),
                inclusions: None,
            })
        };
        let output = hook.parse("abc", &Settings::default()).unwrap();
        assert_eq!(output.resource, "ABC");
        assert_eq!(output.dependencies.as_slice(), ["a", "b"]);
    }

    #[test]
    fn test_dependency_list_skips_empty() {
        let mut list = DependencyList::new();
        assert!(!list.push(""));
        assert!(list.push("a"));
        assert!(!list.push("a"));
        assert!(list.contains("a"));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["a"]);
    }
}
