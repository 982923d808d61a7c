//! Directive classification.
//!
//! Turns one tag and its attributes into a [`DirectiveResult`]: which
//! identifiers it depends on, whether it is an inclusion, and what text
//! replaces the tag in the document.

use xlink_loader::DataMap;

use crate::attrs::AttributeMap;
use crate::condition::ConditionContext;
use crate::identifier::{has_loader_prefix, placeholder, with_extension, with_loader};
use crate::{ResolveError, Settings};

/// Attribute holding an inclusion's condition.
pub const CONDITION_ATTR: &str = "data-if";

/// Directive kind, decided from the `rel` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// `rel="stylesheet"` / `rel="css"`: load through the CSS loader.
    Style,
    /// `rel="require"` / `rel="x-require"`: plain dependency.
    Dependency,
    /// `rel="include"` / `rel="x-include"`: content spliced into the document.
    Inclusion,
}

impl DirectiveKind {
    /// Map a `rel` value (case-insensitive) to a kind.
    #[must_use]
    pub fn from_rel(rel: &str) -> Option<Self> {
        match rel.to_ascii_lowercase().as_str() {
            "stylesheet" | "css" => Some(Self::Style),
            "require" | "x-require" => Some(Self::Dependency),
            "include" | "x-include" => Some(Self::Inclusion),
            _ => None,
        }
    }
}

/// Inclusion metadata recorded for phase-2 substitution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inclusion {
    /// Resolved identifier; also the inclusion's dependency.
    pub name: String,
    /// `data-*` payload handed to callables and executables.
    pub data: Option<DataMap>,
}

/// Outcome of classifying one tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectiveResult {
    /// Identifiers to load (non-empty strings).
    pub dependencies: Vec<String>,
    /// Inclusion to register, if any.
    pub inclusion: Option<Inclusion>,
    /// Text replacing the tag span; empty deletes the tag.
    pub text: String,
}

impl DirectiveResult {
    /// Leave the tag exactly as it was.
    #[must_use]
    pub fn unchanged(tag_text: &str) -> Self {
        Self {
            dependencies: Vec::new(),
            inclusion: None,
            text: tag_text.to_owned(),
        }
    }

    /// Delete the tag without recording anything.
    #[must_use]
    pub fn removed() -> Self {
        Self {
            dependencies: Vec::new(),
            inclusion: None,
            text: String::new(),
        }
    }

    /// Delete the tag and depend on `identifier`.
    #[must_use]
    pub fn dependency(identifier: String) -> Self {
        Self {
            dependencies: vec![identifier],
            inclusion: None,
            text: String::new(),
        }
    }

    /// Replace the tag with its placeholder and register the inclusion.
    #[must_use]
    pub fn inclusion(identifier: String, data: Option<DataMap>) -> Self {
        Self {
            text: placeholder(&identifier),
            dependencies: vec![identifier.clone()],
            inclusion: Some(Inclusion {
                name: identifier,
                data,
            }),
        }
    }
}

/// Decides whether a tag is a directive, and of which kind.
pub trait FilterTag: Send + Sync {
    /// Return the directive kind, or `None` to leave the tag untouched.
    fn filter_tag(&self, attrs: &AttributeMap, settings: &Settings) -> Option<DirectiveKind>;
}

impl<F> FilterTag for F
where
    F: Fn(&AttributeMap, &Settings) -> Option<DirectiveKind> + Send + Sync,
{
    fn filter_tag(&self, attrs: &AttributeMap, settings: &Settings) -> Option<DirectiveKind> {
        self(attrs, settings)
    }
}

/// Built-in filter: a non-empty `href` and a recognized `rel`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFilterTag;

impl FilterTag for DefaultFilterTag {
    fn filter_tag(&self, attrs: &AttributeMap, _settings: &Settings) -> Option<DirectiveKind> {
        attrs.non_empty("href")?;
        DirectiveKind::from_rel(attrs.get("rel")?)
    }
}

/// Classifies a tag into a [`DirectiveResult`].
pub trait ProcessTag: Send + Sync {
    /// Classify `tag_text` (the full `<...>` span) with its parsed attributes.
    fn process_tag(
        &self,
        tag_text: &str,
        attrs: &AttributeMap,
        settings: &Settings,
    ) -> Result<DirectiveResult, ResolveError>;
}

impl<F> ProcessTag for F
where
    F: Fn(&str, &AttributeMap, &Settings) -> Result<DirectiveResult, ResolveError> + Send + Sync,
{
    fn process_tag(
        &self,
        tag_text: &str,
        attrs: &AttributeMap,
        settings: &Settings,
    ) -> Result<DirectiveResult, ResolveError> {
        self(tag_text, attrs, settings)
    }
}

/// Built-in classifier.
///
/// Uses the configured [`FilterTag`] and, for conditional inclusions, the
/// configured [`ProcessIf`](crate::condition::ProcessIf).
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultProcessTag;

impl ProcessTag for DefaultProcessTag {
    fn process_tag(
        &self,
        tag_text: &str,
        attrs: &AttributeMap,
        settings: &Settings,
    ) -> Result<DirectiveResult, ResolveError> {
        let Some(kind) = settings.hooks.filter_tag.filter_tag(attrs, settings) else {
            return Ok(DirectiveResult::unchanged(tag_text));
        };
        let Some(href) = attrs.non_empty("href") else {
            return Ok(DirectiveResult::unchanged(tag_text));
        };

        let identifier = resolve_identifier(kind, href, attrs, settings);

        if kind != DirectiveKind::Inclusion {
            return Ok(DirectiveResult::dependency(identifier));
        }

        if let Some(condition) = attrs.get(CONDITION_ATTR) {
            let ctx = ConditionContext {
                condition,
                attrs,
                resource_name: &identifier,
                tag_text,
                settings,
            };
            if !settings.hooks.process_if.should_include(&ctx)? {
                tracing::debug!(
                    identifier = %identifier,
                    condition,
                    "Inclusion dropped by condition"
                );
                return Ok(DirectiveResult::removed());
            }
        }

        Ok(DirectiveResult::inclusion(identifier, attrs.data()))
    }
}

/// Compute the identifier a directive loads.
///
/// An `href` with an explicit `loader!` prefix is kept; otherwise the
/// kind's loader is prepended. Inclusions also get the default inclusion
/// extension when their last segment has none.
#[must_use]
pub fn resolve_identifier(
    kind: DirectiveKind,
    href: &str,
    attrs: &AttributeMap,
    settings: &Settings,
) -> String {
    let options = &settings.options;
    let explicit = has_loader_prefix(href);
    let type_loader = attrs.non_empty("type");

    match kind {
        DirectiveKind::Style => with_loader(href, &options.css_loader),
        DirectiveKind::Dependency => match type_loader {
            Some(loader) if !explicit => with_loader(href, loader),
            _ => href.to_owned(),
        },
        DirectiveKind::Inclusion => {
            let loader = type_loader.unwrap_or(&options.inclusion_loader);
            let identifier = with_loader(href, loader);
            with_extension(&identifier, &options.default_inclusion_ext)
        }
    }
}
