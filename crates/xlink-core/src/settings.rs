//! Per-call settings: layered options plus replaceable hooks.

use std::fmt;
use std::sync::Arc;

use xlink_config::{ConfigError, HostConfig, Options};

use crate::classify::{DefaultFilterTag, DefaultProcessTag, FilterTag, ProcessTag};
use crate::condition::{ExpressionCondition, ProcessIf};
use crate::engine::{DefaultParse, Parse};
use crate::scanner::{DefaultFindTag, FindTag};

/// Replaceable engine hooks.
///
/// Each hook defaults to the built-in implementation. Closures with the
/// matching signature implement the hook traits, so hosts can swap a single
/// step without reimplementing the rest.
///
/// # Example
///
/// ```
/// use xlink_core::{AttributeMap, DirectiveKind, Hooks, Settings};
///
/// // Only accept `rel="x-include"`.
/// let hooks = Hooks::default().with_filter_tag(|attrs: &AttributeMap, _: &Settings| {
///     (attrs.get("rel") == Some("x-include") && attrs.non_empty("href").is_some())
///         .then_some(DirectiveKind::Inclusion)
/// });
/// # let _ = hooks;
/// ```
#[derive(Clone)]
pub struct Hooks {
    /// Locates the next directive tag.
    pub find_tag: Arc<dyn FindTag>,
    /// Decides whether a tag is a directive and of which kind.
    pub filter_tag: Arc<dyn FilterTag>,
    /// Classifies a tag into a directive result.
    pub process_tag: Arc<dyn ProcessTag>,
    /// Evaluates `data-if` conditions on inclusions.
    pub process_if: Arc<dyn ProcessIf>,
    /// Drives the whole scan over a document.
    pub parse: Arc<dyn Parse>,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            find_tag: Arc::new(DefaultFindTag),
            filter_tag: Arc::new(DefaultFilterTag),
            process_tag: Arc::new(DefaultProcessTag),
            process_if: Arc::new(ExpressionCondition),
            parse: Arc::new(DefaultParse),
        }
    }
}

impl Hooks {
    /// Replace the tag scanner.
    #[must_use]
    pub fn with_find_tag(mut self, hook: impl FindTag + 'static) -> Self {
        self.find_tag = Arc::new(hook);
        self
    }

    /// Replace the directive filter.
    #[must_use]
    pub fn with_filter_tag(mut self, hook: impl FilterTag + 'static) -> Self {
        self.filter_tag = Arc::new(hook);
        self
    }

    /// Replace the directive classifier.
    #[must_use]
    pub fn with_process_tag(mut self, hook: impl ProcessTag + 'static) -> Self {
        self.process_tag = Arc::new(hook);
        self
    }

    /// Replace the condition evaluator.
    #[must_use]
    pub fn with_process_if(mut self, hook: impl ProcessIf + 'static) -> Self {
        self.process_if = Arc::new(hook);
        self
    }

    /// Replace the parse engine.
    #[must_use]
    pub fn with_parse(mut self, hook: impl Parse + 'static) -> Self {
        self.parse = Arc::new(hook);
        self
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks").finish_non_exhaustive()
    }
}

/// Settings for one resolution call.
///
/// Built fresh per call and never mutated while the call runs.
#[derive(Clone, Debug, Default)]
pub struct Settings {
    /// Layered option values.
    pub options: Options,
    /// Engine hooks.
    pub hooks: Hooks,
}

impl Settings {
    /// Combine options and hooks.
    #[must_use]
    pub fn new(options: Options, hooks: Hooks) -> Self {
        Self { options, hooks }
    }

    /// Layer the current defaults, `host` and a settings `suffix`.
    pub fn layered(
        host: &HostConfig,
        suffix: Option<&str>,
        hooks: Hooks,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(Options::layered(host, suffix)?, hooks))
    }
}
