//! Directive tag resolution for HTML-like resources.
//!
//! A resource is scanned for `<link>`-style directive tags. Stylesheet and
//! require directives are removed and become dependencies; include
//! directives are replaced by placeholder markers. All dependencies are then
//! loaded in one batch through a host [`Loader`](xlink_loader::Loader) and
//! the rendered inclusions are spliced over their placeholders.
//!
//! # Architecture
//!
//! Resolution runs in two phases:
//!
//! 1. **Parse** (synchronous): [`FindTag`] locates tags, [`FilterTag`] and
//!    [`ProcessTag`] classify them, [`ProcessIf`] evaluates `data-if`
//!    conditions. The result is a [`ParseOutput`].
//! 2. **Substitute** (async): one batch load of every dependency, then
//!    placeholder replacement via [`Splice`].
//!
//! Every step is a hook in [`Hooks`] and can be replaced by the host.
//!
//! # Example
//!
//! ```
//! use xlink_core::{Settings, parse};
//!
//! let html = r#"<body><link rel="x-include" href="nav"><link rel="css" href="a.css"></body>"#;
//! let output = parse(html, &Settings::default()).unwrap();
//!
//! assert_eq!(
//!     output.resource,
//!     r#"<body><link rel="x-include" href="view!nav.html"></body>"#
//! );
//! assert_eq!(output.dependencies.as_slice(), ["view!nav.html", "css!a.css"]);
//! ```

mod attrs;
mod classify;
mod condition;
mod engine;
mod error;
pub mod identifier;
mod resolve;
mod scanner;
mod settings;
mod splice;

pub use attrs::{AttributeMap, DATA_PREFIX};
pub use classify::{
    CONDITION_ATTR, DefaultFilterTag, DefaultProcessTag, DirectiveKind, DirectiveResult,
    FilterTag, Inclusion, ProcessTag, resolve_identifier,
};
pub use condition::{AlwaysInclude, ConditionContext, ExpressionCondition, ProcessIf, evaluate};
pub use engine::{DefaultParse, DependencyList, InclusionRegistry, Parse, ParseOutput, parse};
pub use error::ResolveError;
pub use resolve::{Resolver, resolve, resolve_with, substitute};
pub use scanner::{DefaultFindTag, FindTag, TagMatch};
pub use settings::{Hooks, Settings};
pub use splice::Splice;
