//! Resolution error types.

use xlink_config::ConfigError;
use xlink_loader::{BoxError, LoadError};

/// Error raised by a resolution call.
///
/// Any of these aborts the call; no partial document is delivered.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Option layering failed.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// The loader failed to deliver the batch.
    #[error("{0}")]
    Load(#[from] LoadError),

    /// A `data-if` expression could not be evaluated.
    #[error("Invalid condition `{expression}`: {message}")]
    Condition {
        /// The condition text.
        expression: String,
        /// What went wrong.
        message: String,
    },

    /// A callable or executable inclusion failed while rendering.
    #[error("Failed to render inclusion {identifier}: {source}")]
    Render {
        /// Inclusion identifier.
        identifier: String,
        /// Error returned by the inclusion.
        source: BoxError,
    },

    /// The loader delivered no value for an identifier.
    #[error("No value loaded for {identifier}")]
    MissingValue {
        /// Identifier without a value.
        identifier: String,
    },

    /// The base document did not load as text.
    #[error("Resource {identifier} did not load as text")]
    NotText {
        /// Text identifier of the base document.
        identifier: String,
    },

    /// A directive tag has no closing `>` (strict mode only).
    #[error("Unterminated directive tag at byte {position}")]
    UnterminatedTag {
        /// Byte offset of the tag's `<`.
        position: usize,
    },
}

impl ResolveError {
    pub(crate) fn condition(expression: &str, message: impl Into<String>) -> Self {
        Self::Condition {
            expression: expression.to_owned(),
            message: message.into(),
        }
    }
}
