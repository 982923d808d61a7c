//! In-memory loader for testing.
//!
//! Provides [`MemoryLoader`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::{BoxError, DataMap, Execute, LoadError, Loaded, Loader};

const BACKEND: &str = "Memory";

/// In-memory loader.
///
/// Serves values registered with the builder methods and records every
/// requested batch so tests can assert on batch semantics.
///
/// # Example
///
/// ```ignore
/// use xlink_loader::MemoryLoader;
///
/// let loader = MemoryLoader::new()
///     .with_text("text!index.html", "<p>Home</p>")
///     .with_text("css!site.css", "");
/// assert_eq!(loader.requests().len(), 0);
/// ```
#[derive(Default)]
pub struct MemoryLoader {
    values: RwLock<HashMap<String, Loaded>>,
    requests: RwLock<Vec<Vec<String>>>,
}

impl MemoryLoader {
    /// Create a new empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value for an identifier.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with(self, identifier: impl Into<String>, loaded: Loaded) -> Self {
        self.values
            .write()
            .unwrap()
            .insert(identifier.into(), loaded);
        self
    }

    /// Register a text value.
    #[must_use]
    pub fn with_text(self, identifier: impl Into<String>, text: impl Into<String>) -> Self {
        self.with(identifier, Loaded::text(text))
    }

    /// Register a callable value.
    #[must_use]
    pub fn with_callable<F>(self, identifier: impl Into<String>, f: F) -> Self
    where
        F: Fn(Option<&DataMap>) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.with(identifier, Loaded::callable(f))
    }

    /// Register an executable value.
    #[must_use]
    pub fn with_executable(
        self,
        identifier: impl Into<String>,
        exec: impl Execute + 'static,
    ) -> Self {
        self.with(identifier, Loaded::executable(exec))
    }

    /// Batches requested so far, in request order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.read().unwrap().clone()
    }
}

impl Loader for MemoryLoader {
    async fn load(&self, identifiers: &[String]) -> Result<Vec<Loaded>, LoadError> {
        self.requests.write().unwrap().push(identifiers.to_vec());

        let values = self.values.read().unwrap();
        identifiers
            .iter()
            .map(|id| {
                values
                    .get(id)
                    .cloned()
                    .ok_or_else(|| LoadError::not_found(id).with_backend(BACKEND))
            })
            .collect()
    }
}
