//! Load error types.

/// Boxed error returned by callables and executables.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Semantic load error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Identifier cannot be mapped to a resource (e.g. escapes the root).
    InvalidIdentifier,
    /// Resource exists but cannot be delivered as text (e.g. not UTF-8).
    Unsupported,
    /// Other/unknown error category.
    Other,
}

/// Load error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct LoadError {
    /// Semantic error category.
    pub kind: LoadErrorKind,
    /// Identifier being loaded (if applicable).
    pub identifier: Option<String>,
    /// Backend identifier (e.g., "Fs", "Memory").
    pub backend: Option<&'static str>,
    source: Option<BoxError>,
}

impl LoadError {
    /// Create a new load error.
    #[must_use]
    pub fn new(kind: LoadErrorKind) -> Self {
        Self {
            kind,
            identifier: None,
            backend: None,
            source: None,
        }
    }

    /// Attach the identifier being loaded.
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Create a not found error for an identifier.
    #[must_use]
    pub fn not_found(identifier: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::NotFound).with_identifier(identifier)
    }

    /// Create a load error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, identifier: impl Into<String>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => LoadErrorKind::NotFound,
            std::io::ErrorKind::InvalidData => LoadErrorKind::Unsupported,
            _ => LoadErrorKind::Other,
        };
        Self::new(kind).with_identifier(identifier).with_source(err)
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: source (identifier: view!a.html)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            LoadErrorKind::NotFound => "Not found",
            LoadErrorKind::InvalidIdentifier => "Invalid identifier",
            LoadErrorKind::Unsupported => "Unsupported",
            LoadErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(identifier) = &self.identifier {
            write!(f, " (identifier: {identifier})")?;
        }

        Ok(())
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}
