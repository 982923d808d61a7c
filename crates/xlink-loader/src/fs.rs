//! Filesystem loader.

use std::path::{Component, Path, PathBuf};

use crate::{LoadError, LoadErrorKind, Loaded, Loader};

const BACKEND: &str = "Fs";

/// Loader backed by a directory on disk.
///
/// The loader prefix of an identifier (`view!`, `text!`, `css!`, ...) is
/// stripped and the remaining path is read as UTF-8 text relative to the
/// root. Every identifier is delivered as a plain text value, so inclusions
/// are spliced in verbatim.
///
/// # Example
///
/// ```no_run
/// use xlink_loader::{FsLoader, Loader};
///
/// # async fn example() -> Result<(), xlink_loader::LoadError> {
/// let loader = FsLoader::new("templates");
/// let loaded = loader.load(&["view!parts/head.html".to_owned()]).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    /// Create a loader rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an identifier to a file path under the root.
    ///
    /// Rejects absolute paths and `..` components.
    fn file_path(&self, identifier: &str) -> Result<PathBuf, LoadError> {
        let relative = strip_loader(identifier);
        let path = Path::new(relative);
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if relative.is_empty() || escapes {
            return Err(LoadError::new(LoadErrorKind::InvalidIdentifier)
                .with_identifier(identifier)
                .with_backend(BACKEND));
        }
        Ok(self.root.join(path))
    }
}

/// Strip a `loader!` prefix, if any.
fn strip_loader(identifier: &str) -> &str {
    match identifier.split_once('!') {
        Some((prefix, rest)) if is_loader_name(prefix) => rest,
        _ => identifier,
    }
}

fn is_loader_name(prefix: &str) -> bool {
    !prefix.is_empty() && prefix.chars().all(|c| c.is_alphanumeric() || c == '_')
}

impl Loader for FsLoader {
    async fn load(&self, identifiers: &[String]) -> Result<Vec<Loaded>, LoadError> {
        let mut loaded = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            let path = self.file_path(identifier)?;
            tracing::debug!(identifier = %identifier, path = %path.display(), "Reading resource");
            let text = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| LoadError::io(e, identifier.as_str()).with_backend(BACKEND))?;
            loaded.push(Loaded::text(text));
        }
        Ok(loaded)
    }
}
