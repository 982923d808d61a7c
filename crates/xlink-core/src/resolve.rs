//! Phase two: batch loading and placeholder substitution.

use std::collections::HashMap;

use xlink_config::HostConfig;
use xlink_config::suffix::split_resource;
use xlink_loader::{Loaded, Loader};

use crate::engine::ParseOutput;
use crate::identifier::with_extension;
use crate::splice::Splice;
use crate::{Hooks, ResolveError, Settings};

/// Loader used for the base document.
const TEXT_LOADER: &str = "text";

/// Load every dependency of `output` in one batch and splice the rendered
/// inclusions over their placeholders.
///
/// A document without dependencies is returned as-is and the loader is not
/// called.
///
/// # Errors
///
/// Returns [`ResolveError::Load`] if the batch fails,
/// [`ResolveError::MissingValue`] if the loader returns fewer values than
/// requested, or [`ResolveError::Render`] if a callable or executable
/// inclusion fails.
pub async fn substitute<L: Loader>(
    output: ParseOutput,
    loader: &L,
) -> Result<String, ResolveError> {
    let ParseOutput {
        mut resource,
        dependencies,
        inclusions,
    } = output;

    if dependencies.is_empty() {
        return Ok(resource);
    }

    tracing::debug!(count = dependencies.len(), "Loading dependencies");
    let loaded = loader.load(dependencies.as_slice()).await?;

    let values: HashMap<&str, &Loaded> = dependencies.iter().zip(&loaded).collect();
    if let Some(missing) = dependencies.iter().find(|id| !values.contains_key(id)) {
        return Err(ResolveError::MissingValue {
            identifier: missing.to_owned(),
        });
    }

    let Some(inclusions) = inclusions else {
        return Ok(resource);
    };

    let splice = inclusions
        .iter()
        .map(|inclusion| {
            let value = values.get(inclusion.name.as_str()).ok_or_else(|| {
                ResolveError::MissingValue {
                    identifier: inclusion.name.clone(),
                }
            })?;
            let content = value
                .render(inclusion.data.as_ref())
                .map_err(|source| ResolveError::Render {
                    identifier: inclusion.name.clone(),
                    source,
                })?;
            Ok::<_, ResolveError>((inclusion.name.as_str(), content))
        })
        .collect::<Result<Splice, ResolveError>>()?;
    splice.apply(&mut resource);

    Ok(resource)
}

/// Resolve a resource request into its final document.
///
/// `resource` is `name` or `name!key=value;key=value`. Options are layered
/// from the current defaults, `host` and the suffix, then `text!{name}` is
/// fetched (with `defaultExt` appended when `name` has no extension), parsed
/// with the `parse` hook and substituted.
///
/// # Errors
///
/// Returns [`ResolveError`] if options fail to layer, the document or any
/// dependency fails to load, a condition fails to evaluate, or an inclusion
/// fails to render.
pub async fn resolve<L: Loader>(
    resource: &str,
    loader: &L,
    host: &HostConfig,
    hooks: Hooks,
) -> Result<String, ResolveError> {
    let (name, suffix) = split_resource(resource);
    let settings = Settings::layered(host, suffix, hooks)?;

    let identifier = format!(
        "{TEXT_LOADER}!{}",
        with_extension(name, &settings.options.default_ext)
    );
    tracing::debug!(resource, identifier = %identifier, "Resolving resource");

    let loaded = loader.load(std::slice::from_ref(&identifier)).await?;
    let Some(text) = loaded.first() else {
        return Err(ResolveError::MissingValue { identifier });
    };
    let Some(text) = text.as_text() else {
        return Err(ResolveError::NotText { identifier });
    };

    let output = settings.hooks.parse.parse(text, &settings)?;
    substitute(output, loader).await
}

/// Resolve a resource and hand the document to `deliver`.
///
/// `deliver` is called exactly once on success and never on failure.
///
/// # Errors
///
/// Same as [`resolve`].
pub async fn resolve_with<L, F>(
    resource: &str,
    loader: &L,
    host: &HostConfig,
    hooks: Hooks,
    deliver: F,
) -> Result<(), ResolveError>
where
    L: Loader,
    F: FnOnce(String),
{
    let document = resolve(resource, loader, host, hooks).await?;
    deliver(document);
    Ok(())
}

/// Loader, host configuration and hooks bundled for repeated resolution.
///
/// # Example
///
/// ```ignore
/// use xlink_core::Resolver;
/// use xlink_loader::FsLoader;
///
/// let resolver = Resolver::new(FsLoader::new("site"));
/// let page = resolver.resolve("pages/index!cssLoader=less").await?;
/// ```
#[derive(Debug, Default)]
pub struct Resolver<L> {
    loader: L,
    host: HostConfig,
    hooks: Hooks,
}

impl<L: Loader> Resolver<L> {
    /// Create a resolver with empty host configuration and default hooks.
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            host: HostConfig::default(),
            hooks: Hooks::default(),
        }
    }

    /// Set the host configuration layer.
    #[must_use]
    pub fn with_host(mut self, host: HostConfig) -> Self {
        self.host = host;
        self
    }

    /// Set the engine hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// The underlying loader.
    #[must_use]
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Resolve `resource` with the bundled configuration.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`].
    pub async fn resolve(&self, resource: &str) -> Result<String, ResolveError> {
        resolve(resource, &self.loader, &self.host, self.hooks.clone()).await
    }
}
