//! Loading capability abstraction for xlink.
//!
//! The resolution engine never fetches anything itself. It hands batches of
//! identifiers (`loader!path`) to a [`Loader`] supplied by the host and waits
//! for the whole batch before continuing.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Loader`] trait with a single batch `load()` method
//! - [`Loaded`] values: plain JSON values, callables, or [`Execute`] objects
//! - [`FsLoader`] reading identifiers as files under a root directory
//! - [`MemoryLoader`] for testing (behind `mock` feature flag)

mod error;
mod fs;
mod loaded;
#[cfg(feature = "mock")]
mod mock;

use std::future::Future;

pub use error::{BoxError, LoadError, LoadErrorKind};
pub use fs::FsLoader;
pub use loaded::{CallableFn, DataMap, Execute, Loaded};
#[cfg(feature = "mock")]
pub use mock::MemoryLoader;

/// Host capability that fetches resolved values for identifiers.
///
/// Implementations may fetch in any order or in parallel, but must deliver
/// the results in request order, one per identifier. A failure for any
/// identifier fails the whole batch.
pub trait Loader: Send + Sync {
    /// Load every identifier of the batch.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if any identifier cannot be loaded.
    fn load(
        &self,
        identifiers: &[String],
    ) -> impl Future<Output = Result<Vec<Loaded>, LoadError>> + Send;
}
