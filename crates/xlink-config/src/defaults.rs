//! Process-wide default options.
//!
//! Every resolution call copies these defaults before layering host config
//! and suffix overrides on top, so reconfiguring them never affects a call
//! that is already running.

use std::sync::{LazyLock, PoisonError, RwLock};

use crate::{ConfigError, Options, SettingValue};

static DEFAULTS: LazyLock<RwLock<Options>> = LazyLock::new(|| RwLock::new(Options::default()));

/// Copy of the current process-wide defaults.
#[must_use]
pub fn defaults() -> Options {
    DEFAULTS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replace one process-wide default.
///
/// The value is type-checked like any other option; the defaults are left
/// unchanged on error.
pub fn replace_default(key: &str, value: SettingValue) -> Result<(), ConfigError> {
    let mut guard = DEFAULTS.write().unwrap_or_else(PoisonError::into_inner);
    let mut updated = guard.clone();
    updated.set(key, value)?;
    tracing::debug!(key, "Replaced default option");
    *guard = updated;
    Ok(())
}

/// Restore the built-in defaults.
pub fn reset_defaults() {
    *DEFAULTS.write().unwrap_or_else(PoisonError::into_inner) = Options::default();
}
