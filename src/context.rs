use std::sync::Arc;

use crate::Config;
use crate::cache::Cache;

/// Shared context for plugin invocations.
pub struct Context {
    /// Lookups into the host caches.
    pub cache: Arc<dyn Cache>,
    /// The configuration.
    pub config: Config,
}

impl Context {
    /// Creates a new context.
    #[must_use]
    pub fn new(cache: Arc<dyn Cache>, config: Config) -> Self {
        Self { cache, config }
    }
}
