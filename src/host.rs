//! Dispatches command invocations to the loaded plugins.
use std::sync::Arc;

use tracing::debug;

use crate::Error;
use crate::Registry;
use crate::cache::Cache;
use crate::config::Config;
use crate::context::Context;
use crate::embed::Reply;
use crate::plugin::Invocation;

/// Owns the plugins and the context they share.
pub struct Host {
    /// The registry containing all loaded plugins
    registry: Registry,
    /// The shared context for plugins
    context: Context,
}

impl Host {
    /// Creates a new host with the preloaded plugins.
    #[must_use]
    pub fn new(config: Config, cache: Arc<dyn Cache>) -> Self {
        let context = Context::new(cache, config);
        let registry = Registry::preloaded(&context);

        Host { registry, context }
    }

    /// Returns the number of loaded plugins.
    #[must_use]
    pub fn num_plugins(&self) -> usize {
        self.registry.plugins.len()
    }

    /// Dispatches an invocation to each plugin in turn and returns the first reply, if any
    /// plugin's command was triggered.
    ///
    /// # Errors
    ///
    /// Returns the first error a plugin fails with. Plugins after it are not run.
    pub async fn dispatch(&self, invocation: &Invocation) -> Result<Option<Reply>, Error> {
        debug!(?invocation, "dispatching invocation");

        for plugin in &self.registry.plugins {
            if let Some(reply) = plugin.handle_command(&self.context, invocation).await? {
                return Ok(Some(reply));
            }
        }

        Ok(None)
    }
}
