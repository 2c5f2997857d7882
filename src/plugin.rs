use async_trait::async_trait;
use tracing::debug;

use crate::Error;
use crate::Snowflake;
use crate::context::Context;
use crate::embed::Reply;

/// The name of a plugin.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Name(&'static str);
/// The author of a plugin.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author(&'static str);
/// The version of a plugin.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Version(&'static str);

impl Name {
    /// Returns the name as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Reports metadata about the current guild
#[cfg(feature = "plugin-server-info")]
pub mod server_info;

/// Common includes used in plugins.
#[allow(unused)]
mod prelude {
    pub use super::{Author, Invocation, Name, Plugin, Version};
    pub use crate::Error as PluginError;
    pub use crate::command::Command;
    pub use crate::context::Context;
    pub use crate::embed::Reply;
    pub use async_trait::async_trait;
}

/// A message sent by the local user that may trigger a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The channel the message was sent in.
    pub channel_id: Snowflake,
    /// The message content.
    pub content: String,
}

impl Invocation {
    /// Creates a new invocation.
    pub fn new(channel_id: Snowflake, content: impl Into<String>) -> Invocation {
        Invocation {
            channel_id,
            content: content.into(),
        }
    }
}

/// The base trait that all plugins must implement.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Returns the name of the plugin.
    fn name() -> Name
    where
        Self: Sized;

    /// Returns the author of the plugin.
    fn author() -> Author
    where
        Self: Sized;

    /// Returns the version of the plugin.
    fn version() -> Version
    where
        Self: Sized;

    /// The constructor for a new plugin.
    fn new(context: &Context) -> Self
    where
        Self: Sized;

    /// A short description of what the plugin's command does.
    fn description(&self) -> &'static str {
        ""
    }

    /// Usage string of the plugin's command, where `{c}` stands for the command itself.
    fn usage(&self) -> &'static str {
        "{c}"
    }

    /// Processes a message and returns a reply if the plugin's command was triggered.
    async fn handle_command(
        &self,
        _context: &Context,
        _invocation: &Invocation,
    ) -> Result<Option<Reply>, Error> {
        Ok(None)
    }
}

/// Plugin registry.
#[derive(Default)]
pub struct Registry {
    /// List of loaded plugins.
    pub plugins: Vec<Box<dyn Plugin>>,
}

impl Registry {
    /// Constructs and returns a new, empty plugin registry.
    #[must_use]
    pub fn new() -> Registry {
        Registry { plugins: vec![] }
    }

    /// Constructs and returns a new plugin registry with initialized plugins.
    #[must_use]
    pub fn preloaded(context: &Context) -> Registry {
        let mut registry = Self::new();
        debug!("registering plugins");

        #[cfg(feature = "plugin-server-info")]
        registry.register::<server_info::ServerInfo>(context);

        let num_plugins = registry.plugins.len();
        debug!(%num_plugins, "finished registering plugins");

        registry
    }

    /// Registers a new plugin based on its type.
    pub fn register<P: Plugin + 'static>(&mut self, context: &Context) {
        debug!(name = P::name().as_str(), "registering plugin");

        self.plugins.push(Box::new(P::new(context)));
    }
}
