//! Error types

use miette::Diagnostic;
use thiserror::Error;

use crate::Snowflake;

/// Errors that can occur while handling a command.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The channel the command was invoked in is not known.
    #[error("Unknown channel {0}")]
    UnknownChannel(Snowflake),
    /// The guild the channel belongs to is not known.
    #[error("Unknown guild {0}")]
    UnknownGuild(Snowflake),
    /// A user that must be shown is not known.
    #[error("Unknown user {0}")]
    UnknownUser(Snowflake),
    /// A cache lookup failed.
    #[error("Lookup failed")]
    Lookup(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Could not read the cache snapshot file.
    #[error("Could not read snapshot {path}")]
    ReadSnapshot {
        /// Path of the snapshot file.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The cache snapshot is malformed.
    #[error("Could not parse snapshot")]
    #[diagnostic(help("the snapshot must be a JSON document with channels, guilds and users"))]
    ParseSnapshot(#[from] serde_path_to_error::Error<serde_json::Error>),
    /// The configuration could not be loaded.
    #[error("Invalid configuration")]
    Config(#[from] Box<figment::Error>),
    /// The configured display offset is out of range.
    #[error("Invalid UTC offset")]
    InvalidOffset(#[from] time::error::ComponentRange),
    /// A timestamp could not be formatted.
    #[error("Could not format timestamp")]
    Format(#[from] time::error::Format),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}
