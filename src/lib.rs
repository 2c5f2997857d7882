//! A chat command plugin that reports metadata about the guild it's used in.

pub mod cache;
pub mod command;
pub mod config;
pub mod consts;
pub mod context;
pub mod embed;
mod error;
pub mod format;
pub mod host;
pub mod model;
pub mod plugin;
pub mod snowflake;

pub use config::Config;
pub use error::Error;
pub use host::Host;
pub use plugin::{Invocation, Plugin, Registry};
pub use snowflake::Snowflake;
