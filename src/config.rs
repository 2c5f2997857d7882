use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Data, Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use time::UtcOffset;
use tracing::trace;

use crate::Error;
use crate::consts::{DEFAULT_COMMAND_PREFIX, PREFERRED_ICON_SIZE};

/// Prefix of the environment variables that override configuration values.
pub const ENV_PREFIX: &str = "SERVERINFO_";

/// The complete configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Tracing configuration
    #[serde(default)]
    pub tracing: TracingConfig,
    /// Server info command configuration
    #[serde(default)]
    pub server_info: ServerInfoConfig,
    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Loads the configuration from the defaults, then the TOML file at `path` if it exists,
    /// then `SERVERINFO_` prefixed environment variables, with `__` separating nested keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a provider fails or the merged values don't match the
    /// expected layout.
    pub fn load(path: impl AsRef<Path>) -> Result<Config, Error> {
        let path = path.as_ref();

        trace!(?path, "loading config");

        Config::figment(Toml::file(path))
            .extract()
            .map_err(Error::from)
    }

    /// Returns the layered configuration with `file` merged on top of the defaults.
    fn figment(file: Data<Toml>) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(file)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TracingConfig {
    /// Enable exporting spans over OTLP
    #[serde(default)]
    pub enabled: bool,
    /// Format of the log lines written to stderr
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Output format of log lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Multi-line, human readable
    Pretty,
    /// Single-line, human readable
    Compact,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerInfoConfig {
    /// The prefix that triggers the command
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Size of the requested icon, in pixels
    #[serde(default = "default_icon_size")]
    pub icon_size: u32,
    /// Offset from UTC at which dates are displayed, in minutes
    #[serde(default)]
    pub utc_offset_minutes: i16,
}

impl ServerInfoConfig {
    /// Returns the offset at which dates are displayed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOffset`] if the offset is 26 hours or more.
    pub fn utc_offset(&self) -> Result<UtcOffset, Error> {
        let seconds = i32::from(self.utc_offset_minutes) * 60;

        Ok(UtcOffset::from_whole_seconds(seconds)?)
    }
}

impl Default for ServerInfoConfig {
    fn default() -> Self {
        ServerInfoConfig {
            prefix: default_prefix(),
            icon_size: default_icon_size(),
            utc_offset_minutes: 0,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Path to a JSON snapshot of the host caches
    pub snapshot: Option<PathBuf>,
}

#[must_use]
pub fn default_prefix() -> String {
    DEFAULT_COMMAND_PREFIX.to_string()
}

#[must_use]
pub const fn default_icon_size() -> u32 {
    PREFERRED_ICON_SIZE
}
