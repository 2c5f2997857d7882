/// Milliseconds between the Unix epoch and the first second of 2015, the epoch of snowflake
/// identifiers.
pub const DISCORD_EPOCH: u64 = 1_420_070_400_000;

/// Number of low-order bits in a snowflake that hold the worker, process and sequence numbers.
pub const DISCORD_TIMESTAMP_BITSHIFT: u32 = 22;

/// The size, in pixels, of the guild icon we ask the CDN for.
pub const PREFERRED_ICON_SIZE: u32 = 128;

/// Number of milliseconds in a day.
pub const MS_PER_DAY: u64 = 86_400_000;

/// Base URL of the CDN that serves guild icons.
pub const CDN_BASE_URL: &str = "https://cdn.discordapp.com";

/// Base URL of vanity invite links.
pub const INVITE_BASE_URL: &str = "https://discord.gg";

/// The default prefix that triggers commands.
pub const DEFAULT_COMMAND_PREFIX: &str = ".";
