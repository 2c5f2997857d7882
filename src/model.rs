//! Read-only records owned by the host application

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Snowflake;

/// A guild, as seen by the local user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Guild {
    /// The guild id.
    pub id: Snowflake,
    /// The display name.
    pub name: String,
    /// The icon hash, prefixed with `a_` when animated.
    #[serde(default)]
    pub icon: Option<String>,
    /// The id of the user that owns the guild.
    pub owner_id: Snowflake,
    /// When the local user joined the guild.
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
    /// The premium tier unlocked by boosts, 0 when none.
    #[serde(default)]
    pub premium_tier: u8,
    /// The number of users currently boosting the guild.
    #[serde(default)]
    pub premium_subscriber_count: u32,
    /// The vanity invite code, if the guild has one.
    #[serde(default)]
    pub vanity_url_code: Option<String>,
    /// The voice region.
    pub region: String,
}

/// A user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    /// The user id.
    pub id: Snowflake,
    /// The username.
    pub username: String,
    /// The four-digit discriminator, absent or `"0"` for accounts that migrated to unique
    /// usernames.
    #[serde(default)]
    pub discriminator: Option<String>,
}

impl User {
    /// Returns the user's tag, e.g. `name#1234`.
    #[must_use]
    pub fn tag(&self) -> String {
        match self.discriminator.as_deref() {
            Some(discriminator) if discriminator != "0" => {
                format!("{}#{discriminator}", self.username)
            }
            _ => self.username.clone(),
        }
    }
}

/// A text channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Channel {
    /// The channel id.
    pub id: Snowflake,
    /// The guild the channel belongs to, `None` for direct messages.
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
}
