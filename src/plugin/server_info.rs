use futures::future::try_join_all;
use time::{OffsetDateTime, UtcOffset};
use tracing::{debug, warn};

use super::prelude::*;
use crate::Snowflake;
use crate::cache::Cache;
use crate::consts::INVITE_BASE_URL;
use crate::embed::{Embed, Field, Thumbnail};
use crate::format::{ImageFormat, days_ago, icon_url, plural, readable_time};
use crate::model::Guild;

/// The notice shown when the command is used outside of a guild.
pub const NOT_IN_GUILD: &str =
    "You just used the _server info_ command — try it again while in a server!";

/// Shows information about the guild of the channel the command is used in.
pub struct ServerInfo {
    /// The `.serverinfo` command trigger
    command: Command,
    /// Size of the requested icons, in pixels
    icon_size: u32,
    /// Offset at which dates are displayed
    utc_offset: UtcOffset,
}

#[async_trait]
impl Plugin for ServerInfo {
    fn new(context: &Context) -> ServerInfo {
        let config = &context.config.server_info;
        let utc_offset = config.utc_offset().unwrap_or_else(|err| {
            warn!(%err, "invalid utc offset, displaying dates in utc");
            UtcOffset::UTC
        });

        ServerInfo::new(&config.prefix, config.icon_size, utc_offset)
    }

    fn name() -> Name {
        Name("server_info")
    }

    fn author() -> Author {
        Author("Mikkel Kroman <mk@maero.dk>")
    }

    fn version() -> Version {
        Version("0.1")
    }

    fn description(&self) -> &'static str {
        "Get information about the current server."
    }

    async fn handle_command(
        &self,
        context: &Context,
        invocation: &Invocation,
    ) -> Result<Option<Reply>, PluginError> {
        if self.command.parse(&invocation.content).is_none() {
            return Ok(None);
        }

        debug!(channel_id = %invocation.channel_id, "user requested server info");

        let reply = self
            .reply(
                context.cache.as_ref(),
                invocation.channel_id,
                OffsetDateTime::now_utc(),
            )
            .await?;

        Ok(Some(reply))
    }
}

impl ServerInfo {
    /// Creates a new plugin that reacts to `{prefix}serverinfo` and `{prefix}guildinfo`.
    #[must_use]
    pub fn new(prefix: &str, icon_size: u32, utc_offset: UtcOffset) -> ServerInfo {
        ServerInfo {
            command: Command::with_aliases(prefix, "serverinfo", &["guildinfo"]),
            icon_size,
            utc_offset,
        }
    }

    /// Builds the reply for an invocation in the given channel.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::UnknownChannel`] or [`PluginError::UnknownGuild`] if the channel
    /// or its guild isn't cached, or any error a lookup fails with.
    pub async fn reply(
        &self,
        cache: &dyn Cache,
        channel_id: Snowflake,
        now: OffsetDateTime,
    ) -> Result<Reply, PluginError> {
        let channel = cache
            .channel(channel_id)
            .await?
            .ok_or(PluginError::UnknownChannel(channel_id))?;

        let Some(guild_id) = channel.guild_id else {
            debug!(%channel_id, "channel is not in a guild");

            return Ok(Reply::Notice(NOT_IN_GUILD.to_string()));
        };

        let guild = cache
            .guild(guild_id)
            .await?
            .ok_or(PluginError::UnknownGuild(guild_id))?;

        Ok(Reply::Embed(self.build_report(cache, &guild, now).await?))
    }

    /// Builds the report embed for a guild, using `now` for relative dates.
    ///
    /// # Errors
    ///
    /// Returns an error if any lookup fails or a friend of the local user can't be resolved.
    pub async fn build_report(
        &self,
        cache: &dyn Cache,
        guild: &Guild,
        now: OffsetDateTime,
    ) -> Result<Embed, PluginError> {
        let (owner, member_count, friends) = futures::try_join!(
            owner_line(cache, guild),
            cache.member_count(guild.id),
            friend_usernames(cache, guild.id),
        )?;

        let created_at = guild.id.created_at();
        let mut lines = vec![
            format!("ID: **{}**", guild.id),
            format!(
                "Created on **{}**, {}",
                readable_time(created_at, self.utc_offset)?,
                days_ago(now, created_at)
            ),
            format!(
                "You joined on **{}**, {}",
                readable_time(guild.joined_at, self.utc_offset)?,
                days_ago(now, guild.joined_at)
            ),
            format!("**{member_count}** members"),
            boost_line(guild.premium_tier, guild.premium_subscriber_count),
            format!("Voice region **{}**", guild.region),
        ];

        if let Some(code) = &guild.vanity_url_code {
            lines.push(format!("Vanity URL: {INVITE_BASE_URL}/{code}"));
        }

        lines.push(format!("Owned by {owner}"));

        if let Some(icon) = &guild.icon {
            let url = icon_url(guild.id, icon, ImageFormat::Png, self.icon_size);

            lines.push(String::new());
            lines.push(format!("Icon URL: {url}"));
        }

        let mut embed = Embed::rich(&guild.name, lines.join("\n"));
        embed.thumbnail = guild
            .icon
            .as_deref()
            .map(|icon| self.thumbnail(guild.id, icon));
        embed.fields.extend(friends_field(&friends));

        debug!(guild_id = %guild.id, num_friends = friends.len(), "built server info report");

        Ok(embed)
    }

    fn thumbnail(&self, guild_id: Snowflake, icon: &str) -> Thumbnail {
        let url = icon_url(guild_id, icon, ImageFormat::for_icon(icon), self.icon_size);

        Thumbnail {
            proxy_url: url.clone(),
            url,
            width: self.icon_size,
            height: self.icon_size,
        }
    }
}

/// Describes the guild owner, falling back to the raw id when the owner isn't cached.
async fn owner_line(cache: &dyn Cache, guild: &Guild) -> Result<String, PluginError> {
    let line = match cache.user(guild.owner_id).await? {
        Some(owner) => format!("**{}** (<@{}>)", owner.tag(), owner.id),
        None => format!("`{}` (uncached user)", guild.owner_id),
    };

    Ok(line)
}

fn boost_line(tier: u8, subscribers: u32) -> String {
    let boosters = plural(u64::from(subscribers), "booster");

    if tier > 0 {
        format!("Boost tier {tier}, with {boosters}")
    } else if subscribers > 0 {
        format!("{boosters}, no tier yet")
    } else {
        "No boosts".to_string()
    }
}

/// Returns the usernames of the local user's friends in the guild, sorted case-insensitively.
async fn friend_usernames(
    cache: &dyn Cache,
    guild_id: Snowflake,
) -> Result<Vec<String>, PluginError> {
    let member_ids = cache.member_ids(guild_id).await?;
    let lookups = member_ids
        .into_iter()
        .map(|id| friend_username(cache, id));

    let mut usernames: Vec<String> = try_join_all(lookups).await?.into_iter().flatten().collect();
    sort_usernames(&mut usernames);

    Ok(usernames)
}

/// Returns the username of `user_id` if they're a friend of the local user.
async fn friend_username(
    cache: &dyn Cache,
    user_id: Snowflake,
) -> Result<Option<String>, PluginError> {
    if !cache.is_friend(user_id).await? {
        return Ok(None);
    }

    match cache.user(user_id).await? {
        Some(user) => Ok(Some(user.username)),
        None => Err(PluginError::UnknownUser(user_id)),
    }
}

fn sort_usernames(usernames: &mut [String]) {
    usernames.sort_by_cached_key(|name| name.to_lowercase());
}

fn friends_field(usernames: &[String]) -> Option<Field> {
    (!usernames.is_empty()).then(|| Field {
        name: format!("Friends in this server ({})", usernames.len()),
        value: usernames.join(", "),
    })
}
