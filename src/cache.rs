//! Lookups into the host application's caches

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::Error;
use crate::Snowflake;
use crate::model::{Channel, Guild, User};

/// Read-only access to the data the host application has cached.
///
/// Each method may fail; a failing lookup fails the whole command that needed it.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Looks up a channel by its id.
    async fn channel(&self, id: Snowflake) -> Result<Option<Channel>, Error>;

    /// Looks up a guild by its id.
    async fn guild(&self, id: Snowflake) -> Result<Option<Guild>, Error>;

    /// Looks up a user by its id.
    async fn user(&self, id: Snowflake) -> Result<Option<User>, Error>;

    /// Returns the ids of the guild members known to the host.
    async fn member_ids(&self, guild_id: Snowflake) -> Result<Vec<Snowflake>, Error>;

    /// Returns the number of members in the guild.
    async fn member_count(&self, guild_id: Snowflake) -> Result<u64, Error>;

    /// Returns whether the given user is a friend of the local user.
    async fn is_friend(&self, user_id: Snowflake) -> Result<bool, Error>;
}

/// The on-disk layout of a [`Snapshot`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SnapshotData {
    channels: Vec<Channel>,
    guilds: Vec<Guild>,
    users: Vec<User>,
    members: HashMap<Snowflake, Vec<Snowflake>>,
    member_counts: HashMap<Snowflake, u64>,
    friends: Vec<Snowflake>,
}

/// An in-memory copy of the host caches.
#[derive(Debug, Default)]
pub struct Snapshot {
    channels: HashMap<Snowflake, Channel>,
    guilds: HashMap<Snowflake, Guild>,
    users: HashMap<Snowflake, User>,
    members: HashMap<Snowflake, Vec<Snowflake>>,
    member_counts: HashMap<Snowflake, u64>,
    friends: HashSet<Snowflake>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Snapshot {
        Snapshot::default()
    }

    /// Parses a snapshot from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseSnapshot`] with the path to the offending value if the document
    /// is malformed.
    pub fn from_json(json: &str) -> Result<Snapshot, Error> {
        let deserializer = &mut serde_json::Deserializer::from_str(json);
        let data: SnapshotData = serde_path_to_error::deserialize(deserializer)?;

        Ok(Snapshot::from(data))
    }

    /// Loads a snapshot from the JSON file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadSnapshot`] if the file can't be read and [`Error::ParseSnapshot`]
    /// if it's malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Snapshot, Error> {
        let path = path.as_ref();

        trace!(?path, "loading snapshot");

        let json = fs::read_to_string(path).map_err(|source| Error::ReadSnapshot {
            path: path.display().to_string(),
            source,
        })?;
        let snapshot = Snapshot::from_json(&json)?;

        debug!(
            ?path,
            channels = snapshot.channels.len(),
            guilds = snapshot.guilds.len(),
            users = snapshot.users.len(),
            "loaded snapshot"
        );

        Ok(snapshot)
    }

    /// Adds or replaces a channel.
    pub fn insert_channel(&mut self, channel: Channel) {
        self.channels.insert(channel.id, channel);
    }

    /// Adds or replaces a guild.
    pub fn insert_guild(&mut self, guild: Guild) {
        self.guilds.insert(guild.id, guild);
    }

    /// Adds or replaces a user.
    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    /// Sets the known members of a guild.
    pub fn set_members(&mut self, guild_id: Snowflake, member_ids: Vec<Snowflake>) {
        self.members.insert(guild_id, member_ids);
    }

    /// Sets the member count of a guild, which may exceed the number of known members.
    pub fn set_member_count(&mut self, guild_id: Snowflake, count: u64) {
        self.member_counts.insert(guild_id, count);
    }

    /// Marks a user as a friend.
    pub fn add_friend(&mut self, user_id: Snowflake) {
        self.friends.insert(user_id);
    }
}

impl From<SnapshotData> for Snapshot {
    fn from(data: SnapshotData) -> Self {
        Snapshot {
            channels: data.channels.into_iter().map(|c| (c.id, c)).collect(),
            guilds: data.guilds.into_iter().map(|g| (g.id, g)).collect(),
            users: data.users.into_iter().map(|u| (u.id, u)).collect(),
            members: data.members,
            member_counts: data.member_counts,
            friends: data.friends.into_iter().collect(),
        }
    }
}

#[async_trait]
impl Cache for Snapshot {
    async fn channel(&self, id: Snowflake) -> Result<Option<Channel>, Error> {
        Ok(self.channels.get(&id).cloned())
    }

    async fn guild(&self, id: Snowflake) -> Result<Option<Guild>, Error> {
        Ok(self.guilds.get(&id).cloned())
    }

    async fn user(&self, id: Snowflake) -> Result<Option<User>, Error> {
        Ok(self.users.get(&id).cloned())
    }

    async fn member_ids(&self, guild_id: Snowflake) -> Result<Vec<Snowflake>, Error> {
        Ok(self.members.get(&guild_id).cloned().unwrap_or_default())
    }

    async fn member_count(&self, guild_id: Snowflake) -> Result<u64, Error> {
        if let Some(count) = self.member_counts.get(&guild_id) {
            return Ok(*count);
        }

        let known = self.members.get(&guild_id).map_or(0, Vec::len);

        Ok(u64::try_from(known).unwrap_or(u64::MAX))
    }

    async fn is_friend(&self, user_id: Snowflake) -> Result<bool, Error> {
        Ok(self.friends.contains(&user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "channels": [{ "id": "10", "guild_id": "20" }, { "id": "11" }],
        "guilds": [{
            "id": "20",
            "name": "Test",
            "owner_id": "30",
            "joined_at": "2020-01-01T00:00:00Z",
            "region": "europe"
        }],
        "users": [{ "id": "30", "username": "owner" }],
        "members": { "20": ["30", "31"] },
        "friends": ["31"]
    }"#;

    #[tokio::test]
    async fn lookups_from_json() {
        let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();

        let channel = snapshot.channel(Snowflake(10)).await.unwrap().unwrap();
        assert_eq!(channel.guild_id, Some(Snowflake(20)));

        let dm = snapshot.channel(Snowflake(11)).await.unwrap().unwrap();
        assert_eq!(dm.guild_id, None);

        assert!(snapshot.guild(Snowflake(20)).await.unwrap().is_some());
        assert!(snapshot.user(Snowflake(99)).await.unwrap().is_none());
        assert!(snapshot.is_friend(Snowflake(31)).await.unwrap());
        assert!(!snapshot.is_friend(Snowflake(30)).await.unwrap());
    }

    #[tokio::test]
    async fn member_count_falls_back_to_known_members() {
        let mut snapshot = Snapshot::from_json(SNAPSHOT).unwrap();

        assert_eq!(snapshot.member_count(Snowflake(20)).await.unwrap(), 2);
        assert_eq!(snapshot.member_count(Snowflake(21)).await.unwrap(), 0);

        snapshot.set_member_count(Snowflake(20), 1500);

        assert_eq!(snapshot.member_count(Snowflake(20)).await.unwrap(), 1500);
    }

    #[test]
    fn parse_error_reports_path() {
        let err = Snapshot::from_json(r#"{ "channels": [{ "id": "nope" }] }"#).unwrap_err();

        match err {
            Error::ParseSnapshot(err) => assert_eq!(err.path().to_string(), "channels[0].id"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
