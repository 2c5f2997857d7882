//! Snowflake identifiers
//!
//! A snowflake is a 64-bit identifier where the upper 42 bits hold the number of milliseconds
//! since [`DISCORD_EPOCH`] at which the entity was created.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::OffsetDateTime;

use crate::consts::{DISCORD_EPOCH, DISCORD_TIMESTAMP_BITSHIFT};

/// A 64-bit entity identifier that encodes its creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Snowflake(pub u64);

impl Snowflake {
    /// Returns the creation time as milliseconds since the Unix epoch.
    ///
    /// # Example
    ///
    /// ```rust
    /// use serverinfo::Snowflake;
    /// let id = Snowflake(175_928_847_299_117_063);
    /// assert_eq!(id.timestamp_ms(), 1_462_015_105_796);
    /// ```
    #[must_use]
    pub const fn timestamp_ms(self) -> u64 {
        // (u64::MAX >> 22) + epoch is well below u64::MAX, so this can't overflow.
        (self.0 >> DISCORD_TIMESTAMP_BITSHIFT) + DISCORD_EPOCH
    }

    /// Returns the creation time of the entity.
    #[must_use]
    pub fn created_at(self) -> OffsetDateTime {
        let nanos = i128::from(self.timestamp_ms()) * 1_000_000;

        // Every decodable snowflake lands between 2015 and the year ~2154, which is always in
        // range.
        OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
}

impl From<u64> for Snowflake {
    fn from(value: u64) -> Self {
        Snowflake(value)
    }
}

impl FromStr for Snowflake {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Snowflake)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct SnowflakeVisitor;

impl Visitor<'_> for SnowflakeVisitor {
    type Value = Snowflake;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a snowflake as a numeric string or an unsigned integer")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Snowflake(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        u64::try_from(value)
            .map(Snowflake)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        value
            .parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SnowflakeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn decodes_known_timestamp() {
        let id: Snowflake = "175928847299117063".parse().unwrap();

        assert_eq!(id.timestamp_ms(), 1_462_015_105_796);
        assert_eq!(id.created_at(), datetime!(2016-04-30 11:18:25.796 UTC));
    }

    #[test]
    fn zero_decodes_to_epoch() {
        assert_eq!(Snowflake(0).timestamp_ms(), DISCORD_EPOCH);
        assert_eq!(Snowflake(0).created_at(), datetime!(2015-01-01 00:00:00 UTC));
    }

    #[test]
    fn max_value_does_not_overflow() {
        let ms = Snowflake(u64::MAX).timestamp_ms();

        assert_eq!(ms, (u64::MAX >> 22) + DISCORD_EPOCH);
        assert!(Snowflake(u64::MAX).created_at().year() > 2100);
    }

    #[test]
    fn keeps_precision_beyond_f64() {
        // Rounding through f64 would carry into the timestamp bits.
        let id = Snowflake((1 << 60) - 1);

        assert_eq!(id.timestamp_ms(), (1 << 38) - 1 + DISCORD_EPOCH);
    }

    #[test]
    fn deserializes_from_string_or_integer() {
        let from_str: Snowflake = serde_json::from_str("\"175928847299117063\"").unwrap();
        let from_int: Snowflake = serde_json::from_str("175928847299117063").unwrap();

        assert_eq!(from_str, from_int);
        assert!(serde_json::from_str::<Snowflake>("\"nope\"").is_err());
        assert!(serde_json::from_str::<Snowflake>("-1").is_err());
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&Snowflake(42)).unwrap();

        assert_eq!(json, "\"42\"");
    }
}
