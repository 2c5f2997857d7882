//! Text formatting helpers for guild reports

use std::fmt;

use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::Snowflake;
use crate::consts::{CDN_BASE_URL, MS_PER_DAY};

/// Image formats the CDN can serve icons in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Static PNG image.
    Png,
    /// Animated GIF image.
    Gif,
}

impl ImageFormat {
    /// Returns the format that preserves the given icon, which is [`ImageFormat::Gif`] for
    /// animated icons and [`ImageFormat::Png`] for anything else.
    #[must_use]
    pub fn for_icon(icon: &str) -> ImageFormat {
        if icon.starts_with("a_") {
            ImageFormat::Gif
        } else {
            ImageFormat::Png
        }
    }

    /// Returns the file extension of the format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Returns the CDN url of a guild icon.
#[must_use]
pub fn icon_url(id: Snowflake, icon: &str, format: ImageFormat, size: u32) -> String {
    format!("{CDN_BASE_URL}/icons/{id}/{icon}.{format}?size={size}")
}

/// Formats `count` followed by `thing`, pluralized unless `count` is exactly one.
///
/// # Example
///
/// ```rust
/// use serverinfo::format::plural;
/// assert_eq!(plural(1, "day"), "1 day");
/// assert_eq!(plural(0, "day"), "0 days");
/// ```
#[must_use]
pub fn plural(count: u64, thing: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };

    format!("{count} {thing}{suffix}")
}

/// Describes how many whole days lie between `now` and `target`, e.g. `"3 days ago"`.
#[must_use]
pub fn days_ago(now: OffsetDateTime, target: OffsetDateTime) -> String {
    let difference = (now - target).whole_milliseconds().unsigned_abs();
    let days = u64::try_from(difference / u128::from(MS_PER_DAY)).unwrap_or(u64::MAX);

    if days == 0 {
        "today".to_string()
    } else if target < now {
        format!("{} ago", plural(days, "day"))
    } else {
        format!("in {}", plural(days, "day"))
    }
}

/// Formats a point in time as e.g. `Sat Apr 30 2016 @ 11:18:25` at the given offset.
///
/// # Errors
///
/// Returns an error if the date can't be formatted, which only happens for dates outside
/// the representable range.
pub fn readable_time(
    at: OffsetDateTime,
    offset: UtcOffset,
) -> Result<String, time::error::Format> {
    let description = format_description!(
        "[weekday repr:short] [month repr:short] [day] [year] @ [hour]:[minute]:[second]"
    );

    at.to_offset(offset).format(description)
}

#[cfg(test)]
mod tests {
    use time::Duration;
    use time::macros::{datetime, offset};

    use super::*;

    #[test]
    fn plural_uses_singular_only_for_one() {
        assert_eq!(plural(1, "day"), "1 day");
        assert_eq!(plural(0, "day"), "0 days");
        assert_eq!(plural(5, "booster"), "5 boosters");
    }

    #[test]
    fn days_ago_today() {
        let now = datetime!(2024-06-01 12:00 UTC);

        assert_eq!(days_ago(now, now), "today");
        assert_eq!(days_ago(now, now - Duration::hours(23)), "today");
        assert_eq!(days_ago(now, now + Duration::hours(23)), "today");
    }

    #[test]
    fn days_ago_past() {
        let now = datetime!(2024-06-01 12:00 UTC);

        assert_eq!(days_ago(now, now - Duration::days(3)), "3 days ago");
        assert_eq!(days_ago(now, now - Duration::hours(25)), "1 day ago");
    }

    #[test]
    fn days_ago_future() {
        let now = datetime!(2024-06-01 12:00 UTC);

        assert_eq!(days_ago(now, now + Duration::days(1)), "in 1 day");
        assert_eq!(days_ago(now, now + Duration::days(10)), "in 10 days");
    }

    #[test]
    fn icon_format_follows_animation_marker() {
        assert_eq!(ImageFormat::for_icon("a_abc123"), ImageFormat::Gif);
        assert_eq!(ImageFormat::for_icon("abc123"), ImageFormat::Png);
        assert_eq!(ImageFormat::for_icon("ba_c"), ImageFormat::Png);
    }

    #[test]
    fn icon_url_shape() {
        let url = icon_url(Snowflake(42), "a_abc123", ImageFormat::Gif, 128);

        assert_eq!(url, "https://cdn.discordapp.com/icons/42/a_abc123.gif?size=128");
    }

    #[test]
    fn readable_time_format() {
        let at = datetime!(2016-04-30 11:18:25.796 UTC);

        assert_eq!(
            readable_time(at, UtcOffset::UTC).unwrap(),
            "Sat Apr 30 2016 @ 11:18:25"
        );
        assert_eq!(
            readable_time(at, offset!(+2)).unwrap(),
            "Sat Apr 30 2016 @ 13:18:25"
        );
    }

    #[test]
    fn readable_time_pads_day() {
        let at = datetime!(2021-03-04 01:02:03 UTC);

        assert_eq!(
            readable_time(at, UtcOffset::UTC).unwrap(),
            "Thu Mar 04 2021 @ 01:02:03"
        );
    }
}
