//! Wire models for the content API.
//!
//! Records are owned by the server and mirrored read-only into view state.
//! Field names follow the API's camelCase JSON.

mod comment;
mod envelope;
mod post;
mod user;

pub use comment::{Comment, NewComment};
pub use envelope::Envelope;
pub use post::{Author, BioBlock, BioChild, Category, Image, ImageFormat, ImageFormats, Post, Tag};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, User};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize a string that the server may send as `null`.
pub(crate) fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

/// Deserialize a list that the server may send as `null` or omit.
pub(crate) fn deserialize_nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

/// Deserialize an optional server timestamp.
///
/// Datetime fields arrive as RFC 3339, date-only fields as `YYYY-MM-DD`
/// (read as midnight UTC). Anything else reads as `None` so one odd record
/// cannot fail a whole list.
pub(crate) fn deserialize_lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(raw.as_str().and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(
            parse_timestamp("2025-01-11T08:00:00.000Z"),
            Some(Utc.with_ymd_and_hms(2025, 1, 11, 8, 0, 0).unwrap())
        );
        assert_eq!(
            parse_timestamp("2025-03-01"),
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
