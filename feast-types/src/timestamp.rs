//! Timestamp conversions for entity metadata.
//!
//! Entities keep their bookkeeping timestamps as `DateTime<Utc>`. The wire
//! format carries them as `google.protobuf.Timestamp` and the dictionary
//! form as RFC 3339 strings with a `Z` suffix and 0, 3, 6 or 9 fractional
//! digits.

use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use prost_types::Timestamp;

/// Largest nanosecond value a normalized wire timestamp may carry.
const MAX_NANOS: u32 = 999_999_999;

/// Converts a UTC datetime into the wire timestamp.
///
/// The wire timestamp cannot represent leap seconds. chrono stores them as
/// nanos of `1_000_000_000` or more, so they are clamped to the last
/// nanosecond of the preceding second instead of rolling into the next one.
#[must_use]
pub fn to_proto(dt: &DateTime<Utc>) -> Timestamp {
    Timestamp {
        seconds: dt.timestamp(),
        nanos: dt.timestamp_subsec_nanos().min(MAX_NANOS) as i32,
    }
}

/// Converts a wire timestamp into a UTC datetime.
///
/// Non-normalized timestamps (nanos outside `0..1_000_000_000`) are
/// normalized first; values outside chrono's range are rejected.
pub fn from_proto(ts: &Timestamp) -> Result<DateTime<Utc>> {
    let mut ts = ts.clone();
    ts.normalize();
    DateTime::from_timestamp(ts.seconds, ts.nanos as u32).ok_or_else(|| {
        Error::InvalidTimestamp(format!("{}s {}ns out of range", ts.seconds, ts.nanos))
    })
}

/// Formats a datetime the way the proto3 JSON mapping does.
#[must_use]
pub fn format_rfc3339(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parses an RFC 3339 string with any offset into UTC.
pub fn parse_rfc3339(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::InvalidTimestamp(format!("{s}: {e}")))
}

/// Serde adapter for `Option<DateTime<Utc>>` fields rendered as RFC 3339.
///
/// Use with `#[serde(default, with = "feast_types::timestamp::rfc3339_option")]`.
pub mod rfc3339_option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&super::format_rfc3339(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<DateTime<Utc>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| super::parse_rfc3339(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
