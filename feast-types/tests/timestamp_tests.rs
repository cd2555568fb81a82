use chrono::{DateTime, TimeZone, Utc};
use feast_types::timestamp::{self, format_rfc3339, parse_rfc3339};
use feast_types::Error;
use proptest::prelude::*;
use prost_types::Timestamp;

fn at(secs: i64, nanos: u32) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, nanos).unwrap()
}

// ── Wire conversion ──────────────────────────────────────────────

#[test]
fn to_proto_splits_seconds_and_nanos() {
    let ts = timestamp::to_proto(&at(1_600_000_000, 123_456_789));
    assert_eq!(ts.seconds, 1_600_000_000);
    assert_eq!(ts.nanos, 123_456_789);
}

#[test]
fn from_proto_epoch() {
    let dt = timestamp::from_proto(&Timestamp { seconds: 0, nanos: 0 }).unwrap();
    assert_eq!(dt, at(0, 0));
}

#[test]
fn from_proto_rejects_out_of_range() {
    let ts = Timestamp {
        seconds: i64::MAX,
        nanos: 0,
    };
    let err = timestamp::from_proto(&ts).unwrap_err();
    assert!(matches!(err, Error::InvalidTimestamp(_)));
}

// ── RFC 3339 ─────────────────────────────────────────────────────

#[test]
fn format_whole_seconds() {
    assert_eq!(format_rfc3339(&at(0, 0)), "1970-01-01T00:00:00Z");
}

#[test]
fn format_uses_millis_micros_or_nanos() {
    assert_eq!(
        format_rfc3339(&at(0, 500_000_000)),
        "1970-01-01T00:00:00.500Z"
    );
    assert_eq!(
        format_rfc3339(&at(0, 1_000)),
        "1970-01-01T00:00:00.000001Z"
    );
    assert_eq!(
        format_rfc3339(&at(0, 1)),
        "1970-01-01T00:00:00.000000001Z"
    );
}

#[test]
fn parse_converts_offsets_to_utc() {
    let dt = parse_rfc3339("2021-04-01T12:00:00+02:00").unwrap();
    assert_eq!(format_rfc3339(&dt), "2021-04-01T10:00:00Z");
}

#[test]
fn parse_rejects_garbage() {
    let err = parse_rfc3339("yesterday").unwrap_err();
    assert!(format!("{err}").contains("yesterday"));
}

// ── Properties ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn proto_conversion_is_lossless(secs in 0i64..4_102_444_800, nanos in 0u32..1_000_000_000) {
        let dt = at(secs, nanos);
        prop_assert_eq!(timestamp::from_proto(&timestamp::to_proto(&dt)).unwrap(), dt);
    }

    #[test]
    fn rfc3339_is_lossless(secs in 0i64..4_102_444_800, nanos in 0u32..1_000_000_000) {
        let dt = at(secs, nanos);
        prop_assert_eq!(parse_rfc3339(&format_rfc3339(&dt)).unwrap(), dt);
    }
}
