//! Giveaway model for time-boxed community promotions
//!
//! Timestamps are stored and transmitted as ISO-8601 strings. Active/expired
//! status is derived at read time by comparing `end_date` against the current
//! time as strings, so every stored timestamp must use the canonical
//! fixed-width UTC format produced by [`format_timestamp`] - that is what
//! keeps lexicographic order equal to chronological order.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical timestamp format: fixed-width, zero-padded, always UTC.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Format a date-time in the canonical storage format
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Current time in the canonical storage format
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Parse a client-supplied ISO-8601 date-time string
///
/// Accepts RFC 3339 (with `Z` or a numeric offset), naive date-times with or
/// without fractional seconds, minute-precision date-times, and bare dates.
/// Naive values are interpreted as UTC.
pub fn parse_end_date(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Giveaway record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Giveaway {
    pub id: String,
    pub title: String,
    pub description: String,
    pub prize: String,
    pub end_date: String,
    pub entry_requirement: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Giveaway {
    /// Build a fresh record: assigns a unique id and stamps `created_at`.
    /// `end_date` must already be in the canonical storage format.
    pub fn new(
        title: String,
        description: String,
        prize: String,
        end_date: String,
        entry_requirement: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            prize,
            end_date,
            entry_requirement,
            created_at: now_timestamp(),
            updated_at: None,
        }
    }
}

/// Input for creating or updating a giveaway
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiveawayInput {
    pub title: String,
    pub description: String,
    pub prize: String,
    pub end_date: String,
    pub entry_requirement: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_with_z() {
        let dt = parse_end_date("2030-01-02T03:04:05Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_end_date("2030-01-02T03:04:05+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2030, 1, 2, 1, 4, 5).unwrap());
    }

    #[test]
    fn test_parse_naive_datetime() {
        let dt = parse_end_date("2030-01-02T03:04:05").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap());
    }

    #[test]
    fn test_parse_naive_datetime_with_fraction() {
        let dt = parse_end_date("2030-01-02T03:04:05.123456").unwrap();
        assert_eq!(dt.timestamp_subsec_micros(), 123456);
    }

    #[test]
    fn test_parse_minute_precision() {
        let dt = parse_end_date("2030-01-02T03:04").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 0).unwrap());
    }

    #[test]
    fn test_parse_bare_date() {
        let dt = parse_end_date("2030-01-02").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2030, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_end_date("not-a-date").is_none());
        assert!(parse_end_date("").is_none());
        assert!(parse_end_date("2030-13-40").is_none());
    }

    #[test]
    fn test_format_is_fixed_width() {
        let a = format_timestamp(Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap());
        let b = format_timestamp(Utc.with_ymd_and_hms(2030, 11, 22, 13, 44, 55).unwrap());
        assert_eq!(a.len(), b.len());
        assert_eq!(a, "2030-01-02T03:04:05.000000Z");
    }

    #[test]
    fn test_new_assigns_unique_ids() {
        let mk = || {
            Giveaway::new(
                "t".into(),
                "d".into(),
                "p".into(),
                "2030-01-01T00:00:00.000000Z".into(),
                "e".into(),
            )
        };
        let a = mk();
        let b = mk();
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert!(a.updated_at.is_none());
    }

    #[test]
    fn test_serializes_camel_case_and_skips_absent_updated_at() {
        let g = Giveaway::new(
            "t".into(),
            "d".into(),
            "p".into(),
            "2030-01-01T00:00:00.000000Z".into(),
            "e".into(),
        );
        let json = serde_json::to_value(&g).unwrap();
        assert!(json.get("endDate").is_some());
        assert!(json.get("entryRequirement").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_none());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Lexicographic order of canonical timestamps matches
            /// chronological order.
            #[test]
            fn canonical_format_orders_like_time(a in 0i64..4_000_000_000, b in 0i64..4_000_000_000) {
                let ta = Utc.timestamp_opt(a, 0).unwrap();
                let tb = Utc.timestamp_opt(b, 0).unwrap();
                let sa = format_timestamp(ta);
                let sb = format_timestamp(tb);
                prop_assert_eq!(ta.cmp(&tb), sa.cmp(&sb));
            }

            /// Parsing the canonical format round-trips to the same instant.
            #[test]
            fn canonical_format_parses_back(secs in 0i64..4_000_000_000, micros in 0u32..1_000_000) {
                let dt = Utc.timestamp_opt(secs, micros * 1000).unwrap();
                let parsed = parse_end_date(&format_timestamp(dt)).unwrap();
                prop_assert_eq!(parsed, dt);
            }
        }
    }
}
