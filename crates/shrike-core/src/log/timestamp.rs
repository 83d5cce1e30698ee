use chrono::{DateTime, NaiveDateTime};
use csv::StringRecord;
use lazy_static::lazy_static;
use regex::Regex;

use super::schema::{Field, SchemaMap};

lazy_static! {
    static ref DATE_HEADER_RE: Regex = Regex::new(r"(?im)^date:[ \t]*(.+)$").unwrap();
}

/// Ordered vocabulary of accepted timestamp formats.
///
/// Exports from different hosts emit the primary time column in different
/// locales, so parsing tries each format in order and keeps the first
/// success. RFC 2822 is the trailing member of the vocabulary because that
/// is what `Date:` response headers carry.
#[derive(Debug, Clone)]
pub struct TimestampFormats {
    formats: Vec<String>,
    rfc2822: bool,
}

impl Default for TimestampFormats {
    fn default() -> Self {
        Self {
            formats: vec![
                "%m/%d/%Y %I:%M:%S %p".to_string(),
                "%Y-%m-%d %H:%M:%S".to_string(),
                "%Y/%m/%d %H:%M:%S".to_string(),
            ],
            rfc2822: true,
        }
    }
}

impl TimestampFormats {
    /// Build a vocabulary from explicit `chrono` format strings. RFC 2822
    /// stays in the vocabulary as the trailing member.
    pub fn new(formats: Vec<String>) -> Self {
        Self {
            formats,
            rfc2822: true,
        }
    }

    /// Parse a candidate string against the vocabulary; first match wins.
    pub fn parse(&self, value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        for format in &self.formats {
            if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
                return Some(ts);
            }
        }

        if self.rfc2822 {
            if let Ok(ts) = DateTime::parse_from_rfc2822(value) {
                // Offset-aware values are stored naive at their UTC wall clock.
                return Some(ts.naive_utc());
            }
        }

        None
    }
}

/// Extract the value of the `Date:` line from a raw response-header blob.
fn date_header_value(headers: &str) -> Option<&str> {
    DATE_HEADER_RE
        .captures(headers)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Resolve a canonical timestamp for one raw row.
///
/// Strategies run in order and stop at the first success:
/// 1. the primary time column, parsed against the format vocabulary;
/// 2. a `Date:` header recovered from the response-header blob, parsed
///    against the same vocabulary.
///
/// Primary time columns in exported logs are frequently blank, truncated, or
/// locale-mismatched; the response header is a lower-confidence source
/// consulted only after the primary fails, never merged with it. `None`
/// means the row has no resolvable timestamp and must be dropped.
pub fn resolve(
    row: &StringRecord,
    schema: &SchemaMap,
    formats: &TimestampFormats,
) -> Option<NaiveDateTime> {
    if let Some(ts) = schema
        .cell(row, Field::RequestTime)
        .and_then(|value| formats.parse(value))
    {
        return Some(ts);
    }

    schema
        .cell(row, Field::ResponseHeaders)
        .and_then(date_header_value)
        .and_then(|value| formats.parse(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::schema;
    use chrono::NaiveDate;

    fn schema_and_row(header: &[&str], cells: &[&str]) -> (SchemaMap, StringRecord) {
        let detection = schema::detect(&StringRecord::from(header.to_vec()));
        assert!(detection.has_header);
        (detection.schema, StringRecord::from(cells.to_vec()))
    }

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_primary_field_us_locale() {
        let (schema, row) = schema_and_row(
            &["Request.Time", "Request.URL"],
            &["07/22/2025 10:30:00 AM", "https://x.test/"],
        );

        let resolved = resolve(&row, &schema, &TimestampFormats::default());
        assert_eq!(resolved, Some(ts(2025, 7, 22, 10, 30, 0)));
    }

    #[test]
    fn test_primary_field_iso_like_format() {
        let (schema, row) = schema_and_row(
            &["Time", "URL"],
            &["2025-07-22 10:00:00", "https://x.test/a.js"],
        );

        let resolved = resolve(&row, &schema, &TimestampFormats::default());
        assert_eq!(resolved, Some(ts(2025, 7, 22, 10, 0, 0)));
    }

    #[test]
    fn test_fallback_to_date_header() {
        let (schema, row) = schema_and_row(
            &["Request.Time", "Request.URL", "Response.Headers"],
            &[
                "",
                "https://x.test/",
                "HTTP/1.1 200 OK\nServer: nginx\nDate: Wed, 23 Jul 2025 14:00:00 GMT\n",
            ],
        );

        let resolved = resolve(&row, &schema, &TimestampFormats::default());
        assert_eq!(resolved, Some(ts(2025, 7, 23, 14, 0, 0)));
    }

    #[test]
    fn test_primary_wins_over_fallback() {
        let (schema, row) = schema_and_row(
            &["Request.Time", "Response.Headers", "Request.URL"],
            &[
                "07/01/2025 09:00:00 AM",
                "Date: Wed, 23 Jul 2025 14:00:00 GMT",
                "https://x.test/",
            ],
        );

        let resolved = resolve(&row, &schema, &TimestampFormats::default());
        assert_eq!(resolved, Some(ts(2025, 7, 1, 9, 0, 0)));
    }

    #[test]
    fn test_unparsable_primary_falls_back() {
        let (schema, row) = schema_and_row(
            &["Request.Time", "Response.Headers", "Request.URL"],
            &[
                "not a timestamp",
                "date: Tue, 01 Jul 2025 08:15:30 +0200",
                "https://x.test/",
            ],
        );

        // +0200 offset normalizes to 06:15:30 UTC.
        let resolved = resolve(&row, &schema, &TimestampFormats::default());
        assert_eq!(resolved, Some(ts(2025, 7, 1, 6, 15, 30)));
    }

    #[test]
    fn test_no_source_yields_none() {
        let (schema, row) = schema_and_row(
            &["Request.Time", "Response.Headers", "Request.URL"],
            &["", "Server: nginx\nContent-Type: text/html", "https://x.test/"],
        );

        assert_eq!(resolve(&row, &schema, &TimestampFormats::default()), None);
    }

    #[test]
    fn test_date_header_only_matches_line_start() {
        // "Last-Modified" style lines must not satisfy the Date: pattern.
        assert_eq!(
            date_header_value("Expires-Date: Wed, 23 Jul 2025 14:00:00 GMT"),
            None
        );
        assert_eq!(
            date_header_value("Server: a\r\nDate: Wed, 23 Jul 2025 14:00:00 GMT\r\n"),
            Some("Wed, 23 Jul 2025 14:00:00 GMT")
        );
    }

    #[test]
    fn test_custom_vocabulary_order() {
        // 01/02/2025 is ambiguous; the vocabulary order decides.
        let dmy = TimestampFormats::new(vec!["%d/%m/%Y %H:%M:%S".to_string()]);
        assert_eq!(dmy.parse("01/02/2025 12:00:00"), Some(ts(2025, 2, 1, 12, 0, 0)));

        let mdy = TimestampFormats::new(vec!["%m/%d/%Y %H:%M:%S".to_string()]);
        assert_eq!(mdy.parse("01/02/2025 12:00:00"), Some(ts(2025, 1, 2, 12, 0, 0)));
    }
}
