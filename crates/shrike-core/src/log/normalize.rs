use chrono::NaiveDateTime;
use csv::StringRecord;
use url::Url;

use super::schema::{Field, SchemaMap};
use super::types::Record;

/// Project one raw row into a canonical [`Record`].
///
/// Derived fields tolerate malformed URLs by staying empty; the row itself
/// is kept as long as a timestamp was resolved for it.
pub fn normalize(
    row: &StringRecord,
    schema: &SchemaMap,
    timestamp: NaiveDateTime,
    source_file: &str,
) -> Record {
    let url = schema.cell(row, Field::Url).unwrap_or_default().to_string();

    let (target, derived_extension) = match Url::parse(&url) {
        Ok(parsed) => (
            parsed.host_str().unwrap_or_default().to_string(),
            path_extension(parsed.path()),
        ),
        Err(err) => {
            if !url.is_empty() {
                tracing::debug!("Failed to parse URL {}: {}", url, err);
            }
            (String::new(), String::new())
        }
    };

    // Logger++ exports carry an explicit extension column; trust it when
    // present, otherwise fall back to the URL-derived value.
    let extension = schema
        .cell(row, Field::Extension)
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or(derived_extension);

    let status = schema
        .cell(row, Field::Status)
        .and_then(|value| value.parse::<i64>().ok());

    Record {
        timestamp,
        url,
        target,
        tool: schema
            .cell(row, Field::Tool)
            .unwrap_or_default()
            .to_string(),
        method: schema
            .cell(row, Field::Method)
            .unwrap_or_default()
            .to_string(),
        status,
        extension,
        source_file: source_file.to_string(),
    }
}

/// Trailing dot-suffix of the final path segment, lower-cased. Empty when
/// the path carries none.
fn path_extension(path: &str) -> String {
    let segment = path.rsplit('/').next().unwrap_or("");
    match segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => String::new(),
    }
}
