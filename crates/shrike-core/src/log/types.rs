use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One canonical, normalized HTTP-request log entry.
///
/// Immutable after normalization. A row with no resolvable timestamp never
/// becomes a Record; date-bucketed statistics downstream rely on every
/// Record carrying one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub timestamp: NaiveDateTime,
    /// Raw request URL, unsanitized at this layer.
    pub url: String,
    /// Host component of the URL; empty when the URL does not parse.
    pub target: String,
    /// Originating testing-tool label; may be empty.
    pub tool: String,
    pub method: String,
    pub status: Option<i64>,
    /// Lower-cased file extension; empty when the path has none.
    pub extension: String,
    /// Name of the file this record was loaded from.
    pub source_file: String,
}

/// Ordered collection of Records: file-then-row order, duplicates across
/// files retained (append-only union).
pub type Dataset = Vec<Record>;
