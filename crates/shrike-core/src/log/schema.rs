use csv::StringRecord;
use std::collections::HashMap;

/// Logical fields the pipeline projects out of a log export. Exports carry
/// dozens of other columns; anything outside this vocabulary is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    RequestTime,
    Url,
    Tool,
    Method,
    Status,
    ResponseHeaders,
    Extension,
}

/// Ordered alias vocabulary per logical field, matched case-insensitively
/// against header cells. Earlier aliases win when a file carries several
/// candidate columns: Logger++ exports have both `Entry.Tool` and
/// `Request.Tool`, and the request-scoped one is authoritative.
const FIELD_ALIASES: &[(Field, &[&str])] = &[
    (Field::RequestTime, &["request.time", "request time", "time"]),
    (Field::Url, &["request.url", "url"]),
    (Field::Tool, &["request.tool", "entry.tool", "tool"]),
    (Field::Method, &["request.method", "method"]),
    (Field::Status, &["response.status", "status code", "status"]),
    (
        Field::ResponseHeaders,
        &["response.headers", "response headers"],
    ),
    (Field::Extension, &["request.extension", "extension"]),
];

/// Column layout of a Logger++ CSV export written without a header row.
/// This is the positional contract headerless files are assumed to follow;
/// it is stable across versions of this tool.
pub const DEFAULT_COLUMNS: [&str; 57] = [
    "Entry.Tool",
    "Entry.Tags",
    "Entry.InScope",
    "Entry.ListenInterface",
    "Entry.ClientIP",
    "Request.AsBase64",
    "Request.Headers",
    "Request.Body",
    "Request.BodyLength",
    "Request.Time",
    "Request.Length",
    "Request.Tool",
    "Request.Comment",
    "Request.Complete",
    "Request.URL",
    "Request.Method",
    "Request.Path",
    "Request.Query",
    "Request.PathQuery",
    "Request.Protocol",
    "Request.IsSSL",
    "Request.UsesCookieJar",
    "Request.Hostname",
    "Request.Host",
    "Request.Port",
    "Request.ContentType",
    "Request.RequestHttpVersion",
    "Request.Extension",
    "Request.Referrer",
    "Request.HasParams",
    "Request.HasGetParam",
    "Request.HasPostParam",
    "Request.HasSentCookies",
    "Request.CookieString",
    "Request.ParameterCount",
    "Request.Parameters",
    "Request.Origin",
    "Response.AsBase64",
    "Response.Headers",
    "Response.Body",
    "Response.BodyLength",
    "Response.hash",
    "Response.Time",
    "Response.Length",
    "Response.Redirect",
    "Response.Status",
    "Response.StatusText",
    "Response.ResponseHttpVersion",
    "Response.RTT",
    "Response.Title",
    "Response.ContentType",
    "Response.InferredType",
    "Response.MimeType",
    "Response.HasSetCookies",
    "Response.Cookies",
    "Response.ReflectedParams",
    "Response.Reflections",
];

/// Field-name-to-column-index mapping for one input file.
///
/// Built once per file and immutable afterwards; files in the same run never
/// share a SchemaMap, so differing column orders cannot cross-contaminate.
#[derive(Debug, Clone)]
pub struct SchemaMap {
    columns: HashMap<Field, usize>,
}

impl SchemaMap {
    fn from_cells(cells: &[&str]) -> Self {
        let lowered: Vec<String> = cells
            .iter()
            .map(|c| c.trim().to_ascii_lowercase())
            .collect();

        let mut columns = HashMap::new();
        for (field, aliases) in FIELD_ALIASES {
            for alias in *aliases {
                if let Some(idx) = lowered.iter().position(|c| c == alias) {
                    columns.insert(*field, idx);
                    break;
                }
            }
        }

        SchemaMap { columns }
    }

    /// SchemaMap for the fixed positional contract ([`DEFAULT_COLUMNS`]).
    pub fn default_layout() -> Self {
        Self::from_cells(&DEFAULT_COLUMNS)
    }

    /// Column index for a logical field, if the file carries it.
    pub fn index(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    /// Trimmed, non-empty cell value for a logical field in the given row.
    pub fn cell<'r>(&self, row: &'r StringRecord, field: Field) -> Option<&'r str> {
        self.index(field)
            .and_then(|idx| row.get(idx))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn known_fields(&self) -> usize {
        self.columns.len()
    }

    fn has(&self, field: Field) -> bool {
        self.columns.contains_key(&field)
    }
}

/// Outcome of probing the first row of a file.
#[derive(Debug)]
pub struct Detection {
    pub schema: SchemaMap,
    /// True when the probed row was a header and must not be normalized.
    pub has_header: bool,
}

/// Decide whether the first row of a file is a header and build the file's
/// SchemaMap.
///
/// A row counts as a header when it resolves the URL field plus at least one
/// other known field. Header detection is authoritative: the positional
/// fallback applies only when no header is recognized.
pub fn detect(first_row: &StringRecord) -> Detection {
    let cells: Vec<&str> = first_row.iter().collect();
    let candidate = SchemaMap::from_cells(&cells);

    if candidate.has(Field::Url) && candidate.known_fields() >= 2 {
        tracing::debug!(
            "Header row recognized ({} known fields)",
            candidate.known_fields()
        );
        Detection {
            schema: candidate,
            has_header: true,
        }
    } else {
        tracing::debug!("No header row recognized, assuming default column layout");
        Detection {
            schema: SchemaMap::default_layout(),
            has_header: false,
        }
    }
}
