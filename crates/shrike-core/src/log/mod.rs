//! Log-export ingestion: per-file schema detection, multi-source timestamp
//! resolution, row normalization, and file/directory loading.

pub mod loader;
pub mod normalize;
pub mod schema;
pub mod timestamp;
pub mod types;

pub use loader::{FileReport, LoadOutcome, LogLoader};
pub use schema::{Field, SchemaMap};
pub use timestamp::TimestampFormats;
pub use types::{Dataset, Record};
