use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;

use super::normalize;
use super::schema;
use super::timestamp::{self, TimestampFormats};
use super::types::{Dataset, Record};
use crate::{Error, Result};

/// Per-file load outcome, surfaced to the console and the report so that
/// partial failures are visible rather than silently absorbed.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    pub rows_loaded: usize,
    pub rows_dropped: usize,
    /// Present when the file contributed no records at all.
    pub error: Option<String>,
}

impl FileReport {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Aggregated result of loading a path: the ordered Dataset plus one report
/// per attempted file.
#[derive(Debug, Serialize)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    pub reports: Vec<FileReport>,
}

impl LoadOutcome {
    pub fn files_attempted(&self) -> usize {
        self.reports.len()
    }

    pub fn files_failed(&self) -> usize {
        self.reports.iter().filter(|r| r.failed()).count()
    }

    pub fn rows_dropped(&self) -> usize {
        self.reports.iter().map(|r| r.rows_dropped).sum()
    }
}

/// Loads one file or a directory of CSV log exports into a Dataset.
///
/// Files are processed independently, in lexicographic name order, each with
/// its own freshly detected schema. A bad file never aborts the batch; only
/// a run that yields zero records overall is fatal.
pub struct LogLoader {
    formats: TimestampFormats,
}

impl Default for LogLoader {
    fn default() -> Self {
        Self::new(TimestampFormats::default())
    }
}

impl LogLoader {
    pub fn new(formats: TimestampFormats) -> Self {
        Self { formats }
    }

    pub fn load_path(&self, path: &Path) -> Result<LoadOutcome> {
        let files = if path.is_dir() {
            enumerate_csv_files(path)?
        } else {
            if !has_csv_extension(path) {
                return Err(Error::UnsupportedFile(path.display().to_string()));
            }
            vec![path.to_path_buf()]
        };

        if files.is_empty() {
            tracing::warn!("No CSV files found under {}", path.display());
            return Err(Error::NoValidInput);
        }

        let mut dataset = Dataset::new();
        let mut reports = Vec::new();

        for file in &files {
            let name = file_label(file);
            match self.load_file(file, &name) {
                Ok((records, rows_dropped)) => {
                    let error = if records.is_empty() {
                        Some("no rows with a resolvable timestamp".to_string())
                    } else {
                        None
                    };
                    reports.push(FileReport {
                        file: name,
                        rows_loaded: records.len(),
                        rows_dropped,
                        error,
                    });
                    dataset.extend(records);
                }
                Err(err) => {
                    tracing::warn!("Skipping {}: {}", name, err);
                    reports.push(FileReport {
                        file: name,
                        rows_loaded: 0,
                        rows_dropped: 0,
                        error: Some(err.to_string()),
                    });
                }
            }
        }

        if dataset.is_empty() {
            return Err(Error::NoValidInput);
        }

        tracing::info!(
            "Loaded {} records from {} file(s), {} dropped, {} file(s) failed",
            dataset.len(),
            reports.len(),
            reports.iter().map(|r| r.rows_dropped).sum::<usize>(),
            reports.iter().filter(|r| r.failed()).count()
        );

        Ok(LoadOutcome { dataset, reports })
    }

    fn load_file(&self, path: &Path, source: &str) -> Result<(Vec<Record>, usize)> {
        tracing::debug!("Loading log file: {}", path.display());

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);
        let mut rows = reader.records();

        let first = match rows.next() {
            Some(row) => row?,
            None => return Err(Error::EmptyFile(source.to_string())),
        };
        if is_blank(&first) {
            return Err(Error::EmptyFile(source.to_string()));
        }

        // One schema per file: detection never leaks across files.
        let detection = schema::detect(&first);

        let mut records = Vec::new();
        let mut dropped = 0;

        if !detection.has_header {
            self.ingest_row(&first, &detection.schema, source, &mut records, &mut dropped);
        }

        for row in rows {
            let row = row?;
            if is_blank(&row) {
                continue;
            }
            self.ingest_row(&row, &detection.schema, source, &mut records, &mut dropped);
        }

        if records.is_empty() && dropped == 0 {
            return Err(Error::EmptyFile(source.to_string()));
        }

        tracing::debug!(
            "Loaded {} records from {} ({} dropped)",
            records.len(),
            source,
            dropped
        );

        Ok((records, dropped))
    }

    fn ingest_row(
        &self,
        row: &StringRecord,
        schema: &schema::SchemaMap,
        source: &str,
        records: &mut Vec<Record>,
        dropped: &mut usize,
    ) {
        match timestamp::resolve(row, schema, &self.formats) {
            Some(ts) => records.push(normalize::normalize(row, schema, ts, source)),
            None => {
                tracing::debug!("Dropping row with no resolvable timestamp in {}", source);
                *dropped += 1;
            }
        }
    }
}

fn is_blank(row: &StringRecord) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

fn enumerate_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && has_csv_extension(&path) {
            files.push(path);
        }
    }
    // Stable processing order for reproducible output.
    files.sort();
    Ok(files)
}
