use std::collections::HashSet;

use serde::Serialize;

use crate::log::{Dataset, Record};

/// Exclusion rules applied to a loaded Dataset.
///
/// Both axes are case-insensitive exact matches and an empty set disables
/// that axis. Records with an empty extension are only excluded when the
/// caller explicitly lists an empty-string entry; "no extension" filtering
/// is opt-in, never implicit.
#[derive(Debug, Default, Clone, Serialize)]
pub struct FilterSpec {
    excluded_extensions: HashSet<String>,
    excluded_tools: HashSet<String>,
}

impl FilterSpec {
    /// Create a FilterSpec with no exclusions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add extensions to exclude. Entries are trimmed, lower-cased, and a
    /// leading dot is stripped (`.js` and `js` are equivalent). An entry
    /// that is explicitly empty is preserved to opt in to filtering
    /// extension-less records.
    pub fn with_excluded_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for ext in extensions {
            let normalized = ext
                .as_ref()
                .trim()
                .trim_start_matches('.')
                .to_ascii_lowercase();
            self.excluded_extensions.insert(normalized);
        }
        self
    }

    /// Add tool labels to exclude (trimmed, case-insensitive).
    pub fn with_excluded_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tool in tools {
            self.excluded_tools
                .insert(tool.as_ref().trim().to_ascii_lowercase());
        }
        self
    }

    pub fn excluded_extensions(&self) -> &HashSet<String> {
        &self.excluded_extensions
    }

    pub fn excluded_tools(&self) -> &HashSet<String> {
        &self.excluded_tools
    }

    pub fn is_empty(&self) -> bool {
        self.excluded_extensions.is_empty() && self.excluded_tools.is_empty()
    }

    /// True when the record survives the exclusion rules.
    pub fn matches(&self, record: &Record) -> bool {
        // Record extensions are already lower-cased by the normalizer.
        if self.excluded_extensions.contains(&record.extension) {
            return false;
        }
        if !self.excluded_tools.is_empty()
            && self.excluded_tools.contains(&record.tool.to_ascii_lowercase())
        {
            return false;
        }
        true
    }
}

/// Apply a FilterSpec to a Dataset.
///
/// Produces a new Dataset; the input is never mutated and the surviving
/// records keep their original order. Applying the same spec twice yields
/// the same result as applying it once.
pub fn filter_dataset(dataset: &Dataset, spec: &FilterSpec) -> Dataset {
    if spec.is_empty() {
        return dataset.clone();
    }

    let filtered: Dataset = dataset
        .iter()
        .filter(|record| spec.matches(record))
        .cloned()
        .collect();

    tracing::debug!(
        "Filter kept {} of {} records",
        filtered.len(),
        dataset.len()
    );

    filtered
}
