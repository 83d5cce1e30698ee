pub mod analyze;
pub mod completion;
pub mod filter;
pub mod stats;

use anyhow::Result;
use shrike_core::filter::FilterSpec;
use shrike_core::log::{Dataset, LoadOutcome, LogLoader, TimestampFormats};
use std::path::Path;

/// Build the timestamp vocabulary from `--time-format` flags; no flags
/// means the default vocabulary.
pub fn build_timestamp_formats(time_formats: &[String]) -> TimestampFormats {
    if time_formats.is_empty() {
        TimestampFormats::default()
    } else {
        TimestampFormats::new(time_formats.to_vec())
    }
}

/// Split repeated, possibly comma-separated flag values into clean entries.
/// Blank segments are dropped, so `--exclude-ext js,,css` does not opt in
/// to "no extension" filtering by accident.
fn split_flag_values(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}

fn build_filter_spec(exclude_ext: &[String], exclude_tool: &[String]) -> FilterSpec {
    FilterSpec::new()
        .with_excluded_extensions(split_flag_values(exclude_ext))
        .with_excluded_tools(split_flag_values(exclude_tool))
}

/// Load the input path and apply the exclusion filters.
///
/// Load-level failures (`NoValidInput` included) propagate; a filter that
/// removes every record is reported as a distinct CLI error.
fn load_filtered(
    path: &Path,
    spec: &FilterSpec,
    formats: &TimestampFormats,
) -> Result<(LoadOutcome, Dataset)> {
    let outcome = LogLoader::new(formats.clone()).load_path(path)?;
    let filtered = shrike_core::filter::filter_dataset(&outcome.dataset, spec);

    if filtered.is_empty() {
        anyhow::bail!("All records were filtered out; nothing to analyze");
    }

    Ok((outcome, filtered))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_flag_values_handles_commas_and_blanks() {
        let values = vec!["js,css".to_string(), " woff2 ".to_string(), ",".to_string()];
        assert_eq!(split_flag_values(&values), vec!["js", "css", "woff2"]);
    }

    #[test]
    fn test_split_flag_values_empty() {
        assert!(split_flag_values(&[]).is_empty());
    }
}
