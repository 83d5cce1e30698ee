use anyhow::Result;
use shrike_core::analysis::{ActivityAnalyzer, AnalysisReport, Analyzer, SummaryAnalyzer};
use shrike_core::filter::FilterSpec;
use shrike_core::log::{LoadOutcome, TimestampFormats};
use std::path::Path;

/// Run the full pipeline for a path: load, filter, analyze.
pub fn run_analysis(
    path: &Path,
    spec: &FilterSpec,
    formats: &TimestampFormats,
) -> Result<(AnalysisReport, LoadOutcome)> {
    let (outcome, dataset) = super::load_filtered(path, spec, formats)?;

    let summary = SummaryAnalyzer.analyze(&dataset)?;
    let activity = ActivityAnalyzer.analyze(&dataset)?;

    Ok((AnalysisReport { summary, activity }, outcome))
}

pub fn execute(
    path: &Path,
    exclude_ext: &[String],
    exclude_tool: &[String],
    time_formats: &[String],
    output: &Path,
) -> Result<()> {
    tracing::info!("Analyzing log export: {}", path.display());

    let spec = super::build_filter_spec(exclude_ext, exclude_tool);
    let formats = super::build_timestamp_formats(time_formats);
    let (report, outcome) = run_analysis(path, &spec, &formats)?;

    shrike_report::console::print_report(&report, &outcome.reports, &spec);

    let html = shrike_report::html::render(&report, &outcome.reports, &spec);
    shrike_report::html::write_report(output, &html)?;

    let shown = output
        .canonicalize()
        .unwrap_or_else(|_| output.to_path_buf());
    println!("HTML report generated: {}", shown.display());

    Ok(())
}
