use anyhow::Result;
use shrike_core::analysis::AnalysisReport;
use shrike_core::log::FileReport;
use std::path::Path;

pub fn execute(
    path: &Path,
    exclude_ext: &[String],
    exclude_tool: &[String],
    time_formats: &[String],
    format: &str,
) -> Result<()> {
    tracing::info!("Computing statistics for: {}", path.display());

    let spec = super::build_filter_spec(exclude_ext, exclude_tool);
    let formats = super::build_timestamp_formats(time_formats);
    let (report, outcome) = super::analyze::run_analysis(path, &spec, &formats)?;

    match format {
        "json" => output_json(&report, &outcome.reports)?,
        "table" => output_table(&report),
        _ => shrike_report::console::print_report(&report, &outcome.reports, &spec),
    }

    Ok(())
}

fn output_json(report: &AnalysisReport, files: &[FileReport]) -> Result<()> {
    let json = serde_json::to_string_pretty(&serde_json::json!({
        "report": report,
        "files": files,
    }))?;
    println!("{}", json);
    Ok(())
}

fn output_table(report: &AnalysisReport) {
    // Simple table format
    println!("Metric,Value");
    println!("Total Requests,{}", report.summary.total_requests);
    println!("Active Days,{}", report.summary.active_days);
    println!(
        "Average Requests per Day,{:.2}",
        report.summary.average_requests_per_day
    );
    println!("Peak Day Requests,{}", report.summary.peak_day_requests);
    println!("Unique Targets,{}", report.summary.unique_targets);
}
