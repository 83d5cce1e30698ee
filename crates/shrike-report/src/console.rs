use console::style;
use shrike_core::analysis::AnalysisReport;
use shrike_core::filter::FilterSpec;
use shrike_core::log::FileReport;

const TOP_ENDPOINTS: usize = 10;

/// Print the styled console rendition of the analysis.
pub fn print_report(report: &AnalysisReport, files: &[FileReport], spec: &FilterSpec) {
    println!("\n{}", style("Traffic Analysis Report").bold().cyan());
    println!("{}", style("=======================").cyan());

    if let Some((start, end)) = report.summary.date_range {
        println!(
            "\nAnalysis Period: {} to {}",
            start.format("%d/%m/%Y %H:%M:%S"),
            end.format("%d/%m/%Y %H:%M:%S")
        );
    }

    println!("\n{}", style("Productivity Summary:").bold());
    println!("  Total Requests:           {}", report.summary.total_requests);
    println!("  Analysis Period (Days):   {}", report.summary.active_days);
    println!(
        "  Average Requests per Day: {:.2}",
        report.summary.average_requests_per_day
    );
    if let Some(peak_day) = report.summary.peak_day {
        println!(
            "  Peak Activity Day:        {} ({} requests)",
            peak_day.format("%d/%m/%Y"),
            report.summary.peak_day_requests
        );
    }

    if !report.activity.targets.is_empty() {
        println!("\n{}", style("Requests per Target:").bold());
        for (target, count) in &report.activity.targets {
            println!("  {}: {}", target, count);
        }
    }

    if !report.activity.endpoints.is_empty() {
        println!(
            "\n{}",
            style(format!("Top {} Endpoints by Request Count:", TOP_ENDPOINTS)).bold()
        );
        for (endpoint, count) in report.activity.endpoints.iter().take(TOP_ENDPOINTS) {
            println!("  {}: {}", endpoint, count);
        }
    }

    print_load_results(files, spec);
    println!();
}

/// Print per-file load outcomes and the effective exclusions.
pub fn print_load_results(files: &[FileReport], spec: &FilterSpec) {
    println!("\n{}", style("Input Files:").bold());
    for file in files {
        match &file.error {
            Some(err) => println!(
                "  {} {} - {}",
                style("[failed]").red(),
                file.file,
                err
            ),
            None => println!(
                "  {} {} - {} rows loaded, {} dropped",
                style("[ok]").green(),
                file.file,
                file.rows_loaded,
                file.rows_dropped
            ),
        }
    }

    if !spec.is_empty() {
        let mut extensions: Vec<&str> = spec
            .excluded_extensions()
            .iter()
            .map(String::as_str)
            .collect();
        extensions.sort_unstable();
        let mut tools: Vec<&str> = spec.excluded_tools().iter().map(String::as_str).collect();
        tools.sort_unstable();

        println!("\n{}", style("Filters:").bold());
        if !extensions.is_empty() {
            println!("  Excluded extensions: {}", extensions.join(", "));
        }
        if !tools.is_empty() {
            println!("  Excluded tools: {}", tools.join(", "));
        }
    }
}
