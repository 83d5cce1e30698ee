use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use shrike_core::analysis::AnalysisReport;
use shrike_core::filter::FilterSpec;
use shrike_core::log::FileReport;

const STYLE: &str = r#"
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 0; padding: 0; background-color: #f8f9fa; color: #333; }
.container { max-width: 1600px; margin: 20px auto; padding: 20px; }
.header { text-align: center; padding-bottom: 20px; border-bottom: 1px solid #dee2e6; margin-bottom: 20px; }
h1 { color: #0056b3; } h2 { color: #0056b3; border-bottom: 2px solid #0056b3; padding-bottom: 10px; margin-top: 40px; }
.report-meta { text-align: center; margin-bottom: 30px; font-style: italic; color: #555; }
.card { background: #fff; border-radius: 8px; box-shadow: 0 4px 12px rgba(0,0,0,0.08); padding: 20px; margin-bottom: 20px; }
.grid-container { display: grid; grid-template-columns: repeat(auto-fit, minmax(400px, 1fr)); gap: 20px; }
.table-container { max-height: 500px; overflow-y: auto; }
table { width: 100%; border-collapse: collapse; margin-bottom: 10px; table-layout: fixed; }
th, td { border: 1px solid #dee2e6; padding: 12px; text-align: left; word-wrap: break-word; }
th { background-color: #007bff; color: white; position: sticky; top: 0; z-index: 1; }
tr:nth-child(even) { background-color: #f2f2f2; }
.failed { color: #c0392b; }
#endpointSearch { width: 100%; padding: 8px; margin-bottom: 10px; border: 1px solid #ccc; border-radius: 4px; box-sizing: border-box; }
"#;

const SEARCH_SCRIPT: &str = r#"
function filterTable() {
    const filter = document.getElementById("endpointSearch").value.toUpperCase();
    const rows = document.getElementById("endpointsTable").getElementsByTagName("tr");
    for (let i = 1; i < rows.length; i++) {
        const cell = rows[i].getElementsByTagName("td")[0];
        if (!cell) continue;
        const text = cell.textContent || cell.innerText;
        rows[i].style.display = text.toUpperCase().indexOf(filter) > -1 ? "" : "none";
    }
}
"#;

/// Render the complete single-file HTML report.
///
/// Everything interpolated from the dataset is HTML-escaped; the charts pull
/// Chart.js from a CDN so the file itself stays self-contained.
pub fn render(report: &AnalysisReport, files: &[FileReport], spec: &FilterSpec) -> String {
    tracing::debug!("Rendering HTML report");

    let period = report
        .summary
        .date_range
        .map(|(start, end)| format!("{} to {}", fmt_datetime(start), fmt_datetime(end)))
        .unwrap_or_else(|| "no data".to_string());

    let daily_labels = serde_json::to_string(
        &report
            .activity
            .daily
            .keys()
            .map(|day| day.format("%Y-%m-%d").to_string())
            .collect::<Vec<_>>(),
    )
    .unwrap_or_else(|_| "[]".to_string());
    let daily_data = serde_json::to_string(
        &report
            .activity
            .daily
            .values()
            .map(|day| day.total)
            .collect::<Vec<_>>(),
    )
    .unwrap_or_else(|_| "[]".to_string());
    let tool_data =
        serde_json::to_string(&report.activity.tools).unwrap_or_else(|_| "[]".to_string());

    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>Traffic Analysis Report</title>\n");
    html.push_str("<script src=\"https://cdn.jsdelivr.net/npm/chart.js\"></script>\n");
    html.push_str("<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n");

    html.push_str("<div class=\"header\"><h1>Traffic Analysis Report</h1></div>\n");
    html.push_str(&format!(
        "<div class=\"report-meta\"><p><strong>Analysis Period:</strong> {}</p></div>\n",
        escape(&period)
    ));

    render_summary_card(&mut html, report);
    render_input_card(&mut html, files, spec);

    html.push_str(
        "<div class=\"card\"><h2>Requests Over Time</h2><canvas id=\"dailyActivityChart\"></canvas></div>\n",
    );

    render_tool_card(&mut html, report);
    render_endpoints_card(&mut html, report);
    render_daily_card(&mut html, report);

    html.push_str("</div>\n<script>\n");
    html.push_str(&format!(
        "const toolData = {tool_data};\n\
         new Chart('toolChart', {{ type: 'doughnut', data: {{ labels: toolData.map(item => item[0]), datasets: [{{ data: toolData.map(item => item[1]), backgroundColor: ['#3498db', '#e74c3c', '#9b59b6', '#f1c40f', '#2ecc71', '#1abc9c', '#34495e'] }}] }}, options: {{ responsive: true, maintainAspectRatio: false }} }});\n\
         new Chart('dailyActivityChart', {{ type: 'line', data: {{ labels: {daily_labels}, datasets: [{{ label: 'Total Requests per Day', data: {daily_data}, borderColor: '#28a745', backgroundColor: 'rgba(40, 167, 69, 0.1)', fill: true, tension: 0.1 }}] }}, options: {{ responsive: true }} }});\n"
    ));
    html.push_str(SEARCH_SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");

    html
}

fn render_summary_card(html: &mut String, report: &AnalysisReport) {
    let summary = &report.summary;
    let peak_day = summary
        .peak_day
        .map(|day| day.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "N/A".to_string());

    html.push_str("<div class=\"card\">\n<h2>Productivity Summary</h2>\n<div class=\"grid-container\">\n");
    for (label, value) in [
        ("Total Requests", summary.total_requests.to_string()),
        ("Analysis Period (Days)", summary.active_days.to_string()),
        (
            "Average Requests per Day",
            format!("{:.2}", summary.average_requests_per_day),
        ),
        ("Peak Activity Day", peak_day),
        (
            "Requests on Peak Day",
            summary.peak_day_requests.to_string(),
        ),
        ("Unique Targets", summary.unique_targets.to_string()),
    ] {
        html.push_str(&format!(
            "<div><strong>{}:</strong> {}</div>\n",
            label,
            escape(&value)
        ));
    }
    html.push_str("</div>\n</div>\n");
}

fn render_input_card(html: &mut String, files: &[FileReport], spec: &FilterSpec) {
    html.push_str("<div class=\"card\">\n<h2>Input Files</h2>\n<div class=\"table-container\">\n");
    html.push_str("<table><tr><th>File</th><th>Rows Loaded</th><th>Rows Dropped</th><th>Status</th></tr>\n");
    for file in files {
        let status = match &file.error {
            Some(err) => format!("<span class=\"failed\">{}</span>", escape(err)),
            None => "ok".to_string(),
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&file.file),
            file.rows_loaded,
            file.rows_dropped,
            status
        ));
    }
    html.push_str("</table>\n</div>\n");

    if !spec.is_empty() {
        let mut extensions: Vec<&str> = spec
            .excluded_extensions()
            .iter()
            .map(String::as_str)
            .collect();
        extensions.sort_unstable();
        let mut tools: Vec<&str> = spec.excluded_tools().iter().map(String::as_str).collect();
        tools.sort_unstable();

        html.push_str("<p>");
        if !extensions.is_empty() {
            html.push_str(&format!(
                "<strong>Excluded extensions:</strong> {} ",
                escape(&extensions.join(", "))
            ));
        }
        if !tools.is_empty() {
            html.push_str(&format!(
                "<strong>Excluded tools:</strong> {}",
                escape(&tools.join(", "))
            ));
        }
        html.push_str("</p>\n");
    }
    html.push_str("</div>\n");
}

fn render_tool_card(html: &mut String, report: &AnalysisReport) {
    html.push_str("<div class=\"card\">\n<h2>Tool Usage Summary</h2>\n<div class=\"grid-container\">\n<div>\n");
    html.push_str("<table><tr><th>Tool</th><th>Total Requests</th></tr>\n");
    for (tool, count) in &report.activity.tools {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape(tool),
            count
        ));
    }
    html.push_str("</table>\n</div>\n<div><canvas id=\"toolChart\"></canvas></div>\n</div>\n</div>\n");
}

fn render_endpoints_card(html: &mut String, report: &AnalysisReport) {
    html.push_str("<div class=\"card\">\n<h2>All Endpoints by Request Count</h2>\n");
    html.push_str(
        "<input type=\"text\" id=\"endpointSearch\" onkeyup=\"filterTable()\" placeholder=\"Search for endpoints..\">\n",
    );
    html.push_str("<div class=\"table-container\">\n<table id=\"endpointsTable\">\n");
    html.push_str(
        "<tr><th style=\"width: 85%;\">Endpoint</th><th style=\"width: 15%;\">Request Count</th></tr>\n",
    );
    for (endpoint, count) in &report.activity.endpoints {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape(endpoint),
            count
        ));
    }
    html.push_str("</table>\n</div>\n</div>\n");
}

fn render_daily_card(html: &mut String, report: &AnalysisReport) {
    html.push_str("<div class=\"card\">\n<h2>Daily Request Summary</h2>\n<div class=\"table-container\">\n");
    html.push_str("<table><tr><th>Date</th><th>Total Requests</th><th>Tool Breakdown</th></tr>\n");
    for (day, activity) in &report.activity.daily {
        let breakdown = activity
            .tools
            .iter()
            .map(|(tool, count)| format!("{}: {}", escape(tool), count))
            .collect::<Vec<_>>()
            .join("<br>");
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            day.format("%d/%m/%Y"),
            activity.total,
            breakdown
        ));
    }
    html.push_str("</table>\n</div>\n</div>\n");
}

/// Write the rendered report, creating parent directories as needed.
pub fn write_report(path: &Path, html: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, html)?;

    tracing::info!("Wrote HTML report to {}", path.display());
    Ok(())
}

fn fmt_datetime(ts: NaiveDateTime) -> String {
    ts.format("%d/%m/%Y %H:%M:%S").to_string()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
