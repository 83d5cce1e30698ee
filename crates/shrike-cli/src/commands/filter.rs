use anyhow::Result;
use shrike_core::log::Dataset;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub fn execute(
    path: &Path,
    exclude_ext: &[String],
    exclude_tool: &[String],
    time_formats: &[String],
    output: Option<PathBuf>,
) -> Result<()> {
    tracing::debug!("Filtering log export: {}", path.display());

    let spec = super::build_filter_spec(exclude_ext, exclude_tool);
    let formats = super::build_timestamp_formats(time_formats);
    let (_, filtered) = super::load_filtered(path, &spec, &formats)?;

    if let Some(output_path) = output {
        tracing::debug!("Writing filtered records to: {}", output_path.display());
        write_csv(&filtered, &output_path)?;
    } else {
        tracing::debug!("Writing filtered records to stdout");
        let json = serde_json::to_string_pretty(&filtered)?;
        io::stdout().write_all(json.as_bytes())?;
        io::stdout().write_all(b"\n")?;
    }

    Ok(())
}

/// Write records as a headered CSV using canonical column names, so the
/// output can be fed back through the loader.
fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record([
        "Request.Time",
        "Request.URL",
        "Request.Tool",
        "Request.Method",
        "Response.Status",
        "Request.Extension",
    ])?;

    for record in dataset {
        writer.write_record([
            record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            record.url.clone(),
            record.tool.clone(),
            record.method.clone(),
            record.status.map(|s| s.to_string()).unwrap_or_default(),
            record.extension.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
