use crate::commands::analyze::{build_report, AnalyzeOptions};
use crate::report::{create_writer, OutputFormat};
use anyhow::Result;
use std::path::PathBuf;

/// Narrative markdown report for a data directory.
pub fn handle_report(
    path: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<()> {
    let options = AnalyzeOptions {
        path,
        sales: None,
        stores: None,
        features: None,
        format: OutputFormat::Markdown,
        output: output.clone(),
        config,
        top_n: None,
        moving_average_window: None,
        period_split_date: None,
    };
    let report = build_report(&options)?;
    let mut writer = create_writer(OutputFormat::Markdown, output.as_deref())?;
    writer.write_report(&report)
}
