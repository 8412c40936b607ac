//! Rendering of the derived tables: JSON and CSV for machines, markdown and
//! terminal for people. Null metrics always render as an explicit `n/a`
//! marker, never silently as zero.

pub mod csv;
pub mod json;
pub mod markdown;
pub mod terminal;

pub use self::csv::CsvWriter;
pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;

use crate::analysis::AnalysisReport;
use anyhow::Context;
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Markdown,
    Csv,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
}

fn sink(output: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

/// Writer factory. CSV output spreads one file per table, so it requires an
/// output directory; JSON and markdown default to stdout. Terminal output is
/// stdout-only and rejects `--output` rather than silently ignoring it.
pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    match format {
        OutputFormat::Terminal => {
            anyhow::ensure!(
                output.is_none(),
                "terminal output writes to stdout and does not take --output; \
                 use --format json or --format markdown to write to a file"
            );
            Ok(Box::new(TerminalWriter::new()))
        }
        OutputFormat::Json => Ok(Box::new(JsonWriter::new(sink(output)?))),
        OutputFormat::Markdown => Ok(Box::new(MarkdownWriter::new(sink(output)?))),
        OutputFormat::Csv => {
            let dir: PathBuf = output
                .map(Path::to_path_buf)
                .context("csv output requires --output <dir>")?;
            Ok(Box::new(CsvWriter::new(dir)))
        }
    }
}

/// "n/a" marker for null metrics.
pub(crate) fn fmt_opt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:+.1}%"),
        None => "n/a".to_string(),
    }
}

pub(crate) fn fmt_money(value: f64) -> String {
    let negative = value < 0.0;
    let whole = value.abs().round() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_format_rejects_an_output_path() {
        let err = create_writer(OutputFormat::Terminal, Some(Path::new("out.txt")))
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(err.contains("does not take --output"), "got: {err}");
        assert!(create_writer(OutputFormat::Terminal, None).is_ok());
    }

    #[test]
    fn csv_format_requires_an_output_dir() {
        assert!(create_writer(OutputFormat::Csv, None).is_err());
    }

    #[test]
    fn null_metrics_render_the_na_marker() {
        assert_eq!(fmt_opt_pct(None), "n/a");
        assert_eq!(fmt_opt_pct(Some(50.0)), "+50.0%");
        assert_eq!(fmt_opt_pct(Some(-20.0)), "-20.0%");
    }

    #[test]
    fn money_formatting_groups_thousands() {
        assert_eq!(fmt_money(0.0), "$0");
        assert_eq!(fmt_money(999.4), "$999");
        assert_eq!(fmt_money(1_234_567.0), "$1,234,567");
        assert_eq!(fmt_money(-5_000.0), "-$5,000");
    }
}
