//! The analyze pipeline: Loader, then Analyzer, then Reporter, strictly in
//! that order.

use crate::analysis::{run_analysis, AnalysisReport};
use crate::config::{load_config, AnalysisConfig};
use crate::loader::{load_dataset, DatasetPaths};
use crate::report::{create_writer, OutputFormat};
use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub path: PathBuf,
    pub sales: Option<PathBuf>,
    pub stores: Option<PathBuf>,
    pub features: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub top_n: Option<usize>,
    pub moving_average_window: Option<usize>,
    pub period_split_date: Option<NaiveDate>,
}

impl AnalyzeOptions {
    fn resolve_paths(&self) -> DatasetPaths {
        let mut paths = DatasetPaths::from_dir(&self.path);
        if let Some(sales) = &self.sales {
            paths.sales = sales.clone();
        }
        if let Some(stores) = &self.stores {
            paths.stores = stores.clone();
        }
        if let Some(features) = &self.features {
            paths.features = Some(features.clone());
        }
        paths
    }

    fn resolve_config(&self) -> Result<AnalysisConfig> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(top_n) = self.top_n {
            config.top_n = top_n;
        }
        if let Some(window) = self.moving_average_window {
            config.moving_average_window = window;
        }
        if let Some(split) = self.period_split_date {
            config.period_split_date = split;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Run the analysis and return the report without rendering it. Used by the
/// report command and by integration tests.
pub fn build_report(options: &AnalyzeOptions) -> Result<AnalysisReport> {
    let config = options.resolve_config()?;
    let paths = options.resolve_paths();
    let outcome = load_dataset(&paths)?;

    if outcome.null_counts.total() > 0 {
        log::warn!(
            "{} null values coerced during load; see the data-quality section",
            outcome.null_counts.total()
        );
    }

    Ok(run_analysis(
        &outcome.dataset,
        &outcome.null_counts,
        &outcome.summaries,
        &config,
    ))
}

pub fn handle_analyze(options: AnalyzeOptions) -> Result<()> {
    let report = build_report(&options)?;
    let mut writer = create_writer(options.format, options.output.as_deref())?;
    writer.write_report(&report)
}
