//! Analysis configuration with TOML file loading.
//!
//! Every knob has a serde default so a partial `salescope.toml` only needs
//! the fields it overrides. CLI flags are applied on top of the file by the
//! command layer.

use crate::core::errors::SalescopeError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "salescope.toml";

/// Minimum record counts a group must reach before it is ranked. Small
/// groups produce unstable averages and volatility figures, so each ranking
/// query filters first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinGroupSize {
    /// Department x store-type ranking and period-split comparison.
    #[serde(default = "default_min_comparative")]
    pub comparative: usize,

    /// Department x store-type performance table.
    #[serde(default = "default_min_dept_type")]
    pub dept_type: usize,

    /// Volatility and consistency rankings (stddev-based metrics).
    #[serde(default = "default_min_stats")]
    pub stats: usize,
}

impl Default for MinGroupSize {
    fn default() -> Self {
        Self {
            comparative: default_min_comparative(),
            dept_type: default_min_dept_type(),
            stats: default_min_stats(),
        }
    }
}

/// Store-size bucket boundaries. Buckets are half-open: a store of exactly
/// `small_max` is Medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBuckets {
    #[serde(default = "default_small_max")]
    pub small_max: u32,
    #[serde(default = "default_medium_max")]
    pub medium_max: u32,
    #[serde(default = "default_large_max")]
    pub large_max: u32,
}

impl Default for SizeBuckets {
    fn default() -> Self {
        Self {
            small_max: default_small_max(),
            medium_max: default_medium_max(),
            large_max: default_large_max(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// How many stores the top-performer table keeps.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Trailing moving-average window, in points (current row inclusive).
    #[serde(default = "default_moving_average_window")]
    pub moving_average_window: usize,

    /// Cutoff splitting each (store, dept) series into early/late periods
    /// for the growth comparison.
    #[serde(default = "default_period_split_date")]
    pub period_split_date: NaiveDate,

    #[serde(default)]
    pub min_group_size: MinGroupSize,

    #[serde(default)]
    pub size_buckets: SizeBuckets,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            moving_average_window: default_moving_average_window(),
            period_split_date: default_period_split_date(),
            min_group_size: MinGroupSize::default(),
            size_buckets: SizeBuckets::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), SalescopeError> {
        if self.top_n == 0 {
            return Err(SalescopeError::Config("top_n must be at least 1".into()));
        }
        if self.moving_average_window == 0 {
            return Err(SalescopeError::Config(
                "moving_average_window must be at least 1".into(),
            ));
        }
        let b = &self.size_buckets;
        if !(b.small_max < b.medium_max && b.medium_max < b.large_max) {
            return Err(SalescopeError::Config(
                "size bucket boundaries must be strictly increasing".into(),
            ));
        }
        Ok(())
    }
}

fn default_top_n() -> usize {
    15
}

fn default_moving_average_window() -> usize {
    4
}

fn default_period_split_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2011, 7, 1).unwrap()
}

fn default_min_comparative() -> usize {
    20
}

fn default_min_dept_type() -> usize {
    50
}

fn default_min_stats() -> usize {
    100
}

fn default_small_max() -> u32 {
    50_000
}

fn default_medium_max() -> u32 {
    100_000
}

fn default_large_max() -> u32 {
    150_000
}

fn parse_config(contents: &str) -> Result<AnalysisConfig, SalescopeError> {
    let config: AnalysisConfig = toml::from_str(contents)
        .map_err(|e| SalescopeError::Config(format!("failed to parse config: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Load configuration. An explicit path must exist; with no path given the
/// default `salescope.toml` is used when present and built-in defaults
/// otherwise.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig, SalescopeError> {
    match path {
        Some(path) => {
            let contents =
                fs::read_to_string(path).map_err(|e| SalescopeError::io(path, e))?;
            parse_config(&contents)
        }
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(AnalysisConfig::default());
            }
            let contents =
                fs::read_to_string(default).map_err(|e| SalescopeError::io(default, e))?;
            log::debug!("loaded config from {}", default.display());
            parse_config(&contents)
        }
    }
}

/// The template written by `salescope init`, kept in sync with the defaults
/// above.
pub fn default_config_toml() -> String {
    format!(
        r#"# Salescope configuration

top_n = {top_n}
moving_average_window = {window}
period_split_date = "{split}"

[min_group_size]
comparative = {comparative}
dept_type = {dept_type}
stats = {stats}

[size_buckets]
small_max = {small}
medium_max = {medium}
large_max = {large}
"#,
        top_n = default_top_n(),
        window = default_moving_average_window(),
        split = default_period_split_date(),
        comparative = default_min_comparative(),
        dept_type = default_min_dept_type(),
        stats = default_min_stats(),
        small = default_small_max(),
        medium = default_medium_max(),
        large = default_large_max(),
    )
}
