//! Raw tabular output: one CSV file per derived table, written into an
//! output directory with stable snake_case filenames.

use crate::analysis::AnalysisReport;
use crate::report::OutputWriter;
use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

pub struct CsvWriter {
    dir: PathBuf,
}

impl CsvWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The header row is written explicitly so that an empty table still
    /// carries its schema instead of producing a zero-byte file.
    fn write_table<T: Serialize>(
        &self,
        name: &str,
        columns: &[&str],
        rows: &[T],
    ) -> anyhow::Result<()> {
        let path = self.dir.join(format!("{name}.csv"));
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        writer.write_record(columns)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl OutputWriter for CsvWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;

        self.write_table(
            "overview",
            &[
                "sales_rows",
                "store_rows",
                "feature_rows",
                "distinct_stores",
                "distinct_depts",
                "first_date",
                "last_date",
                "total_sales",
                "avg_weekly_sales",
                "min_store_size",
                "max_store_size",
                "avg_store_size",
            ],
            std::slice::from_ref(&report.overview),
        )?;
        self.write_table("null_counts", &["column", "nulls"], &report.quality.null_counts)?;
        self.write_table(
            "negative_sales",
            &["count", "min", "max"],
            std::slice::from_ref(&report.quality.negative_sales),
        )?;

        self.write_table(
            "store_type_profile",
            &["store_type", "store_count", "avg_size", "min_size", "max_size"],
            &report.store_type_profile,
        )?;
        self.write_table(
            "size_bucket_profile",
            &["bucket", "store_count", "avg_size"],
            &report.size_bucket_profile,
        )?;
        let dept_profile_columns = [
            "dept_id",
            "record_count",
            "store_count",
            "total_sales",
            "avg_sales",
            "rank",
        ];
        self.write_table("dept_profile", &dept_profile_columns, &report.dept_profile)?;
        self.write_table(
            "dept_profile_by_avg",
            &dept_profile_columns,
            &report.dept_profile_by_avg,
        )?;

        self.write_table(
            "yearly_summary",
            &[
                "year",
                "record_count",
                "store_count",
                "dept_count",
                "total_sales",
                "avg_sales",
            ],
            &report.yearly_summary,
        )?;
        self.write_table(
            "monthly_summary",
            &[
                "year",
                "month",
                "record_count",
                "store_count",
                "dept_count",
                "total_sales",
                "avg_sales",
            ],
            &report.monthly_summary,
        )?;
        self.write_table(
            "yoy_growth",
            &["year", "total_sales", "growth_pct"],
            &report.yoy_growth,
        )?;
        self.write_table(
            "quarterly_totals",
            &["year", "quarter", "record_count", "total_sales"],
            &report.quarterly_totals,
        )?;

        self.write_table(
            "holiday_groups",
            &[
                "is_holiday",
                "record_count",
                "total_sales",
                "avg_sales",
                "min_sales",
                "max_sales",
            ],
            &report.holiday.groups,
        )?;
        self.write_table("holiday_dates", &["date"], &report.holiday.holiday_dates)?;

        self.write_table(
            "store_week_coverage",
            &["store_id", "week_count", "first_date", "last_date"],
            &report.store_week_coverage,
        )?;
        self.write_table(
            "store_dept_coverage",
            &["store_id", "dept_count"],
            &report.store_dept_coverage,
        )?;

        self.write_table(
            "store_performance",
            &[
                "store_id",
                "store_type",
                "size",
                "record_count",
                "dept_count",
                "total_sales",
                "avg_sales",
                "rank",
            ],
            &report.store_performance,
        )?;
        self.write_table(
            "store_type_performance",
            &[
                "store_type",
                "store_count",
                "record_count",
                "total_sales",
                "avg_sales",
                "avg_size",
            ],
            &report.store_type_performance,
        )?;
        self.write_table(
            "size_bucket_performance",
            &[
                "bucket",
                "store_count",
                "avg_size",
                "total_sales",
                "avg_sales",
                "sales_per_store",
            ],
            &report.size_bucket_performance,
        )?;
        self.write_table(
            "dept_type_performance",
            &["dept_id", "store_type", "record_count", "total_sales", "avg_sales"],
            &report.dept_type_performance,
        )?;
        self.write_table(
            "dept_volatility",
            &["dept_id", "record_count", "avg_sales", "stddev", "cv_pct", "rank"],
            &report.dept_volatility,
        )?;

        self.write_table(
            "weekday_seasonality",
            &["weekday", "weekday_name", "record_count", "total_sales", "avg_sales"],
            &report.weekday_seasonality,
        )?;
        self.write_table(
            "month_seasonality",
            &["month", "month_name", "record_count", "total_sales", "avg_sales"],
            &report.month_seasonality,
        )?;

        self.write_table(
            "moving_average",
            &["date", "total_sales", "window_avg", "variance_pct"],
            &report.moving_average,
        )?;
        self.write_table(
            "store_consistency",
            &["store_id", "record_count", "avg_sales", "stddev", "cv_pct", "rank"],
            &report.store_consistency,
        )?;
        self.write_table(
            "dept_type_ranking",
            &["dept_id", "store_type", "record_count", "total_sales", "rank_in_dept"],
            &report.dept_type_ranking,
        )?;
        self.write_table(
            "period_comparison",
            &["store_id", "dept_id", "early_avg", "late_avg", "growth_pct"],
            &report.period_comparison,
        )?;

        self.write_table(
            "feature_correlation",
            &["feature", "pair_count", "correlation"],
            &report.feature_correlation,
        )?;

        log::info!("wrote derived tables to {}", self.dir.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_analysis;
    use crate::config::AnalysisConfig;
    use crate::core::types::{Dataset, SalesRecord, Store, StoreType};
    use crate::loader::NullCounts;

    #[test]
    fn writes_one_file_per_table() {
        let dataset = Dataset {
            sales: vec![SalesRecord {
                store_id: 1,
                dept_id: 1,
                date: "2011-01-07".parse().unwrap(),
                weekly_sales: 100.0,
                is_holiday: Some(false),
            }],
            stores: vec![Store {
                store_id: 1,
                store_type: StoreType::A,
                size: 40_000,
            }],
            features: vec![],
        };
        let report = run_analysis(
            &dataset,
            &NullCounts::default(),
            &[],
            &AnalysisConfig::default(),
        );

        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvWriter::new(dir.path().to_path_buf());
        writer.write_report(&report).unwrap();

        for name in [
            "overview",
            "dept_profile",
            "yoy_growth",
            "moving_average",
            "store_performance",
            "feature_correlation",
        ] {
            assert!(
                dir.path().join(format!("{name}.csv")).exists(),
                "missing {name}.csv"
            );
        }

        let contents =
            fs::read_to_string(dir.path().join("store_performance.csv")).unwrap();
        assert!(contents.contains("store_id"));
        assert!(contents.contains('A'));
    }

    #[test]
    fn empty_tables_still_carry_their_header_row() {
        let report = run_analysis(
            &Dataset::default(),
            &NullCounts::default(),
            &[],
            &AnalysisConfig::default(),
        );

        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvWriter::new(dir.path().to_path_buf());
        writer.write_report(&report).unwrap();

        for (name, header) in [
            ("dept_volatility", "dept_id,record_count,avg_sales,stddev,cv_pct,rank"),
            ("yoy_growth", "year,total_sales,growth_pct"),
            ("moving_average", "date,total_sales,window_avg,variance_pct"),
            ("holiday_dates", "date"),
            ("feature_correlation", "feature,pair_count,correlation"),
        ] {
            let contents =
                fs::read_to_string(dir.path().join(format!("{name}.csv"))).unwrap();
            assert_eq!(contents.trim_end(), header, "unexpected schema in {name}.csv");
        }
    }
}
