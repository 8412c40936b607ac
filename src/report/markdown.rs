//! Narrative markdown report. Headline figures (top store, top department,
//! year-over-year growth, holiday impact, best and worst periods) are filled
//! from the derived tables; anything null renders as `n/a`.

use crate::analysis::AnalysisReport;
use crate::report::{fmt_money, fmt_opt_pct, OutputWriter};
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_summary(report)?;
        self.write_quality(report)?;
        self.write_trends(report)?;
        self.write_store_performance(report)?;
        self.write_departments(report)?;
        self.write_seasonality(report)?;
        self.write_holiday(report)?;
        self.write_correlations(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Sales Analysis Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        for summary in &report.load {
            writeln!(
                self.writer,
                "- Loaded `{}`: {} rows, {} columns",
                summary.file.display(),
                summary.rows,
                summary.columns
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let overview = &report.overview;
        writeln!(self.writer, "## Executive Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Sales records | {} |", overview.sales_rows)?;
        writeln!(self.writer, "| Stores | {} |", overview.distinct_stores)?;
        writeln!(self.writer, "| Departments | {} |", overview.distinct_depts)?;
        writeln!(
            self.writer,
            "| Period | {} |",
            match (overview.first_date, overview.last_date) {
                (Some(first), Some(last)) => format!("{first} to {last}"),
                _ => "n/a".to_string(),
            }
        )?;
        writeln!(
            self.writer,
            "| Total sales | {} |",
            fmt_money(overview.total_sales)
        )?;
        writeln!(
            self.writer,
            "| Average weekly sales | {} |",
            fmt_money(overview.avg_weekly_sales)
        )?;
        writeln!(self.writer)?;

        match report.store_performance.first() {
            Some(top) => writeln!(
                self.writer,
                "The top-performing store is **store {}** (type {}, size {}), with total \
                 sales of {} across {} departments.",
                top.store_id,
                top.store_type,
                top.size,
                fmt_money(top.total_sales),
                top.dept_count
            )?,
            None => writeln!(self.writer, "Top-performing store: n/a.")?,
        }
        match report.dept_profile.first() {
            Some(top) => writeln!(
                self.writer,
                "The top-revenue department is **department {}**, totalling {} over {} \
                 stores.",
                top.dept_id,
                fmt_money(top.total_sales),
                top.store_count
            )?,
            None => writeln!(self.writer, "Top-revenue department: n/a.")?,
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_quality(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let quality = &report.quality;
        writeln!(self.writer, "## Data Quality")?;
        writeln!(self.writer)?;
        if !quality.has_findings() {
            writeln!(self.writer, "No quality findings.")?;
            writeln!(self.writer)?;
            return Ok(());
        }
        for count in &quality.null_counts {
            if count.nulls > 0 {
                writeln!(
                    self.writer,
                    "- `{}`: {} null values",
                    count.column, count.nulls
                )?;
            }
        }
        if quality.negative_sales.count > 0 {
            writeln!(
                self.writer,
                "- {} records with negative weekly sales (range {} to {})",
                quality.negative_sales.count,
                quality
                    .negative_sales
                    .min
                    .map(fmt_money)
                    .unwrap_or_else(|| "n/a".into()),
                quality
                    .negative_sales
                    .max
                    .map(fmt_money)
                    .unwrap_or_else(|| "n/a".into()),
            )?;
        }
        if !quality.unknown_store_ids.is_empty() {
            writeln!(
                self.writer,
                "- {} sales records reference {} store ids missing from store metadata",
                quality.unknown_store_records,
                quality.unknown_store_ids.len()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_trends(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Sales Trends")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Year | Total Sales | YoY Growth |")?;
        writeln!(self.writer, "|------|-------------|------------|")?;
        for row in &report.yoy_growth {
            writeln!(
                self.writer,
                "| {} | {} | {} |",
                row.year,
                fmt_money(row.total_sales),
                fmt_opt_pct(row.growth_pct)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_store_performance(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Store Performance")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Rank | Store | Type | Size | Total Sales | Avg Sales | Depts |"
        )?;
        writeln!(
            self.writer,
            "|------|-------|------|------|-------------|-----------|-------|"
        )?;
        for row in report.store_performance.iter().take(report.config.top_n) {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} | {} |",
                row.rank,
                row.store_id,
                row.store_type,
                row.size,
                fmt_money(row.total_sales),
                fmt_money(row.avg_sales),
                row.dept_count
            )?;
        }
        writeln!(self.writer)?;

        writeln!(self.writer, "### By Store Type")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Type | Stores | Total Sales | Avg Sales | Avg Size |"
        )?;
        writeln!(self.writer, "|------|--------|-------------|-----------|----------|")?;
        for row in &report.store_type_performance {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {:.0} |",
                row.store_type,
                row.store_count,
                fmt_money(row.total_sales),
                fmt_money(row.avg_sales),
                row.avg_size
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_departments(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Department Performance")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Rank | Dept | Records | Stores | Total Sales | Avg Sales |"
        )?;
        writeln!(
            self.writer,
            "|------|------|---------|--------|-------------|-----------|"
        )?;
        for row in report.dept_profile.iter().take(report.config.top_n) {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} |",
                row.rank,
                row.dept_id,
                row.record_count,
                row.store_count,
                fmt_money(row.total_sales),
                fmt_money(row.avg_sales)
            )?;
        }
        writeln!(self.writer)?;

        match report.dept_volatility.first() {
            Some(most_consistent) => writeln!(
                self.writer,
                "The most consistent department is **department {}** (coefficient of \
                 variation {}).",
                most_consistent.dept_id,
                match most_consistent.cv_pct {
                    Some(cv) => format!("{cv:.1}%"),
                    None => "n/a".to_string(),
                }
            )?,
            None => writeln!(self.writer, "Most consistent department: n/a.")?,
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_seasonality(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Seasonality")?;
        writeln!(self.writer)?;

        let best_month = report
            .month_seasonality
            .iter()
            .max_by(|a, b| a.avg_sales.total_cmp(&b.avg_sales));
        let worst_month = report
            .month_seasonality
            .iter()
            .min_by(|a, b| a.avg_sales.total_cmp(&b.avg_sales));
        match (best_month, worst_month) {
            (Some(best), Some(worst)) => {
                writeln!(
                    self.writer,
                    "The strongest month is **{}** (average {} per record); the weakest \
                     is **{}** ({}).",
                    best.month_name,
                    fmt_money(best.avg_sales),
                    worst.month_name,
                    fmt_money(worst.avg_sales)
                )?;
            }
            _ => writeln!(self.writer, "Best/worst month: n/a.")?,
        }

        let best_day = report
            .weekday_seasonality
            .iter()
            .max_by(|a, b| a.avg_sales.total_cmp(&b.avg_sales));
        let worst_day = report
            .weekday_seasonality
            .iter()
            .min_by(|a, b| a.avg_sales.total_cmp(&b.avg_sales));
        match (best_day, worst_day) {
            (Some(best), Some(worst)) if best.weekday != worst.weekday => writeln!(
                self.writer,
                "Reporting days range from **{}** (best, average {}) to **{}** (worst, {}).",
                best.weekday_name,
                fmt_money(best.avg_sales),
                worst.weekday_name,
                fmt_money(worst.avg_sales)
            )?,
            (Some(only), _) => writeln!(
                self.writer,
                "All records fall on **{}**.",
                only.weekday_name
            )?,
            _ => writeln!(self.writer, "Best/worst day: n/a.")?,
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_holiday(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Holiday Impact")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Holiday weeks move average sales by **{}** against non-holiday weeks.",
            fmt_opt_pct(report.holiday.impact_pct)
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Group | Records | Avg Sales | Total Sales |")?;
        writeln!(self.writer, "|-------|---------|-----------|-------------|")?;
        for group in &report.holiday.groups {
            let label = match group.is_holiday {
                Some(true) => "Holiday",
                Some(false) => "Non-holiday",
                None => "Unknown",
            };
            writeln!(
                self.writer,
                "| {} | {} | {} | {} |",
                label,
                group.record_count,
                fmt_money(group.avg_sales),
                fmt_money(group.total_sales)
            )?;
        }
        writeln!(self.writer)?;
        if !report.holiday.holiday_dates.is_empty() {
            writeln!(
                self.writer,
                "{} distinct holiday weeks, from {} to {}.",
                report.holiday.holiday_dates.len(),
                report.holiday.holiday_dates[0],
                report.holiday.holiday_dates[report.holiday.holiday_dates.len() - 1]
            )?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_correlations(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Economic Factors")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Factor | Pairs | Correlation |")?;
        writeln!(self.writer, "|--------|-------|-------------|")?;
        for row in &report.feature_correlation {
            writeln!(
                self.writer,
                "| {} | {} | {} |",
                row.feature,
                row.pair_count,
                match row.correlation {
                    Some(r) => format!("{r:.3}"),
                    None => "n/a".to_string(),
                }
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_analysis;
    use crate::config::AnalysisConfig;
    use crate::core::types::Dataset;
    use crate::loader::NullCounts;

    #[test]
    fn empty_dataset_renders_na_markers_not_zeros() {
        let report = run_analysis(
            &Dataset::default(),
            &NullCounts::default(),
            &[],
            &AnalysisConfig::default(),
        );
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer)
            .write_report(&report)
            .unwrap();
        let rendered = String::from_utf8(buffer).unwrap();
        assert!(rendered.contains("# Sales Analysis Report"));
        assert!(rendered.contains("Top-performing store: n/a."));
        assert!(rendered.contains("**n/a**"));
    }
}
