//! Terminal summary: colored section headers with comfy-table tables for
//! the headline rankings.

use crate::analysis::AnalysisReport;
use crate::report::{fmt_money, fmt_opt_pct, OutputWriter};
use colored::*;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};

pub struct TerminalWriter;

impl Default for TerminalWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalWriter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputWriter for TerminalWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        print_header();
        print_overview(report);
        print_quality(report);
        print_trends(report);
        print_top_stores(report);
        print_departments(report);
        print_holiday(report);
        Ok(())
    }
}

fn section(title: &str) {
    println!();
    println!("{}", title.bold().cyan());
    println!("{}", "───────────────────────────────────────────".cyan());
}

fn print_header() {
    println!("{}", "═══════════════════════════════════════════".cyan());
    println!("{}", "           SALES ANALYSIS REPORT".bold().cyan());
    println!("{}", "═══════════════════════════════════════════".cyan());
}

fn print_overview(report: &AnalysisReport) {
    let overview = &report.overview;
    section("Overview");
    println!("Records:      {}", overview.sales_rows);
    println!(
        "Stores:       {} ({} with metadata)",
        overview.distinct_stores, overview.store_rows
    );
    println!("Departments:  {}", overview.distinct_depts);
    match (overview.first_date, overview.last_date) {
        (Some(first), Some(last)) => println!("Period:       {first} to {last}"),
        _ => println!("Period:       n/a"),
    }
    println!("Total sales:  {}", fmt_money(overview.total_sales));
    println!("Avg weekly:   {}", fmt_money(overview.avg_weekly_sales));
}

fn print_quality(report: &AnalysisReport) {
    let quality = &report.quality;
    section("Data Quality");
    if !quality.has_findings() {
        println!("{}", "No findings".green());
        return;
    }
    for count in &quality.null_counts {
        if count.nulls > 0 {
            println!(
                "{} {}: {} nulls",
                "⚠".yellow(),
                count.column,
                count.nulls
            );
        }
    }
    if quality.negative_sales.count > 0 {
        println!(
            "{} {} negative weekly-sales records",
            "⚠".yellow(),
            quality.negative_sales.count
        );
    }
    if !quality.unknown_store_ids.is_empty() {
        println!(
            "{} {} records reference unknown store ids",
            "⚠".yellow(),
            quality.unknown_store_records
        );
    }
}

fn print_trends(report: &AnalysisReport) {
    section("Yearly Trend");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Year", "Total Sales", "YoY Growth"]);
    for row in &report.yoy_growth {
        table.add_row(vec![
            row.year.to_string(),
            fmt_money(row.total_sales),
            fmt_opt_pct(row.growth_pct),
        ]);
    }
    println!("{table}");
}

fn print_top_stores(report: &AnalysisReport) {
    section("Top Stores");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rank", "Store", "Type", "Total Sales", "Avg Sales"]);
    for row in report.store_performance.iter().take(report.config.top_n) {
        table.add_row(vec![
            row.rank.to_string(),
            row.store_id.to_string(),
            row.store_type.to_string(),
            fmt_money(row.total_sales),
            fmt_money(row.avg_sales),
        ]);
    }
    println!("{table}");
}

fn print_departments(report: &AnalysisReport) {
    section("Top Departments");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rank", "Dept", "Total Sales", "Avg Sales", "Stores"]);
    for row in report.dept_profile.iter().take(report.config.top_n) {
        table.add_row(vec![
            row.rank.to_string(),
            row.dept_id.to_string(),
            fmt_money(row.total_sales),
            fmt_money(row.avg_sales),
            row.store_count.to_string(),
        ]);
    }
    println!("{table}");
}

fn print_holiday(report: &AnalysisReport) {
    section("Holiday Impact");
    let impact = fmt_opt_pct(report.holiday.impact_pct);
    let rendered = match report.holiday.impact_pct {
        Some(v) if v > 0.0 => impact.green(),
        Some(_) => impact.red(),
        None => impact.normal(),
    };
    println!("Holiday vs non-holiday average sales: {rendered}");
    println!(
        "Distinct holiday weeks: {}",
        report.holiday.holiday_dates.len()
    );
}
