//! Calendar groupings and trend tables: yearly/monthly summaries,
//! year-over-year growth, quarterly totals.
//!
//! The prior-period lookup behind YoY growth is an explicit pass over rows
//! pre-sorted by year, standing in for a LAG window function.

use crate::core::stats::percent_change;
use crate::core::types::Dataset;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySummaryRow {
    pub year: i32,
    pub record_count: u64,
    pub store_count: u64,
    pub dept_count: u64,
    pub total_sales: f64,
    pub avg_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummaryRow {
    pub year: i32,
    pub month: u32,
    pub record_count: u64,
    pub store_count: u64,
    pub dept_count: u64,
    pub total_sales: f64,
    pub avg_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoyGrowthRow {
    pub year: i32,
    pub total_sales: f64,
    /// `None` for the first year and whenever the prior year's total is
    /// exactly zero.
    pub growth_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyTotalRow {
    pub year: i32,
    pub quarter: u32,
    pub record_count: u64,
    pub total_sales: f64,
}

#[derive(Default)]
struct PeriodAccumulator {
    record_count: u64,
    stores: BTreeSet<u32>,
    depts: BTreeSet<u32>,
    total_sales: f64,
}

fn accumulate<K: Ord>(
    dataset: &Dataset,
    key: impl Fn(&crate::core::types::SalesRecord) -> K,
) -> BTreeMap<K, PeriodAccumulator> {
    let mut groups: BTreeMap<K, PeriodAccumulator> = BTreeMap::new();
    for record in &dataset.sales {
        let acc = groups.entry(key(record)).or_default();
        acc.record_count += 1;
        acc.stores.insert(record.store_id);
        acc.depts.insert(record.dept_id);
        acc.total_sales += record.weekly_sales;
    }
    groups
}

pub fn yearly_summary(dataset: &Dataset) -> Vec<YearlySummaryRow> {
    accumulate(dataset, |r| r.date.year())
        .into_iter()
        .map(|(year, acc)| YearlySummaryRow {
            year,
            record_count: acc.record_count,
            store_count: acc.stores.len() as u64,
            dept_count: acc.depts.len() as u64,
            total_sales: acc.total_sales,
            avg_sales: acc.total_sales / acc.record_count as f64,
        })
        .collect()
}

/// One row per (year, month) of the series, chronological. This table doubles
/// as the monthly sales trend.
pub fn monthly_summary(dataset: &Dataset) -> Vec<MonthlySummaryRow> {
    accumulate(dataset, |r| (r.date.year(), r.date.month()))
        .into_iter()
        .map(|((year, month), acc)| MonthlySummaryRow {
            year,
            month,
            record_count: acc.record_count,
            store_count: acc.stores.len() as u64,
            dept_count: acc.depts.len() as u64,
            total_sales: acc.total_sales,
            avg_sales: acc.total_sales / acc.record_count as f64,
        })
        .collect()
}

/// Year-over-year growth of total sales, chronological. Computed as a single
/// pass carrying the previous year's total.
pub fn yoy_growth(dataset: &Dataset) -> Vec<YoyGrowthRow> {
    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
    for record in &dataset.sales {
        *totals.entry(record.date.year()).or_insert(0.0) += record.weekly_sales;
    }

    let mut rows = Vec::with_capacity(totals.len());
    let mut previous: Option<f64> = None;
    for (year, total) in totals {
        rows.push(YoyGrowthRow {
            year,
            total_sales: total,
            growth_pct: previous.and_then(|prev| percent_change(total, prev)),
        });
        previous = Some(total);
    }
    rows
}

fn quarter_of(month: u32) -> u32 {
    (month - 1) / 3 + 1
}

pub fn quarterly_totals(dataset: &Dataset) -> Vec<QuarterlyTotalRow> {
    accumulate(dataset, |r| (r.date.year(), quarter_of(r.date.month())))
        .into_iter()
        .map(|((year, quarter), acc)| QuarterlyTotalRow {
            year,
            quarter,
            record_count: acc.record_count,
            total_sales: acc.total_sales,
        })
        .collect()
}
