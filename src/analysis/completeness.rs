//! Per-store coverage: how many weeks and departments each store reports.

use crate::core::types::Dataset;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreWeekCoverageRow {
    pub store_id: u32,
    pub week_count: u64,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDeptCoverageRow {
    pub store_id: u32,
    pub dept_count: u64,
}

/// Distinct reporting dates per store, sorted descending by count (store_id
/// ascending on ties).
pub fn store_week_coverage(dataset: &Dataset) -> Vec<StoreWeekCoverageRow> {
    let mut groups: BTreeMap<u32, BTreeSet<NaiveDate>> = BTreeMap::new();
    for record in &dataset.sales {
        groups.entry(record.store_id).or_default().insert(record.date);
    }

    let mut rows: Vec<StoreWeekCoverageRow> = groups
        .into_iter()
        .map(|(store_id, dates)| StoreWeekCoverageRow {
            store_id,
            week_count: dates.len() as u64,
            // sets are non-empty by construction
            first_date: *dates.iter().next().unwrap(),
            last_date: *dates.iter().next_back().unwrap(),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.week_count
            .cmp(&a.week_count)
            .then(a.store_id.cmp(&b.store_id))
    });
    rows
}

/// Distinct departments per store, sorted descending by count.
pub fn store_dept_coverage(dataset: &Dataset) -> Vec<StoreDeptCoverageRow> {
    let mut groups: BTreeMap<u32, BTreeSet<u32>> = BTreeMap::new();
    for record in &dataset.sales {
        groups
            .entry(record.store_id)
            .or_default()
            .insert(record.dept_id);
    }

    let mut rows: Vec<StoreDeptCoverageRow> = groups
        .into_iter()
        .map(|(store_id, depts)| StoreDeptCoverageRow {
            store_id,
            dept_count: depts.len() as u64,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.dept_count
            .cmp(&a.dept_count)
            .then(a.store_id.cmp(&b.store_id))
    });
    rows
}
