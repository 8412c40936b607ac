//! Whole-dataset aggregates: the "Basic Overview" table.

use crate::core::stats::mean;
use crate::core::types::Dataset;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub sales_rows: u64,
    pub store_rows: u64,
    pub feature_rows: u64,
    pub distinct_stores: u64,
    pub distinct_depts: u64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub total_sales: f64,
    pub avg_weekly_sales: f64,
    pub min_store_size: Option<u32>,
    pub max_store_size: Option<u32>,
    pub avg_store_size: f64,
}

pub fn overview(dataset: &Dataset) -> Overview {
    let stores: BTreeSet<u32> = dataset.sales.iter().map(|r| r.store_id).collect();
    let depts: BTreeSet<u32> = dataset.sales.iter().map(|r| r.dept_id).collect();
    let sales: Vec<f64> = dataset.sales.iter().map(|r| r.weekly_sales).collect();
    let sizes: Vec<f64> = dataset.stores.iter().map(|s| s.size as f64).collect();

    Overview {
        sales_rows: dataset.sales.len() as u64,
        store_rows: dataset.stores.len() as u64,
        feature_rows: dataset.features.len() as u64,
        distinct_stores: stores.len() as u64,
        distinct_depts: depts.len() as u64,
        first_date: dataset.sales.iter().map(|r| r.date).min(),
        last_date: dataset.sales.iter().map(|r| r.date).max(),
        total_sales: sales.iter().sum(),
        avg_weekly_sales: mean(&sales),
        min_store_size: dataset.stores.iter().map(|s| s.size).min(),
        max_store_size: dataset.stores.iter().map(|s| s.size).max(),
        avg_store_size: mean(&sizes),
    }
}
