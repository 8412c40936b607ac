//! Performance tables built on the sales-to-store join: per store, per
//! store type, per size bucket, and per (department, store type), plus the
//! volatility ranking.
//!
//! The join is an inner join on store_id; sales rows for unknown stores are
//! surfaced by the quality report and excluded here.

use crate::config::SizeBuckets;
use crate::core::stats::{coefficient_of_variation, mean, sample_stddev};
use crate::core::types::{Dataset, SizeBucket, Store, StoreType};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePerformanceRow {
    pub store_id: u32,
    pub store_type: StoreType,
    pub size: u32,
    pub record_count: u64,
    pub dept_count: u64,
    pub total_sales: f64,
    pub avg_sales: f64,
    pub rank: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypePerformanceRow {
    pub store_type: StoreType,
    pub store_count: u64,
    pub record_count: u64,
    pub total_sales: f64,
    pub avg_sales: f64,
    pub avg_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketPerformanceRow {
    pub bucket: SizeBucket,
    pub store_count: u64,
    pub avg_size: f64,
    pub total_sales: f64,
    pub avg_sales: f64,
    pub sales_per_store: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeptTypePerformanceRow {
    pub dept_id: u32,
    pub store_type: StoreType,
    pub record_count: u64,
    pub total_sales: f64,
    pub avg_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeptVolatilityRow {
    pub dept_id: u32,
    pub record_count: u64,
    pub avg_sales: f64,
    pub stddev: f64,
    /// stddev / avg * 100; `None` when the average is exactly zero.
    pub cv_pct: Option<f64>,
    pub rank: u64,
}

fn store_index(dataset: &Dataset) -> BTreeMap<u32, &Store> {
    dataset.stores.iter().map(|s| (s.store_id, s)).collect()
}

fn cmp_f64_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Per-store totals over the join, ranked descending by total sales. The
/// reporter applies the configured top-N when displaying.
pub fn store_performance(dataset: &Dataset) -> Vec<StorePerformanceRow> {
    let stores = store_index(dataset);

    struct Acc {
        record_count: u64,
        depts: BTreeSet<u32>,
        total: f64,
    }
    let mut groups: BTreeMap<u32, Acc> = BTreeMap::new();
    for record in &dataset.sales {
        if !stores.contains_key(&record.store_id) {
            continue;
        }
        let acc = groups.entry(record.store_id).or_insert(Acc {
            record_count: 0,
            depts: BTreeSet::new(),
            total: 0.0,
        });
        acc.record_count += 1;
        acc.depts.insert(record.dept_id);
        acc.total += record.weekly_sales;
    }

    let mut rows: Vec<StorePerformanceRow> = groups
        .into_iter()
        .map(|(store_id, acc)| {
            let store = stores[&store_id];
            StorePerformanceRow {
                store_id,
                store_type: store.store_type,
                size: store.size,
                record_count: acc.record_count,
                dept_count: acc.depts.len() as u64,
                total_sales: acc.total,
                avg_sales: acc.total / acc.record_count as f64,
                rank: 0,
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        cmp_f64_desc(a.total_sales, b.total_sales).then(a.store_id.cmp(&b.store_id))
    });
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as u64 + 1;
    }
    rows
}

pub fn store_type_performance(dataset: &Dataset) -> Vec<TypePerformanceRow> {
    let stores = store_index(dataset);

    struct Acc {
        store_ids: BTreeSet<u32>,
        record_count: u64,
        total: f64,
    }
    let mut groups: BTreeMap<StoreType, Acc> = BTreeMap::new();
    for record in &dataset.sales {
        let Some(store) = stores.get(&record.store_id) else {
            continue;
        };
        let acc = groups.entry(store.store_type).or_insert(Acc {
            store_ids: BTreeSet::new(),
            record_count: 0,
            total: 0.0,
        });
        acc.store_ids.insert(record.store_id);
        acc.record_count += 1;
        acc.total += record.weekly_sales;
    }

    groups
        .into_iter()
        .map(|(store_type, acc)| {
            let sizes: Vec<f64> = acc
                .store_ids
                .iter()
                .map(|id| stores[id].size as f64)
                .collect();
            TypePerformanceRow {
                store_type,
                store_count: acc.store_ids.len() as u64,
                record_count: acc.record_count,
                total_sales: acc.total,
                avg_sales: acc.total / acc.record_count as f64,
                avg_size: mean(&sizes),
            }
        })
        .collect()
}

/// Size-bucket correlation table. `sales_per_store` divides the bucket's
/// total sales by its distinct reporting stores.
pub fn size_bucket_performance(
    dataset: &Dataset,
    buckets: &SizeBuckets,
) -> Vec<BucketPerformanceRow> {
    let stores = store_index(dataset);

    struct Acc {
        store_ids: BTreeSet<u32>,
        record_count: u64,
        total: f64,
    }
    let mut groups: BTreeMap<SizeBucket, Acc> = BTreeMap::new();
    for record in &dataset.sales {
        let Some(store) = stores.get(&record.store_id) else {
            continue;
        };
        let bucket = SizeBucket::classify(store.size, buckets);
        let acc = groups.entry(bucket).or_insert(Acc {
            store_ids: BTreeSet::new(),
            record_count: 0,
            total: 0.0,
        });
        acc.store_ids.insert(record.store_id);
        acc.record_count += 1;
        acc.total += record.weekly_sales;
    }

    groups
        .into_iter()
        .map(|(bucket, acc)| {
            let sizes: Vec<f64> = acc
                .store_ids
                .iter()
                .map(|id| stores[id].size as f64)
                .collect();
            BucketPerformanceRow {
                bucket,
                store_count: acc.store_ids.len() as u64,
                avg_size: mean(&sizes),
                total_sales: acc.total,
                avg_sales: acc.total / acc.record_count as f64,
                sales_per_store: acc.total / acc.store_ids.len() as f64,
            }
        })
        .collect()
}

/// Per (dept, store_type) totals, restricted to groups with at least
/// `min_records` observations.
pub fn dept_type_performance(
    dataset: &Dataset,
    min_records: usize,
) -> Vec<DeptTypePerformanceRow> {
    let stores = store_index(dataset);

    let mut groups: BTreeMap<(u32, StoreType), (u64, f64)> = BTreeMap::new();
    for record in &dataset.sales {
        let Some(store) = stores.get(&record.store_id) else {
            continue;
        };
        let entry = groups
            .entry((record.dept_id, store.store_type))
            .or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += record.weekly_sales;
    }

    groups
        .into_iter()
        .filter(|(_, (count, _))| *count >= min_records as u64)
        .map(|((dept_id, store_type), (count, total))| DeptTypePerformanceRow {
            dept_id,
            store_type,
            record_count: count,
            total_sales: total,
            avg_sales: total / count as f64,
        })
        .collect()
}

/// Volatility ranking: departments with enough history, ranked ascending by
/// coefficient of variation so the most consistent come first.
pub fn dept_volatility(dataset: &Dataset, min_records: usize) -> Vec<DeptVolatilityRow> {
    let mut groups: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for record in &dataset.sales {
        groups
            .entry(record.dept_id)
            .or_default()
            .push(record.weekly_sales);
    }

    let mut rows: Vec<DeptVolatilityRow> = groups
        .into_iter()
        .filter(|(_, sales)| sales.len() >= min_records)
        .map(|(dept_id, sales)| DeptVolatilityRow {
            dept_id,
            record_count: sales.len() as u64,
            avg_sales: mean(&sales),
            stddev: sample_stddev(&sales),
            cv_pct: coefficient_of_variation(&sales),
            rank: 0,
        })
        .collect();

    // Ascending by CV; null CVs (zero average) sort last, ties by dept_id.
    rows.sort_by(|a, b| match (a.cv_pct, b.cv_pct) {
        (Some(x), Some(y)) => x
            .partial_cmp(&y)
            .unwrap_or(Ordering::Equal)
            .then(a.dept_id.cmp(&b.dept_id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.dept_id.cmp(&b.dept_id),
    });
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as u64 + 1;
    }
    rows
}
