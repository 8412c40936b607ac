//! Store and department profiles: type/size distribution and per-department
//! sales rankings.

use crate::config::SizeBuckets;
use crate::core::stats::mean;
use crate::core::types::{Dataset, SizeBucket, StoreType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreTypeProfileRow {
    pub store_type: StoreType,
    pub store_count: u64,
    pub avg_size: f64,
    pub min_size: u32,
    pub max_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeBucketProfileRow {
    pub bucket: SizeBucket,
    pub store_count: u64,
    pub avg_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeptProfileRow {
    pub dept_id: u32,
    pub record_count: u64,
    pub store_count: u64,
    pub total_sales: f64,
    pub avg_sales: f64,
    pub rank: u64,
}

/// Group stores by type: count and size statistics, ordered A then B then C.
pub fn store_type_profile(dataset: &Dataset) -> Vec<StoreTypeProfileRow> {
    let mut groups: BTreeMap<StoreType, Vec<u32>> = BTreeMap::new();
    for store in &dataset.stores {
        groups.entry(store.store_type).or_default().push(store.size);
    }

    groups
        .into_iter()
        .map(|(store_type, sizes)| {
            let as_f64: Vec<f64> = sizes.iter().map(|s| *s as f64).collect();
            StoreTypeProfileRow {
                store_type,
                store_count: sizes.len() as u64,
                avg_size: mean(&as_f64),
                min_size: sizes.iter().copied().min().unwrap_or(0),
                max_size: sizes.iter().copied().max().unwrap_or(0),
            }
        })
        .collect()
}

/// Bucket stores by size. Only buckets with at least one store appear, in
/// Small..Extra Large order.
pub fn size_bucket_profile(dataset: &Dataset, buckets: &SizeBuckets) -> Vec<SizeBucketProfileRow> {
    let mut groups: BTreeMap<SizeBucket, Vec<f64>> = BTreeMap::new();
    for store in &dataset.stores {
        groups
            .entry(SizeBucket::classify(store.size, buckets))
            .or_default()
            .push(store.size as f64);
    }

    groups
        .into_iter()
        .map(|(bucket, sizes)| SizeBucketProfileRow {
            bucket,
            store_count: sizes.len() as u64,
            avg_size: mean(&sizes),
        })
        .collect()
}

struct DeptAccumulator {
    record_count: u64,
    stores: BTreeSet<u32>,
    total_sales: f64,
}

fn dept_groups(dataset: &Dataset) -> BTreeMap<u32, DeptAccumulator> {
    let mut groups: BTreeMap<u32, DeptAccumulator> = BTreeMap::new();
    for record in &dataset.sales {
        let acc = groups.entry(record.dept_id).or_insert(DeptAccumulator {
            record_count: 0,
            stores: BTreeSet::new(),
            total_sales: 0.0,
        });
        acc.record_count += 1;
        acc.stores.insert(record.store_id);
        acc.total_sales += record.weekly_sales;
    }
    groups
}

fn to_rows(groups: BTreeMap<u32, DeptAccumulator>) -> Vec<DeptProfileRow> {
    groups
        .into_iter()
        .map(|(dept_id, acc)| DeptProfileRow {
            dept_id,
            record_count: acc.record_count,
            store_count: acc.stores.len() as u64,
            total_sales: acc.total_sales,
            avg_sales: acc.total_sales / acc.record_count as f64,
            rank: 0,
        })
        .collect()
}

fn assign_ranks(rows: &mut [DeptProfileRow]) {
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as u64 + 1;
    }
}

/// Per-department profile ranked descending by total sales, ties broken by
/// dept_id ascending for determinism.
pub fn dept_profile(dataset: &Dataset) -> Vec<DeptProfileRow> {
    let mut rows = to_rows(dept_groups(dataset));
    rows.sort_by(|a, b| {
        b.total_sales
            .partial_cmp(&a.total_sales)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.dept_id.cmp(&b.dept_id))
    });
    assign_ranks(&mut rows);
    rows
}

/// Variant restricted to departments with a large enough sample, ranked
/// descending by average sales.
pub fn dept_profile_by_avg(dataset: &Dataset, min_records: usize) -> Vec<DeptProfileRow> {
    let mut rows: Vec<DeptProfileRow> = to_rows(dept_groups(dataset))
        .into_iter()
        .filter(|row| row.record_count >= min_records as u64)
        .collect();
    rows.sort_by(|a, b| {
        b.avg_sales
            .partial_cmp(&a.avg_sales)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.dept_id.cmp(&b.dept_id))
    });
    assign_ranks(&mut rows);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{SalesRecord, Store};

    fn record(store: u32, dept: u32, sales: f64) -> SalesRecord {
        SalesRecord {
            store_id: store,
            dept_id: dept,
            date: "2011-05-06".parse().unwrap(),
            weekly_sales: sales,
            is_holiday: Some(false),
        }
    }

    fn store(id: u32, store_type: StoreType, size: u32) -> Store {
        Store {
            store_id: id,
            store_type,
            size,
        }
    }

    #[test]
    fn type_profile_groups_all_stores() {
        let dataset = Dataset {
            sales: vec![],
            stores: vec![
                store(1, StoreType::A, 150_000),
                store(2, StoreType::A, 170_000),
                store(3, StoreType::B, 90_000),
            ],
            features: vec![],
        };
        let rows = store_type_profile(&dataset);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].store_type, StoreType::A);
        assert_eq!(rows[0].store_count, 2);
        assert_eq!(rows[0].avg_size, 160_000.0);
        assert_eq!(rows[0].min_size, 150_000);
        assert_eq!(rows[0].max_size, 170_000);
        let total: u64 = rows.iter().map(|r| r.store_count).sum();
        assert_eq!(total, dataset.stores.len() as u64);
    }

    #[test]
    fn bucket_profile_omits_empty_buckets() {
        let dataset = Dataset {
            sales: vec![],
            stores: vec![
                store(1, StoreType::A, 40_000),
                store(2, StoreType::B, 90_000),
                store(3, StoreType::C, 160_000),
            ],
            features: vec![],
        };
        let rows = size_bucket_profile(&dataset, &SizeBuckets::default());
        let buckets: Vec<SizeBucket> = rows.iter().map(|r| r.bucket).collect();
        assert_eq!(
            buckets,
            vec![SizeBucket::Small, SizeBucket::Medium, SizeBucket::ExtraLarge]
        );
        assert!(rows.iter().all(|r| r.store_count == 1));
    }

    #[test]
    fn dept_profile_ranks_by_total_with_dept_id_tiebreak() {
        let dataset = Dataset {
            sales: vec![
                record(1, 3, 100.0),
                record(1, 1, 50.0),
                record(2, 1, 50.0),
                record(1, 2, 100.0),
            ],
            stores: vec![],
            features: vec![],
        };
        let rows = dept_profile(&dataset);
        // depts 1, 2, 3 all total 100; ties resolve by dept_id ascending
        assert_eq!(
            rows.iter().map(|r| r.dept_id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(rows.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(rows[0].store_count, 2);

        let total: u64 = rows.iter().map(|r| r.record_count).sum();
        assert_eq!(total, dataset.sales.len() as u64);
    }

    #[test]
    fn avg_variant_filters_small_samples() {
        let mut sales = Vec::new();
        for _ in 0..100 {
            sales.push(record(1, 1, 10.0));
        }
        sales.push(record(1, 2, 1_000_000.0));
        let dataset = Dataset {
            sales,
            stores: vec![],
            features: vec![],
        };
        let rows = dept_profile_by_avg(&dataset, 100);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].dept_id, 1);
        assert_eq!(rows[0].avg_sales, 10.0);
    }

    #[test]
    fn empty_input_yields_empty_tables() {
        let dataset = Dataset::default();
        assert!(store_type_profile(&dataset).is_empty());
        assert!(size_bucket_profile(&dataset, &SizeBuckets::default()).is_empty());
        assert!(dept_profile(&dataset).is_empty());
    }
}
