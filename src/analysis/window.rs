//! Windowed and comparative computations: the trailing moving average,
//! store consistency ranking, within-department store-type ranking, and the
//! before/after period split.
//!
//! Window functions are explicit sequential passes over rows pre-sorted by
//! the ordering key.

use crate::core::stats::{coefficient_of_variation, mean, percent_change, sample_stddev};
use crate::core::types::{Dataset, StoreType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageRow {
    pub date: NaiveDate,
    pub total_sales: f64,
    /// Trailing average over this row and up to window-1 preceding rows;
    /// fewer terms are available at the series start.
    pub window_avg: f64,
    /// (actual - window_avg) / window_avg * 100; `None` when the window
    /// average is zero.
    pub variance_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConsistencyRow {
    pub store_id: u32,
    pub record_count: u64,
    pub avg_sales: f64,
    pub stddev: f64,
    pub cv_pct: Option<f64>,
    pub rank: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeptTypeRankRow {
    pub dept_id: u32,
    pub store_type: StoreType,
    pub record_count: u64,
    pub total_sales: f64,
    /// 1 = best store type for this department.
    pub rank_in_dept: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparisonRow {
    pub store_id: u32,
    pub dept_id: u32,
    pub early_avg: f64,
    pub late_avg: f64,
    pub growth_pct: Option<f64>,
}

/// Per-date total sales across all stores and departments, chronological,
/// with a trailing moving average.
pub fn moving_average(dataset: &Dataset, window: usize) -> Vec<MovingAverageRow> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in &dataset.sales {
        *totals.entry(record.date).or_insert(0.0) += record.weekly_sales;
    }

    let window = window.max(1);
    let series: Vec<(NaiveDate, f64)> = totals.into_iter().collect();
    let mut rows = Vec::with_capacity(series.len());
    for (i, (date, total)) in series.iter().enumerate() {
        let start = (i + 1).saturating_sub(window);
        let terms: Vec<f64> = series[start..=i].iter().map(|(_, t)| *t).collect();
        let window_avg = mean(&terms);
        rows.push(MovingAverageRow {
            date: *date,
            total_sales: *total,
            window_avg,
            variance_pct: percent_change(*total, window_avg),
        });
    }
    rows
}

/// Stores with enough history ranked ascending by stddev/avg, so the most
/// consistent stores come first. Null CVs (zero average) sort last.
pub fn store_consistency(dataset: &Dataset, min_records: usize) -> Vec<StoreConsistencyRow> {
    let mut groups: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for record in &dataset.sales {
        groups
            .entry(record.store_id)
            .or_default()
            .push(record.weekly_sales);
    }

    let mut rows: Vec<StoreConsistencyRow> = groups
        .into_iter()
        .filter(|(_, sales)| sales.len() >= min_records)
        .map(|(store_id, sales)| StoreConsistencyRow {
            store_id,
            record_count: sales.len() as u64,
            avg_sales: mean(&sales),
            stddev: sample_stddev(&sales),
            cv_pct: coefficient_of_variation(&sales),
            rank: 0,
        })
        .collect();

    rows.sort_by(|a, b| match (a.cv_pct, b.cv_pct) {
        (Some(x), Some(y)) => x
            .partial_cmp(&y)
            .unwrap_or(Ordering::Equal)
            .then(a.store_id.cmp(&b.store_id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.store_id.cmp(&b.store_id),
    });
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as u64 + 1;
    }
    rows
}

/// Rank store types within each department by total sales descending, over
/// (dept, type) groups with at least `min_records` observations. Ties break
/// by store type ascending.
pub fn dept_type_ranking(dataset: &Dataset, min_records: usize) -> Vec<DeptTypeRankRow> {
    let stores: BTreeMap<u32, StoreType> = dataset
        .stores
        .iter()
        .map(|s| (s.store_id, s.store_type))
        .collect();

    let mut groups: BTreeMap<(u32, StoreType), (u64, f64)> = BTreeMap::new();
    for record in &dataset.sales {
        let Some(store_type) = stores.get(&record.store_id) else {
            continue;
        };
        let entry = groups
            .entry((record.dept_id, *store_type))
            .or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += record.weekly_sales;
    }

    let mut by_dept: BTreeMap<u32, Vec<DeptTypeRankRow>> = BTreeMap::new();
    for ((dept_id, store_type), (count, total)) in groups {
        if count < min_records as u64 {
            continue;
        }
        by_dept.entry(dept_id).or_default().push(DeptTypeRankRow {
            dept_id,
            store_type,
            record_count: count,
            total_sales: total,
            rank_in_dept: 0,
        });
    }

    let mut rows = Vec::new();
    for (_, mut dept_rows) in by_dept {
        dept_rows.sort_by(|a, b| {
            b.total_sales
                .partial_cmp(&a.total_sales)
                .unwrap_or(Ordering::Equal)
                .then(a.store_type.cmp(&b.store_type))
        });
        for (i, row) in dept_rows.iter_mut().enumerate() {
            row.rank_in_dept = i as u64 + 1;
        }
        rows.extend(dept_rows);
    }
    rows
}

/// Split each (store, dept) series at the cutoff date (cutoff itself lands
/// in the late period) and compare average sales. Pairs missing either
/// period are excluded, not reported as zero.
pub fn period_comparison(dataset: &Dataset, split_date: NaiveDate) -> Vec<PeriodComparisonRow> {
    let mut groups: BTreeMap<(u32, u32), (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for record in &dataset.sales {
        let entry = groups
            .entry((record.store_id, record.dept_id))
            .or_default();
        if record.date < split_date {
            entry.0.push(record.weekly_sales);
        } else {
            entry.1.push(record.weekly_sales);
        }
    }

    groups
        .into_iter()
        .filter(|(_, (early, late))| !early.is_empty() && !late.is_empty())
        .map(|((store_id, dept_id), (early, late))| {
            let early_avg = mean(&early);
            let late_avg = mean(&late);
            PeriodComparisonRow {
                store_id,
                dept_id,
                early_avg,
                late_avg,
                growth_pct: percent_change(late_avg, early_avg),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{SalesRecord, Store};

    fn record(store: u32, dept: u32, date: &str, sales: f64) -> SalesRecord {
        SalesRecord {
            store_id: store,
            dept_id: dept,
            date: date.parse().unwrap(),
            weekly_sales: sales,
            is_holiday: Some(false),
        }
    }

    fn dataset(records: Vec<SalesRecord>) -> Dataset {
        Dataset {
            sales: records,
            stores: vec![],
            features: vec![],
        }
    }

    #[test]
    fn moving_average_series_matches_input_length() {
        let data = dataset(vec![
            record(1, 1, "2011-01-07", 10.0),
            record(1, 1, "2011-01-14", 20.0),
            record(1, 1, "2011-01-21", 30.0),
            record(1, 1, "2011-01-28", 40.0),
            record(1, 1, "2011-02-04", 50.0),
        ]);
        let rows = moving_average(&data, 4);
        assert_eq!(rows.len(), 5);
        // first window holds only the first value
        assert_eq!(rows[0].window_avg, 10.0);
        assert_eq!(rows[0].variance_pct, Some(0.0));
        // second window: (10 + 20) / 2
        assert_eq!(rows[1].window_avg, 15.0);
        // full window at the fourth point: (10+20+30+40)/4
        assert_eq!(rows[3].window_avg, 25.0);
        assert_eq!(rows[3].variance_pct, Some(60.0));
        // window slides: (20+30+40+50)/4
        assert_eq!(rows[4].window_avg, 35.0);
    }

    #[test]
    fn moving_average_sums_across_stores_per_date() {
        let data = dataset(vec![
            record(1, 1, "2011-01-07", 10.0),
            record(2, 1, "2011-01-07", 30.0),
        ]);
        let rows = moving_average(&data, 4);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_sales, 40.0);
    }

    #[test]
    fn zero_window_average_yields_null_variance() {
        let data = dataset(vec![record(1, 1, "2011-01-07", 0.0)]);
        let rows = moving_average(&data, 4);
        assert_eq!(rows[0].variance_pct, None);
    }

    #[test]
    fn consistency_ranking_orders_by_cv_ascending() {
        let mut records = Vec::new();
        for i in 0..100 {
            records.push(record(1, 1, "2011-01-07", 100.0));
            records.push(record(
                2,
                1,
                "2011-01-07",
                if i % 2 == 0 { 10.0 } else { 190.0 },
            ));
        }
        let rows = store_consistency(&dataset(records), 100);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].store_id, 1);
        assert_eq!(rows[0].rank, 1);
        assert!(rows[1].cv_pct.unwrap() > rows[0].cv_pct.unwrap());
    }

    #[test]
    fn consistency_respects_the_minimum_sample() {
        let rows = store_consistency(&dataset(vec![record(1, 1, "2011-01-07", 5.0)]), 100);
        assert!(rows.is_empty());
    }

    #[test]
    fn type_ranking_is_per_department() {
        let stores = vec![
            Store {
                store_id: 1,
                store_type: StoreType::A,
                size: 40_000,
            },
            Store {
                store_id: 2,
                store_type: StoreType::B,
                size: 90_000,
            },
        ];
        let mut sales = Vec::new();
        for _ in 0..25 {
            sales.push(record(1, 1, "2011-01-07", 10.0)); // dept 1, A: 250
            sales.push(record(2, 1, "2011-01-07", 20.0)); // dept 1, B: 500
            sales.push(record(1, 2, "2011-01-07", 30.0)); // dept 2, A: 750
        }
        let data = Dataset {
            sales,
            stores,
            features: vec![],
        };
        let rows = dept_type_ranking(&data, 20);
        assert_eq!(rows.len(), 3);
        let dept1_best = rows
            .iter()
            .find(|r| r.dept_id == 1 && r.rank_in_dept == 1)
            .unwrap();
        assert_eq!(dept1_best.store_type, StoreType::B);
        let dept2_best = rows
            .iter()
            .find(|r| r.dept_id == 2 && r.rank_in_dept == 1)
            .unwrap();
        assert_eq!(dept2_best.store_type, StoreType::A);
    }

    #[test]
    fn period_comparison_excludes_one_sided_pairs() {
        let split: NaiveDate = "2011-07-01".parse().unwrap();
        let data = dataset(vec![
            record(1, 1, "2011-01-07", 100.0),
            record(1, 1, "2011-10-07", 150.0),
            // store 2 has no late-period data
            record(2, 1, "2011-01-07", 100.0),
        ]);
        let rows = period_comparison(&data, split);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].store_id, 1);
        assert_eq!(rows[0].early_avg, 100.0);
        assert_eq!(rows[0].late_avg, 150.0);
        assert_eq!(rows[0].growth_pct, Some(50.0));
    }

    #[test]
    fn cutoff_date_belongs_to_the_late_period() {
        let split: NaiveDate = "2011-07-01".parse().unwrap();
        let data = dataset(vec![
            record(1, 1, "2011-06-30", 100.0),
            record(1, 1, "2011-07-01", 200.0),
        ]);
        let rows = period_comparison(&data, split);
        assert_eq!(rows[0].early_avg, 100.0);
        assert_eq!(rows[0].late_avg, 200.0);
    }
}
