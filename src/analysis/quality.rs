//! Data-quality findings: nulls, negative sales, referential gaps.
//!
//! These are warnings carried as data. A dataset full of quality findings
//! still analyzes cleanly; the findings just land in this report.

use crate::core::types::Dataset;
use crate::loader::NullCounts;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNullCount {
    pub column: String,
    pub nulls: u64,
}

/// Negative weekly sales are returns exceeding sales, a signal rather than
/// an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegativeSalesSummary {
    pub count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityReport {
    pub null_counts: Vec<ColumnNullCount>,
    pub negative_sales: NegativeSalesSummary,
    /// Sales store_ids with no matching store row: checked, not enforced.
    pub unknown_store_ids: Vec<u32>,
    pub unknown_store_records: u64,
}

impl DataQualityReport {
    pub fn has_findings(&self) -> bool {
        self.null_counts.iter().any(|c| c.nulls > 0)
            || self.negative_sales.count > 0
            || !self.unknown_store_ids.is_empty()
    }
}

pub fn data_quality(dataset: &Dataset, null_counts: &NullCounts) -> DataQualityReport {
    let negatives: Vec<f64> = dataset
        .sales
        .iter()
        .map(|r| r.weekly_sales)
        .filter(|s| *s < 0.0)
        .collect();

    let known: BTreeSet<u32> = dataset.stores.iter().map(|s| s.store_id).collect();
    let mut unknown_ids = BTreeSet::new();
    let mut unknown_records = 0u64;
    for record in &dataset.sales {
        if !known.contains(&record.store_id) {
            unknown_ids.insert(record.store_id);
            unknown_records += 1;
        }
    }

    DataQualityReport {
        null_counts: null_counts
            .iter()
            .map(|(column, nulls)| ColumnNullCount {
                column: column.to_string(),
                nulls,
            })
            .collect(),
        negative_sales: NegativeSalesSummary {
            count: negatives.len() as u64,
            min: negatives.iter().copied().reduce(f64::min),
            max: negatives.iter().copied().reduce(f64::max),
        },
        unknown_store_ids: unknown_ids.into_iter().collect(),
        unknown_store_records: unknown_records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{SalesRecord, Store, StoreType};

    fn record(store: u32, sales: f64) -> SalesRecord {
        SalesRecord {
            store_id: store,
            dept_id: 1,
            date: "2011-03-04".parse().unwrap(),
            weekly_sales: sales,
            is_holiday: None,
        }
    }

    #[test]
    fn negative_sales_are_counted_with_their_range() {
        let dataset = Dataset {
            sales: vec![record(1, -5.0), record(1, 20.0), record(1, -120.5)],
            stores: vec![Store {
                store_id: 1,
                store_type: StoreType::A,
                size: 10_000,
            }],
            features: vec![],
        };
        let report = data_quality(&dataset, &NullCounts::default());
        assert_eq!(report.negative_sales.count, 2);
        assert_eq!(report.negative_sales.min, Some(-120.5));
        assert_eq!(report.negative_sales.max, Some(-5.0));
        assert!(report.has_findings());
    }

    #[test]
    fn referential_gaps_are_reported_not_fatal() {
        let dataset = Dataset {
            sales: vec![record(7, 1.0), record(7, 2.0), record(9, 3.0)],
            stores: vec![Store {
                store_id: 9,
                store_type: StoreType::C,
                size: 10_000,
            }],
            features: vec![],
        };
        let report = data_quality(&dataset, &NullCounts::default());
        assert_eq!(report.unknown_store_ids, vec![7]);
        assert_eq!(report.unknown_store_records, 2);
    }

    #[test]
    fn clean_dataset_has_no_findings() {
        let dataset = Dataset {
            sales: vec![record(1, 5.0)],
            stores: vec![Store {
                store_id: 1,
                store_type: StoreType::A,
                size: 10_000,
            }],
            features: vec![],
        };
        let report = data_quality(&dataset, &NullCounts::default());
        assert!(!report.has_findings());
        assert_eq!(report.negative_sales.min, None);
    }
}
