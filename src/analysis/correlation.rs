//! Correlation of weekly sales against the economic features, over the
//! inner join of sales and features on (store_id, date).

use crate::core::stats::pearson_correlation;
use crate::core::types::{Dataset, FeatureRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCorrelationRow {
    pub feature: String,
    /// Pairs that had both a sales figure and a non-null feature value.
    pub pair_count: u64,
    /// `None` below two pairs or when either series is constant.
    pub correlation: Option<f64>,
}

const FEATURES: [(&str, fn(&FeatureRecord) -> Option<f64>); 4] = [
    ("Temperature", |f| f.temperature),
    ("Fuel_Price", |f| f.fuel_price),
    ("CPI", |f| f.cpi),
    ("Unemployment", |f| f.unemployment),
];

/// One row per economic feature. Null feature values are excluded pairwise,
/// so each feature correlates over its own subset of the join.
pub fn feature_correlation(dataset: &Dataset) -> Vec<FeatureCorrelationRow> {
    let features: HashMap<(u32, chrono::NaiveDate), &FeatureRecord> = dataset
        .features
        .iter()
        .map(|f| ((f.store_id, f.date), f))
        .collect();

    FEATURES
        .iter()
        .map(|(name, extract)| {
            let mut sales = Vec::new();
            let mut values = Vec::new();
            for record in &dataset.sales {
                let Some(feature) = features.get(&(record.store_id, record.date)) else {
                    continue;
                };
                if let Some(value) = extract(feature) {
                    sales.push(record.weekly_sales);
                    values.push(value);
                }
            }
            FeatureCorrelationRow {
                feature: name.to_string(),
                pair_count: sales.len() as u64,
                correlation: pearson_correlation(&sales, &values),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SalesRecord;

    fn sale(store: u32, date: &str, sales: f64) -> SalesRecord {
        SalesRecord {
            store_id: store,
            dept_id: 1,
            date: date.parse().unwrap(),
            weekly_sales: sales,
            is_holiday: Some(false),
        }
    }

    fn feature(store: u32, date: &str, temperature: Option<f64>) -> FeatureRecord {
        FeatureRecord {
            store_id: store,
            date: date.parse().unwrap(),
            temperature,
            fuel_price: None,
            cpi: None,
            unemployment: None,
            markdown1: None,
            markdown2: None,
            markdown3: None,
            markdown4: None,
            markdown5: None,
            is_holiday: None,
        }
    }

    #[test]
    fn correlates_over_the_inner_join_only() {
        let dataset = Dataset {
            sales: vec![
                sale(1, "2011-01-07", 10.0),
                sale(1, "2011-01-14", 20.0),
                sale(1, "2011-01-21", 30.0),
                // no matching feature row
                sale(2, "2011-01-07", 1_000.0),
            ],
            stores: vec![],
            features: vec![
                feature(1, "2011-01-07", Some(40.0)),
                feature(1, "2011-01-14", Some(50.0)),
                feature(1, "2011-01-21", Some(60.0)),
            ],
        };
        let rows = feature_correlation(&dataset);
        let temp = rows.iter().find(|r| r.feature == "Temperature").unwrap();
        assert_eq!(temp.pair_count, 3);
        assert!((temp.correlation.unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn null_feature_values_are_excluded_pairwise() {
        let dataset = Dataset {
            sales: vec![sale(1, "2011-01-07", 10.0), sale(1, "2011-01-14", 20.0)],
            stores: vec![],
            features: vec![
                feature(1, "2011-01-07", Some(40.0)),
                feature(1, "2011-01-14", None),
            ],
        };
        let rows = feature_correlation(&dataset);
        let temp = rows.iter().find(|r| r.feature == "Temperature").unwrap();
        assert_eq!(temp.pair_count, 1);
        assert_eq!(temp.correlation, None);
    }

    #[test]
    fn missing_features_relation_yields_empty_pairs_not_errors() {
        let dataset = Dataset {
            sales: vec![sale(1, "2011-01-07", 10.0)],
            stores: vec![],
            features: vec![],
        };
        let rows = feature_correlation(&dataset);
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.pair_count == 0));
        assert!(rows.iter().all(|r| r.correlation.is_none()));
    }
}
