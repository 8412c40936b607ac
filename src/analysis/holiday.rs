//! Holiday-flag grouping and the holiday impact metric.
//!
//! The flag is nullable: rows where it failed to coerce form their own
//! "unknown" group rather than being imputed into either side.

use crate::core::types::Dataset;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayGroupRow {
    /// `None` is the unknown-flag group.
    pub is_holiday: Option<bool>,
    pub record_count: u64,
    pub total_sales: f64,
    pub avg_sales: f64,
    pub min_sales: f64,
    pub max_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidaySummary {
    pub groups: Vec<HolidayGroupRow>,
    /// Distinct dates flagged as holidays, ascending.
    pub holiday_dates: Vec<NaiveDate>,
    /// (holiday_avg - non_holiday_avg) / non_holiday_avg * 100; `None` when
    /// either group is empty or the non-holiday average is zero.
    pub impact_pct: Option<f64>,
}

fn group_row(is_holiday: Option<bool>, sales: &[f64]) -> Option<HolidayGroupRow> {
    if sales.is_empty() {
        return None;
    }
    let total: f64 = sales.iter().sum();
    Some(HolidayGroupRow {
        is_holiday,
        record_count: sales.len() as u64,
        total_sales: total,
        avg_sales: total / sales.len() as f64,
        min_sales: sales.iter().copied().fold(f64::INFINITY, f64::min),
        max_sales: sales.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    })
}

pub fn holiday_summary(dataset: &Dataset) -> HolidaySummary {
    let mut holiday = Vec::new();
    let mut regular = Vec::new();
    let mut unknown = Vec::new();
    let mut dates = BTreeSet::new();

    for record in &dataset.sales {
        match record.is_holiday {
            Some(true) => {
                holiday.push(record.weekly_sales);
                dates.insert(record.date);
            }
            Some(false) => regular.push(record.weekly_sales),
            None => unknown.push(record.weekly_sales),
        }
    }

    let holiday_row = group_row(Some(true), &holiday);
    let regular_row = group_row(Some(false), &regular);
    let unknown_row = group_row(None, &unknown);

    let impact_pct = match (&holiday_row, &regular_row) {
        (Some(h), Some(r)) if r.avg_sales != 0.0 => {
            Some((h.avg_sales - r.avg_sales) / r.avg_sales * 100.0)
        }
        _ => None,
    };

    HolidaySummary {
        groups: [regular_row, holiday_row, unknown_row]
            .into_iter()
            .flatten()
            .collect(),
        holiday_dates: dates.into_iter().collect(),
        impact_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SalesRecord;

    fn record(date: &str, sales: f64, is_holiday: Option<bool>) -> SalesRecord {
        SalesRecord {
            store_id: 1,
            dept_id: 1,
            date: date.parse().unwrap(),
            weekly_sales: sales,
            is_holiday,
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
    fn groups_cover_true_false_and_unknown() {
        let summary = holiday_summary(&dataset(vec![
            record("2011-11-25", 200.0, Some(true)),
            record("2011-11-18", 100.0, Some(false)),
            record("2011-11-11", 50.0, None),
        ]));
        assert_eq!(summary.groups.len(), 3);
        let counts: u64 = summary.groups.iter().map(|g| g.record_count).sum();
        assert_eq!(counts, 3);
        assert_eq!(summary.impact_pct, Some(100.0));
    }

    #[test]
    fn holiday_dates_are_distinct_and_sorted() {
        let summary = holiday_summary(&dataset(vec![
            record("2011-12-30", 10.0, Some(true)),
            record("2011-11-25", 10.0, Some(true)),
            record("2011-11-25", 10.0, Some(true)),
            record("2011-11-18", 10.0, Some(false)),
        ]));
        assert_eq!(
            summary.holiday_dates,
            vec![
                "2011-11-25".parse::<NaiveDate>().unwrap(),
                "2011-12-30".parse().unwrap()
            ]
        );
    }

    #[test]
    fn impact_is_null_without_both_groups() {
        let summary = holiday_summary(&dataset(vec![record("2011-11-25", 10.0, Some(true))]));
        assert_eq!(summary.impact_pct, None);
        assert_eq!(summary.groups.len(), 1);
    }

    #[test]
    fn impact_is_null_when_baseline_average_is_zero() {
        let summary = holiday_summary(&dataset(vec![
            record("2011-11-25", 10.0, Some(true)),
            record("2011-11-18", 5.0, Some(false)),
            record("2011-11-11", -5.0, Some(false)),
        ]));
        assert_eq!(summary.impact_pct, None);
    }

    #[test]
    fn min_and_max_bracket_each_group() {
        let summary = holiday_summary(&dataset(vec![
            record("2011-01-07", 5.0, Some(false)),
            record("2011-01-14", -3.0, Some(false)),
            record("2011-01-21", 12.0, Some(false)),
        ]));
        let group = &summary.groups[0];
        assert_eq!(group.min_sales, -3.0);
        assert_eq!(group.max_sales, 12.0);
    }
}
