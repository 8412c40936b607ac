//! Day-of-week and month-of-year seasonal patterns, keyed to fixed name
//! tables (0=Sunday..6=Saturday, 1=January..12=December).

use crate::core::types::Dataset;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdaySeasonalityRow {
    /// 0 = Sunday .. 6 = Saturday.
    pub weekday: u32,
    pub weekday_name: String,
    pub record_count: u64,
    pub total_sales: f64,
    pub avg_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSeasonalityRow {
    /// 1 = January .. 12 = December.
    pub month: u32,
    pub month_name: String,
    pub record_count: u64,
    pub total_sales: f64,
    pub avg_sales: f64,
}

pub fn weekday_name(weekday: u32) -> &'static str {
    WEEKDAY_NAMES.get(weekday as usize).copied().unwrap_or("?")
}

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?")
}

fn grouped_sales<K: Ord>(
    dataset: &Dataset,
    key: impl Fn(&crate::core::types::SalesRecord) -> K,
) -> BTreeMap<K, (u64, f64)> {
    let mut groups: BTreeMap<K, (u64, f64)> = BTreeMap::new();
    for record in &dataset.sales {
        let entry = groups.entry(key(record)).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += record.weekly_sales;
    }
    groups
}

/// Only weekdays that occur in the data appear; weekly feeds typically land
/// on a single reporting day.
pub fn weekday_seasonality(dataset: &Dataset) -> Vec<WeekdaySeasonalityRow> {
    grouped_sales(dataset, |r| r.date.weekday().num_days_from_sunday())
        .into_iter()
        .map(|(weekday, (count, total))| WeekdaySeasonalityRow {
            weekday,
            weekday_name: weekday_name(weekday).to_string(),
            record_count: count,
            total_sales: total,
            avg_sales: total / count as f64,
        })
        .collect()
}

pub fn month_seasonality(dataset: &Dataset) -> Vec<MonthSeasonalityRow> {
    grouped_sales(dataset, |r| r.date.month())
        .into_iter()
        .map(|(month, (count, total))| MonthSeasonalityRow {
            month,
            month_name: month_name(month).to_string(),
            record_count: count,
            total_sales: total,
            avg_sales: total / count as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SalesRecord;

    fn record(date: &str, sales: f64) -> SalesRecord {
        SalesRecord {
            store_id: 1,
            dept_id: 1,
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
    fn weekday_index_matches_the_name_table() {
        // 2011-06-05 is a Sunday, 2011-06-10 a Friday
        let rows = weekday_seasonality(&dataset(vec![
            record("2011-06-05", 10.0),
            record("2011-06-10", 20.0),
            record("2011-06-17", 40.0),
        ]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].weekday, 0);
        assert_eq!(rows[0].weekday_name, "Sunday");
        assert_eq!(rows[1].weekday, 5);
        assert_eq!(rows[1].weekday_name, "Friday");
        assert_eq!(rows[1].record_count, 2);
        assert_eq!(rows[1].avg_sales, 30.0);
    }

    #[test]
    fn month_grouping_spans_years() {
        let rows = month_seasonality(&dataset(vec![
            record("2010-12-03", 10.0),
            record("2011-12-02", 30.0),
            record("2011-02-04", 5.0),
        ]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month, 2);
        assert_eq!(rows[0].month_name, "February");
        assert_eq!(rows[1].month, 12);
        assert_eq!(rows[1].record_count, 2);
        assert_eq!(rows[1].total_sales, 40.0);
    }

    #[test]
    fn name_tables_are_fixed() {
        assert_eq!(weekday_name(0), "Sunday");
        assert_eq!(weekday_name(6), "Saturday");
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
    }
}
