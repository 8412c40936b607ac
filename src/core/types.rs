//! Domain types shared across the loader, analyzer, and reporter.

use crate::config::SizeBuckets;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Categorical store classification used as a performance-grouping dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StoreType {
    A,
    B,
    C,
}

impl StoreType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "A" | "a" => Some(StoreType::A),
            "B" | "b" => Some(StoreType::B),
            "C" | "c" => Some(StoreType::C),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StoreType::A => "A",
            StoreType::B => "B",
            StoreType::C => "C",
        }
    }
}

impl std::fmt::Display for StoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One store-department-week observation. (store_id, dept_id, date) is the
/// natural key. Negative weekly_sales means returns exceeded sales for the
/// week; it is tracked as a quality signal, never rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub store_id: u32,
    pub dept_id: u32,
    pub date: NaiveDate,
    pub weekly_sales: f64,
    pub is_holiday: Option<bool>,
}

/// Store metadata, one row per store_id. `size` is floor area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub store_id: u32,
    pub store_type: StoreType,
    pub size: u32,
}

/// Auxiliary economic observations, joined to sales on (store_id, date).
/// Every measure is optional; unparseable values load as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub store_id: u32,
    pub date: NaiveDate,
    pub temperature: Option<f64>,
    pub fuel_price: Option<f64>,
    pub cpi: Option<f64>,
    pub unemployment: Option<f64>,
    pub markdown1: Option<f64>,
    pub markdown2: Option<f64>,
    pub markdown3: Option<f64>,
    pub markdown4: Option<f64>,
    pub markdown5: Option<f64>,
    pub is_holiday: Option<bool>,
}

/// The three loaded relations. Immutable after load; every analysis produces
/// a new derived table and never mutates these.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub sales: Vec<SalesRecord>,
    pub stores: Vec<Store>,
    pub features: Vec<FeatureRecord>,
}

/// Store-size classification. Buckets are half-open intervals, so a size
/// exactly on a boundary belongs to the bucket above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SizeBucket {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl SizeBucket {
    pub fn classify(size: u32, buckets: &SizeBuckets) -> Self {
        if size < buckets.small_max {
            SizeBucket::Small
        } else if size < buckets.medium_max {
            SizeBucket::Medium
        } else if size < buckets.large_max {
            SizeBucket::Large
        } else {
            SizeBucket::ExtraLarge
        }
    }

    pub fn all() -> [SizeBucket; 4] {
        [
            SizeBucket::Small,
            SizeBucket::Medium,
            SizeBucket::Large,
            SizeBucket::ExtraLarge,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SizeBucket::Small => "Small",
            SizeBucket::Medium => "Medium",
            SizeBucket::Large => "Large",
            SizeBucket::ExtraLarge => "Extra Large",
        }
    }
}

impl std::fmt::Display for SizeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
