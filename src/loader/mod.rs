//! CSV ingestion: turns the three input files into typed in-memory relations.
//!
//! Required fields (ids, dates, the sales figure, store type and size) abort
//! the load with an error naming the file, line, and column. Optional fields
//! degrade to `None` and are counted per column so the data-quality report
//! can surface them.

use crate::core::errors::SalescopeError;
use crate::core::types::{Dataset, FeatureRecord, SalesRecord, Store, StoreType};
use chrono::NaiveDate;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const DEFAULT_SALES_FILE: &str = "train.csv";
const DEFAULT_STORES_FILE: &str = "stores.csv";
const DEFAULT_FEATURES_FILE: &str = "features.csv";

/// Resolved input file locations.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub sales: PathBuf,
    pub stores: PathBuf,
    /// Optional: trend analysis works without the economic features.
    pub features: Option<PathBuf>,
}

impl DatasetPaths {
    /// Conventional layout under a data directory: `train.csv`,
    /// `stores.csv`, and (when present) `features.csv`.
    pub fn from_dir(dir: &Path) -> Self {
        let features = dir.join(DEFAULT_FEATURES_FILE);
        Self {
            sales: dir.join(DEFAULT_SALES_FILE),
            stores: dir.join(DEFAULT_STORES_FILE),
            features: features.exists().then_some(features),
        }
    }
}

/// Nulls observed while coercing optional columns, keyed by
/// (relation, column).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NullCounts {
    counts: BTreeMap<String, u64>,
}

impl NullCounts {
    fn record(&mut self, relation: &str, column: &str) {
        *self
            .counts
            .entry(format!("{relation}.{column}"))
            .or_insert(0) += 1;
    }

    pub fn get(&self, relation: &str, column: &str) -> u64 {
        self.counts
            .get(&format!("{relation}.{column}"))
            .copied()
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Per-file load accounting, logged after each file and echoed in reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadSummary {
    pub file: PathBuf,
    pub relation: String,
    pub rows: u64,
    pub columns: usize,
}

/// Everything the loader hands to the analyzer.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    pub null_counts: NullCounts,
    pub summaries: Vec<LoadSummary>,
}

/// Column positions resolved from a header row.
struct Header {
    file: PathBuf,
    index: BTreeMap<String, usize>,
}

impl Header {
    fn from_record(file: &Path, record: &StringRecord) -> Self {
        let index = record
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        Self {
            file: file.to_path_buf(),
            index,
        }
    }

    fn require(&self, column: &str) -> Result<usize, SalescopeError> {
        self.index.get(column).copied().ok_or_else(|| {
            SalescopeError::load(&self.file, 1, column, "required column missing from header")
        })
    }

    fn optional(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }
}

fn field<'a>(record: &'a StringRecord, idx: usize) -> &'a str {
    record.get(idx).unwrap_or("").trim()
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn parse_required<T: std::str::FromStr>(
    file: &Path,
    record: &StringRecord,
    idx: usize,
    column: &str,
    expected: &str,
) -> Result<T, SalescopeError> {
    let raw = field(record, idx);
    raw.parse().map_err(|_| {
        SalescopeError::load(
            file,
            record_line(record),
            column,
            format!("expected {expected}, got '{raw}'"),
        )
    })
}

fn parse_date(
    file: &Path,
    record: &StringRecord,
    idx: usize,
    column: &str,
) -> Result<NaiveDate, SalescopeError> {
    let raw = field(record, idx);
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        SalescopeError::load(
            file,
            record_line(record),
            column,
            format!("expected YYYY-MM-DD date, got '{raw}'"),
        )
    })
}

/// Lenient boolean coercion: TRUE/FALSE in any case, or 1/0. Anything else
/// (including an empty field) is null.
fn coerce_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn coerce_f64(raw: &str) -> Option<f64> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("na") || raw.eq_ignore_ascii_case("nan") {
        return None;
    }
    raw.parse().ok()
}

fn open_reader(file: &Path) -> Result<csv::Reader<std::fs::File>, SalescopeError> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(file)
        .map_err(|e| match e.into_kind() {
            csv::ErrorKind::Io(io) => SalescopeError::io(file, io),
            other => SalescopeError::load(file, 0, "-", format!("{other:?}")),
        })
}

fn read_record(
    file: &Path,
    result: Result<StringRecord, csv::Error>,
) -> Result<StringRecord, SalescopeError> {
    result.map_err(|e| {
        let line = e.position().map(|p| p.line()).unwrap_or(0);
        SalescopeError::load(file, line, "-", format!("malformed CSV record: {e}"))
    })
}

pub fn load_sales(
    file: &Path,
    nulls: &mut NullCounts,
) -> Result<(Vec<SalesRecord>, LoadSummary), SalescopeError> {
    let mut reader = open_reader(file)?;
    let header = Header::from_record(
        file,
        reader
            .headers()
            .map_err(|e| SalescopeError::load(file, 1, "-", e.to_string()))?,
    );
    let store_idx = header.require("Store")?;
    let dept_idx = header.require("Dept")?;
    let date_idx = header.require("Date")?;
    let sales_idx = header.require("Weekly_Sales")?;
    let holiday_idx = header.optional("IsHoliday");

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = read_record(file, result)?;
        let is_holiday = match holiday_idx {
            Some(idx) => {
                let value = coerce_bool(field(&record, idx));
                if value.is_none() {
                    nulls.record("sales", "IsHoliday");
                }
                value
            }
            None => {
                nulls.record("sales", "IsHoliday");
                None
            }
        };
        rows.push(SalesRecord {
            store_id: parse_required(file, &record, store_idx, "Store", "an integer store id")?,
            dept_id: parse_required(file, &record, dept_idx, "Dept", "an integer department id")?,
            date: parse_date(file, &record, date_idx, "Date")?,
            weekly_sales: parse_required(
                file,
                &record,
                sales_idx,
                "Weekly_Sales",
                "a numeric sales figure",
            )?,
            is_holiday,
        });
    }

    let summary = LoadSummary {
        file: file.to_path_buf(),
        relation: "sales".into(),
        rows: rows.len() as u64,
        columns: header.index.len(),
    };
    Ok((rows, summary))
}

pub fn load_stores(file: &Path) -> Result<(Vec<Store>, LoadSummary), SalescopeError> {
    let mut reader = open_reader(file)?;
    let header = Header::from_record(
        file,
        reader
            .headers()
            .map_err(|e| SalescopeError::load(file, 1, "-", e.to_string()))?,
    );
    let store_idx = header.require("Store")?;
    let type_idx = header.require("Type")?;
    let size_idx = header.require("Size")?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = read_record(file, result)?;
        let raw_type = field(&record, type_idx);
        let store_type = StoreType::parse(raw_type).ok_or_else(|| {
            SalescopeError::load(
                file,
                record_line(&record),
                "Type",
                format!("expected store type A, B, or C, got '{raw_type}'"),
            )
        })?;
        rows.push(Store {
            store_id: parse_required(file, &record, store_idx, "Store", "an integer store id")?,
            store_type,
            size: parse_required(file, &record, size_idx, "Size", "an integer store size")?,
        });
    }

    let summary = LoadSummary {
        file: file.to_path_buf(),
        relation: "stores".into(),
        rows: rows.len() as u64,
        columns: header.index.len(),
    };
    Ok((rows, summary))
}

pub fn load_features(
    file: &Path,
    nulls: &mut NullCounts,
) -> Result<(Vec<FeatureRecord>, LoadSummary), SalescopeError> {
    let mut reader = open_reader(file)?;
    let header = Header::from_record(
        file,
        reader
            .headers()
            .map_err(|e| SalescopeError::load(file, 1, "-", e.to_string()))?,
    );
    let store_idx = header.require("Store")?;
    let date_idx = header.require("Date")?;

    let measure = |header: &Header, column: &str| header.optional(column);
    let measure_columns = [
        ("Temperature", measure(&header, "Temperature")),
        ("Fuel_Price", measure(&header, "Fuel_Price")),
        ("CPI", measure(&header, "CPI")),
        ("Unemployment", measure(&header, "Unemployment")),
        ("MarkDown1", measure(&header, "MarkDown1")),
        ("MarkDown2", measure(&header, "MarkDown2")),
        ("MarkDown3", measure(&header, "MarkDown3")),
        ("MarkDown4", measure(&header, "MarkDown4")),
        ("MarkDown5", measure(&header, "MarkDown5")),
    ];
    let holiday_idx = header.optional("IsHoliday");

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = read_record(file, result)?;
        let mut values = [None; 9];
        for (slot, (column, idx)) in values.iter_mut().zip(&measure_columns) {
            *slot = idx.and_then(|i| coerce_f64(field(&record, i)));
            if slot.is_none() {
                nulls.record("features", column);
            }
        }
        let is_holiday = holiday_idx.and_then(|i| coerce_bool(field(&record, i)));
        if is_holiday.is_none() {
            nulls.record("features", "IsHoliday");
        }
        rows.push(FeatureRecord {
            store_id: parse_required(file, &record, store_idx, "Store", "an integer store id")?,
            date: parse_date(file, &record, date_idx, "Date")?,
            temperature: values[0],
            fuel_price: values[1],
            cpi: values[2],
            unemployment: values[3],
            markdown1: values[4],
            markdown2: values[5],
            markdown3: values[6],
            markdown4: values[7],
            markdown5: values[8],
            is_holiday,
        });
    }

    let summary = LoadSummary {
        file: file.to_path_buf(),
        relation: "features".into(),
        rows: rows.len() as u64,
        columns: header.index.len(),
    };
    Ok((rows, summary))
}

/// Load all three relations. Only the features file is optional; a missing
/// sales or stores file is fatal.
pub fn load_dataset(paths: &DatasetPaths) -> Result<LoadOutcome, SalescopeError> {
    let mut null_counts = NullCounts::default();
    let mut summaries = Vec::new();

    let (sales, summary) = load_sales(&paths.sales, &mut null_counts)?;
    log::info!(
        "loaded {}: {} rows, {} columns",
        summary.file.display(),
        summary.rows,
        summary.columns
    );
    summaries.push(summary);

    let (stores, summary) = load_stores(&paths.stores)?;
    log::info!(
        "loaded {}: {} rows, {} columns",
        summary.file.display(),
        summary.rows,
        summary.columns
    );
    summaries.push(summary);

    let features = match &paths.features {
        Some(path) => {
            let (features, summary) = load_features(path, &mut null_counts)?;
            log::info!(
                "loaded {}: {} rows, {} columns",
                summary.file.display(),
                summary.rows,
                summary.columns
            );
            summaries.push(summary);
            features
        }
        None => {
            log::info!("no features file; economic correlations will be skipped");
            Vec::new()
        }
    };

    Ok(LoadOutcome {
        dataset: Dataset {
            sales,
            stores,
            features,
        },
        null_counts,
        summaries,
    })
}
