//! The fixed catalog of derived tables.
//!
//! Every function here is a pure function of the loaded relations and the
//! configuration: deterministic output, empty input yields empty tables, and
//! per-row division-by-zero yields `None` in that row only. Nothing in this
//! module can fail.

pub mod completeness;
pub mod correlation;
pub mod holiday;
pub mod overview;
pub mod performance;
pub mod profile;
pub mod quality;
pub mod seasonality;
pub mod temporal;
pub mod window;

pub use completeness::{StoreDeptCoverageRow, StoreWeekCoverageRow};
pub use correlation::FeatureCorrelationRow;
pub use holiday::{HolidayGroupRow, HolidaySummary};
pub use overview::Overview;
pub use performance::{
    BucketPerformanceRow, DeptTypePerformanceRow, DeptVolatilityRow, StorePerformanceRow,
    TypePerformanceRow,
};
pub use profile::{DeptProfileRow, SizeBucketProfileRow, StoreTypeProfileRow};
pub use quality::{ColumnNullCount, DataQualityReport, NegativeSalesSummary};
pub use seasonality::{MonthSeasonalityRow, WeekdaySeasonalityRow};
pub use temporal::{MonthlySummaryRow, QuarterlyTotalRow, YearlySummaryRow, YoyGrowthRow};
pub use window::{
    DeptTypeRankRow, MovingAverageRow, PeriodComparisonRow, StoreConsistencyRow,
};

use crate::config::AnalysisConfig;
use crate::core::types::Dataset;
use crate::loader::{LoadSummary, NullCounts};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The complete set of derived tables plus run metadata. Serializable as a
/// whole for the JSON output; individual tables feed the CSV, markdown, and
/// terminal writers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub config: AnalysisConfig,
    pub load: Vec<LoadSummary>,

    pub overview: Overview,
    pub quality: DataQualityReport,

    pub store_type_profile: Vec<StoreTypeProfileRow>,
    pub size_bucket_profile: Vec<SizeBucketProfileRow>,
    pub dept_profile: Vec<DeptProfileRow>,
    pub dept_profile_by_avg: Vec<DeptProfileRow>,

    pub yearly_summary: Vec<YearlySummaryRow>,
    pub monthly_summary: Vec<MonthlySummaryRow>,
    pub yoy_growth: Vec<YoyGrowthRow>,
    pub quarterly_totals: Vec<QuarterlyTotalRow>,

    pub holiday: HolidaySummary,

    pub store_week_coverage: Vec<StoreWeekCoverageRow>,
    pub store_dept_coverage: Vec<StoreDeptCoverageRow>,

    pub store_performance: Vec<StorePerformanceRow>,
    pub store_type_performance: Vec<TypePerformanceRow>,
    pub size_bucket_performance: Vec<BucketPerformanceRow>,
    pub dept_type_performance: Vec<DeptTypePerformanceRow>,
    pub dept_volatility: Vec<DeptVolatilityRow>,

    pub weekday_seasonality: Vec<WeekdaySeasonalityRow>,
    pub month_seasonality: Vec<MonthSeasonalityRow>,

    pub moving_average: Vec<MovingAverageRow>,
    pub store_consistency: Vec<StoreConsistencyRow>,
    pub dept_type_ranking: Vec<DeptTypeRankRow>,
    pub period_comparison: Vec<PeriodComparisonRow>,

    pub feature_correlation: Vec<FeatureCorrelationRow>,
}

/// Run the whole catalog against a loaded dataset.
pub fn run_analysis(
    dataset: &Dataset,
    null_counts: &NullCounts,
    summaries: &[LoadSummary],
    config: &AnalysisConfig,
) -> AnalysisReport {
    AnalysisReport {
        generated_at: Utc::now(),
        config: config.clone(),
        load: summaries.to_vec(),

        overview: overview::overview(dataset),
        quality: quality::data_quality(dataset, null_counts),

        store_type_profile: profile::store_type_profile(dataset),
        size_bucket_profile: profile::size_bucket_profile(dataset, &config.size_buckets),
        dept_profile: profile::dept_profile(dataset),
        dept_profile_by_avg: profile::dept_profile_by_avg(dataset, config.min_group_size.stats),

        yearly_summary: temporal::yearly_summary(dataset),
        monthly_summary: temporal::monthly_summary(dataset),
        yoy_growth: temporal::yoy_growth(dataset),
        quarterly_totals: temporal::quarterly_totals(dataset),

        holiday: holiday::holiday_summary(dataset),

        store_week_coverage: completeness::store_week_coverage(dataset),
        store_dept_coverage: completeness::store_dept_coverage(dataset),

        store_performance: performance::store_performance(dataset),
        store_type_performance: performance::store_type_performance(dataset),
        size_bucket_performance: performance::size_bucket_performance(
            dataset,
            &config.size_buckets,
        ),
        dept_type_performance: performance::dept_type_performance(
            dataset,
            config.min_group_size.dept_type,
        ),
        dept_volatility: performance::dept_volatility(dataset, config.min_group_size.stats),

        weekday_seasonality: seasonality::weekday_seasonality(dataset),
        month_seasonality: seasonality::month_seasonality(dataset),

        moving_average: window::moving_average(dataset, config.moving_average_window),
        store_consistency: window::store_consistency(dataset, config.min_group_size.stats),
        dept_type_ranking: window::dept_type_ranking(dataset, config.min_group_size.comparative),
        period_comparison: window::period_comparison(dataset, config.period_split_date),

        feature_correlation: correlation::feature_correlation(dataset),
    }
}
