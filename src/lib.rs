// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod loader;
pub mod report;

// Re-export commonly used types
pub use crate::core::{
    Dataset, FeatureRecord, SalesRecord, SalescopeError, SizeBucket, Store, StoreType,
};

pub use crate::analysis::{run_analysis, AnalysisReport};
pub use crate::config::{AnalysisConfig, MinGroupSize, SizeBuckets};
pub use crate::loader::{load_dataset, DatasetPaths, LoadOutcome, LoadSummary, NullCounts};
pub use crate::report::{create_writer, OutputWriter};

pub use crate::core::stats::{
    coefficient_of_variation, mean, pearson_correlation, percent_change, sample_stddev,
};
