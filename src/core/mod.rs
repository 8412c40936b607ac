pub mod errors;
pub mod stats;
pub mod types;

pub use errors::SalescopeError;
pub use types::{Dataset, FeatureRecord, SalesRecord, SizeBucket, Store, StoreType};
