//! CLI command implementations.
//!
//! - **analyze**: load the datasets, run the catalog, render in the chosen
//!   format
//! - **report**: the narrative markdown rendering of the same analysis
//! - **init**: write a default configuration file

pub mod analyze;
pub mod init;
pub mod report;

pub use analyze::{handle_analyze, AnalyzeOptions};
pub use init::init_config;
pub use report::handle_report;
