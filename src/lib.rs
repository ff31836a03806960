//! Trendwatch - sampled price trend analysis over configurable time windows

pub mod config;
pub mod error;
pub mod report;
pub mod services;
pub mod sources;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use services::{
    AnalysisPipeline, AnalysisRun, CsvStore, PeriodPlanner, QueryScheduler, TrendAnalyzer,
};
pub use sources::{PriceProvider, ProviderRegistry};
pub use types::*;
