pub mod analysis;
pub mod csv_store;
pub mod period_planner;
pub mod pipeline;
pub mod query_scheduler;

pub use analysis::TrendAnalyzer;
pub use csv_store::{CsvStore, ObservationStore};
pub use period_planner::{generate_windows, parse_duration, PeriodPlanner};
pub use pipeline::{reanalyze, AnalysisPipeline, AnalysisRun};
pub use query_scheduler::{schedule_all, schedule_window, QueryScheduler};
