pub mod ai;
pub mod analysis_request;
pub mod analysis_result;
pub mod cli;
pub mod config;
pub mod dashboard_snapshot;
pub mod issue;
pub mod segment_analysis;
