pub mod dashboard;
pub mod log;
pub mod report;
