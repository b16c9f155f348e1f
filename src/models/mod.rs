pub mod clock;
pub mod employee;
pub mod leave;
pub mod project;
pub mod report;
pub mod task;
pub mod timesheet;
