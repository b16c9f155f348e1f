//! Client-side gateway to the employee tracking REST API.

pub mod auth;
pub mod client;
pub mod clock;
pub mod employees;
pub mod leave;
pub mod projects;
pub mod reports;
pub mod tasks;
pub mod timesheet;

pub use client::ApiClient;
pub use clock::ClockApi;
