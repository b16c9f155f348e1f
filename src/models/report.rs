//! Rows returned by the read-only report endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportKind {
    WorkHours,
    LeaveBalance,
    LeaveRequests,
    Tasks,
    BillableHours,
    PerformanceMetrics,
}

impl ReportKind {
    pub fn path(&self) -> &'static str {
        match self {
            ReportKind::WorkHours => "reports/work-hours/",
            ReportKind::LeaveBalance => "reports/leave-balance/",
            ReportKind::LeaveRequests => "reports/leave-requests/",
            ReportKind::Tasks => "reports/tasks/",
            ReportKind::BillableHours => "reports/billable-hours/",
            ReportKind::PerformanceMetrics => "reports/performance-metrics/",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::WorkHours => "Work Hours Report",
            ReportKind::LeaveBalance => "Leave Balance Report",
            ReportKind::LeaveRequests => "Leave Request Report",
            ReportKind::Tasks => "Project Task Report",
            ReportKind::BillableHours => "Billable Hours Report",
            ReportKind::PerformanceMetrics => "Performance Metrics Report",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkHoursRow {
    pub user: String,
    pub clocked_in: String,
    #[serde(default)]
    pub clocked_out: Option<String>,
    #[serde(default)]
    pub hours_worked: f64,
    #[serde(default)]
    pub extra_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalanceRow {
    pub user: String,
    #[serde(default)]
    pub annual: f64,
    #[serde(default)]
    pub sick: f64,
    #[serde(default)]
    pub casual: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequestRow {
    pub employee_name: String,
    pub employee_email: String,
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTaskRow {
    pub task_name: String,
    pub status: String,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub due_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillableHoursRow {
    pub employee: String,
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub hours: f64,
    #[serde(default)]
    pub billable_hours: f64,
}

/// Task counters; the endpoint returns a single object, not a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    #[serde(default)]
    pub total_completed: u64,
    #[serde(default)]
    pub total_pending: u64,
    #[serde(default)]
    pub total_in_progress: u64,
}

impl PerformanceMetrics {
    pub fn entries(&self) -> [(&'static str, u64); 3] {
        [
            ("Completed Tasks", self.total_completed),
            ("Pending Tasks", self.total_pending),
            ("In Progress Tasks", self.total_in_progress),
        ]
    }
}

/// A fetched report, one variant per endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    WorkHours(Vec<WorkHoursRow>),
    LeaveBalance(Vec<LeaveBalanceRow>),
    LeaveRequests(Vec<LeaveRequestRow>),
    Tasks(Vec<ProjectTaskRow>),
    BillableHours(Vec<BillableHoursRow>),
    PerformanceMetrics(PerformanceMetrics),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Report::WorkHours(_) => ReportKind::WorkHours,
            Report::LeaveBalance(_) => ReportKind::LeaveBalance,
            Report::LeaveRequests(_) => ReportKind::LeaveRequests,
            Report::Tasks(_) => ReportKind::Tasks,
            Report::BillableHours(_) => ReportKind::BillableHours,
            Report::PerformanceMetrics(_) => ReportKind::PerformanceMetrics,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Report::WorkHours(r) => r.len(),
            Report::LeaveBalance(r) => r.len(),
            Report::LeaveRequests(r) => r.len(),
            Report::Tasks(r) => r.len(),
            Report::BillableHours(r) => r.len(),
            Report::PerformanceMetrics(m) => m.entries().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column headers followed by one text row per record.
    pub fn to_rows(&self) -> (Vec<&'static str>, Vec<Vec<String>>) {
        match self {
            Report::WorkHours(rows) => (
                vec!["User", "Clocked In", "Clocked Out", "Hours Worked", "Extra Hours"],
                rows.iter()
                    .map(|r| {
                        vec![
                            r.user.clone(),
                            r.clocked_in.clone(),
                            r.clocked_out
                                .clone()
                                .unwrap_or_else(|| "Still clocked in".to_string()),
                            format!("{:.2}", r.hours_worked),
                            format!("{:.2}", r.extra_hours),
                        ]
                    })
                    .collect(),
            ),
            Report::LeaveBalance(rows) => (
                vec!["User", "Annual", "Sick", "Casual"],
                rows.iter()
                    .map(|r| {
                        vec![
                            r.user.clone(),
                            format!("{}", r.annual),
                            format!("{}", r.sick),
                            format!("{}", r.casual),
                        ]
                    })
                    .collect(),
            ),
            Report::LeaveRequests(rows) => (
                vec!["Employee", "Email", "Type", "Start", "End", "Status", "Reason"],
                rows.iter()
                    .map(|r| {
                        vec![
                            r.employee_name.clone(),
                            r.employee_email.clone(),
                            r.leave_type.clone(),
                            r.start_date.clone(),
                            r.end_date.clone(),
                            r.status.clone(),
                            r.reason.clone(),
                        ]
                    })
                    .collect(),
            ),
            Report::Tasks(rows) => (
                vec!["Task", "Status", "Assigned To", "Due Date"],
                rows.iter()
                    .map(|r| {
                        vec![
                            r.task_name.clone(),
                            r.status.clone(),
                            r.assigned_to.clone(),
                            r.due_date.clone(),
                        ]
                    })
                    .collect(),
            ),
            Report::BillableHours(rows) => (
                vec!["Employee", "Task", "Hours", "Billable Hours"],
                rows.iter()
                    .map(|r| {
                        vec![
                            r.employee.clone(),
                            r.task.clone(),
                            format!("{:.2}", r.hours),
                            format!("{:.2}", r.billable_hours),
                        ]
                    })
                    .collect(),
            ),
            Report::PerformanceMetrics(m) => (
                vec!["Metric", "Value"],
                m.entries()
                    .iter()
                    .map(|(name, value)| vec![name.to_string(), value.to_string()])
                    .collect(),
            ),
        }
    }
}
