use emptrack::errors::AppError;
use emptrack::export::{ExportFormat, export_report};
use emptrack::models::report::{LeaveBalanceRow, ProjectTaskRow, Report, WorkHoursRow};
use std::fs;
use std::path::Path;

mod common;
use common::temp_out;

fn tasks_report() -> Report {
    Report::Tasks(vec![
        ProjectTaskRow {
            task_name: "Write docs".into(),
            status: "Pending".into(),
            assigned_to: "alice".into(),
            due_date: "2026-11-01".into(),
        },
        ProjectTaskRow {
            task_name: "Ship, v2".into(),
            status: "Completed".into(),
            assigned_to: "bob".into(),
            due_date: "2026-09-30".into(),
        },
    ])
}

#[test]
fn test_csv_export_quotes_fields() {
    let out = temp_out("export_tasks_csv", "csv");
    export_report(&tasks_report(), ExportFormat::Csv, Path::new(&out), false).unwrap();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("Task,Status,Assigned To,Due Date"));
    assert_eq!(lines.next(), Some("Write docs,Pending,alice,2026-11-01"));
    assert_eq!(lines.next(), Some("\"Ship, v2\",Completed,bob,2026-09-30"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_csv_export_marks_open_sessions() {
    let report = Report::WorkHours(vec![WorkHoursRow {
        user: "bob".into(),
        clocked_in: "2026-10-02T08:00:00Z".into(),
        clocked_out: None,
        hours_worked: 2.0,
        extra_hours: 0.0,
    }]);
    let out = temp_out("export_work_hours_csv", "csv");
    export_report(&report, ExportFormat::Csv, Path::new(&out), false).unwrap();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("bob,2026-10-02T08:00:00Z,Still clocked in,2.00,0.00"));
}

#[test]
fn test_json_export_keeps_numbers() {
    let report = Report::LeaveBalance(vec![LeaveBalanceRow {
        user: "alice".into(),
        annual: 12.0,
        sick: 5.0,
        casual: 2.5,
    }]);
    let out = temp_out("export_balance_json", "json");
    export_report(&report, ExportFormat::Json, Path::new(&out), false).unwrap();

    let content = fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(value[0]["user"], "alice");
    assert_eq!(value[0]["casual"], 2.5);
    assert!(value[0]["annual"].is_number());
}

#[test]
fn test_export_overwrites_with_force() {
    let out = temp_out("export_force", "csv");
    fs::write(&out, "old content").unwrap();

    export_report(&tasks_report(), ExportFormat::Csv, Path::new(&out), true).unwrap();
    let content = fs::read_to_string(&out).unwrap();
    assert!(!content.contains("old content"));
    assert!(content.starts_with("Task,"));
}

#[test]
fn test_export_into_missing_directory_fails() {
    let mut dir = std::env::temp_dir();
    dir.push("emptrack_missing_export_dir");
    fs::remove_dir_all(&dir).ok();
    let path = dir.join("report.csv");

    let err = export_report(&tasks_report(), ExportFormat::Csv, &path, true).unwrap_err();
    assert!(matches!(err, AppError::Export(_)));
    assert!(!path.exists());
}

#[test]
fn test_format_from_extension() {
    assert_eq!(
        ExportFormat::from_path(Path::new("/tmp/out.csv")),
        Some(ExportFormat::Csv)
    );
    assert_eq!(
        ExportFormat::from_path(Path::new("REPORT.JSON")),
        Some(ExportFormat::Json)
    );
    assert_eq!(ExportFormat::from_path(Path::new("report.xlsx")), None);
    assert_eq!(ExportFormat::from_path(Path::new("report")), None);
    assert_eq!(ExportFormat::Json.as_str(), "json");
}
