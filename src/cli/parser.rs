use crate::export::ExportFormat;
use crate::models::clock::BreakType;
use crate::models::leave::LeaveType;
use crate::models::report::ReportKind;
use crate::models::task::TaskStatus;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for emptrack
/// Terminal client for the employee tracking service
#[derive(Parser)]
#[command(
    name = "emptrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Employee tracking client: clock in/out with breaks, tasks, projects, leave and reports",
    long_about = None
)]
pub struct Cli {
    /// Override the local store path (useful for tests or multiple accounts)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the API base URL
    #[arg(global = true, long = "api-url", env = "EMPTRACK_API_URL")]
    pub api_url: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the local store
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Sign in and store the session locally
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "EMPTRACK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and forget the local session and clock state
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Clock in, clock out and follow the running session
    Clock {
        #[command(subcommand)]
        action: ClockAction,
    },

    /// Start or end a break
    Break {
        #[command(subcommand)]
        action: BreakAction,
    },

    /// Manage tasks
    Tasks {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Manage projects
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Manage employees (admin)
    Employees {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Leave requests and balance
    Leave {
        #[command(subcommand)]
        action: LeaveAction,
    },

    /// Show your clock records and breaks, grouped by day
    Timesheet {
        #[arg(long, value_name = "YYYY-MM-DD", help = "Only records of this day")]
        date: Option<String>,
    },

    /// Show an admin report, optionally exporting it
    Report {
        #[arg(value_enum)]
        kind: ReportKind,

        #[arg(
            long,
            value_enum,
            requires = "file",
            help = "Export format (defaults to the file extension)"
        )]
        format: Option<ExportFormat>,

        #[arg(long, value_name = "FILE", help = "Write the report to FILE")]
        file: Option<String>,

        #[arg(long, help = "Overwrite FILE without asking")]
        force: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum ClockAction {
    /// Start a work session
    In,
    /// Close the current work session
    Out,
    /// Show the current session
    Status,
    /// Follow the running counters live (Ctrl-C to stop)
    Watch {
        #[arg(long, help = "Stop after this many seconds")]
        seconds: Option<u64>,
    },
}

#[derive(Subcommand)]
pub enum BreakAction {
    /// Start a tea or lunch break
    Start {
        #[arg(long = "type", value_enum)]
        break_type: BreakType,

        #[arg(long)]
        notes: String,
    },
    /// End the current break
    End,
}

/// Optional task fields shared by `add` and `update`.
#[derive(Args)]
pub struct TaskFields {
    #[arg(long)]
    pub description: Option<String>,

    #[arg(long = "due", value_name = "YYYY-MM-DD")]
    pub due_date: Option<String>,

    #[arg(long, value_enum)]
    pub status: Option<TaskStatus>,

    #[arg(long = "assign", value_name = "EMPLOYEE_ID")]
    pub assigned_to: Option<i64>,

    #[arg(long = "project", value_name = "PROJECT_ID")]
    pub project_id: Option<i64>,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks
    List {
        #[arg(long, value_enum)]
        status: Option<TaskStatus>,

        #[arg(long = "project", value_name = "PROJECT_ID")]
        project_id: Option<i64>,
    },
    /// Show one task
    Show { id: i64 },
    /// Create a task (admin)
    Add {
        #[arg(long)]
        name: String,

        #[command(flatten)]
        fields: TaskFields,
    },
    /// Update a task
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: TaskFields,
    },
    /// Delete a task (admin)
    Delete {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Args)]
pub struct ProjectFields {
    #[arg(long)]
    pub description: Option<String>,

    #[arg(long = "start", value_name = "YYYY-MM-DD")]
    pub start_date: Option<String>,

    #[arg(long = "end", value_name = "YYYY-MM-DD")]
    pub end_date: Option<String>,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// List projects
    List,
    /// Create a project (admin)
    Add {
        #[arg(long)]
        name: String,

        #[command(flatten)]
        fields: ProjectFields,
    },
    /// Update a project (admin)
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: ProjectFields,
    },
    /// Delete a project (admin)
    Delete {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// List employees
    List,
    /// Create an employee
    Add {
        #[arg(long = "first-name")]
        first_name: String,

        #[arg(long = "last-name")]
        last_name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        role: Option<String>,
    },
    /// Update an employee
    Update {
        id: i64,

        #[arg(long = "first-name")]
        first_name: Option<String>,

        #[arg(long = "last-name")]
        last_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(long, help = "Mark the employee active or inactive")]
        active: Option<bool>,
    },
    /// Delete an employee
    Delete {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum LeaveAction {
    /// List leave requests
    List,
    /// Show the remaining leave days
    Balance,
    /// Submit a leave request
    Request {
        #[arg(long = "type", value_enum)]
        leave_type: LeaveType,

        #[arg(long, value_name = "YYYY-MM-DD")]
        start: String,

        #[arg(long, value_name = "YYYY-MM-DD")]
        end: String,

        #[arg(long)]
        reason: Option<String>,

        #[arg(long, help = "Save as draft instead of submitting")]
        draft: bool,
    },
    /// Change a leave request
    Update {
        id: i64,

        #[arg(long = "type", value_enum)]
        leave_type: Option<LeaveType>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        start: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        end: Option<String>,

        #[arg(long)]
        reason: Option<String>,

        #[arg(long, help = "Submit a draft for approval")]
        submit: bool,
    },
    /// Delete a leave request
    Delete {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
    /// Approve a pending request (admin)
    Approve { id: i64 },
    /// Reject a pending request (admin)
    Reject { id: i64 },
}
