pub mod auth;
pub mod breaks;
pub mod clock;
pub mod config;
pub mod employees;
pub mod init;
pub mod leave;
pub mod log;
pub mod projects;
pub mod report;
pub mod tasks;
pub mod timesheet;

use crate::ui::messages::warning;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// `yes` skips the prompt.
pub(crate) fn confirmed(yes: bool, prompt: &str) -> bool {
    yes || ask_confirmation(prompt)
}
