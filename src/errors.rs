//! Unified application error type.
//! All modules (db, api, tracker, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Local store
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Remote API
    // ---------------------------
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected server response: {0}")]
    Decode(String),

    // ---------------------------
    // Authentication
    // ---------------------------
    #[error("Authentication token not found. Please log in again.")]
    NotLoggedIn,

    #[error("Session expired or rejected by the server. Please log in again.")]
    Unauthorized,

    #[error("This action requires an administrator account")]
    AdminRequired,

    // ---------------------------
    // Time tracking state machine
    // ---------------------------
    #[error("You are already clocked in.")]
    AlreadyClockedIn,

    #[error("You are not currently clocked in.")]
    NotClockedIn,

    #[error("A break is already in progress.")]
    AlreadyOnBreak,

    #[error("No break is currently in progress.")]
    NotOnBreak,

    #[error("The server reports no active clock-in for this user.")]
    NoActiveSession,

    // ---------------------------
    // Parsing / validation
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid break type: {0} (expected 'tea' or 'lunch')")]
    InvalidBreakType(String),

    #[error("{0}")]
    Validation(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True when the action was refused because the credential is missing or stale.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AppError::NotLoggedIn | AppError::Unauthorized)
    }

    /// True when the failure happened before the server answered.
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Http(e) if e.is_connect() || e.is_timeout() || e.is_request())
    }
}

pub type AppResult<T> = Result<T, AppError>;
