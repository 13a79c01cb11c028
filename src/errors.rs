//! Unified application error type.
//! Every module (store, sync, calendar, cli) returns AppError so that the
//! command dispatcher can report failures in one place.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    // ---------------------------
    // Store errors
    // ---------------------------
    #[error("Work item not found: {0}")]
    ItemNotFound(String),

    #[error("Work session not found: {0}")]
    SessionNotFound(String),

    #[error("Duplicate work item id: {0}")]
    DuplicateId(String),

    // ---------------------------
    // Remote collaborators
    // ---------------------------
    #[error("Remote table error: {0}")]
    Transport(String),

    #[error("No remote table location configured")]
    NoLocation,

    #[error("Calendar error: {0}")]
    Calendar(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
