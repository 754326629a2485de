//! Error types for `.env` parsing and struct binding.
//!
//! Responsibilities:
//! - Define error variants for parse failures, binding failures, and
//!   missing required keys.
//!
//! Invariants / Assumptions:
//! - Parse errors carry the 1-based line number but NEVER the raw line
//!   contents, so error messages cannot leak secrets from `.env` files.
//! - Unterminated quotes, undefined variables, and unknown escape
//!   sequences are lenient conditions and never surface here.

use thiserror::Error;

/// Errors that can occur while parsing a `.env` file.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A non-blank, non-comment line has no `=` or an empty key.
    ///
    /// SAFETY: only the line number is reported, never the line text.
    #[error("line {line}: cannot get key and value")]
    LineFormat { line: usize },

    /// The file could not be opened or read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while binding resolved values onto a record.
#[derive(Error, Debug)]
pub enum BindError {
    /// A field's source value or default text failed to parse.
    #[error("failed to parse field {field}: {message}")]
    InvalidField { field: String, message: String },

    /// A registered validator rejected a field's value.
    #[error("format validation failed for field {field}: {message}")]
    Validation { field: String, message: String },
}

/// One or more required keys are unset or empty.
#[derive(Error, Debug)]
#[error("the following environment variables are required: {}", .missing.join(", "))]
pub struct RequireError {
    /// Every requested key whose value was unset or empty, in request order.
    pub missing: Vec<String>,
}
