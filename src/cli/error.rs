// Error handling utilities for consistent error messages and exit codes

use std::process;
use thiserror::Error;
use crate::validate::FieldErrors;

/// Errors the CLI reports as user errors (exit code 1)
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Failed to read input {source_name}: {source}")]
    Input {
        source_name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON in {source_name}: {source}")]
    Json {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{form} form has {} invalid field(s)", .errors.len())]
    InvalidForm { form: String, errors: FieldErrors },
    #[error("{0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("{0}")]
    Message(String),
}

/// Exit with a user error (exit code 1)
/// User errors are for invalid input, missing files, failed form checks.
pub fn user_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Exit with an internal error (exit code 2)
pub fn internal_error(message: &str) -> ! {
    eprintln!("Internal error: {}", message);
    process::exit(2);
}

/// Whether an error from `run` should be reported as a user error
pub fn is_user_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.downcast_ref::<UserError>().is_some())
}

/// Validate an identifier given on the command line (non-empty, no whitespace)
pub fn validate_identifier(value: &str, what: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} cannot be empty", what));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(format!("Invalid {}: '{}'. Identifiers cannot contain spaces.", what, value));
    }
    Ok(())
}
