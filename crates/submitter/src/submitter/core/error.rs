//! Error types for the submitter with context and classification helpers

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Number of URL characters shown in console and log lines
pub const URL_PREVIEW_CHARS: usize = 30;

/// Number of response-body or error-text characters shown in console and log lines
pub const DETAIL_PREVIEW_CHARS: usize = 50;

/// Errors produced while loading input, configuring, or submitting URLs
///
/// The first four variants describe a single failed submission. They are
/// counted and reported but never abort a run. The remaining variants are
/// fatal and surface before any URL is submitted.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// Endpoint answered with a non-success status
    #[error("Submission of '{url}' rejected with HTTP {status}")]
    HttpStatus {
        url: String,
        status: u16,
        body: String,
    },

    /// Transport-level failure reaching the endpoint
    #[error("Could not reach the submission endpoint for '{url}'")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the opt-in per-request timeout
    #[error("Submission of '{url}' timed out after {duration_secs}s")]
    Timeout {
        url: String,
        duration_secs: u64,
    },

    /// Anything else that went wrong while submitting
    #[error("Submission of '{url}' failed: {kind}: {message}")]
    Unclassified {
        url: String,
        kind: String,
        message: String,
    },

    /// Configuration errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },

    /// URL list could not be read
    #[error("Failed to read URL list '{path}'")]
    InputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// URL list is not a JSON array of strings
    #[error("URL list '{path}' is not a JSON array of strings")]
    InputFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Pre-flight health check failed
    #[error("Health check against '{url}' failed: {reason}")]
    HealthCheck {
        url: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, SubmitError>;

impl SubmitError {
    /// Classify a reqwest failure for the given submitted URL
    ///
    /// Connect failures become `Connection`, timeouts become `Timeout`, and
    /// everything else is `Unclassified` with the reqwest failure kind.
    pub fn from_request(url: &str, error: reqwest::Error, timeout: Option<Duration>) -> Self {
        if error.is_timeout() {
            SubmitError::Timeout {
                url: url.to_string(),
                duration_secs: timeout.map_or(0, |t| t.as_secs()),
            }
        } else if error.is_connect() {
            SubmitError::Connection {
                url: url.to_string(),
                source: error,
            }
        } else {
            SubmitError::Unclassified {
                url: url.to_string(),
                kind: request_error_kind(&error).to_string(),
                message: error.to_string(),
            }
        }
    }

    /// Shorthand for a configuration error on a named field
    pub fn config<M: Into<String>, F: Into<String>>(message: M, field: F, suggestion: Option<&str>) -> Self {
        SubmitError::Configuration {
            message: message.into(),
            field: Some(field.into()),
            suggestion: suggestion.map(str::to_string),
        }
    }

    /// Whether this error describes a single failed submission
    ///
    /// Submission errors are counted; all other errors abort before any
    /// submission happens.
    pub fn is_submission_error(&self) -> bool {
        matches!(self,
            SubmitError::HttpStatus { .. } |
            SubmitError::Connection { .. } |
            SubmitError::Timeout { .. } |
            SubmitError::Unclassified { .. }
        )
    }

    /// Get error category for metrics and logging
    pub fn category(&self) -> &'static str {
        match self {
            SubmitError::HttpStatus { .. } => "http_status",
            SubmitError::Connection { .. } => "connection",
            SubmitError::Timeout { .. } => "timeout",
            SubmitError::Unclassified { .. } => "unclassified",
            SubmitError::Configuration { .. } => "configuration",
            SubmitError::InputFile { .. } => "input_file",
            SubmitError::InputFormat { .. } => "input_format",
            SubmitError::HealthCheck { .. } => "health_check",
        }
    }

    /// Get severity level for error prioritization
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SubmitError::HttpStatus { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            SubmitError::HttpStatus { .. } => ErrorSeverity::Low,
            SubmitError::Connection { .. } => ErrorSeverity::Medium,
            SubmitError::Timeout { .. } => ErrorSeverity::Medium,
            SubmitError::Unclassified { .. } => ErrorSeverity::Medium,
            SubmitError::Configuration { .. } => ErrorSeverity::High,
            SubmitError::InputFile { .. } => ErrorSeverity::Critical,
            SubmitError::InputFormat { .. } => ErrorSeverity::Critical,
            SubmitError::HealthCheck { .. } => ErrorSeverity::High,
        }
    }

    /// Get user-friendly suggestion for resolving the error
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            SubmitError::Connection { .. } | SubmitError::HealthCheck { .. } => {
                Some("Check that the submission service is running and the endpoint URL is correct")
            }
            SubmitError::Timeout { .. } => {
                Some("Increase the request timeout or reduce concurrency")
            }
            SubmitError::InputFile { .. } => Some("Check the path to the URL list"),
            SubmitError::InputFormat { .. } => {
                Some("The URL list must be a JSON array of strings, e.g. [\"https://...\"]")
            }
            SubmitError::Configuration { suggestion, .. } => suggestion.as_deref(),
            _ => None,
        }
    }

    /// Short one-line detail used in per-URL failure lines
    ///
    /// Mirrors what the operator needs to see: status and body excerpt for
    /// HTTP errors, the failure text otherwise.
    pub fn short_detail(&self) -> String {
        match self {
            SubmitError::HttpStatus { status, body, .. } => {
                format!("{} {}", status, preview(body, DETAIL_PREVIEW_CHARS))
            }
            SubmitError::Connection { source, .. } => {
                preview(&source.to_string(), DETAIL_PREVIEW_CHARS).to_string()
            }
            SubmitError::Timeout { duration_secs, .. } => format!("timed out after {}s", duration_secs),
            SubmitError::Unclassified { kind, message, .. } => {
                format!("{}: {}", kind, preview(message, DETAIL_PREVIEW_CHARS))
            }
            other => preview(&other.to_string(), DETAIL_PREVIEW_CHARS).to_string(),
        }
    }

    /// Create a detailed error report for debugging
    pub fn detailed_report(&self) -> String {
        let mut report = format!("Error: {}\n", self);
        report.push_str(&format!("Category: {}\n", self.category()));
        report.push_str(&format!("Severity: {:?}\n", self.severity()));

        if let Some(suggestion) = self.suggestion() {
            report.push_str(&format!("Suggestion: {}\n", suggestion));
        }

        if let Some(source) = self.source() {
            report.push_str(&format!("Root cause: {}\n", source));
        }

        report
    }
}

/// Error severity levels for prioritization
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// Leading `max_chars` characters of `text`, never splitting a code point
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn request_error_kind(error: &reqwest::Error) -> &'static str {
    if error.is_builder() {
        "builder"
    } else if error.is_redirect() {
        "redirect"
    } else if error.is_body() {
        "body"
    } else if error.is_decode() {
        "decode"
    } else if error.is_request() {
        "request"
    } else {
        "other"
    }
}
