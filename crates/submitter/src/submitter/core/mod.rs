//! Core types used throughout the submitter
//!
//! This module contains the types every other module depends on: the wire
//! format of the submission endpoint, submission outcomes, errors, progress
//! events and counters.

pub mod error;
pub mod http;
pub mod metrics;
pub mod progress;

pub use error::{ErrorSeverity, Result, SubmitError, preview};
pub use http::HttpEndpoint;
pub use metrics::{ResultCounters, SubmissionMetrics};
pub use progress::{
    CompositeProgressReporter, ConsoleProgressReporter, IntoProgressCallback, NullProgressReporter,
    ProgressCallback, ProgressEvent, ProgressReporter, TracingProgressReporter,
};

use serde::{Deserialize, Serialize};

/// JSON body sent to the submission endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest<'a> {
    pub url: &'a str,
}

/// JSON body the submission endpoint returns on success
///
/// Every field is optional: only the status code decides success, the body is
/// informational.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitResponse {
    pub status: Option<String>,
    pub image_id: Option<String>,
}

impl SubmitResponse {
    /// Parse a response body; anything that is not the expected JSON yields an empty response
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// What the endpoint said about an accepted URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgement {
    /// Queued for downstream processing
    Submitted,
    /// Endpoint already has a result for this URL
    AlreadyProcessed,
    /// 2xx with a body we don't recognise
    Accepted,
}

impl Acknowledgement {
    /// Interpret a 2xx response body
    pub fn from_body(body: &[u8]) -> Self {
        Self::from_response(&SubmitResponse::parse(body))
    }

    pub fn from_response(response: &SubmitResponse) -> Self {
        match response.status.as_deref() {
            Some("submitted") => Acknowledgement::Submitted,
            Some("already_processed") => Acknowledgement::AlreadyProcessed,
            _ => Acknowledgement::Accepted,
        }
    }
}

/// Final state of one submission attempt
///
/// Submissions never return errors to the caller; a failure is a value.
#[derive(Debug)]
pub enum SubmitOutcome {
    Succeeded(Acknowledgement),
    Failed(SubmitError),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }

    pub fn error(&self) -> Option<&SubmitError> {
        match self {
            SubmitOutcome::Failed(error) => Some(error),
            SubmitOutcome::Succeeded(_) => None,
        }
    }
}
