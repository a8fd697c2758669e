//! Submitter module
//!
//! This module contains all the submission functionality including
//! core types, configuration, the endpoint seam, and batch operations.

pub mod core;
pub mod config;
pub mod batch;
pub mod endpoint;
pub mod input;
pub mod r#lib;

// Re-export main types for convenience
pub use r#lib::BatchSubmitter;
pub use self::core::{
    Acknowledgement, SubmitOutcome, SubmitRequest, SubmitResponse,
    ProgressCallback, ProgressEvent, ProgressReporter, IntoProgressCallback,
    ConsoleProgressReporter, NullProgressReporter, CompositeProgressReporter, TracingProgressReporter,
    ResultCounters, SubmissionMetrics, HttpEndpoint,
    SubmitError, Result, ErrorSeverity,
};
pub use config::{SubmitterConfig, SubmitterConfigBuilder, DEFAULT_ENDPOINT};
pub use batch::{BatchReport, RunSummary, partition_batches, throughput};
pub use endpoint::SubmissionEndpoint;
pub use input::load_urls;
