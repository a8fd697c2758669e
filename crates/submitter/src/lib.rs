//! URL Submitter Library
//!
//! This library submits lists of URLs to a remote submission endpoint in
//! fixed-size batches with a bounded number of in-flight requests, and keeps
//! success/error counts and throughput statistics for the run.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use url_submitter::{
//!     BatchSubmitter, ConsoleProgressReporter, IntoProgressCallback,
//!     SubmitterConfigBuilder, load_urls,
//! };
//!
//! # async fn example() -> url_submitter::Result<()> {
//! // Load the URL list (a JSON array of strings)
//! let urls = load_urls("urls.json", None).await?;
//!
//! // Configure concurrency and batching
//! let config = SubmitterConfigBuilder::new()
//!     .endpoint("http://localhost:8000/submit_url")
//!     .max_concurrent(3)
//!     .batch_size(25)
//!     .build()?;
//!
//! let submitter = BatchSubmitter::new(config)?;
//! let progress = ConsoleProgressReporter::new(true).into_callback();
//!
//! let summary = submitter.process_urls(&urls, Some(progress)).await;
//! println!("{} ok, {} failed", summary.counters.success, summary.counters.error);
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Bounded concurrency**: a shared semaphore caps in-flight submissions
//! - **Sequential batches**: fixed-size batches with a fixed pause in between
//! - **Partial failures**: failed submissions are counted, never abort the run
//! - **Progress tracking**: per-batch and per-run events with throughput
//! - **Pluggable endpoint**: anything implementing `SubmissionEndpoint`

pub mod submitter;

// Re-export commonly used types for convenience
pub use submitter::{
    BatchReport, BatchSubmitter, ConsoleProgressReporter, IntoProgressCallback,
    ProgressCallback, ProgressEvent, ProgressReporter, Result, ResultCounters, RunSummary,
    SubmissionEndpoint, SubmitError, SubmitterConfig, SubmitterConfigBuilder, load_urls,
};
