//! Submission endpoint abstraction
//!
//! The submitter only needs something that accepts one URL and reports
//! success or failure. `HttpEndpoint` is the production implementation;
//! tests plug in their own.

use async_trait::async_trait;
use std::sync::Arc;

use crate::submitter::core::{Acknowledgement, Result};

/// Trait for anything that accepts URL submissions
#[async_trait]
pub trait SubmissionEndpoint: Send + Sync {
    /// Submit a single URL
    ///
    /// Returns the endpoint's acknowledgement on success. Every failure,
    /// including non-success statuses, is an `Err`.
    async fn submit(&self, url: &str) -> Result<Acknowledgement>;

    /// Verify the endpoint is reachable before a run
    async fn check_health(&self) -> Result<()> {
        Ok(())
    }

    /// Human-readable target, used in logs
    fn describe(&self) -> String;
}

#[async_trait]
impl<T: SubmissionEndpoint + ?Sized> SubmissionEndpoint for Arc<T> {
    async fn submit(&self, url: &str) -> Result<Acknowledgement> {
        (**self).submit(url).await
    }

    async fn check_health(&self) -> Result<()> {
        (**self).check_health().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
