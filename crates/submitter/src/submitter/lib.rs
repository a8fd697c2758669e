//! Main entry point for the batch submitter
//!
//! The call chain flows as follows:
//!
//! User Code
//! ↓
//! BatchSubmitter (this file)
//! ↓
//! batch:: functions (batch.rs)
//! ↓
//! SubmissionEndpoint (endpoint.rs)
//! ↓
//! HttpEndpoint (core/http.rs)

use crate::submitter::{
    batch::{self, BatchReport, RunSummary},
    config::SubmitterConfig,
    core::{HttpEndpoint, ProgressCallback, Result, SubmissionMetrics, SubmitOutcome},
    endpoint::SubmissionEndpoint,
};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Bounded-concurrency batch URL submitter
///
/// Owns the endpoint, the concurrency limiter shared by every submission,
/// and the result counters. Counters start at zero and accumulate over all
/// runs of this submitter.
pub struct BatchSubmitter {
    endpoint: Arc<dyn SubmissionEndpoint>,
    config: SubmitterConfig,
    limiter: Arc<Semaphore>,
    metrics: Arc<SubmissionMetrics>,
}

impl std::fmt::Debug for BatchSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchSubmitter")
            .field("endpoint", &self.endpoint.describe())
            .field("config", &self.config)
            .finish()
    }
}

impl BatchSubmitter {
    /// Create a submitter posting to the configured HTTP endpoint
    pub fn new(config: SubmitterConfig) -> Result<Self> {
        config.validate()?;
        let endpoint = HttpEndpoint::from_config(&config)?;
        Self::with_endpoint(endpoint, config)
    }

    /// Create a submitter with a custom endpoint
    pub fn with_endpoint<E: SubmissionEndpoint + 'static>(endpoint: E, config: SubmitterConfig) -> Result<Self> {
        config.validate()?;
        let limiter = Arc::new(Semaphore::new(config.max_concurrent));
        let metrics = Arc::new(SubmissionMetrics::default());

        Ok(Self {
            endpoint: Arc::new(endpoint),
            config,
            limiter,
            metrics,
        })
    }

    pub fn config(&self) -> &SubmitterConfig {
        &self.config
    }

    /// Get access to the result counters
    pub fn metrics(&self) -> &SubmissionMetrics {
        &self.metrics
    }

    /// Verify the endpoint is reachable
    pub async fn check_health(&self) -> Result<()> {
        self.endpoint.check_health().await
    }

    /// Submit a single URL under the concurrency limit
    pub async fn submit_one(&self, url: &str) -> SubmitOutcome {
        batch::submit_one(
            self.endpoint.as_ref(),
            &self.limiter,
            &self.metrics,
            url,
            1,
            1,
            None,
        ).await
    }

    /// Submit one batch concurrently and wait for every submission
    pub async fn process_batch(
        &self,
        urls: &[String],
        batch_number: usize,
        total_batches: usize,
        progress_callback: Option<ProgressCallback>,
    ) -> BatchReport {
        batch::process_batch(
            self.endpoint.as_ref(),
            &self.limiter,
            &self.metrics,
            urls,
            batch_number,
            total_batches,
            progress_callback.as_ref(),
        ).await
    }

    /// Submit every URL, batch by batch, and return the final counters
    pub async fn process_urls(
        &self,
        urls: &[String],
        progress_callback: Option<ProgressCallback>,
    ) -> RunSummary {
        batch::process_urls(
            self.endpoint.as_ref(),
            &self.limiter,
            &self.metrics,
            &self.config,
            urls,
            progress_callback,
        ).await
    }
}
