//! Batch submission operations
//!
//! A run is a sequence of batches. Inside a batch every URL is submitted
//! concurrently, bounded by a shared semaphore; batches themselves run one
//! after another with a fixed pause in between.

use futures::FutureExt;
use futures::future::join_all;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::submitter::{
    config::SubmitterConfig,
    core::{
        ProgressCallback, ProgressEvent, ResultCounters, SubmissionMetrics, SubmitError,
        SubmitOutcome, error::URL_PREVIEW_CHARS, preview,
    },
    endpoint::SubmissionEndpoint,
};

/// Split `urls` into consecutive batches of at most `batch_size` URLs
///
/// Order is preserved across batch boundaries; only the last batch may be
/// shorter.
pub fn partition_batches(urls: &[String], batch_size: usize) -> Vec<&[String]> {
    urls.chunks(batch_size.max(1)).collect()
}

/// Items per second, 0.0 when no time has elapsed
pub fn throughput(count: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        count as f64 / secs
    } else {
        0.0
    }
}

/// Outcome of one batch
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub batch_number: usize,
    pub total_batches: usize,
    pub size: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub duration: Duration,
}

impl BatchReport {
    /// Submissions per second for this batch
    pub fn rate(&self) -> f64 {
        throughput(self.size, self.duration)
    }
}

/// Outcome of a full run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub counters: ResultCounters,
    pub url_count: usize,
    pub duration: Duration,
    pub batches: Vec<BatchReport>,
}

impl RunSummary {
    /// URLs per second over the whole run, inter-batch pauses included
    pub fn average_rate(&self) -> f64 {
        throughput(self.url_count, self.duration)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Submit one URL while holding a concurrency slot
///
/// The attempt is counted in `total` before waiting for a slot. The slot is held from before the request until the outcome is recorded,
/// and released on every path when the permit drops. Nothing escapes as an
/// error: failures, including a panicking endpoint, are counted and returned
/// as `SubmitOutcome::Failed`.
pub async fn submit_one(
    endpoint: &dyn SubmissionEndpoint,
    limiter: &Semaphore,
    metrics: &SubmissionMetrics,
    url: &str,
    position: usize,
    batch_size: usize,
    progress_callback: Option<&ProgressCallback>,
) -> SubmitOutcome {
    metrics.record_submission_started();
    let permit = limiter.acquire().await;

    let result = match permit {
        Ok(_permit) => {
            match AssertUnwindSafe(endpoint.submit(url)).catch_unwind().await {
                Ok(result) => result,
                Err(payload) => Err(SubmitError::Unclassified {
                    url: url.to_string(),
                    kind: "panic".to_string(),
                    message: panic_message(payload.as_ref()),
                }),
            }
        }
        Err(closed) => Err(SubmitError::Unclassified {
            url: url.to_string(),
            kind: "limiter_closed".to_string(),
            message: closed.to_string(),
        }),
    };

    match result {
        Ok(acknowledgement) => {
            metrics.record_success(&acknowledgement);
            SubmitOutcome::Succeeded(acknowledgement)
        }
        Err(error) => {
            metrics.record_failure();

            // Without a reporter the log is the only place the failure shows up
            match progress_callback {
                Some(callback) => {
                    debug!("Submission {}/{} failed: {}", position, batch_size, error);
                    callback(ProgressEvent::SubmissionFailed {
                        url: url.to_string(),
                        position,
                        batch_size,
                        category: error.category(),
                        detail: error.short_detail(),
                    });
                }
                None => warn!(
                    "Submission {}/{} failed for {}...: {}",
                    position,
                    batch_size,
                    preview(url, URL_PREVIEW_CHARS),
                    error.short_detail()
                ),
            }

            SubmitOutcome::Failed(error)
        }
    }
}

/// Submit every URL of one batch concurrently and wait for all of them
///
/// All submissions start together and contend for the shared limiter. A
/// failure never cancels its siblings.
pub async fn process_batch(
    endpoint: &dyn SubmissionEndpoint,
    limiter: &Semaphore,
    metrics: &SubmissionMetrics,
    urls: &[String],
    batch_number: usize,
    total_batches: usize,
    progress_callback: Option<&ProgressCallback>,
) -> BatchReport {
    if let Some(callback) = progress_callback {
        callback(ProgressEvent::BatchStarted {
            batch_number,
            total_batches,
            size: urls.len(),
        });
    }

    let started = Instant::now();
    let outcomes = join_all(urls.iter().enumerate().map(|(index, url)| {
        submit_one(endpoint, limiter, metrics, url, index + 1, urls.len(), progress_callback)
    }))
    .await;
    let duration = started.elapsed();

    let succeeded = outcomes.iter().filter(|outcome| outcome.is_success()).count();
    let report = BatchReport {
        batch_number,
        total_batches,
        size: urls.len(),
        succeeded,
        failed: outcomes.len() - succeeded,
        duration,
    };

    debug!(
        "Batch {}/{} finished: {} ok, {} failed in {:?}",
        batch_number, total_batches, report.succeeded, report.failed, duration
    );

    if let Some(callback) = progress_callback {
        callback(ProgressEvent::BatchComplete {
            batch_number,
            total_batches,
            duration,
            rate: report.rate(),
        });
    }

    report
}

/// Submit all URLs batch by batch
///
/// Batches run strictly in order with `config.batch_delay` between them,
/// never after the last one. Progress is reported after each batch and a
/// summary at the end.
pub async fn process_urls(
    endpoint: &dyn SubmissionEndpoint,
    limiter: &Semaphore,
    metrics: &SubmissionMetrics,
    config: &SubmitterConfig,
    urls: &[String],
    progress_callback: Option<ProgressCallback>,
) -> RunSummary {
    let start = Instant::now();

    let batches = partition_batches(urls, config.batch_size);
    let total_batches = batches.len();

    debug!(
        "Submitting {} URLs to {} in {} batches (max_concurrent={}, batch_size={})",
        urls.len(), endpoint.describe(), total_batches, config.max_concurrent, config.batch_size
    );

    if let Some(ref callback) = progress_callback {
        callback(ProgressEvent::RunStarted {
            total_urls: urls.len(),
            total_batches,
            max_concurrent: config.max_concurrent,
            batch_size: config.batch_size,
        });
    }

    let mut reports = Vec::with_capacity(total_batches);
    for (index, batch) in batches.into_iter().enumerate() {
        let batch_number = index + 1;
        let report = process_batch(
            endpoint,
            limiter,
            metrics,
            batch,
            batch_number,
            total_batches,
            progress_callback.as_ref(),
        ).await;
        reports.push(report);

        if let Some(ref callback) = progress_callback {
            let processed = (batch_number * config.batch_size).min(urls.len());
            let counters = metrics.snapshot();
            callback(ProgressEvent::Progress {
                processed,
                total: urls.len(),
                rate: throughput(processed, start.elapsed()),
                success: counters.success,
                error: counters.error,
            });
        }

        if batch_number < total_batches {
            if let Some(ref callback) = progress_callback {
                callback(ProgressEvent::BatchDelay { delay: config.batch_delay });
            }
            tokio::time::sleep(config.batch_delay).await;
        }
    }

    let summary = RunSummary {
        counters: metrics.snapshot(),
        url_count: urls.len(),
        duration: start.elapsed(),
        batches: reports,
    };

    debug!(
        "Submission run finished: {} ok, {} failed of {} in {:.1}s",
        summary.counters.success, summary.counters.error, summary.counters.total,
        summary.duration.as_secs_f64()
    );

    if let Some(ref callback) = progress_callback {
        callback(ProgressEvent::RunComplete {
            counters: summary.counters,
            duration: summary.duration,
            rate: summary.average_rate(),
        });
    }

    summary
}
