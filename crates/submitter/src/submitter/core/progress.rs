//! Progress tracking and reporting for submission runs

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use super::error::{URL_PREVIEW_CHARS, preview};
use super::metrics::ResultCounters;

/// Progress callback for submission runs
pub type ProgressCallback = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

/// Events emitted during a submission run
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    RunStarted {
        total_urls: usize,
        total_batches: usize,
        max_concurrent: usize,
        batch_size: usize,
    },
    BatchStarted {
        batch_number: usize,
        total_batches: usize,
        size: usize,
    },
    SubmissionFailed {
        url: String,
        /// 1-based position inside the batch
        position: usize,
        batch_size: usize,
        category: &'static str,
        detail: String,
    },
    BatchComplete {
        batch_number: usize,
        total_batches: usize,
        duration: Duration,
        rate: f64,
    },
    BatchDelay {
        delay: Duration,
    },
    Progress {
        processed: usize,
        total: usize,
        rate: f64,
        success: u64,
        error: u64,
    },
    RunComplete {
        counters: ResultCounters,
        duration: Duration,
        rate: f64,
    },
}

/// Trait for progress reporting with more granular control
pub trait ProgressReporter: Send + Sync {
    fn on_run_started(&self, _total_urls: usize, _total_batches: usize, _max_concurrent: usize, _batch_size: usize) {}
    fn on_batch_started(&self, _batch_number: usize, _total_batches: usize, _size: usize) {}
    fn on_submission_failed(&self, _url: &str, _position: usize, _batch_size: usize, _category: &str, _detail: &str) {}
    fn on_batch_complete(&self, _batch_number: usize, _total_batches: usize, _duration: Duration, _rate: f64) {}
    fn on_batch_delay(&self, _delay: Duration) {}
    fn on_progress(&self, _processed: usize, _total: usize, _rate: f64, _success: u64, _error: u64) {}
    fn on_run_complete(&self, _counters: &ResultCounters, _duration: Duration, _rate: f64) {}
}

/// Extension trait to convert ProgressReporter to ProgressCallback
pub trait IntoProgressCallback {
    fn into_callback(self) -> ProgressCallback;
}

impl<T: ProgressReporter + 'static> IntoProgressCallback for T {
    fn into_callback(self) -> ProgressCallback {
        Arc::new(move |event| match event {
            ProgressEvent::RunStarted { total_urls, total_batches, max_concurrent, batch_size } => {
                self.on_run_started(total_urls, total_batches, max_concurrent, batch_size);
            }
            ProgressEvent::BatchStarted { batch_number, total_batches, size } => {
                self.on_batch_started(batch_number, total_batches, size);
            }
            ProgressEvent::SubmissionFailed { url, position, batch_size, category, detail } => {
                self.on_submission_failed(&url, position, batch_size, category, &detail);
            }
            ProgressEvent::BatchComplete { batch_number, total_batches, duration, rate } => {
                self.on_batch_complete(batch_number, total_batches, duration, rate);
            }
            ProgressEvent::BatchDelay { delay } => {
                self.on_batch_delay(delay);
            }
            ProgressEvent::Progress { processed, total, rate, success, error } => {
                self.on_progress(processed, total, rate, success, error);
            }
            ProgressEvent::RunComplete { counters, duration, rate } => {
                self.on_run_complete(&counters, duration, rate);
            }
        })
    }
}

/// Console label for a failure category
fn failure_label(category: &str) -> &'static str {
    match category {
        "http_status" => "HTTP ERROR",
        "connection" => "CONNECTION ERROR",
        _ => "OTHER ERROR",
    }
}

/// Simple console progress reporter implementation
///
/// Failures and the final summary are always printed; batch and progress
/// lines only when `verbose` is set.
#[derive(Debug, Default)]
pub struct ConsoleProgressReporter {
    pub verbose: bool,
}

impl ConsoleProgressReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ProgressReporter for ConsoleProgressReporter {
    fn on_run_started(&self, total_urls: usize, total_batches: usize, max_concurrent: usize, batch_size: usize) {
        if self.verbose {
            println!("🎯 PROCESSING: {} URLs", total_urls);
            println!("📊 Concurrency: {} | Batch size: {}", max_concurrent, batch_size);
            println!("📦 Split into {} batches\n", total_batches);
        }
    }

    fn on_batch_started(&self, batch_number: usize, total_batches: usize, size: usize) {
        if self.verbose {
            println!("🚀 BATCH {}/{}: Processing {} URLs...", batch_number, total_batches, size);
        }
    }

    fn on_submission_failed(&self, url: &str, position: usize, batch_size: usize, category: &str, detail: &str) {
        println!("❌ {} [{}/{}]: {}... - {}",
            failure_label(category), position, batch_size, preview(url, URL_PREVIEW_CHARS), detail);
    }

    fn on_batch_complete(&self, batch_number: usize, _total_batches: usize, duration: Duration, rate: f64) {
        if self.verbose {
            println!("✅ Batch {} complete in {:.1}s ({:.1} req/s)", batch_number, duration.as_secs_f64(), rate);
        }
    }

    fn on_batch_delay(&self, delay: Duration) {
        if self.verbose {
            println!("⏳ Waiting {} seconds before next batch...", delay.as_secs_f64());
        }
    }

    fn on_progress(&self, processed: usize, total: usize, rate: f64, success: u64, error: u64) {
        if self.verbose {
            let percent = if total == 0 { 0.0 } else { processed as f64 / total as f64 * 100.0 };
            println!("📈 Progress: {}/{} ({:.1}%)", processed, total, percent);
            println!("⚡ Rate: {:.1} URLs/sec | Success: {} | Errors: {}\n", rate, success, error);
        }
    }

    fn on_run_complete(&self, counters: &ResultCounters, duration: Duration, rate: f64) {
        let rule = "=".repeat(50);
        println!("\n{}", rule);
        println!("🏆 FINAL RESULTS");
        println!("{}", rule);
        println!("⏱️  Total time: {:.1}s", duration.as_secs_f64());
        println!("🚀 Average rate: {:.1} URLs/second", rate);
        println!("✅ Successful: {}", counters.success);
        if counters.already_processed > 0 {
            println!("⏭️  Already processed: {}", counters.already_processed);
        }
        println!("❌ Errors: {}", counters.error);
        println!("📊 Success rate: {:.1}%", counters.success_rate() * 100.0);
    }
}

/// Reporter that forwards events to `tracing`
#[derive(Debug, Default)]
pub struct TracingProgressReporter;

impl ProgressReporter for TracingProgressReporter {
    fn on_run_started(&self, total_urls: usize, total_batches: usize, max_concurrent: usize, batch_size: usize) {
        info!(total_urls, total_batches, max_concurrent, batch_size, "Submission run started");
    }

    fn on_batch_started(&self, batch_number: usize, total_batches: usize, size: usize) {
        debug!(batch_number, total_batches, size, "Batch started");
    }

    fn on_submission_failed(&self, url: &str, position: usize, batch_size: usize, category: &str, detail: &str) {
        debug!(url = preview(url, URL_PREVIEW_CHARS), position, batch_size, category, detail, "Submission failed");
    }

    fn on_batch_complete(&self, batch_number: usize, total_batches: usize, duration: Duration, rate: f64) {
        debug!(batch_number, total_batches, duration_ms = duration.as_millis() as u64, rate, "Batch complete");
    }

    fn on_progress(&self, processed: usize, total: usize, rate: f64, success: u64, error: u64) {
        debug!(processed, total, rate, success, error, "Progress");
    }

    fn on_run_complete(&self, counters: &ResultCounters, duration: Duration, rate: f64) {
        info!(
            success = counters.success,
            error = counters.error,
            total = counters.total,
            duration_secs = duration.as_secs_f64(),
            rate,
            "Submission run complete"
        );
    }
}

/// Null progress reporter that does nothing
#[derive(Debug, Default)]
pub struct NullProgressReporter;

impl ProgressReporter for NullProgressReporter {}

/// Composite progress reporter that forwards events to multiple reporters
pub struct CompositeProgressReporter {
    reporters: Vec<Box<dyn ProgressReporter>>,
}

impl std::fmt::Debug for CompositeProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeProgressReporter")
            .field("reporters_count", &self.reporters.len())
            .finish()
    }
}

impl CompositeProgressReporter {
    pub fn new() -> Self {
        Self {
            reporters: Vec::new(),
        }
    }

    pub fn add_reporter<R: ProgressReporter + 'static>(mut self, reporter: R) -> Self {
        self.reporters.push(Box::new(reporter));
        self
    }
}

impl Default for CompositeProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for CompositeProgressReporter {
    fn on_run_started(&self, total_urls: usize, total_batches: usize, max_concurrent: usize, batch_size: usize) {
        for reporter in &self.reporters {
            reporter.on_run_started(total_urls, total_batches, max_concurrent, batch_size);
        }
    }

    fn on_batch_started(&self, batch_number: usize, total_batches: usize, size: usize) {
        for reporter in &self.reporters {
            reporter.on_batch_started(batch_number, total_batches, size);
        }
    }

    fn on_submission_failed(&self, url: &str, position: usize, batch_size: usize, category: &str, detail: &str) {
        for reporter in &self.reporters {
            reporter.on_submission_failed(url, position, batch_size, category, detail);
        }
    }

    fn on_batch_complete(&self, batch_number: usize, total_batches: usize, duration: Duration, rate: f64) {
        for reporter in &self.reporters {
            reporter.on_batch_complete(batch_number, total_batches, duration, rate);
        }
    }

    fn on_batch_delay(&self, delay: Duration) {
        for reporter in &self.reporters {
            reporter.on_batch_delay(delay);
        }
    }

    fn on_progress(&self, processed: usize, total: usize, rate: f64, success: u64, error: u64) {
        for reporter in &self.reporters {
            reporter.on_progress(processed, total, rate, success, error);
        }
    }

    fn on_run_complete(&self, counters: &ResultCounters, duration: Duration, rate: f64) {
        for reporter in &self.reporters {
            reporter.on_run_complete(counters, duration, rate);
        }
    }
}
