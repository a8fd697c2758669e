//! Configuration types for the submitter

use std::time::Duration;
use url::Url;

use crate::submitter::core::{Result, SubmitError};

/// Default submission endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/submit_url";

/// Configuration for submission runs
#[derive(Debug, Clone)]
pub struct SubmitterConfig {
    /// Submission URL receiving `POST {"url": ...}`
    pub endpoint: String,
    /// Maximum number of submissions awaiting a response at once
    pub max_concurrent: usize,
    /// Number of URLs per batch
    pub batch_size: usize,
    /// Fixed pause between consecutive batches
    pub batch_delay: Duration,
    /// Optional cap on a single request; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// How long idle pooled connections are kept alive
    pub keepalive_expiry: Duration,
    pub user_agent: String,
}

impl SubmitterConfig {
    /// Check the configuration before any submission happens
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent == 0 {
            return Err(SubmitError::config(
                "max_concurrent must be a positive integer",
                "max_concurrent",
                Some("Use at least 1 concurrent submission"),
            ));
        }
        if self.batch_size == 0 {
            return Err(SubmitError::config(
                "batch_size must be a positive integer",
                "batch_size",
                Some("Use a batch size of at least 1"),
            ));
        }
        if self.request_timeout == Some(Duration::ZERO) {
            return Err(SubmitError::config(
                "request_timeout must be greater than zero",
                "request_timeout",
                Some("Leave the timeout unset to wait indefinitely"),
            ));
        }
        self.endpoint_url()?;
        Ok(())
    }

    /// Parse the endpoint, accepting only http and https
    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            SubmitError::config(
                format!("endpoint '{}' is not a valid URL: {}", self.endpoint, e),
                "endpoint",
                Some("Use an absolute URL such as http://localhost:8000/submit_url"),
            )
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(SubmitError::config(
                format!("endpoint scheme '{}' is not supported", scheme),
                "endpoint",
                Some("Use an http or https endpoint"),
            )),
        }
    }

    /// Number of batches a list of `url_count` URLs is split into
    pub fn batch_count(&self, url_count: usize) -> usize {
        url_count.div_ceil(self.batch_size.max(1))
    }
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_concurrent: 10,
            batch_size: 50,
            batch_delay: Duration::from_secs(2),
            request_timeout: None,
            keepalive_expiry: Duration::from_secs(30),
            user_agent: concat!("url-submitter/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Builder for `SubmitterConfig`
#[derive(Debug, Clone, Default)]
pub struct SubmitterConfigBuilder {
    config: SubmitterConfig,
}

impl SubmitterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    pub fn max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.config.max_concurrent = max_concurrent;
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    pub fn batch_delay(mut self, delay: Duration) -> Self {
        self.config.batch_delay = delay;
        self
    }

    pub fn request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn keepalive_expiry(mut self, expiry: Duration) -> Self {
        self.config.keepalive_expiry = expiry;
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<SubmitterConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
