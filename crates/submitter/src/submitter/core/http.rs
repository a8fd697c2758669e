//! HTTP submission endpoint
//!
//! Wraps a pooled reqwest client configured from `SubmitterConfig` and
//! speaks the `POST {"url": ...}` protocol of the submission service.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::submitter::config::SubmitterConfig;
use crate::submitter::core::{Acknowledgement, Result, SubmitError, SubmitRequest, SubmitResponse};
use crate::submitter::endpoint::SubmissionEndpoint;

/// Submission endpoint reached over HTTP
///
/// The client has no request timeout unless `request_timeout` is configured,
/// so a hung request holds its concurrency slot until the server answers.
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    client: Client,
    endpoint: Url,
    request_timeout: Option<Duration>,
}

impl HttpEndpoint {
    /// Create a new HTTP endpoint from submitter configuration
    pub fn from_config(config: &SubmitterConfig) -> Result<Self> {
        let endpoint = config.endpoint_url()?;

        // Idle pool sized to the concurrency limit, matching the number of
        // requests that can be in flight at once.
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .pool_max_idle_per_host(config.max_concurrent)
            .pool_idle_timeout(config.keepalive_expiry);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| SubmitError::Configuration {
            message: format!("Failed to create HTTP client: {}", e),
            field: None,
            suggestion: None,
        })?;

        Ok(Self {
            client,
            endpoint,
            request_timeout: config.request_timeout,
        })
    }

    /// The submission URL
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Root of the submission service, used for health checks
    pub fn service_root(&self) -> Url {
        let mut root = self.endpoint.clone();
        root.set_path("/");
        root.set_query(None);
        root
    }
}

#[async_trait]
impl SubmissionEndpoint for HttpEndpoint {
    async fn submit(&self, url: &str) -> Result<Acknowledgement> {
        debug!("Submitting {} to {}", url, self.endpoint);

        let response = self.client
            .post(self.endpoint.clone())
            .json(&SubmitRequest { url })
            .send()
            .await
            .map_err(|e| SubmitError::from_request(url, e, self.request_timeout))?;

        let status = response.status();
        if !status.is_success() {
            // Body is diagnostic only; a failed read just leaves it empty.
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes()
            .await
            .map_err(|e| SubmitError::from_request(url, e, self.request_timeout))?;

        let accepted = SubmitResponse::parse(&body);
        debug!(
            url,
            status = accepted.status.as_deref().unwrap_or("-"),
            image_id = accepted.image_id.as_deref().unwrap_or("-"),
            "Submission accepted"
        );

        Ok(Acknowledgement::from_response(&accepted))
    }

    async fn check_health(&self) -> Result<()> {
        let root = self.service_root();
        debug!("Checking submission service health at {}", root);

        let response = self.client
            .get(root.clone())
            .send()
            .await
            .map_err(|e| SubmitError::HealthCheck {
                url: root.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SubmitError::HealthCheck {
                url: root.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        Ok(())
    }

    fn describe(&self) -> String {
        self.endpoint.to_string()
    }
}
