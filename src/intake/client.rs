//! HTTP client for the intake submission service
//!
//! Completed forms are POSTed as JSON; the service answers with a
//! [`SubmissionAck`] carrying the stored submission id.

use super::traits::SubmissionClient;
use super::types::{FormSubmission, SubmissionAck};
use anyhow::{anyhow, Result};
use async_trait::async_trait;

/// Path of the submission endpoint, relative to the service base URL
const SUBMISSIONS_PATH: &str = "/forms/submissions";

/// Client for the intake submission service
#[derive(Debug, Clone)]
pub struct HttpSubmissionClient {
    http: reqwest::Client,
    /// The service base URL
    base_url: String,
}

impl HttpSubmissionClient {
    /// Create a new client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn submissions_url(&self) -> String {
        format!("{}{}", self.base_url, SUBMISSIONS_PATH)
    }
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn submit_form(&self, submission: &FormSubmission) -> Result<SubmissionAck> {
        let url = self.submissions_url();
        tracing::debug!(%url, submission_id = %submission.submission_id, "submitting form");

        let response = self
            .http
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to reach submission service: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Submission service returned {}: {}",
                status,
                body.trim()
            ));
        }

        response
            .json::<SubmissionAck>()
            .await
            .map_err(|e| anyhow!("Invalid response from submission service: {}", e))
    }
}
