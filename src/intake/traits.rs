//! Trait abstraction for the submission service to enable mocking in tests

use super::types::{FormSubmission, SubmissionAck};
use anyhow::Result;
use async_trait::async_trait;

/// Persists completed forms; treated as opaque I/O by the session controller
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// Submit a completed form
    async fn submit_form(&self, submission: &FormSubmission) -> Result<SubmissionAck>;
}
