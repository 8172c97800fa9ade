//! Submission service client module

mod client;
mod traits;
mod types;

pub use client::HttpSubmissionClient;
pub use traits::SubmissionClient;
pub use types::{Answer, FormSubmission, SubmissionAck};

#[cfg(test)]
pub use traits::MockSubmissionClient;
