//! Form controller errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("a form needs at least one step")]
    NoSteps,
    #[error("the current step is incomplete")]
    ValidationBlocked,
    #[error("the form can only be submitted from its last step")]
    NotOnLastStep,
    #[error("a submission is already in progress")]
    AlreadySubmitting,
    #[error("the form has already been submitted")]
    AlreadySubmitted,
    #[error("no submission is in progress")]
    NoSubmissionInFlight,
    #[error("submission failed: {0}")]
    SubmissionFailed(String),
}
