//! Maintenance service: redundant question cleanup over HTTP

mod cleanup;
mod http;
mod store;

pub use cleanup::{
    remove_redundant_questions, CleanupError, CleanupReport, CLEANUP_CATEGORY, CONTACT_PATTERNS,
    LOCALIZED_CONTACT_PATTERNS,
};
pub use http::{build_router, FAILURE_MESSAGE, REMOVE_REDUNDANT_QUESTIONS_ROUTE};
pub use store::{QuestionStore, SqliteQuestionStore};

#[cfg(test)]
pub use store::MockQuestionStore;
