//! Form domain layer
//!
//! Field value objects, the steps that group them, and the session
//! controller that walks a patient through those steps and submits
//! the result.

mod error;
mod field;
mod session;
mod step;

pub use error::FormError;
pub use field::{FieldValue, FormField};
pub use session::{
    compute_progress, format_progress, submit_with_timeout, FormSession, SessionEvent,
    SubmissionStatus,
};
pub use step::{Form, Step};
