//! Multi-step form session controller
//!
//! A [`FormSession`] owns the position within a fixed sequence of [`Step`]s
//! and the submission lifecycle of the form:
//!
//! ```text
//! Idle -> Submitting -> Submitted
//!              |
//!              +-> Failed -> Submitting (retry)
//!                    |
//!                    +-> Idle (reset)
//! ```
//!
//! Step validity is never inspected here; callers pass the `can_proceed`
//! flag computed by the step model. Every transition is broadcast to the
//! callbacks registered with [`FormSession::subscribe`].

use super::error::FormError;
use super::field::FormField;
use super::step::{Form, Step};
use crate::intake::{Answer, FormSubmission, SubmissionAck, SubmissionClient};
use chrono::Utc;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Submission lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Submitted,
    Failed,
}

impl SubmissionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "En curso",
            Self::Submitting => "Enviando",
            Self::Submitted => "Enviado",
            Self::Failed => "Error de envío",
        }
    }
}

/// Notification emitted on every session transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    StepChanged { from: usize, to: usize },
    SubmissionStarted { submission_id: Uuid },
    Submitted(SubmissionAck),
    SubmissionFailed(String),
    Reset,
}

type Listener = Box<dyn Fn(&SessionEvent) + Send>;

/// Percentage of the form reached when standing on `current_step_index`.
///
/// Returns 0 for an empty form instead of dividing by zero.
pub fn compute_progress(current_step_index: usize, total_steps: usize) -> f64 {
    if total_steps == 0 {
        return 0.0;
    }
    (current_step_index as f64 + 1.0) / total_steps as f64 * 100.0
}

/// Progress rendered with two decimals, e.g. `66.67`
pub fn format_progress(progress: f64) -> String {
    format!("{progress:.2}")
}

/// State of one user filling out one form
pub struct FormSession {
    pub template_id: String,
    pub patient_id: String,
    steps: Vec<Step>,
    current_step_index: usize,
    status: SubmissionStatus,
    last_error: Option<String>,
    listeners: Vec<Listener>,
}

impl fmt::Debug for FormSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSession")
            .field("template_id", &self.template_id)
            .field("patient_id", &self.patient_id)
            .field("steps", &self.steps)
            .field("current_step_index", &self.current_step_index)
            .field("status", &self.status)
            .field("last_error", &self.last_error)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl FormSession {
    /// Open a session positioned on the first step
    pub fn new(
        template_id: impl Into<String>,
        patient_id: impl Into<String>,
        mut steps: Vec<Step>,
    ) -> Result<Self, FormError> {
        if steps.is_empty() {
            return Err(FormError::NoSteps);
        }
        for (ordinal, step) in steps.iter_mut().enumerate() {
            step.ordinal = ordinal;
        }
        Ok(Self {
            template_id: template_id.into(),
            patient_id: patient_id.into(),
            steps,
            current_step_index: 0,
            status: SubmissionStatus::Idle,
            last_error: None,
            listeners: Vec::new(),
        })
    }

    /// Register a callback invoked on every transition
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&SessionEvent) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&self, event: SessionEvent) {
        tracing::debug!(template = %self.template_id, ?event, "form session transition");
        for listener in &self.listeners {
            listener(&event);
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn current_step(&self) -> &Step {
        &self.steps[self.current_step_index]
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Message of the most recent failed submission
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Validity of the current step, as reported by the step model
    pub fn current_step_can_proceed(&self) -> bool {
        self.current_step().can_proceed()
    }

    /// Answers may only change while no submission has been attempted
    pub fn is_editable(&self) -> bool {
        self.status == SubmissionStatus::Idle
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step_index == self.steps.len() - 1
    }

    pub fn progress(&self) -> f64 {
        compute_progress(self.current_step_index, self.steps.len())
    }

    /// `Paso 2 de 3: History`
    pub fn step_label(&self) -> String {
        format!(
            "Paso {} de {}: {}",
            self.current_step_index + 1,
            self.steps.len(),
            self.current_step().title
        )
    }

    pub fn can_go_previous(&self) -> bool {
        self.is_editable() && self.current_step_index > 0
    }

    pub fn can_go_next(&self, can_proceed: bool) -> bool {
        self.is_editable() && can_proceed && !self.is_last_step()
    }

    pub fn can_submit(&self, can_proceed: bool) -> bool {
        self.is_last_step()
            && can_proceed
            && matches!(
                self.status,
                SubmissionStatus::Idle | SubmissionStatus::Failed
            )
    }

    /// Label of the submit action for the current status
    pub fn submit_label(&self) -> &'static str {
        match self.status {
            SubmissionStatus::Idle => "Enviar",
            SubmissionStatus::Submitting => "Enviando...",
            SubmissionStatus::Submitted => "Enviado",
            SubmissionStatus::Failed => "Reintentar",
        }
    }

    /// Move back one step. Returns false when disabled.
    pub fn go_to_previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        let from = self.current_step_index;
        self.current_step_index -= 1;
        self.emit(SessionEvent::StepChanged {
            from,
            to: self.current_step_index,
        });
        true
    }

    /// Move forward one step. Returns false when disabled.
    pub fn go_to_next(&mut self, can_proceed: bool) -> bool {
        if !self.can_go_next(can_proceed) {
            return false;
        }
        let from = self.current_step_index;
        self.current_step_index += 1;
        self.emit(SessionEvent::StepChanged {
            from,
            to: self.current_step_index,
        });
        true
    }

    /// Return a failed session to `Idle` so its answers can be corrected.
    pub fn reset(&mut self) -> bool {
        if self.status != SubmissionStatus::Failed {
            return false;
        }
        self.status = SubmissionStatus::Idle;
        self.last_error = None;
        self.emit(SessionEvent::Reset);
        true
    }

    /// Enter `Submitting` and build the payload for the collaborator.
    ///
    /// Rejected calls leave the session untouched.
    pub fn begin_submit(&mut self, can_proceed: bool) -> Result<FormSubmission, FormError> {
        match self.status {
            SubmissionStatus::Submitting => return Err(FormError::AlreadySubmitting),
            SubmissionStatus::Submitted => return Err(FormError::AlreadySubmitted),
            SubmissionStatus::Idle | SubmissionStatus::Failed => {}
        }
        if !self.is_last_step() {
            return Err(FormError::NotOnLastStep);
        }
        if !can_proceed {
            return Err(FormError::ValidationBlocked);
        }

        let submission = self.build_submission();
        self.status = SubmissionStatus::Submitting;
        self.last_error = None;
        self.emit(SessionEvent::SubmissionStarted {
            submission_id: submission.submission_id,
        });
        Ok(submission)
    }

    /// Apply the collaborator's outcome to an in-flight submission.
    pub fn finish_submit(
        &mut self,
        result: anyhow::Result<SubmissionAck>,
    ) -> Result<SubmissionAck, FormError> {
        if self.status != SubmissionStatus::Submitting {
            return Err(FormError::NoSubmissionInFlight);
        }
        match result {
            Ok(ack) => {
                self.status = SubmissionStatus::Submitted;
                self.emit(SessionEvent::Submitted(ack.clone()));
                Ok(ack)
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(template = %self.template_id, error = %message, "form submission failed");
                self.status = SubmissionStatus::Failed;
                self.last_error = Some(message.clone());
                self.emit(SessionEvent::SubmissionFailed(message.clone()));
                Err(FormError::SubmissionFailed(message))
            }
        }
    }

    /// Submit the form through `client`, mapping a stalled call to `Failed`
    /// once `timeout` elapses.
    pub async fn submit<C>(
        &mut self,
        can_proceed: bool,
        client: &C,
        timeout: Duration,
    ) -> Result<SubmissionAck, FormError>
    where
        C: SubmissionClient + ?Sized,
    {
        let submission = self.begin_submit(can_proceed)?;
        let result = submit_with_timeout(client, &submission, timeout).await;
        self.finish_submit(result)
    }

    fn build_submission(&self) -> FormSubmission {
        let answers = self
            .steps
            .iter()
            .flat_map(|step| {
                step.fields.iter().map(move |field| Answer {
                    step: step.title.clone(),
                    field: field.name.clone(),
                    value: field.value.clone(),
                })
            })
            .collect();

        FormSubmission {
            submission_id: Uuid::new_v4(),
            template_id: self.template_id.clone(),
            patient_id: self.patient_id.clone(),
            submitted_at: Utc::now(),
            answers,
        }
    }

    // Field editing, only while the session is editable

    pub fn active_field_mut(&mut self) -> Option<&mut FormField> {
        if !self.is_editable() {
            return None;
        }
        self.steps[self.current_step_index].get_active_field_mut()
    }

    pub fn next_field(&mut self) {
        self.steps[self.current_step_index].next_field();
    }

    pub fn prev_field(&mut self) {
        self.steps[self.current_step_index].prev_field();
    }
}

/// Run one collaborator call bounded by `timeout`
pub async fn submit_with_timeout<C>(
    client: &C,
    submission: &FormSubmission,
    timeout: Duration,
) -> anyhow::Result<SubmissionAck>
where
    C: SubmissionClient + ?Sized,
{
    match tokio::time::timeout(timeout, client.submit_form(submission)).await {
        Ok(result) => result,
        Err(_) => Err(anyhow::anyhow!(
            "submission timed out after {} ms",
            timeout.as_millis()
        )),
    }
}
