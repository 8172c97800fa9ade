//! Application state and core logic

use crate::config::IntakeConfig;
use crate::intake::{SubmissionAck, SubmissionClient};
use crate::platform::is_form_modifier;
use crate::state::catalog::{self, PATIENTS};
use crate::state::{submit_with_timeout, AppState, SessionEvent, SubmissionStatus, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

/// Result of a background submission, tagged with the id it was started for
type SubmissionOutcome = (Uuid, anyhow::Result<SubmissionAck>);

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    pub config: IntakeConfig,
    /// Submission service client
    client: Arc<dyn SubmissionClient>,
    /// Whether the app should quit
    quit: bool,
    /// Feedback shown in the status bar
    pub status_message: Option<String>,
    /// Submission whose outcome is still awaited
    in_flight: Option<Uuid>,
    submit_tx: UnboundedSender<SubmissionOutcome>,
    submit_rx: UnboundedReceiver<SubmissionOutcome>,
    event_tx: UnboundedSender<SessionEvent>,
    event_rx: UnboundedReceiver<SessionEvent>,
}

impl App {
    /// Create a new App instance
    pub fn new(config: IntakeConfig, client: Arc<dyn SubmissionClient>) -> Self {
        let (submit_tx, submit_rx) = unbounded_channel();
        let (event_tx, event_rx) = unbounded_channel();

        Self {
            state: AppState::default(),
            config,
            client,
            quit: false,
            status_message: None,
            in_flight: None,
            submit_tx,
            submit_rx,
            event_tx,
            event_rx,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether a submission is running in the background
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Error dialog is modal
        if self.state.current_error().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        self.status_message = None;

        match self.state.current_view {
            View::Patients => self.handle_patients_key(key),
            View::Forms => self.handle_forms_key(key),
            View::FormFill => self.handle_form_fill_key(key),
        }
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        self.state
            .view_history
            .push(self.state.current_view.clone());
        self.state.current_view = view;
        self.state.reset_selection();
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        let Some(view) = self.state.view_history.pop() else {
            return;
        };
        match view {
            View::Patients => {
                self.state.selected_patient_id = None;
                self.state.selected_template_id = None;
                self.state.session = None;
                self.in_flight = None;
            }
            View::Forms => {
                self.state.session = None;
                self.in_flight = None;
            }
            View::FormFill => {}
        }
        self.state.current_view = view;
        self.state.reset_selection();
    }

    fn handle_patients_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(PATIENTS.len()),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Enter => {
                if let Some(patient) = PATIENTS.get(self.state.selected_index) {
                    tracing::debug!(patient = patient.id, "patient selected");
                    self.state.selected_patient_id = Some(patient.id.to_string());
                    self.navigate(View::Forms);
                }
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn handle_forms_key(&mut self, key: KeyEvent) {
        let templates = catalog::templates_with_categories();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(templates.len()),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Enter => {
                if let Some((_, template)) = templates.get(self.state.selected_index) {
                    self.open_form(template.id);
                }
            }
            KeyCode::Esc => self.go_back(),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Start a fresh session of `template_id` for the selected patient
    pub fn open_form(&mut self, template_id: &str) {
        let Some(patient_id) = self.state.selected_patient_id.clone() else {
            self.state.push_error("Seleccione un paciente primero".to_string());
            return;
        };
        let Some(template) = catalog::find_template(template_id) else {
            self.state
                .push_error(format!("Formulario desconocido: {template_id}"));
            return;
        };

        match template.open_session(&patient_id) {
            Ok(mut session) => {
                let tx = self.event_tx.clone();
                session.subscribe(move |event| {
                    let _ = tx.send(event.clone());
                });
                tracing::info!(template = template.id, patient = %patient_id, "form opened");
                self.state.session = Some(session);
                self.state.selected_template_id = Some(template.id.to_string());
                self.in_flight = None;
                self.navigate(View::FormFill);
            }
            Err(e) => self.state.push_error(e.to_string()),
        }
    }

    fn handle_form_fill_key(&mut self, key: KeyEvent) {
        let Some(status) = self.state.session.as_ref().map(|s| s.status()) else {
            self.go_back();
            return;
        };

        if status == SubmissionStatus::Submitted {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.go_back();
            }
            return;
        }

        let command = is_form_modifier(key.modifiers);
        match key.code {
            KeyCode::Esc => {
                if status == SubmissionStatus::Submitting {
                    self.status_message = Some("Envío en curso".to_string());
                } else {
                    self.go_back();
                }
            }
            KeyCode::Char('s') if command => self.start_submission(),
            KeyCode::Char('r') if command => self.reset_session(),
            KeyCode::PageDown => self.next_step(),
            KeyCode::PageUp => self.previous_step(),
            KeyCode::Right if key.modifiers.contains(KeyModifiers::CONTROL) => self.next_step(),
            KeyCode::Left if key.modifiers.contains(KeyModifiers::CONTROL) => self.previous_step(),
            _ if command => {}
            _ => self.handle_field_key(key),
        }
    }

    /// Field navigation and editing; ignored unless the session is editable
    fn handle_field_key(&mut self, key: KeyEvent) {
        let Some(session) = self.state.session.as_mut() else {
            return;
        };
        if !session.is_editable() {
            return;
        }

        match key.code {
            KeyCode::Tab => session.next_field(),
            KeyCode::BackTab => session.prev_field(),
            KeyCode::Enter => {
                let multiline = session
                    .current_step()
                    .get_active_field()
                    .is_some_and(|f| f.is_multiline);
                if multiline {
                    if let Some(field) = session.active_field_mut() {
                        field.push_char('\n');
                    }
                } else if session.is_last_step() {
                    self.start_submission();
                } else {
                    self.next_step();
                }
            }
            KeyCode::Right => {
                if let Some(field) = session.active_field_mut() {
                    field.increment_score();
                }
            }
            KeyCode::Left => {
                if let Some(field) = session.active_field_mut() {
                    field.decrement_score();
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = session.active_field_mut() {
                    field.pop_char();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = session.active_field_mut() {
                    field.push_char(c);
                }
            }
            _ => {}
        }
    }

    fn next_step(&mut self) {
        let Some(session) = self.state.session.as_mut() else {
            return;
        };
        let can_proceed = session.current_step_can_proceed();
        if !session.go_to_next(can_proceed) && session.is_editable() && !can_proceed {
            let missing = session.current_step().missing_fields().join(", ");
            self.status_message = Some(format!("Campos obligatorios: {missing}"));
        }
    }

    fn previous_step(&mut self) {
        if let Some(session) = self.state.session.as_mut() {
            session.go_to_previous();
        }
    }

    fn reset_session(&mut self) {
        if let Some(session) = self.state.session.as_mut() {
            session.reset();
        }
    }

    /// Move the open session to `Submitting` and hand the payload to a
    /// background task; the outcome arrives through [`App::poll_submissions`].
    pub fn start_submission(&mut self) {
        let Some(session) = self.state.session.as_mut() else {
            return;
        };
        let can_proceed = session.current_step_can_proceed();

        match session.begin_submit(can_proceed) {
            Ok(submission) => {
                let id = submission.submission_id;
                tracing::info!(submission = %id, template = %submission.template_id, "submitting form");
                self.in_flight = Some(id);

                let client = Arc::clone(&self.client);
                let tx = self.submit_tx.clone();
                let timeout = self.config.submit_timeout();
                tokio::spawn(async move {
                    let result = submit_with_timeout(client.as_ref(), &submission, timeout).await;
                    let _ = tx.send((id, result));
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "submit rejected");
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Apply finished background submissions to the open session.
    ///
    /// Outcomes for a submission that is no longer awaited (the form was
    /// closed or reopened meanwhile) are dropped.
    pub fn poll_submissions(&mut self) {
        while let Ok((id, result)) = self.submit_rx.try_recv() {
            if self.in_flight != Some(id) {
                tracing::debug!(submission = %id, "discarding stale submission outcome");
                continue;
            }
            self.in_flight = None;

            let Some(session) = self.state.session.as_mut() else {
                continue;
            };
            if let Err(e) = session.finish_submit(result) {
                self.state.push_error(e.to_string());
            }
        }
    }

    /// Turn session notifications into status bar feedback
    pub fn poll_session_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                SessionEvent::StepChanged { to, .. } => {
                    let total = self
                        .state
                        .session
                        .as_ref()
                        .map_or(0, |s| s.total_steps());
                    self.status_message = Some(format!("Paso {} de {}", to + 1, total));
                }
                SessionEvent::SubmissionStarted { .. } => {
                    self.status_message = Some("Enviando formulario...".to_string());
                }
                SessionEvent::Submitted(ack) => {
                    tracing::info!(submission = %ack.submission_id, "form submitted");
                    self.status_message = Some(match ack.reference {
                        Some(reference) => format!("Formulario enviado (ref. {reference})"),
                        None => "Formulario enviado".to_string(),
                    });
                }
                SessionEvent::SubmissionFailed(_) => {
                    self.status_message = Some("El envío ha fallado".to_string());
                }
                SessionEvent::Reset => {
                    self.status_message = Some("Formulario listo para corregir".to_string());
                }
            }
        }
    }
}
