//! Application state definitions

use super::catalog::{self, FormTemplate, Patient};
use super::forms::FormSession;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Patients,
    Forms,
    FormFill,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Selection
    pub selected_index: usize,
    pub selected_patient_id: Option<String>,
    pub selected_template_id: Option<String>,

    // Form being filled out
    pub session: Option<FormSession>,

    // UI state
    pub scroll_offset: usize,
    pub error_queue: VecDeque<String>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    pub fn selected_patient(&self) -> Option<&'static Patient> {
        self.selected_patient_id
            .as_deref()
            .and_then(catalog::find_patient)
    }

    pub fn selected_template(&self) -> Option<&'static FormTemplate> {
        self.selected_template_id
            .as_deref()
            .and_then(catalog::find_template)
    }

    /// Queue an error for the error dialog
    pub fn push_error(&mut self, message: String) {
        tracing::warn!(%message, "error shown to user");
        self.error_queue.push_back(message);
    }

    /// Error currently displayed, if any
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Patients);
        assert!(state.session.is_none());
        assert!(state.current_error().is_none());
    }

    #[test]
    fn test_move_selection_bounds() {
        let mut state = AppState::default();
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);
        state.move_selection_down(2);
        state.move_selection_down(2);
        assert_eq!(state.selected_index, 1);
        state.move_selection_down(0);
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn test_reset_selection() {
        let mut state = AppState {
            selected_index: 4,
            scroll_offset: 2,
            ..Default::default()
        };
        state.reset_selection();
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::default();
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(state.current_error().is_none());
    }

    #[test]
    fn test_selected_lookups() {
        let state = AppState {
            selected_patient_id: Some("P-001".to_string()),
            selected_template_id: Some("phq-2".to_string()),
            ..Default::default()
        };
        assert_eq!(state.selected_patient().map(|p| p.name), Some("María González"));
        assert_eq!(state.selected_template().map(|t| t.steps.len()), Some(2));
    }
}
