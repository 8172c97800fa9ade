//! UI module for rendering the TUI

mod components;
mod form_list;
pub mod forms;
pub mod layout;
mod patients;
mod widgets;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_context_bar(frame, header_area, app);

    match &app.state.current_view {
        View::Patients => patients::draw(frame, main_area, app),
        View::Forms => form_list::draw(frame, main_area, app),
        View::FormFill => forms::draw_form_fill(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Error dialog is modal and drawn last
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message);
    }
}
