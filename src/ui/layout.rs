//! Layout components (breadcrumb header, status bar)

use crate::app::App;
use crate::state::{catalog, AppState, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const MAX_LABEL_LEN: usize = 40;
const QUIT_HINT: &str = " ^C:salir ";

/// Split the screen into header, main content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Breadcrumbs
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Truncate a label to `max_len` characters
pub fn truncate_label(label: &str, max_len: usize) -> String {
    if label.chars().count() > max_len {
        let kept: String = label.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        label.to_string()
    }
}

/// Breadcrumb trail for the current view
pub fn build_breadcrumbs(state: &AppState) -> Vec<String> {
    let mut breadcrumbs = vec!["Pacientes".to_string()];

    if matches!(state.current_view, View::Patients) {
        return breadcrumbs;
    }

    if let Some(patient) = state.selected_patient() {
        breadcrumbs.push(patient.name.to_string());
    }

    if matches!(state.current_view, View::FormFill) {
        if let Some(template) = state.selected_template() {
            breadcrumbs.push(catalog::category_title(template.category).to_string());
            breadcrumbs.push(template.title.to_string());
        }
    }

    breadcrumbs
}

/// Draw the breadcrumb bar, centered
pub fn draw_context_bar(frame: &mut Frame, area: Rect, app: &App) {
    let breadcrumbs = build_breadcrumbs(&app.state);
    let labels: Vec<String> = breadcrumbs
        .iter()
        .map(|label| truncate_label(label, MAX_LABEL_LEN))
        .collect();

    let total_width: usize = labels.iter().map(|l| l.chars().count()).sum::<usize>()
        + 3 * labels.len().saturating_sub(1);
    let inner_width = area.width.saturating_sub(2) as usize;
    let left_padding = inner_width.saturating_sub(total_width) / 2;

    let mut spans = Vec::new();
    if left_padding > 0 {
        spans.push(Span::raw(" ".repeat(left_padding)));
    }

    let last = labels.len().saturating_sub(1);
    for (i, label) in labels.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" / ", Style::default().fg(Color::DarkGray)));
        }
        let style = if i == last {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(label, style));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];

    if let Some(name) = app.config.clinician_name.as_deref() {
        spans.push(Span::styled(
            format!("{name} | "),
            Style::default().fg(Color::Blue),
        ));
    }

    spans.push(Span::styled(
        view_hints(&app.state.current_view),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let hint_width = QUIT_HINT.len() as u16;
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(hint_width),
        y: area.y,
        width: hint_width.min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(QUIT_HINT).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current view
fn view_hints(view: &View) -> &'static str {
    match view {
        View::Patients => "j/k:nav  Enter:seleccionar  q:salir",
        View::Forms => "j/k:nav  Enter:abrir  Esc:volver",
        View::FormFill => "Tab:campo  PgUp/PgDn:paso  ^S:enviar  Esc:volver",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truncate_label_is_char_safe() {
        assert_eq!(truncate_label("Evaluación", 40), "Evaluación");
        assert_eq!(truncate_label("Información personal", 10), "Informa...");
    }

    #[test]
    fn test_breadcrumbs_patients_view() {
        let state = AppState::default();
        assert_eq!(build_breadcrumbs(&state), vec!["Pacientes"]);
    }

    #[test]
    fn test_breadcrumbs_form_fill() {
        let state = AppState {
            current_view: View::FormFill,
            selected_patient_id: Some("P-002".to_string()),
            selected_template_id: Some("pain-scale".to_string()),
            ..Default::default()
        };
        let template = catalog::find_template("pain-scale").unwrap();
        assert_eq!(
            build_breadcrumbs(&state),
            vec![
                "Pacientes".to_string(),
                "Carlos Ruiz".to_string(),
                "Evaluación del dolor".to_string(),
                template.title.to_string(),
            ]
        );
    }

    #[test]
    fn test_breadcrumbs_forms_view_skips_template() {
        let state = AppState {
            current_view: View::Forms,
            selected_patient_id: Some("P-001".to_string()),
            selected_template_id: Some("phq-2".to_string()),
            ..Default::default()
        };
        assert_eq!(build_breadcrumbs(&state), vec!["Pacientes", "María González"]);
    }
}
