//! Patient roster view

use super::widgets::render_scrollable_list;
use crate::app::App;
use crate::state::catalog::{Patient, PATIENTS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the patient list with the highlighted patient's record beside it
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(36)])
        .split(area);

    let items: Vec<ListItem> = PATIENTS
        .iter()
        .enumerate()
        .map(|(idx, patient)| {
            let prefix = if idx == app.state.selected_index {
                "▸ "
            } else {
                "  "
            };
            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(patient.id, Style::default().fg(Color::Cyan)),
                Span::raw("  "),
                Span::raw(patient.name),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Pacientes ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    render_scrollable_list(frame, chunks[0], list, app.state.selected_index);

    if let Some(patient) = PATIENTS.get(app.state.selected_index) {
        draw_patient_card(frame, chunks[1], patient);
    }
}

fn draw_patient_card(frame: &mut Frame, area: Rect, patient: &Patient) {
    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(Span::styled(
            patient.name,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![Span::styled("Nacimiento: ", label), Span::raw(patient.birth_date)]),
        Line::from(vec![Span::styled("Correo: ", label), Span::raw(patient.email)]),
        Line::from(vec![Span::styled("Teléfono: ", label), Span::raw(patient.phone)]),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" {} ", patient.id))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(card, area);
}
