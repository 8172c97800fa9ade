//! Step-by-step form view: progress, the fields of the current step and the
//! navigation/submission actions

use super::field_renderer::{draw_field, field_height};
use crate::app::App;
use crate::platform::{NEXT_STEP_SHORTCUT, PREV_STEP_SHORTCUT, RESET_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{format_progress, FormSession, SubmissionStatus};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Draw the form being filled out, with its action panel on the right
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.state.session.as_ref() else {
        let empty = Paragraph::new("No hay ningún formulario abierto.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(22)])
        .split(area);

    let title = app
        .state
        .selected_template()
        .map(|t| t.title)
        .unwrap_or("Formulario");

    draw_step(frame, chunks[0], session, title);
    draw_action_panel(frame, chunks[1], session);
}

fn draw_step(frame: &mut Frame, area: Rect, session: &FormSession, title: &str) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Progress
            Constraint::Length(2), // Step label
            Constraint::Min(0),    // Fields
            Constraint::Length(1), // Help text
        ])
        .split(inner);

    let progress = session.progress();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .ratio((progress / 100.0).clamp(0.0, 1.0))
        .label(format!("{}%", format_progress(progress)));
    frame.render_widget(gauge, chunks[0]);

    let label = Paragraph::new(Line::from(Span::styled(
        session.step_label(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(label, chunks[1]);

    draw_fields(frame, chunks[2], session);

    let key = Style::default().fg(Color::Cyan);
    let help = Paragraph::new(Line::from(vec![
        Span::styled("Tab", key),
        Span::raw(": campo  "),
        Span::styled(PREV_STEP_SHORTCUT, key),
        Span::raw("/"),
        Span::styled(NEXT_STEP_SHORTCUT, key),
        Span::raw(": paso  "),
        Span::styled(SUBMIT_SHORTCUT, key),
        Span::raw(": enviar  "),
        Span::styled("Esc", key),
        Span::raw(": salir"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}

fn draw_fields(frame: &mut Frame, area: Rect, session: &FormSession) {
    let step = session.current_step();
    if step.fields.is_empty() {
        return;
    }

    let mut constraints: Vec<Constraint> = step
        .fields
        .iter()
        .map(|f| Constraint::Length(field_height(f)))
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let editable = session.is_editable();
    for (index, field) in step.fields.iter().enumerate() {
        let is_active = editable && index == step.active_field_index;
        draw_field(frame, chunks[index], field, is_active);
    }
}

fn draw_action_panel(frame: &mut Frame, area: Rect, session: &FormSession) {
    let block = Block::default()
        .title(" Acciones ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Previous
            Constraint::Length(BUTTON_HEIGHT), // Next or submit
            Constraint::Length(1),
            Constraint::Min(0), // Status
        ])
        .split(inner);

    let can_proceed = session.current_step_can_proceed();

    render_action_button(
        frame,
        chunks[0],
        "Anterior",
        false,
        session.can_go_previous(),
        Some(Color::Gray),
    );

    if session.is_last_step() {
        render_action_button(
            frame,
            chunks[1],
            session.submit_label(),
            true,
            session.can_submit(can_proceed),
            Some(Color::Green),
        );
    } else {
        render_action_button(
            frame,
            chunks[1],
            "Siguiente",
            true,
            session.can_go_next(can_proceed),
            Some(Color::Blue),
        );
    }

    frame.render_widget(status_paragraph(session, can_proceed), chunks[3]);
}

fn status_paragraph(session: &FormSession, can_proceed: bool) -> Paragraph<'static> {
    let mut lines = vec![Line::from(Span::styled(
        session.status().label(),
        status_style(session.status()),
    ))];

    match session.status() {
        SubmissionStatus::Idle if !can_proceed => {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Faltan campos (*)",
                Style::default().fg(Color::Yellow),
            )));
        }
        SubmissionStatus::Failed => {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(SUBMIT_SHORTCUT, Style::default().fg(Color::Cyan)),
                Span::raw(": reintentar"),
            ]));
            lines.push(Line::from(vec![
                Span::styled(RESET_SHORTCUT, Style::default().fg(Color::Cyan)),
                Span::raw(": corregir"),
            ]));
        }
        _ => {}
    }

    Paragraph::new(lines)
}

fn status_style(status: SubmissionStatus) -> Style {
    match status {
        SubmissionStatus::Idle => Style::default().fg(Color::Gray),
        SubmissionStatus::Submitting => Style::default().fg(Color::Yellow),
        SubmissionStatus::Submitted => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        SubmissionStatus::Failed => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}
