//! Form catalog view for the selected patient

use super::widgets::render_scrollable_list;
use crate::app::App;
use crate::state::catalog::templates_with_categories;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Draw every form template, grouped by category
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let patient_name = app
        .state
        .selected_patient()
        .map(|p| p.name)
        .unwrap_or("Paciente");

    let items: Vec<ListItem> = templates_with_categories()
        .into_iter()
        .enumerate()
        .map(|(idx, (category, template))| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let title_style = if is_selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(prefix),
                    Span::styled(format!("[{category}] "), Style::default().fg(Color::Magenta)),
                    Span::styled(template.title, title_style),
                    Span::styled(
                        format!("  ({} pasos)", template.steps.len()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("    {}", template.description),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Formularios - {patient_name} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    render_scrollable_list(frame, area, list, app.state.selected_index);
}
