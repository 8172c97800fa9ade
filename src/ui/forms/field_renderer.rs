//! Field rendering utilities for forms

use crate::state::{FieldValue, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a field needs on screen
pub fn field_height(field: &FormField) -> u16 {
    if field.is_multiline {
        5
    } else {
        3
    }
}

fn field_block(field: &FormField, is_active: bool) -> Block<'static> {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else if !field.is_valid() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let marker = if field.required { " *" } else { "" };

    Block::default()
        .title(format!(" {}{} ", field.label, marker))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Draw a form field, dispatching on its value type
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    match field.value {
        FieldValue::Text(_) => draw_text_field(frame, area, field, is_active),
        FieldValue::Score { value, max } => {
            draw_score_field(frame, area, field, value, max, is_active)
        }
    }
}

fn draw_text_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let display_value = field.display_value();
    let display_str = if display_value.is_empty() && !is_active {
        "(vacío)".to_string()
    } else {
        display_value
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = if field.is_multiline {
        let mut lines: Vec<Line> = display_str
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect();
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            } else {
                lines.push(Line::from(Span::styled(
                    cursor,
                    Style::default().fg(Color::Cyan),
                )));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_str, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    frame.render_widget(
        content
            .wrap(Wrap { trim: false })
            .block(field_block(field, is_active)),
        area,
    );
}

/// Score input: every value of the scale, the chosen one highlighted
fn draw_score_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    value: Option<u8>,
    max: u8,
    is_active: bool,
) {
    frame.render_widget(
        Paragraph::new(score_scale_line(value, max, is_active)).block(field_block(field, is_active)),
        area,
    );
}

pub fn score_scale_line(value: Option<u8>, max: u8, is_active: bool) -> Line<'static> {
    let mut spans = Vec::with_capacity(max as usize + 2);
    for n in 0..=max {
        let style = if value == Some(n) {
            let bg = if is_active { Color::Cyan } else { Color::Gray };
            Style::default()
                .fg(Color::Black)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {n} "), style));
    }
    if is_active {
        spans.push(Span::styled(
            "  ←/→ o dígito",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}
