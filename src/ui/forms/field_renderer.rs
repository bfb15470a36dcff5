//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by a field box, plus one for its inline error
pub fn field_height(field: &FormField, has_error: bool) -> u16 {
    let body = if field.is_multiline { 5 } else { 3 };
    body + u16::from(has_error)
}

/// Draw a form field with its inline error underneath
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    error: Option<&str>,
) {
    let box_height = area.height.saturating_sub(u16::from(error.is_some()));
    let box_area = Rect {
        height: box_height,
        ..area
    };

    let border_style = match (is_active, error.is_some()) {
        (true, _) => Style::default().fg(Color::Cyan),
        (false, true) => Style::default().fg(Color::Red),
        (false, false) => Style::default().fg(Color::DarkGray),
    };
    let value_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let display_value = field.display_value();
    let cursor = if is_active && !field.is_choice() {
        "▌"
    } else {
        ""
    };

    let content = if display_value.is_empty() {
        let placeholder = match (&field.placeholder, is_active) {
            (Some(example), _) => example.clone(),
            (None, false) => "(empty)".to_string(),
            (None, true) => String::new(),
        };
        Paragraph::new(Line::from(vec![
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
            Span::styled(placeholder, Style::default().fg(Color::DarkGray)),
        ]))
    } else if field.is_multiline {
        let mut lines: Vec<Line> = display_value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), value_style)))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value, value_style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let marker = if field.required { "*" } else { "" };
    let block = Block::default()
        .title(format!(" {}{} ", field.label, marker))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), box_area);

    if let Some(message) = error {
        let error_area = Rect {
            y: area.y + box_height,
            height: 1,
            ..area
        };
        frame.render_widget(error_line(message), error_area);
    }
}

/// Inline validation message
pub fn error_line(message: &str) -> Paragraph<'_> {
    Paragraph::new(Line::from(vec![
        Span::styled(" ✗ ", Style::default().fg(Color::Red)),
        Span::styled(
            message,
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        ),
    ]))
}
