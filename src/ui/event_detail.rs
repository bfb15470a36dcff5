//! Detail view of one recorded event

use super::events::status_color;
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use serde_json::Value;

/// Flatten a stored payload into `path: value` lines
fn payload_lines(value: &Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                payload_lines(inner, &path, out);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (idx, inner) in items.iter().enumerate() {
                payload_lines(inner, &format!("{prefix}[{idx}]"), out);
            }
        }
        Value::Array(_) => out.push((prefix.to_string(), "(none)".to_string())),
        Value::Null => out.push((prefix.to_string(), "-".to_string())),
        Value::String(s) => out.push((prefix.to_string(), s.clone())),
        other => out.push((prefix.to_string(), other.to_string())),
    }
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Event ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(event) = &app.state.detail else {
        let hint = Paragraph::new("No event selected.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let description = app
        .registry
        .get(&event.tipo)
        .map(|d| d.description)
        .unwrap_or("unknown event type");
    let label = Style::default().fg(Color::DarkGray);

    let mut content = vec![
        Line::from(vec![
            Span::styled(
                event.tipo.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(description),
        ]),
        Line::from(vec![
            Span::styled("ID: ", label),
            Span::raw(event.id.clone()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", label),
            Span::styled(
                event.status.to_string(),
                Style::default().fg(status_color(&event.status)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Registered: ", label),
            Span::raw(event.date_label("%d/%m/%Y %H:%M")),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Payload",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
    ];

    match &event.payload {
        Some(payload) => {
            let mut entries = Vec::new();
            payload_lines(payload, "", &mut entries);
            content.extend(entries.into_iter().map(|(path, value)| {
                Line::from(vec![
                    Span::styled(format!("  {path}: "), label),
                    Span::raw(value),
                ])
            }));
        }
        None => content.push(Line::from(Span::styled(
            "  not returned by the event store",
            label,
        ))),
    }

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.state.scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}
