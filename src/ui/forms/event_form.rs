//! Schema-driven event form view

use super::field_renderer::{draw_field, error_line, field_height};
use crate::app::{ActiveForm, App};
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{ErrorSource, EventForm, Form, FormRow, FormState};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::collections::HashSet;
use std::ops::Range;

/// Draw the active event form, or a hint when none is open
pub fn draw_event_form(frame: &mut Frame, area: Rect, app: &App) {
    let Some(active) = &app.form else {
        let hint = Paragraph::new("No form open. Pick an event type in the catalog (2).")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Event form "));
        frame.render_widget(hint, area);
        return;
    };

    match &active.view {
        Some(view) => draw_form(frame, area, active, view),
        None => draw_configuration_error(frame, area, active.controller.code()),
    }
}

fn draw_configuration_error(frame: &mut Frame, area: Rect, code: &str) {
    let content = vec![
        Line::from(Span::styled(
            format!("Unknown event type {code}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("There is no form definition for this code, so nothing can be submitted."),
        Line::from(""),
        Line::from(Span::styled(
            "Esc to go back",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let panel = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(format!(" {code} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(panel, area);
}

fn draw_form(frame: &mut Frame, area: Rect, active: &ActiveForm, view: &EventForm) {
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(h_chunks[0]);

    draw_header(frame, v_chunks[0], active, view);
    draw_rows(frame, v_chunks[1], active, view);
    draw_help(frame, h_chunks[1], active, view);
}

fn draw_header(frame: &mut Frame, area: Rect, active: &ActiveForm, view: &EventForm) {
    let (badge, color) = state_badge(active.controller.state());
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            view.code,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::raw(view.description),
        Span::raw("  "),
        Span::styled(badge, Style::default().fg(color)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(header, area);
}

fn state_badge(state: &FormState) -> (String, Color) {
    match state {
        FormState::Idle => ("editing".to_string(), Color::DarkGray),
        FormState::Validating => ("validating…".to_string(), Color::Yellow),
        FormState::Submitting { attempt } => {
            (format!("⟳ submitting (attempt {attempt})"), Color::Yellow)
        }
        FormState::Succeeded { event_id, status } => {
            (format!("✓ registered {event_id} [{status}]"), Color::Green)
        }
        FormState::ValidationFailed { errors, source } => {
            let origin = match source {
                ErrorSource::Local => "local",
                ErrorSource::Server => "server",
            };
            (
                format!("✗ {} invalid field(s) ({origin})", errors.len()),
                Color::Red,
            )
        }
        FormState::TransportFailed { reason } => (
            format!("not sent: {reason} ({SUBMIT_SHORTCUT} to retry)"),
            Color::Red,
        ),
        FormState::ConfigurationError { code } => {
            (format!("unknown event type {code}"), Color::Red)
        }
    }
}

fn row_error<'a>(active: &'a ActiveForm, row: &FormRow) -> Option<&'a str> {
    match row {
        FormRow::Field(_) | FormRow::Group { .. } | FormRow::List { .. } => {
            row.path().and_then(|path| active.controller.error_for(&path))
        }
        FormRow::Item { .. } | FormRow::Submit => None,
    }
}

fn row_height(row: &FormRow, has_error: bool) -> u16 {
    match row {
        FormRow::Field(field) => field_height(field, has_error),
        FormRow::Submit => BUTTON_HEIGHT,
        _ => 1 + u16::from(has_error),
    }
}

/// Rows that fit in `available` lines while keeping `active` on screen
fn visible_window(heights: &[u16], active: usize, available: u16) -> Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let active = active.min(heights.len() - 1);
    let available = u32::from(available);

    let mut start = 0;
    let mut used: u32 = heights[..=active].iter().map(|&h| u32::from(h)).sum();
    while used > available && start < active {
        used -= u32::from(heights[start]);
        start += 1;
    }

    let mut end = active + 1;
    while end < heights.len() && used + u32::from(heights[end]) <= available {
        used += u32::from(heights[end]);
        end += 1;
    }
    start..end
}

fn draw_rows(frame: &mut Frame, area: Rect, active: &ActiveForm, view: &EventForm) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = view.rows();
    let errors: Vec<Option<&str>> = rows.iter().map(|row| row_error(active, row)).collect();
    let heights: Vec<u16> = rows
        .iter()
        .zip(&errors)
        .map(|(row, error)| row_height(row, error.is_some()))
        .collect();

    let active_index = view.active_field();
    let submitting = active.controller.is_submitting();
    let mut y = inner.y;
    let bottom = inner.y + inner.height;

    for idx in visible_window(&heights, active_index, inner.height) {
        if y >= bottom {
            break;
        }
        let row = &rows[idx];
        let indent = (row.depth() as u16 * 2).min(inner.width.saturating_sub(4));
        let row_area = Rect {
            x: inner.x + indent,
            y,
            width: inner.width - indent,
            height: heights[idx].min(bottom - y),
        };
        let is_active = idx == active_index;
        let error = errors[idx];

        match row {
            FormRow::Field(field) => draw_field(frame, row_area, field, is_active, error),
            FormRow::Group { label, .. } => {
                draw_heading(frame, row_area, label, None, is_active, error)
            }
            FormRow::List {
                label,
                count,
                min_items,
                ..
            } => {
                let counter = if *min_items > 0 {
                    format!("{count} item(s), min {min_items}")
                } else {
                    format!("{count} item(s)")
                };
                draw_heading(frame, row_area, label, Some(counter), is_active, error)
            }
            FormRow::Item { index, .. } => {
                let label = format!("#{}", index + 1);
                let hint = is_active.then(|| "- to remove".to_string());
                draw_heading(frame, row_area, &label, hint, is_active, None)
            }
            FormRow::Submit => {
                let content = if submitting { "Submitting…" } else { "Submit" };
                render_button(frame, row_area, content, is_active, !submitting);
            }
        }
        y += row_area.height;
    }
}

fn draw_heading(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    detail: Option<String>,
    is_active: bool,
    error: Option<&str>,
) {
    let style = if is_active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let prefix = if is_active { "▸ " } else { "  " };

    let mut spans = vec![Span::styled(prefix, style), Span::styled(label, style)];
    if let Some(detail) = detail {
        spans.push(Span::styled(
            format!("  {detail}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect { height: 1, ..area },
    );

    if let Some(message) = error {
        if area.height > 1 {
            let error_area = Rect {
                y: area.y + 1,
                height: 1,
                ..area
            };
            frame.render_widget(error_line(message), error_area);
        }
    }
}

fn draw_help(frame: &mut Frame, area: Rect, active: &ActiveForm, view: &EventForm) {
    let mut content: Vec<Line> = Vec::new();

    match view.active_row() {
        Some(FormRow::Field(field)) => {
            content.push(Line::from(Span::styled(
                field.label.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
            if let Some(help) = field.help {
                content.push(Line::from(help));
            }
            if let Some(example) = &field.placeholder {
                content.push(Line::from(Span::styled(
                    format!("e.g. {example}"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            if field.is_choice() {
                content.push(Line::from(Span::styled(
                    "←/→ to choose, Backspace to clear",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        Some(FormRow::List { .. }) => content.push(Line::from(Span::styled(
            "Enter or + adds an item",
            Style::default().fg(Color::DarkGray),
        ))),
        Some(FormRow::Submit) => content.push(Line::from(Span::styled(
            format!("Enter or {SUBMIT_SHORTCUT} submits the event"),
            Style::default().fg(Color::DarkGray),
        ))),
        _ => {}
    }

    if let Some(notes) = view.notes {
        content.push(Line::from(""));
        content.extend(notes.lines().map(|l| {
            Line::from(Span::styled(
                l.to_string(),
                Style::default().fg(Color::DarkGray),
            ))
        }));
    }

    // Errors keyed on paths with no row of their own (e.g. cross-field rules)
    let shown: HashSet<String> = view
        .rows()
        .iter()
        .filter_map(|row| row.path())
        .map(|path| path.to_string())
        .collect();
    let orphans: Vec<(&str, &str)> = active
        .controller
        .field_errors()
        .iter()
        .filter(|(field, _)| !shown.contains(*field))
        .collect();
    if !orphans.is_empty() {
        content.push(Line::from(""));
        for (field, message) in orphans {
            let label = if field.is_empty() { "event" } else { field };
            content.push(Line::from(vec![
                Span::styled(format!("✗ {label}: "), Style::default().fg(Color::Red)),
                Span::raw(message.to_string()),
            ]));
        }
    }

    let help = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_window_from_top() {
        assert_eq!(visible_window(&[3, 3, 3, 3], 0, 7), 0..2);
        assert_eq!(visible_window(&[3, 3, 3, 3], 1, 12), 0..4);
    }

    #[test]
    fn test_visible_window_follows_active_row() {
        assert_eq!(visible_window(&[3, 3, 3, 3], 3, 7), 2..4);
        assert_eq!(visible_window(&[1, 1, 5, 1], 2, 6), 1..3);
    }

    #[test]
    fn test_visible_window_tall_row() {
        assert_eq!(visible_window(&[3, 3, 3, 3], 3, 2), 3..4);
        assert_eq!(visible_window(&[], 0, 10), 0..0);
    }

    #[test]
    fn test_state_badge() {
        let (text, color) = state_badge(&FormState::Submitting { attempt: 2 });
        assert_eq!(text, "⟳ submitting (attempt 2)");
        assert_eq!(color, Color::Yellow);

        let (text, _) = state_badge(&FormState::TransportFailed {
            reason: "timeout".into(),
        });
        assert!(text.starts_with("not sent: timeout"));
    }
}
