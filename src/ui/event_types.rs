//! Event type catalog

use super::render_scrollable_list;
use crate::app::App;
use crate::schema::{FieldKind, FieldSpec};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Draw the catalog list with a summary of the selected descriptor
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let items: Vec<ListItem> = app
        .registry
        .descriptors()
        .enumerate()
        .map(|(idx, descriptor)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(descriptor.code, Style::default().fg(Color::Cyan)),
                Span::raw(" "),
                Span::styled(descriptor.description, style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Event types ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    render_scrollable_list(frame, h_chunks[0], list, app.state.selected_index);

    let Some(descriptor) = app.registry.descriptors().nth(app.state.selected_index) else {
        return;
    };

    let mut content = vec![
        Line::from(Span::styled(
            format!("{} {}", descriptor.code, descriptor.description),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    push_field_lines(&descriptor.fields, 0, &mut content);

    if let Some(notes) = descriptor.notes {
        content.push(Line::from(""));
        content.extend(
            notes
                .lines()
                .map(|l| Line::from(Span::styled(l, Style::default().fg(Color::DarkGray)))),
        );
    }

    let detail = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Fields ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(detail, h_chunks[1]);
}

fn push_field_lines(fields: &[FieldSpec], depth: usize, lines: &mut Vec<Line<'static>>) {
    for spec in fields {
        let indent = "  ".repeat(depth);
        let marker = if spec.required { "*" } else { " " };
        let kind = match &spec.kind {
            FieldKind::Text { .. } => "text",
            FieldKind::Number(_) => "number",
            FieldKind::Date(_) => "date",
            FieldKind::Choice(_) => "choice",
            FieldKind::List { .. } => "list",
            FieldKind::Group(_) => "group",
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{indent}{marker}")),
            Span::raw(spec.label),
            Span::styled(format!("  {kind}"), Style::default().fg(Color::DarkGray)),
        ]));
        match &spec.kind {
            FieldKind::List { item: inner, .. } | FieldKind::Group(inner) => {
                push_field_lines(inner, depth + 1, lines);
            }
            _ => {}
        }
    }
}
