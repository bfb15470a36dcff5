//! Recorded events list

use super::render_scrollable_list;
use crate::app::App;
use crate::gateway::EventStatus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn status_color(status: &EventStatus) -> Color {
    match status {
        EventStatus::Pendente => Color::Yellow,
        EventStatus::Enviado => Color::Blue,
        EventStatus::Processado => Color::Green,
        EventStatus::Erro => Color::Red,
        EventStatus::Other(_) => Color::Gray,
    }
}

/// Draw the events list
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let events = app.state.visible_events();
    let block = Block::default()
        .title(" Eventos eSocial ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let filter_label = match &app.state.status_filter {
        Some(status) => format!("Status: {status}"),
        None => "Status: all".to_string(),
    };
    let refreshed = app
        .state
        .last_refresh
        .map(|at| format!("updated {}", at.format("%H:%M:%S")))
        .unwrap_or_else(|| "not loaded".to_string());

    if events.is_empty() {
        let message = if app.state.status_filter.is_some() {
            "No events with this status. Press 'f' to change the filter."
        } else {
            "No events registered yet.\nPress 'n' to register a new event."
        };
        let content = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(filter_label, Style::default().fg(Color::Cyan)),
        Span::styled(" [f]ilter", Style::default().fg(Color::DarkGray)),
        Span::raw(" | "),
        Span::styled(
            format!("Date {}", app.state.sort_direction.symbol()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" [o]rder", Style::default().fg(Color::DarkGray)),
        Span::raw(" | "),
        Span::styled(refreshed, Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = events
        .iter()
        .enumerate()
        .map(|(idx, event)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸" } else { " " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            let description = app
                .registry
                .get(&event.tipo)
                .map(|d| d.description)
                .unwrap_or("");

            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(format!("{:<7}", event.tipo), Style::default().fg(Color::Cyan)),
                Span::raw(" "),
                Span::styled(
                    format!("[{}]", event.status),
                    Style::default().fg(status_color(&event.status)),
                ),
                Span::raw(" "),
                Span::styled(
                    event.date_label("%d/%m/%Y %H:%M"),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" "),
                Span::styled(description, style),
            ]))
        })
        .collect();

    let list = List::new(items).block(block);
    render_scrollable_list(frame, chunks[1], list, app.state.selected_index);
}
