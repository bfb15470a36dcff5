//! Configuration panel view

use crate::app::App;
use crate::config::TuiConfig;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Show the first and last characters of a secret
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "•".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

fn entry<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

/// Draw the config panel
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let config = &app.config;
    let unset = || "(not set)".to_string();

    let mut content = vec![
        Line::from(Span::styled(
            "Gateway",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        entry("URL", config.gateway_url.clone()),
        entry("Timeout", format!("{}s", config.request_timeout_secs)),
        Line::from(""),
        Line::from(Span::styled(
            "Session",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        entry("User", config.user_id.clone().unwrap_or_else(unset)),
        entry(
            "Token",
            config.access_token.as_deref().map(mask).unwrap_or_else(unset),
        ),
        Line::from(""),
        Line::from(Span::styled(
            "Forms",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        entry(
            "Clear after submit",
            if config.clear_on_success { "on" } else { "off" }.to_string(),
        ),
        Line::from(Span::styled(
            "  press 'c' to toggle",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    content.push(entry(
        "File",
        TuiConfig::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(no config directory)".to_string()),
    ));
    content.push(Line::from(Span::styled(
        "ESOCIAL_GATEWAY_URL, ESOCIAL_USER_ID and ESOCIAL_TOKEN override the file.",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Config ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.state.scroll_offset as u16, 0));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask("abc"), "•••");
        assert_eq!(mask("abcd1234wxyz"), "abcd…wxyz");
    }
}
