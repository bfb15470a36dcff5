//! UI module for rendering the TUI

mod components;
mod config_panel;
mod event_detail;
mod event_types;
mod events;
mod forms;
mod layout;
mod widgets;

use crate::app::App;
use crate::state::View;
use components::{render_confirm_dialog, render_error_dialog};
use ratatui::Frame;
use widgets::render_scrollable_list;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Draw the main layout with sidebar
    let (sidebar_area, main_area) = layout::create_layout(area);

    // Draw sidebar
    layout::draw_sidebar(frame, sidebar_area, app);

    // Draw main content based on current view
    match &app.state.current_view {
        View::Events => events::draw(frame, main_area, app),
        View::EventDetail => event_detail::draw(frame, main_area, app),
        View::EventTypes => event_types::draw(frame, main_area, app),
        View::EventForm => forms::draw_event_form(frame, main_area, app),
        View::Config => config_panel::draw(frame, main_area, app),
    }

    // Draw status bar
    layout::draw_status_bar(frame, app);

    // Modal overlays last
    if let Some(action) = &app.state.pending_delete {
        render_confirm_dialog(frame, action);
    }
    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, message, app.state.retry_submission);
    }
}
