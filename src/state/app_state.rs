//! Application state definitions

use crate::gateway::{EventRecord, EventStatus};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// Recorded events
    #[default]
    Events,
    /// One recorded event with its stored payload
    EventDetail,
    /// Catalog of supported event types
    EventTypes,
    /// Registration form for one event type
    EventForm,
    Config,
}

/// Sort direction by registration date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// Delete confirmation waiting for the user
#[derive(Debug, Clone)]
pub struct PendingDeleteAction {
    pub event_id: String,
    pub event_display: String,
    /// `true` when "Delete" is highlighted
    pub selected_option: bool,
}

impl PendingDeleteAction {
    pub fn for_event(event: &EventRecord) -> Self {
        Self {
            event_id: event.id.clone(),
            event_display: format!("{} ({})", event.tipo, event.date_label("%d/%m/%Y")),
            selected_option: false,
        }
    }
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Data
    pub events: Vec<EventRecord>,
    /// Event shown in the detail view
    pub detail: Option<EventRecord>,
    pub last_refresh: Option<DateTime<Utc>>,
    pub gateway_connected: bool,

    // Filters
    pub status_filter: Option<EventStatus>,
    pub sort_direction: SortDirection,

    // Selection
    pub selected_index: usize,

    // UI state
    pub scroll_offset: usize,
    pub pending_delete: Option<PendingDeleteAction>,
    /// The current error came from a submission that can be retried with `r`
    pub retry_submission: bool,
    errors: VecDeque<String>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Switch view, remembering where we came from
    pub fn navigate(&mut self, view: View) {
        if self.current_view != view {
            let previous = std::mem::replace(&mut self.current_view, view);
            self.view_history.push(previous);
        }
        self.reset_selection();
    }

    /// Return to the previous view (events list when history is empty)
    pub fn go_back(&mut self) {
        self.current_view = self.view_history.pop().unwrap_or_default();
        self.reset_selection();
    }

    /// Cycle none → PENDENTE → ENVIADO → PROCESSADO → ERRO → none
    pub fn cycle_status_filter(&mut self) {
        let known = &EventStatus::KNOWN;
        self.status_filter = match &self.status_filter {
            None => Some(known[0].clone()),
            Some(current) => known
                .iter()
                .position(|s| s == current)
                .and_then(|i| known.get(i + 1))
                .cloned(),
        };
        self.reset_selection();
    }

    pub fn toggle_sort_direction(&mut self) {
        self.sort_direction = self.sort_direction.toggle();
        self.reset_selection();
    }

    /// Events matching the status filter, ordered by registration date
    pub fn visible_events(&self) -> Vec<&EventRecord> {
        let mut events: Vec<_> = self
            .events
            .iter()
            .filter(|e| self.status_filter.as_ref().map_or(true, |s| &e.status == s))
            .collect();
        events.sort_by(|a, b| match self.sort_direction {
            SortDirection::Asc => a.data.cmp(&b.data),
            SortDirection::Desc => b.data.cmp(&a.data),
        });
        events
    }

    pub fn selected_event(&self) -> Option<&EventRecord> {
        self.visible_events().get(self.selected_index).copied()
    }

    /// Replace the list after a refresh, keeping the selection in range
    pub fn set_events(&mut self, events: Vec<EventRecord>) {
        self.events = events;
        self.last_refresh = Some(Utc::now());
        let count = self.visible_events().len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    /// Store an updated record in place
    pub fn upsert_event(&mut self, record: EventRecord) {
        match self.events.iter_mut().find(|e| e.id == record.id) {
            Some(existing) => *existing = record,
            None => self.events.push(record),
        }
    }

    pub fn remove_event(&mut self, event_id: &str) {
        self.events.retain(|e| e.id != event_id);
        let count = self.visible_events().len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    /// Queue a message for the global error dialog
    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn record(id: &str, status: EventStatus, day: u32) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            tipo: "S-2399".to_string(),
            status,
            data: Utc.with_ymd_and_hms(2025, 1, day, 12, 0, 0).single(),
            payload: None,
        }
    }

    fn state() -> AppState {
        let mut state = AppState::default();
        state.set_events(vec![
            record("a", EventStatus::Pendente, 1),
            record("b", EventStatus::Enviado, 3),
            record("c", EventStatus::Pendente, 2),
        ]);
        state
    }

    #[test]
    fn test_newest_first_by_default() {
        let state = state();
        let ids: Vec<_> = state.visible_events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_status_filter_cycles_back_to_none() {
        let mut state = state();
        state.cycle_status_filter();
        assert_eq!(state.status_filter, Some(EventStatus::Pendente));
        let ids: Vec<_> = state.visible_events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
        for _ in 0..4 {
            state.cycle_status_filter();
        }
        assert_eq!(state.status_filter, None);
    }

    #[test]
    fn test_remove_keeps_selection_in_range() {
        let mut state = state();
        state.selected_index = 2;
        state.remove_event("a");
        assert_eq!(state.selected_index, 1);
        assert_eq!(state.selected_event().map(|e| e.id.as_str()), Some("c"));
    }

    #[test]
    fn test_upsert_replaces_status() {
        let mut state = state();
        state.upsert_event(record("a", EventStatus::Enviado, 1));
        assert_eq!(state.events.len(), 3);
        assert_eq!(state.events[0].status, EventStatus::Enviado);
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::default();
        state.push_error("first".into());
        state.push_error("second".into());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
    }

    #[test]
    fn test_navigation_history() {
        let mut state = AppState::default();
        state.navigate(View::EventTypes);
        state.navigate(View::EventForm);
        state.go_back();
        assert_eq!(state.current_view, View::EventTypes);
        state.go_back();
        assert_eq!(state.current_view, View::Events);
    }
}
