//! Application state and core logic

use crate::config::TuiConfig;
use crate::error::Presentation;
use crate::gateway::{
    EventFilter, EventGateway, EventStatus, HttpEventGateway, SessionProvider, StaticSession,
};
use crate::platform;
use crate::schema::SchemaRegistry;
use crate::state::{
    AppState, ControllerOptions, EventForm, Form, FormController, FormEvent, FormField, FormRow,
    FormState, PendingDeleteAction, Resolution, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Results coming back from background tasks
#[derive(Debug)]
pub enum AppMessage {
    Submission(Resolution),
}

/// The editing session shown in the event form view
pub struct ActiveForm {
    pub controller: FormController,
    /// `None` when the event code has no descriptor
    pub view: Option<EventForm>,
}

impl ActiveForm {
    /// Rebuild rows from the controller payload
    fn refresh(&mut self) {
        if let (Some(view), Some(descriptor)) = (self.view.as_mut(), self.controller.descriptor()) {
            view.refresh(descriptor, self.controller.payload());
        }
    }
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    pub config: TuiConfig,
    pub registry: Arc<SchemaRegistry>,
    gateway: Arc<dyn EventGateway>,
    session: Arc<dyn SessionProvider>,
    /// Open event form, if any
    pub form: Option<ActiveForm>,
    tx: UnboundedSender<AppMessage>,
    rx: UnboundedReceiver<AppMessage>,
    /// Whether the app should quit
    quit: bool,
    /// Short feedback shown in the status bar
    pub copy_message: Option<String>,
}

impl App {
    /// Create a new App from the user configuration
    pub async fn new(initial_code: Option<String>) -> Result<Self> {
        let config = TuiConfig::load()?;
        let session: Arc<dyn SessionProvider> = Arc::new(StaticSession::new(
            config.user_id.clone(),
            config.access_token.clone(),
        ));
        let gateway: Arc<dyn EventGateway> =
            Arc::new(HttpEventGateway::from_config(&config, Arc::clone(&session))?);

        let mut app = Self::with_parts(config, SchemaRegistry::standard(), gateway, session);

        if let Err(e) = app.refresh_events().await {
            tracing::warn!("Initial event load failed: {}", e);
        }
        if let Some(code) = initial_code {
            app.open_form(&code);
        }
        Ok(app)
    }

    pub fn with_parts(
        config: TuiConfig,
        registry: Arc<SchemaRegistry>,
        gateway: Arc<dyn EventGateway>,
        session: Arc<dyn SessionProvider>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            config,
            registry,
            gateway,
            session,
            form: None,
            tx,
            rx,
            quit: false,
            copy_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Acting user, if signed in
    pub fn user_id(&self) -> Option<String> {
        self.session.current_session().map(|s| s.user_id)
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => {
                    self.state.dismiss_error();
                    self.state.retry_submission = false;
                }
                KeyCode::Char('r') if self.state.retry_submission => {
                    self.state.dismiss_error();
                    self.state.retry_submission = false;
                    self.submit_form();
                }
                _ => {}
            }
            return Ok(());
        }

        // Handle delete confirmation (modal)
        if self.state.pending_delete.is_some() {
            self.handle_confirm_delete_key(key).await?;
            return Ok(());
        }

        // Clear any status messages on key press
        self.copy_message = None;

        match self.state.current_view {
            View::Events => self.handle_events_key(key).await?,
            View::EventDetail => self.handle_event_detail_key(key),
            View::EventTypes => self.handle_event_types_key(key),
            View::EventForm => self.handle_event_form_key(key),
            View::Config => self.handle_config_key(key),
        }
        Ok(())
    }

    /// Keys shared by the top-level views
    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab => {
                let next = match self.state.current_view {
                    View::Events => View::EventTypes,
                    View::EventTypes => View::Config,
                    _ => View::Events,
                };
                self.state.navigate(next);
                true
            }
            KeyCode::Char('1') => {
                self.state.navigate(View::Events);
                true
            }
            KeyCode::Char('2') => {
                self.state.navigate(View::EventTypes);
                true
            }
            KeyCode::Char('3') => {
                self.state.navigate(View::Config);
                true
            }
            KeyCode::Char('q') => {
                self.quit = true;
                true
            }
            _ => false,
        }
    }

    /// Handle keys in the events list
    async fn handle_events_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.handle_global_key(key) {
            return Ok(());
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.state
                    .move_selection_down(self.state.visible_events().len());
            }
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Char('r') => {
                if let Err(e) = self.refresh_events().await {
                    self.push_error(e.to_string());
                }
            }
            KeyCode::Char('f') => {
                self.state.cycle_status_filter();
                if let Err(e) = self.refresh_events().await {
                    self.push_error(e.to_string());
                }
            }
            KeyCode::Enter => self.open_selected_event().await,
            KeyCode::Char('o') => self.state.toggle_sort_direction(),
            KeyCode::Char('s') => self.send_selected_event().await,
            KeyCode::Char('d') => {
                if let Some(event) = self.state.selected_event() {
                    self.state.pending_delete = Some(PendingDeleteAction::for_event(event));
                }
            }
            KeyCode::Char('y') => {
                let id = self.state.selected_event().map(|e| e.id.clone());
                if let Some(id) = id {
                    match self.copy_to_clipboard(&id) {
                        Ok(()) => self.copy_message = Some(format!("Copied {id}")),
                        Err(e) => self.push_error(format!("Failed to copy: {}", e)),
                    }
                }
            }
            KeyCode::Char('n') => self.state.navigate(View::EventTypes),
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the event detail view
    fn handle_event_detail_key(&mut self, key: KeyEvent) {
        if self.handle_global_key(key) {
            return;
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_up(),
            KeyCode::Char('e') => self.edit_detail_event(),
            KeyCode::Char('y') => {
                let id = self.state.detail.as_ref().map(|e| e.id.clone());
                if let Some(id) = id {
                    match self.copy_to_clipboard(&id) {
                        Ok(()) => self.copy_message = Some(format!("Copied {id}")),
                        Err(e) => self.push_error(format!("Failed to copy: {}", e)),
                    }
                }
            }
            KeyCode::Esc | KeyCode::Backspace => {
                self.state.detail = None;
                self.state.go_back();
            }
            _ => {}
        }
    }

    async fn handle_confirm_delete_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(action) = self.state.pending_delete.as_mut() else {
            return Ok(());
        };
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
                action.selected_option = !action.selected_option;
            }
            KeyCode::Enter => {
                let confirmed = action.selected_option;
                let event_id = action.event_id.clone();
                self.state.pending_delete = None;
                if confirmed {
                    self.delete_event(&event_id).await;
                }
            }
            KeyCode::Esc => self.state.pending_delete = None,
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the event type catalog
    fn handle_event_types_key(&mut self, key: KeyEvent) {
        if self.handle_global_key(key) {
            return;
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.move_selection_down(self.registry.len());
            }
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Enter => {
                let code = self.registry.codes().nth(self.state.selected_index);
                if let Some(code) = code {
                    self.open_form(code);
                }
            }
            KeyCode::Esc | KeyCode::Backspace => self.state.go_back(),
            _ => {}
        }
    }

    fn handle_config_key(&mut self, key: KeyEvent) {
        if self.handle_global_key(key) {
            return;
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_up(),
            KeyCode::Char('c') => self.toggle_clear_on_success(),
            KeyCode::Esc | KeyCode::Backspace => self.state.go_back(),
            _ => {}
        }
    }

    /// Flip `clear_on_success` and persist it; applies to forms opened afterwards
    fn toggle_clear_on_success(&mut self) {
        self.config.clear_on_success = !self.config.clear_on_success;
        match self.config.save() {
            Ok(()) => {
                let state = if self.config.clear_on_success { "on" } else { "off" };
                self.copy_message = Some(format!("Clear after submit: {state}"));
            }
            Err(e) => self.push_error(format!("Failed to save config: {}", e)),
        }
    }

    /// Handle keys in the event form
    fn handle_event_form_key(&mut self, key: KeyEvent) {
        let row = match self.form.as_ref() {
            None => {
                self.state.go_back();
                return;
            }
            // Unknown event code: only leaving is possible
            Some(ActiveForm { view: None, .. }) => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                    self.close_form();
                }
                return;
            }
            Some(ActiveForm {
                view: Some(view), ..
            }) => view.active_row().cloned(),
        };

        if key.code == KeyCode::Char('s') && platform::is_submit_chord(key.modifiers) {
            self.submit_form();
            return;
        }

        match key.code {
            KeyCode::Esc => self.close_form(),
            KeyCode::Tab | KeyCode::Down => self.with_form_view(|view| view.next_field()),
            KeyCode::BackTab | KeyCode::Up => self.with_form_view(|view| view.prev_field()),
            _ => match row {
                Some(FormRow::Field(field)) => self.handle_field_key(key, &field),
                Some(FormRow::Submit) if key.code == KeyCode::Enter => self.submit_form(),
                Some(FormRow::List { .. }) if key.code == KeyCode::Enter => self.add_item(),
                Some(_) => match key.code {
                    KeyCode::Char('+') => self.add_item(),
                    KeyCode::Char('-') => self.remove_item(),
                    _ => {}
                },
                None => {}
            },
        }
    }

    fn handle_field_key(&mut self, key: KeyEvent, field: &FormField) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }
        if field.is_choice() {
            match key.code {
                KeyCode::Left => self.edit_active_field(FormField::prev_choice),
                KeyCode::Right | KeyCode::Char(' ') => self.edit_active_field(FormField::next_choice),
                KeyCode::Backspace | KeyCode::Delete => self.edit_active_field(FormField::clear),
                KeyCode::Enter => self.with_form_view(|view| view.next_field()),
                _ => {}
            }
            return;
        }
        match key.code {
            KeyCode::Char(c) => self.edit_active_field(|f| f.push_char(c)),
            KeyCode::Backspace => self.edit_active_field(FormField::pop_char),
            KeyCode::Delete => self.edit_active_field(FormField::clear),
            KeyCode::Enter if field.is_multiline => self.edit_active_field(|f| f.push_char('\n')),
            KeyCode::Enter => self.with_form_view(|view| view.next_field()),
            _ => {}
        }
    }

    fn with_form_view(&mut self, f: impl FnOnce(&mut EventForm)) {
        if let Some(view) = self.form.as_mut().and_then(|active| active.view.as_mut()) {
            f(view);
        }
    }

    /// Apply an edit to the active input and report it to the controller
    fn edit_active_field(&mut self, edit: impl FnOnce(&mut FormField)) {
        let Some(active) = self.form.as_mut() else {
            return;
        };
        let Some(field) = active
            .view
            .as_mut()
            .and_then(|view| view.get_active_field_mut())
        else {
            return;
        };
        edit(field);
        let event = FormEvent::Edit {
            path: field.path.clone(),
            value: field.to_json(),
        };
        active.controller.dispatch(event);
    }

    fn add_item(&mut self) {
        let Some(active) = self.form.as_mut() else {
            return;
        };
        let Some(list) = active.view.as_ref().and_then(EventForm::active_list) else {
            return;
        };
        active.controller.dispatch(FormEvent::AddItem { list });
        active.refresh();
    }

    fn remove_item(&mut self) {
        let Some(active) = self.form.as_mut() else {
            return;
        };
        let Some((list, index)) = active.view.as_ref().and_then(EventForm::removal_target) else {
            return;
        };
        active
            .controller
            .dispatch(FormEvent::RemoveItem { list, index });
        active.refresh();
    }

    /// Open a fresh editing session for an event code
    pub fn open_form(&mut self, code: &str) {
        if let Some(previous) = self.form.as_mut() {
            previous.controller.dispatch(FormEvent::Discard);
        }
        let controller = FormController::new(
            code,
            Arc::clone(&self.registry),
            Arc::clone(&self.gateway),
            Arc::clone(&self.session),
            ControllerOptions {
                clear_on_success: self.config.clear_on_success,
            },
        );
        let view = controller
            .descriptor()
            .map(|descriptor| EventForm::new(descriptor, controller.payload()));
        tracing::info!("Opened form for {}", controller.code());
        self.form = Some(ActiveForm { controller, view });
        self.state.navigate(View::EventForm);
    }

    /// Open a form for the detail event, starting from its stored payload
    fn edit_detail_event(&mut self) {
        let Some(event) = self.state.detail.clone() else {
            return;
        };
        let values = match event.payload {
            Some(Value::Object(values)) => values,
            _ => {
                self.copy_message = Some(format!("{} has no stored payload", event.id));
                return;
            }
        };
        self.open_form(&event.tipo);
        if let Some(active) = self.form.as_mut() {
            active.controller.dispatch(FormEvent::Load(values));
            active.refresh();
        }
    }

    /// Discard the editing session and leave the form
    pub fn close_form(&mut self) {
        if let Some(mut active) = self.form.take() {
            active.controller.dispatch(FormEvent::Discard);
        }
        self.state.retry_submission = false;
        self.state.go_back();
    }

    /// Validate and, when valid, send the form in the background
    pub fn submit_form(&mut self) {
        let Some(active) = self.form.as_mut() else {
            return;
        };
        let before = active.controller.state().clone();
        match active.controller.dispatch(FormEvent::Submit) {
            Some(pending) => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let resolution = pending.send().await;
                    if tx.send(AppMessage::Submission(resolution)).is_err() {
                        tracing::debug!("Submission finished after the UI closed");
                    }
                });
            }
            None => {
                if active.controller.state() != &before || before.is_settled() {
                    self.report_form_state();
                }
            }
        }
    }

    /// Surface the controller's latest outcome to the user
    fn report_form_state(&mut self) {
        let Some(active) = self.form.as_mut() else {
            return;
        };
        if let FormState::Succeeded { event_id, status } = active.controller.state() {
            self.copy_message = Some(format!("Event registered: {event_id} ({status})"));
            return;
        }
        let Some(error) = active.controller.error() else {
            return;
        };
        match error.presentation() {
            Presentation::Inline => {
                if let Some(errors) = error.field_errors() {
                    if let (Some(view), Some(first)) = (active.view.as_mut(), errors.fields().next())
                    {
                        view.focus_path(first);
                    }
                    self.copy_message = Some(format!("{} field(s) need attention", errors.len()));
                }
            }
            Presentation::Notification => {
                self.state.retry_submission = true;
                self.push_error(error.to_string());
            }
            // Drawn by the form view itself
            Presentation::ConfigurationError => {}
        }
    }

    /// Apply messages from background tasks
    pub async fn drain_messages(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            self.handle_message(message).await;
        }
    }

    async fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::Submission(resolution) => {
                let Some(active) = self.form.as_mut() else {
                    tracing::debug!("Submission result for a closed form ignored");
                    return;
                };
                let before = active.controller.state().clone();
                active.controller.dispatch(FormEvent::Resolved(resolution));
                active.refresh();
                let after = active.controller.state().clone();
                if after == before {
                    return;
                }
                self.report_form_state();
                if matches!(after, FormState::Succeeded { .. }) {
                    if let Err(e) = self.refresh_events().await {
                        tracing::warn!("Event list refresh failed: {}", e);
                    }
                }
            }
        }
    }

    /// Reload recorded events with the current status filter
    pub async fn refresh_events(&mut self) -> Result<()> {
        let filter = EventFilter::with_status(self.state.status_filter.clone());
        match self.gateway.list_events(&filter).await {
            Ok(events) => {
                self.state.gateway_connected = true;
                self.state.set_events(events);
                Ok(())
            }
            Err(e) => {
                self.state.gateway_connected = false;
                Err(e)
            }
        }
    }

    /// Fetch the selected event and show it in the detail view
    async fn open_selected_event(&mut self) {
        let Some(id) = self.state.selected_event().map(|e| e.id.clone()) else {
            return;
        };
        match self.gateway.get_event(&id).await {
            Ok(Some(record)) => {
                self.state.detail = Some(record);
                self.state.navigate(View::EventDetail);
            }
            Ok(None) => {
                self.state.remove_event(&id);
                self.push_error(format!("Event {id} no longer exists"));
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    /// Mark the selected event as sent
    async fn send_selected_event(&mut self) {
        let Some(event) = self.state.selected_event().cloned() else {
            return;
        };
        if !event.status.can_send() {
            self.copy_message = Some(format!("{} events cannot be sent", event.status));
            return;
        }
        match self
            .gateway
            .update_status(&event.id, EventStatus::Enviado)
            .await
        {
            Ok(record) => {
                self.copy_message = Some(format!("{} marked {}", record.id, record.status));
                self.state.upsert_event(record);
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    async fn delete_event(&mut self, event_id: &str) {
        match self.gateway.delete_event(event_id).await {
            Ok(()) => {
                self.state.remove_event(event_id);
                self.copy_message = Some(format!("Deleted {event_id}"));
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}
