//! Form controller: owns one editing session of one event type
//!
//! All transitions go through [`FormController::dispatch`]. A submit request
//! that passes validation yields a [`PendingSubmission`]; the caller runs it
//! wherever it likes and feeds the [`Resolution`] back as
//! [`FormEvent::Resolved`]. Resolutions that do not match the attempt in
//! flight are dropped.

use super::form_state::{ErrorSource, FormState};
use crate::error::FormError;
use crate::gateway::{EventGateway, SessionProvider, SubmissionResult};
use crate::schema::{
    normalize_code, EventTypeDescriptor, FieldErrors, FieldPath, SchemaRegistry, TypedPayload,
    ValidationOutcome,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use uuid::Uuid;

pub const NO_SESSION: &str = "no authenticated session";

#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerOptions {
    /// Reset the payload to a fresh template after an accepted submission
    pub clear_on_success: bool,
}

#[derive(Debug, Clone)]
pub enum FormEvent {
    Edit { path: FieldPath, value: Value },
    /// Replace the payload with stored values laid over the template
    Load(Map<String, Value>),
    AddItem { list: FieldPath },
    RemoveItem { list: FieldPath, index: usize },
    Submit,
    Resolved(Resolution),
    /// The editing session ends; late results are ignored from now on
    Discard,
}

/// Gateway answer tagged with the attempt it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub session_id: Uuid,
    pub attempt: u32,
    pub result: SubmissionResult,
}

/// A validated snapshot ready to be sent exactly once
pub struct PendingSubmission {
    session_id: Uuid,
    attempt: u32,
    code: String,
    payload: TypedPayload,
    gateway: Arc<dyn EventGateway>,
}

impl PendingSubmission {
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn payload(&self) -> &TypedPayload {
        &self.payload
    }

    /// Perform the single gateway call for this attempt
    pub async fn send(self) -> Resolution {
        let result = self.gateway.submit(&self.code, &self.payload).await;
        Resolution {
            session_id: self.session_id,
            attempt: self.attempt,
            result,
        }
    }
}

impl std::fmt::Debug for PendingSubmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingSubmission")
            .field("session_id", &self.session_id)
            .field("attempt", &self.attempt)
            .field("code", &self.code)
            .finish_non_exhaustive()
    }
}

pub struct FormController {
    session_id: Uuid,
    code: String,
    registry: Arc<SchemaRegistry>,
    gateway: Arc<dyn EventGateway>,
    session: Arc<dyn SessionProvider>,
    options: ControllerOptions,
    state: FormState,
    payload: Map<String, Value>,
    field_errors: FieldErrors,
    attempt: u32,
    discarded: bool,
}

impl FormController {
    pub fn new(
        code: &str,
        registry: Arc<SchemaRegistry>,
        gateway: Arc<dyn EventGateway>,
        session: Arc<dyn SessionProvider>,
        options: ControllerOptions,
    ) -> Self {
        let (code, state, payload) = match registry.get(code) {
            Ok(descriptor) => (descriptor.code.to_string(), FormState::Idle, descriptor.template()),
            Err(e) => {
                tracing::error!("{}", e);
                (
                    normalize_code(code),
                    FormState::ConfigurationError {
                        code: code.to_string(),
                    },
                    Map::new(),
                )
            }
        };
        Self {
            session_id: Uuid::new_v4(),
            code,
            registry,
            gateway,
            session,
            options,
            state,
            payload,
            field_errors: FieldErrors::new(),
            attempt: 0,
            discarded: false,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Local and server messages, keyed by field path
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn error_for(&self, path: &FieldPath) -> Option<&str> {
        self.field_errors.get(&path.to_string())
    }

    pub fn descriptor(&self) -> Option<&EventTypeDescriptor> {
        self.registry.get(&self.code).ok()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    pub fn error(&self) -> Option<FormError> {
        self.state.error()
    }

    /// Apply one event. Returns the submission to perform when a submit request
    /// was accepted.
    pub fn dispatch(&mut self, event: FormEvent) -> Option<PendingSubmission> {
        if self.discarded {
            tracing::debug!("Form {} discarded, ignoring {:?}", self.code, event);
            return None;
        }
        if matches!(self.state, FormState::ConfigurationError { .. }) {
            return None;
        }

        match event {
            FormEvent::Edit { path, value } => {
                self.edit(path, value);
                None
            }
            FormEvent::Load(values) => {
                self.load(values);
                None
            }
            FormEvent::AddItem { list } => {
                self.add_item(&list);
                None
            }
            FormEvent::RemoveItem { list, index } => {
                self.remove_item(&list, index);
                None
            }
            FormEvent::Submit => self.begin_submit(),
            FormEvent::Resolved(resolution) => {
                self.resolve(resolution);
                None
            }
            FormEvent::Discard => {
                self.discarded = true;
                self.payload.clear();
                self.field_errors = FieldErrors::new();
                self.transition(FormState::Idle);
                None
            }
        }
    }

    /// Validate, send and resolve in one go
    pub async fn submit(&mut self) -> &FormState {
        if let Some(pending) = self.dispatch(FormEvent::Submit) {
            let resolution = pending.send().await;
            self.dispatch(FormEvent::Resolved(resolution));
        }
        &self.state
    }

    fn transition(&mut self, next: FormState) {
        tracing::debug!(
            "Form {} ({}): {} -> {}",
            self.code,
            self.session_id,
            self.state.label(),
            next.label()
        );
        self.state = next;
    }

    /// Settled outcomes become editable again on the next change
    fn reopen(&mut self) {
        if self.state.is_settled() {
            self.transition(FormState::Idle);
        }
    }

    fn edit(&mut self, path: FieldPath, value: Value) {
        if !path.set(&mut self.payload, value) {
            tracing::warn!("Form {}: no slot for {}", self.code, path);
            return;
        }
        self.reopen();
        self.revalidate(&path);
    }

    fn revalidate(&mut self, path: &FieldPath) {
        let key = path.to_string();
        match self.registry.validate_field(&self.code, path, &self.payload) {
            Ok(Some(message)) => self.field_errors.replace(key, message),
            Ok(None) => {
                self.field_errors.remove(&key);
            }
            Err(e) => tracing::error!("{}", e),
        }
    }

    fn load(&mut self, values: Map<String, Value>) {
        if self.state.is_submitting() {
            tracing::debug!("Form {}: load ignored while submitting", self.code);
            return;
        }
        let mut payload = self
            .descriptor()
            .map(EventTypeDescriptor::template)
            .unwrap_or_default();
        overlay(&mut payload, values);
        self.payload = payload;
        self.field_errors = FieldErrors::new();
        self.reopen();
    }

    fn add_item(&mut self, list: &FieldPath) {
        let Some(template) = self
            .descriptor()
            .and_then(|descriptor| descriptor.item_template(list))
        else {
            tracing::warn!("Form {}: {} is not a list", self.code, list);
            return;
        };
        let Some(slot) = list.entry(&mut self.payload) else {
            return;
        };
        match slot {
            Value::Array(items) => items.push(template),
            other => *other = Value::Array(vec![template]),
        }
        self.reopen();
        self.revalidate(list);
    }

    fn remove_item(&mut self, list: &FieldPath, index: usize) {
        let removed = match list.entry(&mut self.payload) {
            Some(Value::Array(items)) if index < items.len() => {
                items.remove(index);
                true
            }
            _ => false,
        };
        if !removed {
            return;
        }
        // Item indices shift, so stale messages under the list go away
        self.field_errors.remove_under(&list.to_string());
        self.reopen();
        self.revalidate(list);
    }

    fn begin_submit(&mut self) -> Option<PendingSubmission> {
        if !self.state.accepts_submit() {
            tracing::debug!(
                "Form {}: submit ignored while {}",
                self.code,
                self.state.label()
            );
            return None;
        }

        self.transition(FormState::Validating);
        let outcome = match self.registry.validate(&self.code, &self.payload) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.transition(FormState::ConfigurationError { code: e.0 });
                return None;
            }
        };

        let typed = match outcome {
            ValidationOutcome::Valid(typed) => typed,
            ValidationOutcome::Invalid(errors) => {
                self.field_errors = errors.clone();
                self.transition(FormState::ValidationFailed {
                    errors,
                    source: ErrorSource::Local,
                });
                return None;
            }
        };
        self.field_errors = FieldErrors::new();

        if self.session.current_session().is_none() {
            self.transition(FormState::TransportFailed {
                reason: NO_SESSION.to_string(),
            });
            return None;
        }

        self.attempt += 1;
        self.transition(FormState::Submitting {
            attempt: self.attempt,
        });
        Some(PendingSubmission {
            session_id: self.session_id,
            attempt: self.attempt,
            code: self.code.clone(),
            payload: typed,
            gateway: Arc::clone(&self.gateway),
        })
    }

    fn resolve(&mut self, resolution: Resolution) {
        let FormState::Submitting { attempt } = self.state else {
            tracing::debug!("Form {}: late resolution ignored", self.code);
            return;
        };
        if resolution.session_id != self.session_id || resolution.attempt != attempt {
            tracing::debug!(
                "Form {}: resolution for attempt {} ignored",
                self.code,
                resolution.attempt
            );
            return;
        }

        match resolution.result {
            SubmissionResult::Accepted { event_id, status } => {
                tracing::info!("Event {} accepted as {} ({})", self.code, event_id, status);
                if self.options.clear_on_success {
                    self.payload = self
                        .descriptor()
                        .map(EventTypeDescriptor::template)
                        .unwrap_or_default();
                    self.field_errors = FieldErrors::new();
                }
                self.transition(FormState::Succeeded { event_id, status });
            }
            SubmissionResult::Rejected { field_errors } => {
                self.field_errors.merge(&field_errors);
                self.transition(FormState::ValidationFailed {
                    errors: self.field_errors.clone(),
                    source: ErrorSource::Server,
                });
            }
            SubmissionResult::TransportFailure { reason } => {
                tracing::warn!("Event {} not delivered: {}", self.code, reason);
                self.transition(FormState::TransportFailed { reason });
            }
        }
    }
}

/// Merge `values` into `base`, descending into objects present in both
fn overlay(base: &mut Map<String, Value>, values: Map<String, Value>) {
    for (key, value) in values {
        match (base.get_mut(&key), value) {
            (Some(Value::Object(slot)), Value::Object(inner)) => overlay(slot, inner),
            (Some(slot), value) => *slot = value,
            (None, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{
        EventStatus, MockEventGateway, MockSessionProvider, Session, StaticSession,
    };
    use crate::schema::{sample_payload, FIELD_REQUIRED};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn signed_in() -> Arc<dyn SessionProvider> {
        Arc::new(StaticSession::new(Some("user-1".to_string()), None))
    }

    fn controller(code: &str, gateway: MockEventGateway) -> FormController {
        FormController::new(
            code,
            SchemaRegistry::standard(),
            Arc::new(gateway),
            signed_in(),
            ControllerOptions::default(),
        )
    }

    fn edit(c: &mut FormController, path: &str, value: Value) {
        c.dispatch(FormEvent::Edit {
            path: FieldPath::parse(path).unwrap(),
            value,
        });
    }

    fn fill_s2399(c: &mut FormController) {
        edit(c, "cpf", json!("12345678901"));
        edit(c, "dataDesligamento", json!("2025-01-10"));
        edit(c, "motivoDesligamento", json!("TERMINO_CONTRATO"));
    }

    fn fill_s1207(c: &mut FormController) {
        let registry = SchemaRegistry::standard();
        let sample = sample_payload(registry.get("S-1207").unwrap());
        for (name, value) in sample {
            edit(c, &name, value);
        }
    }

    fn accepted(id: &str) -> SubmissionResult {
        SubmissionResult::Accepted {
            event_id: id.to_string(),
            status: EventStatus::Pendente,
        }
    }

    mod lifecycle {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_starts_idle_with_template() {
            let c = controller("S-2240", MockEventGateway::new());
            assert_eq!(c.state(), &FormState::Idle);
            assert_eq!(c.code(), "S-2240");
            assert_eq!(c.payload()["agenteRisco"], json!([{}]));
        }

        #[test]
        fn test_unknown_code_is_configuration_error() {
            let mut c = controller("S-9999", MockEventGateway::new());
            assert_eq!(
                c.state(),
                &FormState::ConfigurationError {
                    code: "S-9999".to_string()
                }
            );
            assert!(c.dispatch(FormEvent::Submit).is_none());
            edit(&mut c, "cpf", json!("1"));
            assert!(c.payload().is_empty());
        }

        #[test]
        fn test_edits_do_not_change_idle() {
            let mut c = controller("S-2399", MockEventGateway::new());
            edit(&mut c, "cpf", json!("123"));
            assert_eq!(c.state(), &FormState::Idle);
            assert_eq!(
                c.error_for(&FieldPath::field("cpf")),
                Some("invalid format: expected 11 digits")
            );
            edit(&mut c, "cpf", json!("12345678901"));
            assert!(c.field_errors().is_empty());
        }

        #[test]
        fn test_invalid_submit_makes_no_call() {
            let mut gateway = MockEventGateway::new();
            gateway.expect_submit().never();
            let mut c = controller("S-2399", gateway);
            edit(&mut c, "cpf", json!("123"));

            assert!(c.dispatch(FormEvent::Submit).is_none());
            let FormState::ValidationFailed { errors, source } = c.state() else {
                panic!("expected validation failure, got {:?}", c.state());
            };
            assert_eq!(*source, ErrorSource::Local);
            assert!(errors.contains("cpf"));
            assert_eq!(errors.get("dataDesligamento"), Some(FIELD_REQUIRED));
        }

        #[test]
        fn test_edit_after_failure_reopens() {
            let mut c = controller("S-2399", MockEventGateway::new());
            c.dispatch(FormEvent::Submit);
            assert!(matches!(c.state(), FormState::ValidationFailed { .. }));
            edit(&mut c, "cpf", json!("12345678901"));
            assert_eq!(c.state(), &FormState::Idle);
            assert!(!c.field_errors().contains("cpf"));
            assert!(c.field_errors().contains("dataDesligamento"));
        }

        #[test]
        fn test_no_session_fails_without_call() {
            let mut gateway = MockEventGateway::new();
            gateway.expect_submit().never();
            let mut session = MockSessionProvider::new();
            session.expect_current_session().returning(|| None);
            let mut c = FormController::new(
                "S-2399",
                SchemaRegistry::standard(),
                Arc::new(gateway),
                Arc::new(session),
                ControllerOptions::default(),
            );
            fill_s2399(&mut c);

            assert!(c.dispatch(FormEvent::Submit).is_none());
            assert_eq!(
                c.state(),
                &FormState::TransportFailed {
                    reason: NO_SESSION.to_string()
                }
            );
        }
        #[test]
        fn test_load_replaces_payload_and_errors() {
            let mut c = controller("S-2399", MockEventGateway::new());
            edit(&mut c, "cpf", json!("123"));
            assert!(c.field_errors().contains("cpf"));

            let stored = json!({
                "cpf": "12345678901",
                "dataDesligamento": "2025-01-10",
                "motivoDesligamento": "TERMINO_CONTRATO"
            });
            let Value::Object(values) = stored else {
                unreachable!()
            };
            c.dispatch(FormEvent::Load(values));

            assert_eq!(c.state(), &FormState::Idle);
            assert!(c.field_errors().is_empty());
            assert_eq!(c.payload()["cpf"], json!("12345678901"));
            assert!(c.dispatch(FormEvent::Submit).is_some());
        }

        #[test]
        fn test_load_keeps_template_for_missing_entries() {
            let mut c = controller("S-2240", MockEventGateway::new());
            let Value::Object(values) = json!({ "agenteRisco": [{ "codigo": "01.01.001" }] }) else {
                unreachable!()
            };
            c.dispatch(FormEvent::Load(values));

            assert_eq!(c.payload()["agenteRisco"], json!([{ "codigo": "01.01.001" }]));
            assert!(c.payload().contains_key("epi"));
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_accepted_submission_succeeds() {
            let mut gateway = MockEventGateway::new();
            gateway
                .expect_submit()
                .withf(|code, payload| code == "S-2399" && payload.get("cpf").is_some())
                .times(1)
                .returning(|_, _| accepted("evt-1"));
            let mut c = controller("s2399", gateway);
            fill_s2399(&mut c);

            let state = c.submit().await;
            assert_eq!(
                state,
                &FormState::Succeeded {
                    event_id: "evt-1".to_string(),
                    status: EventStatus::Pendente,
                }
            );
            assert_eq!(c.payload()["cpf"], json!("12345678901"));
        }

        #[tokio::test]
        async fn test_double_submit_calls_gateway_once() {
            let mut gateway = MockEventGateway::new();
            gateway
                .expect_submit()
                .times(1)
                .returning(|_, _| accepted("evt-1"));
            let mut c = controller("S-2399", gateway);
            fill_s2399(&mut c);

            let first = c.dispatch(FormEvent::Submit);
            let second = c.dispatch(FormEvent::Submit);
            assert!(first.is_some());
            assert!(second.is_none());
            assert!(c.is_submitting());

            let resolution = first.unwrap().send().await;
            c.dispatch(FormEvent::Resolved(resolution));
            assert!(matches!(c.state(), FormState::Succeeded { .. }));
        }

        #[tokio::test]
        async fn test_server_500_is_transport_failure() {
            let mut gateway = MockEventGateway::new();
            gateway
                .expect_submit()
                .times(1)
                .returning(|_, _| crate::gateway::interpret_submission(500, b""));
            let mut c = controller("S-2399", gateway);
            fill_s2399(&mut c);

            c.submit().await;
            assert_eq!(
                c.state(),
                &FormState::TransportFailed {
                    reason: "HTTP 500".to_string()
                }
            );
            assert!(c.state().accepts_submit());
        }

        #[tokio::test]
        async fn test_server_field_errors_are_validation_failure() {
            let mut gateway = MockEventGateway::new();
            gateway.expect_submit().times(1).returning(|_, _| {
                crate::gateway::interpret_submission(
                    400,
                    br#"{"fieldErrors":{"valorBeneficio":"must be >= 0"}}"#,
                )
            });
            let mut c = controller("S-1207", gateway);
            fill_s1207(&mut c);

            c.submit().await;
            let FormState::ValidationFailed { errors, source } = c.state() else {
                panic!("expected validation failure, got {:?}", c.state());
            };
            assert_eq!(*source, ErrorSource::Server);
            assert_eq!(errors.get("valorBeneficio"), Some("must be >= 0"));
            assert_eq!(
                c.error_for(&FieldPath::field("valorBeneficio")),
                Some("must be >= 0")
            );
        }

        #[tokio::test]
        async fn test_retry_after_transport_failure() {
            let mut gateway = MockEventGateway::new();
            let mut calls = 0;
            gateway.expect_submit().times(2).returning(move |_, _| {
                calls += 1;
                if calls == 1 {
                    SubmissionResult::transport("request timed out")
                } else {
                    accepted("evt-2")
                }
            });
            let mut c = controller("S-2399", gateway);
            fill_s2399(&mut c);

            c.submit().await;
            assert!(matches!(c.state(), FormState::TransportFailed { .. }));
            c.submit().await;
            assert!(matches!(c.state(), FormState::Succeeded { .. }));
        }

        #[tokio::test]
        async fn test_snapshot_ignores_edits_in_flight() {
            let mut gateway = MockEventGateway::new();
            gateway
                .expect_submit()
                .times(1)
                .withf(|_, payload| {
                    payload.get("cpf").and_then(|v| v.as_str()) == Some("12345678901")
                })
                .returning(|_, _| accepted("evt-3"));
            let mut c = controller("S-2399", gateway);
            fill_s2399(&mut c);

            let pending = c.dispatch(FormEvent::Submit).unwrap();
            edit(&mut c, "cpf", json!("999"));
            assert!(c.is_submitting());

            let resolution = pending.send().await;
            c.dispatch(FormEvent::Resolved(resolution));
            assert!(matches!(c.state(), FormState::Succeeded { .. }));
            assert_eq!(c.payload()["cpf"], json!("999"));
        }

        #[tokio::test]
        async fn test_clear_on_success_resets_payload() {
            let mut gateway = MockEventGateway::new();
            gateway
                .expect_submit()
                .returning(|_, _| accepted("evt-4"));
            let mut c = FormController::new(
                "S-2399",
                SchemaRegistry::standard(),
                Arc::new(gateway),
                signed_in(),
                ControllerOptions {
                    clear_on_success: true,
                },
            );
            fill_s2399(&mut c);
            c.submit().await;
            assert!(matches!(c.state(), FormState::Succeeded { .. }));
            assert!(c.payload().is_empty());
        }
    }

    mod stale_results {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_result_after_discard_is_ignored() {
            let mut gateway = MockEventGateway::new();
            gateway
                .expect_submit()
                .returning(|_, _| accepted("evt-5"));
            let mut c = controller("S-2399", gateway);
            fill_s2399(&mut c);

            let pending = c.dispatch(FormEvent::Submit).unwrap();
            c.dispatch(FormEvent::Discard);
            let resolution = pending.send().await;
            c.dispatch(FormEvent::Resolved(resolution));

            assert_eq!(c.state(), &FormState::Idle);
            assert!(c.dispatch(FormEvent::Submit).is_none());
        }

        #[test]
        fn test_resolution_from_other_session_is_ignored() {
            let mut c = controller("S-2399", MockEventGateway::new());
            fill_s2399(&mut c);
            let pending = c.dispatch(FormEvent::Submit).unwrap();

            c.dispatch(FormEvent::Resolved(Resolution {
                session_id: Uuid::new_v4(),
                attempt: pending.attempt(),
                result: accepted("evt-x"),
            }));
            assert!(c.is_submitting());

            c.dispatch(FormEvent::Resolved(Resolution {
                session_id: c.session_id(),
                attempt: pending.attempt() + 1,
                result: accepted("evt-y"),
            }));
            assert!(c.is_submitting());
        }

        #[test]
        fn test_mocked_session_with_token() {
            let mut session = MockSessionProvider::new();
            session.expect_current_session().returning(|| {
                Some(Session {
                    user_id: "u".to_string(),
                    access_token: Some("t".to_string()),
                })
            });
            let mut c = FormController::new(
                "S-2399",
                SchemaRegistry::standard(),
                Arc::new(MockEventGateway::new()),
                Arc::new(session),
                ControllerOptions::default(),
            );
            fill_s2399(&mut c);
            assert!(c.dispatch(FormEvent::Submit).is_some());
        }
    }

    mod line_items {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_add_and_remove_items() {
            let mut c = controller("S-2240", MockEventGateway::new());
            let list = FieldPath::field("epi");
            c.dispatch(FormEvent::AddItem { list: list.clone() });
            c.dispatch(FormEvent::AddItem { list: list.clone() });
            assert_eq!(c.payload()["epi"].as_array().map(Vec::len), Some(2));

            edit(&mut c, "epi[1].codigo", json!(""));
            assert!(c.field_errors().contains("epi[1].codigo"));

            c.dispatch(FormEvent::RemoveItem {
                list: list.clone(),
                index: 1,
            });
            assert_eq!(c.payload()["epi"].as_array().map(Vec::len), Some(1));
            assert!(!c.field_errors().contains("epi[1].codigo"));
        }

        #[test]
        fn test_removing_below_minimum_flags_list() {
            let mut c = controller("S-2240", MockEventGateway::new());
            c.dispatch(FormEvent::RemoveItem {
                list: FieldPath::field("agenteRisco"),
                index: 0,
            });
            assert_eq!(
                c.error_for(&FieldPath::field("agenteRisco")),
                Some("at least 1 item required")
            );
        }

        #[test]
        fn test_add_item_on_leaf_is_ignored() {
            let mut c = controller("S-2240", MockEventGateway::new());
            c.dispatch(FormEvent::AddItem {
                list: FieldPath::field("cpf"),
            });
            assert!(c.payload().get("cpf").is_none());
        }
    }
}
