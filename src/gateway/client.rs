//! HTTP client for the eSocial event store
//!
//! Talks to the `/api/esocial/eventos` endpoints. Submission responses are
//! translated by [`interpret_submission`], which never sees a raw transport error.

use super::auth::SessionProvider;
use super::traits::EventGateway;
use super::types::{AcceptedBody, EventFilter, EventRecord, EventStatus, SubmissionResult};
use crate::config::TuiConfig;
use crate::schema::{FieldErrors, TypedPayload};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

const EVENTS_PATH: &str = "/api/esocial/eventos";

#[derive(Serialize)]
struct SubmitRequest<'a> {
    code: &'a str,
    payload: &'a TypedPayload,
    #[serde(rename = "usuarioId")]
    usuario_id: &'a str,
}

#[derive(Serialize)]
struct StatusRequest<'a> {
    status: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "fieldErrors", default)]
    field_errors: FieldErrors,
}

/// Listing responses come either bare or wrapped in `{ data: [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody {
    Plain(Vec<EventRecord>),
    Wrapped { data: Vec<EventRecord> },
}

/// Translate a submission response into a [`SubmissionResult`]
pub fn interpret_submission(status: u16, body: &[u8]) -> SubmissionResult {
    if (200..300).contains(&status) {
        return match serde_json::from_slice::<AcceptedBody>(body) {
            Ok(accepted) => SubmissionResult::Accepted {
                event_id: accepted.id,
                status: accepted.status,
            },
            Err(_) => SubmissionResult::transport("malformed response"),
        };
    }

    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody { field_errors }) if !field_errors.is_empty() => {
            SubmissionResult::Rejected { field_errors }
        }
        _ => SubmissionResult::transport(format!("HTTP {status}")),
    }
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "could not reach the event store".to_string()
    } else {
        err.to_string()
    }
}

/// Client for the event store REST API
pub struct HttpEventGateway {
    base_url: String,
    http: reqwest::Client,
    session: Arc<dyn SessionProvider>,
}

impl HttpEventGateway {
    pub fn new(
        base_url: impl Into<String>,
        http: reqwest::Client,
        session: Arc<dyn SessionProvider>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            session,
        }
    }

    /// Build a gateway with the configured address and request timeout
    pub fn from_config(config: &TuiConfig, session: Arc<dyn SessionProvider>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("esocial-tui/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;
        Ok(Self::new(config.gateway_url.clone(), http, session))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn events_url(&self) -> String {
        format!("{}{}", self.base_url, EVENTS_PATH)
    }

    fn event_url(&self, event_id: &str) -> String {
        format!("{}{}/{}", self.base_url, EVENTS_PATH, event_id)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self
            .session
            .current_session()
            .and_then(|session| session.access_token)
        {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl EventGateway for HttpEventGateway {
    async fn submit(&self, code: &str, payload: &TypedPayload) -> SubmissionResult {
        let Some(session) = self.session.current_session() else {
            return SubmissionResult::transport("no authenticated session");
        };

        let body = SubmitRequest {
            code,
            payload,
            usuario_id: &session.user_id,
        };
        let request = self.authorize(self.http.post(self.events_url())).json(&body);

        tracing::debug!("Submitting {} to {}", code, self.base_url);
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Submission of {} failed: {}", code, e);
                return SubmissionResult::transport(describe(&e));
            }
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(bytes) => interpret_submission(status, &bytes),
            Err(e) => SubmissionResult::transport(describe(&e)),
        }
    }

    async fn list_events(&self, filter: &EventFilter) -> Result<Vec<EventRecord>> {
        let response = self
            .authorize(self.http.get(self.events_url()))
            .query(&filter.query_pairs())
            .send()
            .await
            .map_err(|e| anyhow!("Failed to list events: {}", describe(&e)))?
            .error_for_status()
            .map_err(|e| anyhow!("Failed to list events: {}", e))?;

        let body: ListBody = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse event list: {}", e))?;

        Ok(match body {
            ListBody::Plain(records) | ListBody::Wrapped { data: records } => records,
        })
    }

    async fn get_event(&self, event_id: &str) -> Result<Option<EventRecord>> {
        let response = self
            .authorize(self.http.get(self.event_url(event_id)))
            .send()
            .await
            .map_err(|e| anyhow!("Failed to load event: {}", describe(&e)))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response
            .error_for_status()
            .map_err(|e| anyhow!("Failed to load event: {}", e))?;

        response
            .json()
            .await
            .map(Some)
            .map_err(|e| anyhow!("Failed to parse event: {}", e))
    }

    async fn update_status(&self, event_id: &str, status: EventStatus) -> Result<EventRecord> {
        let response = self
            .authorize(self.http.put(format!("{}/status", self.event_url(event_id))))
            .json(&StatusRequest {
                status: status.as_str(),
            })
            .send()
            .await
            .map_err(|e| anyhow!("Failed to update event status: {}", describe(&e)))?
            .error_for_status()
            .map_err(|e| anyhow!("Failed to update event status: {}", e))?;

        response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse updated event: {}", e))
    }

    async fn delete_event(&self, event_id: &str) -> Result<()> {
        self.authorize(self.http.delete(self.event_url(event_id)))
            .send()
            .await
            .map_err(|e| anyhow!("Failed to delete event: {}", describe(&e)))?
            .error_for_status()
            .map_err(|e| anyhow!("Failed to delete event: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::auth::StaticSession;
    use crate::schema::TypedValue;
    use pretty_assertions::assert_eq;

    fn session() -> Arc<dyn SessionProvider> {
        Arc::new(StaticSession::new(
            Some("user-1".to_string()),
            Some("tok".to_string()),
        ))
    }

    fn payload() -> TypedPayload {
        let mut payload = TypedPayload::new();
        payload.insert("cpf", TypedValue::Text("12345678901".to_string()));
        payload
    }

    mod interpretation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_success_with_record_is_accepted() {
            let body = br#"{"id":"evt-9","tipo":"S-2399","status":"PENDENTE","data":"2025-01-10T00:00:00Z"}"#;
            assert_eq!(
                interpret_submission(201, body),
                SubmissionResult::Accepted {
                    event_id: "evt-9".to_string(),
                    status: EventStatus::Pendente,
                }
            );
        }

        #[test]
        fn test_success_needs_only_id_and_status() {
            let accepted = SubmissionResult::Accepted {
                event_id: "evt-9".to_string(),
                status: EventStatus::Pendente,
            };
            let local_time = br#"{"id":"evt-9","tipo":"S-2399","status":"PENDENTE","data":"2025-01-10T12:00:00"}"#;
            assert_eq!(interpret_submission(201, local_time), accepted);

            let no_tipo = br#"{"id":"evt-9","status":"PENDENTE","data":"2025-01-10T12:00:00Z"}"#;
            assert_eq!(interpret_submission(201, no_tipo), accepted);

            assert_eq!(
                interpret_submission(200, br#"{"id":"evt-9","status":"PENDENTE"}"#),
                accepted
            );
        }

        #[test]
        fn test_success_with_garbage_is_transport_failure() {
            assert_eq!(
                interpret_submission(200, b"<html>ok</html>"),
                SubmissionResult::transport("malformed response")
            );
            assert_eq!(
                interpret_submission(200, br#"{"status":"PENDENTE"}"#),
                SubmissionResult::transport("malformed response")
            );
        }

        #[test]
        fn test_server_error_without_body() {
            assert_eq!(
                interpret_submission(500, b""),
                SubmissionResult::transport("HTTP 500")
            );
        }

        #[test]
        fn test_field_errors_are_rejections() {
            let result = interpret_submission(
                400,
                br#"{"fieldErrors":{"valorBeneficio":"must be >= 0"}}"#,
            );
            let SubmissionResult::Rejected { field_errors } = result else {
                panic!("expected rejection, got {result:?}");
            };
            assert_eq!(field_errors.get("valorBeneficio"), Some("must be >= 0"));
        }

        #[test]
        fn test_empty_field_errors_are_opaque() {
            assert_eq!(
                interpret_submission(422, br#"{"fieldErrors":{}}"#),
                SubmissionResult::transport("HTTP 422")
            );
            assert_eq!(
                interpret_submission(400, br#"{"error":"bad"}"#),
                SubmissionResult::transport("HTTP 400")
            );
        }
    }

    mod http {
        use super::*;
        use httpmock::prelude::*;
        use pretty_assertions::assert_eq;
        use serde_json::json;

        fn gateway(server: &MockServer) -> HttpEventGateway {
            HttpEventGateway::new(server.base_url(), reqwest::Client::new(), session())
        }

        #[tokio::test]
        async fn test_submit_posts_code_payload_and_user() {
            let server = MockServer::start_async().await;
            let mock = server
                .mock_async(|when, then| {
                    when.method(POST)
                        .path("/api/esocial/eventos")
                        .header("authorization", "Bearer tok")
                        .json_body(json!({
                            "code": "S-2399",
                            "payload": { "cpf": "12345678901" },
                            "usuarioId": "user-1"
                        }));
                    then.status(201)
                        .header("content-type", "application/json")
                        .json_body(json!({
                            "id": "evt-1",
                            "tipo": "S-2399",
                            "status": "PENDENTE",
                            "data": "2025-01-10T00:00:00Z"
                        }));
                })
                .await;

            let result = gateway(&server).submit("S-2399", &payload()).await;
            assert_eq!(
                result,
                SubmissionResult::Accepted {
                    event_id: "evt-1".to_string(),
                    status: EventStatus::Pendente,
                }
            );
            mock.assert_async().await;
        }

        #[tokio::test]
        async fn test_submit_maps_rejection_body() {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(POST).path("/api/esocial/eventos");
                    then.status(400)
                        .json_body(json!({ "fieldErrors": { "valorBeneficio": "must be >= 0" } }));
                })
                .await;

            let result = gateway(&server).submit("S-2400", &payload()).await;
            let SubmissionResult::Rejected { field_errors } = result else {
                panic!("expected rejection, got {result:?}");
            };
            assert_eq!(field_errors.get("valorBeneficio"), Some("must be >= 0"));
        }

        #[tokio::test]
        async fn test_submit_without_session_sends_nothing() {
            let server = MockServer::start_async().await;
            let mock = server
                .mock_async(|when, then| {
                    when.any_request();
                    then.status(201);
                })
                .await;
            let gateway = HttpEventGateway::new(
                server.base_url(),
                reqwest::Client::new(),
                Arc::new(StaticSession::anonymous()),
            );

            assert_eq!(
                gateway.submit("S-2399", &payload()).await,
                SubmissionResult::transport("no authenticated session")
            );
            mock.assert_hits_async(0).await;
        }

        #[tokio::test]
        async fn test_connection_refused_is_transport_failure() {
            let gateway =
                HttpEventGateway::new("http://127.0.0.1:1/", reqwest::Client::new(), session());
            let result = gateway.submit("S-2399", &payload()).await;
            assert!(matches!(result, SubmissionResult::TransportFailure { .. }));
        }

        #[tokio::test]
        async fn test_list_events_sends_filter() {
            let server = MockServer::start_async().await;
            let mock = server
                .mock_async(|when, then| {
                    when.method(GET)
                        .path("/api/esocial/eventos")
                        .query_param("status", "ENVIADO")
                        .header("authorization", "Bearer tok");
                    then.status(200).json_body(json!([{
                        "id": "a",
                        "tipo": "S-1200",
                        "status": "ENVIADO",
                        "data": "2025-02-01T10:00:00Z"
                    }]));
                })
                .await;

            let events = gateway(&server)
                .list_events(&EventFilter::with_status(Some(EventStatus::Enviado)))
                .await
                .unwrap();
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].status, EventStatus::Enviado);
            mock.assert_async().await;
        }

        #[tokio::test]
        async fn test_list_events_accepts_wrapped_body() {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(GET).path("/api/esocial/eventos");
                    then.status(200).json_body(json!({ "data": [
                        { "id": "a", "status": "PENDENTE" },
                        { "id": "b", "status": "ERRO" }
                    ]}));
                })
                .await;

            let events = gateway(&server)
                .list_events(&EventFilter::default())
                .await
                .unwrap();
            let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
            assert_eq!(ids, vec!["a", "b"]);
        }

        #[tokio::test]
        async fn test_get_event_returns_payload() {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(GET).path("/api/esocial/eventos/evt-7");
                    then.status(200).json_body(json!({
                        "id": "evt-7",
                        "tipo": "S-2399",
                        "status": "PENDENTE",
                        "data": "2025-01-10T12:00:00",
                        "payload": { "cpf": "12345678901" }
                    }));
                })
                .await;

            let record = gateway(&server).get_event("evt-7").await.unwrap().unwrap();
            assert_eq!(record.tipo, "S-2399");
            assert_eq!(record.payload, Some(json!({ "cpf": "12345678901" })));
        }

        #[tokio::test]
        async fn test_get_event_missing_is_none() {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(GET).path("/api/esocial/eventos/nope");
                    then.status(404);
                })
                .await;

            assert_eq!(gateway(&server).get_event("nope").await.unwrap(), None);
        }

        #[tokio::test]
        async fn test_update_status_puts_new_status() {
            let server = MockServer::start_async().await;
            let mock = server
                .mock_async(|when, then| {
                    when.method(PUT)
                        .path("/api/esocial/eventos/a/status")
                        .json_body(json!({ "status": "ENVIADO" }));
                    then.status(200).json_body(json!({
                        "id": "a",
                        "tipo": "S-1200",
                        "status": "ENVIADO",
                        "data": "2025-02-01T10:00:00Z"
                    }));
                })
                .await;

            let record = gateway(&server)
                .update_status("a", EventStatus::Enviado)
                .await
                .unwrap();
            assert_eq!(record.status, EventStatus::Enviado);
            mock.assert_async().await;
        }

        #[tokio::test]
        async fn test_delete_reports_http_errors() {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(DELETE).path("/api/esocial/eventos/missing");
                    then.status(404);
                })
                .await;

            let err = tokio_test::assert_err!(gateway(&server).delete_event("missing").await);
            assert!(err.to_string().contains("Failed to delete event"));
        }
    }
}
