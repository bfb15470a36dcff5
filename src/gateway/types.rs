//! Wire and result types of the event store

use crate::schema::FieldErrors;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Processing status reported by the event store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventStatus {
    Pendente,
    Enviado,
    Processado,
    Erro,
    /// Any status this client does not know yet
    Other(String),
}

impl EventStatus {
    pub const KNOWN: [EventStatus; 4] = [
        EventStatus::Pendente,
        EventStatus::Enviado,
        EventStatus::Processado,
        EventStatus::Erro,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            EventStatus::Pendente => "PENDENTE",
            EventStatus::Enviado => "ENVIADO",
            EventStatus::Processado => "PROCESSADO",
            EventStatus::Erro => "ERRO",
            EventStatus::Other(raw) => raw,
        }
    }

    /// Pending events, or ones the store flagged with an error, can be sent
    pub fn can_send(&self) -> bool {
        matches!(self, EventStatus::Pendente | EventStatus::Erro)
    }
}

impl From<String> for EventStatus {
    fn from(raw: String) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "PENDENTE" => EventStatus::Pendente,
            "ENVIADO" => EventStatus::Enviado,
            "PROCESSADO" => EventStatus::Processado,
            "ERRO" => EventStatus::Erro,
            _ => EventStatus::Other(raw),
        }
    }
}

impl From<EventStatus> for String {
    fn from(status: EventStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event as recorded by the store
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventRecord {
    pub id: String,
    /// Event code, e.g. `S-2399`
    #[serde(default)]
    pub tipo: String,
    pub status: EventStatus,
    /// Registration timestamp
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub data: Option<DateTime<Utc>>,
    /// Payload as stored, when the store returns it
    #[serde(default)]
    pub payload: Option<Value>,
}

impl EventRecord {
    /// Registration date rendered with `format`, or a dash when unknown
    pub fn date_label(&self, format: &str) -> String {
        self.data
            .map(|at| at.format(format).to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Parse an ISO-8601 timestamp. Offset-less values are taken as UTC, a bare
/// date as midnight, and anything unreadable as unknown.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(at.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// Body of an accepted submission. Only the id and status matter.
#[derive(Debug, Deserialize)]
pub struct AcceptedBody {
    pub id: String,
    pub status: EventStatus,
}

/// Outcome of one submission. Exactly one of the three.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Accepted {
        event_id: String,
        status: EventStatus,
    },
    Rejected {
        field_errors: FieldErrors,
    },
    TransportFailure {
        reason: String,
    },
}

impl SubmissionResult {
    pub fn transport(reason: impl Into<String>) -> Self {
        SubmissionResult::TransportFailure {
            reason: reason.into(),
        }
    }
}

/// Query for listing recorded events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub tipo: Option<String>,
    pub status: Option<EventStatus>,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
}

impl EventFilter {
    pub fn with_status(status: Option<EventStatus>) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Query-string pairs, skipping unset criteria
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(tipo) = &self.tipo {
            pairs.push(("tipo", tipo.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(date) = self.data_inicio {
            pairs.push(("dataInicio", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.data_fim {
            pairs.push(("dataFim", date.format("%Y-%m-%d").to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_status_round_trips_known_values() {
        let status: EventStatus = serde_json::from_value(json!("PROCESSADO")).unwrap();
        assert_eq!(status, EventStatus::Processado);
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("PROCESSADO"));
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let status: EventStatus = serde_json::from_value(json!("EM_LOTE")).unwrap();
        assert_eq!(status, EventStatus::Other("EM_LOTE".to_string()));
        assert_eq!(status.to_string(), "EM_LOTE");
        assert!(!status.can_send());
    }

    #[test]
    fn test_record_parses_store_response() {
        let record: EventRecord = serde_json::from_value(json!({
            "id": "evt-1",
            "tipo": "S-2399",
            "status": "PENDENTE",
            "data": "2025-01-10T12:00:00.000Z",
            "usuarioId": "ignored"
        }))
        .unwrap();
        assert_eq!(record.id, "evt-1");
        assert_eq!(record.status, EventStatus::Pendente);
        assert_eq!(record.date_label("%Y-%m-%d"), "2025-01-10");
        assert_eq!(record.payload, None);
    }

    #[test]
    fn test_record_accepts_local_timestamps_and_missing_fields() {
        let record: EventRecord = serde_json::from_value(json!({
            "id": "evt-2",
            "status": "ENVIADO",
            "data": "2025-01-10T12:30:00",
            "payload": { "cpf": "12345678901" }
        }))
        .unwrap();
        assert_eq!(record.tipo, "");
        assert_eq!(record.date_label("%d/%m/%Y %H:%M"), "10/01/2025 12:30");
        assert_eq!(record.payload, Some(json!({ "cpf": "12345678901" })));

        let record: EventRecord =
            serde_json::from_value(json!({ "id": "evt-3", "status": "ERRO", "data": "ontem" }))
                .unwrap();
        assert_eq!(record.data, None);
        assert_eq!(record.date_label("%d/%m/%Y"), "-");
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).single();
        assert_eq!(parse_timestamp("2025-01-10T00:00:00Z"), expected);
        assert_eq!(parse_timestamp("2025-01-10T00:00:00.000"), expected);
        assert_eq!(parse_timestamp("2025-01-10"), expected);
        assert_eq!(parse_timestamp("2025-01-10T03:00:00+03:00"), expected);
        assert_eq!(parse_timestamp("10/01/2025"), None);
    }

    #[test]
    fn test_filter_query_pairs() {
        let filter = EventFilter {
            tipo: Some("S-1200".to_string()),
            status: Some(EventStatus::Enviado),
            data_inicio: NaiveDate::from_ymd_opt(2025, 1, 1),
            data_fim: None,
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("tipo", "S-1200".to_string()),
                ("status", "ENVIADO".to_string()),
                ("dataInicio", "2025-01-01".to_string()),
            ]
        );
        assert!(EventFilter::default().query_pairs().is_empty());
    }
}
