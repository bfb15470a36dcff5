//! Validation results: typed payloads and field-error mappings

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Message for a required field that is absent, null or blank
pub const FIELD_REQUIRED: &str = "field required";

/// Field path → human-readable message, in the order problems were found.
/// On the wire it is a JSON object whose key order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(String, String)>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem. The first message per field wins.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if !self.contains(&field) {
            self.0.push((field, message.into()));
        }
    }

    /// Record a problem, replacing any earlier message for the field
    pub fn replace(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.0.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = message,
            None => self.0.push((field, message)),
        }
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        let pos = self.0.iter().position(|(f, _)| f == field)?;
        Some(self.0.remove(pos).1)
    }

    /// Drop every error at or underneath `prefix` (e.g. a removed list item)
    pub fn remove_under(&mut self, prefix: &str) {
        self.0.retain(|(f, _)| {
            !(f == prefix
                || f.strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('.') || rest.starts_with('[')))
        });
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|(f, _)| f == field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(f, _)| f.as_str())
    }

    /// Merge `other` into `self`; messages from `other` override existing ones
    pub fn merge(&mut self, other: &FieldErrors) {
        for (field, message) in other.iter() {
            self.replace(field, message);
        }
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, message) in &self.0 {
            map.serialize_entry(field, message)?;
        }
        map.end()
    }
}

struct FieldErrorsVisitor;

impl<'de> Visitor<'de> for FieldErrorsVisitor {
    type Value = FieldErrors;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of field paths to messages")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldErrors, A::Error> {
        let mut errors = FieldErrors::new();
        while let Some((field, message)) = access.next_entry::<String, String>()? {
            errors.insert(field, message);
        }
        Ok(errors)
    }
}

impl<'de> Deserialize<'de> for FieldErrors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldErrorsVisitor)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut errors = FieldErrors::new();
        for (field, message) in iter {
            errors.insert(field, message);
        }
        errors
    }
}

/// A value that passed its field spec
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypedValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Choice(String),
    List(Vec<TypedPayload>),
    Group(TypedPayload),
}

impl TypedValue {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            TypedValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) | TypedValue::Choice(s) => Some(s),
            _ => None,
        }
    }

}

/// Validated payload, ready for the gateway
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TypedPayload(BTreeMap<String, TypedValue>);

impl TypedPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: TypedValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.0.get(name)
    }

    /// Resolve a dotted path (`localCondicao.cep`) through nested groups
    pub fn get_path(&self, dotted: &str) -> Option<&TypedValue> {
        let mut parts = dotted.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            match current {
                TypedValue::Group(inner) => current = inner.get(part)?,
                _ => return None,
            }
        }
        Some(current)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of whole-object validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Valid(TypedPayload),
    Invalid(FieldErrors),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            ValidationOutcome::Invalid(errors) => Some(errors),
            ValidationOutcome::Valid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_first_message_wins_on_insert() {
        let mut errors = FieldErrors::new();
        errors.insert("cpf", "field required");
        errors.insert("cpf", "invalid format");
        assert_eq!(errors.get("cpf"), Some("field required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_merge_overrides_and_appends() {
        let mut local: FieldErrors = [("cpf", "invalid format"), ("nome", "field required")]
            .into_iter()
            .collect();
        let server: FieldErrors = [("cpf", "CPF já cadastrado"), ("salario", "must be >= 0")]
            .into_iter()
            .collect();
        local.merge(&server);
        assert_eq!(local.get("cpf"), Some("CPF já cadastrado"));
        assert_eq!(local.get("nome"), Some("field required"));
        assert_eq!(local.get("salario"), Some("must be >= 0"));
        assert_eq!(local.len(), 3);
    }

    #[test]
    fn test_remove_under_keeps_siblings() {
        let mut errors: FieldErrors = [
            ("epi", "at least 1 item required"),
            ("epi[0].ca", "field required"),
            ("epiExtra", "x"),
        ]
        .into_iter()
        .collect();
        errors.remove_under("epi");
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["epiExtra"]);
    }

    #[test]
    fn test_deserialize_from_json_object() {
        let errors: FieldErrors =
            serde_json::from_value(json!({ "valorBeneficio": "must be >= 0" })).unwrap();
        assert_eq!(errors.get("valorBeneficio"), Some("must be >= 0"));
    }

    #[test]
    fn test_server_order_is_kept() {
        let body = r#"{"valorBeneficio":"must be >= 0","cpf":"CPF já cadastrado","dataInicio":"field required"}"#;
        let errors: FieldErrors = serde_json::from_str(body).unwrap();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["valorBeneficio", "cpf", "dataInicio"]
        );
        assert_eq!(serde_json::to_string(&errors).unwrap(), body);
    }

    #[test]
    fn test_typed_payload_serializes_plainly() {
        let mut inner = TypedPayload::new();
        inner.insert("uf", TypedValue::Text("SP".to_string()));
        let mut payload = TypedPayload::new();
        payload.insert(
            "data",
            TypedValue::Date(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()),
        );
        payload.insert("valor", TypedValue::Number(1000.5));
        payload.insert("local", TypedValue::Group(inner));
        payload.insert("itens", TypedValue::List(vec![]));

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "data": "2025-01-10",
                "valor": 1000.5,
                "local": { "uf": "SP" },
                "itens": []
            })
        );
        assert_eq!(
            payload.get_path("local.uf").and_then(TypedValue::as_str),
            Some("SP")
        );
    }
}
