//! Event code → descriptor lookup

use super::catalog;
use super::descriptor::EventTypeDescriptor;
use super::outcome::ValidationOutcome;
use super::path::FieldPath;
use super::validate;
use crate::error::UnknownEventCode;
use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

static STANDARD: Lazy<Arc<SchemaRegistry>> =
    Lazy::new(|| Arc::new(SchemaRegistry::from_descriptors(catalog::all())));

/// Canonical form of an event code: `s2399`, `S2399` and `S-2399` all become `S-2399`
pub fn normalize_code(raw: &str) -> String {
    let upper = raw.trim().to_ascii_uppercase();
    match upper.strip_prefix('S') {
        Some(rest) => format!("S-{}", rest.trim_start_matches('-')),
        None => upper,
    }
}

/// Read-only set of event descriptors, fixed once built
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    descriptors: BTreeMap<&'static str, EventTypeDescriptor>,
}

impl SchemaRegistry {
    /// The built-in catalog, shared by every form session
    pub fn standard() -> Arc<Self> {
        Arc::clone(&STANDARD)
    }

    pub fn from_descriptors(descriptors: impl IntoIterator<Item = EventTypeDescriptor>) -> Self {
        let mut map = BTreeMap::new();
        for descriptor in descriptors {
            if let Some(previous) = map.insert(descriptor.code, descriptor) {
                tracing::warn!("Duplicate descriptor for {}, keeping the last one", previous.code);
            }
        }
        Self { descriptors: map }
    }

    pub fn get(&self, code: &str) -> Result<&EventTypeDescriptor, UnknownEventCode> {
        self.descriptors
            .get(normalize_code(code).as_str())
            .ok_or_else(|| UnknownEventCode(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_ok()
    }

    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.descriptors.keys().copied()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &EventTypeDescriptor> {
        self.descriptors.values()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Whole-object validation of a candidate payload
    pub fn validate(
        &self,
        code: &str,
        payload: &Map<String, Value>,
    ) -> Result<ValidationOutcome, UnknownEventCode> {
        let descriptor = self.get(code)?;
        Ok(validate::validate_payload(descriptor, payload))
    }

    /// Message for the single field at `path`, if it is currently invalid
    pub fn validate_field(
        &self,
        code: &str,
        path: &FieldPath,
        payload: &Map<String, Value>,
    ) -> Result<Option<String>, UnknownEventCode> {
        let descriptor = self.get(code)?;
        Ok(validate::validate_field(descriptor, path, payload))
    }
}
