//! Event type descriptors

use super::field::{CrossFieldRule, FieldKind, FieldSpec};
use super::path::{FieldPath, PathSegment};
use serde_json::{Map, Value};

/// Definition of one regulatory event kind. Immutable once registered.
#[derive(Debug, Clone)]
pub struct EventTypeDescriptor {
    /// Canonical code, e.g. `S-2399`
    pub code: &'static str,
    pub description: &'static str,
    /// Fields in validation and display order
    pub fields: Vec<FieldSpec>,
    pub rules: Vec<CrossFieldRule>,
    /// Reference material shown with the form; never validated
    pub notes: Option<&'static str>,
}

impl EventTypeDescriptor {
    pub fn new(code: &'static str, description: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self {
            code,
            description,
            fields,
            rules: Vec::new(),
            notes: None,
        }
    }

    pub fn rule(mut self, rule: CrossFieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn notes(mut self, notes: &'static str) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Find the field spec governing the value at `path`
    pub fn spec_at(&self, path: &FieldPath) -> Option<&FieldSpec> {
        let mut fields = &self.fields;
        let mut found: Option<&FieldSpec> = None;
        for segment in path.segments() {
            match segment {
                PathSegment::Key(name) => {
                    let spec = fields.iter().find(|f| f.name == name.as_str())?;
                    found = Some(spec);
                    if let FieldKind::Group(inner) = &spec.kind {
                        fields = inner;
                    }
                }
                PathSegment::Index(_) => match &found?.kind {
                    FieldKind::List { item, .. } => fields = item,
                    _ => return None,
                },
            }
        }
        found
    }

    /// Skeleton payload for a fresh form: groups as objects and lists
    /// pre-filled with their minimum number of items
    pub fn template(&self) -> Map<String, Value> {
        template_for(&self.fields)
    }

    /// Skeleton for one new item of the list at `path`
    pub fn item_template(&self, path: &FieldPath) -> Option<Value> {
        match &self.spec_at(path)?.kind {
            FieldKind::List { item, .. } => Some(Value::Object(template_for(item))),
            _ => None,
        }
    }
}

fn template_for(fields: &[FieldSpec]) -> Map<String, Value> {
    let mut map = Map::new();
    for spec in fields {
        match &spec.kind {
            FieldKind::Group(inner) => {
                map.insert(spec.name.to_string(), Value::Object(template_for(inner)));
            }
            FieldKind::List { item, min_items } => {
                let count = if spec.required { (*min_items).max(1) } else { *min_items };
                let items = (0..count)
                    .map(|_| Value::Object(template_for(item)))
                    .collect();
                map.insert(spec.name.to_string(), Value::Array(items));
            }
            _ => {}
        }
    }
    map
}
