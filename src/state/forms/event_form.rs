//! Event form: input rows derived from a descriptor and the current payload

use super::field::FormField;
use super::form_state::Form;
use crate::schema::{EventTypeDescriptor, FieldKind, FieldPath, FieldSpec};
use serde_json::{Map, Value};

/// One line of the event form
#[derive(Debug, Clone)]
pub enum FormRow {
    Field(FormField),
    Group {
        path: FieldPath,
        label: &'static str,
    },
    List {
        path: FieldPath,
        label: &'static str,
        count: usize,
        min_items: usize,
    },
    Item {
        list: FieldPath,
        index: usize,
    },
    /// The submit button row
    Submit,
}

impl FormRow {
    /// Indentation level
    pub fn depth(&self) -> usize {
        match self {
            FormRow::Field(field) => field.path.depth().saturating_sub(1),
            FormRow::Group { path, .. } | FormRow::List { path, .. } => {
                path.depth().saturating_sub(1)
            }
            FormRow::Item { list, .. } => list.depth(),
            FormRow::Submit => 0,
        }
    }

    pub fn path(&self) -> Option<FieldPath> {
        match self {
            FormRow::Field(field) => Some(field.path.clone()),
            FormRow::Group { path, .. } | FormRow::List { path, .. } => Some(path.clone()),
            FormRow::Item { list, index } => Some(list.index(*index)),
            FormRow::Submit => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventForm {
    pub code: &'static str,
    pub description: &'static str,
    pub notes: Option<&'static str>,
    rows: Vec<FormRow>,
    active_row: usize,
}

impl EventForm {
    pub fn new(descriptor: &EventTypeDescriptor, payload: &Map<String, Value>) -> Self {
        Self {
            code: descriptor.code,
            description: descriptor.description,
            notes: descriptor.notes,
            rows: build_rows(descriptor, payload),
            active_row: 0,
        }
    }

    /// Rebuild rows after a structural change, keeping the cursor on the same path
    pub fn refresh(&mut self, descriptor: &EventTypeDescriptor, payload: &Map<String, Value>) {
        let active_path = self.active_row().and_then(FormRow::path);
        self.rows = build_rows(descriptor, payload);
        let position = active_path.and_then(|path| {
            self.rows
                .iter()
                .position(|row| row.path().as_ref() == Some(&path))
        });
        self.active_row = position.unwrap_or(self.active_row.min(self.rows.len() - 1));
    }

    pub fn rows(&self) -> &[FormRow] {
        &self.rows
    }

    pub fn active_row(&self) -> Option<&FormRow> {
        self.rows.get(self.active_row)
    }

    /// Move the cursor to the row bound to `path` (display form)
    pub fn focus_path(&mut self, path: &str) -> bool {
        let found = self
            .rows
            .iter()
            .position(|row| row.path().is_some_and(|p| p.to_string() == path));
        if let Some(index) = found {
            self.active_row = index;
        }
        found.is_some()
    }

    /// List targeted by add/remove from the current cursor position
    pub fn active_list(&self) -> Option<FieldPath> {
        match self.active_row()? {
            FormRow::List { path, .. } => Some(path.clone()),
            FormRow::Item { list, .. } => Some(list.clone()),
            FormRow::Field(field) => field.path.enclosing_list(),
            FormRow::Group { path, .. } => path.enclosing_list(),
            FormRow::Submit => None,
        }
    }

    /// Item index to remove for the current cursor position: the item under the
    /// cursor, or the last item of the active list
    pub fn removal_target(&self) -> Option<(FieldPath, usize)> {
        match self.active_row()? {
            FormRow::Item { list, index } => Some((list.clone(), *index)),
            FormRow::List { path, count, .. } if *count > 0 => Some((path.clone(), count - 1)),
            FormRow::List { .. } | FormRow::Submit => None,
            row => {
                let path = row.path()?;
                let list = path.enclosing_list()?;
                let count = self.rows.iter().find_map(|r| match r {
                    FormRow::List { path, count, .. } if *path == list => Some(*count),
                    _ => None,
                })?;
                (count > 0).then(|| (list, count - 1))
            }
        }
    }
}

impl Form for EventForm {
    fn field_count(&self) -> usize {
        self.rows.len()
    }
    fn active_field(&self) -> usize {
        self.active_row
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_row = index.min(self.rows.len().saturating_sub(1));
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.rows.get_mut(self.active_row) {
            Some(FormRow::Field(field)) => Some(field),
            _ => None,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match self.rows.get(index) {
            Some(FormRow::Field(field)) => Some(field),
            _ => None,
        }
    }
}

fn build_rows(descriptor: &EventTypeDescriptor, payload: &Map<String, Value>) -> Vec<FormRow> {
    let mut rows = Vec::new();
    push_rows(&descriptor.fields, payload, &FieldPath::root(), &mut rows);
    rows.push(FormRow::Submit);
    rows
}

fn push_rows(
    fields: &[FieldSpec],
    payload: &Map<String, Value>,
    base: &FieldPath,
    rows: &mut Vec<FormRow>,
) {
    for spec in fields {
        let path = base.key(spec.name);
        match &spec.kind {
            FieldKind::Group(inner) => {
                rows.push(FormRow::Group {
                    path: path.clone(),
                    label: spec.label,
                });
                push_rows(inner, payload, &path, rows);
            }
            FieldKind::List { item, min_items } => {
                let count = path
                    .lookup(payload)
                    .and_then(Value::as_array)
                    .map_or(0, Vec::len);
                rows.push(FormRow::List {
                    path: path.clone(),
                    label: spec.label,
                    count,
                    min_items: *min_items,
                });
                for index in 0..count {
                    rows.push(FormRow::Item {
                        list: path.clone(),
                        index,
                    });
                    push_rows(item, payload, &path.index(index), rows);
                }
            }
            _ => {
                let current = path.lookup(payload);
                rows.push(FormRow::Field(FormField::from_spec(spec, path, current)));
            }
        }
    }
}
