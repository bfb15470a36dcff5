//! Form field value objects

use crate::schema::{FieldKind, FieldPath, FieldSpec};
use serde_json::Value;

/// Editable value of one input control
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Choice {
        options: &'static [&'static str],
        selected: Option<usize>,
    },
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single leaf input bound to a payload path
#[derive(Debug, Clone)]
pub struct FormField {
    pub path: FieldPath,
    pub label: String,
    pub value: FieldValue,
    pub is_multiline: bool,
    pub required: bool,
    /// Format example shown while the input is empty
    pub placeholder: Option<String>,
    pub help: Option<&'static str>,
}

impl FormField {
    /// Build the input for a leaf spec from the current payload value
    pub fn from_spec(spec: &FieldSpec, path: FieldPath, current: Option<&Value>) -> Self {
        let value = match &spec.kind {
            FieldKind::Choice(options) => FieldValue::Choice {
                options: *options,
                selected: current
                    .and_then(Value::as_str)
                    .and_then(|v| options.iter().position(|o| *o == v)),
            },
            _ => FieldValue::Text(match current {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => String::new(),
            }),
        };
        let placeholder = match &spec.kind {
            FieldKind::Text {
                format: Some(format),
                ..
            } => Some(format.example()),
            FieldKind::Date(_) => Some("AAAA-MM-DD".to_string()),
            FieldKind::Number(_) => Some("0,00".to_string()),
            _ => None,
        };
        Self {
            path,
            label: spec.label.to_string(),
            value,
            is_multiline: spec.is_multiline(),
            required: spec.required,
            placeholder,
            help: spec.help,
        }
    }

    /// Get the text value (empty for choice fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Choice { .. } => "",
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.value, FieldValue::Choice { .. })
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.value {
            s.push(c);
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => {
                s.pop();
            }
            FieldValue::Choice { selected, .. } => *selected = None,
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Choice { selected, .. } => *selected = None,
        }
    }

    /// Select the next option, wrapping around
    pub fn next_choice(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if options.is_empty() {
                return;
            }
            *selected = Some(match selected {
                Some(i) => (*i + 1) % options.len(),
                None => 0,
            });
        }
    }

    /// Select the previous option, wrapping around
    pub fn prev_choice(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if options.is_empty() {
                return;
            }
            *selected = Some(match selected {
                Some(0) | None => options.len() - 1,
                Some(i) => *i - 1,
            });
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice {
                options,
                selected: Some(i),
            } => format!("◀ {} ▶", options[*i]),
            FieldValue::Choice { selected: None, .. } => "◀ selecione ▶".to_string(),
        }
    }

    /// Value written into the payload
    pub fn to_json(&self) -> Value {
        match &self.value {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Choice {
                options,
                selected: Some(i),
            } => Value::String(options[*i].to_string()),
            FieldValue::Choice { selected: None, .. } => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_field_from_number() {
        let spec = FieldSpec::number("valor", "Valor");
        let field = FormField::from_spec(&spec, FieldPath::field("valor"), Some(&json!(12.5)));
        assert_eq!(field.as_text(), "12.5");
        assert_eq!(field.to_json(), json!("12.5"));
    }

    #[test]
    fn test_choice_cycles_both_ways() {
        let spec = FieldSpec::choice("sexo", "Sexo", &["M", "F"]);
        let mut field = FormField::from_spec(&spec, FieldPath::field("sexo"), None);
        assert_eq!(field.to_json(), Value::Null);
        field.next_choice();
        assert_eq!(field.to_json(), json!("M"));
        field.next_choice();
        field.next_choice();
        assert_eq!(field.to_json(), json!("M"));
        field.prev_choice();
        assert_eq!(field.to_json(), json!("F"));
        field.pop_char();
        assert_eq!(field.to_json(), Value::Null);
    }

    #[test]
    fn test_choice_preselects_current_value() {
        let spec = FieldSpec::choice("sexo", "Sexo", &["M", "F"]);
        let field = FormField::from_spec(&spec, FieldPath::field("sexo"), Some(&json!("F")));
        assert_eq!(field.display_value(), "◀ F ▶");
    }

    #[test]
    fn test_push_and_pop() {
        let spec = FieldSpec::text("cpf", "CPF");
        let mut field = FormField::from_spec(&spec, FieldPath::field("cpf"), Some(&json!("12")));
        field.push_char('3');
        assert_eq!(field.as_text(), "123");
        field.pop_char();
        field.pop_char();
        assert_eq!(field.as_text(), "1");
        field.clear();
        assert_eq!(field.to_json(), json!(""));
    }
}
