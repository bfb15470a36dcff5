//! Generic validation routine interpreting [`FieldSpec`]s
//!
//! Fields are checked in declaration order and every problem is collected.
//! Cross-field rules only see values that passed their own spec, so a missing
//! field is reported once, under its own name.

use super::descriptor::EventTypeDescriptor;
use super::field::{CrossFieldRule, FieldKind, FieldSpec, NumberRule};
use super::outcome::{FieldErrors, TypedPayload, TypedValue, ValidationOutcome, FIELD_REQUIRED};
use super::path::FieldPath;
use chrono::{DateTime, Local, NaiveDate};
use serde_json::{Map, Value};
use std::collections::HashSet;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Validate a whole candidate payload against its descriptor
pub fn validate_payload(
    descriptor: &EventTypeDescriptor,
    payload: &Map<String, Value>,
) -> ValidationOutcome {
    validate_payload_on(descriptor, payload, today())
}

/// [`validate_payload`] with date bounds measured against `today`
pub fn validate_payload_on(
    descriptor: &EventTypeDescriptor,
    payload: &Map<String, Value>,
    today: NaiveDate,
) -> ValidationOutcome {
    let mut errors = FieldErrors::new();
    let typed = validate_fields(
        &descriptor.fields,
        payload,
        &FieldPath::root(),
        today,
        &mut errors,
    );

    for rule in &descriptor.rules {
        apply_rule(rule, &typed, &mut errors);
    }

    if errors.is_empty() {
        ValidationOutcome::Valid(typed)
    } else {
        ValidationOutcome::Invalid(errors)
    }
}

/// Validate the single value at `path`, as done while the user types.
/// Returns the message for that field, if any.
pub fn validate_field(
    descriptor: &EventTypeDescriptor,
    path: &FieldPath,
    payload: &Map<String, Value>,
) -> Option<String> {
    validate_field_on(descriptor, path, payload, today())
}

pub fn validate_field_on(
    descriptor: &EventTypeDescriptor,
    path: &FieldPath,
    payload: &Map<String, Value>,
    today: NaiveDate,
) -> Option<String> {
    let spec = descriptor.spec_at(path)?;
    let value = path.lookup(payload);
    if is_blank(value) {
        let required =
            spec.required && !inside_untouched_optional_group(descriptor, path, payload);
        return required.then(|| FIELD_REQUIRED.to_string());
    }
    let value = value?;
    match &spec.kind {
        FieldKind::List { min_items, .. } => match value.as_array() {
            Some(items) if items.len() < *min_items => Some(min_items_message(*min_items)),
            Some(_) => None,
            None => Some("expected a list".to_string()),
        },
        FieldKind::Group(_) => (!value.is_object()).then(|| "expected an object".to_string()),
        kind => check_leaf(kind, value, today).err(),
    }
}

fn inside_untouched_optional_group(
    descriptor: &EventTypeDescriptor,
    path: &FieldPath,
    payload: &Map<String, Value>,
) -> bool {
    path.ancestors().any(|ancestor| {
        let optional_group = descriptor
            .spec_at(&ancestor)
            .is_some_and(|spec| !spec.required && matches!(spec.kind, FieldKind::Group(_)));
        optional_group && ancestor.lookup(payload).map_or(true, is_empty_value)
    })
}

fn validate_fields(
    specs: &[FieldSpec],
    object: &Map<String, Value>,
    base: &FieldPath,
    today: NaiveDate,
    errors: &mut FieldErrors,
) -> TypedPayload {
    let mut typed = TypedPayload::new();
    for spec in specs {
        let path = base.key(spec.name);
        if let Some(value) = check_field(spec, object.get(spec.name), &path, today, errors) {
            typed.insert(spec.name, value);
        }
    }
    typed
}

fn check_field(
    spec: &FieldSpec,
    value: Option<&Value>,
    path: &FieldPath,
    today: NaiveDate,
    errors: &mut FieldErrors,
) -> Option<TypedValue> {
    if is_blank(value) {
        if spec.required {
            errors.insert(path.to_string(), FIELD_REQUIRED);
        }
        return None;
    }
    let value = value?;

    match &spec.kind {
        FieldKind::List { item, min_items } => {
            let Some(items) = value.as_array() else {
                errors.insert(path.to_string(), "expected a list");
                return None;
            };
            if items.len() < *min_items {
                errors.insert(path.to_string(), min_items_message(*min_items));
            }
            let mut typed_items = Vec::with_capacity(items.len());
            for (idx, entry) in items.iter().enumerate() {
                let item_path = path.index(idx);
                match entry.as_object() {
                    Some(object) => {
                        typed_items.push(validate_fields(item, object, &item_path, today, errors))
                    }
                    None => errors.insert(item_path.to_string(), "expected an object"),
                }
            }
            Some(TypedValue::List(typed_items))
        }
        FieldKind::Group(fields) => {
            let Some(object) = value.as_object() else {
                errors.insert(path.to_string(), "expected an object");
                return None;
            };
            // An optional block left untouched counts as absent
            if !spec.required && object.values().all(is_empty_value) {
                return None;
            }
            Some(TypedValue::Group(validate_fields(
                fields, object, path, today, errors,
            )))
        }
        kind => match check_leaf(kind, value, today) {
            Ok(typed) => Some(typed),
            Err(message) => {
                errors.insert(path.to_string(), message);
                None
            }
        },
    }
}

/// Absent, null, or a string with nothing but whitespace
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.values().all(is_empty_value),
        Value::Array(items) => items.is_empty(),
        other => is_blank(Some(other)),
    }
}

fn min_items_message(n: usize) -> String {
    if n == 1 {
        "at least 1 item required".to_string()
    } else {
        format!("at least {n} items required")
    }
}

/// Scalar representation of a JSON value as typed by the user
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn check_leaf(kind: &FieldKind, value: &Value, today: NaiveDate) -> Result<TypedValue, String> {
    match kind {
        FieldKind::Text {
            min_len,
            max_len,
            format,
            ..
        } => {
            let text = scalar_text(value).ok_or_else(|| "expected text".to_string())?;
            let len = text.chars().count();
            if let Some(min) = min_len {
                if len < *min {
                    return Err(format!("must be at least {min} characters"));
                }
            }
            if let Some(max) = max_len {
                if len > *max {
                    return Err(format!("must be at most {max} characters"));
                }
            }
            if let Some(format) = format {
                if !format.matches(&text) {
                    return Err(format!("invalid format: expected {}", format.hint()));
                }
            }
            Ok(TypedValue::Text(text))
        }
        FieldKind::Number(rule) => check_number(rule, value).map(TypedValue::Number),
        FieldKind::Date(bound) => {
            let date = parse_date(value)
                .ok_or_else(|| "invalid date (expected YYYY-MM-DD)".to_string())?;
            match bound {
                Some(bound) if !bound.admits(date, today) => Err(bound.message().to_string()),
                _ => Ok(TypedValue::Date(date)),
            }
        }
        FieldKind::Choice(allowed) => {
            let text = scalar_text(value).ok_or_else(|| "expected one option".to_string())?;
            if allowed.contains(&text.as_str()) {
                Ok(TypedValue::Choice(text))
            } else {
                Err(format!("must be one of: {}", allowed.join(", ")))
            }
        }
        FieldKind::List { .. } | FieldKind::Group(_) => Err("unexpected container".to_string()),
    }
}

fn check_number(rule: &NumberRule, value: &Value) -> Result<f64, String> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
    .ok_or_else(|| "must be a number".to_string())?;

    if !number.is_finite() {
        return Err("must be a finite number".to_string());
    }
    if rule.integer && number.fract() != 0.0 {
        return Err("must be an integer".to_string());
    }
    if rule.non_negative && number < 0.0 {
        return Err("must be >= 0".to_string());
    }
    if let Some(min) = rule.min {
        if number < min {
            return Err(format!("must be >= {min}"));
        }
    }
    if let Some(max) = rule.max {
        if number > max {
            return Err(format!("must be <= {max}"));
        }
    }
    Ok(number)
}

/// Decimal typed by the user, `1500.50`, `1500,50` or `1.500,50`. The last
/// of `,` and `.` is the decimal mark and the other one groups thousands.
fn parse_decimal(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let normalized = match (raw.rfind(','), raw.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => raw.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => raw.replace(',', ""),
        (Some(_), None) => raw.replace(',', "."),
        _ => raw.to_string(),
    };
    normalized.parse().ok()
}

/// `YYYY-MM-DD`, or an RFC 3339 timestamp truncated to its date
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    let raw = value.as_str()?.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn apply_rule(rule: &CrossFieldRule, typed: &TypedPayload, errors: &mut FieldErrors) {
    match rule {
        CrossFieldRule::DateOrder { start, end } => {
            let start_date = typed.get_path(start).and_then(TypedValue::as_date);
            let end_date = typed.get_path(end).and_then(TypedValue::as_date);
            if let (Some(s), Some(e)) = (start_date, end_date) {
                if e < s {
                    errors.insert(*end, format!("must be on or after {start}"));
                }
            }
        }
        CrossFieldRule::PeriodOrder { start, end } => {
            let start_period = typed.get_path(start).and_then(TypedValue::as_str);
            let end_period = typed.get_path(end).and_then(TypedValue::as_str);
            // YYYY-MM sorts chronologically as text
            if let (Some(s), Some(e)) = (start_period, end_period) {
                if e < s {
                    errors.insert(*end, format!("must be on or after {start}"));
                }
            }
        }
        CrossFieldRule::UniqueWithin { list, key } => {
            let Some(TypedValue::List(items)) = typed.get_path(list) else {
                return;
            };
            let mut seen = HashSet::new();
            for (idx, item) in items.iter().enumerate() {
                if let Some(value) = item.get(key).and_then(TypedValue::as_str) {
                    if !seen.insert(value.to_string()) {
                        errors.insert(format!("{list}[{idx}].{key}"), "duplicate value");
                    }
                }
            }
        }
        CrossFieldRule::InscriptionNumber { kind, number } => {
            let kind_value = typed.get_path(kind).and_then(TypedValue::as_str);
            let number_value = typed.get_path(number).and_then(TypedValue::as_str);
            let (Some(kind_value), Some(number_value)) = (kind_value, number_value) else {
                return;
            };
            let digits = number_value.chars().all(|c| c.is_ascii_digit());
            let len = number_value.chars().count();
            let ok = match kind_value {
                "1" => digits && len == 14,
                "2" => digits && len == 11,
                "3" | "4" => len >= 8,
                _ => true,
            };
            if !ok {
                errors.insert(
                    *number,
                    format!("invalid inscription number for tpInsc {kind_value}"),
                );
            }
        }
    }
}
