//! Registered household-employer event types

mod common;
mod empregador;
mod folha;
mod sst;
mod totalizadores;
mod vinculo;

use super::descriptor::EventTypeDescriptor;

/// Every event type the registry knows about, in catalog order
pub fn all() -> Vec<EventTypeDescriptor> {
    vec![
        empregador::s1000(),
        folha::s1200(),
        folha::s1202(),
        folha::s1207(),
        folha::s1210(),
        vinculo::s2200(),
        vinculo::s2205(),
        vinculo::s2206(),
        sst::s2210(),
        sst::s2220(),
        sst::s2230(),
        sst::s2240(),
        vinculo::s2250(),
        vinculo::s2299(),
        vinculo::s2300(),
        vinculo::s2399(),
        vinculo::s2400(),
        totalizadores::s3000(),
        totalizadores::s5001(),
        totalizadores::s5002(),
        totalizadores::s5003(),
        totalizadores::s5011(),
        totalizadores::s5012(),
        totalizadores::s5013(),
    ]
}

/// Well-formed payload filling every field of a descriptor
#[cfg(test)]
pub(crate) fn sample_payload(
    descriptor: &EventTypeDescriptor,
) -> serde_json::Map<String, serde_json::Value> {
    use super::field::{CrossFieldRule, TextFormat};
    use super::path::FieldPath;
    use serde_json::json;

    let mut payload = fixtures::sample_object(&descriptor.fields);
    for rule in &descriptor.rules {
        if let CrossFieldRule::InscriptionNumber { kind, number } = rule {
            if let (Some(kind), Some(number)) = (FieldPath::parse(kind), FieldPath::parse(number)) {
                kind.set(&mut payload, json!("1"));
                number.set(&mut payload, json!(TextFormat::Cnpj.example()));
            }
        }
    }
    payload
}

#[cfg(test)]
mod fixtures {
    use crate::schema::field::{DateBound, FieldKind, FieldSpec};
    use serde_json::{json, Map, Value};

    pub fn sample_object(fields: &[FieldSpec]) -> Map<String, Value> {
        fields
            .iter()
            .map(|spec| (spec.name.to_string(), sample_value(spec)))
            .collect()
    }

    fn sample_value(spec: &FieldSpec) -> Value {
        match &spec.kind {
            FieldKind::Text {
                min_len, format, ..
            } => match format {
                Some(format) => json!(format.example()),
                None => json!("x".repeat(min_len.unwrap_or(1))),
            },
            FieldKind::Number(rule) => json!(rule.min.unwrap_or(0.0)),
            FieldKind::Date(Some(DateBound::Future)) => {
                let next_year = chrono::Local::now().date_naive() + chrono::Days::new(365);
                json!(next_year.format("%Y-%m-%d").to_string())
            }
            FieldKind::Date(_) => json!("2025-01-10"),
            FieldKind::Choice(allowed) => json!(allowed[0]),
            FieldKind::List { item, .. } => json!([Value::Object(sample_object(item))]),
            FieldKind::Group(inner) => Value::Object(sample_object(inner)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::field::{FieldKind, FieldSpec};
    use crate::schema::outcome::FIELD_REQUIRED;
    use crate::schema::path::FieldPath;
    use crate::schema::validate::validate_payload;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Map, Value};
    use std::collections::HashSet;

    fn required_paths(fields: &[FieldSpec], base: &FieldPath, out: &mut Vec<FieldPath>) {
        for spec in fields {
            let path = base.key(spec.name);
            if spec.required {
                out.push(path.clone());
            }
            match &spec.kind {
                // Emptying a one-field optional group makes the whole group absent
                FieldKind::Group(inner) if !spec.required && inner.len() == 1 => {}
                FieldKind::Group(inner) => required_paths(inner, &path, out),
                FieldKind::List { item, .. } => required_paths(item, &path.index(0), out),
                _ => {}
            }
        }
    }

    fn non_negative_paths(fields: &[FieldSpec], base: &FieldPath, out: &mut Vec<FieldPath>) {
        for spec in fields {
            let path = base.key(spec.name);
            match &spec.kind {
                FieldKind::Number(rule) if rule.non_negative => out.push(path),
                FieldKind::Group(inner) => non_negative_paths(inner, &path, out),
                FieldKind::List { item, .. } => non_negative_paths(item, &path.index(0), out),
                _ => {}
            }
        }
    }

    fn remove_at(payload: &mut Map<String, Value>, path: &FieldPath) {
        let name = path.to_string();
        let leaf = name.rsplit('.').next().unwrap_or(&name).to_string();
        match path.ancestors().last() {
            None => {
                payload.remove(&leaf);
            }
            Some(parent) => {
                if let Some(Value::Object(map)) = parent.entry(payload) {
                    map.remove(&leaf);
                }
            }
        }
    }

    #[test]
    fn test_catalog_codes_are_unique() {
        let descriptors = all();
        let codes: HashSet<_> = descriptors.iter().map(|d| d.code).collect();
        assert_eq!(codes.len(), descriptors.len());
        assert_eq!(descriptors.len(), 24);
    }

    #[test]
    fn test_well_formed_payloads_are_valid() {
        for descriptor in all() {
            let outcome = validate_payload(&descriptor, &sample_payload(&descriptor));
            assert!(
                outcome.is_valid(),
                "{}: {:?}",
                descriptor.code,
                outcome.errors()
            );
        }
    }

    #[test]
    fn test_omitting_a_required_field_names_only_that_field() {
        for descriptor in all() {
            let mut paths = Vec::new();
            required_paths(&descriptor.fields, &FieldPath::root(), &mut paths);
            for path in paths {
                let mut payload = sample_payload(&descriptor);
                remove_at(&mut payload, &path);
                let outcome = validate_payload(&descriptor, &payload);
                let errors = outcome.errors().unwrap_or_else(|| {
                    panic!("{} without {path} should be invalid", descriptor.code)
                });
                assert_eq!(
                    errors.iter().collect::<Vec<_>>(),
                    vec![(path.to_string().as_str(), FIELD_REQUIRED)],
                    "{}",
                    descriptor.code
                );
            }
        }
    }

    #[test]
    fn test_negative_values_rejected_for_non_negative_fields_only() {
        let mut nested = 0;
        for descriptor in all() {
            let mut paths = Vec::new();
            non_negative_paths(&descriptor.fields, &FieldPath::root(), &mut paths);
            for path in paths {
                let name = path.to_string();
                if name.contains('[') || name.contains('.') {
                    nested += 1;
                }
                let mut payload = sample_payload(&descriptor);
                assert!(path.set(&mut payload, json!(-1)), "{}: no slot for {name}", descriptor.code);
                let outcome = validate_payload(&descriptor, &payload);
                let errors = outcome
                    .errors()
                    .unwrap_or_else(|| panic!("{}: negative {name} accepted", descriptor.code));
                assert_eq!(
                    errors.iter().collect::<Vec<_>>(),
                    vec![(name.as_str(), "must be >= 0")],
                    "{}",
                    descriptor.code
                );
            }
        }
        assert!(nested > 0, "no non-negative field inside a group or list");
    }

    #[test]
    fn test_benefit_table_is_documentation_only() {
        let s2400 = vinculo::s2400();
        assert!(s2400.notes.is_some_and(|n| n.contains("0401")));
        let tipo = s2400
            .spec_at(&FieldPath::field("tipoBeneficio"))
            .unwrap();
        assert!(matches!(tipo.kind, FieldKind::Text { .. }));

        let mut payload = sample_payload(&s2400);
        payload.insert("tipoBeneficio".to_string(), json!("9999"));
        assert!(validate_payload(&s2400, &payload).is_valid());
    }

    #[test]
    fn test_s1202_duplicate_demonstrativo() {
        let s1202 = folha::s1202();
        let mut payload = sample_payload(&s1202);
        let item = payload["dmDev"][0].clone();
        payload.insert("dmDev".to_string(), json!([item.clone(), item]));
        let outcome = validate_payload(&s1202, &payload);
        assert_eq!(
            outcome.errors().unwrap().get("dmDev[1].ideDmDev"),
            Some("duplicate value")
        );
    }

    #[test]
    fn test_s1202_inscription_depends_on_type() {
        let s1202 = folha::s1202();
        let mut payload = sample_payload(&s1202);
        payload["ideEmpregador"]["tpInsc"] = json!("2");
        let outcome = validate_payload(&s1202, &payload);
        assert_eq!(
            outcome.errors().unwrap().get("ideEmpregador.nrInsc"),
            Some("invalid inscription number for tpInsc 2")
        );
    }

    #[test]
    fn test_s2240_requires_a_risk_agent() {
        let s2240 = sst::s2240();
        let mut payload = sample_payload(&s2240);
        payload.insert("agenteRisco".to_string(), json!([]));
        payload.insert("epi".to_string(), json!([]));
        let outcome = validate_payload(&s2240, &payload);
        let errors = outcome.errors().unwrap();
        assert_eq!(errors.get("agenteRisco"), Some("at least 1 item required"));
        assert!(!errors.contains("epi"));
    }

    #[test]
    fn test_s2240_dates_are_bounded_by_today() {
        use crate::schema::validate::validate_payload_on;
        use chrono::NaiveDate;

        let s2240 = sst::s2240();
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut payload = sample_payload(&s2240);
        payload.insert("dataInicioCondicao".to_string(), json!("2025-01-10"));
        payload.insert("dataFimCondicao".to_string(), json!("2025-06-02"));
        FieldPath::parse("agenteRisco[0].dataMedicao")
            .unwrap()
            .set(&mut payload, json!("2025-07-01"));
        FieldPath::parse("epi[0].dataValidade")
            .unwrap()
            .set(&mut payload, json!("2025-06-01"));

        let outcome = validate_payload_on(&s2240, &payload, today);
        let errors = outcome.errors().unwrap();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![
                "dataFimCondicao",
                "agenteRisco[0].dataMedicao",
                "epi[0].dataValidade"
            ]
        );
        assert_eq!(errors.get("epi[0].dataValidade"), Some("must be a future date"));
    }
    #[test]
    fn test_s1000_validity_period_order() {
        let s1000 = empregador::s1000();
        let mut payload = sample_payload(&s1000);
        payload["ideEmpregador"]["iniValid"] = json!("2025-06");
        payload["ideEmpregador"]["fimValid"] = json!("2025-01");
        let outcome = validate_payload(&s1000, &payload);
        assert_eq!(
            outcome.errors().unwrap().iter().collect::<Vec<_>>(),
            vec![(
                "ideEmpregador.fimValid",
                "must be on or after ideEmpregador.iniValid"
            )]
        );

        payload["ideEmpregador"]["fimValid"] = json!("");
        assert!(validate_payload(&s1000, &payload).is_valid());
    }

    #[test]
    fn test_s1000_optional_blocks_may_stay_empty() {
        let s1000 = empregador::s1000();
        let mut payload = sample_payload(&s1000);
        for block in ["dadosIsencao", "infoOP", "infoOrgInternacional"] {
            payload.insert(block.to_string(), json!({}));
        }
        payload["infoCadastro"]["contApr"] = json!({});
        assert!(validate_payload(&s1000, &payload).is_valid());

        payload["ideEmpregador"]["tpInsc"] = json!("2");
        let outcome = validate_payload(&s1000, &payload);
        assert_eq!(
            outcome.errors().unwrap().get("ideEmpregador.nrInsc"),
            Some("invalid inscription number for tpInsc 2")
        );
    }
}
