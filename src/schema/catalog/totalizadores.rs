//! Exclusion and totalizer events (S-3000, S-5000 series)

use super::common::{cpf, inscricao, observacao, per_apur, RECIBO};
use crate::schema::descriptor::EventTypeDescriptor;
use crate::schema::field::{CrossFieldRule, FieldSpec};

/// Events that may be excluded through S-3000
const EXCLUDABLE: &[&str] = &[
    "S-1200", "S-1202", "S-1207", "S-1210", "S-2200", "S-2205", "S-2206", "S-2210", "S-2220",
    "S-2230", "S-2240", "S-2250", "S-2299", "S-2300", "S-2399", "S-2400",
];

pub fn s3000() -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        "S-3000",
        "Exclusão de eventos",
        vec![
            FieldSpec::choice("tipoEventoExcluido", "Evento a excluir", EXCLUDABLE).required(),
            FieldSpec::text("protocoloEventoExcluido", "Recibo do evento")
                .required()
                .format(RECIBO),
            FieldSpec::date("dataExclusao", "Data da exclusão").required(),
            FieldSpec::text("justificativa", "Justificativa")
                .required()
                .min_len(10)
                .max_len(500)
                .multiline(),
            observacao(),
        ],
    )
}

fn recibo_base() -> FieldSpec {
    FieldSpec::text("nrRecArqBase", "Recibo do arquivo de origem")
        .required()
        .format(RECIBO)
}

fn valor(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec::number(name, label).required().non_negative()
}

/// Per-worker totalizer returned after a payroll event is processed
fn por_trabalhador(
    code: &'static str,
    description: &'static str,
    values: [FieldSpec; 2],
) -> EventTypeDescriptor {
    let mut fields = vec![cpf(), per_apur(), recibo_base()];
    fields.extend(values);
    EventTypeDescriptor::new(code, description, fields)
}

/// Per-employer consolidation of the period
fn por_contribuinte(
    code: &'static str,
    description: &'static str,
    values: Vec<FieldSpec>,
) -> EventTypeDescriptor {
    let mut fields = inscricao().to_vec();
    fields.extend([per_apur(), recibo_base()]);
    fields.extend(values);
    fields.push(observacao());
    EventTypeDescriptor::new(code, description, fields).rule(CrossFieldRule::InscriptionNumber {
        kind: "tpInsc",
        number: "nrInsc",
    })
}

pub fn s5001() -> EventTypeDescriptor {
    por_trabalhador(
        "S-5001",
        "Contribuições sociais por trabalhador",
        [
            valor("baseCalculo", "Base de cálculo"),
            valor("valorContribuicao", "Contribuição devida"),
        ],
    )
}

pub fn s5002() -> EventTypeDescriptor {
    por_trabalhador(
        "S-5002",
        "Imposto de renda retido na fonte por trabalhador",
        [
            valor("baseIrrf", "Base do IRRF"),
            valor("valorIrrf", "IRRF retido"),
        ],
    )
}

pub fn s5003() -> EventTypeDescriptor {
    por_trabalhador(
        "S-5003",
        "FGTS por trabalhador",
        [
            valor("baseFgts", "Base do FGTS"),
            valor("valorFgts", "FGTS devido"),
        ],
    )
}

pub fn s5011() -> EventTypeDescriptor {
    por_contribuinte(
        "S-5011",
        "Contribuições sociais consolidadas por contribuinte",
        vec![
            valor("totalBase", "Base de cálculo total"),
            valor("totalContribuicao", "Contribuição total"),
        ],
    )
}

pub fn s5012() -> EventTypeDescriptor {
    por_contribuinte(
        "S-5012",
        "IRRF consolidado por contribuinte",
        vec![valor("totalIrrf", "IRRF total")],
    )
}

pub fn s5013() -> EventTypeDescriptor {
    por_contribuinte(
        "S-5013",
        "FGTS consolidado por contribuinte",
        vec![
            valor("totalBaseFgts", "Base do FGTS total"),
            valor("totalFgts", "FGTS total"),
        ],
    )
}
