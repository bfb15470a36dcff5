//! Field groups shared by several event types

use crate::schema::field::{FieldSpec, TextFormat};
use once_cell::sync::Lazy;
use regex::Regex;

/// Receipt number issued for a transmitted event (`1.2.0000000000000000001`)
pub static RECIBO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d\.\d\.\d{19}$").expect("recibo regex"));
static CID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]\d{2}(\.\d{1,2})?$").expect("cid regex"));
static CRM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4,10}$").expect("crm regex"));

pub const RECIBO: TextFormat = TextFormat::Pattern {
    regex: &RECIBO_RE,
    hint: "a receipt number like 1.2.0000000000000000001",
    example: "1.2.0000000000000000001",
};

pub const CID: TextFormat = TextFormat::Pattern {
    regex: &CID_RE,
    hint: "a CID-10 code like M54.5",
    example: "M54.5",
};

pub const CRM: TextFormat = TextFormat::Pattern {
    regex: &CRM_RE,
    hint: "4 to 10 digits",
    example: "123456",
};

pub const INSCRIPTION_TYPES: &[&str] = &["1", "2", "3", "4"];
pub const SEXO: &[&str] = &["M", "F"];
pub const YES_NO: &[&str] = &["S", "N"];

pub const DISMISSAL_REASONS: &[&str] = &[
    "TERMINO_CONTRATO",
    "PEDIDO_DEMISSAO",
    "RESCISAO_SEM_JUSTA_CAUSA",
    "RESCISAO_COM_JUSTA_CAUSA",
    "RESCISAO_ACORDO",
    "FALECIMENTO",
    "OUTROS",
];

pub fn cpf() -> FieldSpec {
    FieldSpec::text("cpf", "CPF do trabalhador")
        .required()
        .format(TextFormat::Cpf)
}

pub fn observacao() -> FieldSpec {
    FieldSpec::text("observacao", "Observação")
        .max_len(1000)
        .multiline()
}

pub fn per_apur() -> FieldSpec {
    FieldSpec::text("perApur", "Período de apuração")
        .required()
        .format(TextFormat::YearMonth)
}

pub fn salario(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec::number(name, label).non_negative()
}

/// Address block used for workplaces, exam sites and accident locations
pub fn local(name: &'static str, label: &'static str, with_name: bool) -> FieldSpec {
    let mut fields = vec![FieldSpec::text("tipo", "Tipo de local").required()];
    if with_name {
        fields.push(
            FieldSpec::text("nome", "Nome do local")
                .required()
                .max_len(100),
        );
    }
    fields.extend([
        FieldSpec::text("endereco", "Endereço")
            .required()
            .max_len(200),
        FieldSpec::text("cep", "CEP")
            .required()
            .format(TextFormat::Cep),
        FieldSpec::text("municipio", "Município")
            .required()
            .max_len(100),
        FieldSpec::text("uf", "UF")
            .required()
            .format(TextFormat::Uf),
    ]);
    FieldSpec::group(name, label, fields)
}

pub fn medico(name: &'static str) -> FieldSpec {
    FieldSpec::group(
        name,
        "Médico responsável",
        vec![
            FieldSpec::text("nome", "Nome").required().max_len(70),
            FieldSpec::text("crm", "CRM").required().format(CRM),
            FieldSpec::text("uf", "UF do CRM")
                .required()
                .format(TextFormat::Uf),
        ],
    )
}

/// Employer identification with an inscription-type dependent number
pub fn inscricao() -> [FieldSpec; 2] {
    [
        FieldSpec::choice("tpInsc", "Tipo de inscrição", INSCRIPTION_TYPES)
            .required()
            .help("1 CNPJ, 2 CPF, 3 CAEPF, 4 CNO"),
        FieldSpec::text("nrInsc", "Número de inscrição").required(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_examples_match() {
        for format in [RECIBO, CID, CRM] {
            assert!(format.matches(&format.example()), "{}", format.hint());
        }
        assert!(!RECIBO.matches("1.2.123"));
        assert!(!CID.matches("m54"));
    }
}
