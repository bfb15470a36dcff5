//! Employment bond events: admission, changes, notice, termination, beneficiaries

use super::common::{cpf, local, observacao, salario, DISMISSAL_REASONS, SEXO};
use crate::schema::descriptor::EventTypeDescriptor;
use crate::schema::field::{CrossFieldRule, FieldSpec, TextFormat};

const CHANGE_TYPES: &[&str] = &["SALARIO", "CARGO", "JORNADA", "LOCAL", "OUTROS"];
const WORKDAY_TYPES: &[&str] = &["INTEGRAL", "PARCIAL", "12X36"];
const NON_EMPLOYEE_TYPES: &[&str] = &[
    "701", "711", "712", "721", "722", "723", "731", "741", "751", "761", "771", "781", "901",
    "902", "903",
];

const BENEFIT_TABLE: &str = "\
Tabela 25 - Tipos de benefício
0101 Aposentadoria por idade e tempo de contribuição
0102 Aposentadoria por idade
0103 Aposentadoria por tempo de contribuição
0201 Aposentadoria especial
0301 Aposentadoria por invalidez
0401 Pensão por morte
0501 Auxílio-doença
0601 Salário-maternidade
0701 Reforma militar
0801 Benefício de assistência social";

fn cadastro(with_dates: bool) -> Vec<FieldSpec> {
    let mut fields = vec![
        cpf(),
        FieldSpec::text("nome", "Nome completo").required().max_len(70),
        FieldSpec::date("dataNascimento", "Data de nascimento").required(),
        FieldSpec::text("categoriaTrabalhador", "Categoria do trabalhador")
            .required()
            .format(TextFormat::Digits(3))
            .help("104 para empregado doméstico"),
        FieldSpec::text("pis", "NIS/PIS").format(TextFormat::Pis),
        FieldSpec::text("carteiraTrabalho", "Número da CTPS").max_len(11),
        FieldSpec::text("serieCarteiraTrabalho", "Série da CTPS").max_len(5),
        FieldSpec::text("ufCarteiraTrabalho", "UF da CTPS").format(TextFormat::Uf),
    ];
    if with_dates {
        fields.push(FieldSpec::date("dataAdmissao", "Data de admissão").required());
    }
    fields.extend([
        FieldSpec::choice("tipoInscricao", "Tipo de inscrição do empregador", &["1", "2"])
            .required(),
        FieldSpec::text("cargo", "Cargo").required().max_len(100),
        salario("salario", "Salário").required(),
    ]);
    fields
}

pub fn s2200() -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        "S-2200",
        "Cadastramento inicial do vínculo e admissão",
        cadastro(true),
    )
    .rule(CrossFieldRule::DateOrder {
        start: "dataNascimento",
        end: "dataAdmissao",
    })
}

pub fn s2205() -> EventTypeDescriptor {
    let mut fields = cadastro(false);
    fields.extend([
        FieldSpec::date("dataAlteracao", "Data da alteração").required(),
        FieldSpec::text("motivoAlteracao", "Motivo da alteração")
            .required()
            .max_len(200),
    ]);
    EventTypeDescriptor::new("S-2205", "Alteração de dados cadastrais do trabalhador", fields)
}

pub fn s2206() -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        "S-2206",
        "Alteração de contrato de trabalho",
        vec![
            cpf(),
            FieldSpec::date("dataAlteracao", "Data da alteração").required(),
            FieldSpec::choice("tipoAlteracao", "Tipo de alteração", CHANGE_TYPES).required(),
            FieldSpec::text("motivoAlteracao", "Motivo")
                .required()
                .max_len(200),
            FieldSpec::text("cargo", "Cargo").max_len(100),
            salario("salario", "Salário"),
            FieldSpec::group(
                "jornadaTrabalho",
                "Jornada de trabalho",
                vec![
                    FieldSpec::choice("tipo", "Tipo de jornada", WORKDAY_TYPES).required(),
                    FieldSpec::number("cargaHoraria", "Carga horária semanal")
                        .required()
                        .integer()
                        .range(1.0, 44.0),
                    FieldSpec::text("horarioInicio", "Início").format(TextFormat::HourMinute),
                    FieldSpec::text("horarioFim", "Fim").format(TextFormat::HourMinute),
                ],
            ),
            local("localTrabalho", "Local de trabalho", false),
        ],
    )
}

pub fn s2250() -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        "S-2250",
        "Aviso prévio",
        vec![
            cpf(),
            FieldSpec::date("dataAviso", "Data do aviso").required(),
            FieldSpec::date("dataInicioAviso", "Início do aviso").required(),
            FieldSpec::date("dataFimAviso", "Fim do aviso").required(),
            FieldSpec::choice("tipoAviso", "Tipo de aviso", &["1", "2"])
                .required()
                .help("1 dado pelo trabalhador, 2 dado pelo empregador"),
            FieldSpec::text("codigoMotivoAviso", "Código do motivo")
                .required()
                .format(TextFormat::Digits(2)),
            FieldSpec::text("motivoAviso", "Motivo").max_len(200),
            FieldSpec::date("dataDesligamento", "Data prevista do desligamento"),
            FieldSpec::group(
                "indenizacao",
                "Indenização",
                vec![
                    salario("valor", "Valor").required(),
                    FieldSpec::date("dataPagamento", "Data do pagamento").required(),
                ],
            ),
            observacao(),
        ],
    )
    .rule(CrossFieldRule::DateOrder {
        start: "dataInicioAviso",
        end: "dataFimAviso",
    })
    .rule(CrossFieldRule::DateOrder {
        start: "dataAviso",
        end: "dataInicioAviso",
    })
}

fn desligamento(code: &'static str, description: &'static str) -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        code,
        description,
        vec![
            cpf(),
            FieldSpec::date("dataDesligamento", "Data do desligamento").required(),
            FieldSpec::choice("motivoDesligamento", "Motivo", DISMISSAL_REASONS).required(),
            observacao(),
        ],
    )
}

pub fn s2299() -> EventTypeDescriptor {
    desligamento("S-2299", "Desligamento")
}

pub fn s2300() -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        "S-2300",
        "Trabalhador sem vínculo de emprego - início",
        vec![
            cpf(),
            FieldSpec::text("nome", "Nome completo").required().max_len(70),
            FieldSpec::date("dataNascimento", "Data de nascimento").required(),
            FieldSpec::choice("sexo", "Sexo", SEXO).required(),
            FieldSpec::text("pis", "NIS/PIS").format(TextFormat::Pis),
            FieldSpec::date("dataInicio", "Início").required(),
            FieldSpec::date("dataFim", "Fim"),
            FieldSpec::choice("tipoTrabalhador", "Categoria", NON_EMPLOYEE_TYPES).required(),
            FieldSpec::text("cargo", "Cargo").max_len(100),
            salario("valorHora", "Valor da hora"),
            FieldSpec::number("cargaHoraria", "Carga horária semanal")
                .integer()
                .range(1.0, 44.0),
            observacao(),
        ],
    )
    .rule(CrossFieldRule::DateOrder {
        start: "dataInicio",
        end: "dataFim",
    })
}

pub fn s2399() -> EventTypeDescriptor {
    desligamento("S-2399", "Trabalhador sem vínculo de emprego - término")
}

pub fn s2400() -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        "S-2400",
        "Cadastro de beneficiário - entes públicos",
        vec![
            cpf(),
            FieldSpec::text("nome", "Nome do beneficiário")
                .required()
                .max_len(70),
            FieldSpec::date("dataNascimento", "Data de nascimento").required(),
            FieldSpec::date("dataInicioBeneficio", "Início do benefício").required(),
            FieldSpec::text("tipoBeneficio", "Tipo de benefício")
                .required()
                .max_len(4)
                .help("Código da tabela 25, ver notas"),
            salario("valorBeneficio", "Valor do benefício"),
            observacao(),
        ],
    )
    .notes(BENEFIT_TABLE)
    .rule(CrossFieldRule::DateOrder {
        start: "dataNascimento",
        end: "dataInicioBeneficio",
    })
}
