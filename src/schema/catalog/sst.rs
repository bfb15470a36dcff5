//! Occupational health and safety events

use super::common::{cpf, local, medico, observacao, CID, YES_NO};
use crate::schema::descriptor::EventTypeDescriptor;
use crate::schema::field::{CrossFieldRule, FieldSpec, TextFormat};

const ACCIDENT_TYPES: &[&str] = &["1", "2", "3"];
const SIDES: &[&str] = &["E", "D", "A"];
const EXAM_TYPES: &[&str] = &[
    "ADMISSIONAL",
    "PERIODICO",
    "RETORNO_TRABALHO",
    "MUDANCA_FUNCAO",
    "DEMISSIONAL",
    "MONITORACAO_PONTUAL",
];
const EXAM_RESULTS: &[&str] = &["A", "I", "R"];

pub fn s2210() -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        "S-2210",
        "Comunicação de acidente de trabalho",
        vec![
            cpf(),
            FieldSpec::date("dataAcidente", "Data do acidente").required(),
            FieldSpec::text("horaAcidente", "Hora do acidente")
                .required()
                .format(TextFormat::HourMinute),
            FieldSpec::choice("tipoAcidente", "Tipo de acidente", ACCIDENT_TYPES)
                .required()
                .help("1 típico, 2 doença, 3 trajeto"),
            local("localAcidente", "Local do acidente", false).required(),
            FieldSpec::group(
                "parteAtingida",
                "Parte do corpo atingida",
                vec![
                    FieldSpec::text("codigo", "Código").required(),
                    FieldSpec::choice("lateralidade", "Lateralidade", SIDES).required(),
                ],
            )
            .required(),
            FieldSpec::group(
                "agenteCausador",
                "Agente causador",
                vec![FieldSpec::text("codigo", "Código").required()],
            )
            .required(),
            observacao(),
        ],
    )
}

pub fn s2220() -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        "S-2220",
        "Monitoramento da saúde do trabalhador",
        vec![
            cpf(),
            FieldSpec::date("dataExame", "Data do exame").required(),
            FieldSpec::choice("tipoExame", "Tipo de exame", EXAM_TYPES).required(),
            FieldSpec::choice("resultadoExame", "Resultado", EXAM_RESULTS)
                .required()
                .help("A apto, I inapto, R apto com restrições"),
            medico("medico").required(),
            local("localExame", "Local do exame", true),
            FieldSpec::group(
                "aso",
                "Atestado de saúde ocupacional",
                vec![
                    FieldSpec::text("numero", "Número").required().max_len(20),
                    FieldSpec::date("dataEmissao", "Emissão").required(),
                ],
            )
            .required(),
            FieldSpec::list(
                "restricoes",
                "Restrições",
                vec![
                    FieldSpec::text("codigo", "Código").required(),
                    FieldSpec::text("descricao", "Descrição").max_len(200),
                ],
            ),
            observacao(),
        ],
    )
    .rule(CrossFieldRule::DateOrder {
        start: "dataExame",
        end: "aso.dataEmissao",
    })
}

pub fn s2230() -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        "S-2230",
        "Afastamento temporário",
        vec![
            cpf(),
            FieldSpec::date("dataInicioAfastamento", "Início do afastamento").required(),
            FieldSpec::date("dataFimAfastamento", "Fim do afastamento"),
            FieldSpec::text("codigoMotivoAfastamento", "Código do motivo")
                .required()
                .format(TextFormat::Digits(2)),
            FieldSpec::text("motivoAfastamento", "Motivo").max_len(200),
            FieldSpec::group(
                "cid",
                "CID",
                vec![
                    FieldSpec::text("codigo", "Código").required().format(CID),
                    FieldSpec::text("descricao", "Descrição").max_len(200),
                ],
            ),
            FieldSpec::group(
                "atestadoMedico",
                "Atestado médico",
                vec![
                    FieldSpec::text("numero", "Número").required(),
                    FieldSpec::date("dataEmissao", "Emissão").required(),
                    medico("medico").required(),
                ],
            ),
            FieldSpec::group(
                "acidenteTrabalho",
                "Acidente de trabalho",
                vec![
                    FieldSpec::choice("ocorreu", "Decorre de acidente", YES_NO).required(),
                    FieldSpec::text("numeroCat", "Número da CAT").max_len(40),
                    FieldSpec::date("dataAcidente", "Data do acidente"),
                ],
            ),
            observacao(),
        ],
    )
    .rule(CrossFieldRule::DateOrder {
        start: "dataInicioAfastamento",
        end: "dataFimAfastamento",
    })
}

pub fn s2240() -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        "S-2240",
        "Condições ambientais do trabalho - agentes nocivos",
        vec![
            cpf(),
            FieldSpec::date("dataInicioCondicao", "Início da condição")
                .required()
                .not_future(),
            FieldSpec::date("dataFimCondicao", "Fim da condição")
                .required()
                .not_future(),
            FieldSpec::text("tipoCondicao", "Tipo de condição").required(),
            FieldSpec::text("codigoCondicao", "Código da condição").required(),
            local("localCondicao", "Local da condição", true).required(),
            FieldSpec::list(
                "agenteRisco",
                "Agentes de risco",
                vec![
                    FieldSpec::text("codigo", "Código").required(),
                    FieldSpec::text("descricao", "Descrição")
                        .required()
                        .max_len(200),
                    FieldSpec::text("intensidade", "Intensidade").required(),
                    FieldSpec::text("unidade", "Unidade").required(),
                    FieldSpec::text("tecnicaUtilizada", "Técnica utilizada")
                        .required()
                        .max_len(100),
                    FieldSpec::date("dataMedicao", "Data da medição")
                        .required()
                        .not_future(),
                ],
            )
            .required()
            .min_items(1),
            FieldSpec::list(
                "epi",
                "EPIs",
                vec![
                    FieldSpec::text("codigo", "Código").required(),
                    FieldSpec::text("descricao", "Descrição")
                        .required()
                        .max_len(200),
                    FieldSpec::text("ca", "CA").required().max_len(20),
                    FieldSpec::date("dataValidade", "Validade")
                        .required()
                        .future(),
                ],
            ),
            observacao(),
        ],
    )
    .rule(CrossFieldRule::DateOrder {
        start: "dataInicioCondicao",
        end: "dataFimCondicao",
    })
}
