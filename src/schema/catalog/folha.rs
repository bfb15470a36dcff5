//! Periodic payroll events (S-1200 series)

use super::common::{cpf, inscricao, observacao, per_apur, INSCRIPTION_TYPES, SEXO};
use crate::schema::descriptor::EventTypeDescriptor;
use crate::schema::field::{CrossFieldRule, FieldSpec, TextFormat};

const BENEFIT_TYPES: &[&str] = &[
    "APOSENTADORIA",
    "PENSAO_MORTE",
    "AUXILIO_DOENCA",
    "AUXILIO_ACIDENTE",
    "SALARIO_MATERNIDADE",
    "OUTROS",
];

const PAYMENT_TYPES: &[&str] = &["1", "2", "3", "5", "9"];
const ONE_OR_TWO: &[&str] = &["1", "2"];

pub fn s1200() -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        "S-1200",
        "Remuneração de trabalhador vinculado ao RGPS",
        vec![
            cpf(),
            FieldSpec::text("competencia", "Competência")
                .required()
                .format(TextFormat::YearMonth)
                .help("Mês/ano de referência"),
            FieldSpec::number("valorTotal", "Valor total da remuneração")
                .required()
                .non_negative(),
            FieldSpec::number("valorBaseINSS", "Base de cálculo do INSS").non_negative(),
            FieldSpec::number("valorBaseIRRF", "Base de cálculo do IRRF").non_negative(),
            FieldSpec::list(
                "itensRemuneracao",
                "Rubricas",
                vec![
                    FieldSpec::text("codRubr", "Código da rubrica")
                        .required()
                        .max_len(30),
                    FieldSpec::number("vrRubr", "Valor")
                        .required()
                        .non_negative(),
                ],
            ),
        ],
    )
    .rule(CrossFieldRule::UniqueWithin {
        list: "itensRemuneracao",
        key: "codRubr",
    })
}

fn det_verbas() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("codRubr", "Código da rubrica").required(),
        FieldSpec::text("ideTabRubr", "Tabela de rubricas").required(),
        FieldSpec::number("qtdRubr", "Quantidade").non_negative(),
        FieldSpec::number("vrRubr", "Valor da rubrica")
            .required()
            .non_negative(),
        FieldSpec::number("indApurIR", "Apuração de IR")
            .range(0.0, 1.0)
            .integer(),
    ]
}

fn ide_estab_lot() -> Vec<FieldSpec> {
    vec![
        FieldSpec::choice("tpInsc", "Tipo de inscrição", INSCRIPTION_TYPES).required(),
        FieldSpec::text("nrInsc", "Número de inscrição").required(),
        FieldSpec::text("codLotacao", "Código da lotação").required(),
        FieldSpec::list("detVerbas", "Detalhamento das verbas", det_verbas())
            .required()
            .min_items(1),
    ]
}

pub fn s1202() -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        "S-1202",
        "Remuneração de servidor vinculado a RPPS",
        vec![
            FieldSpec::group(
                "ideEvento",
                "Identificação do evento",
                vec![
                    FieldSpec::choice("indRetif", "Retificação", ONE_OR_TWO)
                        .required()
                        .help("1 original, 2 retificação"),
                    FieldSpec::text("nrRecibo", "Recibo a retificar")
                        .min_len(44)
                        .max_len(44),
                    per_apur(),
                    FieldSpec::choice("indApuracao", "Apuração", ONE_OR_TWO)
                        .required()
                        .help("1 mensal, 2 anual"),
                    FieldSpec::choice("indGuia", "Guia", ONE_OR_TWO).required(),
                    FieldSpec::choice("tpAmb", "Ambiente", ONE_OR_TWO)
                        .required()
                        .help("1 produção, 2 produção restrita"),
                    FieldSpec::choice("procEmi", "Processo de emissão", &["1", "2", "3", "4", "5"])
                        .required(),
                    FieldSpec::text("verProc", "Versão do processo").required(),
                ],
            )
            .required(),
            FieldSpec::group("ideEmpregador", "Empregador", inscricao().to_vec()).required(),
            FieldSpec::group(
                "ideTrabalhador",
                "Trabalhador",
                vec![
                    FieldSpec::text("cpfTrab", "CPF")
                        .required()
                        .format(TextFormat::Cpf),
                    FieldSpec::text("nisTrab", "NIS").format(TextFormat::Pis),
                    FieldSpec::text("nmTrab", "Nome").required().max_len(70),
                    FieldSpec::choice("sexo", "Sexo", SEXO).required(),
                    FieldSpec::text("racaCor", "Raça/cor").required().max_len(6),
                    FieldSpec::text("estCiv", "Estado civil").required().max_len(5),
                    FieldSpec::text("grauInstr", "Grau de instrução")
                        .required()
                        .format(TextFormat::Digits(2)),
                    FieldSpec::text("nmSoc", "Nome social"),
                ],
            )
            .required(),
            FieldSpec::list(
                "dmDev",
                "Demonstrativos de valores devidos",
                vec![
                    FieldSpec::text("ideDmDev", "Identificador do demonstrativo").required(),
                    FieldSpec::number("codCateg", "Categoria")
                        .required()
                        .integer()
                        .range(101.0, 905.0),
                    FieldSpec::group(
                        "infoPerApur",
                        "Período de apuração",
                        vec![FieldSpec::list(
                            "ideEstabLot",
                            "Estabelecimentos/lotações",
                            ide_estab_lot(),
                        )
                        .required()
                        .min_items(1)],
                    )
                    .required(),
                ],
            )
            .required()
            .min_items(1),
        ],
    )
    .rule(CrossFieldRule::InscriptionNumber {
        kind: "ideEmpregador.tpInsc",
        number: "ideEmpregador.nrInsc",
    })
    .rule(CrossFieldRule::UniqueWithin {
        list: "dmDev",
        key: "ideDmDev",
    })
}

pub fn s1207() -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        "S-1207",
        "Benefícios previdenciários RPPS",
        vec![
            cpf(),
            FieldSpec::date("dataInicioBeneficio", "Início do benefício").required(),
            FieldSpec::choice("tipoBeneficio", "Tipo de benefício", BENEFIT_TYPES).required(),
            FieldSpec::number("valorBeneficio", "Valor do benefício")
                .required()
                .non_negative(),
            FieldSpec::date("dataFimBeneficio", "Fim do benefício"),
            FieldSpec::text("motivoFimBeneficio", "Motivo do fim").max_len(200),
            observacao(),
        ],
    )
    .rule(CrossFieldRule::DateOrder {
        start: "dataInicioBeneficio",
        end: "dataFimBeneficio",
    })
}

pub fn s1210() -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        "S-1210",
        "Pagamentos de rendimentos do trabalho",
        vec![
            cpf(),
            per_apur(),
            FieldSpec::list(
                "infoPgto",
                "Pagamentos",
                vec![
                    FieldSpec::date("dtPgto", "Data do pagamento").required(),
                    FieldSpec::choice("tpPgto", "Tipo de pagamento", PAYMENT_TYPES).required(),
                    FieldSpec::text("ideDmDev", "Demonstrativo").required(),
                    FieldSpec::number("vrLiq", "Valor líquido")
                        .required()
                        .non_negative(),
                ],
            )
            .required()
            .min_items(1),
            observacao(),
        ],
    )
    .rule(CrossFieldRule::UniqueWithin {
        list: "infoPgto",
        key: "ideDmDev",
    })
}
