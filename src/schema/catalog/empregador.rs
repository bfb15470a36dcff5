//! Employer registration (S-1000)

use super::common::inscricao;
use crate::schema::descriptor::EventTypeDescriptor;
use crate::schema::field::{CrossFieldRule, FieldSpec, TextFormat};

const CLASS_TRIB: &[&str] = &[
    "01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "11", "12", "13", "14", "15",
    "16", "17", "18", "19", "20",
];
const ZERO_ONE: &[&str] = &["0", "1"];
const N_S: &[&str] = &["N", "S"];
const IND_COOP: &[&str] = &["0", "1", "2"];
const IND_PORTE: &[&str] = &["0", "1", "2", "3", "4", "5"];
const ENT_ME_INSC: &[&str] = &["1", "4"];
const SITUACAO_EFR: &[&str] = &["1", "2"];

fn info_cadastro() -> FieldSpec {
    FieldSpec::group(
        "infoCadastro",
        "Informações cadastrais",
        vec![
            FieldSpec::choice("classTrib", "Classificação tributária", CLASS_TRIB)
                .required()
                .help("01 regime geral, 02 a 20 Simples Nacional e sublimites"),
            FieldSpec::choice("indCoop", "Cooperativa", IND_COOP)
                .help("0 não é cooperativa, 1 de trabalho, 2 de produção"),
            FieldSpec::choice("indConstr", "Construtora", ZERO_ONE),
            FieldSpec::choice("indDesFolha", "Desoneração da folha", ZERO_ONE),
            FieldSpec::choice("indOpcCP", "Opção pela CP sobre a receita", ZERO_ONE),
            FieldSpec::choice("indPorte", "Porte", IND_PORTE)
                .help("0 não informado, 1 ME, 2 EPP, 3 demais, 4 médio, 5 grande"),
            FieldSpec::choice("indOptRegEletron", "Registro eletrônico de empregados", ZERO_ONE),
            FieldSpec::choice("indEntEd", "Entidade educacional", N_S),
            FieldSpec::choice("indEtt", "Empresa de trabalho temporário", N_S),
            FieldSpec::text("nrRegEtt", "Registro da ETT").max_len(30),
            FieldSpec::choice("indAcordoIsenMulta", "Acordo de isenção de multa", ZERO_ONE),
            FieldSpec::choice("sitPJ", "Situação da pessoa jurídica", ZERO_ONE),
            FieldSpec::group(
                "contApr",
                "Contratação de aprendiz",
                vec![
                    FieldSpec::text("nrProcJud", "Processo judicial")
                        .required()
                        .max_len(20),
                    FieldSpec::choice("contEntEd", "Contratação por entidade educacional", N_S)
                        .required(),
                    FieldSpec::group(
                        "infoEntMe",
                        "Entidade educativa",
                        vec![
                            FieldSpec::choice("tpInsc", "Tipo de inscrição", ENT_ME_INSC)
                                .required()
                                .help("1 CNPJ, 4 CEI"),
                            FieldSpec::text("nrInsc", "Número de inscrição")
                                .required()
                                .max_len(14),
                        ],
                    ),
                ],
            ),
        ],
    )
    .required()
}

fn dados_isencao() -> FieldSpec {
    FieldSpec::group(
        "dadosIsencao",
        "Certificação de entidade beneficente",
        vec![
            FieldSpec::text("ideMinLei", "Ministério ou lei")
                .required()
                .max_len(120),
            FieldSpec::text("nrCertif", "Número do certificado")
                .required()
                .max_len(40),
            FieldSpec::date("dtEmisCertif", "Emissão do certificado").required(),
            FieldSpec::date("dtVencCertif", "Vencimento do certificado").required(),
            FieldSpec::text("nrProtRenov", "Protocolo de renovação").max_len(40),
            FieldSpec::date("dtProtRenov", "Data do protocolo"),
            FieldSpec::date("dtDou", "Publicação no DOU"),
            FieldSpec::text("pagDou", "Página do DOU").max_len(5),
        ],
    )
}

fn info_op() -> FieldSpec {
    FieldSpec::group(
        "infoOP",
        "Órgão público",
        vec![
            FieldSpec::group(
                "infoEFR",
                "Ente federativo responsável",
                vec![
                    FieldSpec::text("ideEFR", "Identificação do EFR")
                        .required()
                        .max_len(30),
                    FieldSpec::text("cnpjEFR", "CNPJ do EFR")
                        .required()
                        .format(TextFormat::Cnpj),
                    FieldSpec::choice("indSit", "Situação", SITUACAO_EFR)
                        .required()
                        .help("1 ativo, 2 inativo"),
                ],
            )
            .required(),
            FieldSpec::group(
                "infoEnte",
                "Ente federativo",
                vec![
                    FieldSpec::text("nmEnte", "Nome do ente")
                        .required()
                        .max_len(100),
                    FieldSpec::text("uf", "UF").required().format(TextFormat::Uf),
                    FieldSpec::text("codMunic", "Código do município")
                        .required()
                        .format(TextFormat::Digits(7)),
                    FieldSpec::choice("indRPPS", "Regime próprio de previdência", N_S).required(),
                    FieldSpec::choice("subteto", "Subteto", N_S).required(),
                    FieldSpec::date("subtetoDec", "Decreto do subteto"),
                ],
            )
            .required(),
        ],
    )
}

pub fn s1000() -> EventTypeDescriptor {
    let mut ide = inscricao().to_vec();
    ide.extend([
        FieldSpec::text("iniValid", "Início da validade")
            .required()
            .format(TextFormat::YearMonth),
        FieldSpec::text("fimValid", "Fim da validade").format(TextFormat::YearMonth),
    ]);

    EventTypeDescriptor::new(
        "S-1000",
        "Informações do empregador/contribuinte/órgão público",
        vec![
            FieldSpec::group("ideEmpregador", "Empregador", ide).required(),
            info_cadastro(),
            dados_isencao(),
            info_op(),
            FieldSpec::group(
                "infoOrgInternacional",
                "Organismo internacional",
                vec![
                    FieldSpec::choice("indAcordoIsenMulta", "Acordo de isenção de multa", ZERO_ONE)
                        .required(),
                ],
            ),
        ],
    )
    .rule(CrossFieldRule::InscriptionNumber {
        kind: "ideEmpregador.tpInsc",
        number: "ideEmpregador.nrInsc",
    })
    .rule(CrossFieldRule::PeriodOrder {
        start: "ideEmpregador.iniValid",
        end: "ideEmpregador.fimValid",
    })
    .rule(CrossFieldRule::DateOrder {
        start: "dadosIsencao.dtEmisCertif",
        end: "dadosIsencao.dtVencCertif",
    })
}
