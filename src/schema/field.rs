//! Declarative field specifications
//!
//! Each event type is described by an ordered list of [`FieldSpec`]s. Specs are
//! plain data; the single interpreter lives in `validate.rs`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static CPF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{11}$").expect("cpf regex"));
static CNPJ_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{14}$").expect("cnpj regex"));
static PIS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{11}$").expect("pis regex"));
static CEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}-?\d{3}$").expect("cep regex"));
static YEAR_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("year-month regex"));
static HOUR_MINUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("hour-minute regex"));

/// Brazilian federative units
pub const UFS: &[&str] = &[
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB",
    "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

/// Named text formats
#[derive(Debug, Clone, Copy)]
pub enum TextFormat {
    /// 11 digits, no punctuation
    Cpf,
    /// 14 digits, no punctuation
    Cnpj,
    /// NIS/PIS, 11 digits
    Pis,
    /// `00000-000` or `00000000`
    Cep,
    /// Two-letter federative unit
    Uf,
    /// Period of assessment, `YYYY-MM`
    YearMonth,
    /// `HH:MM`, 24h clock
    HourMinute,
    /// Exactly `n` digits
    Digits(usize),
    /// Arbitrary pattern declared by an event descriptor
    Pattern {
        regex: &'static Lazy<Regex>,
        hint: &'static str,
        example: &'static str,
    },
}

impl TextFormat {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            TextFormat::Cpf => CPF_RE.is_match(value),
            TextFormat::Cnpj => CNPJ_RE.is_match(value),
            TextFormat::Pis => PIS_RE.is_match(value),
            TextFormat::Cep => CEP_RE.is_match(value),
            TextFormat::Uf => UFS.contains(&value),
            TextFormat::YearMonth => YEAR_MONTH_RE.is_match(value),
            TextFormat::HourMinute => HOUR_MINUTE_RE.is_match(value),
            TextFormat::Digits(n) => {
                value.chars().count() == *n && value.chars().all(|c| c.is_ascii_digit())
            }
            TextFormat::Pattern { regex, .. } => regex.is_match(value),
        }
    }

    /// Human-readable description used in error messages
    pub fn hint(&self) -> String {
        match self {
            TextFormat::Cpf => "11 digits".to_string(),
            TextFormat::Cnpj => "14 digits".to_string(),
            TextFormat::Pis => "11 digits".to_string(),
            TextFormat::Cep => "00000-000".to_string(),
            TextFormat::Uf => "a two-letter UF".to_string(),
            TextFormat::YearMonth => "YYYY-MM".to_string(),
            TextFormat::HourMinute => "HH:MM".to_string(),
            TextFormat::Digits(n) => format!("{n} digits"),
            TextFormat::Pattern { hint, .. } => hint.to_string(),
        }
    }

    /// Placeholder shown in empty inputs
    pub fn example(&self) -> String {
        match self {
            TextFormat::Cpf => "12345678901".to_string(),
            TextFormat::Cnpj => "12345678000195".to_string(),
            TextFormat::Pis => "12345678901".to_string(),
            TextFormat::Cep => "01001-000".to_string(),
            TextFormat::Uf => "SP".to_string(),
            TextFormat::YearMonth => "2025-01".to_string(),
            TextFormat::HourMinute => "08:30".to_string(),
            TextFormat::Digits(n) => "1".repeat(*n),
            TextFormat::Pattern { example, .. } => example.to_string(),
        }
    }
}

/// Numeric constraints
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberRule {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub integer: bool,
    /// Monetary or quantity field that rejects values below zero
    pub non_negative: bool,
}

/// Position of a date relative to the day it is validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// Today or earlier
    NotFuture,
    /// Strictly after today
    Future,
}

impl DateBound {
    pub fn admits(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateBound::NotFuture => date <= today,
            DateBound::Future => date > today,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            DateBound::NotFuture => "must not be in the future",
            DateBound::Future => "must be a future date",
        }
    }
}

#[derive(Debug, Clone)]
pub enum FieldKind {
    Text {
        min_len: Option<usize>,
        max_len: Option<usize>,
        format: Option<TextFormat>,
        multiline: bool,
    },
    Number(NumberRule),
    Date(Option<DateBound>),
    Choice(&'static [&'static str]),
    /// Repeated line items validated one by one
    List {
        item: Vec<FieldSpec>,
        min_items: usize,
    },
    /// Lightly nested object
    Group(Vec<FieldSpec>),
}

/// One field of an event payload
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub help: Option<&'static str>,
}

impl FieldSpec {
    fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            help: None,
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Text {
                min_len: None,
                max_len: None,
                format: None,
                multiline: false,
            },
        )
    }

    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number(NumberRule::default()))
    }

    pub fn date(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Date(None))
    }

    pub fn choice(name: &'static str, label: &'static str, allowed: &'static [&'static str]) -> Self {
        Self::new(name, label, FieldKind::Choice(allowed))
    }

    pub fn list(name: &'static str, label: &'static str, item: Vec<FieldSpec>) -> Self {
        Self::new(name, label, FieldKind::List { item, min_items: 0 })
    }

    pub fn group(name: &'static str, label: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self::new(name, label, FieldKind::Group(fields))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    /// Reject dates after the day of validation
    pub fn not_future(mut self) -> Self {
        if let FieldKind::Date(bound) = &mut self.kind {
            *bound = Some(DateBound::NotFuture);
        }
        self
    }

    /// Accept only dates after the day of validation
    pub fn future(mut self) -> Self {
        if let FieldKind::Date(bound) = &mut self.kind {
            *bound = Some(DateBound::Future);
        }
        self
    }

    pub fn min_len(mut self, n: usize) -> Self {
        if let FieldKind::Text { min_len, .. } = &mut self.kind {
            *min_len = Some(n);
        }
        self
    }

    pub fn max_len(mut self, n: usize) -> Self {
        if let FieldKind::Text { max_len, .. } = &mut self.kind {
            *max_len = Some(n);
        }
        self
    }

    pub fn format(mut self, f: TextFormat) -> Self {
        if let FieldKind::Text { format, .. } = &mut self.kind {
            *format = Some(f);
        }
        self
    }

    pub fn multiline(mut self) -> Self {
        if let FieldKind::Text { multiline, .. } = &mut self.kind {
            *multiline = true;
        }
        self
    }

    pub fn non_negative(mut self) -> Self {
        if let FieldKind::Number(rule) = &mut self.kind {
            rule.non_negative = true;
        }
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        if let FieldKind::Number(rule) = &mut self.kind {
            rule.min = Some(min);
            rule.max = Some(max);
        }
        self
    }

    pub fn integer(mut self) -> Self {
        if let FieldKind::Number(rule) = &mut self.kind {
            rule.integer = true;
        }
        self
    }

    pub fn min_items(mut self, n: usize) -> Self {
        if let FieldKind::List { min_items, .. } = &mut self.kind {
            *min_items = n;
        }
        self
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, FieldKind::Text { multiline: true, .. })
    }
}

/// Constraints spanning more than one field of a descriptor
#[derive(Debug, Clone)]
pub enum CrossFieldRule {
    /// `end` must not precede `start`; both paths are dotted payload paths
    DateOrder {
        start: &'static str,
        end: &'static str,
    },
    /// Same as `DateOrder` for `YYYY-MM` periods
    PeriodOrder {
        start: &'static str,
        end: &'static str,
    },
    /// Values of `key` must be unique across the items of `list`
    UniqueWithin {
        list: &'static str,
        key: &'static str,
    },
    /// Inscription number length depends on the inscription type (1 CNPJ, 2 CPF, 3/4 CAEPF/CNO)
    InscriptionNumber {
        kind: &'static str,
        number: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpf_format() {
        assert!(TextFormat::Cpf.matches("12345678901"));
        assert!(!TextFormat::Cpf.matches("123"));
        assert!(!TextFormat::Cpf.matches("123.456.789-01"));
    }

    #[test]
    fn test_cep_accepts_both_forms() {
        assert!(TextFormat::Cep.matches("01001-000"));
        assert!(TextFormat::Cep.matches("01001000"));
        assert!(!TextFormat::Cep.matches("0100-1000"));
    }

    #[test]
    fn test_year_month_rejects_month_13() {
        assert!(TextFormat::YearMonth.matches("2025-12"));
        assert!(!TextFormat::YearMonth.matches("2025-13"));
        assert!(!TextFormat::YearMonth.matches("2025-1"));
    }

    #[test]
    fn test_uf_list() {
        assert!(TextFormat::Uf.matches("SP"));
        assert!(!TextFormat::Uf.matches("XX"));
        assert_eq!(UFS.len(), 27);
    }

    #[test]
    fn test_examples_satisfy_their_format() {
        let formats = [
            TextFormat::Cpf,
            TextFormat::Cnpj,
            TextFormat::Pis,
            TextFormat::Cep,
            TextFormat::Uf,
            TextFormat::YearMonth,
            TextFormat::HourMinute,
            TextFormat::Digits(7),
        ];
        for format in formats {
            assert!(format.matches(&format.example()), "{format:?}");
        }
    }

    #[test]
    fn test_builders_ignore_mismatched_kind() {
        let spec = FieldSpec::date("data", "Data").min_len(3).non_negative();
        assert!(matches!(spec.kind, FieldKind::Date(None)));
        let spec = FieldSpec::number("valor", "Valor").non_negative().required();
        assert!(spec.required);
        assert!(matches!(
            spec.kind,
            FieldKind::Number(NumberRule {
                non_negative: true,
                ..
            })
        ));
    }
}
