//! CADTPG: payment-term registry.
//!
//! Each record becomes one pipe-delimited line with a fixed column layout:
//!
//! | # | Field              | Width | Absent value |
//! |---|--------------------|-------|--------------|
//! | 1 | code               | 8     | (required)   |
//! | 2 | label              | 40    | (required)   |
//! | 3 | surcharge          | 8     | spaces       |
//! | 4 | discount           | 8     | spaces       |
//! | 5 | average term       | 4     | spaces       |
//! | 6 | minimum value      | 8     | spaces       |
//! | 7 | uses cash register | 1     | `N`          |
//! | 8 | payment modes      | 40    | spaces       |
//! | 9-20 | due-day offsets | 4 each | `0000`     |
//! | 21 | type              | 0 or 1 | empty       |
//!
//! Numeric codes and due days are zero-filled on the left and lose high-order
//! digits on overflow. Text and decimal columns are space-filled on the right
//! and lose their tail on overflow.

use serde::Deserialize;

use crate::export::{self, LegacyRecord, DELIMITER};
use crate::padding::{blank, pad_left, pad_right, SPACE, ZERO};
use crate::whole_number;

pub const CODE_WIDTH: usize = 8;
pub const LABEL_WIDTH: usize = 40;
pub const DECIMAL_WIDTH: usize = 8;
pub const AVERAGE_TERM_WIDTH: usize = 4;
pub const PAYMENT_MODES_WIDTH: usize = 40;
pub const DUE_DAY_WIDTH: usize = 4;

/// Number of installment due-day columns.
pub const DUE_DAY_COUNT: usize = 12;

/// Length of a line whose type column is empty.
pub const LINE_WIDTH_WITHOUT_TYPE: usize = CODE_WIDTH
    + LABEL_WIDTH
    + DECIMAL_WIDTH * 3
    + AVERAGE_TERM_WIDTH
    + 1
    + PAYMENT_MODES_WIDTH
    + DUE_DAY_WIDTH * DUE_DAY_COUNT
    + 20;

/// A payment term as returned by the upstream API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "PaymentTermPayload")]
pub struct PaymentTermRecord {
    pub code: i64,
    pub label: String,
    pub surcharge: Option<f64>,
    pub discount: Option<f64>,
    pub average_term: Option<i64>,
    pub minimum_value: Option<f64>,
    pub uses_cash_register: Option<String>,
    pub payment_modes: Option<String>,
    pub due_day_offsets: [Option<i64>; DUE_DAY_COUNT],
    pub type_code: Option<String>,
}

impl PaymentTermRecord {
    /// A record with only the required fields set.
    pub fn new(code: i64, label: impl Into<String>) -> Self {
        Self {
            code,
            label: label.into(),
            surcharge: None,
            discount: None,
            average_term: None,
            minimum_value: None,
            uses_cash_register: None,
            payment_modes: None,
            due_day_offsets: [None; DUE_DAY_COUNT],
            type_code: None,
        }
    }
}

/// Upstream JSON shape, with the due days spread over twelve keys.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentTermPayload {
    #[serde(deserialize_with = "whole_number::deserialize")]
    ncond: i64,
    condicao: String,
    acrescimo: Option<f64>,
    desconto: Option<f64>,
    #[serde(default, deserialize_with = "whole_number::deserialize_option")]
    prazo_medio: Option<i64>,
    valor_minimo: Option<f64>,
    usa_caixa: Option<String>,
    modos_pagto: Option<String>,
    #[serde(default, deserialize_with = "whole_number::deserialize_option")]
    dias_vencto1: Option<i64>,
    #[serde(default, deserialize_with = "whole_number::deserialize_option")]
    dias_vencto2: Option<i64>,
    #[serde(default, deserialize_with = "whole_number::deserialize_option")]
    dias_vencto3: Option<i64>,
    #[serde(default, deserialize_with = "whole_number::deserialize_option")]
    dias_vencto4: Option<i64>,
    #[serde(default, deserialize_with = "whole_number::deserialize_option")]
    dias_vencto5: Option<i64>,
    #[serde(default, deserialize_with = "whole_number::deserialize_option")]
    dias_vencto6: Option<i64>,
    #[serde(default, deserialize_with = "whole_number::deserialize_option")]
    dias_vencto7: Option<i64>,
    #[serde(default, deserialize_with = "whole_number::deserialize_option")]
    dias_vencto8: Option<i64>,
    #[serde(default, deserialize_with = "whole_number::deserialize_option")]
    dias_vencto9: Option<i64>,
    #[serde(default, deserialize_with = "whole_number::deserialize_option")]
    dias_vencto10: Option<i64>,
    #[serde(default, deserialize_with = "whole_number::deserialize_option")]
    dias_vencto11: Option<i64>,
    #[serde(default, deserialize_with = "whole_number::deserialize_option")]
    dias_vencto12: Option<i64>,
    tipo: Option<String>,
}

impl From<PaymentTermPayload> for PaymentTermRecord {
    fn from(p: PaymentTermPayload) -> Self {
        Self {
            code: p.ncond,
            label: p.condicao,
            surcharge: p.acrescimo,
            discount: p.desconto,
            average_term: p.prazo_medio,
            minimum_value: p.valor_minimo,
            uses_cash_register: p.usa_caixa,
            payment_modes: p.modos_pagto,
            due_day_offsets: [
                p.dias_vencto1,
                p.dias_vencto2,
                p.dias_vencto3,
                p.dias_vencto4,
                p.dias_vencto5,
                p.dias_vencto6,
                p.dias_vencto7,
                p.dias_vencto8,
                p.dias_vencto9,
                p.dias_vencto10,
                p.dias_vencto11,
                p.dias_vencto12,
            ],
            type_code: p.tipo,
        }
    }
}

/// Shortest decimal text that reads back as the same number.
///
/// Always positional, never exponent form (`1e-7` -> `"0.0000001"`). Integral
/// values have no fractional part (`10.0` -> `"10"`) and negative zero is
/// written as `"0"`.
fn decimal_text(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Surcharge, discount and minimum value columns. No rounding: the text is
/// cut to width.
pub fn format_decimal(value: Option<f64>) -> String {
    match value {
        Some(v) => pad_right(&decimal_text(v), DECIMAL_WIDTH, SPACE),
        None => blank(DECIMAL_WIDTH, SPACE),
    }
}

/// Zero is a real value here and is written as `"0   "`.
pub fn format_average_term(value: Option<i64>) -> String {
    match value {
        Some(v) => pad_right(&v.to_string(), AVERAGE_TERM_WIDTH, SPACE),
        None => blank(AVERAGE_TERM_WIDTH, SPACE),
    }
}

/// `S` only for a value that trims and upper-cases to exactly `S`.
pub fn format_cash_register(value: Option<&str>) -> String {
    match value.map(|v| v.trim().to_uppercase()) {
        Some(v) if v == "S" => "S".to_string(),
        _ => "N".to_string(),
    }
}

pub fn format_payment_modes(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => pad_right(v.trim(), PAYMENT_MODES_WIDTH, SPACE),
        _ => blank(PAYMENT_MODES_WIDTH, SPACE),
    }
}

pub fn format_due_day(value: Option<i64>) -> String {
    match value {
        Some(v) => pad_left(&v.to_string(), DUE_DAY_WIDTH, ZERO),
        None => blank(DUE_DAY_WIDTH, ZERO),
    }
}

/// First character of the trimmed type, or an empty column when absent.
///
/// Unlike the other text columns this one is not padded, so a line without a
/// type ends right after the last delimiter.
pub fn format_type(value: Option<&str>) -> String {
    value
        .and_then(|v| v.trim().chars().next())
        .map(String::from)
        .unwrap_or_default()
}

pub fn format_record(record: &PaymentTermRecord) -> String {
    let mut fields = Vec::with_capacity(9 + DUE_DAY_COUNT);
    fields.push(pad_left(&record.code.to_string(), CODE_WIDTH, ZERO));
    fields.push(pad_right(record.label.trim(), LABEL_WIDTH, SPACE));
    fields.push(format_decimal(record.surcharge));
    fields.push(format_decimal(record.discount));
    fields.push(format_average_term(record.average_term));
    fields.push(format_decimal(record.minimum_value));
    fields.push(format_cash_register(record.uses_cash_register.as_deref()));
    fields.push(format_payment_modes(record.payment_modes.as_deref()));
    fields.extend(record.due_day_offsets.iter().copied().map(format_due_day));
    fields.push(format_type(record.type_code.as_deref()));

    fields.join(DELIMITER)
}

pub fn build_file(records: &[PaymentTermRecord]) -> String {
    export::build_file(records)
}

impl LegacyRecord for PaymentTermRecord {
    const KEY_FIELD: &'static str = "ncond";

    fn key(&self) -> i64 {
        self.code
    }

    fn to_line(&self) -> String {
        format_record(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_width_constant() {
        assert_eq!(LINE_WIDTH_WITHOUT_TYPE, 185);
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(None), "        ");
        assert_eq!(format_decimal(Some(2.5)), "2.5     ");
        assert_eq!(format_decimal(Some(10.0)), "10      ");
        assert_eq!(format_decimal(Some(-0.0)), "0       ");
        assert_eq!(format_decimal(Some(1234.56789)), "1234.567");
        assert_eq!(format_decimal(Some(0.1 + 0.2)), "0.300000");
    }

    // Decimal text is never written in exponent form, at either end of the range.
    #[test]
    fn test_format_decimal_has_no_exponent() {
        assert_eq!(format_decimal(Some(0.0000001)), "0.000000");
        assert_eq!(format_decimal(Some(1.0e21)), "10000000");
        assert_eq!(format_decimal(Some(-2.5e-7)), "-0.00000");
    }

    #[test]
    fn test_format_average_term_keeps_zero() {
        assert_eq!(format_average_term(None), "    ");
        assert_eq!(format_average_term(Some(0)), "0   ");
        assert_eq!(format_average_term(Some(30)), "30  ");
        assert_eq!(format_average_term(Some(123456)), "1234");
    }

    #[test]
    fn test_format_cash_register() {
        assert_eq!(format_cash_register(None), "N");
        assert_eq!(format_cash_register(Some("")), "N");
        assert_eq!(format_cash_register(Some("S")), "S");
        assert_eq!(format_cash_register(Some(" s ")), "S");
        assert_eq!(format_cash_register(Some("X")), "N");
        assert_eq!(format_cash_register(Some("SIM")), "N");
    }

    #[test]
    fn test_format_payment_modes() {
        assert_eq!(format_payment_modes(None), " ".repeat(40));
        assert_eq!(format_payment_modes(Some("")), " ".repeat(40));
        assert_eq!(
            format_payment_modes(Some("  DIN CHQ ")),
            format!("{:<40}", "DIN CHQ")
        );
        assert_eq!(format_payment_modes(Some(&"M".repeat(50))), "M".repeat(40));
    }

    #[test]
    fn test_format_due_day() {
        assert_eq!(format_due_day(None), "0000");
        assert_eq!(format_due_day(Some(0)), "0000");
        assert_eq!(format_due_day(Some(30)), "0030");
        assert_eq!(format_due_day(Some(12345)), "2345");
    }

    #[test]
    fn test_format_type() {
        assert_eq!(format_type(None), "");
        assert_eq!(format_type(Some("")), "");
        assert_eq!(format_type(Some("   ")), "");
        assert_eq!(format_type(Some(" PR")), "P");
    }

    #[test]
    fn test_deserialize_folds_due_days() {
        let record: PaymentTermRecord = serde_json::from_str(
            r#"{
                "ncond": 12,
                "condicao": "30/60",
                "acrescimo": null,
                "prazoMedio": 45,
                "diasVencto1": 30,
                "diasVencto2": 60,
                "diasVencto12": 0,
                "tipo": "P"
            }"#,
        )
        .unwrap();

        assert_eq!(record.code, 12);
        assert_eq!(record.label, "30/60");
        assert_eq!(record.surcharge, None);
        assert_eq!(record.average_term, Some(45));
        assert_eq!(record.due_day_offsets[0], Some(30));
        assert_eq!(record.due_day_offsets[1], Some(60));
        assert_eq!(record.due_day_offsets[2], None);
        assert_eq!(record.due_day_offsets[11], Some(0));
        assert_eq!(record.type_code.as_deref(), Some("P"));
    }

    #[test]
    fn test_deserialize_requires_label() {
        let result = serde_json::from_str::<PaymentTermRecord>(r#"{"ncond": 1}"#);
        assert!(result.is_err());
    }
}
