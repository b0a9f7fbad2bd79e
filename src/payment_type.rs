//! CADTIPOPAG: payment-type registry.
//!
//! One line per record: `CC|description`, where `CC` is the code left-padded
//! with zeros to two digits.

use serde::{Deserialize, Serialize};

use crate::export::{self, LegacyRecord, DELIMITER};
use crate::padding::{pad_left, ZERO};
use crate::whole_number;

/// Width of the code column.
pub const CODE_WIDTH: usize = 2;

/// A payment type as returned by the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTypeRecord {
    #[serde(rename = "codigo", deserialize_with = "whole_number::deserialize")]
    pub code: i64,
    #[serde(rename = "descricao")]
    pub description: String,
}

/// Encodes the code column. Codes above two digits lose their high-order digits.
pub fn format_code(code: i64) -> String {
    pad_left(&code.to_string(), CODE_WIDTH, ZERO)
}

pub fn format_record(record: &PaymentTypeRecord) -> String {
    [format_code(record.code).as_str(), record.description.trim()].join(DELIMITER)
}

pub fn build_file(records: &[PaymentTypeRecord]) -> String {
    export::build_file(records)
}

impl LegacyRecord for PaymentTypeRecord {
    const KEY_FIELD: &'static str = "codigo";

    fn key(&self) -> i64 {
        self.code
    }

    fn to_line(&self) -> String {
        format_record(self)
    }
}
