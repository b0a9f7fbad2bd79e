use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::payment_term::PaymentTermRecord;
use crate::payment_type::PaymentTypeRecord;
use crate::whole_number;

/// Line terminator expected by the legacy importer.
pub const CRLF: &str = "\r\n";

/// Field delimiter used by every legacy layout.
pub const DELIMITER: &str = "|";

/// A record that can be written as one line of a legacy export file.
pub trait LegacyRecord: DeserializeOwned {
    /// JSON field holding the primary key in the upstream payload.
    const KEY_FIELD: &'static str;

    /// Primary key, used for ordering.
    fn key(&self) -> i64;

    /// Encodes the record as a single line, without terminator.
    fn to_line(&self) -> String;
}

/// Joins one encoded line per record, each followed by CRLF.
///
/// An empty slice produces an empty string, not a lone terminator.
pub fn build_file<R: LegacyRecord>(records: &[R]) -> String {
    let mut content = String::new();
    for record in records {
        content.push_str(&record.to_line());
        content.push_str(CRLF);
    }
    content
}

/// Turns raw upstream items into records ready for [`build_file`].
///
/// Items without a whole-number primary key (`5` or `5.0`) are skipped. The
/// remaining items are deserialized and sorted ascending by key (stable, so
/// duplicate keys keep their upstream order). A kept item with badly shaped fields is an error.
pub fn prepare_records<R: LegacyRecord>(items: Vec<Value>) -> Result<Vec<R>, serde_json::Error> {
    let total = items.len();
    let mut records = items
        .into_iter()
        .filter(has_integer_key::<R>)
        .map(serde_json::from_value::<R>)
        .collect::<Result<Vec<_>, _>>()?;

    if records.len() != total {
        tracing::warn!(
            "Skipped {} of {} upstream items without a numeric '{}'",
            total - records.len(),
            total,
            R::KEY_FIELD
        );
    }

    records.sort_by_key(|record| record.key());
    Ok(records)
}

fn has_integer_key<R: LegacyRecord>(item: &Value) -> bool {
    item.get(R::KEY_FIELD)
        .and_then(whole_number::value_as_i64)
        .is_some()
}

/// The export files the service can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Payment-term registry (`CADTPG.txt`).
    PaymentTerms,
    /// Payment-type registry (`CADTIPOPAG.txt`).
    PaymentTypes,
}

impl ExportKind {
    /// Short name used in routes and on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            ExportKind::PaymentTerms => "cadtpg",
            ExportKind::PaymentTypes => "cadtipopag",
        }
    }

    /// File name the legacy importer looks for.
    pub fn file_name(self) -> &'static str {
        match self {
            ExportKind::PaymentTerms => "CADTPG.txt",
            ExportKind::PaymentTypes => "CADTIPOPAG.txt",
        }
    }

    /// Resource segment under `/empresas/{id}/` in the upstream API.
    pub fn upstream_resource(self) -> &'static str {
        match self {
            ExportKind::PaymentTerms => "prazo",
            ExportKind::PaymentTypes => "cadtipopag",
        }
    }

    pub fn content_disposition(self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name())
    }

    /// Client-facing message for a failed export.
    pub fn failure_message(self) -> String {
        format!("Erro ao gerar arquivo {}.", self.slug().to_uppercase())
    }

    /// Filters, sorts and formats raw upstream items into the file body.
    pub fn build_file(self, items: Vec<Value>) -> Result<String, serde_json::Error> {
        match self {
            ExportKind::PaymentTerms => {
                let records = prepare_records::<PaymentTermRecord>(items)?;
                Ok(build_file(&records))
            }
            ExportKind::PaymentTypes => {
                let records = prepare_records::<PaymentTypeRecord>(items)?;
                Ok(build_file(&records))
            }
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cadtpg" => Ok(ExportKind::PaymentTerms),
            "cadtipopag" => Ok(ExportKind::PaymentTypes),
            other => Err(format!(
                "unknown export '{}', expected 'cadtpg' or 'cadtipopag'",
                other
            )),
        }
    }
}
