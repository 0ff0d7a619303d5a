use serde::{Deserialize, Serialize};

/// The value kind of a destination column.
///
/// Every canonical field of an import or export record carries exactly one
/// kind. The kind decides which coercer turns a raw spreadsheet cell into
/// the stored value, and which default is used when the column is missing
/// from an upload (`""` for text, `NULL` for dates and decimals, `false`
/// for booleans).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Date,
    Decimal,
    Boolean,
}

impl FieldKind {
    /// SQL column declaration used when bootstrapping the destination tables.
    pub fn column_type(self) -> &'static str {
        match self {
            FieldKind::Text => "TEXT NOT NULL DEFAULT ''",
            FieldKind::Date => "DATE",
            FieldKind::Decimal => "REAL",
            FieldKind::Boolean => "INTEGER NOT NULL DEFAULT 0",
        }
    }
}
