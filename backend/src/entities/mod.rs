//! Per-entity field mapping tables.
//!
//! The ingestion pipeline, the record endpoints and the template generator are
//! all generic over an [`EntityDef`]: the destination table, the ordered list
//! of canonical fields (each with one value kind and its header aliases) and
//! the template headers the upload validator checks against.

mod export;
mod import;

pub use export::EXPORT;
pub use import::IMPORT;

use crate::ingest::headers::normalize;
use common::model::field::FieldKind;
use common::model::stats::RecordType;

/// A canonical destination column.
#[derive(Debug)]
pub struct FieldSpec {
    /// Column name in the destination table.
    pub name: &'static str,
    pub kind: FieldKind,
    /// Extra normalized header tokens that map to this field. The column name
    /// with its underscores removed always matches and is not listed here.
    pub aliases: &'static [&'static str],
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            aliases: &[],
        }
    }

    pub const fn aliased(
        name: &'static str,
        kind: FieldKind,
        aliases: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            kind,
            aliases,
        }
    }

    /// Whether a normalized header token names this field.
    pub fn matches(&self, token: &str) -> bool {
        !token.is_empty() && (normalize(self.name) == token || self.aliases.contains(&token))
    }
}

#[derive(Debug)]
pub struct EntityDef {
    pub table: &'static str,
    /// Used in log lines and in the template sheet name.
    pub label: &'static str,
    pub sheet_name: &'static str,
    pub fields: &'static [FieldSpec],
    /// Header row of the downloadable template. The upload validator checks
    /// uploaded sheets against this same list.
    pub expected_headers: &'static [&'static str],
}

impl EntityDef {
    /// Position of the field a raw header (or JSON key) maps to.
    pub fn field_index(&self, raw: &str) -> Option<usize> {
        let token = normalize(raw);
        self.fields.iter().position(|f| f.matches(&token))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

/// Route-level selector for the two record tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Import,
    Export,
}

impl EntityKind {
    pub fn def(self) -> &'static EntityDef {
        match self {
            EntityKind::Import => &IMPORT,
            EntityKind::Export => &EXPORT,
        }
    }

    pub fn record_type(self) -> RecordType {
        match self {
            EntityKind::Import => RecordType::Import,
            EntityKind::Export => RecordType::Export,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn tokens(def: &EntityDef) -> Vec<String> {
        def.fields
            .iter()
            .flat_map(|f| {
                std::iter::once(normalize(f.name)).chain(f.aliases.iter().map(|a| a.to_string()))
            })
            .collect()
    }

    #[test]
    fn header_tokens_are_unique_per_entity() {
        for def in [&IMPORT, &EXPORT] {
            let all = tokens(def);
            let unique: HashSet<_> = all.iter().collect();
            assert_eq!(all.len(), unique.len(), "duplicate alias in {}", def.table);
        }
    }

    #[test]
    fn aliases_are_already_normalized() {
        for def in [&IMPORT, &EXPORT] {
            for field in def.fields {
                for alias in field.aliases {
                    assert_eq!(normalize(alias), *alias);
                }
            }
        }
    }

    #[test]
    fn destination_widths() {
        assert_eq!(IMPORT.fields.len(), 34);
        assert_eq!(EXPORT.fields.len(), 27);
    }

    #[test]
    fn field_lookup_by_spelling() {
        assert_eq!(
            EXPORT.field_index("S/Bill No."),
            EXPORT.fields.iter().position(|f| f.name == "s_bill_no")
        );
        assert_eq!(
            EXPORT.field_index("sbillno"),
            EXPORT.field_index("s_bill_no")
        );
        assert_eq!(
            IMPORT.field_index("FC Value").map(|i| IMPORT.fields[i].name),
            Some("invoice_value")
        );
        assert_eq!(EXPORT.field_index("Unrelated"), None);
        assert_eq!(EXPORT.field_index(""), None);
    }

    #[test]
    fn template_headers_map_to_fields() {
        for def in [&IMPORT, &EXPORT] {
            for header in def.expected_headers {
                assert!(
                    def.field_index(header).is_some(),
                    "{} template header {:?} maps to no column",
                    def.table,
                    header
                );
            }
        }
    }
}
