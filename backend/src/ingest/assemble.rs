//! Row assembly: uploaded columns -> canonical fields -> typed record.

use super::coerce::{parse_boolean, parse_date, parse_decimal, trimmed_string};
use super::workbook::{RawCell, SheetRow};
use crate::entities::EntityDef;
use chrono::NaiveDate;
use common::model::field::FieldKind;

/// A coerced value ready to be bound to an insert statement.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Date(Option<NaiveDate>),
    Decimal(Option<f64>),
    Boolean(bool),
}

impl FieldValue {
    pub fn coerce(kind: FieldKind, raw: &RawCell) -> Self {
        match kind {
            FieldKind::Text => FieldValue::Text(trimmed_string(raw)),
            FieldKind::Date => FieldValue::Date(parse_date(raw)),
            FieldKind::Decimal => FieldValue::Decimal(parse_decimal(raw)),
            FieldKind::Boolean => FieldValue::Boolean(parse_boolean(raw)),
        }
    }
}

/// One destination row: a value per field, in the entity's column order.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledRecord {
    /// Sheet line the record came from, 0 for records not read from a sheet.
    pub line: usize,
    pub values: Vec<FieldValue>,
}

/// Where each uploaded column lands in the destination row.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    /// Uploaded column index -> field index.
    targets: Vec<Option<usize>>,
    width: usize,
}

impl ColumnLayout {
    /// Maps uploaded headers to fields through the entity's alias table.
    ///
    /// Unknown columns are ignored. When two columns map to the same field the
    /// leftmost one wins.
    pub fn from_headers<S: AsRef<str>>(def: &EntityDef, headers: &[S]) -> Self {
        let mut claimed = vec![false; def.fields.len()];
        let targets = headers
            .iter()
            .map(|header| {
                let header = header.as_ref();
                match def.field_index(header) {
                    Some(idx) if !claimed[idx] => {
                        claimed[idx] = true;
                        Some(idx)
                    }
                    Some(idx) => {
                        log::debug!(
                            "{}: column {:?} duplicates {}, ignored",
                            def.label,
                            header,
                            def.fields[idx].name
                        );
                        None
                    }
                    None => {
                        log::debug!("{}: column {:?} is not mapped, ignored", def.label, header);
                        None
                    }
                }
            })
            .collect();

        Self {
            targets,
            width: def.fields.len(),
        }
    }

    /// Number of uploaded columns that reached a field.
    pub fn mapped_count(&self) -> usize {
        self.targets.iter().flatten().count()
    }

    /// One raw cell per field; fields with no uploaded column are `Empty`.
    pub fn map_row(&self, row: &SheetRow) -> Vec<RawCell> {
        let mut cells = vec![RawCell::Empty; self.width];
        for (target, cell) in self.targets.iter().zip(&row.cells) {
            if let Some(idx) = target {
                cells[*idx] = cell.clone();
            }
        }
        cells
    }
}

/// Coerces one carry-down-resolved row into its record.
pub fn assemble(def: &EntityDef, cells: &[RawCell], line: usize) -> AssembledRecord {
    let values = def
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let raw = cells.get(idx).unwrap_or(&RawCell::Empty);
            FieldValue::coerce(field.kind, raw)
        })
        .collect();
    AssembledRecord { line, values }
}
