//! JSON request bodies to records.
//!
//! Keys go through the same alias table as spreadsheet headers, so
//! `fc_value`, `s_line` or `container_no` reach their canonical columns, and
//! values through the same coercers as sheet cells.

use crate::entities::EntityDef;
use crate::ingest::assemble::{assemble, AssembledRecord};
use crate::ingest::workbook::RawCell;
use serde_json::{Map, Value};

fn json_cell(value: &Value) -> RawCell {
    match value {
        Value::Null => RawCell::Empty,
        Value::Bool(b) => RawCell::Bool(*b),
        Value::Number(n) => n.as_f64().map(RawCell::Number).unwrap_or(RawCell::Empty),
        Value::String(s) => RawCell::Text(s.clone()),
        other => RawCell::Text(other.to_string()),
    }
}

/// Builds a full record from `body`. Unknown keys are ignored and fields
/// without a key get their kind's default. A canonical column name takes
/// precedence over an alias naming the same field.
pub fn record_from_json(def: &EntityDef, body: &Map<String, Value>) -> AssembledRecord {
    let mut cells = vec![RawCell::Empty; def.fields.len()];
    let mut exact = vec![false; def.fields.len()];
    for (key, value) in body {
        let Some(idx) = def.field_index(key) else {
            continue;
        };
        let is_exact = def.fields[idx].name == key;
        if is_exact || !exact[idx] {
            cells[idx] = json_cell(value);
            exact[idx] |= is_exact;
        }
    }
    assemble(def, &cells, 0)
}
