use super::Store;
use crate::entities::EntityDef;
use crate::error::StoreError;
use crate::ingest::assemble::{AssembledRecord, FieldValue};
use crate::ingest::bulk::RecordSink;
use common::model::field::FieldKind;
use rusqlite::types::{ToSqlOutput, Value as SqlValue};
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row, ToSql};
use serde_json::{Map, Number, Value};

/// A stored row rendered as JSON, keyed by canonical column name plus `id`,
/// `created_at` and `updated_at`.
pub type Record = Map<String, Value>;

impl ToSql for FieldValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            FieldValue::Text(s) => ToSqlOutput::from(s.as_str()),
            FieldValue::Date(Some(d)) => {
                ToSqlOutput::Owned(SqlValue::Text(d.format("%Y-%m-%d").to_string()))
            }
            FieldValue::Decimal(Some(n)) => ToSqlOutput::Owned(SqlValue::Real(*n)),
            FieldValue::Boolean(b) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*b))),
            FieldValue::Date(None) | FieldValue::Decimal(None) => {
                ToSqlOutput::Owned(SqlValue::Null)
            }
        })
    }
}

fn select_columns(def: &EntityDef) -> String {
    let mut columns = vec!["id"];
    columns.extend(def.column_names());
    columns.extend(["created_at", "updated_at"]);
    columns.join(", ")
}

fn record_from_row(def: &EntityDef, row: &Row<'_>) -> rusqlite::Result<Record> {
    let mut record = Map::new();
    record.insert("id".into(), Value::from(row.get::<_, i64>(0)?));
    for (idx, field) in def.fields.iter().enumerate() {
        let col = idx + 1;
        let value = match field.kind {
            FieldKind::Text | FieldKind::Date => row
                .get::<_, Option<String>>(col)?
                .map(Value::String)
                .unwrap_or(Value::Null),
            FieldKind::Decimal => row
                .get::<_, Option<f64>>(col)?
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldKind::Boolean => Value::Bool(row.get::<_, Option<i64>>(col)?.unwrap_or(0) != 0),
        };
        record.insert(field.name.into(), value);
    }
    let tail = def.fields.len() + 1;
    record.insert("created_at".into(), Value::String(row.get(tail)?));
    record.insert("updated_at".into(), Value::String(row.get(tail + 1)?));
    Ok(record)
}

fn insert_with(
    conn: &Connection,
    def: &EntityDef,
    record: &AssembledRecord,
) -> Result<i64, StoreError> {
    let columns: Vec<&str> = def.column_names().collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        def.table,
        columns.join(", "),
        placeholders.join(", ")
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    stmt.execute(params_from_iter(record.values.iter()))?;
    Ok(conn.last_insert_rowid())
}

impl Store {
    pub fn insert_record(
        &self,
        def: &EntityDef,
        record: &AssembledRecord,
    ) -> Result<i64, StoreError> {
        let conn = self.lock()?;
        insert_with(&conn, def, record)
    }

    pub fn get_record(&self, def: &EntityDef, id: i64) -> Result<Record, StoreError> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM {} WHERE id = ?1", select_columns(def), def.table);
        conn.query_row(&sql, [id], |row| record_from_row(def, row))
            .optional()?
            .ok_or(StoreError::NotFound)
    }

    /// Newest first. Returns the page and the total row count.
    pub fn list_records(
        &self,
        def: &EntityDef,
        limit: u32,
        offset: u32,
    ) -> Result<(Vec<Record>, i64), StoreError> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {} FROM {} ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2",
            select_columns(def),
            def.table
        );
        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map([limit, offset], |row| record_from_row(def, row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        let count_sql = format!("SELECT COUNT(*) FROM {}", def.table);
        let total: i64 = conn.query_row(&count_sql, [], |row| row.get(0))?;
        Ok((records, total))
    }

    /// Every record in insertion order.
    pub fn all_records(&self, def: &EntityDef) -> Result<Vec<Record>, StoreError> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM {} ORDER BY id", select_columns(def), def.table);
        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map([], |row| record_from_row(def, row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    pub fn update_record(
        &self,
        def: &EntityDef,
        id: i64,
        record: &AssembledRecord,
    ) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let assignments: Vec<String> = def
            .column_names()
            .enumerate()
            .map(|(i, name)| format!("{} = ?{}", name, i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {}, updated_at = CURRENT_TIMESTAMP WHERE id = ?{}",
            def.table,
            assignments.join(", "),
            def.fields.len() + 1
        );
        let mut params: Vec<&dyn ToSql> = record.values.iter().map(|v| v as &dyn ToSql).collect();
        params.push(&id);
        match conn.execute(&sql, params.as_slice())? {
            0 => Err(StoreError::NotFound),
            _ => Ok(()),
        }
    }

    pub fn delete_record(&self, def: &EntityDef, id: i64) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let sql = format!("DELETE FROM {} WHERE id = ?1", def.table);
        match conn.execute(&sql, [id])? {
            0 => Err(StoreError::NotFound),
            _ => Ok(()),
        }
    }
}

impl RecordSink for Store {
    fn insert(&mut self, def: &EntityDef, record: &AssembledRecord) -> Result<i64, StoreError> {
        self.insert_record(def, record)
    }
}
