use super::assemble::AssembledRecord;
use crate::entities::EntityDef;
use crate::error::{RowInsertError, StoreError};
use common::model::upload::UploadResult;

/// Destination of assembled records.
///
/// Implemented by [`Store`](crate::store::Store); tests plug in sinks that
/// fail on purpose.
pub trait RecordSink {
    /// Stores one record and returns its id.
    fn insert(&mut self, def: &EntityDef, record: &AssembledRecord) -> Result<i64, StoreError>;
}

/// An assembled record plus the raw row it came from, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct PreparedRow {
    pub record: AssembledRecord,
    pub raw: String,
}

/// Inserts every row in order, one statement per row.
///
/// A failing row is logged with its raw content and skipped; the batch always
/// runs to the end.
pub fn insert_all<S>(sink: &mut S, def: &EntityDef, rows: &[PreparedRow]) -> UploadResult
where
    S: RecordSink + ?Sized,
{
    let outcomes: Vec<Result<i64, RowInsertError>> = rows
        .iter()
        .map(|row| {
            sink.insert(def, &row.record).map_err(|source| RowInsertError {
                line: row.record.line,
                source,
            })
        })
        .collect();

    let mut inserted_count = 0;
    for (row, outcome) in rows.iter().zip(&outcomes) {
        match outcome {
            Ok(_) => inserted_count += 1,
            Err(e) => log::error!("Error inserting row ({}): {} {}", def.label, row.raw, e),
        }
    }

    UploadResult {
        inserted_count,
        total_count: rows.len(),
    }
}
