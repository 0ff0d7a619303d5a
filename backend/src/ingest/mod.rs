//! Spreadsheet ingestion pipeline.
//!
//! Turns an uploaded workbook into stored import or export records:
//!
//! 1. [`workbook`] reads the first sheet into raw rows.
//! 2. [`headers`] checks the header row against the entity's template.
//! 3. [`assemble::ColumnLayout`] maps uploaded columns onto canonical fields;
//!    blank rows are dropped here.
//! 4. [`carry_down`] resolves ditto cells across the whole sheet.
//! 5. [`assemble::assemble`] coerces each row with [`coerce`].
//! 6. [`bulk::insert_all`] stores rows one by one, tolerating per-row failures.
//!
//! The pipeline is the same for every entity; the differences live in
//! [`EntityDef`].

pub mod assemble;
pub mod bulk;
pub mod carry_down;
pub mod coerce;
pub mod headers;
pub mod workbook;

use crate::entities::EntityDef;
use crate::error::IngestError;
use assemble::ColumnLayout;
use bulk::{PreparedRow, RecordSink};
use common::model::upload::{UploadPhase, UploadResult};
use std::path::Path;
use workbook::{read_workbook, SheetData};

/// Reads `path` and stores its rows through `sink`.
///
/// Fails without inserting anything when the workbook cannot be read, its
/// headers do not match the template, or it has no non-blank data rows.
pub fn ingest_workbook<S>(
    path: &Path,
    def: &EntityDef,
    sink: &mut S,
) -> Result<UploadResult, IngestError>
where
    S: RecordSink + ?Sized,
{
    let mut upload = Upload::start(def);
    let outcome = read_workbook(path).and_then(|sheet| upload.process(&sheet, sink));
    upload.finish(outcome)
}

/// Same as [`ingest_workbook`] for a sheet already in memory.
pub fn ingest_sheet<S>(
    sheet: &SheetData,
    def: &EntityDef,
    sink: &mut S,
) -> Result<UploadResult, IngestError>
where
    S: RecordSink + ?Sized,
{
    let mut upload = Upload::start(def);
    let outcome = upload.process(sheet, sink);
    upload.finish(outcome)
}

/// Prepares every non-blank data row: column mapping, ditto resolution and
/// coercion. Returns an empty vector when the sheet has no data.
pub fn prepare_rows(def: &EntityDef, sheet: &SheetData) -> Vec<PreparedRow> {
    let layout = ColumnLayout::from_headers(def, &sheet.headers);
    log::debug!(
        "{}: {} of {} uploaded columns mapped",
        def.label,
        layout.mapped_count(),
        sheet.headers.len()
    );
    let data_rows: Vec<_> = sheet.rows.iter().filter(|row| !row.is_blank()).collect();

    let mut mapped: Vec<_> = data_rows.iter().map(|row| layout.map_row(row)).collect();
    carry_down::resolve(&mut mapped);

    data_rows
        .iter()
        .zip(&mapped)
        .map(|(row, cells)| PreparedRow {
            record: assemble::assemble(def, cells, row.line),
            raw: sheet.describe(row),
        })
        .collect()
}

/// One upload attempt moving through [`UploadPhase`].
struct Upload<'a> {
    def: &'a EntityDef,
    phase: UploadPhase,
}

impl<'a> Upload<'a> {
    fn start(def: &'a EntityDef) -> Self {
        let mut upload = Self {
            def,
            phase: UploadPhase::Idle,
        };
        upload.advance(UploadPhase::Validating);
        upload
    }

    fn advance(&mut self, next: UploadPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "{:?} -> {:?}",
            self.phase,
            next
        );
        log::debug!("{} upload: {:?} -> {:?}", self.def.label, self.phase, next);
        self.phase = next;
    }

    fn process<S>(&mut self, sheet: &SheetData, sink: &mut S) -> Result<UploadResult, IngestError>
    where
        S: RecordSink + ?Sized,
    {
        if sheet.is_empty() {
            return Err(IngestError::EmptyData);
        }
        headers::validate_headers(&sheet.headers, self.def.expected_headers)?;

        let rows = prepare_rows(self.def, sheet);
        if rows.is_empty() {
            return Err(IngestError::EmptyData);
        }

        self.advance(UploadPhase::Processing);
        Ok(bulk::insert_all(sink, self.def, &rows))
    }

    fn finish(
        mut self,
        outcome: Result<UploadResult, IngestError>,
    ) -> Result<UploadResult, IngestError> {
        match &outcome {
            Ok(result) => {
                self.advance(UploadPhase::Success);
                log::info!(
                    "{} upload: inserted {} of {} rows ({} failed)",
                    self.def.label,
                    result.inserted_count,
                    result.total_count,
                    result.failed_count()
                );
            }
            Err(e) => {
                self.advance(UploadPhase::Error);
                log::warn!("{} upload rejected: {}", self.def.label, e);
            }
        }
        outcome
    }
}
