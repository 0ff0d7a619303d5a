//! First-sheet reader.
//!
//! Opens any container `calamine` understands (chosen by file extension),
//! takes the first sheet and returns its header row plus every following row
//! as raw cells aligned with the headers.

use crate::error::IngestError;
use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::fmt;
use std::path::Path;

/// A cell as it came out of the spreadsheet, before any coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl RawCell {
    /// Empty, or text that is only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// The ditto token: `"do"`, any case, surrounding whitespace ignored.
    pub fn is_ditto(&self) -> bool {
        matches!(self, RawCell::Text(s) if s.trim().eq_ignore_ascii_case("do"))
    }

    /// Holds a value of its own: neither blank nor ditto.
    pub fn is_concrete(&self) -> bool {
        !self.is_blank() && !self.is_ditto()
    }
}

impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawCell::Empty => Ok(()),
            RawCell::Text(s) => f.write_str(s),
            RawCell::Number(n) => write!(f, "{}", n),
            RawCell::Bool(b) => write!(f, "{}", b),
            RawCell::DateTime(dt) if dt.time() == chrono::NaiveTime::MIN => {
                write!(f, "{}", dt.date())
            }
            RawCell::DateTime(dt) => write!(f, "{}", dt),
        }
    }
}

/// Converts a spreadsheet serial number to a timestamp.
///
/// Day zero is 1899-12-30 rather than 1900-01-00: the 1900 system counts a
/// non-existent 1900-02-29, and starting one day earlier lines every serial
/// from March 1900 onwards up with the real calendar.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    epoch.checked_add_signed(Duration::try_milliseconds(millis as i64)?)
}

/// One data row of the uploaded sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// 1-based line in the sheet, header included.
    pub line: usize,
    /// One cell per header, padded with [`RawCell::Empty`].
    pub cells: Vec<RawCell>,
}

impl SheetRow {
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(RawCell::is_blank)
    }
}

/// The first sheet of an uploaded workbook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetData {
    pub headers: Vec<String>,
    pub rows: Vec<SheetRow>,
}

impl SheetData {
    /// Header/value pairs of one row, in column order.
    pub fn entries<'a>(
        &'a self,
        row: &'a SheetRow,
    ) -> impl Iterator<Item = (&'a str, &'a RawCell)> + 'a {
        self.headers.iter().map(String::as_str).zip(row.cells.iter())
    }

    /// Renders a row as `{header: value, ...}` for operator diagnostics.
    pub fn describe(&self, row: &SheetRow) -> String {
        let parts: Vec<String> = self
            .entries(row)
            .filter(|(_, cell)| !cell.is_blank())
            .map(|(header, cell)| format!("{:?}: {:?}", header, cell.to_string()))
            .collect();
        format!("{{{}}}", parts.join(", "))
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}

pub fn read_workbook(path: &Path) -> Result<SheetData, IngestError> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::UnreadableWorkbook("No sheets found in Excel file".into()))?;

    let range = workbook.worksheet_range(&sheet_name)?;
    Ok(sheet_from_range(&range))
}

fn sheet_from_range(range: &Range<Data>) -> SheetData {
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(header_text).collect(),
        None => return SheetData::default(),
    };
    let first_line = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);

    let rows = rows
        .enumerate()
        .map(|(idx, row)| {
            let mut cells: Vec<RawCell> = row.iter().map(convert_cell).collect();
            cells.resize(headers.len(), RawCell::Empty);
            SheetRow {
                line: first_line + idx + 1,
                cells,
            }
        })
        .collect();

    SheetData { headers, rows }
}

fn header_text(cell: &Data) -> String {
    match convert_cell(cell) {
        RawCell::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

fn convert_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Float(f) => RawCell::Number(*f),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => RawCell::Number(dt.as_f64()),
        Data::DateTime(dt) => serial_to_datetime(dt.as_f64())
            .map(RawCell::DateTime)
            .unwrap_or(RawCell::Empty),
        Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_time(chrono::NaiveTime::MIN))
            })
            .map(RawCell::DateTime)
            .unwrap_or_else(|_| RawCell::Text(s.clone())),
        Data::DurationIso(s) => RawCell::Text(s.clone()),
    }
}
