//! Ditto ("do") resolution.
//!
//! Freight desks carry a paper-ledger habit into their sheets: a cell reading
//! `do` means "same as above". Resolution runs in two passes over the whole
//! sheet. Pass one records, per field, the first concrete value anywhere in
//! the sheet (the reference value). Pass two replaces every ditto cell with
//! that reference value.
//!
//! The reference is the sheet's *first* concrete value, not the nearest one
//! above the ditto: `["100", "do", "200", "do"]` resolves the last cell to
//! `"100"`.

use super::workbook::RawCell;

/// Field index -> first concrete cell seen in the sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceValues {
    values: Vec<Option<RawCell>>,
}

impl ReferenceValues {
    /// Pass one. Every row holds one cell per field.
    pub fn collect(rows: &[Vec<RawCell>]) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut values: Vec<Option<RawCell>> = vec![None; width];
        for row in rows {
            for (slot, cell) in values.iter_mut().zip(row) {
                if slot.is_none() && cell.is_concrete() {
                    *slot = Some(cell.clone());
                }
            }
        }
        Self { values }
    }

    /// Reference value of a field, `None` when the sheet never supplied one.
    pub fn get(&self, field: usize) -> Option<&RawCell> {
        self.values.get(field).and_then(Option::as_ref)
    }

    /// Pass two for one row.
    pub fn apply(&self, row: &mut [RawCell]) {
        for (field, cell) in row.iter_mut().enumerate() {
            if cell.is_ditto() {
                *cell = self.get(field).cloned().unwrap_or(RawCell::Empty);
            }
        }
    }
}

/// Runs both passes over `rows` in place and returns the reference table.
pub fn resolve(rows: &mut [Vec<RawCell>]) -> ReferenceValues {
    let references = ReferenceValues::collect(rows);
    for row in rows.iter_mut() {
        references.apply(row);
    }
    references
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[&str]) -> Vec<Vec<RawCell>> {
        values
            .iter()
            .map(|v| {
                if v.is_empty() {
                    vec![RawCell::Empty]
                } else {
                    vec![RawCell::Text(v.to_string())]
                }
            })
            .collect()
    }

    fn texts(rows: &[Vec<RawCell>]) -> Vec<String> {
        rows.iter().map(|r| r[0].to_string()).collect()
    }

    #[test]
    fn ditto_takes_the_first_concrete_value() {
        let mut rows = column(&["100", "do", "do", "200"]);
        resolve(&mut rows);
        assert_eq!(texts(&rows), ["100", "100", "100", "200"]);
    }

    #[test]
    fn ditto_after_a_new_value_still_uses_the_first() {
        let mut rows = column(&["100", "200", "300", "DO"]);
        resolve(&mut rows);
        assert_eq!(texts(&rows), ["100", "200", "300", "100"]);
    }

    #[test]
    fn reference_may_come_from_a_later_row() {
        let mut rows = column(&["do", "", "MSC", "do"]);
        resolve(&mut rows);
        assert_eq!(texts(&rows), ["MSC", "", "MSC", "MSC"]);
    }

    #[test]
    fn ditto_without_reference_becomes_empty() {
        let mut rows = column(&["do", "", "do"]);
        let references = resolve(&mut rows);
        assert_eq!(references.get(0), None);
        assert!(rows.iter().all(|r| r[0] == RawCell::Empty));
    }

    #[test]
    fn fields_are_independent() {
        let mut rows = vec![
            vec![RawCell::Text("J-1".into()), RawCell::Empty],
            vec![RawCell::Text("do".into()), RawCell::Number(20.0)],
            vec![RawCell::Text("J-3".into()), RawCell::Text("do".into())],
        ];
        let references = resolve(&mut rows);
        assert_eq!(references.get(0), Some(&RawCell::Text("J-1".into())));
        assert_eq!(references.get(1), Some(&RawCell::Number(20.0)));
        assert_eq!(rows[1][0], RawCell::Text("J-1".into()));
        assert_eq!(rows[2][1], RawCell::Number(20.0));
    }

    #[test]
    fn whitespace_is_not_a_reference() {
        let rows = column(&["   ", "x"]);
        let references = ReferenceValues::collect(&rows);
        assert_eq!(references.get(0), Some(&RawCell::Text("x".into())));
        assert_eq!(references.get(5), None);
    }
}
