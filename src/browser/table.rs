use crate::backend::{ExportRow, ListingField, ListingRecord, COLUMN_COUNT};

/// One rendered table row: row number followed by the listing fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    cells: [String; COLUMN_COUNT],
}

impl TableRow {
    fn from_record(index: usize, record: &ListingRecord) -> Self {
        let mut cells: [String; COLUMN_COUNT] = Default::default();
        cells[0] = (index + 1).to_string();
        for (slot, field) in cells[1..].iter_mut().zip(ListingField::ALL) {
            *slot = record.field(field);
        }
        Self { cells }
    }

    pub fn cells(&self) -> &[String; COLUMN_COUNT] {
        &self.cells
    }
}

/// The listing table as the user sees it. Export reads from here, so cell
/// edits made after a fetch are part of the exported file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingTable {
    rows: Vec<TableRow>,
}

impl ListingTable {
    /// Rows in backend order, numbered from 1.
    pub fn from_records(records: &[ListingRecord]) -> Self {
        let rows = records
            .iter()
            .enumerate()
            .map(|(i, record)| TableRow::from_record(i, record))
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Overwrite one data cell. Column 0 (row number) is not editable.
    /// Returns false when the cell does not exist.
    pub fn set_cell(&mut self, row: usize, col: usize, value: &str) -> bool {
        if col == 0 || col >= COLUMN_COUNT {
            return false;
        }
        match self.rows.get_mut(row) {
            Some(r) => {
                r.cells[col] = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn export_rows(&self) -> Vec<ExportRow> {
        self.rows
            .iter()
            .map(|row| ExportRow::new(row.cells.clone()))
            .collect()
    }
}
