//! Input adapter for the external document-analysis engine.
//!
//! The pipeline consumes three views of a processed document: recognized
//! text lines, key/value form fields, and a flat table-cell stream. The
//! shape is engine-agnostic; whichever OCR service produced the result,
//! the collaborator maps it into [`OcrResult`] before calling in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One recognized table cell, positioned by 1-based row/column indices.
///
/// Cells arrive row-major in ascending index order, exactly as the engine
/// emitted them. Multiple tables in one document share a single stream;
/// the indices restart at (1, 1) for each new table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    pub row: u32,
    pub column: u32,
    pub text: String,
}

impl TableCell {
    pub fn new(row: u32, column: u32, text: impl Into<String>) -> Self {
        Self {
            row,
            column,
            text: text.into(),
        }
    }
}

/// A reassembled table grid: rows of cell text.
pub type Table = Vec<Vec<String>>;

/// Result of OCR processing on one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized text lines in reading order.
    pub lines: Vec<String>,

    /// Form-field mapping from label text to value text. Keys are unique;
    /// a label with no resolvable value maps to an empty string.
    pub form_fields: BTreeMap<String, String>,

    /// Table cells in emission order.
    pub cells: Vec<TableCell>,
}

impl OcrResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full text, lines joined with newlines in reading order.
    pub fn full_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Append a table grid to the cell stream, numbering rows and columns
    /// from 1 the way the engine does.
    pub fn push_table<R, S>(&mut self, rows: &[R])
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        for (r, row) in rows.iter().enumerate() {
            for (c, text) in row.as_ref().iter().enumerate() {
                self.cells
                    .push(TableCell::new(r as u32 + 1, c as u32 + 1, text.as_ref()));
            }
        }
    }

    /// Reassemble the cell stream into table grids.
    ///
    /// A new table starts whenever the indices reset to (1, 1) mid-stream,
    /// and a new row whenever the column index resets to 1. Back-to-back
    /// tables in a single result therefore come out as distinct grids
    /// rather than one merged table.
    pub fn tables(&self) -> Vec<Table> {
        let mut tables = Vec::new();
        let mut table: Table = Vec::new();
        let mut row: Vec<String> = Vec::new();

        for cell in &self.cells {
            if cell.column == 1 {
                if !row.is_empty() {
                    table.push(std::mem::take(&mut row));
                }
                if cell.row == 1 && !table.is_empty() {
                    tables.push(std::mem::take(&mut table));
                }
            }
            row.push(cell.text.clone());
        }

        if !row.is_empty() {
            table.push(row);
        }
        if !table.is_empty() {
            tables.push(table);
        }

        tables
    }
}
