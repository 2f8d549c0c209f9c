use serde::{Deserialize, Serialize};

pub const MIN_COLUMNS: usize = 1;
pub const MAX_COLUMNS: usize = 6;
pub const DEFAULT_COLUMNS: usize = 3;

/// Table payload: a rectangular grid whose first row is the header row.
///
/// Every row holds exactly `columns` cells after any mutation made through
/// this type, and the header row is never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBlock {
    #[serde(default = "default_columns")]
    columns: usize,
    #[serde(rename = "tableData", default)]
    rows: Vec<Vec<String>>,
    #[serde(default)]
    caption: String,
}

fn default_columns() -> usize {
    DEFAULT_COLUMNS
}

impl Default for TableBlock {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: vec![vec![String::new(); DEFAULT_COLUMNS]; 2],
            caption: String::new(),
        }
    }
}

impl TableBlock {
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub(crate) fn caption_mut(&mut self) -> &mut String {
        &mut self.caption
    }

    /// Header row, if the table has any rows at all
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Data rows after the header
    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Cell text, treating cells missing from ragged rows as empty
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", String::as_str)
    }

    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut String> {
        self.rows.get_mut(row).and_then(|r| r.get_mut(col))
    }

    /// Change the column count, clamped to `MIN_COLUMNS..=MAX_COLUMNS`.
    ///
    /// Rows are truncated or padded on the right; existing text in retained
    /// columns is kept. Returns the column count actually applied.
    pub fn set_columns(&mut self, requested: usize) -> usize {
        let columns = requested.clamp(MIN_COLUMNS, MAX_COLUMNS);
        self.columns = columns;
        for row in &mut self.rows {
            row.resize(columns, String::new());
        }
        columns
    }

    /// Bring a table read from disk back within the grid rules.
    ///
    /// A missing or zero column count means the default of 3; anything else
    /// is clamped. Rows are padded or cut to the column count, and a table
    /// without rows gets an empty header row.
    pub(crate) fn normalize(&mut self) {
        let requested = if self.columns == 0 {
            DEFAULT_COLUMNS
        } else {
            self.columns
        };
        let columns = self.set_columns(requested);
        if self.rows.is_empty() {
            self.rows.push(vec![String::new(); columns]);
        }
    }

    /// Write a cell; out-of-range addresses are ignored
    pub fn set_cell(&mut self, row: usize, col: usize, value: impl Into<String>) -> bool {
        match self.cell_mut(row, col) {
            Some(cell) => {
                *cell = value.into();
                true
            }
            None => false,
        }
    }

    pub fn add_row(&mut self) {
        self.rows.push(vec![String::new(); self.columns]);
    }

    /// Drop the last row, refusing when only the header row is left
    pub fn remove_last_row(&mut self) -> Option<Vec<String>> {
        if self.rows.len() <= 1 {
            return None;
        }
        self.rows.pop()
    }
}
