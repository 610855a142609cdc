//! Excel workbook output
//!
//! A workbook is a sequence of [`Sheet`]s, each a named [`RecordTable`]. The
//! header row is bold and frozen, columns are sized to their content, and the
//! columns listed as decimal are shown with two decimals.
//!
//! Sheet names are made acceptable to spreadsheet applications (no `[]:*?/\`,
//! at most 31 characters) and made unique within the workbook.

mod excel;
mod sheet_name;

pub use excel::generate as generate_xlsx;
pub use sheet_name::{MAX_SHEET_NAME_LEN, SheetNames, sanitize_sheet_name};

use crate::table::RecordTable;

/// One worksheet of a workbook.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub table: RecordTable,

    /// Indices of the columns shown with two decimals.
    pub decimal_columns: Vec<usize>,
}

impl Sheet {
    #[must_use]
    pub fn new(name: impl Into<String>, table: RecordTable) -> Self {
        Self {
            name: name.into(),
            table,
            decimal_columns: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_decimal_columns(mut self, columns: impl IntoIterator<Item = usize>) -> Self {
        self.decimal_columns = columns.into_iter().collect();
        self
    }
}
