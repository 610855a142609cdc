use super::{Cell, ColumnKind};

/// A named column and the kind of values it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Text,
        }
    }
}

/// Rows of cells sharing one ordered header.
///
/// Every row has exactly one cell per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
}

impl RecordTable {
    /// A table with no columns and no rows.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// A table with the given text columns and no rows.
    #[must_use]
    pub fn with_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_columns(headers.into_iter().map(Column::text).collect())
    }

    #[must_use]
    pub const fn with_columns(columns: Vec<Column>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Appends a row, padding it with empty cells or cutting it to the column count.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Empty);
        self.rows.push(row);
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn into_rows(self) -> impl Iterator<Item = Vec<Cell>> {
        self.rows.into_iter()
    }

    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `true` when the table holds no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The value of the named column in row `row`.
    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// All values of the column at `index`, in row order.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().filter_map(move |r| r.get(index))
    }

    /// Replaces the values of a column, changing its kind.
    ///
    /// `values` must hold one cell per row.
    pub(crate) fn replace_column(&mut self, index: usize, kind: ColumnKind, values: Vec<Cell>) {
        debug_assert_eq!(values.len(), self.rows.len());
        for (row, value) in self.rows.iter_mut().zip(values) {
            if let Some(slot) = row.get_mut(index) {
                *slot = value;
            }
        }
        if let Some(column) = self.columns.get_mut(index) {
            column.kind = kind;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_row_pads_and_truncates() {
        let mut table = RecordTable::with_headers(["a", "b"]);
        table.push_row(vec![Cell::Int(1)]);
        table.push_row(vec![Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
        assert_eq!(table.rows()[0], vec![Cell::Int(1), Cell::Empty]);
        assert_eq!(table.rows()[1], vec![Cell::Int(1), Cell::Int(2)]);
    }

    #[test]
    fn test_value_lookup() {
        let mut table = RecordTable::with_headers(["a", "b"]);
        table.push_row(vec![Cell::Int(1), Cell::Text("x".into())]);
        assert_eq!(table.value(0, "b"), Some(&Cell::Text("x".into())));
        assert_eq!(table.value(0, "c"), None);
        assert_eq!(table.value(1, "a"), None);
    }

    #[test]
    fn test_empty_table() {
        let table = RecordTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.column_names().count(), 0);
    }
}
