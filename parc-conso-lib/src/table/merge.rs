use super::{Cell, Column, ColumnKind, RecordTable};
use std::collections::HashMap;

/// Concatenates tables row-wise over the union of their columns.
///
/// Columns appear in order of first appearance across the inputs. Rows keep
/// their source order, then their original order within each source; no
/// deduplication happens. Cells for columns a source lacks are empty. A column
/// whose kinds differ between sources takes the kind able to hold them all,
/// ignoring sources where that column is entirely blank.
#[must_use]
pub fn merge_tables<I>(tables: I) -> RecordTable
where
    I: IntoIterator<Item = RecordTable>,
{
    let tables: Vec<RecordTable> = tables.into_iter().collect();

    let mut columns: Vec<Column> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut kinds: Vec<Option<ColumnKind>> = Vec::new();

    for table in &tables {
        for (index, column) in table.columns().iter().enumerate() {
            let position = *positions.entry(column.name.clone()).or_insert_with(|| {
                columns.push(Column::text(column.name.clone()));
                kinds.push(None);
                columns.len() - 1
            });

            if table.column_values(index).all(Cell::is_empty) {
                continue;
            }

            kinds[position] = Some(kinds[position].map_or(column.kind, |k| k.unify(column.kind)));
        }
    }

    for (column, kind) in columns.iter_mut().zip(&kinds) {
        column.kind = kind.unwrap_or(ColumnKind::Text);
    }

    let mut merged = RecordTable::with_columns(columns);
    let targets: Vec<ColumnKind> = merged.columns().iter().map(|c| c.kind).collect();

    for table in tables {
        let mapping: Vec<usize> = table.column_names().map(|name| positions[name]).collect();
        for row in table.into_rows() {
            let mut merged_row = vec![Cell::Empty; targets.len()];
            for (cell, &position) in row.into_iter().zip(&mapping) {
                merged_row[position] = cell.into_kind(targets[position]);
            }
            merged.push_row(merged_row);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[Cell]]) -> RecordTable {
        let mut t = RecordTable::with_headers(headers.iter().copied());
        for row in rows {
            t.push_row(row.to_vec());
        }
        t
    }

    fn txt(s: &str) -> Cell {
        Cell::Text(s.into())
    }

    #[test]
    fn test_merge_empty_input() {
        let merged = merge_tables(Vec::new());
        assert_eq!(merged.column_count(), 0);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_merge_union_of_columns_in_source_order() {
        let a = table(&["x", "y"], &[&[txt("a1x"), txt("a1y")], &[txt("a2x"), txt("a2y")]]);
        let b = table(&["y", "z"], &[&[txt("b1y"), txt("b1z")]]);

        let merged = merge_tables([a, b]);

        assert_eq!(merged.column_names().collect::<Vec<_>>(), vec!["x", "y", "z"]);
        assert_eq!(merged.row_count(), 3);
        assert_eq!(merged.rows()[0], vec![txt("a1x"), txt("a1y"), Cell::Empty]);
        assert_eq!(merged.rows()[1], vec![txt("a2x"), txt("a2y"), Cell::Empty]);
        assert_eq!(merged.rows()[2], vec![Cell::Empty, txt("b1y"), txt("b1z")]);
    }

    #[test]
    fn test_merge_keeps_duplicates() {
        let a = table(&["x"], &[&[txt("same")]]);
        let b = table(&["x"], &[&[txt("same")]]);
        let merged = merge_tables([a, b]);
        assert_eq!(merged.row_count(), 2);
        assert_eq!(merged.rows()[0], merged.rows()[1]);
    }

    #[test]
    fn test_merge_unifies_kinds() {
        let mut a = table(&["n", "t"], &[&[Cell::Int(1), Cell::Int(5)]]);
        let mut b = table(&["n", "t"], &[&[Cell::Float(2.5), txt("five")]]);
        a.replace_column(0, ColumnKind::Int, vec![Cell::Int(1)]);
        a.replace_column(1, ColumnKind::Int, vec![Cell::Int(5)]);
        b.replace_column(0, ColumnKind::Float, vec![Cell::Float(2.5)]);

        let merged = merge_tables([a, b]);

        assert_eq!(merged.columns()[0].kind, ColumnKind::Float);
        assert_eq!(merged.columns()[1].kind, ColumnKind::Text);
        assert_eq!(merged.rows()[0], vec![Cell::Float(1.0), txt("5")]);
        assert_eq!(merged.rows()[1], vec![Cell::Float(2.5), txt("five")]);
    }

    #[test]
    fn test_merge_ignores_blank_columns_when_unifying() {
        let mut a = table(&["n"], &[&[Cell::Int(3)]]);
        a.replace_column(0, ColumnKind::Int, vec![Cell::Int(3)]);
        let b = table(&["n"], &[&[Cell::Empty]]);

        let merged = merge_tables([a, b]);

        assert_eq!(merged.columns()[0].kind, ColumnKind::Int);
        assert_eq!(merged.rows()[1], vec![Cell::Empty]);
    }
}
