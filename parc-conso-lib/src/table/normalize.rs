use super::{Cell, ColumnKind, RecordTable};
use log::debug;

/// Separators that may appear between digit groups in locale-formatted numbers.
const THOUSANDS_SEPARATORS: [char; 3] = [' ', '\u{a0}', '\u{202f}'];

/// Result of attempting to reinterpret one text column as comma-decimal numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnCoercion {
    /// The column holds no comma, or is not a text column.
    NotApplicable,

    /// Every non-empty value converted; the new cells replace the old ones.
    Converted { kind: ColumnKind, cells: Vec<Cell> },

    /// At least one value is not numeric; the column must stay as it was.
    Rejected { offending: String },
}

/// What happened to a column during [`normalize_decimal_commas`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoercionOutcome {
    Converted(ColumnKind),
    Reverted { offending: String },
}

/// Infers integer and float columns among freshly read text columns.
///
/// A column becomes numeric only when every non-empty value is a plain
/// dot-decimal number. Values with a leading zero such as phone numbers keep
/// the column textual.
pub fn infer_column_types(table: &mut RecordTable) {
    for index in 0..table.column_count() {
        if table.columns()[index].kind != ColumnKind::Text {
            continue;
        }

        let mut has_value = false;
        let mut kind = ColumnKind::Int;
        for cell in table.column_values(index) {
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => match parse_plain_number(s) {
                    Some(Cell::Int(_)) => has_value = true,
                    Some(_) => {
                        has_value = true;
                        kind = ColumnKind::Float;
                    }
                    None => {
                        kind = ColumnKind::Text;
                        break;
                    }
                },
                Cell::Int(_) | Cell::Float(_) => has_value = true,
            }
        }

        if !has_value || kind == ColumnKind::Text {
            continue;
        }

        let cells = table
            .column_values(index)
            .map(|cell| match cell {
                Cell::Text(s) => parse_plain_number(s).unwrap_or_else(|| cell.clone()).into_kind(kind),
                other => other.clone().into_kind(kind),
            })
            .collect();
        table.replace_column(index, kind, cells);
    }
}

/// Converts every text column holding comma-decimal numbers into a numeric column.
///
/// Conversion is all or nothing per column: when any value fails to parse the
/// column is left exactly as it was. Returns the outcome for each column that
/// contained a comma.
pub fn normalize_decimal_commas(table: &mut RecordTable) -> Vec<(String, CoercionOutcome)> {
    let mut outcomes = Vec::new();

    for index in 0..table.column_count() {
        let column = &table.columns()[index];
        if column.kind != ColumnKind::Text {
            continue;
        }
        let name = column.name.clone();

        let values: Vec<Cell> = table.column_values(index).cloned().collect();
        match try_coerce_comma_decimal(&values) {
            ColumnCoercion::NotApplicable => {}
            ColumnCoercion::Converted { kind, cells } => {
                debug!("column '{name}' converted from comma-decimal text to {kind:?}");
                table.replace_column(index, kind, cells);
                outcomes.push((name, CoercionOutcome::Converted(kind)));
            }
            ColumnCoercion::Rejected { offending } => {
                debug!("column '{name}' kept as text, '{offending}' is not numeric");
                outcomes.push((name, CoercionOutcome::Reverted { offending }));
            }
        }
    }

    outcomes
}

/// Attempts the comma-decimal conversion of one column's values without modifying them.
#[must_use]
pub fn try_coerce_comma_decimal(values: &[Cell]) -> ColumnCoercion {
    let has_text = values.iter().any(|c| matches!(c, Cell::Text(_)));
    let all_text = values.iter().all(|c| matches!(c, Cell::Text(_) | Cell::Empty));
    if !has_text || !all_text {
        return ColumnCoercion::NotApplicable;
    }

    if !values.iter().filter_map(Cell::as_text).any(|s| s.contains(',')) {
        return ColumnCoercion::NotApplicable;
    }

    let mut cells = Vec::with_capacity(values.len());
    let mut kind = ColumnKind::Int;
    for value in values {
        let Some(text) = value.as_text() else {
            cells.push(Cell::Empty);
            continue;
        };

        let cleaned: String = text
            .chars()
            .filter(|c| !THOUSANDS_SEPARATORS.contains(c))
            .map(|c| if c == ',' { '.' } else { c })
            .collect();

        match parse_number(&cleaned) {
            Some(cell) => {
                if matches!(cell, Cell::Float(_)) {
                    kind = ColumnKind::Float;
                }
                cells.push(cell);
            }
            None => {
                return ColumnCoercion::Rejected { offending: text.to_string() };
            }
        }
    }

    let cells = cells.into_iter().map(|c| c.into_kind(kind)).collect();
    ColumnCoercion::Converted { kind, cells }
}

/// Parses a dot-decimal number, rejecting values with a significant leading zero.
fn parse_plain_number(text: &str) -> Option<Cell> {
    let digits = text.trim().trim_start_matches(['+', '-']);
    let mut chars = digits.chars();
    if chars.next() == Some('0') && chars.next().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    parse_number(text)
}

fn parse_number(text: &str) -> Option<Cell> {
    let text = text.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) {
        return None;
    }
    if !text.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    if let Ok(i) = text.parse::<i64>() {
        return Some(Cell::Int(i));
    }
    text.parse::<f64>().ok().filter(|f| f.is_finite()).map(Cell::Float)
}
