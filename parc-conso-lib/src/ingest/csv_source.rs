use super::decode::decode_windows_1252;
use crate::Result;
use crate::table::{Cell, CoercionOutcome, RecordTable, infer_column_types, normalize_decimal_commas};
use csv::{ReaderBuilder, StringRecord};
use ohno::{IntoAppError, bail};
use std::collections::HashMap;

pub const FIELD_SEPARATOR: u8 = b';';
pub const QUOTE_CHAR: u8 = b'"';

/// A normalized export along with what comma normalization did to its columns.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub table: RecordTable,
    pub coercions: Vec<(String, CoercionOutcome)>,
}

/// Reads a semicolon-separated export and normalizes its numeric columns.
///
/// # Errors
///
/// Returns an error if the input has no header row, if a record is malformed,
/// or if a record holds more non-empty fields than the header has columns.
pub fn read_csv_table(bytes: &[u8]) -> Result<CsvTable> {
    let mut table = parse_csv(bytes)?;
    infer_column_types(&mut table);
    let coercions = normalize_decimal_commas(&mut table);
    Ok(CsvTable { table, coercions })
}

/// Parses the export into a table of raw text cells.
///
/// # Errors
///
/// Returns an error if the input has no header row or a record is malformed.
pub fn parse_csv(bytes: &[u8]) -> Result<RecordTable> {
    let text = decode_windows_1252(bytes);

    let mut reader = ReaderBuilder::new()
        .delimiter(FIELD_SEPARATOR)
        .quote(QUOTE_CHAR)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().into_app_err("reading the header row")?.clone();
    if headers.is_empty() {
        bail!("no columns to parse from the input");
    }

    let mut table = RecordTable::with_headers(column_names(&headers));
    let width = table.column_count();

    let mut record = StringRecord::new();
    while reader.read_record(&mut record).into_app_err("reading a record")? {
        if record.len() > width && record.iter().skip(width).any(|f| !f.trim().is_empty()) {
            let line = record.position().map_or(0, csv::Position::line);
            bail!("line {line}: expected {width} fields, found {}", record.len());
        }
        table.push_row(record.iter().take(width).map(Cell::from_field).collect());
    }

    Ok(table)
}

/// Cleans header names: blank names become `Unnamed: <index>` and repeated
/// names get a `.<n>` suffix.
fn column_names(headers: &StringRecord) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let base = if raw.trim().is_empty() {
                format!("Unnamed: {index}")
            } else {
                raw.to_string()
            };

            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 { base } else { format!("{base}.{count}") };
            *count += 1;
            name
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::decode::encode_windows_1252;
    use crate::table::ColumnKind;

    #[test]
    fn test_read_semicolon_separated() {
        let table = parse_csv(b"a;b\n1;x\n2;y\n").unwrap();
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[1][1], Cell::Text("y".into()));
    }

    #[test]
    fn test_quoted_fields_keep_separators() {
        let table = parse_csv(b"name;note\n\"Dupont; Jean\";\"dit \"\"JD\"\"\"\n").unwrap();
        assert_eq!(table.rows()[0][0], Cell::Text("Dupont; Jean".into()));
        assert_eq!(table.rows()[0][1], Cell::Text("dit \"JD\"".into()));
    }

    #[test]
    fn test_legacy_encoding_headers() {
        let bytes = encode_windows_1252("Numéro de l\u{2019}utilisateur;Prénom\n42;Zoé\n");
        let table = parse_csv(&bytes).unwrap();
        assert!(table.has_column("Numéro de l\u{2019}utilisateur"));
        assert_eq!(table.value(0, "Prénom"), Some(&Cell::Text("Zoé".into())));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = parse_csv(b"a;b;c\n1\n").unwrap();
        assert_eq!(table.rows()[0], vec![Cell::Text("1".into()), Cell::Empty, Cell::Empty]);
    }

    #[test]
    fn test_trailing_empty_fields_are_tolerated() {
        let table = parse_csv(b"a;b\n1;2;\n").unwrap();
        assert_eq!(table.rows()[0].len(), 2);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let result = parse_csv(b"a;b\n1;2;3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(parse_csv(b"").is_err());
    }

    #[test]
    fn test_header_names_are_made_unique() {
        let table = parse_csv(b"x;;x;x\n1;2;3;4\n").unwrap();
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["x", "Unnamed: 1", "x.1", "x.2"]);
    }

    #[test]
    fn test_read_csv_table_normalizes_columns() {
        let CsvTable { table, coercions } =
            read_csv_table("montant;libelle;tel\n1 234,5;a,b;0612345678\n2,25;c;0698765432\n".as_bytes()).unwrap();
        assert_eq!(
            coercions,
            vec![
                ("montant".to_string(), CoercionOutcome::Converted(ColumnKind::Float)),
                ("libelle".to_string(), CoercionOutcome::Reverted { offending: "a,b".into() }),
            ]
        );
        let kinds: Vec<_> = table.columns().iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ColumnKind::Float, ColumnKind::Text, ColumnKind::Text]);
        assert_eq!(table.rows()[0][0], Cell::Float(1234.5));
        assert_eq!(table.rows()[0][1], Cell::Text("a,b".into()));
    }
}
