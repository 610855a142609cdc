use super::{Sheet, SheetNames};
use crate::Result;
use crate::table::Cell;
use ohno::bail;
use rust_xlsxwriter::{DocProperties, Format, Workbook, Worksheet};
use std::io::Write;

/// Last row index a worksheet can hold, header included.
const MAX_ROWS: usize = 1_048_576;

/// Last column index a worksheet can hold.
const MAX_COLUMNS: usize = 16_384;

const DECIMAL_FORMAT: &str = "0.00";

/// Writes `sheets` as one workbook, in order.
///
/// Each sheet gets a bold frozen header row followed by one row per table row.
/// Numbers are written as numbers, empty cells are left blank.
pub fn generate<W: Write>(sheets: &[Sheet], writer: &mut W) -> Result<()> {
    let mut workbook = Workbook::new();

    let properties = DocProperties::new().set_author("parc-conso");
    let _ = workbook.set_properties(&properties);

    let header_format = Format::new().set_bold();
    let decimal_format = Format::new().set_num_format(DECIMAL_FORMAT);

    let mut names = SheetNames::new();
    for sheet in sheets {
        let name = names.claim(&sheet.name);
        let worksheet = workbook.add_worksheet().set_name(&name)?;
        write_sheet(worksheet, sheet, &header_format, &decimal_format)?;
    }

    if sheets.is_empty() {
        let _ = workbook.add_worksheet();
    }

    let data = workbook.save_to_buffer()?;
    writer.write_all(&data)?;

    Ok(())
}

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet, header_format: &Format, decimal_format: &Format) -> Result<()> {
    let table = &sheet.table;
    if table.row_count() >= MAX_ROWS {
        bail!("sheet '{}' has {} rows, more than a worksheet can hold", sheet.name, table.row_count());
    }
    if table.column_count() > MAX_COLUMNS {
        bail!("sheet '{}' has {} columns, more than a worksheet can hold", sheet.name, table.column_count());
    }

    for (col, column) in table.columns().iter().enumerate() {
        #[expect(clippy::cast_possible_truncation, reason = "column count checked against the worksheet limit")]
        let col = col as u16;
        worksheet.write_string_with_format(0, col, &column.name, header_format)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (row_idx, row) in table.rows().iter().enumerate() {
        #[expect(clippy::cast_possible_truncation, reason = "row count checked against the worksheet limit")]
        let row_num = (row_idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            #[expect(clippy::cast_possible_truncation, reason = "column count checked against the worksheet limit")]
            let col = col_idx as u16;
            let format = sheet.decimal_columns.contains(&col_idx).then_some(decimal_format);
            write_cell(worksheet, row_num, col, cell, format)?;
        }
    }

    worksheet.autofit();

    Ok(())
}

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
#[expect(clippy::cast_precision_loss, reason = "Excel stores every number as f64")]
fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Cell, format: Option<&Format>) -> Result<()> {
    match (cell, format) {
        (Cell::Empty, _) => {}
        (Cell::Text(s), _) => {
            worksheet.write_string(row, col, s)?;
        }
        (Cell::Int(i), None) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        (Cell::Int(i), Some(format)) => {
            worksheet.write_number_with_format(row, col, *i as f64, format)?;
        }
        (Cell::Float(f), None) => {
            worksheet.write_number(row, col, *f)?;
        }
        (Cell::Float(f), Some(format)) => {
            worksheet.write_number_with_format(row, col, *f, format)?;
        }
    }
    Ok(())
}
