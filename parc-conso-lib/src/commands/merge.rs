use super::Host;
use super::common::{GlobalArgs, report_ingest_problems, require_tables, summary_sheet, write_workbook};
use crate::Result;
use crate::ingest::ingest;
use crate::reports::Sheet;
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct MergeArgs {
    /// CSV files, ZIP archives of CSV files, or directories containing either
    #[arg(value_name = "PATHS", required = true)]
    pub paths: Vec<Utf8PathBuf>,

    /// Output Excel file
    #[arg(long, short = 'o', value_name = "FILE", default_value = "Analyse de Parc.xlsx")]
    pub output: Utf8PathBuf,

    /// Also write each source table to its own sheet
    #[arg(long)]
    pub sheet_per_file: bool,

    /// Do not add the consumption summary sheet
    #[arg(long)]
    pub no_summary: bool,

    /// Scan directories recursively
    #[arg(long, short = 'r')]
    pub recursive: bool,
}

/// Merges every readable source into one workbook.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, no source could be read,
/// or the workbook cannot be written
pub fn process_merge<H: Host>(host: &mut H, global: &GlobalArgs, args: &MergeArgs) -> Result<()> {
    let config = global.setup()?;

    let report = ingest(&args.paths, args.recursive);
    report_ingest_problems(host, &report);
    require_tables(host, &report)?;

    let merged = report.merged();

    let summary = if args.no_summary {
        None
    } else {
        let outcome = config.aggregator().summarize(&merged);
        let sheet = summary_sheet(host, &config, &outcome);
        if sheet.is_none() {
            let _ = writeln!(host.error(), "No consumption summary: {}", outcome.describe());
        }
        sheet
    };

    let mut sheets = vec![Sheet::new(&config.merged_sheet_name, merged)];
    sheets.extend(summary);
    if args.sheet_per_file {
        sheets.extend(report.tables.iter().map(|source| Sheet::new(source.origin.stem(), source.table.clone())));
    }

    write_workbook(&args.output, &sheets)?;
    let _ = writeln!(host.output(), "Created {}", args.output);
    Ok(())
}
