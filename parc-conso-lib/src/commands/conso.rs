use super::Host;
use super::common::{GlobalArgs, report_ingest_problems, require_tables, summary_sheet, write_workbook};
use crate::Result;
use crate::ingest::ingest;
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ConsoArgs {
    /// Directory holding the CSV exports (ZIP archives are read too)
    #[arg(value_name = "FOLDER")]
    pub folder: Utf8PathBuf,

    /// Output Excel file
    #[arg(long, short = 'o', value_name = "FILE", default_value = "Analyse de consommation.xlsx")]
    pub output: Utf8PathBuf,

    /// Scan the directory recursively
    #[arg(long, short = 'r')]
    pub recursive: bool,
}

/// Writes the monthly data consumption summary of every export in a folder.
///
/// Nothing is written when the summary would be empty.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, no source could be read,
/// or the workbook cannot be written
pub fn process_conso<H: Host>(host: &mut H, global: &GlobalArgs, args: &ConsoArgs) -> Result<()> {
    let config = global.setup()?;

    let report = ingest(core::slice::from_ref(&args.folder), args.recursive);
    report_ingest_problems(host, &report);
    require_tables(host, &report)?;

    let merged = report.merged();
    let outcome = config.aggregator().summarize(&merged);

    let Some(sheet) = summary_sheet(host, &config, &outcome) else {
        let _ = writeln!(host.output(), "Nothing to report: {}", outcome.describe());
        return Ok(());
    };

    write_workbook(&args.output, &[sheet])?;
    let _ = writeln!(host.output(), "Created {}", args.output);
    Ok(())
}
