//! Common processing logic shared between the merge and conso commands.

use super::Host;
use super::config::Config;
use crate::Result;
use crate::consumption::{ConsumptionSummary, RejectReason, SummaryOutcome};
use crate::ingest::IngestReport;
use crate::reports::{Sheet, generate_xlsx};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use log::info;
use ohno::IntoAppError;
use std::fs::File;
use std::io::{BufWriter, Write};

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments accepted by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to configuration file (default is `parc-conso.toml` in the current directory)
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

impl GlobalArgs {
    /// Initialize logging and load the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded
    pub fn setup(&self) -> Result<Config> {
        init_logging(self.log_level);
        Config::load(Utf8Path::new("."), self.config.as_ref())
    }
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a logger may already be installed when commands run more than once in a process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

/// Tells the user about inputs that were skipped or could not be read.
pub fn report_ingest_problems<H: Host>(host: &mut H, report: &IngestReport) {
    for path in &report.skipped {
        let _ = writeln!(host.error(), "Skipped '{path}': not a .csv or .zip file");
    }

    if !report.failures.is_empty() {
        let _ = writeln!(host.error(), "Unable to read {} source(s)", report.failures.len());
        for failure in &report.failures {
            let _ = writeln!(host.error(), "  {}: {}", failure.origin, failure.error);
        }
    }
}

/// Stops the command when no table could be loaded at all.
///
/// # Errors
///
/// Returns the "no CSV files found" error after printing it.
pub fn require_tables<H: Host>(host: &mut H, report: &IngestReport) -> Result<()> {
    if let Err(e) = report.ensure_not_empty() {
        let _ = writeln!(host.error(), "{e}");
        return Err(e);
    }
    Ok(())
}

/// Tells the user how many data usage rows the summary left out, and why.
pub fn report_rejected_rows<H: Host>(host: &mut H, summary: &ConsumptionSummary) {
    if summary.rejected.is_empty() {
        return;
    }

    let count = |wanted: fn(&RejectReason) -> bool| summary.rejected.iter().filter(|r| wanted(&r.reason)).count();
    let missing_date = count(|r| matches!(r, RejectReason::MissingDate));
    let invalid_date = count(|r| matches!(r, RejectReason::InvalidDate(_)));
    let missing_subscriber = count(|r| matches!(r, RejectReason::MissingSubscriber));

    let _ = writeln!(
        host.error(),
        "Dropped {} data usage row(s) from the summary: {missing_date} without billing period, {invalid_date} with an invalid billing period, {missing_subscriber} without subscriber number",
        summary.rejected.len()
    );
}

/// Builds the summary sheet, or explains why there is none.
pub fn summary_sheet<H: Host>(host: &mut H, config: &Config, outcome: &SummaryOutcome) -> Option<Sheet> {
    let Some(summary) = outcome.summary() else {
        info!("no consumption summary: {}", outcome.describe());
        return None;
    };

    report_rejected_rows(host, summary);
    info!("consumption summary: {}", outcome.describe());

    let table = summary.to_table(&config.month_names());
    Some(Sheet::new(&config.summary_sheet_name, table).with_decimal_columns(ConsumptionSummary::go_columns()))
}

/// Writes `sheets` to a new workbook at `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the workbook cannot be written
pub fn write_workbook(path: &Utf8Path, sheets: &[Sheet]) -> Result<()> {
    let file = File::create(path).into_app_err_with(|| format!("creating '{path}'"))?;
    let mut writer = BufWriter::new(file);
    generate_xlsx(sheets, &mut writer)?;
    writer.flush().into_app_err_with(|| format!("writing '{path}'"))?;
    Ok(())
}
