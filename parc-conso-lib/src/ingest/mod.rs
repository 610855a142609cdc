//! Loading billing exports from disk
//!
//! Inputs are standalone CSV files, ZIP archives holding CSV members, or
//! directories containing either. Every CSV source becomes one normalized
//! [`RecordTable`]. Failures are tracked per source so that one broken file
//! never prevents the others from loading.
//!
//! Exports are read with fixed parameters: Windows-1252 text, `;` field
//! separator, `"` quoting.

mod archive;
mod csv_source;
mod decode;
mod discovery;

pub use archive::{ArchiveEntry, is_csv_name, read_csv_members};
pub use csv_source::{CsvTable, FIELD_SEPARATOR, QUOTE_CHAR, parse_csv, read_csv_table};
pub use decode::decode_windows_1252;
pub use discovery::{Discovery, SourceKind, discover};

use crate::Result;
use crate::table::{CoercionOutcome, RecordTable, merge_tables};
use camino::{Utf8Path, Utf8PathBuf};
use core::fmt::{Display, Formatter};
use log::{info, warn};
use ohno::{IntoAppError, app_err};
use std::fs::{self, File};
use std::io::BufReader;

/// Where a table was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOrigin {
    pub path: Utf8PathBuf,

    /// The archive member name when the table came from a ZIP archive.
    pub member: Option<String>,
}

impl SourceOrigin {
    #[must_use]
    pub const fn file(path: Utf8PathBuf) -> Self {
        Self { path, member: None }
    }

    #[must_use]
    pub const fn member(path: Utf8PathBuf, member: String) -> Self {
        Self { path, member: Some(member) }
    }

    /// The file name without its extension, used to name per-source sheets.
    #[must_use]
    pub fn stem(&self) -> &str {
        match &self.member {
            Some(member) => {
                let base = member.rsplit(['/', '\\']).next().unwrap_or(member);
                Utf8Path::new(base).file_stem().unwrap_or(base)
            }
            None => self.path.file_stem().unwrap_or(self.path.as_str()),
        }
    }
}

impl Display for SourceOrigin {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match &self.member {
            Some(member) => write!(f, "{}!{member}", self.path),
            None => write!(f, "{}", self.path),
        }
    }
}

/// A table and the source it came from.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub origin: SourceOrigin,
    pub table: RecordTable,

    /// Comma-decimal columns that were converted, or left as text because a value was not numeric.
    pub coercions: Vec<(String, CoercionOutcome)>,
}

impl SourceTable {
    /// Columns left as text although some of their values looked like comma decimals.
    #[must_use]
    pub fn reverted_columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.coercions.iter().filter_map(|(name, outcome)| match outcome {
            CoercionOutcome::Reverted { offending } => Some((name.as_str(), offending.as_str())),
            CoercionOutcome::Converted(_) => None,
        })
    }
}

/// A source that could not be loaded.
#[derive(Debug)]
pub struct SourceFailure {
    pub origin: SourceOrigin,
    pub error: ohno::AppError,
}

/// Everything one ingestion pass produced.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub tables: Vec<SourceTable>,
    pub failures: Vec<SourceFailure>,
    pub skipped: Vec<Utf8PathBuf>,
}

impl IngestReport {
    /// `true` when no table at all could be loaded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Concatenates every loaded table, in load order.
    #[must_use]
    pub fn merged(&self) -> RecordTable {
        merge_tables(self.tables.iter().map(|s| s.table.clone()))
    }

    /// Fails with the user-facing "nothing to process" error when no table was loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the report holds no table.
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(app_err!("no CSV files found"));
        }
        Ok(())
    }
}

/// Discovers and loads every CSV source reachable from `inputs`.
#[must_use]
pub fn ingest(inputs: &[Utf8PathBuf], recursive: bool) -> IngestReport {
    let discovery = discover(inputs, recursive);
    let mut report = IngestReport {
        skipped: discovery.skipped,
        ..IngestReport::default()
    };

    for (path, reason) in discovery.missing {
        report.failures.push(SourceFailure {
            origin: SourceOrigin::file(path),
            error: app_err!("{reason}"),
        });
    }

    for (path, kind) in discovery.sources {
        match kind {
            SourceKind::Csv => load_csv_file(&path, &mut report),
            SourceKind::Zip => load_zip_file(&path, &mut report),
        }
    }

    info!(
        "loaded {} table(s), {} source(s) failed, {} path(s) skipped",
        report.tables.len(),
        report.failures.len(),
        report.skipped.len()
    );
    report
}

fn load_csv_file(path: &Utf8Path, report: &mut IngestReport) {
    let origin = SourceOrigin::file(path.to_path_buf());
    let table = fs::read(path)
        .into_app_err_with(|| format!("reading '{path}'"))
        .and_then(|bytes| read_csv_table(&bytes));
    record(origin, table, report);
}

fn load_zip_file(path: &Utf8Path, report: &mut IngestReport) {
    let entries = File::open(path)
        .into_app_err_with(|| format!("opening '{path}'"))
        .and_then(|file| read_csv_members(BufReader::new(file)));

    let entries = match entries {
        Ok(entries) => entries,
        Err(error) => {
            warn!("unable to read archive '{path}': {error}");
            report.failures.push(SourceFailure {
                origin: SourceOrigin::file(path.to_path_buf()),
                error,
            });
            return;
        }
    };

    for entry in entries {
        let origin = SourceOrigin::member(path.to_path_buf(), entry.name);
        let table = entry.contents.and_then(|bytes| read_csv_table(&bytes));
        record(origin, table, report);
    }
}

fn record(origin: SourceOrigin, table: Result<CsvTable>, report: &mut IngestReport) {
    match table {
        Ok(CsvTable { table, coercions }) => {
            info!("read {} row(s) and {} column(s) from '{origin}'", table.row_count(), table.column_count());
            let source = SourceTable { origin, table, coercions };
            for (column, offending) in source.reverted_columns() {
                info!("column '{column}' of '{}' kept as text, '{offending}' is not a number", source.origin);
            }
            report.tables.push(source);
        }
        Err(error) => {
            warn!("unable to load '{origin}': {error}");
            report.failures.push(SourceFailure { origin, error });
        }
    }
}
