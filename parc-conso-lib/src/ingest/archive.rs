use crate::Result;
use log::debug;
use ohno::IntoAppError;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// A CSV member extracted from an archive.
#[derive(Debug)]
pub struct ArchiveEntry {
    pub name: String,
    pub contents: Result<Vec<u8>>,
}

/// Returns `true` when `name` ends with `.csv`, ignoring case.
#[must_use]
pub fn is_csv_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".csv")
}

/// Reads every `.csv` member of a ZIP archive, in archive order.
///
/// Members that fail to read are returned with their error so the remaining
/// members still get processed; other members are ignored.
///
/// # Errors
///
/// Returns an error if the archive itself cannot be opened.
pub fn read_csv_members<R: Read + Seek>(reader: R) -> Result<Vec<ArchiveEntry>> {
    let mut archive = ZipArchive::new(reader).into_app_err("opening the archive")?;
    let mut entries = Vec::new();

    for index in 0..archive.len() {
        let mut member = match archive.by_index(index) {
            Ok(member) => member,
            Err(e) => {
                entries.push(ArchiveEntry {
                    name: format!("#{index}"),
                    contents: Err(e).into_app_err("locating archive member"),
                });
                continue;
            }
        };

        let name = member.name().to_string();
        if !member.is_file() || !is_csv_name(&name) {
            debug!("skipping archive member '{name}'");
            continue;
        }

        let mut contents = Vec::new();
        let contents = match member.read_to_end(&mut contents) {
            Ok(_) => Ok(contents),
            Err(e) => Err(e).into_app_err_with(|| format!("reading archive member '{name}'")),
        };
        entries.push(ArchiveEntry { name, contents });
    }

    Ok(entries)
}
