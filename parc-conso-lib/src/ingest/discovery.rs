use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use walkdir::WalkDir;

/// The kind of input a discovered path holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Csv,
    Zip,
}

impl SourceKind {
    /// Classifies a path by its extension, ignoring case.
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        match path.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("csv") => Some(Self::Csv),
            Some("zip") => Some(Self::Zip),
            _ => None,
        }
    }
}

/// Input paths resolved into readable sources.
#[derive(Debug, Default)]
pub struct Discovery {
    pub sources: Vec<(Utf8PathBuf, SourceKind)>,

    /// Paths that exist but are neither CSV files nor ZIP archives.
    pub skipped: Vec<Utf8PathBuf>,

    /// Paths that do not exist or could not be listed.
    pub missing: Vec<(Utf8PathBuf, String)>,
}

/// Expands the given inputs into CSV and ZIP sources.
///
/// Files are classified by extension. Directories contribute the CSV and ZIP
/// files they contain, sorted by file name; subdirectories are only entered
/// when `recursive` is set.
#[must_use]
pub fn discover(inputs: &[Utf8PathBuf], recursive: bool) -> Discovery {
    let mut discovery = Discovery::default();

    for input in inputs {
        if input.is_dir() {
            scan_directory(input, recursive, &mut discovery);
        } else if input.is_file() {
            match SourceKind::from_path(input) {
                Some(kind) => discovery.sources.push((input.clone(), kind)),
                None => {
                    warn!("ignoring '{input}', expected a .csv or .zip file");
                    discovery.skipped.push(input.clone());
                }
            }
        } else {
            discovery.missing.push((input.clone(), "no such file or directory".to_string()));
        }
    }

    discovery
}

fn scan_directory(dir: &Utf8Path, recursive: bool, discovery: &mut Discovery) {
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(if recursive { usize::MAX } else { 1 })
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().and_then(Utf8Path::from_path).map_or_else(|| dir.to_path_buf(), Utf8Path::to_path_buf);
                discovery.missing.push((path, e.to_string()));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(path) = Utf8Path::from_path(entry.path()) else {
            warn!("ignoring non UTF-8 path '{}'", entry.path().display());
            continue;
        };

        match SourceKind::from_path(path) {
            Some(kind) => discovery.sources.push((path.to_path_buf(), kind)),
            None => debug!("ignoring '{path}' while scanning '{dir}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(path.to_path_buf()).unwrap()
    }

    #[test]
    fn test_source_kind_from_path() {
        assert_eq!(SourceKind::from_path(Utf8Path::new("a.CSV")), Some(SourceKind::Csv));
        assert_eq!(SourceKind::from_path(Utf8Path::new("b.Zip")), Some(SourceKind::Zip));
        assert_eq!(SourceKind::from_path(Utf8Path::new("c.xlsx")), None);
        assert_eq!(SourceKind::from_path(Utf8Path::new("noext")), None);
    }

    #[test]
    fn test_discover_directory_sorted_and_shallow() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), "x\n").unwrap();
        fs::write(dir.path().join("a.zip"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.csv"), "x\n").unwrap();

        let root = utf8(dir.path());
        let found = discover(std::slice::from_ref(&root), false);
        let names: Vec<_> = found.sources.iter().map(|(p, _)| p.file_name().unwrap().to_string()).collect();
        assert_eq!(names, vec!["a.zip", "b.csv"]);

        let found = discover(&[root], true);
        assert_eq!(found.sources.len(), 3);
    }

    #[test]
    fn test_discover_explicit_files() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("data.csv");
        let txt = dir.path().join("data.txt");
        fs::write(&csv, "x\n").unwrap();
        fs::write(&txt, "x\n").unwrap();

        let found = discover(&[utf8(&csv), utf8(&txt), utf8(&dir.path().join("missing.csv"))], false);
        assert_eq!(found.sources, vec![(utf8(&csv), SourceKind::Csv)]);
        assert_eq!(found.skipped, vec![utf8(&txt)]);
        assert_eq!(found.missing.len(), 1);
    }
}
