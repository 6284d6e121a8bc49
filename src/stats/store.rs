//! Snapshot and dictionary files.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::snapshot::StatsSnapshot;
use crate::error::{Error, Result};
use crate::render::{to_json, JsonFormat};

/// File name of the statistics snapshot.
pub const STATS_FILE: &str = "domain_stats.json";

/// File name of the spell-correction frequency dictionary.
pub const DICTIONARY_FILE: &str = "symspell_dictionary.txt";

/// Paths of the files written by a dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpPaths {
    /// Snapshot JSON file
    pub stats: PathBuf,

    /// Frequency dictionary file
    pub dictionary: PathBuf,
}

impl DumpPaths {
    /// Paths inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            stats: dir.join(STATS_FILE),
            dictionary: dir.join(DICTIONARY_FILE),
        }
    }
}

/// Write a snapshot and its dictionary into `dir`.
///
/// Each file is written to a temporary file in `dir` and renamed over the
/// target, so readers never observe a partial file.
pub fn write_dump(
    dir: &Path,
    snapshot: &StatsSnapshot,
    dictionary: &[(String, u64)],
    format: JsonFormat,
) -> Result<DumpPaths> {
    fs::create_dir_all(dir)?;
    let paths = DumpPaths::in_dir(dir);

    let json = to_json(snapshot, format)?;
    write_atomic(dir, &paths.stats, json.as_bytes())?;

    let mut lines = String::new();
    for (term, tf) in dictionary {
        lines.push_str(term);
        lines.push(' ');
        lines.push_str(&tf.to_string());
        lines.push('\n');
    }
    write_atomic(dir, &paths.dictionary, lines.as_bytes())?;

    Ok(paths)
}

/// Read the snapshot in `dir`, if any.
///
/// A missing file yields `Ok(None)`. An unreadable, unparsable or
/// inconsistent file is an error.
pub fn read_snapshot(dir: &Path) -> Result<Option<StatsSnapshot>> {
    let path = dir.join(STATS_FILE);
    let data = match fs::read_to_string(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let snapshot: StatsSnapshot = serde_json::from_str(&data)
        .map_err(|e| Error::CorruptSnapshot(format!("{}: {}", path.display(), e)))?;
    snapshot
        .validate()
        .map_err(|msg| Error::CorruptSnapshot(format!("{}: {}", path.display(), msg)))?;

    Ok(Some(snapshot))
}

fn write_atomic(dir: &Path, target: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.flush()?;
    file.persist(target).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::TermMeta;

    #[test]
    fn test_missing_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_snapshot(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_write_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut snapshot = StatsSnapshot {
            doc_count: 2,
            ..Default::default()
        };
        snapshot.meta.insert(
            "server".to_string(),
            TermMeta {
                tf: 5,
                df: 2,
                ..Default::default()
            },
        );
        let dictionary = vec![("server".to_string(), 5)];

        let paths = write_dump(dir.path(), &snapshot, &dictionary, JsonFormat::Compact).unwrap();
        assert_eq!(fs::read_to_string(&paths.dictionary).unwrap(), "server 5\n");

        let loaded = read_snapshot(dir.path()).unwrap().unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("state").join("kb");
        write_dump(&nested, &StatsSnapshot::default(), &[], JsonFormat::Pretty).unwrap();
        assert!(nested.join(STATS_FILE).exists());
        assert!(nested.join(DICTIONARY_FILE).exists());
    }

    #[test]
    fn test_corrupt_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STATS_FILE), "{not json").unwrap();

        let err = read_snapshot(dir.path()).unwrap_err();
        assert!(matches!(err, Error::CorruptSnapshot(_)));
    }

    #[test]
    fn test_inconsistent_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(STATS_FILE),
            r#"{"doc_count":1,"meta":{"vpn":{"title_hits":0,"llm_hits":0,"tf":1,"df":4,"is_acronym":true}}}"#,
        )
        .unwrap();

        let err = read_snapshot(dir.path()).unwrap_err();
        assert!(matches!(err, Error::CorruptSnapshot(_)));
    }
}
