//! On-disk persistence for the value and visit-count tables.
//!
//! A run named `name` owns two files in the store directory:
//! `<name>.q.bin` and `<name>.n.bin`. Each holds a bincode-encoded,
//! versioned list of entries sorted by key. Both files are fully written
//! to temporary siblings before either is renamed into place, so a failed
//! encode or write leaves the previous pair untouched.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::key::{StateActionKey, KEY_COUNT};
use super::table::{QTable, StateActionTable, VisitCounts};
use crate::core::PersistenceError;

/// Bumped whenever the encoded layout changes.
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct TableFile<T> {
    version: u32,
    entries: Vec<(StateActionKey, T)>,
}

/// Locations of the two artifacts for one table name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TablePaths {
    pub values: PathBuf,
    pub visits: PathBuf,
}

/// Directory-backed store for named table pairs.
#[derive(Clone, Debug)]
pub struct TableStore {
    dir: PathBuf,
}

impl TableStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths the tables for `name` are stored at.
    #[must_use]
    pub fn paths(&self, name: &str) -> TablePaths {
        TablePaths {
            values: self.dir.join(format!("{name}.q.bin")),
            visits: self.dir.join(format!("{name}.n.bin")),
        }
    }

    /// Whether both files for `name` exist.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        let paths = self.paths(name);
        paths.values.is_file() && paths.visits.is_file()
    }

    /// Write both tables under `name`, replacing any previous pair.
    ///
    /// Both tables are encoded to temporary siblings before either is
    /// renamed into place. A table that does not cover the key domain
    /// exactly once is refused before anything is written.
    pub fn save(&self, name: &str, values: &QTable, visits: &VisitCounts) -> Result<TablePaths, PersistenceError> {
        fs::create_dir_all(&self.dir).map_err(|source| PersistenceError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let paths = self.paths(name);
        let values_tmp = write_temp(&paths.values, values)?;
        let visits_tmp = match write_temp(&paths.visits, visits) {
            Ok(tmp) => tmp,
            Err(err) => {
                let _ = fs::remove_file(&values_tmp);
                return Err(err);
            }
        };
        commit(&values_tmp, &paths.values)?;
        commit(&visits_tmp, &paths.visits)?;
        debug!(values = %paths.values.display(), visits = %paths.visits.display(), "saved tables");
        Ok(paths)
    }

    /// Read both tables stored under `name`.
    ///
    /// A missing file is an error, as is any file that does not cover the
    /// full key domain exactly once.
    pub fn load(&self, name: &str) -> Result<(QTable, VisitCounts), PersistenceError> {
        let paths = self.paths(name);
        let values = read_table(&paths.values)?;
        let visits = read_table(&paths.visits)?;
        debug!(values = %paths.values.display(), visits = %paths.visits.display(), "loaded tables");
        Ok((values, visits))
    }
}

/// Encode `table` next to `path` and return the temporary file's path.
fn write_temp<T: Copy + Serialize>(path: &Path, table: &StateActionTable<T>) -> Result<PathBuf, PersistenceError> {
    let entries = table.sorted_entries();
    check_entries(path, &entries)?;
    let file = TableFile {
        version: FORMAT_VERSION,
        entries,
    };

    let tmp = path.with_extension("tmp");
    let io_err = |source: std::io::Error| PersistenceError::Io {
        path: tmp.clone(),
        source,
    };
    let mut writer = BufWriter::new(File::create(&tmp).map_err(io_err)?);
    bincode::serialize_into(&mut writer, &file).map_err(|source| PersistenceError::Encode {
        path: tmp.clone(),
        source,
    })?;
    writer.flush().map_err(io_err)?;
    drop(writer);
    Ok(tmp)
}

fn commit(tmp: &Path, path: &Path) -> Result<(), PersistenceError> {
    fs::rename(tmp, path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_table<T: Copy + DeserializeOwned>(path: &Path) -> Result<StateActionTable<T>, PersistenceError> {
    let reader = BufReader::new(File::open(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?);
    let file: TableFile<T> = bincode::deserialize_from(reader).map_err(|source| PersistenceError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    if file.version != FORMAT_VERSION {
        return Err(PersistenceError::Corrupt {
            path: path.to_path_buf(),
            reason: format!("format version {} (expected {FORMAT_VERSION})", file.version),
        });
    }
    check_entries(path, &file.entries)?;

    Ok(StateActionTable::from_entries(file.entries))
}

/// Every key in the domain, each exactly once.
fn check_entries<T>(path: &Path, entries: &[(StateActionKey, T)]) -> Result<(), PersistenceError> {
    let corrupt = |reason: String| PersistenceError::Corrupt {
        path: path.to_path_buf(),
        reason,
    };

    let mut seen = HashSet::with_capacity(entries.len());
    for (key, _) in entries {
        if !key.in_domain() {
            return Err(corrupt(format!("key {key} is outside the table domain")));
        }
        if !seen.insert(*key) {
            return Err(corrupt(format!("key {key} appears more than once")));
        }
    }
    if seen.len() != KEY_COUNT {
        return Err(corrupt(format!("{} keys present (expected {KEY_COUNT})", seen.len())));
    }
    Ok(())
}
