//! Date-keyed entry storage.
//!
//! Entries are persisted one record per calendar day as pretty-printed JSON
//! files named `<YYYY-MM-DD>.json` under a single root directory. The set of
//! known dates is always derived from the directory listing rather than a
//! stored index, so it can never go stale.

use crate::errors::{AppResult, StorageError};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Canonical date key format. Lexicographic order equals chronological order.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

const RECORD_EXTENSION: &str = "json";

/// One day's note: its content plus bookkeeping timestamps.
///
/// An `Entry` requested for a date with no persisted record is synthesized in
/// memory with empty content and only becomes durable on an explicit
/// [`EntryStore::save`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Canonical `YYYY-MM-DD` key. Immutable once created.
    pub date: String,
    /// The note text. Mutated only through explicit saves.
    pub content: String,
    /// Set once, when the entry first came into existence.
    pub created: DateTime<Local>,
    /// Updated on every successful save.
    pub modified: DateTime<Local>,
}

impl Entry {
    /// A fresh in-memory entry for a date with no durable record.
    fn synthesized(date: &str) -> Self {
        let now = Local::now();
        Entry {
            date: date.to_string(),
            content: String::new(),
            created: now,
            modified: now,
        }
    }
}

/// Today's date in the local calendar, formatted as a date key.
pub fn today_key() -> String {
    Local::now().format(DATE_KEY_FORMAT).to_string()
}

/// Date-keyed CRUD over persisted entries.
///
/// The only stateful component of the application; everything else derives
/// its view of the world from this store.
pub struct EntryStore {
    root: PathBuf,
}

impl EntryStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    ///
    /// On Unix the directory is created with `0o700` permissions so entries
    /// stay private to the owner.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Access` if the directory cannot be created.
    pub fn open(root: &Path) -> AppResult<Self> {
        if !root.exists() {
            fs::create_dir_all(root).map_err(|e| StorageError::Access {
                path: root.to_path_buf(),
                source: e,
            })?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = fs::Permissions::from_mode(0o700);
                fs::set_permissions(root, permissions).map_err(|e| StorageError::Access {
                    path: root.to_path_buf(),
                    source: e,
                })?;
                debug!("Set 0o700 permissions on storage directory");
            }
        }

        Ok(EntryStore {
            root: root.to_path_buf(),
        })
    }

    /// The storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, date: &str) -> PathBuf {
        self.root.join(format!("{}.{}", date, RECORD_EXTENSION))
    }

    /// Returns the entry for `date`, synthesizing a fresh empty one when no
    /// record exists. Synthesis never touches durable storage; a subsequent
    /// [`list_dates`](Self::list_dates) will not include the date.
    ///
    /// # Errors
    ///
    /// - `StorageError::Corruption` if a record exists but fails to parse
    /// - `StorageError::Access` if a record exists but cannot be read
    pub fn get_by_date(&self, date: &str) -> AppResult<Entry> {
        let path = self.record_path(date);

        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(date, "no record on disk, synthesizing empty entry");
                return Ok(Entry::synthesized(date));
            }
            Err(e) => {
                return Err(StorageError::Access { path, source: e }.into());
            }
        };

        let entry: Entry = serde_json::from_str(&data).map_err(|e| StorageError::Corruption {
            date: date.to_string(),
            source: e,
        })?;

        Ok(entry)
    }

    /// Returns today's entry, creating it in memory if it doesn't exist yet.
    pub fn get_today(&self) -> AppResult<Entry> {
        self.get_by_date(&today_key())
    }

    /// Persists `entry`, stamping `modified` with the current time first.
    ///
    /// The record is written to a temporary file in the storage root and
    /// renamed over the destination, so a prior record for the date is either
    /// fully replaced or left intact.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` on any I/O failure. Writes are not
    /// retried; the caller must make a fresh save attempt.
    pub fn save(&self, entry: &mut Entry) -> AppResult<()> {
        entry.modified = Local::now();

        let data = serde_json::to_string_pretty(entry).map_err(|e| StorageError::Write {
            date: entry.date.clone(),
            source: std::io::Error::other(e),
        })?;

        let write_err = |e: std::io::Error| StorageError::Write {
            date: entry.date.clone(),
            source: e,
        };

        let mut tmp = tempfile::NamedTempFile::new_in(&self.root).map_err(write_err)?;
        tmp.write_all(data.as_bytes()).map_err(write_err)?;
        tmp.persist(self.record_path(&entry.date))
            .map_err(|e| write_err(e.error))?;

        debug!(date = %entry.date, "saved entry");
        Ok(())
    }

    /// Enumerates the date keys of all durable records.
    ///
    /// Only direct children named `<date>.json` whose stem parses as a
    /// calendar date are counted; anything else in the directory is ignored.
    /// An empty directory yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Access` if the root itself is unreadable.
    pub fn list_dates(&self) -> AppResult<Vec<String>> {
        let dir = fs::read_dir(&self.root).map_err(|e| StorageError::Access {
            path: self.root.clone(),
            source: e,
        })?;

        let mut dates = Vec::new();
        for dir_entry in dir {
            let dir_entry = dir_entry.map_err(|e| StorageError::Access {
                path: self.root.clone(),
                source: e,
            })?;
            let path = dir_entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if NaiveDate::parse_from_str(stem, DATE_KEY_FORMAT).is_ok() {
                dates.push(stem.to_string());
            }
        }

        dates.sort();
        Ok(dates)
    }

    /// Removes the record for `date`, if present.
    ///
    /// Deleting a date with no record is a no-op success: the operation's
    /// contract is "this date has no durable record afterwards", which
    /// already holds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Access` if an existing record cannot be
    /// removed.
    pub fn delete(&self, date: &str) -> AppResult<()> {
        let path = self.record_path(date);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(date, "deleted entry record");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Access { path, source: e }.into()),
        }
    }

    /// Reads every durable entry's content, keyed by date.
    ///
    /// A record that fails to read does not abort the batch: its content is
    /// replaced with a single-line diagnostic so browsing can continue past
    /// it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Access` only if the listing itself fails.
    pub fn load_all(&self) -> AppResult<Vec<(String, String)>> {
        let mut pages = Vec::new();
        for date in self.list_dates()? {
            let content = match self.get_by_date(&date) {
                Ok(entry) => entry.content,
                Err(e) => {
                    debug!(date = %date, error = %e, "substituting inline diagnostic for unreadable entry");
                    format!("Could not read this entry: {}", e)
                }
            };
            pages.push((date, content));
        }
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use tempfile::tempdir;

    fn test_store() -> (tempfile::TempDir, EntryStore) {
        let dir = tempdir().expect("Failed to create temporary directory");
        let store = EntryStore::open(dir.path()).expect("Failed to open store");
        (dir, store)
    }

    #[test]
    fn test_open_creates_root_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("notes");
        assert!(!root.exists());

        EntryStore::open(&root).unwrap();
        assert!(root.is_dir());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&root).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o700);
        }
    }

    #[test]
    fn test_get_by_date_missing_synthesizes_without_persisting() {
        let (_dir, store) = test_store();

        let entry = store.get_by_date("2024-03-01").unwrap();
        assert_eq!(entry.date, "2024-03-01");
        assert_eq!(entry.content, "");
        assert_eq!(entry.created, entry.modified);

        // Nothing was written to disk.
        assert!(store.list_dates().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_get_round_trips() {
        let (_dir, store) = test_store();

        let mut entry = store.get_by_date("2024-01-01").unwrap();
        entry.content = "Hello, world!".to_string();
        store.save(&mut entry).unwrap();

        let loaded = store.get_by_date("2024-01-01").unwrap();
        assert_eq!(loaded.content, "Hello, world!");
        assert_eq!(loaded.date, "2024-01-01");
        assert!(loaded.modified >= loaded.created);
    }

    #[test]
    fn test_save_overwrites_prior_record() {
        let (_dir, store) = test_store();

        let mut entry = store.get_by_date("2024-01-01").unwrap();
        entry.content = "first".to_string();
        store.save(&mut entry).unwrap();
        let first_modified = entry.modified;

        entry.content = "second".to_string();
        store.save(&mut entry).unwrap();

        let loaded = store.get_by_date("2024-01-01").unwrap();
        assert_eq!(loaded.content, "second");
        assert!(loaded.modified >= first_modified);
        assert_eq!(store.list_dates().unwrap().len(), 1);
    }

    #[test]
    fn test_get_today_uses_local_date_key() {
        let (_dir, store) = test_store();
        let entry = store.get_today().unwrap();
        assert_eq!(entry.date, today_key());
    }

    #[test]
    fn test_list_dates_returns_each_saved_date_once() {
        let (_dir, store) = test_store();

        for date in ["2024-01-01", "2024-01-02"] {
            let mut entry = store.get_by_date(date).unwrap();
            entry.content = date.to_string();
            store.save(&mut entry).unwrap();
        }

        let dates = store.list_dates().unwrap();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02"]);
    }

    #[test]
    fn test_list_dates_ignores_foreign_files() {
        let (dir, store) = test_store();

        let mut entry = store.get_by_date("2024-01-01").unwrap();
        store.save(&mut entry).unwrap();

        fs::write(dir.path().join("README.txt"), "not a record").unwrap();
        fs::write(dir.path().join("not-a-date.json"), "{}").unwrap();

        assert_eq!(store.list_dates().unwrap(), vec!["2024-01-01"]);
    }

    #[test]
    fn test_list_dates_empty_store() {
        let (_dir, store) = test_store();
        assert!(store.list_dates().unwrap().is_empty());
    }

    #[test]
    fn test_delete_then_get_behaves_like_never_saved() {
        let (_dir, store) = test_store();

        let mut entry = store.get_by_date("2024-01-01").unwrap();
        entry.content = "to be removed".to_string();
        store.save(&mut entry).unwrap();

        store.delete("2024-01-01").unwrap();

        let fresh = store.get_by_date("2024-01-01").unwrap();
        assert_eq!(fresh.content, "");
        assert!(store.list_dates().unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_date_is_noop_success() {
        let (_dir, store) = test_store();
        store.delete("1999-12-31").unwrap();
        store.delete("1999-12-31").unwrap();
    }

    #[test]
    fn test_corrupt_record_surfaces_date() {
        let (dir, store) = test_store();
        fs::write(dir.path().join("2024-05-05.json"), "{ not json").unwrap();

        let result = store.get_by_date("2024-05-05");
        match result {
            Err(AppError::Storage(StorageError::Corruption { date, .. })) => {
                assert_eq!(date, "2024-05-05");
            }
            other => panic!("Expected Corruption error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_all_isolates_corrupt_records() {
        let (dir, store) = test_store();

        let mut good = store.get_by_date("2024-01-02").unwrap();
        good.content = "# fine".to_string();
        store.save(&mut good).unwrap();

        fs::write(dir.path().join("2024-01-01.json"), "garbage").unwrap();

        let pages = store.load_all().unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].0, "2024-01-01");
        assert!(pages[0].1.contains("Could not read this entry"));
        assert_eq!(pages[1], ("2024-01-02".to_string(), "# fine".to_string()));
    }

    #[test]
    fn test_record_format_round_trips_all_fields() {
        let (dir, store) = test_store();

        let mut entry = store.get_by_date("2024-06-15").unwrap();
        entry.content = "field check".to_string();
        store.save(&mut entry).unwrap();

        let raw = fs::read_to_string(dir.path().join("2024-06-15.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        for field in ["date", "content", "created", "modified"] {
            assert!(value.get(field).is_some(), "record missing field {}", field);
        }
    }
}
