//! Recent-colors history and the key-value store it lives in.
//!
//! The session never owns the authoritative list: every push re-reads the
//! stored list, moves the color to the front and writes the whole list back.
//! A single writer per store file is assumed.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::color::hex_to_rgb;
use crate::error::PickerError;

/// Store key the history list is kept under.
pub const HISTORY_KEY: &str = "hexo_history";

/// Default number of remembered colors.
pub const HISTORY_CAPACITY: usize = 12;

/// Persistent key-value storage of string lists.
pub trait HistoryStore {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<String>>, PickerError>;
    fn set(&mut self, key: &str, list: &[String]) -> Result<(), PickerError>;
}

/// Store kept in memory for the lifetime of the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<String>>, PickerError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, list: &[String]) -> Result<(), PickerError> {
        self.entries.insert(key.to_owned(), list.to_vec());
        Ok(())
    }
}

/// Store backed by a pretty-printed JSON object on disk.
///
/// Writes go to a sibling temp file that is then renamed over the target, so
/// a failed write never leaves a half-written file behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, Vec<String>>, PickerError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => {
                return Err(PickerError::Storage(format!(
                    "read {} failed: {err}",
                    self.path.display()
                )))
            }
        };
        serde_json::from_str(&data).map_err(|err| {
            PickerError::Storage(format!("parse {} failed: {err}", self.path.display()))
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, Vec<String>>) -> Result<(), PickerError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| {
                    PickerError::Storage(format!("create dir {} failed: {err}", parent.display()))
                })?;
            }
        }
        let data = serde_json::to_string_pretty(entries)
            .map_err(|err| PickerError::Storage(format!("serialize failed: {err}")))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)
            .map_err(|err| PickerError::Storage(format!("write {} failed: {err}", tmp.display())))?;
        fs::rename(&tmp, &self.path).map_err(|err| {
            PickerError::Storage(format!("replace {} failed: {err}", self.path.display()))
        })
    }
}

impl HistoryStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<String>>, PickerError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, list: &[String]) -> Result<(), PickerError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_owned(), list.to_vec());
        self.write_entries(&entries)
    }
}

/// Puts `hex` at the front of `list`, dropping any earlier copy of the same
/// color and trimming the oldest entries beyond `capacity`.
///
/// Entries are compared by the color they decode to, so `#ff0000` and
/// `#FF0000` are the same entry.
pub fn push_front(list: &[String], hex: &str, capacity: usize) -> Vec<String> {
    std::iter::once(hex.to_owned())
        .chain(list.iter().filter(|entry| !same_color(entry, hex)).cloned())
        .take(capacity)
        .collect()
}

fn same_color(a: &str, b: &str) -> bool {
    match (hex_to_rgb(a), hex_to_rgb(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Recent-colors list operations against a [`HistoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    key: String,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            key: HISTORY_KEY.to_owned(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Reads the stored list; a missing key is an empty history.
    pub fn load(&self, store: &dyn HistoryStore) -> Result<Vec<String>, PickerError> {
        Ok(store.get(&self.key)?.unwrap_or_default())
    }

    /// Records `hex` as the most recent color and returns the new list.
    ///
    /// The hex is normalized to `#RRGGBB` first. Nothing is returned unless
    /// the store accepted the write, so callers only ever render a list that
    /// was persisted.
    pub fn push(&self, store: &mut dyn HistoryStore, hex: &str) -> Result<Vec<String>, PickerError> {
        let hex = hex_to_rgb(hex)?.to_hex();
        let current = self.load(store)?;
        let next = push_front(&current, &hex, self.capacity);
        store.set(&self.key, &next)?;
        debug!("history: pushed {hex}, {} entries", next.len());
        Ok(next)
    }

    /// Like [`History::load`], but a store failure degrades to an empty list.
    pub fn restore(&self, store: &dyn HistoryStore) -> Vec<String> {
        self.load(store).unwrap_or_else(|err| {
            warn!("history: restore failed: {err}");
            Vec::new()
        })
    }
}
