use crate::error::{PopmarkError, Result};
use crate::models::bookmark::Bookmark;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A key-value storage area holding JSON values, the shape of a browser
/// extension's local storage
///
/// Implementations must be `Sync` because the popup reads storage on a
/// worker while the active tab is queried.
pub trait StorageArea: Send + Sync {
    /// Value stored under `key`, `None` when the key is absent
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: Value) -> Result<()>;
}

impl<S: StorageArea + ?Sized> StorageArea for &S {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Storage area persisted as one JSON object in a file
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage file inside `data_dir`
    pub const FILE_NAME: &'static str = "storage.json";

    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Open `<data_dir>/storage.json`, creating `data_dir` if needed
    pub fn in_dir(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)?;
        Ok(Self::new(&data_dir.join(Self::FILE_NAME)))
    }

    /// Get the storage file path
    pub fn get_path(&self) -> &Path {
        &self.path
    }

    fn read_area(&self) -> Result<Option<Map<String, Value>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| PopmarkError::StorageRead(format!("{}: {}", self.path.display(), e)))?;
        if contents.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(Some(map)),
            Ok(_) => Err(PopmarkError::StorageRead(format!(
                "{}: top-level value is not an object",
                self.path.display()
            ))),
            Err(e) => Err(PopmarkError::StorageRead(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn write_area(&self, area: &Map<String, Value>) -> Result<()> {
        let to_write_err = |e: std::io::Error| {
            PopmarkError::StorageWrite(format!("{}: {}", self.path.display(), e))
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(to_write_err)?;

        let json = serde_json::to_string_pretty(area)
            .map_err(|e| PopmarkError::StorageWrite(e.to_string()))?;

        // Write next to the target and rename so readers never see a torn file
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(to_write_err)?;
        tmp.write_all(json.as_bytes()).map_err(to_write_err)?;
        tmp.persist(&self.path)
            .map_err(|e| to_write_err(e.error))?;
        Ok(())
    }
}

impl StorageArea for FileStorage {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_area()?.and_then(|mut area| area.remove(key)))
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut area = match self.read_area() {
            Ok(area) => area.unwrap_or_default(),
            Err(e) => {
                log::warn!("Overwriting unreadable storage file: {}", e);
                Map::new()
            }
        };
        area.insert(key.to_string(), value);
        self.write_area(&area)
    }
}

/// In-process storage area
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with one key
    pub fn with_value(key: &str, value: Value) -> Self {
        let storage = Self::new();
        if let Ok(mut values) = storage.values.lock() {
            values.insert(key.to_string(), value);
        }
        storage
    }
}

impl StorageArea for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let values = self
            .values
            .lock()
            .map_err(|e| PopmarkError::StorageRead(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| PopmarkError::StorageWrite(e.to_string()))?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Read the raw entries of the flat bookmark list stored under `key`
///
/// A value that is not an array is a `StorageRead` error. The entries
/// themselves are returned untouched.
pub fn read_entries<S: StorageArea + ?Sized>(
    storage: &S,
    key: &str,
) -> Result<Option<Vec<Value>>> {
    match storage.get(key)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(entries)) => Ok(Some(entries)),
        Some(_) => Err(PopmarkError::StorageRead(
            "malformed bookmark list: expected an array".to_string(),
        )),
    }
}

/// Replace the raw entries stored under `key`
pub fn write_entries<S: StorageArea + ?Sized>(
    storage: &S,
    key: &str,
    entries: Vec<Value>,
) -> Result<()> {
    storage.set(key, Value::Array(entries))
}

/// View a raw entry as a bookmark. Entries that are not objects read as a
/// blank bookmark.
pub fn bookmark_from_entry(entry: &Value) -> Bookmark {
    Bookmark::deserialize(entry).unwrap_or_else(|e| {
        log::warn!("Unreadable bookmark entry {}: {}", entry, e);
        Bookmark::default()
    })
}

/// Read the flat bookmark list stored under `key`
pub fn read_bookmarks<S: StorageArea + ?Sized>(
    storage: &S,
    key: &str,
) -> Result<Option<Vec<Bookmark>>> {
    Ok(read_entries(storage, key)?
        .map(|entries| entries.iter().map(bookmark_from_entry).collect()))
}

/// Replace the flat bookmark list stored under `key`
pub fn write_bookmarks<S: StorageArea + ?Sized>(
    storage: &S,
    key: &str,
    bookmarks: &[Bookmark],
) -> Result<()> {
    let value =
        serde_json::to_value(bookmarks).map_err(|e| PopmarkError::StorageWrite(e.to_string()))?;
    storage.set(key, value)
}
