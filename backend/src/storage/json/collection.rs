//! File-backed stores. Each store owns one JSON file, its serialization, and
//! a mutex that serializes read-modify-write cycles so two concurrent
//! requests cannot lose each other's updates.
//!
//! Reads are deliberately forgiving: a missing file or malformed JSON yields
//! the empty collection (or the default document) with a warning, never an
//! error. Writes go through a temp file and an atomic rename.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// One JSON array file of records of type `T`.
pub struct JsonCollection<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> JsonCollection<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the whole collection.
    pub fn read(&self) -> Vec<T> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.load()
    }

    /// Read-modify-write under the collection lock. The file is rewritten
    /// only when the closure succeeds; an error leaves it untouched.
    pub fn update<R, E>(&self, f: impl FnOnce(&mut Vec<T>) -> Result<R, E>) -> Result<R, E>
    where
        E: From<anyhow::Error>,
    {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut list = self.load();
        let out = f(&mut list)?;
        self.persist(&list).map_err(E::from)?;
        Ok(out)
    }

    fn load(&self) -> Vec<T> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        if raw.trim().is_empty() {
            return Vec::new();
        }
        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                warn!("unreadable collection {:?}, treating as empty: {e}", self.path);
                Vec::new()
            }
        }
    }

    fn persist(&self, list: &[T]) -> Result<()> {
        write_atomic(&self.path, list)
    }
}

/// A single JSON object file (settings). Missing or malformed content reads
/// as `T::default()`.
pub struct JsonDocument<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned + Default> JsonDocument<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    pub fn read(&self) -> T {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.load()
    }

    pub fn update<R, E>(&self, f: impl FnOnce(&mut T) -> Result<R, E>) -> Result<R, E>
    where
        E: From<anyhow::Error>,
    {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut doc = self.load();
        let out = f(&mut doc)?;
        write_atomic(&self.path, &doc).map_err(E::from)?;
        Ok(out)
    }

    fn load(&self) -> T {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return T::default(),
        };
        match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("unreadable document {:?}, using defaults: {e}", self.path);
                T::default()
            }
        }
    }
}

fn write_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating data directory {parent:?}"))?;
    }
    let body = serde_json::to_string_pretty(value).context("serializing collection")?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, body).with_context(|| format!("writing {tmp:?}"))?;
    fs::rename(&tmp, path).with_context(|| format!("renaming {tmp:?} into place"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Row {
        id: u64,
        label: String,
    }

    fn collection(dir: &TempDir) -> JsonCollection<Row> {
        JsonCollection::new(dir.path().join("rows.json"))
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        assert!(collection(&dir).read().is_empty());
    }

    #[test]
    fn malformed_json_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let col = collection(&dir);
        fs::write(col.path(), "{ not json").unwrap();
        assert!(col.read().is_empty());
    }

    #[test]
    fn update_persists_and_reads_back() {
        let dir = TempDir::new().unwrap();
        let col = collection(&dir);
        col.update::<_, anyhow::Error>(|rows| {
            rows.push(Row { id: 1, label: "first".into() });
            Ok(())
        })
        .unwrap();

        let rows = col.read();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "first");
        // pretty-printed, like the files the app inherits
        let raw = fs::read_to_string(col.path()).unwrap();
        assert!(raw.contains('\n'));
    }

    #[test]
    fn failed_update_leaves_the_file_untouched() {
        let dir = TempDir::new().unwrap();
        let col = collection(&dir);
        col.update::<_, anyhow::Error>(|rows| {
            rows.push(Row { id: 1, label: "keep".into() });
            Ok(())
        })
        .unwrap();
        let before = fs::read_to_string(col.path()).unwrap();

        let res: Result<(), anyhow::Error> = col.update(|rows| {
            rows.clear();
            Err(anyhow::anyhow!("abort"))
        });
        assert!(res.is_err());
        assert_eq!(fs::read_to_string(col.path()).unwrap(), before);
    }

    #[test]
    fn document_defaults_when_missing() {
        let dir = TempDir::new().unwrap();
        let doc: JsonDocument<Row> = JsonDocument::new(dir.path().join("doc.json"));
        assert_eq!(doc.read(), Row::default());

        doc.update::<_, anyhow::Error>(|d| {
            d.label = "saved".into();
            Ok(())
        })
        .unwrap();
        assert_eq!(doc.read().label, "saved");
    }
}
