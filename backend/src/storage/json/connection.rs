//! Handle on the data directory. All resource files live flat inside it,
//! one JSON array per resource plus the settings object.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{JsonCollection, JsonDocument};

#[derive(Clone)]
pub struct JsonConnection {
    data_dir: PathBuf,
}

impl JsonConnection {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("creating data directory {data_dir:?}"))?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn collection<T>(&self, file_name: &str) -> Arc<JsonCollection<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        Arc::new(JsonCollection::new(self.data_dir.join(file_name)))
    }

    pub fn document<T>(&self, file_name: &str) -> Arc<JsonDocument<T>>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        Arc::new(JsonDocument::new(self.data_dir.join(file_name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_the_data_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("data");
        let conn = JsonConnection::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(conn.data_dir(), nested.as_path());
    }
}
