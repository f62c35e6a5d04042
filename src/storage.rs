use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// String key-value persistence, the terminal counterpart of browser local storage.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let target = self.path_for(key);
        // Readers only ever see a complete file
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &target)?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_missing_key_is_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(temp_dir.path()).unwrap();
        assert_eq!(storage.get_item("transactions").unwrap(), None);
    }

    #[test]
    fn file_storage_overwrites_previous_value() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(temp_dir.path()).unwrap();

        storage.set_item("transactions", "[]").unwrap();
        storage.set_item("transactions", "[1]").unwrap();

        assert_eq!(
            storage.get_item("transactions").unwrap().as_deref(),
            Some("[1]")
        );
        assert!(temp_dir.path().join("transactions.json").exists());
        assert!(!temp_dir.path().join(".transactions.json.tmp").exists());
    }

    #[test]
    fn file_storage_creates_nested_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let mut storage = FileStorage::new(&nested).unwrap();
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.dir(), nested.as_path());
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn memory_storage_keeps_keys_apart() {
        let mut storage = MemoryStorage::new();
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));
        assert_eq!(storage.get_item("b").unwrap().as_deref(), Some("2"));
        assert_eq!(storage.get_item("c").unwrap(), None);
    }
}
