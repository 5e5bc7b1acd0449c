use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::PersistenceError;

/// Synchronous string key-value storage. No transactions: every `set` stands
/// on its own.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
    fn clear(&mut self) -> Result<(), PersistenceError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.values.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        self.values.clear();
        Ok(())
    }
}

/// Key-value store backed by a flat TOML table on disk.
///
/// The file is read once on open; every mutation rewrites the whole file
/// through a temp file in the same directory and an atomic rename.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let values = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|source| PersistenceError::Read {
                path: path.clone(),
                source,
            })?;
            toml::from_str(&contents).map_err(|source| PersistenceError::Parse {
                path: path.clone(),
                source,
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `values` to disk. Callers swap them in only once this succeeds,
    /// so memory never runs ahead of the file.
    fn write(&self, values: &BTreeMap<String, String>) -> Result<(), PersistenceError> {
        let write_err = |source: std::io::Error| PersistenceError::Write {
            path: self.path.clone(),
            source,
        };

        let parent = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());
        if let Some(dir) = parent {
            fs::create_dir_all(dir).map_err(write_err)?;
        }

        let contents = toml::to_string(values)?;
        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir),
            None => NamedTempFile::new(),
        }
        .map_err(write_err)?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(write_err)?;
        temp_file.as_file_mut().sync_all().map_err(write_err)?;
        temp_file
            .persist(&self.path)
            .map_err(|err| write_err(err.error))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut values = self.values.clone();
        values.insert(key.to_string(), value.to_string());
        self.write(&values)?;
        self.values = values;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        if !self.values.contains_key(key) {
            return Ok(());
        }
        let mut values = self.values.clone();
        values.remove(key);
        self.write(&values)?;
        self.values = values;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        let values = BTreeMap::new();
        self.write(&values)?;
        self.values = values;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_opens_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = FileStore::open(temp_dir.path().join("storage.toml")).expect("open");
        assert_eq!(store.get("all-chats").expect("get"), None);
    }

    #[test]
    fn values_survive_reopen() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("nested").join("storage.toml");

        let mut store = FileStore::open(&path).expect("open");
        let tricky = "[{\"content\":\"line one\\nline \\\"two\\\"\"}]\nsecond line";
        store.set("all-chats", tricky).expect("set");
        store.set("currentModel", "deepseek").expect("set");

        let reopened = FileStore::open(&path).expect("reopen");
        assert_eq!(reopened.get("all-chats").expect("get").as_deref(), Some(tricky));
        assert_eq!(
            reopened.get("currentModel").expect("get").as_deref(),
            Some("deepseek")
        );
    }

    #[test]
    fn remove_and_clear_are_written_through() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("storage.toml");

        let mut store = FileStore::open(&path).expect("open");
        store.set("themeColor", "light_mode").expect("set");
        store.set("currentTopP", "0.4").expect("set");
        store.remove("themeColor").expect("remove");
        assert_eq!(FileStore::open(&path).expect("reopen").get("themeColor").expect("get"), None);

        store.clear().expect("clear");
        let reopened = FileStore::open(&path).expect("reopen");
        assert_eq!(reopened.get("currentTopP").expect("get"), None);
    }

    #[test]
    fn failed_write_leaves_values_unchanged() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let good = temp_dir.path().join("storage.toml");
        let mut store = FileStore::open(&good).expect("open");
        store.set("currentModel", "deepseek").expect("set");

        // A regular file where the parent directory should be.
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").expect("write blocker");
        store.path = blocker.join("storage.toml");

        let err = store.set("currentModel", "gpt-4").expect_err("write should fail");
        assert!(matches!(err, PersistenceError::Write { .. }));
        assert_eq!(
            store.get("currentModel").expect("get").as_deref(),
            Some("deepseek")
        );

        assert!(store.clear().is_err());
        assert_eq!(
            store.get("currentModel").expect("get").as_deref(),
            Some("deepseek")
        );
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("storage.toml");
        fs::write(&path, "this is = = not toml").expect("write");

        let err = FileStore::open(&path).expect_err("should fail");
        assert!(matches!(err, PersistenceError::Parse { .. }));
        assert!(err.to_string().contains("storage.toml"));
    }

    #[test]
    fn memory_store_behaves_like_a_map() {
        let mut store = MemoryStore::new();
        store.set("a", "1").expect("set");
        assert_eq!(store.get("a").expect("get").as_deref(), Some("1"));
        store.remove("a").expect("remove");
        assert_eq!(store.get("a").expect("get"), None);
    }
}
