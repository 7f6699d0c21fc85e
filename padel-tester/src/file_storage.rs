//! Draft storage backed by a JSON file, so staged drafts survive between
//! tester invocations the way `localStorage` survives a page reload.
use padel_core::{DraftStorage, StorageError};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl DraftStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read()?;
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read()?;
        if entries.remove(key).is_some() {
            self.write(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.read()?.into_keys().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "padel-storage-{label}-{}.json",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    #[test]
    fn values_survive_a_new_handle() {
        let path = temp_file("reload");
        FileStorage::new(&path).set("padel.draft.onboarding.first_name", "Ana").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(
            reopened.get("padel.draft.onboarding.first_name").unwrap(),
            Some("Ana".to_string())
        );
        reopened.remove("padel.draft.onboarding.first_name").unwrap();
        assert!(reopened.keys().unwrap().is_empty());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let storage = FileStorage::new(temp_file("missing"));
        assert_eq!(storage.get("anything").unwrap(), None);
        assert!(storage.keys().unwrap().is_empty());
        storage.remove("anything").unwrap();
        assert!(!storage.path().exists());
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let path = temp_file("corrupt");
        fs::write(&path, "{not json").unwrap();
        let err = FileStorage::new(&path).get("k").unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
        let _ = fs::remove_file(path);
    }
}
