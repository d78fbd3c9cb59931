use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, info};
use tokio::fs;

use crate::store::{KeyValueStore, StoreError};

/// KeyValueStore keeping one `<key>.json` file per slot in a directory
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let path = self.slot_path(key)?;
        if fs::metadata(&self.dir).await.is_err() {
            info!("Creating record directory {}", self.dir.display());
            fs::create_dir_all(&self.dir).await?;
        }

        // Write next to the target and rename so readers never see half a file
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value).await?;
        fs::rename(&tmp_path, &path).await?;
        debug!("Wrote slot {} to {}", key, path.display());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(tmp.path().join("records"));

        assert_eq!(store.get("meeting_records").await.unwrap(), None);
        store
            .set("meeting_records", "[{\"a\":1}]".to_string())
            .await
            .unwrap();

        assert!(tmp.path().join("records/meeting_records.json").exists());
        assert_eq!(
            store.get("meeting_records").await.unwrap().as_deref(),
            Some("[{\"a\":1}]")
        );
    }

    #[tokio::test]
    async fn test_delete_missing_slot() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(tmp.path());

        store.delete("absent").await.unwrap();
        store.set("present", "x".to_string()).await.unwrap();
        store.delete("present").await.unwrap();
        assert_eq!(store.get("present").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(tmp.path());

        for key in ["", "../escape", "a/b", "dot.key"] {
            assert!(matches!(
                store.get(key).await,
                Err(StoreError::InvalidKey(_))
            ));
        }
    }
}
