use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{KeyValueStore, StorageError};

/// File-backed [`KeyValueStore`].
///
/// Each key maps to `<root>/<url-encoded key>.json`. Writes go to a
/// uniquely-named temporary file in the same directory and are renamed over
/// the target, so a reader never sees a half-written value.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the stored files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` for an empty key.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        let encoded: String = url::form_urlencoded::byte_serialize(key.as_bytes()).collect();
        Ok(self.root.join(format!("{encoded}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, value), fields(root = %self.root.display(), len = value.len()))]
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.root).await?;

        let tmp = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
        tokio::fs::write(&tmp, &value).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            // Best effort: the temp file is garbage either way.
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        debug!(path = %path.display(), "Wrote storage entry");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_path_encodes_key() {
        let store = FileStore::new("/data");
        let path = store.path_for("@GoMarketplace:shoppingCartList").unwrap();
        assert_eq!(
            path,
            PathBuf::from("/data/%40GoMarketplace%3AshoppingCartList.json")
        );
    }

    #[test]
    fn test_path_rejects_empty_key() {
        let store = FileStore::new("/data");
        assert!(matches!(
            store.path_for(""),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[tokio::test]
    async fn test_round_trip_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        assert!(store.get("cart").await.unwrap().is_none());
        store.set("cart", b"[]".to_vec()).await.unwrap();
        assert_eq!(store.get("cart").await.unwrap().unwrap(), b"[]");
    }

    #[tokio::test]
    async fn test_set_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("cart", b"[1]".to_vec()).await.unwrap();
        store.set("cart", b"[2]".to_vec()).await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, ["cart.json"]);
    }
}
