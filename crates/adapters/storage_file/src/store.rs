//! The shared file-backed store and its configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use hbnb_app::ports::Storage;
use hbnb_domain::error::HbnbError;
use hbnb_domain::object::Object;

use crate::document::{self, Records};
use crate::error::StorageError;
use crate::session::FileSession;

/// Configuration for the file storage adapter.
pub struct Config {
    /// Path of the JSON document (e.g. `file.json`).
    pub path: PathBuf,
}

impl Config {
    /// Build a [`FileStorage`] from this configuration, loading the document
    /// if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file exists but cannot be read or decoded.
    pub async fn build(self) -> Result<FileStorage, StorageError> {
        FileStorage::load(self.path).await
    }
}

/// A change staged on a session, applied on commit.
pub(crate) enum Change {
    Put(Object),
    Remove(String),
}

struct Inner {
    path: PathBuf,
    records: RwLock<Records>,
}

/// File-backed storage. Cheap to clone; clones share the loaded records.
#[derive(Clone)]
pub struct FileStorage {
    inner: Arc<Inner>,
}

impl FileStorage {
    async fn load(path: PathBuf) -> Result<Self, StorageError> {
        let records = read_document(&path).await?;
        tracing::info!(path = %path.display(), records = records.len(), "file storage loaded");
        Ok(Self {
            inner: Arc::new(Inner {
                path,
                records: RwLock::new(records),
            }),
        })
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Run `f` against the committed records.
    pub(crate) async fn read<T>(&self, f: impl FnOnce(&Records) -> T) -> T {
        let records = self.inner.records.read().await;
        f(&records)
    }

    /// Apply `changes` and rewrite the document. Memory is only updated once
    /// the file write succeeded.
    pub(crate) async fn commit(&self, changes: Vec<Change>) -> Result<(), StorageError> {
        let mut records = self.inner.records.write().await;
        let mut next = records.clone();
        for change in changes {
            match change {
                Change::Put(object) => {
                    next.insert(object.key(), object);
                }
                Change::Remove(key) => {
                    next.remove(&key);
                }
            }
        }

        write_document(&self.inner.path, &document::encode(&next)?).await?;
        *records = next;
        Ok(())
    }
}

impl Storage for FileStorage {
    type Session = FileSession;

    async fn open(&self) -> Result<FileSession, HbnbError> {
        Ok(FileSession::new(self.clone()))
    }
}

async fn read_document(path: &Path) -> Result<Records, StorageError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => document::decode(&bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Records::new()),
        Err(err) => Err(err.into()),
    }
}

async fn write_document(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_domain::place::Place;

    #[tokio::test]
    async fn should_start_empty_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Config {
            path: dir.path().join("file.json"),
        }
        .build()
        .await
        .unwrap();

        assert_eq!(storage.read(Records::len).await, 0);
        assert!(!storage.path().exists());
    }

    #[tokio::test]
    async fn should_write_document_on_commit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("file.json");
        let storage = Config { path: path.clone() }.build().await.unwrap();

        let place = Place::builder().id("P1").build();
        storage
            .commit(vec![Change::Put(place.into())])
            .await
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"Place.P1\""));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn should_apply_removals_on_commit() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Config {
            path: dir.path().join("file.json"),
        }
        .build()
        .await
        .unwrap();

        let place: Object = Place::builder().id("P1").build().into();
        storage
            .commit(vec![Change::Put(place.clone())])
            .await
            .unwrap();
        storage
            .commit(vec![Change::Remove(place.key())])
            .await
            .unwrap();

        assert_eq!(storage.read(Records::len).await, 0);
    }

    #[tokio::test]
    async fn should_fail_to_load_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");
        std::fs::write(&path, "{ nope").unwrap();

        let result = Config { path }.build().await;
        assert!(matches!(result, Err(StorageError::Json(_))));
    }
}
