use std::path::{Path, PathBuf};

use metacog_core::storage_keys;

use crate::error::StorageError;

fn object_path(data_dir: &Path, key: &str) -> PathBuf {
    data_dir.join(key)
}

/// Read an object from the data directory.
pub async fn get_object(data_dir: &Path, key: &str) -> Result<Vec<u8>, StorageError> {
    tokio::fs::read(object_path(data_dir, key))
        .await
        .map_err(|e| StorageError::io(key, e))
}

/// Write an object, replacing any previous content atomically (tmp + rename).
pub async fn put_object(data_dir: &Path, key: &str, body: Vec<u8>) -> Result<(), StorageError> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| StorageError::io(key, e))?;

    let path = object_path(data_dir, key);
    let tmp_path = object_path(data_dir, &storage_keys::tmp_key(key));
    tokio::fs::write(&tmp_path, &body)
        .await
        .map_err(|e| StorageError::io(key, e))?;
    tokio::fs::rename(&tmp_path, &path)
        .await
        .map_err(|e| StorageError::io(key, e))?;

    tracing::debug!(path = %path.display(), bytes = body.len(), "object written");
    Ok(())
}

/// Delete an object. Deleting a missing object is not an error.
pub async fn delete_object(data_dir: &Path, key: &str) -> Result<(), StorageError> {
    match tokio::fs::remove_file(object_path(data_dir, key)).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StorageError::io(key, e)),
    }
}
