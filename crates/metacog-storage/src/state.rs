use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::objects;

/// Load a JSON state file from the data directory.
pub async fn load_state<T: DeserializeOwned>(data_dir: &Path, key: &str) -> Result<T, StorageError> {
    let body = objects::get_object(data_dir, key).await?;
    let value: T = serde_json::from_slice(&body)?;
    Ok(value)
}

/// Load a JSON state file, or `T::default()` when it does not exist yet.
pub async fn load_state_or_default<T: DeserializeOwned + Default>(
    data_dir: &Path,
    key: &str,
) -> Result<T, StorageError> {
    match load_state(data_dir, key).await {
        Ok(value) => Ok(value),
        Err(StorageError::NotFound { .. }) => {
            tracing::debug!(key, "no state on disk, starting empty");
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}

/// Save a JSON state file to the data directory.
pub async fn save_state<T: Serialize>(data_dir: &Path, key: &str, value: &T) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    objects::put_object(data_dir, key, body).await
}
