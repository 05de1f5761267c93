// src/infrastructure/device.rs
use uuid::Uuid;

use crate::domain::errors::PersistenceResult;
use crate::infrastructure::storage::{FileKeyValueStore, DEVICE_ID_KEY};

/// Return this installation's identifier, generating and persisting a fresh
/// 32-hex-character one on first use. Stable across runs once created.
pub async fn get_or_create_device_id(store: &FileKeyValueStore) -> PersistenceResult<String> {
    if let Some(id) = store.get::<String>(DEVICE_ID_KEY).await? {
        return Ok(id);
    }
    let id = Uuid::new_v4().simple().to_string();
    store.set(DEVICE_ID_KEY, &id).await?;
    Ok(id)
}
