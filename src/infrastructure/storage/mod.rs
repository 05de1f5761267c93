// src/infrastructure/storage/mod.rs
// File-backed key-value storage: one JSON blob per fixed key under the data
// directory. A missing key reads as "nothing stored", never as an error.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::errors::{PersistenceError, PersistenceResult};
use crate::domain::models::{Subscription, TradeRecord};
use crate::domain::repository::{EntitlementRepository, JournalRepository};

pub const JOURNAL_KEY: &str = "fxpulse_trading_journal";
pub const SUBSCRIPTION_KEY: &str = "fxpulse_subscription";
pub const DEVICE_ID_KEY: &str = "fxpulse_device_id";

#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> PersistenceResult<Option<T>> {
        let path = self.path_for(key);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(PersistenceError::Read {
                    key: key.to_string(),
                    reason: e.to_string(),
                })
            }
        };
        let value = serde_json::from_str(&raw).map_err(|e| PersistenceError::Decode {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(value))
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> PersistenceResult<()> {
        let raw = serde_json::to_string_pretty(value).map_err(|e| PersistenceError::Encode {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| PersistenceError::Write {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        tokio::fs::write(self.path_for(key), raw)
            .await
            .map_err(|e| PersistenceError::Write {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    pub async fn remove(&self, key: &str) -> PersistenceResult<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::Write {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// Journal collection stored as one JSON array under `JOURNAL_KEY`.
pub struct FileJournalRepository {
    store: FileKeyValueStore,
}

impl FileJournalRepository {
    pub fn new(store: FileKeyValueStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl JournalRepository for FileJournalRepository {
    async fn load(&self) -> PersistenceResult<Vec<TradeRecord>> {
        Ok(self
            .store
            .get::<Vec<TradeRecord>>(JOURNAL_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, records: &[TradeRecord]) -> PersistenceResult<()> {
        self.store.set(JOURNAL_KEY, &records).await
    }

    async fn clear(&self) -> PersistenceResult<()> {
        self.store.remove(JOURNAL_KEY).await
    }
}

/// Entitlement flag stored as one JSON object under `SUBSCRIPTION_KEY`.
pub struct FileEntitlementRepository {
    store: FileKeyValueStore,
}

impl FileEntitlementRepository {
    pub fn new(store: FileKeyValueStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EntitlementRepository for FileEntitlementRepository {
    async fn load(&self) -> PersistenceResult<Subscription> {
        Ok(self
            .store
            .get::<Subscription>(SUBSCRIPTION_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, subscription: &Subscription) -> PersistenceResult<()> {
        self.store.set(SUBSCRIPTION_KEY, subscription).await
    }
}
