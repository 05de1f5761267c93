// src/domain/repository/mod.rs
// Repository interfaces for domain entities

use async_trait::async_trait;

use crate::domain::errors::PersistenceResult;
use crate::domain::models::{Subscription, TradeRecord};

/// Storage interface for the trading journal. The stored collection is the
/// sole source of truth for performance metrics; a missing blob is an empty
/// journal, not an error.
#[async_trait]
pub trait JournalRepository: Send + Sync {
    async fn load(&self) -> PersistenceResult<Vec<TradeRecord>>;
    async fn save(&self, records: &[TradeRecord]) -> PersistenceResult<()>;
    async fn clear(&self) -> PersistenceResult<()>;
}

/// Storage interface for the entitlement flag. A missing blob means no
/// entitlement.
#[async_trait]
pub trait EntitlementRepository: Send + Sync {
    async fn load(&self) -> PersistenceResult<Subscription>;
    async fn save(&self, subscription: &Subscription) -> PersistenceResult<()>;
}
