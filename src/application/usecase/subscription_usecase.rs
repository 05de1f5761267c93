// src/application/usecase/subscription_usecase.rs
// Subscription / entitlement use case

use std::sync::Arc;

use chrono::Utc;

use crate::domain::errors::AppResult;
use crate::domain::models::{PremiumPlan, Subscription};
use crate::domain::repository::EntitlementRepository;

/// Reads and updates the entitlement flag. Plan activation is local: store
/// billing is an external concern and never touches this crate.
pub struct SubscriptionUseCase {
    repo: Arc<dyn EntitlementRepository>,
}

impl SubscriptionUseCase {
    pub fn new(repo: Arc<dyn EntitlementRepository>) -> Self {
        Self { repo }
    }

    /// Current entitlement, degrading to "no entitlement" on a failed read.
    pub async fn status(&self) -> Subscription {
        match self.repo.load().await {
            Ok(subscription) => subscription,
            Err(e) => {
                log::warn!("Failed to load subscription status: {}", e);
                Subscription::default()
            }
        }
    }

    pub async fn is_premium(&self) -> bool {
        self.status().await.is_active
    }

    /// Activate a plan and persist the entitlement.
    pub async fn subscribe(&self, plan: PremiumPlan) -> AppResult<Subscription> {
        let subscription = Subscription::active(plan, Utc::now());
        self.repo.save(&subscription).await?;
        log::info!("Activated {} plan", plan.title());
        Ok(subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{PersistenceError, PersistenceResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryEntitlement {
        stored: Mutex<Option<Subscription>>,
    }

    #[async_trait]
    impl EntitlementRepository for MemoryEntitlement {
        async fn load(&self) -> PersistenceResult<Subscription> {
            Ok(self.stored.lock().unwrap().clone().unwrap_or_default())
        }

        async fn save(&self, subscription: &Subscription) -> PersistenceResult<()> {
            *self.stored.lock().unwrap() = Some(subscription.clone());
            Ok(())
        }
    }

    struct BrokenEntitlement;

    #[async_trait]
    impl EntitlementRepository for BrokenEntitlement {
        async fn load(&self) -> PersistenceResult<Subscription> {
            Err(PersistenceError::Read {
                key: "fxpulse_subscription".to_string(),
                reason: "unreadable".to_string(),
            })
        }

        async fn save(&self, _subscription: &Subscription) -> PersistenceResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn defaults_to_no_entitlement() {
        let usecase = SubscriptionUseCase::new(Arc::new(MemoryEntitlement::default()));
        assert!(!usecase.is_premium().await);
        assert_eq!(usecase.status().await.plan_name(), "None");
    }

    #[tokio::test]
    async fn subscribing_activates_the_plan() {
        let usecase = SubscriptionUseCase::new(Arc::new(MemoryEntitlement::default()));
        let subscription = usecase.subscribe(PremiumPlan::Yearly).await.unwrap();
        assert!(subscription.is_active);
        assert_eq!(subscription.plan_name(), "Yearly Pro");
        assert!(usecase.is_premium().await);
    }

    #[tokio::test]
    async fn read_failure_degrades_to_no_entitlement() {
        let usecase = SubscriptionUseCase::new(Arc::new(BrokenEntitlement));
        assert!(!usecase.is_premium().await);
    }
}
