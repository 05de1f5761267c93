// src/application/usecase/mod.rs
pub mod analysis_usecase;
pub mod journal_usecase;
pub mod subscription_usecase;

pub use analysis_usecase::AnalysisUseCase;
pub use journal_usecase::{JournalUseCase, PeriodFilter, StatusFilter};
pub use subscription_usecase::SubscriptionUseCase;

use crate::domain::models::TradeRecord;
use crate::domain::repository::JournalRepository;

/// Load the journal with the deliberately lossy fallback: a failed or
/// partially corrupt read degrades to what could be recovered (possibly
/// nothing) with a warning, never an error. Write failures still propagate.
pub(crate) async fn load_journal_lossy(repo: &dyn JournalRepository) -> Vec<TradeRecord> {
    match repo.load().await {
        Ok(records) => {
            let total = records.len();
            let consistent: Vec<TradeRecord> =
                records.into_iter().filter(|r| r.is_consistent()).collect();
            if consistent.len() < total {
                log::warn!(
                    "Dropped {} journal record(s) with mismatched status",
                    total - consistent.len()
                );
            }
            consistent
        }
        Err(e) => {
            log::warn!("Failed to load trading journal, starting empty: {}", e);
            Vec::new()
        }
    }
}
