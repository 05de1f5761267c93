// src/domain/mod.rs
pub mod errors;
pub mod models;
pub mod repository;

// Re-export common types for convenience
pub use errors::{
    AppError, AppResult, JournalError, JournalResult, PersistenceError, PersistenceResult,
    ValidationError, ValidationResult,
};
pub use models::{
    ActualResult, Currency, ImpactTier, IndicatorReading, MarketAnalysis, NewsCategory, NewsType,
    PremiumPlan, Sentiment, Subscription, SuggestedPair, TradeDirection, TradeOutcome,
    TradeRecord, TradeStatus, TradingAdvice,
};
pub use repository::{EntitlementRepository, JournalRepository};
