// src/application/usecase/analysis_usecase.rs
// News analysis use case

use std::sync::Arc;

use chrono::Utc;

use crate::analysis::engine;
use crate::application::usecase::load_journal_lossy;
use crate::domain::errors::AppResult;
use crate::domain::models::{IndicatorReading, MarketAnalysis, TradeRecord};
use crate::domain::repository::JournalRepository;

/// Runs the analysis engine over raw form input and, on request, logs the
/// outcome as a pending journal record. Entitlement checks are the caller's
/// responsibility; this use case performs none.
pub struct AnalysisUseCase {
    journal: Arc<dyn JournalRepository>,
}

impl AnalysisUseCase {
    pub fn new(journal: Arc<dyn JournalRepository>) -> Self {
        Self { journal }
    }

    /// Validate raw input and analyze it. Fails only on validation; the
    /// engine itself is total.
    pub fn analyze_input(
        &self,
        news_type: Option<&str>,
        currency: &str,
        previous: &str,
        forecast: &str,
    ) -> AppResult<(IndicatorReading, MarketAnalysis)> {
        let reading = IndicatorReading::from_input(news_type, currency, previous, forecast)?;
        let analysis = engine::analyze(&reading);
        Ok((reading, analysis))
    }

    /// Analyze and append a pending record to the journal.
    pub async fn analyze_and_log(
        &self,
        news_type: Option<&str>,
        currency: &str,
        previous: &str,
        forecast: &str,
    ) -> AppResult<(MarketAnalysis, TradeRecord)> {
        let (reading, analysis) = self.analyze_input(news_type, currency, previous, forecast)?;
        let record = TradeRecord::from_analysis(&reading, &analysis, Utc::now());

        let mut records = load_journal_lossy(self.journal.as_ref()).await;
        records.push(record.clone());
        self.journal.save(&records).await?;
        log::info!("Logged pending trade {} for {}", record.id, record.news_type);

        Ok((analysis, record))
    }
}
