// src/application/usecase/journal_usecase.rs
// Trading journal use case

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::analysis::performance::PerformanceMetrics;
use crate::application::usecase::load_journal_lossy;
use crate::domain::errors::{AppError, AppResult, JournalError, ValidationError};
use crate::domain::models::{ActualResult, TradeOutcome, TradeRecord, TradeStatus};
use crate::domain::repository::JournalRepository;

/// Which records to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Pending,
    Completed,
    Wins,
    Losses,
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "completed" => Ok(StatusFilter::Completed),
            "wins" => Ok(StatusFilter::Wins),
            "losses" => Ok(StatusFilter::Losses),
            other => Err(ValidationError::InvalidChoice {
                field: "filter",
                value: other.to_string(),
            }),
        }
    }
}

/// How far back to look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodFilter {
    Week,
    Month,
    Year,
    All,
}

impl PeriodFilter {
    fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            PeriodFilter::Week => Some(now - Duration::days(7)),
            PeriodFilter::Month => Some(now - Duration::days(30)),
            PeriodFilter::Year => Some(now - Duration::days(365)),
            PeriodFilter::All => None,
        }
    }
}

impl FromStr for PeriodFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(PeriodFilter::Week),
            "month" => Ok(PeriodFilter::Month),
            "year" => Ok(PeriodFilter::Year),
            "all" => Ok(PeriodFilter::All),
            other => Err(ValidationError::InvalidChoice {
                field: "period",
                value: other.to_string(),
            }),
        }
    }
}

/// Journal operations. Records stay in insertion order (newest last); reads
/// degrade lossily on storage failure, writes propagate their errors.
/// Entitlement gating happens in the caller, not here.
pub struct JournalUseCase {
    repo: Arc<dyn JournalRepository>,
}

impl JournalUseCase {
    pub fn new(repo: Arc<dyn JournalRepository>) -> Self {
        Self { repo }
    }

    pub async fn entries(&self) -> Vec<TradeRecord> {
        load_journal_lossy(self.repo.as_ref()).await
    }

    /// Append a completed manual entry.
    pub async fn add_manual_trade(&self, result: ActualResult) -> AppResult<TradeRecord> {
        let record = TradeRecord::manual(result, Utc::now());
        let mut records = self.entries().await;
        records.push(record.clone());
        self.repo.save(&records).await?;
        log::info!("Added manual trade {}", record.id);
        Ok(record)
    }

    /// Record the actual outcome of a pending trade. One-way: a completed
    /// record rejects further results.
    pub async fn record_result(&self, id: &str, result: ActualResult) -> AppResult<TradeRecord> {
        let mut records = self.entries().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| JournalError::NotFound(id.to_string()))?;
        record.record_result(result)?;
        let updated = record.clone();
        self.repo.save(&records).await?;
        log::info!("Recorded result for trade {}", id);
        Ok(updated)
    }

    pub async fn clear(&self) -> AppResult<()> {
        self.repo.clear().await?;
        log::info!("Cleared trading journal");
        Ok(())
    }

    /// Recompute metrics from the full collection. Never cached.
    pub async fn metrics(&self) -> PerformanceMetrics {
        PerformanceMetrics::calculate(&self.entries().await)
    }

    /// Filter a record list by status and period without reordering it.
    pub fn filter<'a>(
        records: &'a [TradeRecord],
        status: StatusFilter,
        period: PeriodFilter,
        now: DateTime<Utc>,
    ) -> Vec<&'a TradeRecord> {
        let cutoff = period.cutoff(now);
        records
            .iter()
            .filter(|r| match status {
                StatusFilter::All => true,
                StatusFilter::Pending => r.status() == TradeStatus::Pending,
                StatusFilter::Completed => r.is_completed(),
                StatusFilter::Wins => r.outcome() == Some(TradeOutcome::Win),
                StatusFilter::Losses => r.outcome() == Some(TradeOutcome::Loss),
            })
            .filter(|r| cutoff.map_or(true, |c| r.date >= c))
            .collect()
    }

    /// Render the journal as CSV, one row per record.
    pub async fn export_csv(&self) -> AppResult<String> {
        let records = self.entries().await;
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "id",
                "date",
                "newsType",
                "currency",
                "previous",
                "forecast",
                "prediction",
                "suggestedPairs",
                "expectedPips",
                "tradingAdvice",
                "confidence",
                "status",
                "profit",
                "pips",
                "outcome",
                "notes",
            ])
            .map_err(|e| AppError::Export(e.to_string()))?;

        for record in &records {
            let result = record.actual_result();
            let status = match record.status() {
                TradeStatus::Pending => "pending",
                TradeStatus::Completed => "completed",
            };
            let row = [
                record.id.clone(),
                record.date.to_rfc3339(),
                record.news_type.clone(),
                record.currency.code().to_string(),
                record.previous.map(|d| d.to_string()).unwrap_or_default(),
                record.forecast.map(|d| d.to_string()).unwrap_or_default(),
                record.prediction.as_str().to_string(),
                record.suggested_pairs.join("|"),
                record.expected_pips.to_string(),
                record.trading_advice.clone(),
                record.confidence.to_string(),
                status.to_string(),
                result.map(|r| r.profit.to_string()).unwrap_or_default(),
                result.map(|r| r.pips.to_string()).unwrap_or_default(),
                result.map(|r| r.outcome.as_str().to_string()).unwrap_or_default(),
                result
                    .and_then(|r| r.notes.clone())
                    .unwrap_or_default(),
            ];
            writer
                .write_record(&row)
                .map_err(|e| AppError::Export(e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Export(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))
    }
}
