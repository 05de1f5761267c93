// src/analysis/performance.rs
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::models::{TradeDirection, TradeOutcome, TradeRecord};

/// Aggregate journal statistics. Fully derived: recomputed from the record
/// collection on every read, never updated incrementally, so it cannot drift
/// from its source.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub total_trades: usize,
    pub completed_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: f64,
    pub total_profit: Decimal,
    pub total_pips: Decimal,
    pub average_pips: Decimal,
    pub best_trade: Decimal,
    pub worst_trade: Decimal,
    pub current_streak: usize,
    pub accuracy_rate: f64,
}

impl PerformanceMetrics {
    /// Compute metrics over the journal in insertion order (newest last).
    /// Only the win streak is order-sensitive; everything else is a plain
    /// reduction. An empty journal yields all zeros.
    pub fn calculate(records: &[TradeRecord]) -> Self {
        let completed: Vec<&TradeRecord> =
            records.iter().filter(|r| r.is_completed()).collect();

        if completed.is_empty() {
            return Self {
                total_trades: records.len(),
                ..Self::default()
            };
        }

        let winning_trades = completed
            .iter()
            .filter(|r| r.outcome() == Some(TradeOutcome::Win))
            .count();
        let losing_trades = completed
            .iter()
            .filter(|r| r.outcome() == Some(TradeOutcome::Loss))
            .count();

        let mut total_profit = Decimal::ZERO;
        let mut total_pips = Decimal::ZERO;
        let mut best_trade: Option<Decimal> = None;
        let mut worst_trade: Option<Decimal> = None;
        for record in &completed {
            if let Some(result) = record.actual_result() {
                total_profit += result.profit;
                total_pips += result.pips;
                best_trade = Some(best_trade.map_or(result.profit, |b| b.max(result.profit)));
                worst_trade = Some(worst_trade.map_or(result.profit, |w| w.min(result.profit)));
            }
        }

        let completed_len = completed.len();
        let current_streak = completed
            .iter()
            .rev()
            .take_while(|r| r.outcome() == Some(TradeOutcome::Win))
            .count();

        let accurate_predictions = completed
            .iter()
            .filter(|r| {
                matches!(
                    (r.prediction, r.outcome()),
                    (TradeDirection::Buy, Some(TradeOutcome::Win))
                        | (TradeDirection::Sell, Some(TradeOutcome::Loss))
                )
            })
            .count();

        Self {
            total_trades: records.len(),
            completed_trades: completed_len,
            winning_trades,
            losing_trades,
            win_rate: winning_trades as f64 / completed_len as f64 * 100.0,
            total_profit,
            total_pips,
            average_pips: total_pips / Decimal::from(completed_len),
            best_trade: best_trade.unwrap_or_default(),
            worst_trade: worst_trade.unwrap_or_default(),
            current_streak,
            accuracy_rate: accurate_predictions as f64 / completed_len as f64 * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::engine::analyze;
    use crate::domain::models::{ActualResult, Currency, IndicatorReading, NewsType};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn completed(outcome: TradeOutcome, profit: Decimal, pips: Decimal) -> TradeRecord {
        TradeRecord::manual(
            ActualResult {
                profit,
                pips,
                outcome,
                notes: None,
            },
            Utc::now(),
        )
    }

    fn pending() -> TradeRecord {
        let reading = IndicatorReading::from_input(
            Some(NewsType::NonFarmPayrolls.label()),
            Currency::USD.code(),
            "150",
            "180",
        )
        .unwrap();
        let analysis = analyze(&reading);
        TradeRecord::from_analysis(&reading, &analysis, Utc::now())
    }

    #[test]
    fn empty_journal_yields_all_zeros() {
        let metrics = PerformanceMetrics::calculate(&[]);
        assert_eq!(metrics, PerformanceMetrics::default());
    }

    #[test]
    fn pending_records_count_only_toward_totals() {
        let metrics = PerformanceMetrics::calculate(&[pending(), pending()]);
        assert_eq!(metrics.total_trades, 2);
        assert_eq!(metrics.completed_trades, 0);
        assert_eq!(metrics.win_rate, 0.0);
        assert_eq!(metrics.average_pips, Decimal::ZERO);
    }

    #[test]
    fn streak_counts_trailing_wins_only() {
        let records = vec![
            completed(TradeOutcome::Win, dec!(10), dec!(5)),
            completed(TradeOutcome::Loss, dec!(-20), dec!(-8)),
            completed(TradeOutcome::Win, dec!(30), dec!(12)),
        ];
        let metrics = PerformanceMetrics::calculate(&records);
        assert_eq!(metrics.current_streak, 1);
        assert_eq!(metrics.winning_trades, 2);
        assert_eq!(metrics.losing_trades, 1);
    }

    #[test]
    fn streak_is_zero_when_latest_completed_trade_lost() {
        let records = vec![
            completed(TradeOutcome::Win, dec!(10), dec!(5)),
            completed(TradeOutcome::Win, dec!(10), dec!(5)),
            completed(TradeOutcome::Loss, dec!(-5), dec!(-2)),
        ];
        assert_eq!(PerformanceMetrics::calculate(&records).current_streak, 0);
    }

    #[test]
    fn trailing_pending_records_do_not_break_the_streak() {
        let records = vec![
            completed(TradeOutcome::Loss, dec!(-5), dec!(-2)),
            completed(TradeOutcome::Win, dec!(10), dec!(5)),
            completed(TradeOutcome::Win, dec!(10), dec!(5)),
            pending(),
        ];
        assert_eq!(PerformanceMetrics::calculate(&records).current_streak, 2);
    }

    #[test]
    fn single_winning_trade_metrics() {
        // One completed BUY prediction that won with profit 100 / 50 pips.
        let records = vec![completed(TradeOutcome::Win, dec!(100), dec!(50))];
        let metrics = PerformanceMetrics::calculate(&records);
        assert_eq!(metrics.win_rate, 100.0);
        assert_eq!(metrics.accuracy_rate, 100.0);
        assert_eq!(metrics.best_trade, dec!(100));
        assert_eq!(metrics.worst_trade, dec!(100));
        assert_eq!(metrics.total_pips, dec!(50));
        assert_eq!(metrics.average_pips, dec!(50));
    }

    #[test]
    fn accuracy_tracks_prediction_against_outcome() {
        // A pending NFP/USD analysis predicts SELL on its headline pair
        // (EUR/USD). A winning outcome therefore counts against accuracy.
        let mut from_analysis = pending();
        from_analysis
            .record_result(ActualResult {
                profit: dec!(40),
                pips: dec!(20),
                outcome: TradeOutcome::Win,
                notes: None,
            })
            .unwrap();
        assert_eq!(from_analysis.prediction, TradeDirection::Sell);

        // Manual records derive prediction from outcome, so this one matches.
        let records = vec![from_analysis, completed(TradeOutcome::Loss, dec!(-10), dec!(-4))];
        let metrics = PerformanceMetrics::calculate(&records);
        assert_eq!(metrics.completed_trades, 2);
        assert_eq!(metrics.accuracy_rate, 50.0);
        assert_eq!(metrics.win_rate, 50.0);
    }

    #[test]
    fn profit_totals_and_extremes() {
        let records = vec![
            completed(TradeOutcome::Win, dec!(120.50), dec!(60)),
            completed(TradeOutcome::Loss, dec!(-45.25), dec!(-15)),
            completed(TradeOutcome::Win, dec!(30), dec!(9)),
        ];
        let metrics = PerformanceMetrics::calculate(&records);
        assert_eq!(metrics.total_profit, dec!(105.25));
        assert_eq!(metrics.total_pips, dec!(54));
        assert_eq!(metrics.average_pips, dec!(18));
        assert_eq!(metrics.best_trade, dec!(120.50));
        assert_eq!(metrics.worst_trade, dec!(-45.25));
    }
}
