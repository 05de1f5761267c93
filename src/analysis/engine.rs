// src/analysis/engine.rs
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::analysis::tables;
use crate::domain::models::{ImpactTier, IndicatorReading, MarketAnalysis, Sentiment, TradingAdvice};

/// Every valid reading yields at least this many expected pips.
pub const MIN_EXPECTED_PIPS: u32 = 10;

/// Cap on the surprise-magnitude multiplier.
const MAX_ADJUSTMENT: Decimal = dec!(2);

/// Analyze one indicator reading.
///
/// Pure function of its input: no hidden state, no I/O, and the same reading
/// always yields the same analysis. Validation happens when the
/// `IndicatorReading` is constructed; past that boundary this cannot fail.
pub fn analyze(reading: &IndicatorReading) -> MarketAnalysis {
    let difference = reading.forecast - reading.previous;
    let sentiment = Sentiment::from_difference(difference);

    // Percent change is undefined for a zero baseline; `None` saturates the
    // adjustment cap below.
    let percent_change = difference
        .checked_div(reading.previous)
        .map(|ratio| ratio * dec!(100));

    let tier = reading.news_type.impact_tier();
    let expected_pips = expected_pips(tier, sentiment, percent_change);

    MarketAnalysis {
        sentiment,
        narrative: tables::narrative(reading.news_type, sentiment, reading.previous, reading.forecast),
        currency_impact: tables::currency_impact(reading.currency, reading.news_type, sentiment),
        suggested_pairs: tables::suggested_pairs(reading.currency, sentiment),
        expected_pips,
        advice: TradingAdvice::from_pips(expected_pips),
        time_horizon: tables::time_horizon(tier),
    }
}

/// Base pips for the tier, scaled by how far the forecast strays from the
/// previous print: `min(|percent change| / 10, 2)`, floored at 10 pips.
fn expected_pips(tier: ImpactTier, sentiment: Sentiment, percent_change: Option<Decimal>) -> u32 {
    let base = Decimal::from(tier.base_pips(sentiment));
    let adjustment = match percent_change {
        Some(pct) => (pct.abs() / dec!(10)).min(MAX_ADJUSTMENT),
        None => MAX_ADJUSTMENT,
    };
    let adjusted = (base * adjustment).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    adjusted.to_u32().unwrap_or(0).max(MIN_EXPECTED_PIPS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Currency, NewsType, TradeDirection};

    fn reading(news: NewsType, currency: Currency, previous: &str, forecast: &str) -> IndicatorReading {
        IndicatorReading::from_input(
            Some(news.label()),
            currency.code(),
            previous,
            forecast,
        )
        .unwrap()
    }

    #[test]
    fn sentiment_follows_the_sign_of_the_surprise() {
        let bullish = analyze(&reading(NewsType::RetailSales, Currency::USD, "1.0", "1.1"));
        assert_eq!(bullish.sentiment, Sentiment::Bullish);

        let bearish = analyze(&reading(NewsType::RetailSales, Currency::USD, "1.1", "1.0"));
        assert_eq!(bearish.sentiment, Sentiment::Bearish);

        let neutral = analyze(&reading(NewsType::RetailSales, Currency::USD, "1.1", "1.1"));
        assert_eq!(neutral.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn nfp_surprise_end_to_end() {
        // 150 -> 180 is a 20% surprise: the adjustment saturates at 2, so the
        // bullish NFP base of 80 pips doubles.
        let analysis = analyze(&reading(NewsType::NonFarmPayrolls, Currency::USD, "150", "180"));
        assert_eq!(analysis.sentiment, Sentiment::Bullish);
        assert_eq!(analysis.expected_pips, 160);
        assert_eq!(analysis.advice, TradingAdvice::HighImpact);
        assert_eq!(analysis.suggested_pairs[0].pair, "EUR/USD");
        assert_eq!(analysis.suggested_pairs[0].direction, TradeDirection::Sell);
        assert!(analysis.narrative.contains("from 150 to 180"));
    }

    #[test]
    fn neutral_reading_hits_the_pip_floor() {
        let analysis = analyze(&reading(NewsType::NonFarmPayrolls, Currency::USD, "150", "150"));
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
        assert_eq!(analysis.expected_pips, MIN_EXPECTED_PIPS);
        assert_eq!(analysis.advice, TradingAdvice::LowImpact);
        assert_eq!(analysis.currency_impact, None);
    }

    #[test]
    fn tiny_surprises_still_floor_at_ten_pips() {
        // 0.01% change: adjustment 0.001, well under the floor for any tier.
        let analysis = analyze(&reading(NewsType::HousingStarts, Currency::USD, "1000", "1000.1"));
        assert_eq!(analysis.expected_pips, MIN_EXPECTED_PIPS);
    }

    #[test]
    fn moderate_surprise_scales_linearly() {
        // CPI 2.0 -> 2.1 is a 5% surprise: adjustment 0.5 on a bullish base
        // of 60 gives 30 pips.
        let analysis = analyze(&reading(NewsType::ConsumerPriceIndex, Currency::USD, "2.0", "2.1"));
        assert_eq!(analysis.expected_pips, 30);
        assert_eq!(analysis.advice, TradingAdvice::Moderate);
    }

    #[test]
    fn zero_previous_saturates_the_adjustment() {
        let analysis = analyze(&reading(NewsType::InterestRateDecision, Currency::USD, "0", "0.25"));
        assert_eq!(analysis.sentiment, Sentiment::Bullish);
        // Critical bullish base 80 at the adjustment cap of 2.
        assert_eq!(analysis.expected_pips, 160);
    }

    #[test]
    fn non_base_currency_leads_with_its_usd_pair() {
        let analysis = analyze(&reading(NewsType::CoreCpi, Currency::EUR, "5.1", "4.8"));
        assert_eq!(analysis.sentiment, Sentiment::Bearish);
        assert!(analysis.suggested_pairs.len() <= 5);
        assert_eq!(analysis.suggested_pairs[0].pair, "EUR/USD");
        assert_eq!(analysis.suggested_pairs[0].direction, TradeDirection::Sell);
        assert!(analysis
            .currency_impact
            .as_deref()
            .unwrap()
            .starts_with("Euro weakness is expected"));
    }

    #[test]
    fn analyze_is_idempotent() {
        let input = reading(NewsType::TradeBalance, Currency::JPY, "-68.5", "-54");
        assert_eq!(analyze(&input), analyze(&input));
    }

    #[test]
    fn report_carries_all_sections() {
        let analysis = analyze(&reading(NewsType::NonFarmPayrolls, Currency::USD, "150", "180"));
        let report = analysis.report();
        assert!(report.starts_with("🚀 BULLISH ANALYSIS"));
        assert!(report.contains("TRADING OPPORTUNITIES"));
        assert!(report.contains("TOTAL EXPECTED: 160 pips"));
        assert!(report.contains("💡 ADVICE: 🔥 High Impact - Large Positions"));
        assert!(report.contains("⚠️ RISK:"));
    }
}
