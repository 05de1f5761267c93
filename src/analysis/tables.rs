// src/analysis/tables.rs
// The rule set behind the analysis engine, kept as explicit lookups so the
// tables are testable on their own and replaceable wholesale.

use rust_decimal::Decimal;

use crate::domain::models::{
    Currency, ImpactTier, NewsCategory, NewsType, Sentiment, SuggestedPair, TradeDirection,
};

pub(crate) const MAX_SUGGESTED_PAIRS: usize = 5;

/// Headline narrative keyed by (category, sentiment). Neutral readings share
/// one template regardless of category.
pub(crate) fn narrative(
    news_type: NewsType,
    sentiment: Sentiment,
    previous: Decimal,
    forecast: Decimal,
) -> String {
    let p = previous;
    let f = forecast;
    match sentiment {
        Sentiment::Neutral => format!(
            "No change in {} data ({} to {}). This suggests economic stability with minimal market impact.",
            news_type.label(),
            p,
            f
        ),
        Sentiment::Bullish => match news_type.category() {
            NewsCategory::Employment => format!(
                "Strong employment data with an increase from {} to {} jobs. This indicates robust economic growth and labor market strength.",
                p, f
            ),
            NewsCategory::Inflation => format!(
                "Higher inflation data ({} to {}) suggests rising price pressures, which may influence central bank policy decisions.",
                p, f
            ),
            NewsCategory::Growth => format!(
                "Economic growth acceleration from {}% to {}% indicates expanding economic activity and potential currency strength.",
                p, f
            ),
            NewsCategory::InterestRate => format!(
                "Interest rate increase from {}% to {}% suggests tighter monetary policy, typically supporting currency strength.",
                p, f
            ),
            NewsCategory::Pmi => format!(
                "PMI improvement from {} to {} indicates expanding business activity and economic momentum.",
                p, f
            ),
            NewsCategory::Unemployment => format!(
                "Unemployment rate decrease from {}% to {}% indicates improving labor market conditions and economic strength.",
                p, f
            ),
            NewsCategory::TradeBalance => format!(
                "Trade balance improvement from {} to {} indicates stronger export performance and economic competitiveness.",
                p, f
            ),
            NewsCategory::RetailSales => format!(
                "Retail sales increase from {} to {} indicates strong consumer spending and economic growth.",
                p, f
            ),
            NewsCategory::IndustrialProduction => format!(
                "Industrial production growth from {} to {} indicates expanding manufacturing sector and economic strength.",
                p, f
            ),
            NewsCategory::HousingStarts => format!(
                "Housing starts increase from {} to {} indicates strong construction sector and economic growth.",
                p, f
            ),
            NewsCategory::DurableGoods => format!(
                "Durable goods orders increase from {} to {} indicates strong business investment and economic confidence.",
                p, f
            ),
        },
        Sentiment::Bearish => match news_type.category() {
            NewsCategory::Employment => format!(
                "Weaker employment data with a decrease from {} to {} jobs. This indicates economic slowdown and labor market weakness.",
                p, f
            ),
            NewsCategory::Inflation => format!(
                "Lower inflation data ({} to {}) suggests easing price pressures, which may influence central bank policy decisions.",
                p, f
            ),
            NewsCategory::Growth => format!(
                "Economic growth slowdown from {}% to {}% indicates contracting economic activity and potential currency weakness.",
                p, f
            ),
            NewsCategory::InterestRate => format!(
                "Interest rate decrease from {}% to {}% suggests looser monetary policy, typically weakening currency strength.",
                p, f
            ),
            NewsCategory::Pmi => format!(
                "PMI decline from {} to {} indicates contracting business activity and economic slowdown.",
                p, f
            ),
            NewsCategory::Unemployment => format!(
                "Unemployment rate increase from {}% to {}% indicates deteriorating labor market conditions and economic weakness.",
                p, f
            ),
            NewsCategory::TradeBalance => format!(
                "Trade balance deterioration from {} to {} indicates weaker export performance and economic competitiveness.",
                p, f
            ),
            NewsCategory::RetailSales => format!(
                "Retail sales decrease from {} to {} indicates weak consumer spending and economic slowdown.",
                p, f
            ),
            NewsCategory::IndustrialProduction => format!(
                "Industrial production decline from {} to {} indicates contracting manufacturing sector and economic weakness.",
                p, f
            ),
            NewsCategory::HousingStarts => format!(
                "Housing starts decrease from {} to {} indicates weak construction sector and economic slowdown.",
                p, f
            ),
            NewsCategory::DurableGoods => format!(
                "Durable goods orders decrease from {} to {} indicates weak business investment and economic uncertainty.",
                p, f
            ),
        },
    }
}

/// Currency-impact framing. The base currency is discussed in terms of its
/// own strength; every other currency in terms of its USD pair. Neutral
/// readings carry no impact statement.
pub(crate) fn currency_impact(
    currency: Currency,
    news_type: NewsType,
    sentiment: Sentiment,
) -> Option<String> {
    let name = currency.name();
    let code = currency.code();
    // The impact framing only distinguishes the four policy-relevant
    // buckets; everything else shares the generic template.
    let category = news_type.category();

    let text = match (currency.is_base(), sentiment) {
        (_, Sentiment::Neutral) => return None,
        (true, Sentiment::Bullish) => match category {
            NewsCategory::Employment => format!(
                "{} strength is expected as strong employment data typically supports USD appreciation against other currencies.",
                name
            ),
            NewsCategory::Inflation => format!(
                "{} strength is expected as higher inflation may lead to tighter monetary policy, supporting USD.",
                name
            ),
            NewsCategory::Growth => format!(
                "{} strength is expected as strong economic growth typically supports USD appreciation.",
                name
            ),
            NewsCategory::InterestRate => format!(
                "{} strength is expected as higher interest rates typically attract foreign investment and support USD.",
                name
            ),
            _ => format!(
                "{} strength is expected as positive {} data typically supports USD appreciation against other currencies.",
                name,
                news_type.label()
            ),
        },
        (true, Sentiment::Bearish) => match category {
            NewsCategory::Employment => format!(
                "{} weakness is expected as weak employment data typically leads to USD depreciation against other currencies.",
                name
            ),
            NewsCategory::Inflation => format!(
                "{} weakness is expected as lower inflation may lead to looser monetary policy, weakening USD.",
                name
            ),
            NewsCategory::Growth => format!(
                "{} weakness is expected as weak economic growth typically leads to USD depreciation.",
                name
            ),
            NewsCategory::InterestRate => format!(
                "{} weakness is expected as lower interest rates typically reduce foreign investment and weaken USD.",
                name
            ),
            _ => format!(
                "{} weakness is expected as negative {} data typically leads to USD depreciation against other currencies.",
                name,
                news_type.label()
            ),
        },
        (false, Sentiment::Bullish) => match category {
            NewsCategory::Employment => format!(
                "{} strength is expected. This could lead to {}/USD pair appreciation as the currency outperforms USD.",
                name, code
            ),
            NewsCategory::Inflation => format!(
                "{} strength is expected. This could lead to {}/USD pair appreciation as inflation concerns may be lower than in the US.",
                name, code
            ),
            NewsCategory::Growth => format!(
                "{} strength is expected. This could lead to {}/USD pair appreciation as economic growth may be stronger than in the US.",
                name, code
            ),
            NewsCategory::InterestRate => format!(
                "{} strength is expected. This could lead to {}/USD pair appreciation as higher interest rates attract investment.",
                name, code
            ),
            _ => format!(
                "{} strength is expected. This could lead to {}/USD pair appreciation.",
                name, code
            ),
        },
        (false, Sentiment::Bearish) => match category {
            NewsCategory::Employment => format!(
                "{} weakness is expected. This could lead to {}/USD pair depreciation as the currency underperforms USD.",
                name, code
            ),
            NewsCategory::Inflation => format!(
                "{} weakness is expected. This could lead to {}/USD pair depreciation as inflation concerns may be higher than in the US.",
                name, code
            ),
            NewsCategory::Growth => format!(
                "{} weakness is expected. This could lead to {}/USD pair depreciation as economic growth may be weaker than in the US.",
                name, code
            ),
            NewsCategory::InterestRate => format!(
                "{} weakness is expected. This could lead to {}/USD pair depreciation as lower interest rates reduce investment appeal.",
                name, code
            ),
            _ => format!(
                "{} weakness is expected. This could lead to {}/USD pair depreciation.",
                name, code
            ),
        },
    };
    Some(text)
}

// USD majors: (pair, direction on a bullish USD reading, base pips).
// Bearish and neutral readings take the opposite side of every row.
const USD_MAJORS: [(&str, TradeDirection, u32); 5] = [
    ("EUR/USD", TradeDirection::Sell, 60),
    ("GBP/USD", TradeDirection::Sell, 55),
    ("USD/JPY", TradeDirection::Buy, 65),
    ("USD/CHF", TradeDirection::Buy, 50),
    ("AUD/USD", TradeDirection::Sell, 45),
];

const HEADLINE_PAIR_PIPS: u32 = 50;

// Cross pairs per non-USD currency: (pair, base pips, direction inverted
// relative to the headline pair). JPY, CAD and CHF quote on the other side of
// their crosses, so their rows invert.
fn cross_pairs(currency: Currency) -> &'static [(&'static str, u32, bool)] {
    match currency {
        Currency::EUR => &[("EUR/GBP", 35, false), ("EUR/JPY", 40, false), ("EUR/CHF", 30, false)],
        Currency::GBP => &[("GBP/EUR", 35, false), ("GBP/JPY", 40, false), ("GBP/CHF", 30, false)],
        Currency::JPY => &[("EUR/JPY", 40, true), ("GBP/JPY", 45, true), ("AUD/JPY", 35, true)],
        Currency::AUD => &[("AUD/EUR", 30, false), ("AUD/GBP", 35, false), ("AUD/JPY", 40, false)],
        Currency::CAD => &[("EUR/CAD", 35, true), ("GBP/CAD", 40, true), ("AUD/CAD", 30, true)],
        Currency::CHF => &[("EUR/CHF", 30, true), ("GBP/CHF", 35, true), ("AUD/CHF", 25, true)],
        Currency::NZD => &[("NZD/EUR", 30, false), ("NZD/GBP", 35, false), ("NZD/JPY", 40, false)],
        Currency::USD => &[],
    }
}

/// Suggested trades for a reading. For the base currency this is the fixed
/// majors table with sides set by sentiment; for any other currency the
/// headline pair is always `{currency}/USD`, followed by its crosses.
pub(crate) fn suggested_pairs(currency: Currency, sentiment: Sentiment) -> Vec<SuggestedPair> {
    let mut pairs = Vec::new();

    if currency.is_base() {
        for (pair, bullish_direction, pips) in USD_MAJORS {
            let direction = match sentiment {
                Sentiment::Bullish => bullish_direction,
                _ => bullish_direction.inverted(),
            };
            pairs.push(SuggestedPair::new(pair, direction, pips));
        }
    } else {
        let headline_direction = match sentiment {
            Sentiment::Bullish => TradeDirection::Buy,
            _ => TradeDirection::Sell,
        };
        pairs.push(SuggestedPair::new(
            format!("{}/USD", currency.code()),
            headline_direction,
            HEADLINE_PAIR_PIPS,
        ));
        for (pair, pips, inverts) in cross_pairs(currency) {
            let direction = if *inverts {
                headline_direction.inverted()
            } else {
                headline_direction
            };
            pairs.push(SuggestedPair::new(*pair, direction, *pips));
        }
    }

    pairs.truncate(MAX_SUGGESTED_PAIRS);
    pairs
}

/// How long the market typically keeps moving after the release.
pub(crate) fn time_horizon(tier: ImpactTier) -> &'static str {
    match tier {
        ImpactTier::Critical => {
            "This news typically affects the market for 2-4 hours with high volatility. Consider trading within the first 30 minutes for maximum impact."
        }
        ImpactTier::Major => {
            "This news typically affects the market for 1-3 hours. Best trading opportunities are within the first 15-30 minutes."
        }
        ImpactTier::Strong => {
            "This news typically affects the market for 1-2 hours. Focus on the first 15-20 minutes for optimal entry."
        }
        ImpactTier::Moderate => {
            "This news typically affects the market for 30 minutes to 1 hour. Quick scalping opportunities may be available."
        }
        ImpactTier::Minor => {
            "This news typically affects the market for 15-45 minutes. Consider quick scalping strategies."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn every_currency_suggests_at_most_five_pairs() {
        for currency in Currency::ALL {
            for sentiment in [Sentiment::Bullish, Sentiment::Bearish, Sentiment::Neutral] {
                let pairs = suggested_pairs(currency, sentiment);
                assert!(!pairs.is_empty());
                assert!(pairs.len() <= MAX_SUGGESTED_PAIRS);
            }
        }
    }

    #[test]
    fn usd_majors_flip_with_sentiment() {
        let bullish = suggested_pairs(Currency::USD, Sentiment::Bullish);
        let bearish = suggested_pairs(Currency::USD, Sentiment::Bearish);
        assert_eq!(bullish.len(), 5);
        assert_eq!(bullish[0].pair, "EUR/USD");
        assert_eq!(bullish[0].direction, TradeDirection::Sell);
        assert_eq!(bullish[2].pair, "USD/JPY");
        assert_eq!(bullish[2].direction, TradeDirection::Buy);
        for (b, r) in bullish.iter().zip(&bearish) {
            assert_eq!(b.pair, r.pair);
            assert_eq!(b.pips, r.pips);
            assert_eq!(b.direction.inverted(), r.direction);
        }
    }

    #[test]
    fn non_base_headline_pair_comes_first() {
        for currency in Currency::ALL.iter().filter(|c| !c.is_base()) {
            let pairs = suggested_pairs(*currency, Sentiment::Bullish);
            assert_eq!(pairs[0].pair, format!("{}/USD", currency.code()));
            assert_eq!(pairs[0].direction, TradeDirection::Buy);
            assert_eq!(pairs[0].pips, 50);
        }
    }

    #[test]
    fn jpy_crosses_invert_against_headline() {
        let pairs = suggested_pairs(Currency::JPY, Sentiment::Bullish);
        assert_eq!(pairs[0].direction, TradeDirection::Buy);
        for cross in &pairs[1..] {
            assert_eq!(cross.direction, TradeDirection::Sell);
        }

        let eur = suggested_pairs(Currency::EUR, Sentiment::Bullish);
        for cross in &eur[1..] {
            assert_eq!(cross.direction, TradeDirection::Buy);
        }
    }

    #[test]
    fn neutral_narrative_is_shared() {
        let a = narrative(
            NewsType::NonFarmPayrolls,
            Sentiment::Neutral,
            dec!(5),
            dec!(5),
        );
        let b = narrative(NewsType::CoreCpi, Sentiment::Neutral, dec!(5), dec!(5));
        assert!(a.contains("economic stability"));
        assert!(b.contains("economic stability"));
        assert!(a.contains("Non-Farm Payrolls (NFP)"));
        assert!(b.contains("Core CPI"));
    }

    #[test]
    fn narrative_interpolates_values() {
        let text = narrative(
            NewsType::GrossDomesticProduct,
            Sentiment::Bullish,
            dec!(1.2),
            dec!(1.9),
        );
        assert!(text.contains("from 1.2% to 1.9%"));
    }

    #[test]
    fn base_currency_impact_talks_about_usd_itself() {
        let text = currency_impact(
            Currency::USD,
            NewsType::NonFarmPayrolls,
            Sentiment::Bullish,
        )
        .unwrap();
        assert!(text.starts_with("US Dollar strength is expected"));
        assert!(!text.contains("/USD pair"));
    }

    #[test]
    fn other_currency_impact_talks_about_the_usd_pair() {
        let text =
            currency_impact(Currency::EUR, NewsType::CoreCpi, Sentiment::Bearish).unwrap();
        assert!(text.starts_with("Euro weakness is expected"));
        assert!(text.contains("EUR/USD pair depreciation"));
    }

    #[test]
    fn neutral_has_no_currency_impact() {
        assert_eq!(
            currency_impact(Currency::USD, NewsType::RetailSales, Sentiment::Neutral),
            None
        );
    }

    #[test]
    fn generic_impact_interpolates_the_news_label() {
        let text =
            currency_impact(Currency::USD, NewsType::HousingStarts, Sentiment::Bullish).unwrap();
        assert!(text.contains("positive Housing Starts data"));
    }
}
